//! [`Tree`] to markup text conversion

use crate::error::{Error, Result};
use crate::tree::{Tree, ATTRIBUTES_KEY, CDATA_KEY, VALUE_KEY};

/// Codec options for produced markup.
///
/// Explicit configuration passed at construction; there is no process-wide
/// mutable state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlConfig {
    /// Declared XML version
    pub version: String,
    /// Declared document encoding
    pub encoding: String,
    /// Emit indented output when true
    pub pretty: bool,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: "UTF-8".to_string(),
            pretty: false,
        }
    }
}

/// Convert a tree back to markup text.
///
/// When `root` is absent and the tree is a map with exactly one top-level
/// key, that key is promoted to document root and its value becomes the
/// root's content. Fails with `InvalidInput` when no root tag can be
/// determined.
///
/// Not guaranteed byte-identical to the original input: one-element lists
/// were collapsed during conversion, so a tag that occurred exactly once
/// round-trips as a singular element.
pub fn tree_to_xml(root: Option<&str>, tree: &Tree, config: &XmlConfig) -> Result<String> {
    let (root, tree) = resolve_root(root, tree)?;

    let mut out = format!(
        "<?xml version=\"{}\" encoding=\"{}\"?>",
        config.version, config.encoding
    );
    if config.pretty {
        out.push('\n');
    }
    write_element(&mut out, root, tree, config, 0);
    if config.pretty {
        out.push('\n');
    }
    Ok(out)
}

fn resolve_root<'a>(root: Option<&'a str>, tree: &'a Tree) -> Result<(&'a str, &'a Tree)> {
    match root {
        Some(tag) if !tag.is_empty() => Ok((tag, tree)),
        _ => match tree {
            Tree::Map(map) if map.len() == 1 => match map.iter().next() {
                Some((tag, inner)) => Ok((tag.as_str(), inner)),
                None => Err(Error::InvalidInput("no root tag".to_string())),
            },
            _ => Err(Error::InvalidInput(
                "a root tag is required unless the tree has exactly one top-level key".to_string(),
            )),
        },
    }
}

fn write_element(out: &mut String, tag: &str, tree: &Tree, config: &XmlConfig, depth: usize) {
    if let Tree::List(list) = tree {
        // a list expands back into repeated sibling elements
        for item in list {
            write_element(out, tag, item, config, depth);
        }
        return;
    }

    indent(out, config, depth);
    out.push('<');
    out.push_str(tag);

    let map = match tree {
        Tree::Map(map) => map,
        Tree::Scalar(text) => {
            if text.is_empty() {
                out.push_str("/>");
                return;
            }
            out.push('>');
            out.push_str(&escape_xml(text));
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
            return;
        }
        Tree::List(_) => return,
    };

    if let Some(Tree::Map(attrs)) = map.get(ATTRIBUTES_KEY) {
        for (name, value) in attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            if let Tree::Scalar(text) = value {
                out.push_str(&escape_xml(text));
            }
            out.push('"');
        }
    }

    let bare = match map.get(VALUE_KEY) {
        Some(Tree::Scalar(text)) => Some(text.as_str()),
        _ => None,
    };
    let cdata = match map.get(CDATA_KEY) {
        Some(Tree::Scalar(text)) => Some(text.as_str()),
        _ => None,
    };
    let children: Vec<(&String, &Tree)> = map
        .iter()
        .filter(|(key, _)| {
            key.as_str() != ATTRIBUTES_KEY
                && key.as_str() != VALUE_KEY
                && key.as_str() != CDATA_KEY
        })
        .collect();

    if children.is_empty() && bare.map_or(true, str::is_empty) && cdata.is_none() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    if let Some(text) = bare {
        out.push_str(&escape_xml(text));
    }
    if let Some(text) = cdata {
        write_cdata(out, text);
    }
    for (key, value) in &children {
        write_element(out, key, value, config, depth + 1);
    }
    if !children.is_empty() {
        indent(out, config, depth);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

// a literal "]]>" cannot appear inside a section; split it across two
fn write_cdata(out: &mut String, text: &str) {
    out.push_str("<![CDATA[");
    out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]>");
}

fn indent(out: &mut String, config: &XmlConfig, depth: usize) {
    if !config.pretty {
        return;
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for _ in 0..depth {
        out.push_str("  ");
    }
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
