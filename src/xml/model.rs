//! Parsed markup document model

use indexmap::IndexMap;

/// A parsed markup document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// An element node
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

impl Element {
    /// Child element nodes in document order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Content::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Direct text content (text and CDATA children concatenated), trimmed
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Content::Text(t) | Content::Cdata(t) => out.push_str(t),
                Content::Element(_) => {}
            }
        }
        out.trim().to_string()
    }
}

/// A content node inside an element
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
    Cdata(String),
}
