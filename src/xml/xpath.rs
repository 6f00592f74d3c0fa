//! Dotted-path field access over a parsed document
//!
//! Operates on the parsed document directly, independent of the tree
//! projection, for targeted field reads. Paths are dot-separated and
//! rewritten to rooted slash paths before querying; no predicates or
//! functions are supported.

use crate::error::{Error, Result};
use crate::tree::{List, Tree};
use crate::xml::model::{Document, Element};
use crate::xml::normalize::normalize;
use crate::xml::parser::Parser;
use crate::xml::to_tree::element_to_tree;

/// Wraps a parsed document and resolves dotted paths to scalar or
/// structured results, with positional indexing.
#[derive(Clone, Debug, Default)]
pub struct XPathAccessor {
    document: Option<Document>,
    raw: String,
}

impl XPathAccessor {
    /// Create an accessor with no document loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and parse `text`, replacing any previously loaded document.
    ///
    /// Fails with `InvalidInput` on empty input and `Parse` (aggregating
    /// every diagnostic) on malformed markup; a failed load leaves no
    /// document and no raw text behind.
    pub fn load(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "cannot load an empty document".to_string(),
            ));
        }
        self.document = None;
        self.raw.clear();
        let normalized = normalize(text);
        let doc = Parser::new(normalized.as_bytes()).parse()?;
        self.document = Some(doc);
        self.raw = text.to_string();
        Ok(())
    }

    /// The raw text the current document was loaded from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Resolve a dotted path against the loaded document.
    ///
    /// With `index`, returns the match at that position (`None` when out of
    /// range). Without, returns a list of every match in document order.
    /// A match with more than one attribute or child element is returned as
    /// a converted map, otherwise as its trimmed text.
    pub fn query(&self, path: &str, index: Option<usize>) -> Result<Option<Tree>> {
        let doc = self.document.as_ref().ok_or(Error::MissingDocument)?;

        let rooted = format!("/{}", path.replace('.', "/"));
        let mut segments = rooted.split('/').filter(|s| !s.is_empty());

        let mut matches: Vec<&Element> = match segments.next() {
            Some(first) if doc.root.name == first => vec![&doc.root],
            _ => Vec::new(),
        };
        for segment in segments {
            let next: Vec<&Element> = matches
                .iter()
                .copied()
                .flat_map(|el| el.child_elements().filter(|c| c.name == segment))
                .collect();
            matches = next;
        }

        match index {
            Some(idx) => Ok(matches.get(idx).map(|el| flatten(el))),
            None => {
                if matches.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Tree::List(
                        matches.iter().map(|el| flatten(el)).collect::<List>(),
                    )))
                }
            }
        }
    }

    /// Like [`query`](Self::query), but substituting `default` when there is
    /// no match.
    pub fn query_or(&self, path: &str, index: Option<usize>, default: Tree) -> Result<Tree> {
        Ok(self.query(path, index)?.unwrap_or(default))
    }
}

fn flatten(element: &Element) -> Tree {
    let weight = element.attributes.len() + element.child_elements().count();
    if weight > 1 {
        element_to_tree(element)
    } else {
        Tree::Scalar(element.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<root><item>1</item><item>2</item><single>only</single></root>";

    fn loaded(text: &str) -> Result<XPathAccessor> {
        let mut accessor = XPathAccessor::new();
        accessor.load(text)?;
        Ok(accessor)
    }

    fn scalar(s: &str) -> Tree {
        Tree::Scalar(s.to_string())
    }

    #[test]
    fn test_query_before_load_fails() {
        let accessor = XPathAccessor::new();
        assert_eq!(
            accessor.query("root.item", None),
            Err(Error::MissingDocument)
        );
    }

    #[test]
    fn test_load_empty_fails() {
        let mut accessor = XPathAccessor::new();
        assert!(matches!(
            accessor.load("   "),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_malformed_aggregates_diagnostics() {
        let mut accessor = XPathAccessor::new();
        let err = accessor.load("<root><unclosed>").unwrap_err();
        assert!(!err.diagnostics().is_empty());
        // a failed load leaves no document behind
        assert_eq!(
            accessor.query("root", None),
            Err(Error::MissingDocument)
        );
    }

    #[test]
    fn test_failed_load_clears_previous_state() -> Result<()> {
        let mut accessor = loaded(DOC)?;
        assert!(accessor.load("<root><unclosed>").is_err());
        assert_eq!(accessor.raw(), "");
        assert_eq!(accessor.query("root", None), Err(Error::MissingDocument));
        Ok(())
    }

    #[test]
    fn test_indexed_query() -> Result<()> {
        let accessor = loaded(DOC)?;
        assert_eq!(accessor.query("root.item", Some(0))?, Some(scalar("1")));
        assert_eq!(accessor.query("root.item", Some(1))?, Some(scalar("2")));
        Ok(())
    }

    #[test]
    fn test_out_of_range_index_is_none() -> Result<()> {
        let accessor = loaded(DOC)?;
        assert_eq!(accessor.query("root.item", Some(5))?, None);
        Ok(())
    }

    #[test]
    fn test_unindexed_query_lists_all_matches() -> Result<()> {
        let accessor = loaded(DOC)?;
        let result = accessor.query("root.item", None)?;
        assert_eq!(result, Some(Tree::from(vec![scalar("1"), scalar("2")])));
        Ok(())
    }

    #[test]
    fn test_no_match_yields_default() -> Result<()> {
        let accessor = loaded(DOC)?;
        assert_eq!(accessor.query("root.missing", None)?, None);
        assert_eq!(
            accessor.query_or("root.missing", None, scalar("fallback"))?,
            scalar("fallback")
        );
        Ok(())
    }

    #[test]
    fn test_structured_match_returns_map() -> Result<()> {
        let accessor = loaded("<root><pair><a>1</a><b>2</b></pair></root>")?;
        let result = accessor.query("root.pair", Some(0))?;
        let map = result.and_then(|t| t.as_map().cloned());
        assert!(map.is_some());
        let map = map.unwrap_or_default();
        assert_eq!(map.get("a"), Some(&scalar("1")));
        assert_eq!(map.get("b"), Some(&scalar("2")));
        Ok(())
    }

    #[test]
    fn test_namespaced_document_queries_flattened() -> Result<()> {
        let doc = r#"<ns:root xmlns:ns="urn:x"><ns:item>7</ns:item></ns:root>"#;
        let accessor = loaded(doc)?;
        assert_eq!(accessor.query("root.item", Some(0))?, Some(scalar("7")));
        Ok(())
    }

    #[test]
    fn test_raw_text_retained() -> Result<()> {
        let accessor = loaded(DOC)?;
        assert_eq!(accessor.raw(), DOC);
        Ok(())
    }
}
