//! Markup document to [`Tree`] conversion
//!
//! Deliberately lossy: a tag that occurs exactly once is stored as its
//! single subtree, so cardinality-one repeatable elements are
//! indistinguishable from singular elements on the reverse conversion.

use crate::tree::{List, Map, Tree, ATTRIBUTES_KEY, CDATA_KEY, VALUE_KEY};
use crate::xml::model::{Content, Document, Element};

/// Convert a whole document, wrapping the root element under its tag name.
pub fn document_to_tree(doc: &Document) -> Tree {
    let mut map = Map::new();
    map.insert(&doc.root.name, element_to_tree(&doc.root));
    Tree::Map(map)
}

/// Convert a single element recursively.
pub fn element_to_tree(element: &Element) -> Tree {
    let mut map = Map::new();
    let mut bare = String::new();

    for child in &element.children {
        match child {
            Content::Element(el) => {
                let converted = element_to_tree(el);
                match map.get_mut(&el.name) {
                    Some(Tree::List(list)) => list.push(converted),
                    Some(existing) => {
                        // promote the prior single value to a list, then append
                        let prior = std::mem::replace(existing, Tree::empty());
                        *existing = Tree::List(List::from(vec![prior, converted]));
                    }
                    None => {
                        map.insert(&el.name, converted);
                    }
                }
            }
            Content::Text(text) => {
                let text = text.trim();
                if !text.is_empty() && map.is_empty() {
                    bare = text.to_string();
                }
            }
            Content::Cdata(text) => {
                map.insert(CDATA_KEY, text.trim());
            }
        }
    }

    let mut value = if map.is_empty() {
        Tree::Scalar(bare)
    } else {
        Tree::Map(map)
    };

    if !element.attributes.is_empty() {
        let mut attrs = Map::new();
        for (name, attr) in &element.attributes {
            attrs.insert(name, attr.as_str());
        }
        match value {
            Tree::Map(ref mut map) => {
                map.insert(ATTRIBUTES_KEY, attrs);
            }
            other => {
                // leaf with attributes: the bare scalar moves under @value
                let mut wrapped = Map::new();
                wrapped.insert(VALUE_KEY, other);
                wrapped.insert(ATTRIBUTES_KEY, attrs);
                value = Tree::Map(wrapped);
            }
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::xml::parser::Parser;

    fn convert(input: &str) -> Result<Tree> {
        let doc = Parser::new(input.as_bytes()).parse()?;
        Ok(document_to_tree(&doc))
    }

    fn scalar(s: &str) -> Tree {
        Tree::Scalar(s.to_string())
    }

    #[test]
    fn test_repeated_tags_become_list() -> Result<()> {
        let tree = convert("<root><item>1</item><item>2</item></root>")?;
        let expected: Tree = {
            let mut inner = Map::new();
            inner.insert("item", Tree::from(vec![scalar("1"), scalar("2")]));
            let mut outer = Map::new();
            outer.insert("root", inner);
            outer.into()
        };
        assert_eq!(tree, expected);
        Ok(())
    }

    #[test]
    fn test_single_occurrence_collapses() -> Result<()> {
        let tree = convert("<root><item>1</item></root>")?;
        let expected: Tree = {
            let mut inner = Map::new();
            inner.insert("item", scalar("1"));
            let mut outer = Map::new();
            outer.insert("root", inner);
            outer.into()
        };
        assert_eq!(tree, expected);
        Ok(())
    }

    #[test]
    fn test_leaf_with_attributes_wraps_value() -> Result<()> {
        let tree = convert("<root attr=\"x\">hi</root>")?;
        let root = tree
            .as_map()
            .and_then(|m| m.get("root"))
            .and_then(Tree::as_map)
            .cloned()
            .unwrap_or_default();
        assert_eq!(root.get(VALUE_KEY), Some(&scalar("hi")));
        let attrs = root.get(ATTRIBUTES_KEY).and_then(Tree::as_map).cloned();
        assert_eq!(
            attrs.and_then(|a| a.get("attr").cloned()),
            Some(scalar("x"))
        );
        Ok(())
    }

    #[test]
    fn test_attributes_on_branch_join_the_map() -> Result<()> {
        let tree = convert("<root attr=\"x\"><item>1</item></root>")?;
        let root = tree
            .as_map()
            .and_then(|m| m.get("root"))
            .and_then(Tree::as_map)
            .cloned()
            .unwrap_or_default();
        assert_eq!(root.get("item"), Some(&scalar("1")));
        assert!(root.contains_key(ATTRIBUTES_KEY));
        assert!(!root.contains_key(VALUE_KEY));
        Ok(())
    }

    #[test]
    fn test_empty_element_is_empty_scalar() -> Result<()> {
        let tree = convert("<root><nothing/></root>")?;
        let root = tree
            .as_map()
            .and_then(|m| m.get("root"))
            .and_then(Tree::as_map)
            .cloned()
            .unwrap_or_default();
        assert_eq!(root.get("nothing"), Some(&scalar("")));
        Ok(())
    }

    #[test]
    fn test_cdata_under_marker_key() -> Result<()> {
        let tree = convert("<root><![CDATA[ raw <data> ]]></root>")?;
        let root = tree
            .as_map()
            .and_then(|m| m.get("root"))
            .and_then(Tree::as_map)
            .cloned()
            .unwrap_or_default();
        assert_eq!(root.get(CDATA_KEY), Some(&scalar("raw <data>")));
        Ok(())
    }

    #[test]
    fn test_attribute_only_element_keeps_empty_value() -> Result<()> {
        let tree = convert("<root attr=\"x\"/>")?;
        let root = tree
            .as_map()
            .and_then(|m| m.get("root"))
            .and_then(Tree::as_map)
            .cloned()
            .unwrap_or_default();
        assert_eq!(root.get(VALUE_KEY), Some(&scalar("")));
        assert!(root.contains_key(ATTRIBUTES_KEY));
        Ok(())
    }

    #[test]
    fn test_text_ignored_once_tagged_children_exist() -> Result<()> {
        let tree = convert("<root><a>1</a>stray</root>")?;
        let root = tree
            .as_map()
            .and_then(|m| m.get("root"))
            .and_then(Tree::as_map)
            .cloned()
            .unwrap_or_default();
        assert_eq!(root.get("a"), Some(&scalar("1")));
        assert_eq!(root.len(), 1);
        Ok(())
    }

    #[test]
    fn test_three_siblings() -> Result<()> {
        let tree = convert("<r><i>1</i><i>2</i><i>3</i></r>")?;
        let list = tree
            .as_map()
            .and_then(|m| m.get("r"))
            .and_then(Tree::as_map)
            .and_then(|m| m.get("i"))
            .and_then(Tree::as_list)
            .cloned()
            .unwrap_or_default();
        assert_eq!(list.len(), 3);
        Ok(())
    }
}
