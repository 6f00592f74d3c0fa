//! treemark - bidirectional XML/tree conversion with message envelopes
//!
//! Raw markup is namespace-flattened, parsed, and converted into a nested
//! [`Tree`] of scalars, lists and maps; the reverse conversion renders a
//! tree back to markup. Envelopes wrap an owned tree with uniform
//! dotted-path get/set/add and format-specific serialization, and an
//! [`XPathAccessor`] resolves dotted paths directly against the parsed
//! document.
//!
//! # Quick Start
//!
//! ```
//! use treemark::xml_to_tree;
//! # fn main() -> Result<(), treemark::Error> {
//! let tree = xml_to_tree("<root><item>1</item><item>2</item></root>")?;
//! let items = tree
//!     .as_map()
//!     .and_then(|root| root.get("root"))
//!     .and_then(|root| root.as_map())
//!     .and_then(|root| root.get("item"))
//!     .and_then(|items| items.as_list());
//! assert_eq!(items.map(|l| l.len()), Some(2));
//! # Ok(())
//! # }
//! ```
//!
//! The conversion is deliberately lossy: a tag occurring exactly once is
//! stored as its single subtree, so cardinality-one repeatable elements
//! round-trip as singular elements.

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Diagnostic, Error, Pos, Result, Span};

pub mod lexer;
pub use lexer::Cursor;

pub mod tree;
pub use tree::{List, Map, Tree, ATTRIBUTES_KEY, CDATA_KEY, VALUE_KEY};

pub mod path;

pub mod json;

pub mod xml;
pub use xml::{
    normalize, strip_declaration, Content as XmlContent, Document as XmlDocument,
    Element as XmlElement, Parser as XmlParser, XPathAccessor, XmlConfig,
};

pub mod envelope;
pub use envelope::{Envelope, JsonEnvelope, RandomUuid, TreeEnvelope, UuidProvider, XmlEnvelope};

/// Parse markup from a string, without namespace normalization
pub fn from_xml_str(s: &str) -> Result<XmlDocument> {
    let mut parser = XmlParser::new(s.as_bytes());
    parser.parse()
}

/// Normalize, parse and convert markup into a tree
pub fn xml_to_tree(s: &str) -> Result<Tree> {
    let normalized = normalize(s);
    let doc = from_xml_str(&normalized)?;
    Ok(xml::document_to_tree(&doc))
}

/// Render a tree as markup text with default codec options.
///
/// When `root` is `None` and the tree has exactly one top-level key, that
/// key becomes the document root.
pub fn tree_to_xml(root: Option<&str>, tree: &Tree) -> Result<String> {
    xml::tree_to_xml(root, tree, &XmlConfig::default())
}

/// Decode JSON text into a tree
pub fn from_json_str(s: &str) -> Result<Tree> {
    json::from_str(s)
}
