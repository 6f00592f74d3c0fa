//! Markup parsing, namespace flattening, tree conversion and field access

pub mod model;
pub mod normalize;
pub mod parser;
pub mod to_tree;
pub mod writer;
pub mod xpath;

pub use model::{Content, Document, Element};
pub use normalize::{normalize, strip_declaration};
pub use parser::Parser;
pub use to_tree::{document_to_tree, element_to_tree};
pub use writer::{tree_to_xml, XmlConfig};
pub use xpath::XPathAccessor;
