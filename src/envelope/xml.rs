//! XML-backed envelope

use crate::envelope::uuid::{make_uuid, UuidProvider, DEFAULT_VERSION};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::tree::Tree;
use crate::xml::normalize::normalize;
use crate::xml::parser::Parser;
use crate::xml::to_tree::document_to_tree;
use crate::xml::writer::{tree_to_xml, XmlConfig};

/// Envelope whose wire format is markup text.
///
/// Construction from text runs namespace normalization before parsing, so
/// the owned tree always carries flattened names. Unlike the other
/// variants, malformed input here fails with `Parse` rather than degrading.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlEnvelope {
    tree: Tree,
    uuid: Option<String>,
    config: XmlConfig,
}

impl XmlEnvelope {
    /// Wrap an existing tree
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            uuid: None,
            config: XmlConfig::default(),
        }
    }

    /// Normalize, parse and convert markup text
    pub fn from_text(data: &str) -> Result<Self> {
        let normalized = normalize(data);
        let doc = Parser::new(normalized.as_bytes()).parse()?;
        Ok(Self::new(document_to_tree(&doc)))
    }

    /// Attach a generated identifier (versions 1 through 5)
    pub fn with_uuid(mut self, version: u8, provider: &dyn UuidProvider) -> Result<Self> {
        self.uuid = Some(make_uuid(provider, version)?);
        Ok(self)
    }

    /// Attach a generated identifier using the default version (4)
    pub fn with_default_uuid(self, provider: &dyn UuidProvider) -> Result<Self> {
        self.with_uuid(DEFAULT_VERSION, provider)
    }

    /// Override the codec options used when serializing
    pub fn with_config(mut self, config: XmlConfig) -> Self {
        self.config = config;
        self
    }

    /// Render the tree as markup under an explicit root tag.
    ///
    /// With `None`, the single top-level key is promoted to document root,
    /// as `serialize` does.
    pub fn to_xml(&self, root: Option<&str>) -> Result<String> {
        tree_to_xml(root, &self.tree, &self.config)
    }
}

impl Envelope for XmlEnvelope {
    fn tree(&self) -> &Tree {
        &self.tree
    }

    fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref()
    }

    fn serialize(&self) -> Result<String> {
        tree_to_xml(None, &self.tree, &self.config)
    }

    fn unserialize(&mut self, data: &str) -> Result<()> {
        let normalized = normalize(data);
        let doc = Parser::new(normalized.as_bytes()).parse()?;
        self.tree = document_to_tree(&doc);
        Ok(())
    }
}
