//! Raw tree envelope

use crate::envelope::uuid::{make_uuid, UuidProvider, DEFAULT_VERSION};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::json;
use crate::tree::Tree;

/// Envelope over an already-built tree.
///
/// Its wire format is the crate's canonical text encoding (the same
/// rendering the JSON envelope uses). Malformed input degrades to an empty
/// tree instead of failing; downstream callers rely on this for best-effort
/// decoding.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeEnvelope {
    tree: Tree,
    uuid: Option<String>,
}

impl TreeEnvelope {
    /// Wrap an existing tree
    pub fn new(tree: Tree) -> Self {
        Self { tree, uuid: None }
    }

    /// Decode serialized text, degrading to an empty tree on failure
    pub fn from_text(data: &str) -> Self {
        Self::new(json::from_str(data).unwrap_or_default())
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
}

impl Envelope for TreeEnvelope {
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
        Ok(json::to_string(&self.tree))
    }

    fn unserialize(&mut self, data: &str) -> Result<()> {
        self.tree = json::from_str(data).unwrap_or_default();
        Ok(())
    }
}
