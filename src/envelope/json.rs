//! JSON-backed envelope

use crate::envelope::uuid::{make_uuid, UuidProvider, DEFAULT_VERSION};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::json;
use crate::tree::Tree;

/// Envelope whose wire format is JSON text.
///
/// Encoding preserves non-ASCII text without escaping. Like the raw tree
/// envelope, malformed input degrades to an empty tree instead of failing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonEnvelope {
    tree: Tree,
    uuid: Option<String>,
}

impl JsonEnvelope {
    /// Wrap an existing tree
    pub fn new(tree: Tree) -> Self {
        Self { tree, uuid: None }
    }

    /// Decode JSON text, degrading to an empty tree on failure
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

impl Envelope for JsonEnvelope {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Map;

    #[test]
    fn test_serialize_is_json() -> Result<()> {
        let mut envelope = JsonEnvelope::default();
        envelope.set("name", "test");
        assert_eq!(envelope.serialize()?, r#"{"name":"test"}"#);
        Ok(())
    }

    #[test]
    fn test_unicode_not_escaped() -> Result<()> {
        let mut envelope = JsonEnvelope::default();
        envelope.set("msg", "ação");
        assert!(envelope.serialize()?.contains("ação"));
        Ok(())
    }

    #[test]
    fn test_from_text_decodes() {
        let envelope = JsonEnvelope::from_text(r#"{"a":{"b":"v"}}"#);
        assert_eq!(
            envelope.get("a.b"),
            Some(&Tree::Scalar("v".to_string()))
        );
    }

    #[test]
    fn test_malformed_degrades_not_fails() {
        let mut envelope = JsonEnvelope::from_text("{broken");
        assert_eq!(envelope.tree(), &Tree::Map(Map::new()));
        assert!(envelope.unserialize("{still broken").is_ok());
        assert_eq!(envelope.tree(), &Tree::Map(Map::new()));
    }
}
