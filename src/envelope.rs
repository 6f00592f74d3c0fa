//! Message envelopes: uniform get/set/add/serialize/clear over an owned tree
//!
//! Three variants share the capability set and differ only in how
//! `serialize`/`unserialize` map the tree to text. Structural operations
//! delegate to the [`path`](crate::path) module; each envelope exclusively
//! owns its tree.

pub mod json;
pub mod tree;
pub mod uuid;
pub mod xml;

pub use json::JsonEnvelope;
pub use tree::TreeEnvelope;
pub use uuid::{RandomUuid, UuidProvider};
pub use xml::XmlEnvelope;

use crate::error::Result;
use crate::path;
use crate::tree::{Map, Tree};

/// The envelope capability set.
///
/// `get`/`set`/`add` never fail; a missing path simply yields the provided
/// default. Only `serialize`/`unserialize` are format specific.
pub trait Envelope {
    /// The owned tree
    fn tree(&self) -> &Tree;

    /// Mutable access to the owned tree
    fn tree_mut(&mut self) -> &mut Tree;

    /// The identifier attached at construction, if any
    fn uuid(&self) -> Option<&str>;

    /// Render the tree in this envelope's wire format
    fn serialize(&self) -> Result<String>;

    /// Replace the tree from wire text
    fn unserialize(&mut self, data: &str) -> Result<()>;

    /// Read a dotted path
    fn get(&self, path: &str) -> Option<&Tree> {
        path::get(self.tree(), path)
    }

    /// Read a dotted path, substituting `default` when absent
    fn get_or<'a>(&'a self, path: &str, default: &'a Tree) -> &'a Tree {
        self.get(path).unwrap_or(default)
    }

    /// Write a dotted path, replacing any existing value
    fn set(&mut self, path: &str, value: impl Into<Tree>) {
        path::set(self.tree_mut(), path, value.into());
    }

    /// Write a dotted path only when it is currently absent
    fn add(&mut self, path: &str, value: impl Into<Tree>) {
        path::add(self.tree_mut(), path, value.into());
    }

    /// Apply `set` for each entry
    fn set_list<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Tree)>,
    {
        for (path, value) in entries {
            self.set(&path, value);
        }
    }

    /// Apply `add` for each entry
    fn add_list<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, Tree)>,
    {
        for (path, value) in entries {
            self.add(&path, value);
        }
    }

    /// Reset the owned tree to an empty map
    fn clear(&mut self) {
        *self.tree_mut() = Tree::Map(Map::new());
    }
}
