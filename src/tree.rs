//! Tree model produced and consumed by the markup converters

use indexmap::map::{IntoIter, Iter, Keys, Values};
use indexmap::IndexMap;
use std::ops::Index;

/// Marker key holding an element's attribute map.
pub const ATTRIBUTES_KEY: &str = "@attributes";
/// Marker key holding an element's own text when attributes are present.
pub const VALUE_KEY: &str = "@value";
/// Marker key holding trimmed CDATA section text.
pub const CDATA_KEY: &str = "@cdata";

/// A converted markup value.
///
/// Markup conversion is stringly typed: element text always lands in
/// `Scalar`, repeated sibling tags in `List`, children keyed by tag in `Map`.
/// The marker keys above are reserved and must not collide with real tag or
/// attribute names from input documents (no escaping is provided).
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// Trimmed text content
    Scalar(String),
    /// Repeated sibling elements sharing a tag
    List(List),
    /// An element's children keyed by tag name, plus marker keys
    Map(Map),
}

impl Default for Tree {
    fn default() -> Self {
        Self::Map(Map::new())
    }
}

impl Tree {
    /// An empty scalar, the conversion of an empty element.
    pub fn empty() -> Self {
        Self::Scalar(String::new())
    }

    /// Returns true if this value is a scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Returns true if this value is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns true if this value is a map
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns the text if this is a scalar, None otherwise
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list if this is a list, None otherwise
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the map if this is a map, None otherwise
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns a mutable reference to the list if this is a list
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Returns a mutable reference to the map if this is a map
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<List> for Tree {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<Map> for Tree {
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(values: Vec<Tree>) -> Self {
        Self::List(List(values))
    }
}

impl From<IndexMap<String, Tree>> for Tree {
    fn from(map: IndexMap<String, Tree>) -> Self {
        Self::Map(Map(map))
    }
}

/// An order-preserving map from tag-or-marker keys to subtrees
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(pub(crate) IndexMap<String, Tree>);

impl Map {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Returns the number of entries in the map
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map contains no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the subtree stored under the key
    pub fn get(&self, key: &str) -> Option<&Tree> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the subtree stored under the key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tree> {
        self.0.get_mut(key)
    }

    /// Inserts an entry, returning the previous subtree if the key existed
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tree>) -> Option<Tree> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a key, returning its subtree if it was present
    pub fn remove(&mut self, key: &str) -> Option<Tree> {
        self.0.swap_remove(key)
    }

    /// Returns true if the map contains the key
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns an iterator over the keys
    pub fn keys(&self) -> Keys<'_, String, Tree> {
        self.0.keys()
    }

    /// Returns an iterator over the subtrees
    pub fn values(&self) -> Values<'_, String, Tree> {
        self.0.values()
    }

    /// Returns an iterator over entries
    pub fn iter(&self) -> Iter<'_, String, Tree> {
        self.0.iter()
    }

    /// Returns an iterator that allows modifying each subtree
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Tree> {
        self.0.iter_mut()
    }

    /// Clears the map
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Index<&str> for Map {
    type Output = Tree;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, key: &str) -> &Self::Output {
        &self.0[key]
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Tree);
    type IntoIter = Iter<'a, String, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Map {
    type Item = (String, Tree);
    type IntoIter = IntoIter<String, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<IndexMap<String, Tree>> for Map {
    fn from(map: IndexMap<String, Tree>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Tree)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Tree)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

/// An ordered sequence of subtrees
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List(pub(crate) Vec<Tree>);

impl List {
    /// Creates a new empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of elements in the list
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list contains no elements
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the element at the given index
    pub fn get(&self, index: usize) -> Option<&Tree> {
        self.0.get(index)
    }

    /// Returns a mutable reference to the element at the given index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tree> {
        self.0.get_mut(index)
    }

    /// Appends an element to the end of the list
    pub fn push(&mut self, value: impl Into<Tree>) {
        self.0.push(value.into());
    }

    /// Removes the last element and returns it
    pub fn pop(&mut self) -> Option<Tree> {
        self.0.pop()
    }

    /// Returns an iterator over the list
    pub fn iter(&self) -> std::slice::Iter<'_, Tree> {
        self.0.iter()
    }

    /// Returns an iterator that allows modifying each element
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tree> {
        self.0.iter_mut()
    }
}

impl Index<usize> for List {
    type Output = Tree;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tree;
    type IntoIter = std::slice::Iter<'a, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for List {
    type Item = Tree;
    type IntoIter = std::vec::IntoIter<Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<Tree>> for List {
    fn from(values: Vec<Tree>) -> Self {
        Self(values)
    }
}

impl FromIterator<Tree> for List {
    fn from_iter<I: IntoIterator<Item = Tree>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}
