//! Ordered map type for kstruct maps.
//!
//! A [`Map`] holds two independent, insertion-ordered namespaces:
//!
//! - **children**: key → [`Node`], written `key = value` or `key { ... }`
//! - **attributes**: key → [`Attribute`], written `key(name = value, ...)`
//!
//! Both use [`IndexMap`] so that iteration and serialization follow insertion order.
//! Inserting an existing key replaces the value in place; only the parser treats
//! duplicates as an error.
//!
//! ## Examples
//!
//! ```rust
//! use serde_kstruct::{Attribute, Map, Node};
//!
//! let mut map = Map::new();
//! map.insert("name", "Alice");
//! map.insert("age", 30);
//! map.insert_attribute("version", 2);
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(Node::as_str), Some("Alice"));
//! assert_eq!(map.attribute("version").and_then(Attribute::as_int), Some(2));
//! ```

use crate::{Attribute, Node};
use indexmap::IndexMap;

/// An ordered map of children plus an ordered set of attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    children: IndexMap<String, Node>,
    attributes: IndexMap<String, Attribute>,
}

impl Map {
    /// Creates an empty `Map`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kstruct::Map;
    ///
    /// let map = Map::new();
    /// assert!(map.is_empty());
    /// assert!(!map.has_attributes());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Map::default()
    }

    /// Creates an empty `Map` with room for `capacity` children.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map {
            children: IndexMap::with_capacity(capacity),
            attributes: IndexMap::new(),
        }
    }

    /// Inserts a child, returning the previous value for the key.
    ///
    /// An existing key keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kstruct::{Map, Node};
    ///
    /// let mut map = Map::new();
    /// assert!(map.insert("count", 10).is_none());
    /// assert_eq!(map.insert("count", 11), Some(Node::Int(10)));
    /// assert_eq!(map.get("count"), Some(&Node::Int(11)));
    /// ```
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Node>
    where
        K: Into<String>,
        V: Into<Node>,
    {
        self.children.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.children.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// Removes a child, keeping the order of the remaining ones.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.children.shift_remove(key)
    }

    /// Returns the number of children (attributes are not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns an iterator over the child keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.children.keys()
    }

    /// Returns an iterator over the children, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.children.values()
    }

    /// Returns an iterator over the key-child pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.children.iter()
    }

    /// Sets an attribute, returning the previous one for the key.
    ///
    /// Accepts anything convertible into an [`Attribute`], which rules out maps and
    /// lists at compile time. Use [`Attribute::new`] to wrap an arbitrary [`Node`].
    pub fn insert_attribute<K, A>(&mut self, key: K, attribute: A) -> Option<Attribute>
    where
        K: Into<String>,
        A: Into<Attribute>,
    {
        self.attributes.insert(key.into(), attribute.into())
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn contains_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<Attribute> {
        self.attributes.shift_remove(key)
    }

    /// Returns an iterator over the attributes, in insertion order.
    pub fn attributes(&self) -> indexmap::map::Iter<'_, String, Attribute> {
        self.attributes.iter()
    }

    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Returns `true` if any child is a map or a list.
    #[must_use]
    pub fn has_nested_children(&self) -> bool {
        self.children.values().any(Node::is_container)
    }
}

impl IntoIterator for Map {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, Node)>>(iter: T) -> Self {
        Map {
            children: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            attributes: IndexMap::new(),
        }
    }
}
