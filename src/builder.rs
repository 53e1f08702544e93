//! Closure-based construction of [`Map`] trees.
//!
//! [`MapBuilder::build`] hands a builder to a closure and returns the finished map.
//! Nested maps and lists are built the same way through [`MapBuilder::set_map`],
//! [`MapBuilder::set_list`], [`ListBuilder::add_map`] and [`ListBuilder::add_list`].
//!
//! ## Examples
//!
//! ```rust
//! use serde_kstruct::builder::MapBuilder;
//! use serde_kstruct::serialize;
//!
//! let root = MapBuilder::build(|b| {
//!     b.set("count", 11);
//!     b.set_map("point", |p| {
//!         p.attr("unit", "px");
//!         p.set("x", 1);
//!     });
//!     b.set_list("tags", |l| {
//!         l.add("a");
//!         l.add(None::<i32>);
//!     });
//! });
//!
//! assert_eq!(
//!     serialize(&root).unwrap(),
//!     "count = 11\npoint(unit = \"px\") { x = 1 }\ntags = [\"a\", null]"
//! );
//! ```

use crate::{Attribute, Map, Node};

/// Collects the children and attributes of one map.
#[derive(Debug, Default)]
pub struct MapBuilder {
    map: Map,
}

impl MapBuilder {
    /// Runs `f` on a fresh builder and returns the map it built.
    pub fn build<F>(f: F) -> Map
    where
        F: FnOnce(&mut MapBuilder),
    {
        let mut builder = MapBuilder::default();
        f(&mut builder);
        builder.map
    }

    /// Sets a child; `None` values become `null`. An existing key is overwritten.
    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<Node>,
    {
        self.map.insert(key, value);
        self
    }

    pub fn set_map<K, F>(&mut self, key: K, f: F) -> &mut Self
    where
        K: Into<String>,
        F: FnOnce(&mut MapBuilder),
    {
        self.map.insert(key, MapBuilder::build(f));
        self
    }

    pub fn set_list<K, F>(&mut self, key: K, f: F) -> &mut Self
    where
        K: Into<String>,
        F: FnOnce(&mut ListBuilder),
    {
        self.map.insert(key, ListBuilder::build(f));
        self
    }

    /// Sets an attribute; only scalar values are accepted.
    pub fn attr<K, A>(&mut self, key: K, value: A) -> &mut Self
    where
        K: Into<String>,
        A: Into<Attribute>,
    {
        self.map.insert_attribute(key, value);
        self
    }
}

/// Collects the elements of one list.
#[derive(Debug, Default)]
pub struct ListBuilder {
    list: Vec<Node>,
}

impl ListBuilder {
    /// Runs `f` on a fresh builder and returns the list node it built.
    pub fn build<F>(f: F) -> Node
    where
        F: FnOnce(&mut ListBuilder),
    {
        let mut builder = ListBuilder::default();
        f(&mut builder);
        Node::List(builder.list)
    }

    pub fn add<V: Into<Node>>(&mut self, value: V) -> &mut Self {
        self.list.push(value.into());
        self
    }

    pub fn add_map<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut MapBuilder),
    {
        self.list.push(Node::Map(MapBuilder::build(f)));
        self
    }

    pub fn add_list<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut ListBuilder),
    {
        self.list.push(ListBuilder::build(f));
        self
    }
}
