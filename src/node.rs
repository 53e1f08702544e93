//! Dynamic tree representation of kstruct data.
//!
//! This module provides the [`Node`] enum, the in-memory form of every kstruct value.
//! The parser produces it, the serializer consumes it, and the serde bridge converts
//! between it and ordinary Rust types.
//!
//! ## Creating Nodes
//!
//! ```rust
//! use serde_kstruct::{kstruct, Node};
//!
//! let null = Node::Null;
//! let flag = Node::from(true);
//! let count = Node::from(42);
//! let big = Node::from(42i64);
//! let text = Node::from("hello");
//!
//! assert!(count.is_int());
//! assert!(big.is_long());
//!
//! let tree = kstruct!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(tree.is_map());
//! ```
//!
//! ## Reading Nodes
//!
//! There are two families of getters:
//!
//! - `as_*` returns `Some` only when the node holds exactly that kind; it never converts
//! - `to_*` always returns a value, converting where a sensible conversion exists and
//!   falling back to a zero-like default otherwise
//!
//! ```rust
//! use serde_kstruct::Node;
//!
//! let node = Node::from("17");
//! assert_eq!(node.as_int(), None);
//! assert_eq!(node.to_int(), 17);
//! assert!(node.to_bool());
//! ```

use crate::Map;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Any kstruct value.
///
/// Numbers keep their declared width: `1` is an [`Int`](Node::Int), `1L` a
/// [`Long`](Node::Long), `1f` a [`Float`](Node::Float) and `1.0` a
/// [`Double`](Node::Double).
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Boolean(bool),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Map(Map),
    List(Vec<Node>),
}

impl Node {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Node::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_char(&self) -> bool {
        matches!(self, Node::Char(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Node::Int(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Node::Long(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Node::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Node::Double(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Returns `true` for maps and lists.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Node::Map(_) | Node::List(_))
    }

    /// Short lowercase name of the variant, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Boolean(_) => "boolean",
            Node::Char(_) => "char",
            Node::Int(_) => "int",
            Node::Long(_) => "long",
            Node::Float(_) => "float",
            Node::Double(_) => "double",
            Node::String(_) => "string",
            Node::Map(_) => "map",
            Node::List(_) => "list",
        }
    }

    /// If the node is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kstruct::Node;
    ///
    /// assert_eq!(Node::Boolean(true).as_bool(), Some(true));
    /// assert_eq!(Node::Int(1).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            Node::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// If the node is an `Int`, returns it. A `Long` is *not* narrowed.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Node::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Node::Long(l) => Some(*l),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Node::Double(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Node>> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    /// Truthiness: non-zero numbers, non-empty strings and containers, `true`.
    #[must_use]
    pub fn to_bool(&self) -> bool {
        match self {
            Node::Null => false,
            Node::Boolean(b) => *b,
            Node::Char(c) => *c != '\0',
            Node::Int(i) => *i != 0,
            Node::Long(l) => *l != 0,
            Node::Float(f) => *f != 0.0,
            Node::Double(d) => *d != 0.0,
            Node::String(s) => !s.is_empty(),
            Node::Map(map) => !map.is_empty(),
            Node::List(list) => !list.is_empty(),
        }
    }

    /// Converts to a character; `'\0'` when no character corresponds.
    ///
    /// Booleans become `'y'` or `'n'`, numbers are taken as code points and a string
    /// yields its only character.
    #[must_use]
    pub fn to_char(&self) -> char {
        match self {
            Node::Boolean(b) => {
                if *b {
                    'y'
                } else {
                    'n'
                }
            }
            Node::Char(c) => *c,
            Node::Int(_) | Node::Long(_) | Node::Float(_) | Node::Double(_) => {
                char::from_u32(self.to_int() as u32).unwrap_or('\0')
            }
            Node::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => '\0',
                }
            }
            Node::Null | Node::Map(_) | Node::List(_) => '\0',
        }
    }

    /// Converts to `i32`. Longs wrap, floating-point values saturate and unparsable
    /// strings give 0.
    #[must_use]
    pub fn to_int(&self) -> i32 {
        match self {
            Node::Boolean(b) => i32::from(*b),
            Node::Char(c) => *c as i32,
            Node::Int(i) => *i,
            Node::Long(l) => *l as i32,
            Node::Float(f) => *f as i32,
            Node::Double(d) => *d as i32,
            Node::String(s) => s.parse().unwrap_or(0),
            Node::Null | Node::Map(_) | Node::List(_) => 0,
        }
    }

    #[must_use]
    pub fn to_long(&self) -> i64 {
        match self {
            Node::Boolean(b) => i64::from(*b),
            Node::Char(c) => i64::from(u32::from(*c)),
            Node::Int(i) => i64::from(*i),
            Node::Long(l) => *l,
            Node::Float(f) => *f as i64,
            Node::Double(d) => *d as i64,
            Node::String(s) => s.parse().unwrap_or(0),
            Node::Null | Node::Map(_) | Node::List(_) => 0,
        }
    }

    /// Converts to `f32`. Booleans have no numeric meaning here and give NaN.
    #[must_use]
    pub fn to_float(&self) -> f32 {
        match self {
            Node::Boolean(_) => f32::NAN,
            Node::Char(c) => u32::from(*c) as f32,
            Node::Int(i) => *i as f32,
            Node::Long(l) => *l as f32,
            Node::Float(f) => *f,
            Node::Double(d) => *d as f32,
            Node::String(s) => s.parse().unwrap_or(0.0),
            Node::Null | Node::Map(_) | Node::List(_) => 0.0,
        }
    }

    #[must_use]
    pub fn to_double(&self) -> f64 {
        match self {
            Node::Boolean(_) => f64::NAN,
            Node::Char(c) => f64::from(u32::from(*c)),
            Node::Int(i) => f64::from(*i),
            Node::Long(l) => *l as f64,
            Node::Float(f) => f64::from(*f),
            Node::Double(d) => *d,
            Node::String(s) => s.parse().unwrap_or(0.0),
            Node::Null | Node::Map(_) | Node::List(_) => 0.0,
        }
    }

    /// Looks up a child of a map node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Returns the child keys of a map node, or `None` for any other node.
    #[must_use]
    pub fn keys(&self) -> Option<indexmap::map::Keys<'_, String, Node>> {
        self.as_map().map(Map::keys)
    }

    /// Returns the children of a map or list node; scalars have none.
    #[must_use]
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Map(map) => map.values().collect(),
            Node::List(list) => list.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the attributes of a map node, or `None` for any other node.
    #[must_use]
    pub fn attributes(&self) -> Option<indexmap::map::Iter<'_, String, crate::Attribute>> {
        self.as_map().map(Map::attributes)
    }
}

/// Scalars display their bare value; strings are not quoted.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Boolean(b) => write!(f, "{}", b),
            Node::Char(c) => write!(f, "{}", c),
            Node::Int(i) => write!(f, "{}", i),
            Node::Long(l) => write!(f, "{}", l),
            Node::Float(x) => write!(f, "{}", x),
            Node::Double(x) => write!(f, "{}", x),
            Node::String(s) => write!(f, "{}", s),
            Node::Map(_) => write!(f, "{{map}}"),
            Node::List(list) => {
                write!(
                    f,
                    "[{}]",
                    list.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

/// Maps serialize their children only; attributes have no place in the serde data model.
impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Boolean(b) => serializer.serialize_bool(*b),
            Node::Char(c) => serializer.serialize_char(*c),
            Node::Int(i) => serializer.serialize_i32(*i),
            Node::Long(l) => serializer.serialize_i64(*l),
            Node::Float(x) => serializer.serialize_f32(*x),
            Node::Double(x) => serializer.serialize_f64(*x),
            Node::String(s) => serializer.serialize_str(s),
            Node::List(list) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Node::Map(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = Node;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid kstruct value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Node::Boolean(value))
            }

            fn visit_i32<E>(self, value: i32) -> Result<Self::Value, E> {
                Ok(Node::Int(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Node::from(value).narrowed())
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Node::from(value).narrowed())
            }

            fn visit_f32<E>(self, value: f32) -> Result<Self::Value, E> {
                Ok(Node::Float(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Node::Double(value))
            }

            fn visit_char<E>(self, value: char) -> Result<Self::Value, E> {
                Ok(Node::Char(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Node::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Node::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Node::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Node::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Node::List(vec))
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut map = Map::new();
                while let Some((key, value)) = access.next_entry::<String, Node>()? {
                    map.insert(key, value);
                }
                Ok(Node::Map(map))
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

impl Node {
    /// Turns a `Long` that fits 32 bits into an `Int`.
    fn narrowed(self) -> Node {
        match self {
            Node::Long(l) => i32::try_from(l).map_or(Node::Long(l), Node::Int),
            other => other,
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(value)
    }
}

impl From<char> for Node {
    fn from(value: char) -> Self {
        Node::Char(value)
    }
}

impl From<i8> for Node {
    fn from(value: i8) -> Self {
        Node::Int(i32::from(value))
    }
}

impl From<i16> for Node {
    fn from(value: i16) -> Self {
        Node::Int(i32::from(value))
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Long(value)
    }
}

impl From<u8> for Node {
    fn from(value: u8) -> Self {
        Node::Int(i32::from(value))
    }
}

impl From<u16> for Node {
    fn from(value: u16) -> Self {
        Node::Int(i32::from(value))
    }
}

/// Values above `i32::MAX` become a `Long`.
impl From<u32> for Node {
    fn from(value: u32) -> Self {
        i32::try_from(value).map_or(Node::Long(i64::from(value)), Node::Int)
    }
}

/// Values above `i64::MAX` fall back to a `Double`.
impl From<u64> for Node {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Node::Double(value as f64), Node::Long)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Float(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Double(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

impl From<Map> for Node {
    fn from(value: Map) -> Self {
        Node::Map(value)
    }
}

/// `None` becomes [`Node::Null`].
impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}
