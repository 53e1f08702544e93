//! Deserialization from [`Node`] trees.
//!
//! This module provides [`NodeDeserializer`], a `serde` deserializer over an owned
//! [`Node`]. Text input goes through [`parse`](crate::parse) first; the resulting tree
//! is then handed to `NodeDeserializer`.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_kstruct::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("x = 1\ny = 2").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ## Type Mapping
//!
//! - `null` is `None` for options and `()` for unit types
//! - numbers convert between widths whenever the value fits the target
//! - a one-character string is accepted as a `char` and a char as a string
//! - enums are read from a string (unit variants) or from a map with a single key
//!   naming the variant

use crate::ser::ROOT_VALUE_KEY;
use crate::{Error, Map, Node, Result};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// A `serde` deserializer reading from an owned [`Node`].
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_kstruct::de::NodeDeserializer;
/// use serde_kstruct::Node;
///
/// let node = Node::List(vec![Node::Int(1), Node::Long(2)]);
/// let numbers = Vec::<u8>::deserialize(NodeDeserializer::new(node)).unwrap();
/// assert_eq!(numbers, vec![1, 2]);
/// ```
pub struct NodeDeserializer {
    node: Node,
}

impl NodeDeserializer {
    #[must_use]
    pub fn new(node: Node) -> Self {
        NodeDeserializer { node }
    }
}

impl<'de> de::Deserializer<'de> for NodeDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Null => visitor.visit_unit(),
            Node::Boolean(b) => visitor.visit_bool(b),
            Node::Char(c) => visitor.visit_char(c),
            Node::Int(i) => visitor.visit_i32(i),
            Node::Long(l) => visitor.visit_i64(l),
            Node::Float(f) => visitor.visit_f32(f),
            Node::Double(d) => visitor.visit_f64(d),
            Node::String(s) => visitor.visit_string(s),
            Node::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            Node::Map(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Char(c) => visitor.visit_string(c.to_string()),
            other => NodeDeserializer::new(other).deserialize_any(visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Null => visitor.visit_none(),
            other => visitor.visit_some(NodeDeserializer::new(other)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::String(s) => visitor.visit_enum(s.into_deserializer()),
            Node::Map(map) if map.len() == 1 => {
                let Some((variant, value)) = map.into_iter().next() else {
                    return Err(Error::custom("Expected enum variant"));
                };
                visitor.visit_enum(EnumDeserializer::new(variant, value))
            }
            Node::Map(_) => Err(Error::custom("Expected a map with exactly one variant key")),
            other => Err(Error::custom(format!(
                "Expected enum, found {}",
                other.kind_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for Node {
    type Deserializer = NodeDeserializer;

    fn into_deserializer(self) -> NodeDeserializer {
        NodeDeserializer::new(self)
    }
}

/// Reads a parsed document.
///
/// Maps and structs see the root map. Any other shape sees the `value` child when the
/// root holds nothing else, which is how non-map values are written at the top level.
pub(crate) struct RootDeserializer {
    root: Map,
}

impl RootDeserializer {
    pub(crate) fn new(root: Map) -> Self {
        RootDeserializer { root }
    }

    fn unwrapped(mut self) -> Node {
        let wrapped = self.root.len() == 1
            && !self.root.has_attributes()
            && self.root.contains_key(ROOT_VALUE_KEY);
        if wrapped {
            if let Some(node) = self.root.remove(ROOT_VALUE_KEY) {
                return node;
            }
        }
        Node::Map(self.root)
    }

    fn whole(self) -> NodeDeserializer {
        NodeDeserializer::new(Node::Map(self.root))
    }
}

macro_rules! deserialize_unwrapped {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                NodeDeserializer::new(self.unwrapped()).$method(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for RootDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.whole().deserialize_any(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.whole().deserialize_map(visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.whole().deserialize_struct(name, fields, visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // a unit variant is written as `value = "Variant"`
        match self.unwrapped() {
            node @ (Node::String(_) | Node::Map(_)) => {
                NodeDeserializer::new(node).deserialize_enum(name, variants, visitor)
            }
            other => {
                let mut map = Map::with_capacity(1);
                map.insert(ROOT_VALUE_KEY, other);
                NodeDeserializer::new(Node::Map(map)).deserialize_enum(name, variants, visitor)
            }
        }
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        NodeDeserializer::new(self.unwrapped()).deserialize_unit_struct(name, visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(NodeDeserializer::new(self.unwrapped()))
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        NodeDeserializer::new(self.unwrapped()).deserialize_tuple(len, visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        NodeDeserializer::new(self.unwrapped()).deserialize_tuple_struct(name, len, visitor)
    }

    deserialize_unwrapped! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_bytes deserialize_byte_buf deserialize_option
        deserialize_unit deserialize_seq deserialize_identifier deserialize_ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Node>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Node>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(node) => seed.deserialize(NodeDeserializer::new(node)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Node>,
    value: Option<Node>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(NodeDeserializer::new(Node::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(NodeDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Node,
}

impl EnumDeserializer {
    fn new(variant: String, value: Node) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(NodeDeserializer::new(Node::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Node,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Node::Null => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(NodeDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Node::List(list) => visitor.visit_seq(SeqDeserializer::new(list)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Node::Map(map) => visitor.visit_map(MapDeserializer::new(map)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}
