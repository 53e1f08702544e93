//! Canonical kstruct output.
//!
//! This module has two halves:
//!
//! - [`Serializer`] pretty-prints a [`Node`] tree as kstruct text
//! - [`NodeSerializer`] is a `serde` serializer that builds a [`Node`] tree from any
//!   `Serialize` value
//!
//! ## Layout rules
//!
//! - Entries of the root map are written one per line without braces.
//! - A map with attributes is written `key(name = value, ...)`; the braces are left out
//!   when it has no children.
//! - Empty maps and lists are written `{}` and `[]`.
//! - Whether a map or list is broken across lines depends on [`Style`] and on its
//!   children; see [`Style`] for the details.
//! - Keys are bare when they match `[A-Za-z][-_A-Za-z0-9]*` and backtick-quoted otherwise.
//! - Non-finite floats and doubles are written as `null`.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_kstruct::{Map, Node, SerializeOptions, Serializer};
//!
//! let mut root = Map::new();
//! root.insert("count", 11);
//! root.insert("weight", 0.42f32);
//!
//! let mut serializer = Serializer::new(SerializeOptions::new());
//! serializer.serialize_map(&root).unwrap();
//! assert_eq!(serializer.into_inner(), "count = 11\nweight = 0.42f");
//! ```

use crate::options::Style;
use crate::{Error, Map, Node, Result, SerializeOptions};
use serde::{ser, Serialize};

/// Key used to wrap a root that is not an attribute-free map.
pub(crate) const ROOT_VALUE_KEY: &str = "value";

/// The kstruct text serializer.
///
/// Created via [`Serializer::new`]; call [`serialize_map`](Serializer::serialize_map) or
/// [`serialize_node`](Serializer::serialize_node) once, then take the text with
/// [`into_inner`](Serializer::into_inner).
pub struct Serializer {
    output: String,
    options: SerializeOptions,
}

impl Serializer {
    pub fn new(options: SerializeOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `root` as a document.
    ///
    /// A root map carrying attributes cannot be written anonymously, so it is wrapped as
    /// the single child `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKeyInTree`] if any map in the tree has an empty key.
    pub fn serialize_map(&mut self, root: &Map) -> Result<()> {
        if root.has_attributes() {
            self.output.push_str(ROOT_VALUE_KEY);
            return self.write_map(root, 0, false);
        }
        self.write_map(root, -1, true)
    }

    /// Writes any node as a document, wrapping it as `value = ...` unless it is a map
    /// without attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyKeyInTree`] if any map in the tree has an empty key.
    pub fn serialize_node(&mut self, root: &Node) -> Result<()> {
        match root {
            Node::Map(map) => self.serialize_map(map),
            other => {
                self.output.push_str(ROOT_VALUE_KEY);
                self.output.push_str(" = ");
                self.write_node(other, 0, false)
            }
        }
    }

    fn write_node(&mut self, node: &Node, level: isize, anonymous: bool) -> Result<()> {
        match node {
            Node::Null => self.output.push_str("null"),
            Node::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Node::Char(c) => write_char(&mut self.output, *c),
            Node::Int(i) => self.output.push_str(&i.to_string()),
            Node::Long(l) => {
                self.output.push_str(&l.to_string());
                self.output.push('L');
            }
            Node::Float(f) if f.is_finite() => {
                self.output.push_str(&format!("{f:?}"));
                self.output.push('f');
            }
            Node::Double(d) if d.is_finite() => self.output.push_str(&format!("{d:?}")),
            Node::Float(_) | Node::Double(_) => self.output.push_str("null"),
            Node::String(s) => write_string(&mut self.output, s),
            Node::Map(map) => self.write_map(map, level, anonymous)?,
            Node::List(list) => self.write_list(list, level)?,
        }
        Ok(())
    }

    fn write_map(&mut self, map: &Map, level: isize, anonymous: bool) -> Result<()> {
        if map.has_attributes() {
            self.output.push('(');
            for (i, (name, attribute)) in map.attributes().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                write_key(&mut self.output, name)?;
                self.output.push_str(" = ");
                self.write_node(attribute.node(), level + 1, false)?;
            }
            self.output.push(')');

            if map.is_empty() {
                return Ok(());
            }
        }

        if !anonymous || map.has_attributes() {
            self.output.push(' ');
        }

        if map.is_empty() {
            if level >= 0 {
                self.output.push_str("{}");
            }
            return Ok(());
        }

        let wrap = (self.options.style == Style::Indented || level < 0)
            && (map.len() > 1 || map.attribute_count() > 1 || map.has_nested_children());

        if level >= 0 {
            self.output.push_str(if wrap { "{" } else { "{ " });
        }

        let outer = self.options.indent_for(level);
        let inner = if wrap && level >= 0 {
            format!("{outer}{}", " ".repeat(self.options.indent))
        } else {
            String::new()
        };

        for (i, (key, child)) in map.iter().enumerate() {
            if i > 0 {
                self.output.push_str(if wrap { "\n" } else { "; " });
            } else if wrap && level >= 0 {
                self.output.push('\n');
            }

            self.output.push_str(&inner);
            write_key(&mut self.output, key)?;
            if !child.is_map() {
                self.output.push_str(" = ");
            }
            self.write_node(child, level + 1, false)?;
        }

        if level >= 0 {
            if wrap {
                self.output.push('\n');
                self.output.push_str(&outer);
                self.output.push('}');
            } else {
                self.output.push_str(" }");
            }
        }
        Ok(())
    }

    fn write_list(&mut self, list: &[Node], level: isize) -> Result<()> {
        let wrap = list.len() > 1 && list.iter().any(Node::is_container);
        let outer = self.options.indent_for(level);
        let inner = if wrap {
            format!("{outer}{}", " ".repeat(self.options.indent))
        } else {
            String::new()
        };

        self.output.push('[');
        for (i, child) in list.iter().enumerate() {
            if i > 0 {
                self.output.push_str(if wrap { ",\n" } else { ", " });
            } else if wrap {
                self.output.push('\n');
            }

            self.output.push_str(&inner);
            self.write_node(child, if wrap { level + 1 } else { level }, true)?;
        }

        if wrap {
            self.output.push('\n');
            self.output.push_str(&outer);
        }
        self.output.push(']');
        Ok(())
    }
}

/// Returns `true` if `key` can be written without backticks.
fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn write_key(output: &mut String, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::EmptyKeyInTree);
    }
    if is_bare_key(key) {
        output.push_str(key);
        return Ok(());
    }

    output.push('`');
    for ch in key.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '`' => output.push_str("\\`"),
            _ => output.push(ch),
        }
    }
    output.push('`');
    Ok(())
}

fn write_string(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '"' => output.push_str("\\\""),
            '$' => output.push_str("\\$"),
            _ => output.push(ch),
        }
    }
    output.push('"');
}

fn write_char(output: &mut String, c: char) {
    output.push('\'');
    match c {
        '\\' => output.push_str("\\\\"),
        '\n' => output.push_str("\\n"),
        '\r' => output.push_str("\\r"),
        '\t' => output.push_str("\\t"),
        '\'' => output.push_str("\\'"),
        _ => output.push(c),
    }
    output.push('\'');
}

/// A `serde` serializer producing a [`Node`] tree.
///
/// Used by [`to_node`](crate::to_node). Enum variants carrying data become a map with
/// the variant name as its only key.
pub struct NodeSerializer;

pub struct SerializeVec {
    vec: Vec<Node>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

fn wrap_variant(variant: Option<&'static str>, node: Node) -> Node {
    match variant {
        Some(name) => {
            let mut map = Map::with_capacity(1);
            map.insert(name, node);
            Node::Map(map)
        }
        None => node,
    }
}

impl ser::Serializer for NodeSerializer {
    type Ok = Node;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Node> {
        Ok(Node::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Node> {
        Ok(Node::Int(i32::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Node> {
        Ok(Node::Int(i32::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Node> {
        Ok(Node::Int(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Node> {
        Ok(Node::Long(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Node> {
        i64::try_from(v)
            .map(Node::Long)
            .map_err(|_| Error::unsupported_type("i128 outside the 64-bit range"))
    }

    fn serialize_u8(self, v: u8) -> Result<Node> {
        Ok(Node::Int(i32::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Node> {
        Ok(Node::Int(i32::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Node> {
        Ok(Node::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Node> {
        i64::try_from(v)
            .map(Node::Long)
            .map_err(|_| Error::unsupported_type("u128 outside the 64-bit range"))
    }

    fn serialize_f32(self, v: f32) -> Result<Node> {
        Ok(Node::Float(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Node> {
        Ok(Node::Double(v))
    }

    fn serialize_char(self, v: char) -> Result<Node> {
        Ok(Node::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Node> {
        Ok(Node::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Node> {
        Ok(Node::List(
            v.iter().map(|&b| Node::Int(i32::from(b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Node> {
        Ok(Node::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Node> {
        Ok(Node::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Node> {
        Ok(Node::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Node> {
        Ok(Node::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Node>
    where
        T: ?Sized + Serialize,
    {
        Ok(wrap_variant(Some(variant), to_node(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_node(value)?);
        Ok(())
    }

    fn finish(self) -> Node {
        wrap_variant(self.variant, Node::List(self.vec))
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: Map::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> Node {
        wrap_variant(self.variant, Node::Map(self.map))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Node;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Node;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_node(key)? {
            Node::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            Node::Char(c) => {
                self.current_key = Some(c.to_string());
                Ok(())
            }
            other => Err(Error::KeyMustBeString(other.kind_name().to_string())),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_node(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_node(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Node;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key, to_node(value)?);
        Ok(())
    }

    fn end(self) -> Result<Node> {
        Ok(self.finish())
    }
}

pub(crate) fn to_node<T: Serialize + ?Sized>(value: &T) -> Result<Node> {
    value.serialize(NodeSerializer)
}
