//! Scalar-only node wrapper used for map attributes.

use crate::{Error, Node, Result};
use std::fmt;

/// A node that is guaranteed not to be a map or a list.
///
/// Construction from a container fails with [`Error::ContainerAttribute`]; every
/// scalar Rust type converts infallibly via `From`.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::{Attribute, Error, Map, Node};
///
/// let attr = Attribute::from(2.5f32);
/// assert!(attr.is_float());
///
/// let err = Attribute::new(Node::Map(Map::new())).unwrap_err();
/// assert!(matches!(err, Error::ContainerAttribute { .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Attribute(Node);

impl Attribute {
    /// Wraps `node`, rejecting maps and lists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContainerAttribute`] if `node` is a map or a list.
    pub fn new(node: Node) -> Result<Self> {
        match node {
            Node::Map(_) => Err(Error::ContainerAttribute { kind: "map" }),
            Node::List(_) => Err(Error::ContainerAttribute { kind: "list" }),
            scalar => Ok(Attribute(scalar)),
        }
    }

    #[inline]
    #[must_use]
    pub const fn node(&self) -> &Node {
        &self.0
    }

    #[must_use]
    pub fn into_node(self) -> Node {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.0.is_null()
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        self.0.is_boolean()
    }

    #[inline]
    #[must_use]
    pub const fn is_char(&self) -> bool {
        self.0.is_char()
    }

    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        self.0.is_int()
    }

    #[inline]
    #[must_use]
    pub const fn is_long(&self) -> bool {
        self.0.is_long()
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        self.0.is_float()
    }

    #[inline]
    #[must_use]
    pub const fn is_double(&self) -> bool {
        self.0.is_double()
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        self.0.is_string()
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.0.as_bool()
    }

    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        self.0.as_char()
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        self.0.as_int()
    }

    #[must_use]
    pub fn as_long(&self) -> Option<i64> {
        self.0.as_long()
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        self.0.as_float()
    }

    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        self.0.as_double()
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    #[must_use]
    pub fn to_bool(&self) -> bool {
        self.0.to_bool()
    }

    #[must_use]
    pub fn to_char(&self) -> char {
        self.0.to_char()
    }

    #[must_use]
    pub fn to_int(&self) -> i32 {
        self.0.to_int()
    }

    #[must_use]
    pub fn to_long(&self) -> i64 {
        self.0.to_long()
    }

    #[must_use]
    pub fn to_float(&self) -> f32 {
        self.0.to_float()
    }

    #[must_use]
    pub fn to_double(&self) -> f64 {
        self.0.to_double()
    }
}

impl TryFrom<Node> for Attribute {
    type Error = Error;

    fn try_from(node: Node) -> Result<Self> {
        Attribute::new(node)
    }
}

impl From<Attribute> for Node {
    fn from(attribute: Attribute) -> Self {
        attribute.0
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

macro_rules! scalar_attribute {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Attribute {
                fn from(value: $ty) -> Self {
                    Attribute(Node::from(value))
                }
            }

            impl From<Option<$ty>> for Attribute {
                fn from(value: Option<$ty>) -> Self {
                    Attribute(Node::from(value))
                }
            }
        )*
    };
}

scalar_attribute!(bool, char, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str);
