//! # serde_kstruct
//!
//! A reader and canonical writer for kstruct, a small typed configuration format, with
//! a Serde bridge for Rust types.
//!
//! ## What is kstruct?
//!
//! kstruct documents look like Kotlin DSL blocks: keys are assigned with `=`, maps nest in
//! braces, lists use brackets, and maps can carry attributes in parentheses. Values are
//! typed: `42` is an Int, `42L` a Long, `0.5f` a Float, `0.5` a Double and `'c'` a Char.
//!
//! ```text
//! // comments work like in Kotlin
//! window(id = 7) {
//!    title = "main"
//!    size = [640, 480]
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Exact errors**: every syntax error names the line it was found on
//! - **Canonical output**: parsing and serializing is stable, so files can be rewritten
//!   without churn
//! - **Ordered**: maps keep their insertion order
//! - **Serde Compatible**: any `#[derive(Serialize, Deserialize)]` type reads and writes
//!   kstruct text
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ### Working with trees
//!
//! ```rust
//! use serde_kstruct::{parse, serialize, Node};
//!
//! let root = parse("b = 2; a = 1 + 2\nm(tag = 'x') { on = true }").unwrap();
//! assert_eq!(root.get("a"), Some(&Node::Int(3)));
//!
//! let text = serialize(&root).unwrap();
//! assert_eq!(text, "b = 2\na = 3\nm(tag = 'x') { on = true }");
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_kstruct::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id = 123\nname = \"Alice\"\nactive = true");
//!
//! let user_back: User = from_str(&text).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Dynamic Values with the kstruct! Macro
//!
//! ```rust
//! use serde_kstruct::{kstruct, Node};
//!
//! let data = kstruct!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde"]
//! });
//!
//! assert_eq!(data.get("name").and_then(Node::as_str), Some("Alice"));
//! ```
//!
//! ## Pipeline
//!
//! [`tokenize`] turns text into [`Token`](token::Token)s, [`evaluate`] folds `+` between
//! literals of the same kind and [`parse`] builds the [`Map`] tree. [`serialize`] writes
//! a tree back out. Every stage is synchronous and keeps no state between calls.
//!
//! ## Format Reference
//!
//! See the [`grammar`] module.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parsing, reading and writing a document
//! - **`macro.rs`** - building trees with the kstruct! macro and the builder
//! - **`attributes.rs`** - maps with attributes
//! - **`custom_options.rs`** - indent width and flat style
//!
//! Run any example with: `cargo run --example <name>`

pub mod attribute;
pub mod builder;
pub mod de;
pub mod error;
pub mod evaluator;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod parser;
pub mod ser;
pub mod token;
pub mod tokenizer;

pub use attribute::Attribute;
pub use de::NodeDeserializer;
pub use error::{Category, Error, Result};
pub use evaluator::evaluate;
pub use map::Map;
pub use node::Node;
pub use options::{SerializeOptions, Style};
pub use parser::parse;
pub use ser::{NodeSerializer, Serializer};
pub use tokenizer::tokenize;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Writes a tree as canonical kstruct text with the default options.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::{parse, serialize};
///
/// let root = parse("a=1;b=2").unwrap();
/// assert_eq!(serialize(&root).unwrap(), "a = 1\nb = 2");
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyKeyInTree`] if a map in the tree has an empty key.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(root: &Map) -> Result<String> {
    serialize_with_options(root, SerializeOptions::default())
}

/// Writes a tree as canonical kstruct text.
///
/// # Errors
///
/// Returns [`Error::EmptyKeyInTree`] if a map in the tree has an empty key.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_options(root: &Map, options: SerializeOptions) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize_map(root)?;
    let text = serializer.into_inner();
    tracing::trace!(bytes = text.len(), "serialized document");
    Ok(text)
}

/// Serialize any `T: Serialize` to kstruct text.
///
/// Structs and maps become the root map. Anything else is written as `value = ...`.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::to_string;
///
/// assert_eq!(to_string(&vec![1, 2]).unwrap(), "value = [1, 2]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g. non-string map keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, SerializeOptions::default())
}

/// Serialize any `T: Serialize` to kstruct text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::{to_string_with_options, SerializeOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// #[derive(Serialize)]
/// struct Shape { name: String, corner: Point }
///
/// let shape = Shape { name: "box".into(), corner: Point { x: 1, y: 2 } };
/// let text = to_string_with_options(&shape, SerializeOptions::flat()).unwrap();
/// assert_eq!(text, "name = \"box\"\ncorner { x = 1; y = 2 }");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: SerializeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let node = to_node(value)?;
    let mut serializer = Serializer::new(options);
    serializer.serialize_node(&node)?;
    Ok(serializer.into_inner())
}

/// Convert any `T: Serialize` to a [`Node`].
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::{to_node, Node};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i64 }
///
/// let node = to_node(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(node.get("x"), Some(&Node::Int(1)));
/// assert_eq!(node.get("y"), Some(&Node::Long(2)));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_node<T>(value: &T) -> Result<Node>
where
    T: ?Sized + Serialize,
{
    ser::to_node(value)
}

/// Deserialize an instance of type `T` from a [`Node`].
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::{from_node, kstruct};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_node(kstruct!({ "x": 1, "y": 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the tree does not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_node<T>(node: Node) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(NodeDeserializer::new(node))
}

/// Serialize any `T: Serialize` to a writer as kstruct text.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x = 1\ny = 2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, SerializeOptions::default())
}

/// Serialize any `T: Serialize` to a writer as kstruct text with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(
    mut writer: W,
    value: &T,
    options: SerializeOptions,
) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from kstruct text.
///
/// Maps and structs are read from the root map. Other types are read from the root's
/// `value` entry when it is the only one, matching what [`to_string`] writes.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
///
/// let numbers: Vec<i64> = from_str("value = [1, 2L]").unwrap();
/// assert_eq!(numbers, vec![1, 2]);
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid kstruct or cannot be deserialized to `T`.
/// Syntax errors carry the line they were found on.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let root = parse(s)?;
    T::deserialize(de::RootDeserializer::new(root))
}

/// Deserialize an instance of type `T` from an I/O stream of kstruct text.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x = 1; y = 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid kstruct,
/// or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of kstruct text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid kstruct,
/// or cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
