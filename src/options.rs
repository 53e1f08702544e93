//! Formatting options for the canonical serializer.
//!
//! - [`SerializeOptions`]: indent width plus layout style
//! - [`Style`]: when containers are broken across lines
//!
//! ## Examples
//!
//! ```rust
//! use serde_kstruct::{parse, serialize_with_options, SerializeOptions};
//!
//! let root = parse("point { x = 1; y = 2 }").unwrap();
//!
//! let indented = serialize_with_options(&root, SerializeOptions::new().with_indent(2)).unwrap();
//! assert_eq!(indented, "point {\n  x = 1\n  y = 2\n}");
//!
//! let flat = serialize_with_options(&root, SerializeOptions::flat()).unwrap();
//! assert_eq!(flat, "point { x = 1; y = 2 }");
//! ```

/// Layout style used by the serializer.
///
/// - **Indented**: a map with more than one child or attribute, or with a nested map
///   or list, is written one entry per line
/// - **Flat**: nested maps always stay on one line
///
/// The root map puts every entry on its own line and a list breaks only when it has
/// more than one element and at least one of them is a map or a list, in both styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Indented,
    Flat,
}

/// Configuration for [`serialize_with_options`](crate::serialize_with_options).
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::{SerializeOptions, Style};
///
/// let options = SerializeOptions::new();
/// assert_eq!(options.indent, 3);
/// assert_eq!(options.style, Style::Indented);
///
/// let options = SerializeOptions::new().with_indent(4).with_style(Style::Flat);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    pub style: Style,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            indent: 3,
            style: Style::default(),
        }
    }
}

impl SerializeOptions {
    /// Creates default options (indented style, 3-space indent).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for the flat style with the default indent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kstruct::{SerializeOptions, Style};
    ///
    /// assert_eq!(SerializeOptions::flat().style, Style::Flat);
    /// ```
    #[must_use]
    pub fn flat() -> Self {
        SerializeOptions {
            style: Style::Flat,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn indent_for(&self, level: isize) -> String {
        match usize::try_from(level) {
            Ok(level) if level > 0 => " ".repeat(self.indent * level),
            _ => String::new(),
        }
    }
}
