//! Error types for kstruct tokenizing, parsing and serialization.
//!
//! Every failure the crate can report is a variant of the single [`Error`] enum.
//! Parse-time variants carry the 1-based line where the problem was detected.
//!
//! ## Error Categories
//!
//! - **Lexical**: the tokenizer rejected the character stream
//! - **Syntax**: the token stream does not form a valid document
//! - **Contract**: an API precondition was violated (container attribute, empty key)
//! - **Data**: a Rust value could not be mapped onto kstruct nodes or back
//! - **I/O**: reading or writing a stream failed
//!
//! ## Examples
//!
//! ```rust
//! use serde_kstruct::{parse, Category, Error};
//!
//! let err = parse("a = 1; a = 2").unwrap_err();
//! assert!(matches!(err, Error::DuplicateKey { line: 1, .. }));
//! assert_eq!(err.category(), Category::Syntax);
//! assert_eq!(err.line(), Some(1));
//! ```

use std::fmt;
use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Lexical,
    Syntax,
    Contract,
    Data,
    Io,
}

/// Represents all possible errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    // ---- lexical ----
    /// A number literal does not fit the 64-bit range or is otherwise malformed.
    #[error("Bad digit sequence `{text}` at line {line}")]
    BadDigitSequence { line: usize, text: String },

    #[error("Missing closing backtick at line {line}")]
    MissingEndOfBackticks { line: usize },

    #[error("Unterminated block comment, opened before line {line}")]
    MissingEndOfBlockComment { line: usize },

    #[error("Missing closing double quote at line {line}")]
    MissingEndOfDoubleQuote { line: usize },

    #[error("Missing closing single quote at line {line}")]
    MissingEndOfSingleQuote { line: usize },

    #[error("Unterminated verbatim string at line {line}")]
    MissingEndOfVerbatimString { line: usize },

    #[error("Unexpected character {ch:?} at line {line}")]
    UnexpectedChar { line: usize, ch: char },

    #[error("Unexpected end of input at line {line}")]
    UnexpectedEndOfInput { line: usize },

    /// `$` followed by something that would start an interpolation.
    #[error("String interpolation is not supported (line {line})")]
    InterpolationNotSupported { line: usize },

    #[error("Unsupported escape sequence `\\{ch}` at line {line}")]
    UnsupportedEscape { line: usize, ch: char },

    // ---- syntax ----
    #[error("Duplicate key `{key}` at line {line}")]
    DuplicateKey { line: usize, key: String },

    #[error("Empty key at line {line}")]
    EmptyKey { line: usize },

    #[error("Missing `}}` at line {line}")]
    MissingCloseBrace { line: usize },

    #[error("Missing `]` at line {line}")]
    MissingCloseBracket { line: usize },

    #[error("Missing `)` at line {line}")]
    MissingCloseParen { line: usize },

    #[error("Missing `,` at line {line}")]
    MissingComma { line: usize },

    #[error("Missing `=` at line {line}")]
    MissingEqualSign { line: usize },

    #[error("Missing key at line {line}")]
    MissingKey { line: usize },

    #[error("Missing `;` or line break at line {line}")]
    MissingSemicolon { line: usize },

    #[error("Missing value at line {line}")]
    MissingValue { line: usize },

    #[error("Superfluous `}}` at line {line}")]
    SuperfluousCloseBrace { line: usize },

    #[error("Superfluous `,` at line {line}")]
    SuperfluousComma { line: usize },

    #[error("Superfluous `=` at line {line}")]
    SuperfluousEqualSign { line: usize },

    /// A bare word in value position other than `true`, `false` or `null`.
    #[error("Unexpected literal `{literal}` at line {line}")]
    UnexpectedLiteral { line: usize, literal: String },

    /// A single-quoted literal that is not exactly one character long.
    #[error("Illegal char literal '{literal}' at line {line}")]
    IllegalCharLiteral { line: usize, literal: String },

    #[error("Unexpected token `{token}` at line {line}")]
    UnexpectedToken { line: usize, token: String },

    /// Maps and lists are nested deeper than the parser allows.
    #[error("Nesting deeper than {limit} levels at line {line}")]
    NestingTooDeep { line: usize, limit: usize },

    // ---- contract ----
    /// Attributes hold scalars only.
    #[error("Attributes cannot hold a {kind}")]
    ContainerAttribute { kind: &'static str },

    /// The tree contains an empty key, which has no textual representation.
    #[error("Cannot serialize an empty key")]
    EmptyKeyInTree,

    // ---- data ----
    /// Unsupported type for conversion to a node
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Map keys must be strings, found {0}")]
    KeyMustBeString(String),

    #[error("{0}")]
    Message(String),

    // ---- io ----
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Returns the line the error was detected on, if it originates from parsing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kstruct::parse;
    ///
    /// let err = parse("a = 1\nb = [1\n").unwrap_err();
    /// assert_eq!(err.line(), Some(3));
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        use Error::*;
        match self {
            BadDigitSequence { line, .. }
            | MissingEndOfBackticks { line }
            | MissingEndOfBlockComment { line }
            | MissingEndOfDoubleQuote { line }
            | MissingEndOfSingleQuote { line }
            | MissingEndOfVerbatimString { line }
            | UnexpectedChar { line, .. }
            | UnexpectedEndOfInput { line }
            | InterpolationNotSupported { line }
            | UnsupportedEscape { line, .. }
            | DuplicateKey { line, .. }
            | EmptyKey { line }
            | MissingCloseBrace { line }
            | MissingCloseBracket { line }
            | MissingCloseParen { line }
            | MissingComma { line }
            | MissingEqualSign { line }
            | MissingKey { line }
            | MissingSemicolon { line }
            | MissingValue { line }
            | SuperfluousCloseBrace { line }
            | SuperfluousComma { line }
            | SuperfluousEqualSign { line }
            | UnexpectedLiteral { line, .. }
            | IllegalCharLiteral { line, .. }
            | UnexpectedToken { line, .. }
            | NestingTooDeep { line, .. } => Some(*line),
            ContainerAttribute { .. }
            | EmptyKeyInTree
            | UnsupportedType(_)
            | KeyMustBeString(_)
            | Message(_)
            | Io(_) => None,
        }
    }

    /// Returns the broad category of this error.
    #[must_use]
    pub fn category(&self) -> Category {
        use Error::*;
        match self {
            BadDigitSequence { .. }
            | MissingEndOfBackticks { .. }
            | MissingEndOfBlockComment { .. }
            | MissingEndOfDoubleQuote { .. }
            | MissingEndOfSingleQuote { .. }
            | MissingEndOfVerbatimString { .. }
            | UnexpectedChar { .. }
            | UnexpectedEndOfInput { .. }
            | InterpolationNotSupported { .. }
            | UnsupportedEscape { .. } => Category::Lexical,
            ContainerAttribute { .. } | EmptyKeyInTree => Category::Contract,
            UnsupportedType(_) | KeyMustBeString(_) | Message(_) => Category::Data,
            Io(_) => Category::Io,
            _ => Category::Syntax,
        }
    }

    /// Creates an unsupported type error for values that have no node representation.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kstruct::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
