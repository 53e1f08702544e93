//! Token vocabulary shared by the tokenizer, the static evaluator and the parser.

use std::fmt;

/// The kind of a [`Token`], including its payload where it has one.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Bare word, `[A-Za-z][A-Za-z0-9_-]*`.
    Literal(String),
    LiteralInSingleQuotes(String),
    LiteralInBackticks(String),
    /// Double-quoted or verbatim string, escapes already resolved.
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Equals,
    Plus,
    Minus,
    Dot,
    Asterisk,
    Slash,
    Newline,
}

/// A token together with the 1-based line it was read on.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    #[inline]
    #[must_use]
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Token { kind, line }
    }
}

impl TokenKind {
    /// Returns the single punctuation character for operator tokens.
    #[must_use]
    pub const fn punctuation(&self) -> Option<char> {
        Some(match self {
            TokenKind::OpenBrace => '{',
            TokenKind::CloseBrace => '}',
            TokenKind::OpenBracket => '[',
            TokenKind::CloseBracket => ']',
            TokenKind::OpenParen => '(',
            TokenKind::CloseParen => ')',
            TokenKind::Comma => ',',
            TokenKind::Semicolon => ';',
            TokenKind::Equals => '=',
            TokenKind::Plus => '+',
            TokenKind::Minus => '-',
            TokenKind::Dot => '.',
            TokenKind::Asterisk => '*',
            TokenKind::Slash => '/',
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ch) = self.punctuation() {
            return write!(f, "{}", ch);
        }
        match self {
            TokenKind::Literal(s) => write!(f, "{}", s),
            TokenKind::LiteralInSingleQuotes(s) => write!(f, "'{}'", s),
            TokenKind::LiteralInBackticks(s) => write!(f, "`{}`", s),
            TokenKind::String(s) => write!(f, "{:?}", s),
            TokenKind::Int(i) => write!(f, "{}", i),
            TokenKind::Long(l) => write!(f, "{}L", l),
            TokenKind::Float(x) => write!(f, "{:?}f", x),
            TokenKind::Double(x) => write!(f, "{:?}", x),
            TokenKind::Newline => write!(f, "\\n"),
            _ => Ok(()),
        }
    }
}
