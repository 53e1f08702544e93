//! Character-level tokenizer.
//!
//! The tokenizer is an explicit finite-state machine over the characters of the input.
//! A `\n` is appended to the text before scanning, so every successful run ends in the
//! initial state and the last token is always [`TokenKind::Newline`].
//!
//! ```rust
//! use serde_kstruct::token::TokenKind;
//! use serde_kstruct::tokenize;
//!
//! let kinds: Vec<_> = tokenize("x = 42L").unwrap().into_iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Literal("x".into()),
//!         TokenKind::Equals,
//!         TokenKind::Long(42),
//!         TokenKind::Newline,
//!     ]
//! );
//! ```

use crate::token::{Token, TokenKind};
use crate::{Error, Result};

/// Characters that may follow an unescaped `$` inside a double-quoted or verbatim string.
const DOLLAR_TERMINATORS: &str = "$ \n\r\t%&'()*+,-./:;<=>[]^`}~§°0123456789\\";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Initial,
    Backslash,
    Backtick,
    BlockComment,
    BlockCommentAsterisk,
    BlockCommentSlash,
    Digits,
    DigitsDot,
    DigitsDotExp,
    DigitsExp,
    Dot,
    DoubleDoubleQuote,
    DoubleQuote,
    LineComment,
    Literal,
    Minus,
    SingleQuote,
    Slash,
    Verbatim,
}

/// Splits `text` into tokens.
///
/// # Errors
///
/// Returns a lexical [`Error`] for unterminated literals or comments, characters that
/// cannot start a token, malformed numbers, unsupported escapes and `$` interpolation.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let tokens = Tokenizer::new(text).run()?;
    tracing::trace!(count = tokens.len(), "tokenized input");
    Ok(tokens)
}

struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    state: State,
    escape_return: State,
    start: usize,
    buffer: String,
    verbatim_quotes: usize,
    comment_level: usize,
    tokens: Vec<Token>,
}

impl Tokenizer {
    fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().chain(std::iter::once('\n')).collect();
        Tokenizer {
            tokens: Vec::with_capacity(chars.len() / 3),
            chars,
            pos: 0,
            line: 1,
            state: State::Initial,
            escape_return: State::Initial,
            start: 0,
            buffer: String::new(),
            verbatim_quotes: 0,
            comment_level: 0,
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            self.pos += 1;
            self.step(c)?;
        }

        let line = self.line;
        match self.state {
            State::Initial => Ok(self.tokens),
            State::BlockComment | State::BlockCommentAsterisk | State::BlockCommentSlash => {
                Err(Error::MissingEndOfBlockComment { line })
            }
            State::Backtick => Err(Error::MissingEndOfBackticks { line }),
            State::SingleQuote => Err(Error::MissingEndOfSingleQuote { line }),
            State::DoubleQuote | State::DoubleDoubleQuote => {
                Err(Error::MissingEndOfDoubleQuote { line })
            }
            State::Verbatim => Err(Error::MissingEndOfVerbatimString { line }),
            _ => Err(Error::UnexpectedEndOfInput { line }),
        }
    }

    #[inline]
    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(kind, self.line));
    }

    /// Makes the character just consumed the next one to be read again.
    #[inline]
    fn reread(&mut self) {
        self.pos -= 1;
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Text from `start` up to but excluding the current character.
    fn span_text(&self) -> String {
        self.chars[self.start..self.pos - 1].iter().collect()
    }

    fn step(&mut self, c: char) -> Result<()> {
        match self.state {
            State::Initial => self.initial(c),
            State::Slash => {
                match c {
                    '/' => self.state = State::LineComment,
                    '*' => {
                        self.state = State::BlockComment;
                        self.comment_level = 1;
                    }
                    _ => {
                        self.reread();
                        self.push(TokenKind::Slash);
                        self.state = State::Initial;
                    }
                }
                Ok(())
            }
            State::LineComment => {
                if c == '\n' {
                    self.newline();
                    self.state = State::Initial;
                }
                Ok(())
            }
            State::BlockComment => {
                match c {
                    '*' => self.state = State::BlockCommentAsterisk,
                    '/' => self.state = State::BlockCommentSlash,
                    // counted, but no token
                    '\n' => self.line += 1,
                    _ => {}
                }
                Ok(())
            }
            State::BlockCommentAsterisk => {
                match c {
                    '/' => {
                        self.comment_level -= 1;
                        self.state = if self.comment_level == 0 {
                            State::Initial
                        } else {
                            State::BlockComment
                        };
                    }
                    '*' => {}
                    _ => {
                        self.reread();
                        self.state = State::BlockComment;
                    }
                }
                Ok(())
            }
            State::BlockCommentSlash => {
                match c {
                    '/' => {}
                    '*' => {
                        self.comment_level += 1;
                        self.state = State::BlockComment;
                    }
                    _ => {
                        self.reread();
                        self.state = State::BlockComment;
                    }
                }
                Ok(())
            }
            State::Minus => self.minus(c),
            State::Dot => {
                if c.is_ascii_digit() {
                    self.start = self.pos - 2;
                    self.state = State::DigitsDot;
                } else {
                    self.reread();
                    self.push(TokenKind::Dot);
                    self.state = State::Initial;
                }
                Ok(())
            }
            State::Digits => self.digits(c),
            State::DigitsDot => self.digits_dot(c),
            State::DigitsExp => self.digits_exp(c),
            State::DigitsDotExp => self.digits_dot_exp(c),
            State::Literal => {
                if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                    let text = self.span_text();
                    self.reread();
                    self.push(TokenKind::Literal(text));
                    self.state = State::Initial;
                }
                Ok(())
            }
            State::SingleQuote => {
                match c {
                    '\'' => {
                        let text = std::mem::take(&mut self.buffer);
                        self.push(TokenKind::LiteralInSingleQuotes(text));
                        self.state = State::Initial;
                    }
                    '\\' => self.escape(),
                    '\n' => return Err(Error::MissingEndOfSingleQuote { line: self.line }),
                    _ => self.buffer.push(c),
                }
                Ok(())
            }
            State::DoubleQuote => {
                match c {
                    '"' if self.pos - 1 == self.start => self.state = State::DoubleDoubleQuote,
                    '"' => {
                        let text = std::mem::take(&mut self.buffer);
                        self.push(TokenKind::String(text));
                        self.state = State::Initial;
                    }
                    '\\' => self.escape(),
                    '$' => {
                        self.check_dollar(Error::MissingEndOfDoubleQuote { line: self.line })?;
                        self.buffer.push(c);
                    }
                    '\n' => return Err(Error::MissingEndOfDoubleQuote { line: self.line }),
                    _ => self.buffer.push(c),
                }
                Ok(())
            }
            State::DoubleDoubleQuote => {
                if c == '"' {
                    self.buffer.clear();
                    self.verbatim_quotes = 0;
                    self.state = State::Verbatim;
                } else {
                    // `""` was an empty string after all
                    self.reread();
                    self.push(TokenKind::String(String::new()));
                    self.state = State::Initial;
                }
                Ok(())
            }
            State::Backtick => {
                match c {
                    '`' => {
                        let text = std::mem::take(&mut self.buffer);
                        self.push(TokenKind::LiteralInBackticks(text));
                        self.state = State::Initial;
                    }
                    '\\' => self.escape(),
                    '\n' => return Err(Error::MissingEndOfBackticks { line: self.line }),
                    _ => self.buffer.push(c),
                }
                Ok(())
            }
            State::Verbatim => self.verbatim(c),
            State::Backslash => {
                let unescaped = match c {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    '\\' | '\'' | '"' | '`' | '$' => c,
                    _ => {
                        return Err(Error::UnsupportedEscape {
                            line: self.line,
                            ch: c,
                        })
                    }
                };
                self.buffer.push(unescaped);
                self.state = self.escape_return;
                self.escape_return = State::Initial;
                Ok(())
            }
        }
    }

    fn initial(&mut self, c: char) -> Result<()> {
        let single = match c {
            '\n' => {
                self.newline();
                return Ok(());
            }
            '=' => TokenKind::Equals,
            '+' => TokenKind::Plus,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Asterisk,
            _ => {
                self.state = match c {
                    '/' => State::Slash,
                    '-' => State::Minus,
                    '.' => State::Dot,
                    '\'' => State::SingleQuote,
                    '"' => State::DoubleQuote,
                    '`' => State::Backtick,
                    '0'..='9' => State::Digits,
                    'a'..='z' | 'A'..='Z' => State::Literal,
                    _ if c.is_whitespace() => State::Initial,
                    _ => {
                        return Err(Error::UnexpectedChar {
                            line: self.line,
                            ch: c,
                        })
                    }
                };
                match self.state {
                    State::SingleQuote | State::DoubleQuote | State::Backtick => {
                        self.buffer.clear();
                        self.start = self.pos;
                    }
                    State::Digits | State::Literal => self.start = self.pos - 1,
                    _ => {}
                }
                return Ok(());
            }
        };
        self.push(single);
        Ok(())
    }

    fn newline(&mut self) {
        self.push(TokenKind::Newline);
        self.line += 1;
    }

    fn escape(&mut self) {
        self.escape_return = self.state;
        self.state = State::Backslash;
    }

    fn check_dollar(&self, at_end: Error) -> Result<()> {
        match self.peek() {
            None => Err(at_end),
            Some(next) if next == '"' || DOLLAR_TERMINATORS.contains(next) => Ok(()),
            Some(_) => Err(Error::InterpolationNotSupported { line: self.line }),
        }
    }

    /// Consumes an optional exponent sign and the first exponent digit.
    fn exponent(&mut self, next: State) -> Result<()> {
        let mut ahead = self.peek();
        if matches!(ahead, Some('+' | '-')) {
            self.pos += 1;
            ahead = self.peek();
        }
        match ahead {
            Some(d) if d.is_ascii_digit() => {
                self.pos += 1;
                self.state = next;
                Ok(())
            }
            Some(ch) => Err(Error::UnexpectedChar {
                line: self.line,
                ch,
            }),
            None => Err(Error::UnexpectedEndOfInput { line: self.line }),
        }
    }

    fn minus(&mut self, c: char) -> Result<()> {
        match c {
            '.' => {
                self.start = self.pos - 2;
                match self.peek() {
                    Some(d) if d.is_ascii_digit() => {
                        self.pos += 1;
                        self.state = State::DigitsDot;
                        Ok(())
                    }
                    Some(ch) => Err(Error::UnexpectedChar {
                        line: self.line,
                        ch,
                    }),
                    None => Err(Error::UnexpectedEndOfInput { line: self.line }),
                }
            }
            '0'..='9' => {
                self.start = self.pos - 2;
                self.state = State::Digits;
                Ok(())
            }
            _ => {
                self.reread();
                self.push(TokenKind::Minus);
                self.state = State::Initial;
                Ok(())
            }
        }
    }

    fn digits(&mut self, c: char) -> Result<()> {
        match c {
            '0'..='9' => {}
            '-' => {
                // a minus right after a number is an operator, never a sign
                let number = int_or_long(self.line, self.span_text())?;
                self.push(number);
                self.push(TokenKind::Minus);
                self.state = State::Initial;
            }
            'l' | 'L' => {
                let value = parse_long(self.line, self.span_text())?;
                self.push(TokenKind::Long(value));
                self.state = State::Initial;
            }
            'f' | 'F' => {
                let value = parse_float(self.line, self.span_text())?;
                self.push(TokenKind::Float(value));
                self.state = State::Initial;
            }
            '.' => match self.peek() {
                Some(d) if d.is_ascii_digit() => self.state = State::DigitsDot,
                _ => self.finish(int_or_long(self.line, self.span_text())?),
            },
            'e' | 'E' => self.exponent(State::DigitsExp)?,
            'a'..='z' | 'A'..='Z' => {
                return Err(Error::UnexpectedChar {
                    line: self.line,
                    ch: c,
                })
            }
            _ => self.finish(int_or_long(self.line, self.span_text())?),
        }
        Ok(())
    }

    fn digits_dot(&mut self, c: char) -> Result<()> {
        match c {
            '0'..='9' => {}
            '-' => self.double_then_minus()?,
            'f' | 'F' => {
                let value = parse_float(self.line, self.span_text())?;
                self.push(TokenKind::Float(value));
                self.state = State::Initial;
            }
            'e' | 'E' => self.exponent(State::DigitsDotExp)?,
            '.' | 'a'..='z' | 'A'..='Z' => {
                return Err(Error::UnexpectedChar {
                    line: self.line,
                    ch: c,
                })
            }
            _ => self.finish(TokenKind::Double(parse_double(
                self.line,
                self.span_text(),
            )?)),
        }
        Ok(())
    }

    fn digits_exp(&mut self, c: char) -> Result<()> {
        match c {
            '0'..='9' => {}
            '-' => self.double_then_minus()?,
            'l' | 'L' => {
                let value = parse_long(self.line, self.span_text())?;
                self.push(TokenKind::Long(value));
                self.state = State::Initial;
            }
            'f' | 'F' => {
                let value = parse_float(self.line, self.span_text())?;
                self.push(TokenKind::Float(value));
                self.state = State::Initial;
            }
            'a'..='z' | 'A'..='Z' => {
                return Err(Error::UnexpectedChar {
                    line: self.line,
                    ch: c,
                })
            }
            _ => self.finish(TokenKind::Double(parse_double(
                self.line,
                self.span_text(),
            )?)),
        }
        Ok(())
    }

    fn digits_dot_exp(&mut self, c: char) -> Result<()> {
        match c {
            '0'..='9' => {}
            '-' => self.double_then_minus()?,
            'f' | 'F' => {
                let value = parse_float(self.line, self.span_text())?;
                self.push(TokenKind::Float(value));
                self.state = State::Initial;
            }
            'a'..='z' | 'A'..='Z' => {
                return Err(Error::UnexpectedChar {
                    line: self.line,
                    ch: c,
                })
            }
            _ => self.finish(TokenKind::Double(parse_double(
                self.line,
                self.span_text(),
            )?)),
        }
        Ok(())
    }

    /// Emits a finished number and reads the terminating character again.
    fn finish(&mut self, number: TokenKind) {
        self.reread();
        self.push(number);
        self.state = State::Initial;
    }

    fn double_then_minus(&mut self) -> Result<()> {
        let value = parse_double(self.line, self.span_text())?;
        self.push(TokenKind::Double(value));
        self.push(TokenKind::Minus);
        self.state = State::Initial;
        Ok(())
    }

    fn verbatim(&mut self, c: char) -> Result<()> {
        if c == '"' {
            self.verbatim_quotes += 1;
            if self.verbatim_quotes >= 3 {
                let content = trim_indent(&std::mem::take(&mut self.buffer));
                self.push(TokenKind::String(content));
                self.state = State::Initial;
            }
            return Ok(());
        }

        // fewer than three quotes are content
        for _ in 0..self.verbatim_quotes {
            self.buffer.push('"');
        }
        self.verbatim_quotes = 0;

        match c {
            '\\' => self.escape(),
            '$' => {
                self.check_dollar(Error::MissingEndOfVerbatimString { line: self.line })?;
                self.buffer.push(c);
            }
            '\n' => {
                self.line += 1;
                self.buffer.push(c);
            }
            _ => self.buffer.push(c),
        }
        Ok(())
    }
}

fn int_or_long(line: usize, text: String) -> Result<TokenKind> {
    if let Ok(value) = text.parse::<i32>() {
        return Ok(TokenKind::Int(value));
    }
    match text.parse::<i64>() {
        Ok(value) => Ok(TokenKind::Long(value)),
        Err(_) => Err(Error::BadDigitSequence { line, text }),
    }
}

fn parse_long(line: usize, text: String) -> Result<i64> {
    text.parse::<i64>()
        .map_err(|_| Error::BadDigitSequence { line, text })
}

fn parse_float(line: usize, text: String) -> Result<f32> {
    match text.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::BadDigitSequence { line, text }),
    }
}

fn parse_double(line: usize, text: String) -> Result<f64> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::BadDigitSequence { line, text }),
    }
}

/// Removes the common indentation of all non-blank lines, drops a blank first and
/// last line and trims trailing whitespace.
///
/// The first line starts right after the opening quotes, so it only sets the indent
/// when no later line has content.
fn trim_indent(content: &str) -> String {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let indent_of = |line: &&str| line.chars().take_while(|c| c.is_whitespace()).count();
    let has_content = |line: &&&str| !line.trim().is_empty();
    let indent = lines
        .iter()
        .skip(1)
        .filter(has_content)
        .map(indent_of)
        .min()
        .or_else(|| lines.first().filter(has_content).map(indent_of))
        .unwrap_or(0);

    let last = lines.len() - 1;
    let kept: Vec<String> = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| !((*i == 0 || *i == last) && line.trim().is_empty()))
        .map(|(_, line)| {
            let strip = line
                .char_indices()
                .take(indent)
                .take_while(|(_, c)| c.is_whitespace())
                .last()
                .map_or(0, |(i, c)| i + c.len_utf8());
            line[strip..].to_string()
        })
        .collect();

    kept.join("\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| *k != TokenKind::Newline)
            .collect()
    }

    fn lit(s: &str) -> TokenKind {
        TokenKind::Literal(s.to_string())
    }

    #[test]
    fn test_empty_input_yields_single_newline() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens, vec![Token::new(TokenKind::Newline, 1)]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("= + ( ) [ ] { } , ; * / - ."),
            vec![
                TokenKind::Equals,
                TokenKind::Plus,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::OpenBracket,
                TokenKind::CloseBracket,
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Asterisk,
                TokenKind::Slash,
                TokenKind::Minus,
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn test_literals_may_contain_dashes_and_underscores() {
        assert_eq!(kinds("some_key-2 x"), vec![lit("some_key-2"), lit("x")]);
        assert_eq!(kinds("-minus"), vec![TokenKind::Minus, lit("minus")]);
    }

    #[test]
    fn test_literal_cannot_start_with_underscore() {
        assert_eq!(
            tokenize("_illegal").unwrap_err(),
            Error::UnexpectedChar { line: 1, ch: '_' }
        );
    }

    #[test]
    fn test_integers_promote_to_long() {
        assert_eq!(kinds("2147483647"), vec![TokenKind::Int(i32::MAX)]);
        assert_eq!(kinds("2147483648"), vec![TokenKind::Long(2_147_483_648)]);
        assert_eq!(kinds("-2147483648"), vec![TokenKind::Int(i32::MIN)]);
        assert_eq!(kinds("-2147483649"), vec![TokenKind::Long(-2_147_483_649)]);
        assert!(matches!(
            tokenize("9223372036854775808").unwrap_err(),
            Error::BadDigitSequence { line: 1, .. }
        ));
    }

    #[test]
    fn test_number_suffixes_and_fractions() {
        assert_eq!(
            kinds("1 2L 3f 4.5 4.5f -.5 .25 1e3 1.5e-2 2e2f"),
            vec![
                TokenKind::Int(1),
                TokenKind::Long(2),
                TokenKind::Float(3.0),
                TokenKind::Double(4.5),
                TokenKind::Float(4.5),
                TokenKind::Double(-0.5),
                TokenKind::Double(0.25),
                TokenKind::Double(1000.0),
                TokenKind::Double(0.015),
                TokenKind::Float(200.0),
            ]
        );
    }

    #[test]
    fn test_dots_and_minus_between_numbers() {
        assert_eq!(
            kinds("0..1"),
            vec![TokenKind::Int(0), TokenKind::Dot, TokenKind::Double(0.1)]
        );
        assert_eq!(
            kinds("4 . 5 .f 4L5 6-7"),
            vec![
                TokenKind::Int(4),
                TokenKind::Dot,
                TokenKind::Int(5),
                TokenKind::Dot,
                lit("f"),
                TokenKind::Long(4),
                TokenKind::Int(5),
                TokenKind::Int(6),
                TokenKind::Minus,
                TokenKind::Int(7),
            ]
        );
        assert_eq!(
            kinds("1.5-2"),
            vec![TokenKind::Double(1.5), TokenKind::Minus, TokenKind::Int(2)]
        );
    }

    #[test]
    fn test_bad_number_suffixes() {
        assert_eq!(
            tokenize("4k").unwrap_err(),
            Error::UnexpectedChar { line: 1, ch: 'k' }
        );
        assert_eq!(
            tokenize(".5L").unwrap_err(),
            Error::UnexpectedChar { line: 1, ch: 'L' }
        );
        assert_eq!(
            tokenize("1.2.3").unwrap_err(),
            Error::UnexpectedChar { line: 1, ch: '.' }
        );
        assert_eq!(
            tokenize("1ex").unwrap_err(),
            Error::UnexpectedChar { line: 1, ch: 'x' }
        );
        assert_eq!(
            tokenize("-.x").unwrap_err(),
            Error::UnexpectedChar { line: 1, ch: 'x' }
        );
        assert!(matches!(
            tokenize("1e5L").unwrap_err(),
            Error::BadDigitSequence { .. }
        ));
        assert!(matches!(
            tokenize("1e999").unwrap_err(),
            Error::BadDigitSequence { .. }
        ));
    }

    #[test]
    fn test_quoted_literals_and_escapes() {
        assert_eq!(
            kinds(r#"'a' "b\n\"c\"" `k\`ey`"#),
            vec![
                TokenKind::LiteralInSingleQuotes("a".into()),
                TokenKind::String("b\n\"c\"".into()),
                TokenKind::LiteralInBackticks("k`ey".into()),
            ]
        );
        assert_eq!(kinds(r#""" x"#), vec![TokenKind::String(String::new()), lit("x")]);
        assert_eq!(kinds(r"'\t'"), vec![TokenKind::LiteralInSingleQuotes("\t".into())]);
    }

    #[test]
    fn test_unterminated_quotes() {
        assert_eq!(
            tokenize("x = 'a\n'").unwrap_err(),
            Error::MissingEndOfSingleQuote { line: 1 }
        );
        assert_eq!(
            tokenize("\nx = \"abc").unwrap_err(),
            Error::MissingEndOfDoubleQuote { line: 2 }
        );
        assert_eq!(
            tokenize("`abc").unwrap_err(),
            Error::MissingEndOfBackticks { line: 1 }
        );
    }

    #[test]
    fn test_unsupported_escape() {
        assert_eq!(
            tokenize(r#""\q""#).unwrap_err(),
            Error::UnsupportedEscape { line: 1, ch: 'q' }
        );
    }

    #[test]
    fn test_dollar_sign_rules() {
        assert_eq!(kinds(r#""$5 or $""#), vec![TokenKind::String("$5 or $".into())]);
        assert_eq!(kinds(r#""\$x""#), vec![TokenKind::String("$x".into())]);
        assert_eq!(
            tokenize(r#""${x}""#).unwrap_err(),
            Error::InterpolationNotSupported { line: 1 }
        );
        assert_eq!(
            tokenize(r#""$name""#).unwrap_err(),
            Error::InterpolationNotSupported { line: 1 }
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("a // comment\nb /* x /* nested */ y */ c"),
            vec![lit("a"), lit("b"), lit("c")]
        );
        let tokens = tokenize("/* one\ntwo */ x").unwrap();
        assert_eq!(tokens[0], Token::new(lit("x"), 2));
        assert_eq!(
            tokenize("/* /* */").unwrap_err(),
            Error::MissingEndOfBlockComment { line: 2 }
        );
    }

    #[test]
    fn test_line_comment_still_emits_newline() {
        let tokens = tokenize("a // c\nb").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| &t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &lit("a"),
                &TokenKind::Newline,
                &lit("b"),
                &TokenKind::Newline
            ]
        );
    }

    #[test]
    fn test_verbatim_string_is_deindented() {
        let text = "s = \"\"\"\n    first\n      second \"quoted\"\n    third\n    \"\"\"";
        let tokens = tokenize(text).unwrap();
        assert_eq!(
            tokens[2],
            Token::new(
                TokenKind::String("first\n  second \"quoted\"\nthird".into()),
                5
            )
        );
    }

    #[test]
    fn test_verbatim_string_unterminated() {
        assert_eq!(
            tokenize("s = \"\"\"\nabc\"\"").unwrap_err(),
            Error::MissingEndOfVerbatimString { line: 3 }
        );
    }

    #[test]
    fn test_unexpected_characters() {
        assert_eq!(
            tokenize("a = 1\n#").unwrap_err(),
            Error::UnexpectedChar { line: 2, ch: '#' }
        );
        assert_eq!(kinds("-"), vec![TokenKind::Minus]);
    }

    #[test]
    fn test_trim_indent() {
        assert_eq!(trim_indent("\n  a\n    b\n  "), "a\n  b");
        assert_eq!(trim_indent("x\n  y\n   z"), "x\ny\n z");
        assert_eq!(trim_indent("   \n"), "");
        assert_eq!(trim_indent("  a\r\n  b"), "a\nb");
    }

    #[test]
    fn test_trim_indent_single_line() {
        assert_eq!(trim_indent("   Should trim line.   "), "Should trim line.");
        assert_eq!(trim_indent("\tx"), "x");
        assert_eq!(trim_indent("  a b\n   "), "a b");
        assert_eq!(trim_indent("    a\n  b"), "  a\nb");
    }

    #[test]
    fn test_single_line_verbatim_string() {
        let tokens = tokenize("s = \"\"\"   Should trim line.   \"\"\"").unwrap();
        assert_eq!(
            tokens[2],
            Token::new(TokenKind::String("Should trim line.".into()), 1)
        );
    }
}
