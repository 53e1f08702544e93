//! Recursive-descent parser turning a token stream into a [`Map`].
//!
//! The parser works on the output of [`tokenize`](crate::tokenize) after
//! [`evaluate`](crate::evaluate) has folded constant expressions. It has a single token
//! of pushback and stops at the first error; there is no recovery.

use crate::token::{Token, TokenKind};
use crate::{Attribute, Error, Map, Node, Result};

/// Deepest nesting of maps and lists accepted below the root.
const MAX_DEPTH: usize = 256;

/// Parses kstruct text into its root [`Map`].
///
/// # Errors
///
/// Returns a lexical error from the tokenizer or a syntax error from the parser. Every
/// such error carries the line it was found on.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::{parse, Node};
///
/// let root = parse("x = 1 + 2\nname = \"kstruct\"").unwrap();
/// assert_eq!(root.get("x"), Some(&Node::Int(3)));
/// assert_eq!(root.get("name").and_then(Node::as_str), Some("kstruct"));
/// ```
pub fn parse(text: &str) -> Result<Map> {
    let tokens = crate::evaluate(crate::tokenize(text)?);
    let mut parser = Parser::new(&tokens);
    let mut root = Map::new();
    parser.read_map_children(&mut root, true)?;
    tracing::debug!(keys = root.len(), lines = parser.last_line, "parsed document");
    Ok(root)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Line reported when the input ends inside a construct.
    last_line: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            last_line: tokens.last().map_or(1, |t| t.line),
            depth: 0,
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn back(&mut self) {
        self.pos -= 1;
    }

    fn previous(&self) -> Option<&'a Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    fn peek_past_newlines(&self) -> Option<&'a Token> {
        self.tokens[self.pos..]
            .iter()
            .find(|t| t.kind != TokenKind::Newline)
    }

    fn descend(&mut self, line: usize) -> Result<()> {
        if self.depth == MAX_DEPTH {
            return Err(Error::NestingTooDeep {
                line,
                limit: MAX_DEPTH,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn read_nested_map(&mut self, map: &mut Map, line: usize) -> Result<()> {
        self.descend(line)?;
        let result = self.read_map_children(map, false);
        self.depth -= 1;
        result
    }

    fn read_nested_list(&mut self, list: &mut Vec<Node>, line: usize) -> Result<()> {
        self.descend(line)?;
        let result = self.read_list_children(list);
        self.depth -= 1;
        result
    }

    fn read_map_children(&mut self, map: &mut Map, is_root: bool) -> Result<()> {
        let mut needs_separator = false;

        loop {
            let Some(token) = self.next() else {
                if is_root {
                    return Ok(());
                }
                return Err(Error::MissingCloseBrace {
                    line: self.last_line,
                });
            };
            let line = token.line;

            match &token.kind {
                TokenKind::Literal(key) | TokenKind::LiteralInBackticks(key) => {
                    if needs_separator {
                        return Err(Error::MissingSemicolon { line });
                    }
                    if key.is_empty() {
                        return Err(Error::EmptyKey { line });
                    }
                    if map.contains_key(key) {
                        return Err(Error::DuplicateKey {
                            line,
                            key: key.clone(),
                        });
                    }
                    let value = self.read_after_map_key()?;
                    map.insert(key.as_str(), value);

                    // a closing brace or bracket also ends the assignment
                    needs_separator = !matches!(
                        self.previous().map(|t| &t.kind),
                        Some(
                            TokenKind::Newline
                                | TokenKind::CloseBrace
                                | TokenKind::CloseBracket
                                | TokenKind::Semicolon
                                | TokenKind::Comma
                        )
                    );
                }
                TokenKind::Newline | TokenKind::Semicolon => needs_separator = false,
                TokenKind::CloseBrace => {
                    if is_root {
                        return Err(Error::SuperfluousCloseBrace { line });
                    }
                    return Ok(());
                }
                TokenKind::Double(_)
                | TokenKind::Equals
                | TokenKind::Float(_)
                | TokenKind::Int(_)
                | TokenKind::LiteralInSingleQuotes(_)
                | TokenKind::Long(_)
                | TokenKind::OpenBrace
                | TokenKind::OpenBracket
                | TokenKind::OpenParen
                | TokenKind::String(_) => return Err(Error::MissingKey { line }),
                _ => return Err(unexpected(token)),
            }
        }
    }

    fn read_after_map_key(&mut self) -> Result<Node> {
        let mut attributed: Option<Map> = None;

        loop {
            let Some(token) = self.next() else {
                return attributed.map(Node::Map).ok_or(Error::MissingEqualSign {
                    line: self.last_line,
                });
            };
            let line = token.line;

            match &token.kind {
                TokenKind::Equals => {
                    if attributed.is_some() {
                        return Err(unexpected(token));
                    }
                    return self.read_value();
                }
                TokenKind::OpenParen => {
                    if attributed.is_some() {
                        return Err(unexpected(token));
                    }
                    let mut map = Map::new();
                    self.read_attributes(&mut map)?;
                    attributed = Some(map);
                }
                TokenKind::OpenBrace => {
                    let mut map = attributed.take().unwrap_or_default();
                    self.read_nested_map(&mut map, line)?;
                    return Ok(Node::Map(map));
                }
                TokenKind::Literal(_) | TokenKind::LiteralInBackticks(_) | TokenKind::CloseBrace => {
                    let map = attributed.take().ok_or(Error::MissingValue { line })?;
                    self.back();
                    return Ok(Node::Map(map));
                }
                TokenKind::Newline => {}
                TokenKind::Semicolon => {
                    let map = attributed.take().ok_or(Error::MissingValue { line })?;
                    return Ok(Node::Map(map));
                }
                TokenKind::Double(_)
                | TokenKind::Float(_)
                | TokenKind::Int(_)
                | TokenKind::LiteralInSingleQuotes(_)
                | TokenKind::Long(_)
                | TokenKind::OpenBracket
                | TokenKind::String(_) => return Err(Error::MissingEqualSign { line }),
                _ => return Err(unexpected(token)),
            }
        }
    }

    fn read_value(&mut self) -> Result<Node> {
        loop {
            let Some(token) = self.next() else {
                return Err(Error::MissingValue {
                    line: self.last_line,
                });
            };
            let line = token.line;

            return match &token.kind {
                TokenKind::Literal(literal) => match literal.as_str() {
                    "true" => Ok(Node::Boolean(true)),
                    "false" => Ok(Node::Boolean(false)),
                    "null" => Ok(Node::Null),
                    _ => Err(Error::UnexpectedLiteral {
                        line,
                        literal: literal.clone(),
                    }),
                },
                TokenKind::LiteralInSingleQuotes(literal) => {
                    let mut chars = literal.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Ok(Node::Char(c)),
                        _ => Err(Error::IllegalCharLiteral {
                            line,
                            literal: literal.clone(),
                        }),
                    }
                }
                TokenKind::String(s) => Ok(Node::String(s.clone())),
                TokenKind::Int(i) => Ok(Node::Int(*i)),
                TokenKind::Long(l) => Ok(Node::Long(*l)),
                TokenKind::Float(f) => Ok(Node::Float(*f)),
                TokenKind::Double(d) => Ok(Node::Double(*d)),
                TokenKind::OpenBrace => {
                    let mut map = Map::new();
                    self.read_nested_map(&mut map, line)?;
                    Ok(Node::Map(map))
                }
                TokenKind::OpenBracket => {
                    let mut list = Vec::new();
                    self.read_nested_list(&mut list, line)?;
                    Ok(Node::List(list))
                }
                TokenKind::CloseBrace | TokenKind::LiteralInBackticks(_) | TokenKind::Semicolon => {
                    Err(Error::MissingValue { line })
                }
                TokenKind::Equals => Err(Error::SuperfluousEqualSign { line }),
                TokenKind::Newline => continue,
                _ => Err(unexpected(token)),
            };
        }
    }

    fn read_attributes(&mut self, map: &mut Map) -> Result<()> {
        let mut key: Option<&'a str> = None;
        let mut needs_comma = false;
        let mut after_comma = false;

        loop {
            let Some(token) = self.next() else {
                return Err(Error::MissingCloseParen {
                    line: self.last_line,
                });
            };
            let line = token.line;

            match &token.kind {
                TokenKind::Literal(name) | TokenKind::LiteralInBackticks(name) => {
                    if needs_comma {
                        return Err(Error::MissingComma { line });
                    }
                    if key.is_some() {
                        return Err(Error::MissingEqualSign { line });
                    }
                    if name.is_empty() {
                        return Err(Error::EmptyKey { line });
                    }
                    if map.contains_attribute(name) {
                        return Err(Error::DuplicateKey {
                            line,
                            key: name.clone(),
                        });
                    }
                    key = Some(name.as_str());
                    after_comma = false;
                }
                TokenKind::CloseParen => {
                    if key.is_some() {
                        return Err(Error::MissingEqualSign { line });
                    }
                    if after_comma {
                        return Err(Error::SuperfluousComma { line });
                    }
                    return Ok(());
                }
                TokenKind::Equals => {
                    let name = key.take().ok_or(Error::MissingKey { line })?;
                    if let Some(next) = self.peek_past_newlines() {
                        if matches!(next.kind, TokenKind::OpenBrace | TokenKind::OpenBracket) {
                            return Err(unexpected(next));
                        }
                    }
                    let value = Attribute::new(self.read_value()?)?;
                    map.insert_attribute(name, value);
                    needs_comma = true;
                }
                TokenKind::Comma => {
                    if !needs_comma {
                        return Err(Error::SuperfluousComma { line });
                    }
                    needs_comma = false;
                    after_comma = true;
                }
                TokenKind::Newline => {}
                TokenKind::Semicolon => return Err(Error::MissingComma { line }),
                _ => return Err(unexpected(token)),
            }
        }
    }

    fn read_list_children(&mut self, list: &mut Vec<Node>) -> Result<()> {
        let mut needs_comma = false;
        let mut attributed: Option<Map> = None;

        loop {
            let Some(token) = self.next() else {
                return Err(Error::MissingCloseBracket {
                    line: self.last_line,
                });
            };
            let line = token.line;

            match &token.kind {
                TokenKind::Comma => {
                    if !needs_comma {
                        return Err(Error::SuperfluousComma { line });
                    }
                    needs_comma = false;
                    if let Some(map) = attributed.take() {
                        list.push(Node::Map(map));
                    }
                }
                TokenKind::Newline => {}
                TokenKind::CloseBracket => {
                    if let Some(map) = attributed.take() {
                        list.push(Node::Map(map));
                    }
                    return Ok(());
                }
                TokenKind::OpenParen => {
                    if needs_comma {
                        return Err(Error::MissingComma { line });
                    }
                    let mut map = Map::new();
                    self.read_attributes(&mut map)?;
                    attributed = Some(map);
                    needs_comma = true;
                }
                TokenKind::OpenBrace => {
                    let mut map = match attributed.take() {
                        Some(map) => map,
                        None if needs_comma => return Err(Error::MissingComma { line }),
                        None => Map::new(),
                    };
                    self.read_nested_map(&mut map, line)?;
                    list.push(Node::Map(map));
                    needs_comma = true;
                }
                _ => {
                    if needs_comma {
                        return Err(Error::MissingComma { line });
                    }
                    self.back();
                    list.push(self.read_value()?);
                    needs_comma = true;
                }
            }
        }
    }
}

fn unexpected(token: &Token) -> Error {
    Error::UnexpectedToken {
        line: token.line,
        token: token.kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(text: &str) -> Error {
        parse(text).unwrap_err()
    }

    #[test]
    fn test_folded_expression() {
        let root = parse("x=1+2").unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root.get("x"), Some(&Node::Int(3)));
    }

    #[test]
    fn test_scalar_values() {
        let root = parse(
            "n = null\nt = true\nf = false\nc = 'a'\ni = 42\nl = 42L\nfl = 0.5f\nd = 0.25\ns = \"str\"",
        )
        .unwrap();
        assert_eq!(root.get("n"), Some(&Node::Null));
        assert_eq!(root.get("t"), Some(&Node::Boolean(true)));
        assert_eq!(root.get("f"), Some(&Node::Boolean(false)));
        assert_eq!(root.get("c"), Some(&Node::Char('a')));
        assert_eq!(root.get("i"), Some(&Node::Int(42)));
        assert_eq!(root.get("l"), Some(&Node::Long(42)));
        assert_eq!(root.get("fl"), Some(&Node::Float(0.5)));
        assert_eq!(root.get("d"), Some(&Node::Double(0.25)));
        assert_eq!(root.get("s"), Some(&Node::String("str".into())));
    }

    #[test]
    fn test_integer_promotion() {
        let root = parse("a = 2147483647\nb = 2147483648").unwrap();
        assert_eq!(root.get("a"), Some(&Node::Int(i32::MAX)));
        assert_eq!(root.get("b"), Some(&Node::Long(2_147_483_648)));
        assert!(matches!(
            parse_err("c = 9223372036854775808"),
            Error::BadDigitSequence { line: 1, .. }
        ));
    }

    #[test]
    fn test_keys_keep_order() {
        let root = parse("zeta = 1; alpha = 2\nmid = 3").unwrap();
        let keys: Vec<_> = root.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_backtick_keys() {
        let root = parse("`a.b.c` = 7\n`with space` { x = 1 }").unwrap();
        assert_eq!(root.get("a.b.c"), Some(&Node::Int(7)));
        assert!(root.get("with space").is_some_and(Node::is_map));
        assert_eq!(parse_err("`` = 1"), Error::EmptyKey { line: 1 });
    }

    #[test]
    fn test_duplicate_keys() {
        assert_eq!(
            parse_err("a=1;a=2"),
            Error::DuplicateKey {
                line: 1,
                key: "a".into()
            }
        );
        assert_eq!(
            parse_err("a=1;b=2;c=3\nb=2"),
            Error::DuplicateKey {
                line: 2,
                key: "b".into()
            }
        );
        assert!(matches!(
            parse_err("m(x = 1, x = 2)"),
            Error::DuplicateKey { .. }
        ));
    }

    #[test]
    fn test_nested_maps() {
        let root = parse(
            "mapOne\n{\n  nullValue=null;boolValue=true\n  intValue=42 } mapTwo {\n  s = \"x\"\n} mapThree = { msg = \"eq\" }",
        )
        .unwrap();
        let one = root.get("mapOne").and_then(Node::as_map).unwrap();
        assert_eq!(one.len(), 3);
        assert_eq!(one.get("intValue"), Some(&Node::Int(42)));
        let three = root.get("mapThree").and_then(Node::as_map).unwrap();
        assert_eq!(three.get("msg").and_then(Node::as_str), Some("eq"));
    }

    #[test]
    fn test_attributes_without_body() {
        let root = parse("mapOne(ans=1, zwa=2)\nmapTwo (\n  dra=3  ) ; mapThree(via=4)").unwrap();
        let one = root.get("mapOne").and_then(Node::as_map).unwrap();
        assert!(one.is_empty());
        assert_eq!(one.attribute_count(), 2);
        assert_eq!(one.attribute("zwa").and_then(Attribute::as_int), Some(2));
        let two = root.get("mapTwo").and_then(Node::as_map).unwrap();
        assert_eq!(two.attribute("dra").and_then(Attribute::as_int), Some(3));
        assert!(root.contains_key("mapThree"));
    }

    #[test]
    fn test_attributes_with_body() {
        let root = parse("m(a = \"x\", b = 'c') { child = 1 }").unwrap();
        let m = root.get("m").and_then(Node::as_map).unwrap();
        assert_eq!(m.attribute("a").and_then(Attribute::as_str), Some("x"));
        assert_eq!(m.attribute("b").and_then(Attribute::as_char), Some('c'));
        assert_eq!(m.get("child"), Some(&Node::Int(1)));
    }

    #[test]
    fn test_attribute_errors() {
        assert_eq!(parse_err("a(b = 1 c = 2)"), Error::MissingComma { line: 1 });
        assert_eq!(parse_err("a(x=1;y=2)"), Error::MissingComma { line: 1 });
        assert_eq!(parse_err("a(x=1\ny=2)"), Error::MissingComma { line: 2 });
        assert_eq!(parse_err("a(x=1,)"), Error::SuperfluousComma { line: 1 });
        assert_eq!(parse_err("a(x=1,,y=2)"), Error::SuperfluousComma { line: 1 });
        assert_eq!(parse_err("a(,x=1)"), Error::SuperfluousComma { line: 1 });
        assert_eq!(parse_err("a(x)"), Error::MissingEqualSign { line: 1 });
        assert_eq!(parse_err("a(=1)"), Error::MissingKey { line: 1 });
        assert_eq!(parse_err("a(x=1"), Error::MissingCloseParen { line: 1 });
        assert!(matches!(
            parse_err("a(x=[1])"),
            Error::UnexpectedToken { line: 1, .. }
        ));
        assert!(matches!(
            parse_err("a(x={})"),
            Error::UnexpectedToken { line: 1, .. }
        ));
        assert!(matches!(
            parse_err("a(x=1)(y=2)"),
            Error::UnexpectedToken { line: 1, .. }
        ));
        assert!(matches!(
            parse_err("a(x=1) = 5"),
            Error::UnexpectedToken { line: 1, .. }
        ));
    }

    #[test]
    fn test_backtick_attribute_keys() {
        let root = parse("m(`a.b` = 1, `with space` = \"x\") { c = 2 }").unwrap();
        let m = root.get("m").and_then(Node::as_map).unwrap();
        assert_eq!(m.attribute("a.b").and_then(Attribute::as_int), Some(1));
        assert_eq!(m.attribute("with space").and_then(Attribute::as_str), Some("x"));
        assert_eq!(parse_err("m(`` = 1)"), Error::EmptyKey { line: 1 });
        assert_eq!(
            parse_err("m(a = 1, `a` = 2)"),
            Error::DuplicateKey {
                line: 1,
                key: "a".into()
            }
        );
        assert_eq!(parse_err("m(`a` `b` = 2)"), Error::MissingEqualSign { line: 1 });
    }

    #[test]
    fn test_attributes_after_equal_sign() {
        assert_eq!(
            parse_err("a = (x = 1) { b = 2 }"),
            Error::UnexpectedToken {
                line: 1,
                token: "(".into()
            }
        );
    }

    #[test]
    fn test_lists() {
        let root = parse("list=[ null,true,'a',42,0.1f,99.99,\"Gurk\", ]").unwrap();
        let list = root.get("list").and_then(Node::as_list).unwrap();
        assert_eq!(list.len(), 7);
        assert_eq!(list[6], Node::String("Gurk".into()));

        let root = parse("list = [\n  1,\n  [2, 3],\n  {}\n]").unwrap();
        let list = root.get("list").and_then(Node::as_list).unwrap();
        assert_eq!(list[1], Node::List(vec![Node::Int(2), Node::Int(3)]));
        assert_eq!(list[2], Node::Map(Map::new()));
    }

    #[test]
    fn test_list_of_maps() {
        let root = parse("list=[(a=1),{},{b=2},(c=3,d=4){e=5;f=6}]").unwrap();
        let list = root.get("list").and_then(Node::as_list).unwrap();
        assert_eq!(list.len(), 4);
        let first = list[0].as_map().unwrap();
        assert!(first.is_empty());
        assert_eq!(first.attribute_count(), 1);
        let last = list[3].as_map().unwrap();
        assert_eq!(last.attribute_count(), 2);
        assert_eq!(last.len(), 2);
    }

    #[test]
    fn test_list_errors() {
        assert_eq!(parse_err("list=[,]"), Error::SuperfluousComma { line: 1 });
        assert_eq!(parse_err("list=[1,,]"), Error::SuperfluousComma { line: 1 });
        assert_eq!(parse_err("list=[1,,2]"), Error::SuperfluousComma { line: 1 });
        assert_eq!(parse_err("list=[1;2]"), Error::MissingComma { line: 1 });
        assert_eq!(parse_err("list=[1\n2]"), Error::MissingComma { line: 2 });
        assert_eq!(parse_err("list=[{} {}]"), Error::MissingComma { line: 1 });
        assert_eq!(parse_err("list=[1, 2"), Error::MissingCloseBracket { line: 1 });
        assert_eq!(parse_err("d [ 's' ]"), Error::MissingEqualSign { line: 1 });
    }

    #[test]
    fn test_separators() {
        let root = parse(";;a=\n4;;b\n=5;;\nc{;;d=7;;e=8;;};;").unwrap();
        assert_eq!(root.len(), 3);
        assert_eq!(root.get("a"), Some(&Node::Int(4)));

        let root = parse("a = { b = 1 } c = [ 2 ] d = 3").unwrap();
        assert_eq!(root.len(), 3);

        assert_eq!(parse_err("a = 1 b = 2"), Error::MissingSemicolon { line: 1 });
        assert_eq!(parse_err("a(b = 1) c = 2"), Error::MissingSemicolon { line: 1 });
        assert!(matches!(
            parse_err("x=1,y=2"),
            Error::UnexpectedToken { line: 1, .. }
        ));
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(parse_err("a ;= 4"), Error::MissingValue { line: 1 });
        assert_eq!(parse_err("a =; 4"), Error::MissingValue { line: 1 });
        assert_eq!(parse_err("x="), Error::MissingValue { line: 1 });
        assert_eq!(parse_err("a;(x=1){ b = 1 }"), Error::MissingValue { line: 1 });
        assert_eq!(parse_err("a;{ b = 1 }"), Error::MissingValue { line: 1 });
        assert_eq!(parse_err("a(x=1);{ b = 1 }"), Error::MissingKey { line: 1 });
        assert_eq!(parse_err("a"), Error::MissingEqualSign { line: 1 });
    }

    #[test]
    fn test_value_errors() {
        assert_eq!(
            parse_err("a = yes"),
            Error::UnexpectedLiteral {
                line: 1,
                literal: "yes".into()
            }
        );
        assert_eq!(
            parse_err("a = 'ab'"),
            Error::IllegalCharLiteral {
                line: 1,
                literal: "ab".into()
            }
        );
        assert_eq!(parse_err("a = = 1"), Error::SuperfluousEqualSign { line: 1 });
        assert!(matches!(
            parse_err("a = 5 - 2"),
            Error::UnexpectedToken { line: 1, .. }
        ));
        assert!(matches!(
            parse_err("a = 0."),
            Error::UnexpectedToken { line: 1, .. }
        ));
        assert!(matches!(
            parse_err("a.b.c=7"),
            Error::UnexpectedToken { line: 1, .. }
        ));
    }

    #[test]
    fn test_braces() {
        assert_eq!(parse_err("a = 1\n}"), Error::SuperfluousCloseBrace { line: 2 });
        assert_eq!(parse_err("a {\nb = 1\n"), Error::MissingCloseBrace { line: 3 });
        assert_eq!(parse_err("= 1"), Error::MissingKey { line: 1 });
    }

    #[test]
    fn test_nesting_limit() {
        let depth = MAX_DEPTH;
        let text = format!("a = {}{}", "[".repeat(depth), "]".repeat(depth));
        assert!(parse(&text).is_ok());

        let text = format!("a = {}{}", "[".repeat(depth + 1), "]".repeat(depth + 1));
        assert_eq!(
            parse_err(&text),
            Error::NestingTooDeep {
                line: 1,
                limit: MAX_DEPTH
            }
        );

        let text = format!("a = {}{}", "[".repeat(20_000), "]".repeat(20_000));
        assert!(matches!(parse_err(&text), Error::NestingTooDeep { .. }));

        let text = format!("{}{}", "m {\n".repeat(depth + 1), "}\n".repeat(depth + 1));
        assert!(matches!(
            parse_err(&text),
            Error::NestingTooDeep { line, .. } if line == depth + 1
        ));
    }

    #[test]
    fn test_empty_documents() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("// only a comment\n\n").unwrap().is_empty());
    }
}
