//! Static evaluation of `+` between literals of the same kind.
//!
//! Only addition is folded: `Int + Int`, `Long + Long`, `Float + Float`,
//! `Double + Double` and `String + String` collapse into a single token. Mixed kinds,
//! operators other than `+` and any `+` preceded by a line break pass through unchanged,
//! leaving the parser to reject them.

use crate::token::{Token, TokenKind};

/// Folds every foldable `+` in `tokens` and returns the new token sequence.
///
/// Chains fold from left to right, so `"a" + "b" + "c"` becomes `"abc"`. Line breaks
/// between the operator and its right operand are swallowed; a line break before the
/// operator prevents folding. Integer overflow wraps around.
///
/// # Examples
///
/// ```rust
/// use serde_kstruct::token::TokenKind;
/// use serde_kstruct::{evaluate, tokenize};
///
/// let tokens = evaluate(tokenize("x = 1 + 2").unwrap());
/// assert_eq!(tokens[2].kind, TokenKind::Int(3));
/// ```
#[must_use]
pub fn evaluate(tokens: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut folds = 0usize;
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        if token.kind != TokenKind::Plus {
            output.push(token);
            continue;
        }

        let mut skipped = Vec::new();
        while let Some(next) = iter.next_if(|t| t.kind == TokenKind::Newline) {
            skipped.push(next);
        }

        let folded = match (output.last(), iter.peek()) {
            (Some(left), Some(right)) => fold(&left.kind, &right.kind),
            _ => None,
        };

        match folded {
            Some(kind) => {
                output.pop();
                iter.next();
                output.push(Token::new(kind, token.line));
                folds += 1;
            }
            None => {
                output.push(token);
                output.extend(skipped);
            }
        }
    }

    if folds > 0 {
        tracing::trace!(folds, "folded constant expressions");
    }
    output
}

fn fold(left: &TokenKind, right: &TokenKind) -> Option<TokenKind> {
    Some(match (left, right) {
        (TokenKind::Int(a), TokenKind::Int(b)) => TokenKind::Int(a.wrapping_add(*b)),
        (TokenKind::Long(a), TokenKind::Long(b)) => TokenKind::Long(a.wrapping_add(*b)),
        (TokenKind::Float(a), TokenKind::Float(b)) => TokenKind::Float(a + b),
        (TokenKind::Double(a), TokenKind::Double(b)) => TokenKind::Double(a + b),
        (TokenKind::String(a), TokenKind::String(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            TokenKind::String(joined)
        }
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn eval(text: &str) -> Vec<TokenKind> {
        evaluate(tokenize(text).unwrap())
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_folds_same_kind_operands() {
        assert_eq!(eval("1 + 2"), vec![TokenKind::Int(3), TokenKind::Newline]);
        assert_eq!(eval("1L + 2L"), vec![TokenKind::Long(3), TokenKind::Newline]);
        assert_eq!(
            eval("1.5f + 2.25f"),
            vec![TokenKind::Float(3.75), TokenKind::Newline]
        );
        assert_eq!(
            eval("0.5 + 0.25"),
            vec![TokenKind::Double(0.75), TokenKind::Newline]
        );
        assert_eq!(
            eval(r#""ab" + "cd""#),
            vec![TokenKind::String("abcd".into()), TokenKind::Newline]
        );
    }

    #[test]
    fn test_chains_fold_left_to_right() {
        assert_eq!(
            eval(r#""a" + "b" + "c" + "d""#),
            vec![TokenKind::String("abcd".into()), TokenKind::Newline]
        );
        assert_eq!(eval("1 + 2 + 3"), vec![TokenKind::Int(6), TokenKind::Newline]);
    }

    #[test]
    fn test_mixed_kinds_are_left_alone() {
        assert_eq!(
            eval("1 + 2L"),
            vec![
                TokenKind::Int(1),
                TokenKind::Plus,
                TokenKind::Long(2),
                TokenKind::Newline
            ]
        );
        assert_eq!(
            eval(r#""a" + 'b'"#),
            vec![
                TokenKind::String("a".into()),
                TokenKind::Plus,
                TokenKind::LiteralInSingleQuotes("b".into()),
                TokenKind::Newline
            ]
        );
    }

    #[test]
    fn test_newline_after_plus_is_swallowed() {
        let tokens = evaluate(tokenize("x = \"a\" +\n\n \"b\"").unwrap());
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Literal("x".into()),
                TokenKind::Equals,
                TokenKind::String("ab".into()),
                TokenKind::Newline
            ]
        );
        assert_eq!(tokens[2].line, 1);
        assert_eq!(tokens[3].line, 3);
    }

    #[test]
    fn test_newline_before_plus_prevents_folding() {
        assert_eq!(
            eval("1\n+ 2"),
            vec![
                TokenKind::Int(1),
                TokenKind::Newline,
                TokenKind::Plus,
                TokenKind::Int(2),
                TokenKind::Newline
            ]
        );
    }

    #[test]
    fn test_unfolded_plus_keeps_following_newlines() {
        assert_eq!(
            eval("1 +\n"),
            vec![
                TokenKind::Int(1),
                TokenKind::Plus,
                TokenKind::Newline,
                TokenKind::Newline
            ]
        );
    }

    #[test]
    fn test_integer_overflow_wraps() {
        assert_eq!(
            eval("2147483647 + 1"),
            vec![TokenKind::Int(i32::MIN), TokenKind::Newline]
        );
    }

    #[test]
    fn test_leading_plus_passes_through() {
        assert_eq!(
            eval("+ 1"),
            vec![TokenKind::Plus, TokenKind::Int(1), TokenKind::Newline]
        );
    }
}
