//! Regex parsing: turns an infix pattern into a postfix operator stream the
//! [Thompson construction][crate::nfa] can evaluate with a stack machine.
//!
//! The supported grammar is deliberately small:
//!
//! ```text
//! regex  := term ('|' term)*
//! term   := factor*
//! factor := atom '*'?
//! atom   := CHAR | '(' regex ')'
//! ```
//!
//! `CHAR` is any byte other than `(`, `)`, `|` or `*` — there is no escaping, so those
//! four bytes can never appear as literal pattern characters.

use std::fmt;
use thiserror::Error;

/// A single step of a postfix operator stream.
///
/// Kept as a tagged enum rather than a literal string of `.`/`|`/`*` characters: the
/// synthetic concatenation operator needs a symbol of its own, and a plain string would
/// collide with a pattern that contains a literal `.` byte as an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixToken {
    /// A literal byte to match.
    Operand(u8),
    /// Implicit concatenation, inserted between adjacent atoms.
    Concat,
    /// `|`
    Union,
    /// `*`
    Star,
}

impl fmt::Display for PostfixToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixToken::Operand(b) => write!(f, "{}", *b as char),
            PostfixToken::Concat => write!(f, "."),
            PostfixToken::Union => write!(f, "|"),
            PostfixToken::Star => write!(f, "*"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexError {
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("unbalanced parentheses")]
    UnbalancedParens,
    #[error("operator '{0}' has too few operands")]
    StackUnderflow(char),
    #[error("pattern left {0} fragments on the stack (expected exactly 1)")]
    TrailingFragments(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    Operand(u8),
    LParen,
    RParen,
    Union,
    Concat,
    Star,
}

fn precedence(t: RawToken) -> Option<u8> {
    match t {
        RawToken::Star => Some(3),
        RawToken::Concat => Some(2),
        RawToken::Union => Some(1),
        _ => None,
    }
}

fn can_precede_concat(t: RawToken) -> bool {
    matches!(t, RawToken::Operand(_) | RawToken::RParen | RawToken::Star)
}

fn can_follow_concat(t: RawToken) -> bool {
    matches!(t, RawToken::Operand(_) | RawToken::LParen)
}

fn lex(pattern: &str) -> Result<Vec<RawToken>, RegexError> {
    if pattern.is_empty() {
        return Err(RegexError::EmptyPattern);
    }
    let mut depth: i32 = 0;
    let mut out = Vec::with_capacity(pattern.len());
    for b in pattern.bytes() {
        let tok = match b {
            b'(' => {
                depth += 1;
                RawToken::LParen
            }
            b')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(RegexError::UnbalancedParens);
                }
                RawToken::RParen
            }
            b'|' => RawToken::Union,
            b'*' => RawToken::Star,
            c => RawToken::Operand(c),
        };
        out.push(tok);
    }
    if depth != 0 {
        return Err(RegexError::UnbalancedParens);
    }
    Ok(out)
}

fn insert_concat(tokens: &[RawToken]) -> Vec<RawToken> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for (i, &tok) in tokens.iter().enumerate() {
        if i > 0 && can_precede_concat(tokens[i - 1]) && can_follow_concat(tok) {
            out.push(RawToken::Concat);
        }
        out.push(tok);
    }
    out
}

/// Validates that `pattern` is non-empty and has balanced parentheses.
pub fn validate(pattern: &str) -> Result<(), RegexError> {
    lex(pattern).map(|_| ())
}

/// Translates `pattern` into a postfix operator stream via concatenation insertion
/// followed by the shunting-yard algorithm.
pub fn to_postfix(pattern: &str) -> Result<Vec<PostfixToken>, RegexError> {
    let with_concat = insert_concat(&lex(pattern)?);

    let mut output = Vec::with_capacity(with_concat.len());
    let mut ops: Vec<RawToken> = Vec::new();

    for tok in with_concat {
        match tok {
            RawToken::Operand(c) => output.push(PostfixToken::Operand(c)),
            RawToken::LParen => ops.push(tok),
            RawToken::RParen => {
                while !matches!(ops.last(), Some(RawToken::LParen) | None) {
                    output.push(to_postfix_op(ops.pop().unwrap()));
                }
                ops.pop(); // the matching LParen; present because parens are balanced
            }
            op => {
                let prec = precedence(op).expect("operator token has a precedence");
                while let Some(&top) = ops.last() {
                    if matches!(top, RawToken::LParen) {
                        break;
                    }
                    if precedence(top).expect("operator token has a precedence") >= prec {
                        output.push(to_postfix_op(ops.pop().unwrap()));
                    } else {
                        break;
                    }
                }
                ops.push(op);
            }
        }
    }
    while let Some(top) = ops.pop() {
        output.push(to_postfix_op(top));
    }

    Ok(output)
}

fn to_postfix_op(t: RawToken) -> PostfixToken {
    match t {
        RawToken::Union => PostfixToken::Union,
        RawToken::Concat => PostfixToken::Concat,
        RawToken::Star => PostfixToken::Star,
        _ => unreachable!("only operators are pushed onto the operator stack"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix_string(pattern: &str) -> String {
        to_postfix(pattern)
            .unwrap()
            .into_iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn simple_concat() {
        assert_eq!(postfix_string("ab"), "ab.");
    }

    #[test]
    fn union_has_lower_precedence_than_concat() {
        assert_eq!(postfix_string("a|bc"), "abc.|");
    }

    #[test]
    fn star_binds_tighter_than_concat() {
        assert_eq!(postfix_string("ab*"), "ab*.");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(postfix_string("(a|b)c"), "ab|c.");
    }

    #[test]
    fn nested_groups() {
        assert_eq!(postfix_string("((a))"), "a");
    }

    #[test]
    fn empty_pattern_rejected() {
        assert_eq!(validate(""), Err(RegexError::EmptyPattern));
    }

    #[test]
    fn unbalanced_parens_rejected() {
        assert_eq!(validate("(a"), Err(RegexError::UnbalancedParens));
        assert_eq!(validate("a)"), Err(RegexError::UnbalancedParens));
        assert_eq!(validate(")("), Err(RegexError::UnbalancedParens));
    }

    #[test]
    fn balanced_parens_accepted() {
        assert!(validate("(a|b)*c").is_ok());
    }

    #[test]
    fn literal_dot_is_an_ordinary_operand() {
        // '.' is not a metacharacter in this grammar, so it must survive as an operand
        // distinct from the synthetic concatenation operator.
        assert_eq!(postfix_string(".a"), ".a.");
    }
}
