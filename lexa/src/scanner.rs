//! Longest-match tokenization over a built [`crate::dfa::Dfa`] — the runtime
//! semantics a generated scanner would realize, provided here directly as a library
//! routine rather than emitted as source text in some other language.

use crate::dfa::Dfa;
use std::rc::Rc;
use thiserror::Error;

/// One recognized token: which pattern matched, the matched text, and its 1-based
/// position in the original input.
///
/// `lexeme` borrows from the input passed to [`scan`]; slicing assumes token
/// boundaries land on UTF-8 char boundaries, which holds for the ASCII-oriented
/// patterns this grammar supports (it has no Unicode semantics of its own).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: Rc<str>,
    pub lexeme: &'a str,
    pub line: u32,
    pub column: u32,
}

/// A byte that no token pattern could extend a match with, reported with its
/// 1-based position; the scanner skips it and keeps going.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unexpected byte {byte:#04x} at line {line}, column {column}")]
pub struct LexicalError {
    pub line: u32,
    pub column: u32,
    pub byte: u8,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n')
}

fn advance(consumed: &[u8], line: &mut u32, column: &mut u32) {
    for &b in consumed {
        if b == b'\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}

/// Runs the maximal-munch scanner over `input`, resolving accepting states' token
/// ids against `token_names`. Returns every emitted token alongside every lexical
/// error encountered — a lexical error never aborts the scan (best-effort recovery).
pub fn scan<'a>(
    dfa: &Dfa,
    token_names: &[Rc<str>],
    input: &'a str,
) -> (Vec<Token<'a>>, Vec<LexicalError>) {
    let bytes = input.as_bytes();
    let mut pos = 0usize;
    let mut line: u32 = 1;
    let mut column: u32 = 1;
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while pos < bytes.len() {
        let mut state = dfa.start();
        let mut last_accept: Option<(usize, usize)> = None; // (end, token_id)
        let mut i = pos;

        while i < bytes.len() {
            match dfa.step(state, bytes[i]) {
                Some(next) => {
                    state = next;
                    i += 1;
                    if dfa.is_accepting(state) {
                        last_accept = Some((i, dfa.label(state).unwrap().token_id));
                    }
                }
                None => break,
            }
        }

        match last_accept {
            Some((end, token_id)) => {
                let lexeme = &input[pos..end];
                tokens.push(Token {
                    kind: token_names[token_id].clone(),
                    lexeme,
                    line,
                    column,
                });
                advance(&bytes[pos..end], &mut line, &mut column);
                pos = end;
            }
            None => {
                let b = bytes[pos];
                if !is_whitespace(b) {
                    errors.push(LexicalError { line, column, byte: b });
                }
                advance(&bytes[pos..pos + 1], &mut line, &mut column);
                pos += 1;
            }
        }
    }

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::Nfa;

    fn build(specs: &[(&str, &str)]) -> (Dfa, Vec<Rc<str>>) {
        let names: Vec<Rc<str>> = specs.iter().map(|(n, _)| Rc::from(*n)).collect();
        let per_token = specs
            .iter()
            .enumerate()
            .map(|(i, (_, pattern))| (Nfa::from_pattern(pattern).unwrap(), i))
            .collect();
        let dfa = Nfa::combine(per_token).to_dfa();
        (dfa, names)
    }

    #[test]
    fn keyword_vs_identifier() {
        let (dfa, names) = build(&[
            ("KW_IF", "if"),
            (
                "ID",
                "(a|b|c|d|e|f|g|h|i|j|k|l|m|n|o|p|q|r|s|t|u|v|w|x|y|z)(a|b|c|d|e|f|g|h|i|j|k|l|m|n|o|p|q|r|s|t|u|v|w|x|y|z|0|1|2|3|4|5|6|7|8|9)*",
            ),
        ]);
        let (tokens, errors) = scan(&dfa, &names, "if x1");
        assert!(errors.is_empty());
        let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_ref()).collect();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(kinds, vec!["KW_IF", "ID"]);
        assert_eq!(lexemes, vec!["if", "x1"]);
    }

    #[test]
    fn longest_match_wins_over_shorter_prefix() {
        let (dfa, names) = build(&[("LT", "<"), ("LE", "<=")]);
        let (tokens, errors) = scan(&dfa, &names, "<= <");
        assert!(errors.is_empty());
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(lexemes, vec!["<=", "<"]);
    }

    #[test]
    fn kleene_star_never_emits_empty_match() {
        let (dfa, names) = build(&[("A", "a*")]);

        let (tokens, errors) = scan(&dfa, &names, "b");
        assert!(tokens.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].byte, b'b');

        let (tokens, errors) = scan(&dfa, &names, "aaab");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].lexeme, "aaa");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].byte, b'b');
    }

    #[test]
    fn priority_tie_break_at_identical_length() {
        let (dfa, names) = build(&[("T1", "ab"), ("T2", "ab")]);
        let (tokens, errors) = scan(&dfa, &names, "ab");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind.as_ref(), "T1");
    }

    #[test]
    fn whitespace_outside_tokens_is_skipped() {
        let (dfa, names) = build(&[("NUM", "(0|1|2|3|4|5|6|7|8|9)(0|1|2|3|4|5|6|7|8|9)*")]);
        let (tokens, errors) = scan(&dfa, &names, "12 3");
        assert!(errors.is_empty());
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(lexemes, vec!["12", "3"]);
    }

    #[test]
    fn line_and_column_track_newlines() {
        let (dfa, names) = build(&[("A", "a")]);
        let (tokens, _) = scan(&dfa, &names, "a\na");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 1));
    }
}
