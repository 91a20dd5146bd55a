//! # lexa
//!
//! `lexa` is a lexical-analyzer generator: feed it a list of named regular-expression
//! token patterns, and it compiles them into a single deterministic finite automaton
//! that performs maximal-munch tokenization with priority-based tie-breaking.
//!
//! ## Usage
//!
//! ```rust
//! use lexa::Generator;
//!
//! let mut gen = Generator::new();
//! gen.add_token("KW_IF", "if");
//! gen.add_token("ID", "(a|b|c)(a|b|c)*");
//! gen.build().unwrap();
//!
//! let outcome = gen.tokenize("if cab").unwrap();
//! assert_eq!(outcome.tokens[0].kind.as_ref(), "KW_IF");
//! assert_eq!(outcome.tokens[1].kind.as_ref(), "ID");
//! assert_eq!(outcome.tokens[1].lexeme, "cab");
//! ```
//!
//! ## Pipeline
//!
//! This crate builds on a classical four-stage pipeline:
//!
//! 1. [`regex`] parses an infix pattern (`|`, implicit concatenation, `*`, grouping
//!    with `()`) into a postfix operator stream via the shunting-yard algorithm.
//! 2. [`nfa`] evaluates that postfix stream with a stack machine (Thompson
//!    construction) to build an NFA per token, then unions them with
//!    [`nfa::Nfa::combine`] *without* merging their accepting states, so each
//!    accepting state keeps the identity and priority of the token it came from.
//! 3. [`nfa::Nfa::to_dfa`] performs subset construction (ε-closure, move, worklist
//!    determinization) to produce a [`dfa::Dfa`] whose accepting states are labeled
//!    with the winning token: lowest priority (earliest declared) wins ties.
//! 4. [`scanner`] drives that DFA with the semantics a generated scanner would need:
//!    maximal munch, whitespace skipping outside tokens, and single-byte error
//!    recovery with 1-based line/column tracking.
//!
//! [`Generator`] wires the whole pipeline together. Feed it `(name, pattern)` pairs
//! with [`Generator::add_token`], call [`Generator::build`], then use
//! [`Generator::tokenize`] or [`Generator::accepts`] on input text.
//!
//! ## Supported grammar
//!
//! Only union (`|`), implicit concatenation, Kleene star (`*`), and grouping (`()`)
//! over single literal bytes are supported — no character classes, escapes, anchors,
//! or bounded repetition. Patterns operate over raw bytes, not Unicode scalar values.

pub mod dfa;
pub mod error;
pub mod generator;
pub mod nfa;
pub mod regex;
pub mod scanner;
mod table;

#[cfg(test)]
mod proptests;

pub use error::BuildError;
pub use generator::{Generator, TokenSpec, TokenizeOutcome};
pub use scanner::{LexicalError, Token};
