//! [`Generator`]: the façade that wires the regex parser, Thompson construction, NFA
//! combinator, subset construction, and scanner into the `add_token`/`build`/
//! `tokenize` contract described at the crate root.

use crate::dfa::Dfa;
use crate::error::{BuildError, TokenizeError};
use crate::nfa::Nfa;
use crate::scanner::{self, LexicalError, Token};
use std::rc::Rc;

/// A `(name, pattern)` pair as added with [`Generator::add_token`]. Its priority is
/// implicit: position in the generator's spec list.
#[derive(Debug, Clone)]
pub struct TokenSpec {
    pub name: Rc<str>,
    pub pattern: String,
}

/// Tokens and lexical errors collected from one [`Generator::tokenize`] run. Errors
/// never abort the scan — this mirrors the best-effort recovery policy of the
/// scanner itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeOutcome<'a> {
    pub tokens: Vec<Token<'a>>,
    pub errors: Vec<LexicalError>,
}

struct Compiled {
    nfa: Nfa,
    dfa: Dfa,
    names: Vec<Rc<str>>,
}

/// Compiles a list of token specs into a DFA and runs the scanner over it.
///
/// Construction is eager and all-at-once: there is no incremental insertion.
/// Calling [`Generator::add_token`] after a successful [`Generator::build`]
/// invalidates the compiled automaton — it must be rebuilt before the accessors
/// below will succeed again.
#[derive(Default)]
pub struct Generator {
    specs: Vec<TokenSpec>,
    compiled: Option<Compiled>,
}

impl Generator {
    pub fn new() -> Generator {
        Generator::default()
    }

    /// Appends a token spec; its priority is its position in the list (lower index
    /// wins ties). Invalidates any previously compiled automaton.
    pub fn add_token(&mut self, name: impl Into<Rc<str>>, pattern: impl Into<String>) {
        self.specs.push(TokenSpec {
            name: name.into(),
            pattern: pattern.into(),
        });
        self.compiled = None;
    }

    /// Compiles every spec added so far into a combined NFA and its DFA. On
    /// failure, no DFA is produced, but the specs added so far are left in place —
    /// fix the offending pattern and call `build()` again.
    pub fn build(&mut self) -> Result<(), BuildError> {
        if self.specs.is_empty() {
            return Err(BuildError::NoPatterns);
        }

        let mut per_token = Vec::with_capacity(self.specs.len());
        for (token_id, spec) in self.specs.iter().enumerate() {
            let nfa = Nfa::from_pattern(&spec.pattern).map_err(|source| BuildError::MalformedRegex {
                token_name: spec.name.clone(),
                pattern: Rc::from(spec.pattern.as_str()),
                source,
            })?;
            per_token.push((nfa, token_id));
        }

        let nfa = Nfa::combine(per_token);
        let dfa = nfa.to_dfa();
        let names = self.specs.iter().map(|s| s.name.clone()).collect();

        self.compiled = Some(Compiled { nfa, dfa, names });
        Ok(())
    }

    /// The combined NFA, once built.
    pub fn nfa(&self) -> Option<&Nfa> {
        self.compiled.as_ref().map(|c| &c.nfa)
    }

    /// The labeled DFA, once built.
    pub fn dfa(&self) -> Option<&Dfa> {
        self.compiled.as_ref().map(|c| &c.dfa)
    }

    /// Runs the scanner over `input`, collecting both the emitted tokens and any
    /// lexical errors (best-effort: a lexical error does not stop the scan).
    pub fn tokenize<'a>(&self, input: &'a str) -> Result<TokenizeOutcome<'a>, BuildError> {
        let compiled = self.compiled.as_ref().ok_or(BuildError::NotBuilt)?;
        let (tokens, errors) = scanner::scan(&compiled.dfa, &compiled.names, input);
        Ok(TokenizeOutcome { tokens, errors })
    }

    /// Like [`Generator::tokenize`], but returns the first lexical error as `Err`
    /// instead of collecting it.
    pub fn tokenize_strict<'a>(&self, input: &'a str) -> Result<Vec<Token<'a>>, TokenizeError> {
        let outcome = self.tokenize(input)?;
        match outcome.errors.into_iter().next() {
            Some(e) => Err(TokenizeError::Lexical(e)),
            None => Ok(outcome.tokens),
        }
    }

    /// Whether the whole of `input` tokenizes without a single lexical error —
    /// distinct from "matches a single token".
    pub fn accepts(&self, input: &str) -> Result<bool, BuildError> {
        Ok(self.tokenize(input)?.errors.is_empty())
    }
}
