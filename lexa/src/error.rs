use crate::regex::RegexError;
use crate::scanner::LexicalError;
use std::rc::Rc;
use thiserror::Error;

/// Errors that can occur while compiling a [`crate::Generator`]'s token specs into a DFA.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A token's pattern failed to parse or produced a malformed postfix stream.
    #[error("malformed regex for token {token_name:?} (pattern {pattern:?}): {source}")]
    MalformedRegex {
        token_name: Rc<str>,
        pattern: Rc<str>,
        #[source]
        source: RegexError,
    },
    /// `build()` was called with zero token specs.
    #[error("no token patterns were added before build()")]
    NoPatterns,
    /// A read-only accessor (`nfa()`, `dfa()`, `accepts()`, `tokenize()`) was called
    /// before a successful `build()`.
    #[error("generator has not been built yet (call build() first)")]
    NotBuilt,
}

/// The error surface of [`crate::Generator::tokenize_strict`]: either the generator
/// was not built yet, or the input itself could not be fully tokenized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Lexical(#[from] LexicalError),
}
