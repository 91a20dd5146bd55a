//! Deterministic finite automata produced by [`crate::nfa::Nfa::to_dfa`]: a dense
//! state table plus a partial transition function, with accepting states labeled by
//! the token that wins there.

use crate::nfa::{Label, Symbol};
use crate::table::Table;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DfaState {
    pub accepting: bool,
    pub label: Option<Label>,
    pub transitions: HashMap<Symbol, usize>,
}

/// A deterministic finite automaton with a partial transition function: a missing
/// `(state, symbol)` entry denotes the implicit dead state, per the subset
/// construction's "skip on empty move" rule.
#[derive(Debug, Clone)]
pub struct Dfa {
    alphabet: Vec<Symbol>,
    states: Vec<DfaState>,
    start: usize,
}

impl Dfa {
    pub(crate) fn new(alphabet: Vec<Symbol>, states: Vec<DfaState>, start: usize) -> Dfa {
        Dfa {
            alphabet,
            states,
            start,
        }
    }

    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Steps from `state` on `symbol`; `None` is the dead state.
    pub fn step(&self, state: usize, symbol: Symbol) -> Option<usize> {
        self.states[state].transitions.get(&symbol).copied()
    }

    pub fn is_accepting(&self, state: usize) -> bool {
        self.states[state].accepting
    }

    pub fn label(&self, state: usize) -> Option<&Label> {
        self.states[state].label.as_ref()
    }

    /// Steps from the start state through all of `input`, stopping at the first dead
    /// transition. Used by tests and by [`Dfa::accepts`]; the scanner in
    /// [`crate::scanner`] needs the intermediate states too and steps by hand instead.
    pub fn step_all(&self, input: &[u8]) -> Option<usize> {
        let mut state = self.start;
        for &b in input {
            state = self.step(state, b)?;
        }
        Some(state)
    }

    /// Whether the whole of `input` is accepted by this automaton in one run — not
    /// to be confused with the scanner's tokenization, which restarts at `start()`
    /// after every emitted token.
    pub fn accepts(&self, input: &[u8]) -> bool {
        self.step_all(input).is_some_and(|s| self.is_accepting(s))
    }

    /// Renders the transition table as aligned plain text, for display only (read-only
    /// access to the same data [`Dfa::states`]/[`Dfa::alphabet`] expose structurally).
    pub fn to_table(&self) -> String {
        let mut header = vec![String::new()];
        header.extend(self.alphabet.iter().map(|&b| (b as char).to_string()));

        let mut rows = vec![header];
        for (i, state) in self.states.iter().enumerate() {
            let mut name = String::new();
            if i == self.start {
                name.push_str("-> ");
            }
            if state.accepting {
                name.push('*');
            }
            name.push_str(&format!("s{i}"));

            let mut row = vec![name];
            for &b in &self.alphabet {
                row.push(match state.transitions.get(&b) {
                    Some(&t) => format!("s{t}"),
                    None => "-".to_string(),
                });
            }
            rows.push(row);
        }

        let mut table = Table::default();
        for row in &rows {
            table.push_row(row.iter().map(String::as_str).collect());
        }
        table.to_string(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfa::Nfa;

    fn dfa_for(pattern: &str, token_id: usize) -> Dfa {
        Nfa::combine(vec![(Nfa::from_pattern(pattern).unwrap(), token_id)]).to_dfa()
    }

    #[test]
    fn dead_state_is_absence_of_transition() {
        let dfa = dfa_for("ab", 0);
        assert!(!dfa.accepts(b"ac"));
    }

    #[test]
    fn accepts_matches_pattern_language() {
        let dfa = dfa_for("(a|b)*c", 0);
        assert!(dfa.accepts(b"c"));
        assert!(dfa.accepts(b"abbac"));
        assert!(!dfa.accepts(b"ab"));
        assert!(!dfa.accepts(b""));
    }

    #[test]
    fn to_table_marks_start_and_accepting_states() {
        let dfa = dfa_for("a", 0);
        let table = dfa.to_table();
        assert!(table.contains("->"));
        assert!(table.contains('*'));
    }

    #[test]
    fn label_reports_the_winning_token() {
        let nfa = Nfa::combine(vec![
            (Nfa::from_pattern("if").unwrap(), 0),
            (Nfa::from_pattern("(a|b|i|f)(a|b|i|f)*").unwrap(), 1),
        ]);
        let dfa = nfa.to_dfa();
        let end = dfa.step_all(b"if").unwrap();
        assert_eq!(dfa.label(end).unwrap().token_id, 0);
    }
}
