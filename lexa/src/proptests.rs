//! Property-based tests spanning the whole pipeline, in the same style as the
//! proptest-driven suite this crate's automata types were adapted from: generate
//! random patterns and inputs, then check pipeline-wide invariants instead of fixed
//! examples.

use crate::nfa::Nfa;
use crate::regex;
use ::regex::Regex as LibRegex;
use proptest::prelude::*;
use std::collections::HashSet;

/// A pattern strategy restricted to this crate's grammar: single lowercase-letter
/// literals, implicit concatenation, `|`, `*`, and grouping. No `+`, classes, or
/// escapes, since none of those are supported here.
fn random_pattern() -> impl Strategy<Value = String> {
    "[a-e]".prop_recursive(8, 256, 10, |inner| {
        prop_oneof![
            5 => prop::collection::vec(inner.clone(), 1..6)
                .prop_map(|vec| format!("({})", vec.join(""))),
            5 => prop::collection::vec(inner.clone(), 1..6).prop_map(|vec| vec.join("|")),
            2 => inner.clone().prop_map(|r| format!("({r})*")),
        ]
    })
}

proptest! {
    /// `to_dfa()` is a pure function of the NFA: rebuilding from the same pattern
    /// twice must produce byte-identical transition tables, not just equivalent
    /// automata, since subset construction canonicalizes subsets deterministically.
    #[test]
    fn subset_construction_is_deterministic(pattern in random_pattern()) {
        let nfa = Nfa::combine(vec![(Nfa::from_pattern(&pattern).unwrap(), 0)]);
        let first = nfa.to_dfa().to_table();
        let second = nfa.to_dfa().to_table();
        prop_assert_eq!(first, second);
    }

    /// The compiled DFA accepts exactly the strings the `regex` crate's reference
    /// engine matches for the equivalent anchored pattern.
    #[test]
    fn acceptance_agrees_with_reference_regex(
        pattern in random_pattern(),
        tests in prop::collection::vec("[a-e]*", 20),
    ) {
        let dfa = Nfa::combine(vec![(Nfa::from_pattern(&pattern).unwrap(), 0)]).to_dfa();
        let reference = LibRegex::new(&format!("^({pattern})$")).unwrap();

        for test in &tests {
            prop_assert_eq!(
                dfa.accepts(test.as_bytes()),
                reference.is_match(test),
                "mismatch on pattern {pattern:?}, input {test:?}"
            );
        }
    }

    /// Parsing a pattern to postfix and running Thompson construction over that
    /// postfix stream accepts exactly the same language as going through
    /// `Nfa::from_pattern` directly — there is only one path from pattern to NFA,
    /// and this property pins both ends of it against each other.
    #[test]
    fn postfix_then_thompson_matches_from_pattern(
        pattern in random_pattern(),
        tests in prop::collection::vec("[a-e]*", 10),
    ) {
        let postfix = regex::to_postfix(&pattern).unwrap();
        let via_postfix = Nfa::from_postfix(&postfix).unwrap();
        let via_pattern = Nfa::from_pattern(&pattern).unwrap();

        for test in &tests {
            prop_assert_eq!(
                via_postfix.accepts(test.as_bytes()),
                via_pattern.accepts(test.as_bytes())
            );
        }
    }

    /// Every accepted byte in a compiled DFA's alphabet actually appears as a
    /// literal operand in the source pattern — subset construction cannot invent
    /// transitions on symbols the regex never mentioned.
    #[test]
    fn dfa_alphabet_is_a_subset_of_pattern_bytes(pattern in random_pattern()) {
        let dfa = Nfa::combine(vec![(Nfa::from_pattern(&pattern).unwrap(), 0)]).to_dfa();
        let pattern_bytes: HashSet<u8> = pattern.bytes().collect();
        for &b in dfa.alphabet() {
            prop_assert!(pattern_bytes.contains(&b));
        }
    }
}
