//! Nondeterministic finite automata: Thompson construction from a postfix operator
//! stream, the token-preserving union combinator, and subset construction to a [`Dfa`].

use crate::dfa::{Dfa, DfaState};
use crate::regex::{self, PostfixToken, RegexError};
use crate::table::Table;
use std::collections::{HashMap, HashSet};

/// A non-ε transition symbol: a single input byte.
pub type Symbol = u8;

/// Which token an accepting NFA (or DFA) state belongs to, and its tie-break priority.
///
/// `token_id` and `priority` are the same number here — a token spec's priority *is*
/// its position in the caller's list, which also identifies it — but they are kept as
/// two named fields to match the vocabulary the rest of the pipeline uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub token_id: usize,
    pub priority: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NfaState {
    pub epsilon: Vec<usize>,
    pub transitions: Vec<(Symbol, usize)>,
    pub accepting: bool,
    pub label: Option<Label>,
}

/// A nondeterministic finite automaton with ε-transitions.
///
/// States are plain indices into `states`; there is no separate handle type. Before
/// [combination](Nfa::combine), accepting states carry no label (`label` is `None`) —
/// the combinator is what assigns `(token_id, priority)` metadata.
#[derive(Debug, Clone)]
pub struct Nfa {
    pub(crate) states: Vec<NfaState>,
    pub(crate) start: usize,
}

struct Fragment {
    start: usize,
    accepts: Vec<usize>,
}

#[derive(Default)]
struct Builder {
    states: Vec<NfaState>,
}

impl Builder {
    fn alloc(&mut self) -> usize {
        self.states.push(NfaState::default());
        self.states.len() - 1
    }

    fn symbol(&mut self, b: Symbol) -> Fragment {
        let start = self.alloc();
        let accept = self.alloc();
        self.states[start].transitions.push((b, accept));
        self.states[accept].accepting = true;
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn star(&mut self, a: Fragment) -> Fragment {
        let start = self.alloc();
        let accept = self.alloc();
        self.states[start].epsilon.push(a.start);
        self.states[start].epsilon.push(accept);
        for s in &a.accepts {
            self.states[*s].accepting = false;
            self.states[*s].epsilon.push(a.start);
            self.states[*s].epsilon.push(accept);
        }
        self.states[accept].accepting = true;
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn union(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let start = self.alloc();
        let accept = self.alloc();
        self.states[start].epsilon.push(a.start);
        self.states[start].epsilon.push(b.start);
        for s in a.accepts.iter().chain(b.accepts.iter()) {
            self.states[*s].accepting = false;
            self.states[*s].epsilon.push(accept);
        }
        self.states[accept].accepting = true;
        Fragment {
            start,
            accepts: vec![accept],
        }
    }

    fn concat(&mut self, a: Fragment, b: Fragment) -> Fragment {
        for s in &a.accepts {
            self.states[*s].accepting = false;
            self.states[*s].epsilon.push(b.start);
        }
        Fragment {
            start: a.start,
            accepts: b.accepts,
        }
    }
}

impl Nfa {
    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Thompson construction: evaluates a postfix operator stream with a stack
    /// machine, one fragment per operand/operator, per the four rules for symbols,
    /// `*`, `|` and `.`.
    pub fn from_postfix(postfix: &[PostfixToken]) -> Result<Nfa, RegexError> {
        let mut builder = Builder::default();
        let mut stack: Vec<Fragment> = Vec::new();

        for &tok in postfix {
            match tok {
                PostfixToken::Operand(b) => stack.push(builder.symbol(b)),
                PostfixToken::Star => {
                    let a = stack.pop().ok_or(RegexError::StackUnderflow('*'))?;
                    stack.push(builder.star(a));
                }
                PostfixToken::Concat => {
                    let b = stack.pop().ok_or(RegexError::StackUnderflow('.'))?;
                    let a = stack.pop().ok_or(RegexError::StackUnderflow('.'))?;
                    stack.push(builder.concat(a, b));
                }
                PostfixToken::Union => {
                    let b = stack.pop().ok_or(RegexError::StackUnderflow('|'))?;
                    let a = stack.pop().ok_or(RegexError::StackUnderflow('|'))?;
                    stack.push(builder.union(a, b));
                }
            }
        }

        if stack.len() != 1 {
            return Err(RegexError::TrailingFragments(stack.len()));
        }
        let frag = stack.pop().unwrap();
        Ok(Nfa {
            states: builder.states,
            start: frag.start,
        })
    }

    /// Parses `pattern` and runs the Thompson construction over its postfix form.
    pub fn from_pattern(pattern: &str) -> Result<Nfa, RegexError> {
        let postfix = regex::to_postfix(pattern)?;
        Nfa::from_postfix(&postfix)
    }

    /// Unions independently-built per-token NFAs into one combined NFA, without
    /// merging their accepting states: a fresh start state gets an ε-transition to
    /// each `(nfa, token_id)`'s start (after renumbering its states by a fixed
    /// offset so ids stay unique), and every original accepting state is labeled
    /// with its token's id and priority.
    pub fn combine(per_token: Vec<(Nfa, usize)>) -> Nfa {
        let mut states = vec![NfaState::default()];
        let mut start_targets = Vec::with_capacity(per_token.len());

        for (nfa, token_id) in per_token {
            let offset = states.len();
            let Nfa {
                states: sub_states,
                start,
            } = nfa;
            for mut st in sub_states {
                for e in &mut st.epsilon {
                    *e += offset;
                }
                for (_, t) in &mut st.transitions {
                    *t += offset;
                }
                if st.accepting {
                    st.label = Some(Label {
                        token_id,
                        priority: token_id,
                    });
                }
                states.push(st);
            }
            start_targets.push(start + offset);
        }

        states[0].epsilon = start_targets;
        Nfa { states, start: 0 }
    }

    /// Smallest superset of `seeds` closed under ε-transitions, as a sorted `Vec`
    /// (the canonical form used as a subset-construction map key).
    fn epsilon_closure(&self, seeds: impl IntoIterator<Item = usize>) -> Vec<usize> {
        let mut closure: HashSet<usize> = seeds.into_iter().collect();
        let mut worklist: Vec<usize> = closure.iter().copied().collect();
        while let Some(s) = worklist.pop() {
            for &t in &self.states[s].epsilon {
                if closure.insert(t) {
                    worklist.push(t);
                }
            }
        }
        let mut v: Vec<usize> = closure.into_iter().collect();
        v.sort_unstable();
        v
    }

    fn mv(&self, states: &[usize], symbol: Symbol) -> Vec<usize> {
        let mut out = HashSet::new();
        for &s in states {
            for &(sym, t) in &self.states[s].transitions {
                if sym == symbol {
                    out.insert(t);
                }
            }
        }
        out.into_iter().collect()
    }

    fn alphabet(&self) -> Vec<Symbol> {
        let mut set = HashSet::new();
        for st in &self.states {
            for &(b, _) in &st.transitions {
                set.insert(b);
            }
        }
        let mut v: Vec<Symbol> = set.into_iter().collect();
        v.sort_unstable();
        v
    }

    /// Subset construction: determinizes this NFA into a [`Dfa`] whose accepting
    /// states are labeled with the winning token (lowest priority in the subset).
    ///
    /// Subsets are canonicalized as sorted `Vec<usize>`s so that two runs discover
    /// the same DFA regardless of `HashSet` iteration order.
    pub fn to_dfa(&self) -> Dfa {
        let alphabet = self.alphabet();
        let start_subset = self.epsilon_closure([self.start]);

        let mut subset_to_id: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut subsets: Vec<Vec<usize>> = Vec::new();
        subset_to_id.insert(start_subset.clone(), 0);
        subsets.push(start_subset);

        let mut transition_tables: Vec<HashMap<Symbol, usize>> = vec![HashMap::new()];
        let mut to_explore = vec![0usize];

        while let Some(id) = to_explore.pop() {
            for &symbol in &alphabet {
                let moved = self.mv(&subsets[id], symbol);
                if moved.is_empty() {
                    continue;
                }
                let closure = self.epsilon_closure(moved);
                let next_id = match subset_to_id.get(&closure) {
                    Some(&existing) => existing,
                    None => {
                        let new_id = subsets.len();
                        subset_to_id.insert(closure.clone(), new_id);
                        subsets.push(closure);
                        transition_tables.push(HashMap::new());
                        to_explore.push(new_id);
                        new_id
                    }
                };
                transition_tables[id].insert(symbol, next_id);
            }
        }

        let states = subsets
            .into_iter()
            .zip(transition_tables)
            .map(|(subset, transitions)| {
                let label = subset
                    .iter()
                    .filter_map(|&s| self.states[s].label.clone())
                    .min_by_key(|l| l.priority);
                DfaState {
                    accepting: label.is_some(),
                    label,
                    transitions,
                }
            })
            .collect();

        Dfa::new(alphabet, states, 0)
    }

    /// Whether `input` is accepted by directly simulating the NFA (ε-closure plus
    /// `move`, repeated per byte). Used by tests to check the Thompson construction
    /// in isolation, before subset construction enters the picture.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut current = self.epsilon_closure([self.start]);
        for &b in input {
            let moved = self.mv(&current, b);
            if moved.is_empty() {
                return false;
            }
            current = self.epsilon_closure(moved);
        }
        current.iter().any(|&s| self.states[s].accepting)
    }

    /// Renders the NFA as an aligned plain-text transition table, for display only.
    /// Unlike the DFA's table, a cell may list several target states (or none) since
    /// the NFA is nondeterministic.
    pub fn to_table(&self) -> String {
        let alphabet = self.alphabet();
        let mut header = vec!["state".to_string(), "eps".to_string()];
        header.extend(alphabet.iter().map(|&b| (b as char).to_string()));

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
            if let Some(label) = &state.label {
                name.push_str(&format!("[{}]", label.token_id));
            }

            let eps = if state.epsilon.is_empty() {
                "-".to_string()
            } else {
                state
                    .epsilon
                    .iter()
                    .map(|e| format!("s{e}"))
                    .collect::<Vec<_>>()
                    .join(",")
            };

            let mut row = vec![name, eps];
            for &b in &alphabet {
                let targets: Vec<String> = state
                    .transitions
                    .iter()
                    .filter(|(sym, _)| *sym == b)
                    .map(|(_, t)| format!("s{t}"))
                    .collect();
                row.push(if targets.is_empty() {
                    "-".to_string()
                } else {
                    targets.join(",")
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
