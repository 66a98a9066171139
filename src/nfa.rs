use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use bit_set::BitSet;
use bit_vec::BitVec;

use crate::dfa::{DFAState, DFA, DFA_START};

/// Stable index of a state inside its automaton's arena.
pub type StateRef = usize;

// NFAs

/// A Thompson-construction state: at most two outgoing edges.
///
/// An unlabeled state treats both edges (when present) as epsilon
/// transitions. A labeled state consumes its symbol over `edge1`;
/// `edge2` plays no role for labeled states.
#[derive(Clone, Debug, PartialEq)]
pub struct NFAState<Input> {
    label: Option<Input>,
    edge1: Option<StateRef>,
    edge2: Option<StateRef>,
}

impl<Input> NFAState<Input> {
    pub fn label(&self) -> Option<&Input> {
        self.label.as_ref()
    }

    pub fn edge1(&self) -> Option<StateRef> {
        self.edge1
    }

    pub fn edge2(&self) -> Option<StateRef> {
        self.edge2
    }
}

/// An epsilon-NFA with a single accept state, frozen after construction.
///
/// The state graph may contain cycles; repetition constructs produce them.
/// Conversion only ever borrows the automaton.
#[derive(Clone, Debug, PartialEq)]
pub struct NFA<Input> {
    states: Vec<NFAState<Input>>,
    initial: StateRef,
    accept: StateRef,
}

/// Arena-style builder for [`NFA`].
///
/// States are allocated first and wired afterwards, so cyclic graphs can
/// be patched together before [`finish`](NFABuilder::finish) seals and
/// validates the automaton.
pub struct NFABuilder<Input> {
    states: Vec<NFAState<Input>>,
}

impl<Input> NFABuilder<Input> {
    pub fn new() -> Self {
        NFABuilder { states: Vec::new() }
    }

    pub fn with_capacity(states: usize) -> Self {
        NFABuilder {
            states: Vec::with_capacity(states),
        }
    }

    /// Allocates a fresh state. `None` makes it an epsilon state.
    pub fn add_state(&mut self, label: Option<Input>) -> StateRef {
        self.states.push(NFAState {
            label,
            edge1: None,
            edge2: None,
        });
        self.states.len() - 1
    }

    pub fn set_edge1(&mut self, from: StateRef, to: StateRef) {
        assert!(from < self.states.len());
        self.states[from].edge1 = Some(to);
    }

    pub fn set_edge2(&mut self, from: StateRef, to: StateRef) {
        assert!(from < self.states.len());
        self.states[from].edge2 = Some(to);
    }

    /// Seals the arena into an [`NFA`].
    ///
    /// Fails if `initial`, `accept` or any edge points outside the arena,
    /// or if a labeled state lacks the `edge1` its label implies.
    pub fn finish(
        self,
        initial: StateRef,
        accept: StateRef,
    ) -> Result<NFA<Input>, MalformedAutomaton> {
        let len = self.states.len();
        if initial >= len {
            return Err(MalformedAutomaton::UnknownState(initial));
        }
        if accept >= len {
            return Err(MalformedAutomaton::UnknownState(accept));
        }
        for (n, state) in self.states.iter().enumerate() {
            for to in [state.edge1, state.edge2].into_iter().flatten() {
                if to >= len {
                    return Err(MalformedAutomaton::UnknownState(to));
                }
            }
            if state.label.is_some() && state.edge1.is_none() {
                return Err(MalformedAutomaton::MissingTarget(n));
            }
        }
        Ok(NFA {
            states: self.states,
            initial,
            accept,
        })
    }
}

impl<Input> Default for NFABuilder<Input> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Input> NFA<Input> {
    pub fn initial(&self) -> StateRef {
        self.initial
    }

    pub fn accept(&self) -> StateRef {
        self.accept
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, n: StateRef) -> &NFAState<Input> {
        &self.states[n]
    }

    /// Every state reachable from `state` over epsilon edges, including
    /// `state` itself.
    pub fn epsilon_closure(&self, state: StateRef) -> BitSet {
        let mut closure = BitSet::with_capacity(self.states.len());
        self.close_over(state, &mut closure);
        closure
    }

    /// Union of [`epsilon_closure`](NFA::epsilon_closure) over a subset.
    pub fn epsilon_closure_set(&self, states: &BitSet) -> BitSet {
        let mut closure = BitSet::with_capacity(self.states.len());
        for state in states.iter() {
            self.close_over(state, &mut closure);
        }
        closure
    }

    // Iterative DFS; `closure` doubles as the visited set, so epsilon
    // cycles are expanded at most once and deep chains cannot overflow
    // the call stack.
    fn close_over(&self, start: StateRef, closure: &mut BitSet) {
        let mut stack = vec![start];
        while let Some(n) = stack.pop() {
            if !closure.insert(n) {
                continue;
            }
            let state = &self.states[n];
            if state.label.is_none() {
                stack.extend(state.edge1);
                stack.extend(state.edge2);
            }
        }
    }
}

impl<Input: Eq + Hash + Clone> NFA<Input> {
    /// The subset move: states reached from `states` by consuming exactly
    /// `symbol`. Only `edge1` of matching states is followed.
    pub fn move_on(&self, states: &BitSet, symbol: &Input) -> BitSet {
        let mut moved = BitSet::with_capacity(self.states.len());
        for n in states.iter() {
            let state = &self.states[n];
            if state.label.as_ref() == Some(symbol) {
                // A labeled state without a target contributes nothing.
                if let Some(to) = state.edge1 {
                    moved.insert(to);
                }
            }
        }
        moved
    }

    // Distinct symbols labeling any member of the subset, epsilon excluded.
    fn live_symbols(&self, states: &BitSet) -> HashSet<Input> {
        states
            .iter()
            .filter_map(|n| self.states[n].label.clone())
            .collect()
    }

    /// Subset construction: builds the equivalent DFA.
    ///
    /// Only subsets reachable by repeated move+closure from the initial
    /// epsilon-closure are materialized, and each exactly once; the dedup
    /// map keys on the subset itself, so equal subsets share a state no
    /// matter how they are reached. A symbol whose move+closure comes up
    /// empty gets no transition at all.
    pub fn powerset_construction(&self) -> DFA<Input> {
        let mut states = Vec::new();
        let mut finals = BitVec::new();
        let mut states_map: HashMap<BitSet, StateRef> = HashMap::new();

        let start_set = self.epsilon_closure(self.initial);
        finals.push(start_set.contains(self.accept));
        states.push(DFAState::new(start_set.clone()));
        states_map.insert(start_set.clone(), DFA_START);

        let mut worklist = vec![(start_set, DFA_START)];
        while let Some((cur_set, cur_num)) = worklist.pop() {
            for symbol in self.live_symbols(&cur_set) {
                let nxt_set = self.epsilon_closure_set(&self.move_on(&cur_set, &symbol));

                // Skip the stuck state: a missing transition means the
                // downstream matcher rejects on this symbol.
                if nxt_set.is_empty() {
                    continue;
                }

                let nxt_num = match states_map.get(&nxt_set) {
                    Some(&num) => num,
                    None => {
                        let num = states.len();
                        finals.push(nxt_set.contains(self.accept));
                        states.push(DFAState::new(nxt_set.clone()));
                        states_map.insert(nxt_set.clone(), num);
                        worklist.push((nxt_set, num));
                        num
                    }
                };
                states[cur_num].set_transition(symbol, nxt_num);
            }
        }

        DFA::new(states.into_boxed_slice(), finals)
    }
}

/// Construction-time invariant violations, reported by
/// [`NFABuilder::finish`].
#[derive(Clone, Debug, PartialEq)]
pub enum MalformedAutomaton {
    /// An edge or entry point refers to a state outside the arena.
    UnknownState(StateRef),
    /// A labeled state has no `edge1` to consume its symbol over.
    MissingTarget(StateRef),
}

impl fmt::Display for MalformedAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownState(state) => write!(f, "reference to unknown state {}", state),
            Self::MissingTarget(state) => {
                write!(f, "labeled state {} has no edge1 target", state)
            }
        }
    }
}

impl std::error::Error for MalformedAutomaton {}
