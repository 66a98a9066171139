use std::collections::HashMap;
use std::hash::Hash;

use bit_set::BitSet;
use bit_vec::BitVec;

use crate::nfa::StateRef;

/// The initial DFA state is always the first one materialized.
pub const DFA_START: StateRef = 0;

/// A deterministic state: the NFA subset it stands for plus at most one
/// outgoing transition per symbol.
#[derive(Debug)]
pub struct DFAState<Input> {
    represents: BitSet,
    transitions: HashMap<Input, StateRef>,
}

impl<Input> DFAState<Input> {
    pub(crate) fn new(represents: BitSet) -> Self {
        DFAState {
            represents,
            transitions: HashMap::new(),
        }
    }

    /// The set of NFA states this DFA state stands for.
    pub fn represents(&self) -> &BitSet {
        &self.represents
    }

    pub fn transitions(&self) -> &HashMap<Input, StateRef> {
        &self.transitions
    }
}

impl<Input: Eq + Hash> DFAState<Input> {
    pub(crate) fn set_transition(&mut self, symbol: Input, to: StateRef) {
        self.transitions.insert(symbol, to);
    }

    pub fn target(&self, symbol: &Input) -> Option<StateRef> {
        self.transitions.get(symbol).copied()
    }
}

/// The frozen result of a subset construction.
///
/// Holds only the subsets reachable from the initial epsilon-closure; a
/// missing transition means "reject on this symbol", no stuck state is
/// ever materialized.
#[derive(Debug)]
pub struct DFA<Input> {
    states: Box<[DFAState<Input>]>,
    finals: BitVec,
}

impl<Input> DFA<Input> {
    pub(crate) fn new(states: Box<[DFAState<Input>]>, finals: BitVec) -> Self {
        DFA { states, finals }
    }

    pub fn initial_state(&self) -> StateRef {
        DFA_START
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, n: StateRef) -> &DFAState<Input> {
        &self.states[n]
    }

    pub fn states(&self) -> &[DFAState<Input>] {
        &self.states
    }

    pub fn is_accepting(&self, n: StateRef) -> bool {
        self.finals[n]
    }
}

impl<Input: Eq + Hash> DFA<Input> {
    /// One matcher step. `None` is an immediate reject, not an error.
    pub fn next_state(&self, from: StateRef, symbol: &Input) -> Option<StateRef> {
        self.states[from].target(symbol)
    }
}
