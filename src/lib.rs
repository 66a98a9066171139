//! Subset construction over Thompson-style epsilon-NFAs.
//!
//! An [`NFA`] is a graph of states with at most two outgoing edges each
//! (the shape produced by a Thompson construction). [`nfa_to_dfa`] turns
//! it into an equivalent [`DFA`] by the classic worklist algorithm:
//! epsilon-closure of the initial state, then repeated move+closure over
//! every symbol live in the current subset, deduplicating subsets so each
//! reachable one is materialized exactly once.

pub mod dfa;
pub mod nfa;

pub use dfa::{DFAState, DFA, DFA_START};
pub use nfa::{MalformedAutomaton, NFABuilder, NFAState, StateRef, NFA};

use std::hash::Hash;

/// Converts `nfa` into an equivalent deterministic automaton.
///
/// The input is only borrowed; the returned [`DFA`] is frozen and contains
/// exactly the subsets reachable from the initial epsilon-closure.
pub fn nfa_to_dfa<Input: Eq + Hash + Clone>(nfa: &NFA<Input>) -> DFA<Input> {
    nfa.powerset_construction()
}
