//! Converts a small dictionary NFA and prints the resulting DFA table.

use tdfa::{nfa_to_dfa, NFABuilder, NFA};

fn dictionary_nfa(words: &[&str]) -> NFA<char> {
    let mut builder = NFABuilder::new();
    let accept = builder.add_state(None);

    let mut entries = Vec::with_capacity(words.len());
    for word in words {
        let mut next = accept;
        for symbol in word.chars().rev() {
            let state = builder.add_state(Some(symbol));
            builder.set_edge1(state, next);
            next = state;
        }
        entries.push(next);
    }

    let mut entry = entries.pop().expect("at least one word");
    while let Some(other) = entries.pop() {
        let fork = builder.add_state(None);
        builder.set_edge1(fork, entry);
        builder.set_edge2(fork, other);
        entry = fork;
    }

    builder.finish(entry, accept).expect("well-formed dictionary")
}

fn main() {
    let dictionary = &["a", "ab", "bab", "bc", "bca", "c", "caa"];
    let dfa = nfa_to_dfa(&dictionary_nfa(dictionary));

    for (i, state) in dfa.states().iter().enumerate() {
        print!("{} -> [", i);
        let mut transitions: Vec<_> = state.transitions().iter().collect();
        transitions.sort();
        if !transitions.is_empty() {
            println!();
        }
        for (symbol, to) in transitions {
            println!("  {} -> {},", symbol, to);
        }
        print!("]");
        if dfa.is_accepting(i) {
            print!(" -- final state");
        }
        println!(",");
    }
}
