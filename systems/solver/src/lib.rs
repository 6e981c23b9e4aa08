#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shortest accepting word search over a compiled automaton.
//!
//! The solver is a pure query system: it walks the frozen transition table
//! breadth first and reconstructs the first accepting word it reaches from
//! parent links. FIFO expansion plus the fixed alphabet order makes the
//! result the lexicographically smallest of the shortest words, so repeated
//! runs over equal automata return identical sequences.

use std::collections::VecDeque;

use log::{debug, trace};
use maze_lab_automaton::{Automaton, StepError};
use maze_lab_core::{AutomatonState, Symbol};

/// Finds the shortest input word driving the automaton from its initial
/// state into an accepting state.
///
/// Returns the empty word when the initial state already accepts, and
/// `None` when the frontier drains without reaching an accepting state,
/// which is a normal outcome rather than an error. Sink successors are
/// never expanded; nothing accepting lies beyond them.
#[must_use]
pub fn shortest_accepting_word(automaton: &Automaton) -> Option<Vec<Symbol>> {
    let state_count = automaton.state_count();
    let alphabet_len = automaton.alphabet().len();

    let mut visited = vec![false; state_count];
    let mut parents: Vec<Option<(usize, usize)>> = vec![None; state_count];
    let mut frontier = VecDeque::new();

    let initial_index = automaton.initial_index();
    if let Some(seen) = visited.get_mut(initial_index) {
        *seen = true;
    }
    frontier.push_back(initial_index);

    let mut expanded = 0usize;
    while let Some(state_index) = frontier.pop_front() {
        let Some(state) = automaton.states().get(state_index) else {
            continue;
        };
        if automaton.is_accepting(state) {
            let word = reconstruct(automaton, &parents, state_index);
            debug!(
                "accepting word of length {} found after expanding {} states",
                word.len(),
                expanded
            );
            return Some(word);
        }

        trace!("expanding state {state_index}");
        expanded += 1;

        for symbol_index in 0..alphabet_len {
            let Some(successor_index) = automaton.successor(state_index, symbol_index) else {
                continue;
            };
            let Some(successor) = automaton.states().get(successor_index) else {
                continue;
            };
            if successor.is_sink() {
                continue;
            }
            let Some(seen) = visited.get_mut(successor_index) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;
            parents[successor_index] = Some((state_index, symbol_index));
            frontier.push_back(successor_index);
        }
    }

    debug!("frontier drained after expanding {expanded} states; no accepting word exists");
    None
}

/// Replays a word from the initial state, returning the state it ends in.
pub fn run_word(automaton: &Automaton, word: &[Symbol]) -> Result<AutomatonState, StepError> {
    let mut state = automaton.initial_state();
    for &symbol in word {
        state = automaton.step(&state, symbol)?;
    }
    Ok(state)
}

fn reconstruct(
    automaton: &Automaton,
    parents: &[Option<(usize, usize)>],
    final_index: usize,
) -> Vec<Symbol> {
    let mut word = Vec::new();
    let mut cursor = final_index;
    while let Some((parent_index, symbol_index)) = parents.get(cursor).copied().flatten() {
        if let Some(&symbol) = automaton.alphabet().get(symbol_index) {
            word.push(symbol);
        }
        cursor = parent_index;
    }
    word.reverse();
    word
}
