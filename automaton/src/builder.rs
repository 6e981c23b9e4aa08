//! Breadth-first discovery of the reachable state space.

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};
use maze_lab_core::{AutomatonState, BuildOptions};
use maze_lab_grid::LevelGeometry;

use crate::{transition, Automaton};

/// Compiles the automaton for a level under the provided configuration.
///
/// Exploration starts from the initial state with a FIFO frontier. Each
/// state is interned and enqueued exactly once, and dequeuing a state
/// records its successor for every alphabet symbol, so the frozen table is
/// total over the reachable set. Sinks join the frontier like any other
/// newly discovered state; their rows are the absorbing self-loops the
/// transition rules already define. Termination follows from the reachable
/// `Alive` space being bounded by `width * height * 2^item_count`.
#[must_use]
pub fn build(geometry: LevelGeometry, options: BuildOptions) -> Automaton {
    let alphabet = options.alphabet();
    let goal = if options.require_goal() {
        geometry.goal()
    } else {
        None
    };

    let mut states = Vec::new();
    let mut index_of = HashMap::new();
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut frontier = VecDeque::new();

    let initial = transition::initial_state(&geometry);
    let (initial_index, _) = intern(&mut states, &mut index_of, &mut rows, initial);
    frontier.push_back(initial_index);

    while let Some(state_index) = frontier.pop_front() {
        let Some(&state) = states.get(state_index) else {
            continue;
        };
        trace!("expanding state {state_index}: {state:?}");

        let mut row = Vec::with_capacity(alphabet.len());
        for &symbol in &alphabet {
            let successor = transition::delta(&geometry, &options, state, symbol);
            let (successor_index, newly_discovered) =
                intern(&mut states, &mut index_of, &mut rows, successor);
            if newly_discovered {
                frontier.push_back(successor_index);
            }
            row.push(successor_index);
        }
        rows[state_index] = row;
    }

    let table: Vec<usize> = rows.into_iter().flatten().collect();
    debug!(
        "compiled automaton: {} states, {} transitions over {} symbols",
        states.len(),
        table.len(),
        alphabet.len()
    );
    Automaton::from_parts(geometry, options, goal, alphabet, states, index_of, table)
}

fn intern(
    states: &mut Vec<AutomatonState>,
    index_of: &mut HashMap<AutomatonState, usize>,
    rows: &mut Vec<Vec<usize>>,
    state: AutomatonState,
) -> (usize, bool) {
    if let Some(&index) = index_of.get(&state) {
        return (index, false);
    }

    let index = states.len();
    states.push(state);
    let _ = index_of.insert(state, index);
    rows.push(Vec::new());
    (index, true)
}

#[cfg(test)]
mod tests {
    use super::build;
    use maze_lab_core::{AutomatonState, BuildOptions};
    use maze_lab_grid::parse;

    #[test]
    fn interns_the_initial_state_first() {
        let geometry = parse("S.").expect("map parses");
        let automaton = build(geometry, BuildOptions::default());
        assert_eq!(
            automaton.states().first(),
            Some(&automaton.initial_state())
        );
        assert_eq!(automaton.state_index(&automaton.initial_state()), Some(0));
    }

    #[test]
    fn bounce_policy_never_discovers_the_trapped_sink() {
        let geometry = parse("S ").expect("map parses");
        let automaton = build(geometry, BuildOptions::default());
        assert_eq!(automaton.state_index(&AutomatonState::Trapped), None);
        assert_eq!(automaton.state_index(&AutomatonState::Dead), None);
    }

    #[test]
    fn every_row_is_complete_after_the_build() {
        let geometry = parse("#####\n#S.G#\n#   #\n#####").expect("map parses");
        let automaton = build(geometry, BuildOptions::default());
        for state_index in 0..automaton.state_count() {
            for symbol_index in 0..automaton.alphabet().len() {
                assert!(automaton.successor(state_index, symbol_index).is_some());
            }
        }
    }
}
