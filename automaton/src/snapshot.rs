//! Serializable snapshot of a compiled automaton.
//!
//! External visualizers consume the automaton as plain data: every state
//! keyed by a stable text id, the complete transition table, the alphabet,
//! and the level geometry needed to draw the maze around it. Alive states
//! get the id `"column,row|mask"` with the mask in decimal; the sinks get
//! `"trapped"` and `"dead"`, so tuple ids and sink ids can never collide.

use std::collections::BTreeMap;

use maze_lab_core::{AutomatonState, CellCoord};
use serde::{Deserialize, Serialize};

use crate::Automaton;

/// Identifier-keyed export form of a compiled automaton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonSnapshot {
    /// Id of the initial state.
    pub initial: String,
    /// Ids of every accepting state, sorted.
    pub accepting: Vec<String>,
    /// Alphabet in canonical order, one single-letter string per symbol.
    pub alphabet: Vec<String>,
    /// Target state id per state id and symbol letter.
    pub transitions: BTreeMap<String, BTreeMap<String, String>>,
    /// Static level facts the automaton was compiled from.
    pub geometry: GeometrySnapshot,
}

/// Static level facts included with the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// Number of columns in the level.
    pub width: u32,
    /// Number of rows in the level.
    pub height: u32,
    /// Cell the agent starts on.
    pub start: CellCoord,
    /// Goal cell acceptance was conditioned on, if any.
    pub goal: Option<CellCoord>,
    /// Wall cells in row-major order.
    pub walls: Vec<CellCoord>,
    /// Hazard cells in row-major order.
    pub hazards: Vec<CellCoord>,
    /// Item cells in mask-bit order.
    pub items: Vec<CellCoord>,
}

impl AutomatonSnapshot {
    /// Captures the export form of the provided automaton.
    ///
    /// Both maps are ordered, so serializing the same automaton twice
    /// produces identical output.
    #[must_use]
    pub fn capture(automaton: &Automaton) -> Self {
        let mut accepting: Vec<String> = automaton
            .states()
            .iter()
            .filter(|state| automaton.is_accepting(state))
            .map(state_id)
            .collect();
        accepting.sort();

        let mut transitions = BTreeMap::new();
        for (state_index, state) in automaton.states().iter().enumerate() {
            let mut row = BTreeMap::new();
            for (symbol_index, symbol) in automaton.alphabet().iter().enumerate() {
                let target = automaton
                    .successor(state_index, symbol_index)
                    .and_then(|target_index| automaton.states().get(target_index));
                if let Some(target) = target {
                    let _ = row.insert(symbol.letter().to_string(), state_id(target));
                }
            }
            let _ = transitions.insert(state_id(state), row);
        }

        let geometry = automaton.geometry();
        Self {
            initial: state_id(&automaton.initial_state()),
            accepting,
            alphabet: automaton
                .alphabet()
                .iter()
                .map(|symbol| symbol.letter().to_string())
                .collect(),
            transitions,
            geometry: GeometrySnapshot {
                width: geometry.width(),
                height: geometry.height(),
                start: geometry.start(),
                goal: automaton.goal(),
                walls: geometry.walls().collect(),
                hazards: geometry.hazards().collect(),
                items: geometry.items().to_vec(),
            },
        }
    }
}

/// Stable text id of a state.
#[must_use]
pub fn state_id(state: &AutomatonState) -> String {
    match state {
        AutomatonState::Alive { cell, items } => {
            format!("{},{}|{}", cell.column(), cell.row(), items.bits())
        }
        AutomatonState::Trapped => String::from("trapped"),
        AutomatonState::Dead => String::from("dead"),
    }
}
