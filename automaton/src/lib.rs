#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Automaton compilation for Maze Lab levels.
//!
//! [`build`] explores the reachable state space of a parsed level breadth
//! first and freezes it into an [`Automaton`]: a total transition table over
//! the configured alphabet plus the acceptance predicate. States pair a cell
//! with the mask of items still uncollected, so the reachable set stays
//! bounded by `width * height * 2^item_count` alive states and two sinks.
//! The [`snapshot`] module serializes a compiled automaton for external
//! visualizers.

mod builder;
pub mod snapshot;
mod transition;

pub use crate::builder::build;

use std::collections::HashMap;

use maze_lab_core::{AutomatonState, BuildOptions, CellCoord, Symbol};
use maze_lab_grid::LevelGeometry;
use thiserror::Error;

/// Errors returned by [`Automaton::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum StepError {
    /// The symbol is not part of the automaton's alphabet.
    #[error("symbol '{}' is outside the automaton's alphabet", .symbol.letter())]
    UnknownSymbol {
        /// Symbol that was rejected.
        symbol: Symbol,
    },
    /// The state does not belong to the automaton's reachable state set.
    #[error("state does not belong to the automaton")]
    UnknownState,
}

/// Compiled deterministic automaton for one level and one configuration.
///
/// The transition table is frozen at build time as one dense row per state
/// in discovery order, one entry per alphabet symbol. Nothing mutates after
/// construction; every query borrows immutably.
#[derive(Clone, Debug)]
pub struct Automaton {
    geometry: LevelGeometry,
    options: BuildOptions,
    goal: Option<CellCoord>,
    alphabet: Vec<Symbol>,
    states: Vec<AutomatonState>,
    index_of: HashMap<AutomatonState, usize>,
    table: Vec<usize>,
}

impl Automaton {
    pub(crate) fn from_parts(
        geometry: LevelGeometry,
        options: BuildOptions,
        goal: Option<CellCoord>,
        alphabet: Vec<Symbol>,
        states: Vec<AutomatonState>,
        index_of: HashMap<AutomatonState, usize>,
        table: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(table.len(), states.len() * alphabet.len());
        Self {
            geometry,
            options,
            goal,
            alphabet,
            states,
            index_of,
            table,
        }
    }

    /// Level geometry the automaton was compiled from.
    #[must_use]
    pub const fn geometry(&self) -> &LevelGeometry {
        &self.geometry
    }

    /// Configuration the automaton was compiled with.
    #[must_use]
    pub const fn options(&self) -> BuildOptions {
        self.options
    }

    /// Goal cell acceptance is conditioned on, if any.
    ///
    /// `None` either because the map has no goal cell or because the build
    /// was configured to ignore it.
    #[must_use]
    pub const fn goal(&self) -> Option<CellCoord> {
        self.goal
    }

    /// Input alphabet in canonical order.
    #[must_use]
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// Every reachable state in discovery order.
    #[must_use]
    pub fn states(&self) -> &[AutomatonState] {
        &self.states
    }

    /// Number of reachable states, sinks included.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// The `Alive` state at the start cell with the full item mask.
    #[must_use]
    pub fn initial_state(&self) -> AutomatonState {
        transition::initial_state(&self.geometry)
    }

    /// Index of the initial state in [`Automaton::states`].
    ///
    /// The builder interns the initial state before anything else, so this
    /// is always the first row of the table.
    #[must_use]
    pub const fn initial_index(&self) -> usize {
        0
    }

    /// Index of the provided state, when it is reachable.
    #[must_use]
    pub fn state_index(&self, state: &AutomatonState) -> Option<usize> {
        self.index_of.get(state).copied()
    }

    /// Index of the provided symbol within the alphabet.
    #[must_use]
    pub fn symbol_index(&self, symbol: Symbol) -> Option<usize> {
        self.alphabet.iter().position(|entry| *entry == symbol)
    }

    /// Successor index recorded for a state row and symbol column.
    #[must_use]
    pub fn successor(&self, state_index: usize, symbol_index: usize) -> Option<usize> {
        if symbol_index >= self.alphabet.len() {
            return None;
        }
        let offset = state_index
            .checked_mul(self.alphabet.len())?
            .checked_add(symbol_index)?;
        self.table.get(offset).copied()
    }

    /// Applies one input symbol to a state.
    ///
    /// Rejects symbols outside the alphabet and states the automaton never
    /// discovered; swallowing either is left to wrapping policy layers such
    /// as the interactive command loop.
    pub fn step(&self, state: &AutomatonState, symbol: Symbol) -> Result<AutomatonState, StepError> {
        let symbol_index = self
            .symbol_index(symbol)
            .ok_or(StepError::UnknownSymbol { symbol })?;
        let state_index = self.state_index(state).ok_or(StepError::UnknownState)?;
        self.successor(state_index, symbol_index)
            .and_then(|index| self.states.get(index).copied())
            .ok_or(StepError::UnknownState)
    }

    /// Reports whether the state satisfies the win condition: alive, every
    /// item collected, and standing on the goal cell when one is required.
    #[must_use]
    pub fn is_accepting(&self, state: &AutomatonState) -> bool {
        match state.as_alive() {
            Some((cell, items)) => {
                items.is_empty() && self.goal.map_or(true, |goal| cell == goal)
            }
            None => false,
        }
    }
}
