#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Lab engine.
//!
//! This crate defines the vocabulary that connects the grid parser, the
//! automaton compiler, the solver system, and the adapters: cell coordinates,
//! move directions, input symbols, the collectible-item bitmask, the closed
//! set of automaton state variants, and the build-time configuration record.
//! Everything here is a plain immutable value; behavior lives in the crates
//! that consume it.

use serde::{Deserialize, Serialize};

/// Maximum number of collectible items a level may contain.
///
/// Item masks are stored in a 64-bit word, one bit per item, so levels with
/// more items than this cannot be represented and are rejected at parse time.
pub const MAX_ITEMS: u32 = 64;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Cardinal movement directions forming the base input alphabet.
///
/// Declaration order is the canonical alphabet order. The builder records
/// transitions and the solver expands successors in this order, which fixes
/// which of several equal-length winning words a query returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in canonical alphabet order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Applies the direction's unit offset to the provided cell.
    ///
    /// Returns `None` when the offset would push a coordinate below zero;
    /// callers treat that exactly like any other out-of-bounds target.
    /// Targets past the far edges stay representable and are left to the
    /// caller's bounds check.
    #[must_use]
    pub fn step_from(self, cell: CellCoord) -> Option<CellCoord> {
        match self {
            Direction::North => cell
                .row()
                .checked_sub(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Direction::East => cell
                .column()
                .checked_add(1)
                .map(|column| CellCoord::new(column, cell.row())),
            Direction::South => cell
                .row()
                .checked_add(1)
                .map(|row| CellCoord::new(cell.column(), row)),
            Direction::West => cell
                .column()
                .checked_sub(1)
                .map(|column| CellCoord::new(column, cell.row())),
        }
    }

    /// Single-letter text form used by the command loop and the export layer.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }
}

/// Input symbol accepted by a compiled automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    /// Step one cell in the given direction.
    Move(Direction),
    /// Restart from the initial state; only present when configured.
    Reset,
}

impl Symbol {
    /// Single-letter text form: the direction letter, or `R` for reset.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Symbol::Move(direction) => direction.letter(),
            Symbol::Reset => 'R',
        }
    }

    /// Parses a symbol from its single-letter form, case-insensitively.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Symbol::Move(Direction::North)),
            'E' => Some(Symbol::Move(Direction::East)),
            'S' => Some(Symbol::Move(Direction::South)),
            'W' => Some(Symbol::Move(Direction::West)),
            'R' => Some(Symbol::Reset),
            _ => None,
        }
    }
}

/// Bitmask tracking which collectible items remain uncollected.
///
/// Bit *i* set means item *i* is still on the board. Along any run of move
/// symbols the mask only ever loses bits; the reset symbol restarts from the
/// initial state rather than restoring bits into the current one.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ItemMask(u64);

impl ItemMask {
    /// Mask with every item collected.
    pub const EMPTY: ItemMask = ItemMask(0);

    /// Creates a mask with the lowest `count` bits set.
    #[must_use]
    pub const fn full(count: u32) -> Self {
        if count == 0 {
            ItemMask(0)
        } else if count >= MAX_ITEMS {
            ItemMask(u64::MAX)
        } else {
            ItemMask((1u64 << count) - 1)
        }
    }

    /// Reconstructs a mask from its raw bit representation.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        ItemMask(bits)
    }

    /// Raw bit representation, bit *i* for item *i*.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Reports whether the item with the provided index is still uncollected.
    #[must_use]
    pub const fn contains(self, index: u32) -> bool {
        index < MAX_ITEMS && (self.0 >> index) & 1 == 1
    }

    /// Returns the mask with the item at `index` collected.
    ///
    /// Clearing an already-clear bit is a no-op, so revisiting an emptied
    /// cell leaves the mask unchanged.
    #[must_use]
    pub const fn without(self, index: u32) -> Self {
        if index >= MAX_ITEMS {
            self
        } else {
            ItemMask(self.0 & !(1u64 << index))
        }
    }

    /// Number of items still uncollected.
    #[must_use]
    pub const fn remaining(self) -> u32 {
        self.0.count_ones()
    }

    /// Reports whether every item has been collected.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Reports whether every bit set here is also set in `other`.
    #[must_use]
    pub const fn is_subset_of(self, other: ItemMask) -> bool {
        self.0 & !other.0 == 0
    }
}

/// State of a compiled maze automaton.
///
/// `Alive` states are identified by their field values alone; the two sink
/// variants are absorbing terminals that no move symbol can leave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomatonState {
    /// The agent stands on `cell` with the items in `items` still uncollected.
    Alive {
        /// Cell currently occupied.
        cell: CellCoord,
        /// Items still present on the board.
        items: ItemMask,
    },
    /// Absorbing state entered by a blocked move under the trap policy.
    Trapped,
    /// Absorbing state entered by stepping onto a hazard cell.
    Dead,
}

impl AutomatonState {
    /// Reports whether the state is one of the absorbing sinks.
    #[must_use]
    pub const fn is_sink(&self) -> bool {
        matches!(self, AutomatonState::Trapped | AutomatonState::Dead)
    }

    /// Returns the cell and mask of an `Alive` state.
    #[must_use]
    pub const fn as_alive(&self) -> Option<(CellCoord, ItemMask)> {
        match self {
            AutomatonState::Alive { cell, items } => Some((*cell, *items)),
            AutomatonState::Trapped | AutomatonState::Dead => None,
        }
    }
}

/// Outcome applied when a move targets a wall or leaves the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockedPolicy {
    /// The move is absorbed and the state is unchanged.
    Bounce,
    /// The move is fatal and the automaton enters the trapped sink.
    Trap,
}

/// Configuration record fixed once per automaton build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    blocked_policy: BlockedPolicy,
    require_goal: bool,
    reset_symbol: bool,
}

impl BuildOptions {
    /// Creates a configuration record from its three decisions.
    #[must_use]
    pub const fn new(blocked_policy: BlockedPolicy, require_goal: bool, reset_symbol: bool) -> Self {
        Self {
            blocked_policy,
            require_goal,
            reset_symbol,
        }
    }

    /// Policy applied when a move targets a wall or leaves the grid.
    #[must_use]
    pub const fn blocked_policy(&self) -> BlockedPolicy {
        self.blocked_policy
    }

    /// Whether a goal cell present in the map must be occupied to accept.
    #[must_use]
    pub const fn require_goal(&self) -> bool {
        self.require_goal
    }

    /// Whether the reset symbol is part of the alphabet.
    #[must_use]
    pub const fn reset_symbol(&self) -> bool {
        self.reset_symbol
    }

    /// The automaton's input alphabet in canonical order.
    ///
    /// The four move symbols always come first, in [`Direction::ALL`] order;
    /// the reset symbol, when configured, comes last.
    #[must_use]
    pub fn alphabet(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = Direction::ALL.into_iter().map(Symbol::Move).collect();
        if self.reset_symbol {
            symbols.push(Symbol::Reset);
        }
        symbols
    }
}

impl Default for BuildOptions {
    /// Bounce off blocked cells, honor a goal cell when the map has one, and
    /// keep the alphabet to the four move symbols.
    fn default() -> Self {
        Self {
            blocked_policy: BlockedPolicy::Bounce,
            require_goal: true,
            reset_symbol: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AutomatonState, BlockedPolicy, BuildOptions, CellCoord, Direction, ItemMask, Symbol,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 3));
    }

    #[test]
    fn automaton_state_round_trips_through_bincode() {
        assert_round_trip(&AutomatonState::Alive {
            cell: CellCoord::new(2, 5),
            items: ItemMask::full(3),
        });
        assert_round_trip(&AutomatonState::Trapped);
        assert_round_trip(&AutomatonState::Dead);
    }

    #[test]
    fn build_options_round_trip_through_bincode() {
        assert_round_trip(&BuildOptions::new(BlockedPolicy::Trap, false, true));
    }

    #[test]
    fn step_from_applies_unit_offsets() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            Direction::North.step_from(origin),
            Some(CellCoord::new(3, 2))
        );
        assert_eq!(Direction::East.step_from(origin), Some(CellCoord::new(4, 3)));
        assert_eq!(
            Direction::South.step_from(origin),
            Some(CellCoord::new(3, 4))
        );
        assert_eq!(Direction::West.step_from(origin), Some(CellCoord::new(2, 3)));
    }

    #[test]
    fn step_from_reports_underflow_as_none() {
        assert_eq!(Direction::North.step_from(CellCoord::new(0, 0)), None);
        assert_eq!(Direction::West.step_from(CellCoord::new(0, 4)), None);
    }

    #[test]
    fn symbol_letters_round_trip() {
        for symbol in [
            Symbol::Move(Direction::North),
            Symbol::Move(Direction::East),
            Symbol::Move(Direction::South),
            Symbol::Move(Direction::West),
            Symbol::Reset,
        ] {
            assert_eq!(Symbol::from_letter(symbol.letter()), Some(symbol));
            assert_eq!(
                Symbol::from_letter(symbol.letter().to_ascii_lowercase()),
                Some(symbol)
            );
        }
        assert_eq!(Symbol::from_letter('X'), None);
    }

    #[test]
    fn full_mask_sets_exactly_the_requested_bits() {
        assert_eq!(ItemMask::full(0), ItemMask::EMPTY);
        assert_eq!(ItemMask::full(3).bits(), 0b111);
        assert_eq!(ItemMask::full(64).bits(), u64::MAX);
        assert_eq!(ItemMask::full(3).remaining(), 3);
    }

    #[test]
    fn without_clears_idempotently() {
        let mask = ItemMask::full(4);
        let collected = mask.without(2);
        assert!(!collected.contains(2));
        assert_eq!(collected.without(2), collected);
        assert_eq!(collected.remaining(), 3);
        assert!(collected.is_subset_of(mask));
        assert!(!mask.is_subset_of(collected));
    }

    #[test]
    fn empty_mask_is_subset_of_everything() {
        assert!(ItemMask::EMPTY.is_subset_of(ItemMask::full(5)));
        assert!(ItemMask::EMPTY.is_empty());
    }

    #[test]
    fn sink_states_report_as_sinks() {
        assert!(AutomatonState::Trapped.is_sink());
        assert!(AutomatonState::Dead.is_sink());
        let alive = AutomatonState::Alive {
            cell: CellCoord::new(1, 1),
            items: ItemMask::EMPTY,
        };
        assert!(!alive.is_sink());
        assert_eq!(
            alive.as_alive(),
            Some((CellCoord::new(1, 1), ItemMask::EMPTY))
        );
        assert_eq!(AutomatonState::Dead.as_alive(), None);
    }

    #[test]
    fn default_options_bounce_and_honor_goals() {
        let options = BuildOptions::default();
        assert_eq!(options.blocked_policy(), BlockedPolicy::Bounce);
        assert!(options.require_goal());
        assert!(!options.reset_symbol());
    }

    #[test]
    fn alphabet_orders_moves_first_and_reset_last() {
        let plain = BuildOptions::default().alphabet();
        assert_eq!(
            plain,
            vec![
                Symbol::Move(Direction::North),
                Symbol::Move(Direction::East),
                Symbol::Move(Direction::South),
                Symbol::Move(Direction::West),
            ]
        );

        let with_reset = BuildOptions::new(BlockedPolicy::Bounce, true, true).alphabet();
        assert_eq!(with_reset.len(), 5);
        assert_eq!(with_reset.last(), Some(&Symbol::Reset));
    }
}
