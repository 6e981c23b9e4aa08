#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Map text parsing and the immutable level geometry it produces.
//!
//! The parser turns a plain-text maze into a [`LevelGeometry`] value: a dense
//! row-major tile store plus the derived facts the rest of the engine needs
//! (start cell, optional goal cell, item cells in their index order). Parsing
//! is a pure function and the geometry never changes afterwards; the
//! automaton compiler and the adapters only ever read it.

use maze_lab_core::{CellCoord, MAX_ITEMS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role a single cell plays in the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Traversable cell with nothing on it.
    Floor,
    /// Impassable cell.
    Wall,
    /// The cell the agent starts on.
    Start,
    /// Cell occupied by a stationary hazard; stepping on it is fatal.
    Hazard,
    /// Cell holding a collectible item.
    Item,
    /// Designated goal cell.
    Goal,
}

impl Tile {
    fn from_symbol(symbol: char) -> Self {
        match symbol {
            '#' => Tile::Wall,
            'S' => Tile::Start,
            'G' => Tile::Hazard,
            '.' => Tile::Item,
            'E' => Tile::Goal,
            _ => Tile::Floor,
        }
    }

    /// Character used for the tile in map text and rendered frames.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Tile::Floor => ' ',
            Tile::Wall => '#',
            Tile::Start => 'S',
            Tile::Hazard => 'G',
            Tile::Item => '.',
            Tile::Goal => 'E',
        }
    }
}

/// Reasons a map text cannot be turned into level geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// The input contained no rows at all.
    #[error("map text contains no rows")]
    EmptyGrid,
    /// No start cell was present anywhere in the map.
    #[error("map text contains no start cell")]
    MissingStart,
    /// More than one start cell was present.
    #[error("map text contains more than one start cell")]
    DuplicateStart,
    /// More than one goal cell was present.
    #[error("map text contains more than one goal cell")]
    DuplicateGoal,
    /// The map holds more items than an item mask can track.
    #[error("map text contains more than {} item cells", MAX_ITEMS)]
    TooManyItems,
    /// A map dimension does not fit a cell coordinate.
    #[error("map text is wider or taller than {} cells", u32::MAX)]
    OversizedGrid,
}

/// Immutable description of a parsed level.
///
/// Width and height are fixed at parse time; every row is padded to the full
/// width, so the tile store always holds `width * height` entries in
/// row-major order. Item cells keep their row-major scan order, which is the
/// order their mask bits are assigned in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGeometry {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    start: CellCoord,
    goal: Option<CellCoord>,
    items: Vec<CellCoord>,
}

impl LevelGeometry {
    /// Number of columns in the level.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the level.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cell the agent starts on.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Designated goal cell, when the map has one.
    #[must_use]
    pub const fn goal(&self) -> Option<CellCoord> {
        self.goal
    }

    /// Item cells in mask-bit order.
    #[must_use]
    pub fn items(&self) -> &[CellCoord] {
        &self.items
    }

    /// Number of items in the level.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        u32::try_from(self.items.len()).unwrap_or(MAX_ITEMS)
    }

    /// Reports whether the cell lies inside the level bounds.
    #[must_use]
    pub fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Tile at the provided cell, or `None` outside the bounds.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell).and_then(|index| self.tiles.get(index)).copied()
    }

    /// Reports whether the cell holds a wall. Out-of-bounds cells are not
    /// walls; callers check bounds separately.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        matches!(self.tile(cell), Some(Tile::Wall))
    }

    /// Reports whether the cell holds a hazard.
    #[must_use]
    pub fn is_hazard(&self, cell: CellCoord) -> bool {
        matches!(self.tile(cell), Some(Tile::Hazard))
    }

    /// Mask-bit index of the item on the provided cell, if any.
    #[must_use]
    pub fn item_index(&self, cell: CellCoord) -> Option<u32> {
        self.items
            .iter()
            .position(|candidate| *candidate == cell)
            .and_then(|index| u32::try_from(index).ok())
    }

    /// Iterator over all wall cells in row-major order.
    pub fn walls(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells_holding(Tile::Wall)
    }

    /// Iterator over all hazard cells in row-major order.
    pub fn hazards(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells_holding(Tile::Hazard)
    }

    fn cells_holding(&self, wanted: Tile) -> impl Iterator<Item = CellCoord> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, tile)| **tile == wanted)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index % width, index / width))
            })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.in_bounds(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Parses map text into level geometry.
///
/// One row per line; empty lines are dropped so embedded maps may carry
/// blank delimiters, while lines of spaces survive as floor rows. Uneven
/// rows are right-padded with floor to the widest row. Cell symbols: `#`
/// wall, `S` start (exactly one), `G` hazard, `.` item, `E` goal (at most
/// one); every other character is floor.
pub fn parse(text: &str) -> Result<LevelGeometry, ParseError> {
    let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
    if rows.is_empty() {
        return Err(ParseError::EmptyGrid);
    }

    let width = rows
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0);
    let mut tiles = Vec::with_capacity(width.saturating_mul(rows.len()));
    let mut start = None;
    let mut goal = None;
    let mut items = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        let mut columns = 0usize;
        for (column_index, symbol) in row.chars().enumerate() {
            let tile = Tile::from_symbol(symbol);
            let cell = cell_at(column_index, row_index)?;
            match tile {
                Tile::Start => {
                    if start.replace(cell).is_some() {
                        return Err(ParseError::DuplicateStart);
                    }
                }
                Tile::Goal => {
                    if goal.replace(cell).is_some() {
                        return Err(ParseError::DuplicateGoal);
                    }
                }
                Tile::Item => items.push(cell),
                Tile::Floor | Tile::Wall | Tile::Hazard => {}
            }
            tiles.push(tile);
            columns += 1;
        }
        tiles.extend(std::iter::repeat(Tile::Floor).take(width - columns));
    }

    let Some(start) = start else {
        return Err(ParseError::MissingStart);
    };
    if items.len() > usize::try_from(MAX_ITEMS).unwrap_or(usize::MAX) {
        return Err(ParseError::TooManyItems);
    }

    let width = u32::try_from(width).map_err(|_| ParseError::OversizedGrid)?;
    let height = u32::try_from(rows.len()).map_err(|_| ParseError::OversizedGrid)?;
    Ok(LevelGeometry {
        width,
        height,
        tiles,
        start,
        goal,
        items,
    })
}

fn cell_at(column: usize, row: usize) -> Result<CellCoord, ParseError> {
    let column = u32::try_from(column).map_err(|_| ParseError::OversizedGrid)?;
    let row = u32::try_from(row).map_err(|_| ParseError::OversizedGrid)?;
    Ok(CellCoord::new(column, row))
}
