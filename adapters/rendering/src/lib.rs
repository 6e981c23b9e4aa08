#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Textual presentation of levels and automaton states.
//!
//! The renderer consumes only the read surface the engine exports: level
//! geometry queries plus a single automaton state value. [`base_grid`]
//! reproduces the static map; [`frame`] overlays the agent position and the
//! items its mask still holds, and falls back to the bare grid with a
//! terminal banner once a run has sunk.

use maze_lab_core::{AutomatonState, CellCoord, ItemMask};
use maze_lab_grid::{LevelGeometry, Tile};

const LEGEND: &str = "legend: P agent  # wall  G hazard  . item  E goal";

/// Renders the static map exactly as parsed, rows padded to full width.
#[must_use]
pub fn base_grid(geometry: &LevelGeometry) -> String {
    let mut lines = Vec::new();
    for row in 0..geometry.height() {
        let mut line = String::new();
        for column in 0..geometry.width() {
            let tile = geometry
                .tile(CellCoord::new(column, row))
                .unwrap_or(Tile::Floor);
            line.push(tile.symbol());
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Renders one automaton state on top of the level.
///
/// Alive states draw the agent as `P`, keep the vacated start cell visible
/// as `S`, and show an item only while the state's mask still holds its
/// bit; a status line and the legend follow the grid. Sink states render
/// the bare grid with a banner naming the way the run ended.
#[must_use]
pub fn frame(geometry: &LevelGeometry, state: &AutomatonState) -> String {
    match state.as_alive() {
        Some((agent, items)) => alive_frame(geometry, agent, items),
        None => {
            let banner = match state {
                AutomatonState::Trapped => "trapped: the last move was blocked",
                _ => "dead: the agent stepped onto a hazard",
            };
            format!("{}\n{banner}", base_grid(geometry))
        }
    }
}

fn alive_frame(geometry: &LevelGeometry, agent: CellCoord, items: ItemMask) -> String {
    let mut lines = Vec::new();
    for row in 0..geometry.height() {
        let mut line = String::new();
        for column in 0..geometry.width() {
            let cell = CellCoord::new(column, row);
            line.push(cell_symbol(geometry, agent, items, cell));
        }
        lines.push(line);
    }
    lines.push(format!(
        "position ({}, {}), {} item(s) remaining",
        agent.column(),
        agent.row(),
        items.remaining()
    ));
    lines.push(String::from(LEGEND));
    lines.join("\n")
}

fn cell_symbol(
    geometry: &LevelGeometry,
    agent: CellCoord,
    items: ItemMask,
    cell: CellCoord,
) -> char {
    if cell == agent {
        return 'P';
    }
    match geometry.tile(cell) {
        Some(Tile::Item) => match geometry.item_index(cell) {
            Some(index) if items.contains(index) => '.',
            _ => ' ',
        },
        Some(tile) => tile.symbol(),
        None => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::{base_grid, frame};
    use maze_lab_core::{AutomatonState, CellCoord, ItemMask};
    use maze_lab_grid::parse;

    const MAP: &str = "#####\n#S.E#\n#G  #\n#####";

    #[test]
    fn base_grid_reproduces_the_padded_map() {
        let geometry = parse(MAP).expect("map parses");
        assert_eq!(base_grid(&geometry), "#####\n#S.E#\n#G  #\n#####");
    }

    #[test]
    fn base_grid_pads_ragged_rows() {
        let geometry = parse("S.\n####").expect("map parses");
        assert_eq!(base_grid(&geometry), "S.  \n####");
    }

    #[test]
    fn alive_frames_mark_the_agent_and_surviving_items() {
        let geometry = parse(MAP).expect("map parses");
        let state = AutomatonState::Alive {
            cell: geometry.start(),
            items: ItemMask::full(1),
        };
        let frame = frame(&geometry, &state);
        let mut lines = frame.lines();
        assert_eq!(lines.next(), Some("#####"));
        assert_eq!(lines.next(), Some("#P.E#"));
        assert_eq!(lines.next(), Some("#G  #"));
        assert_eq!(lines.next(), Some("#####"));
        assert_eq!(lines.next(), Some("position (1, 1), 1 item(s) remaining"));
    }

    #[test]
    fn vacated_start_stays_visible_and_collected_items_vanish() {
        let geometry = parse(MAP).expect("map parses");
        let state = AutomatonState::Alive {
            cell: CellCoord::new(2, 1),
            items: ItemMask::EMPTY,
        };
        let frame = frame(&geometry, &state);
        assert_eq!(frame.lines().nth(1), Some("#SPE#"));
        assert_eq!(
            frame.lines().nth(4),
            Some("position (2, 1), 0 item(s) remaining")
        );
    }

    #[test]
    fn sink_frames_show_the_bare_grid_and_a_banner() {
        let geometry = parse(MAP).expect("map parses");

        let dead = frame(&geometry, &AutomatonState::Dead);
        assert!(dead.starts_with("#####\n#S.E#"));
        assert!(dead.ends_with("dead: the agent stepped onto a hazard"));

        let trapped = frame(&geometry, &AutomatonState::Trapped);
        assert!(trapped.ends_with("trapped: the last move was blocked"));
    }
}
