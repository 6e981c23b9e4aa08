//! Single-step transition rules.
//!
//! [`delta`] is the total function the builder tabulates: defined for every
//! state and every symbol, sinks included, and it never errors. Alphabet
//! membership is enforced one layer up by [`crate::Automaton::step`].

use maze_lab_core::{AutomatonState, BlockedPolicy, BuildOptions, Direction, ItemMask, Symbol};
use maze_lab_grid::LevelGeometry;

/// The `Alive` state at the start cell with the full item mask.
pub(crate) fn initial_state(geometry: &LevelGeometry) -> AutomatonState {
    AutomatonState::Alive {
        cell: geometry.start(),
        items: ItemMask::full(geometry.item_count()),
    }
}

/// Applies one input symbol to one state.
///
/// The reset symbol restarts from the initial state regardless of the
/// current one; move symbols absorb into sinks, bounce or trap on blocked
/// targets per the configured policy, kill on hazard cells, and collect an
/// item when the target cell still holds one.
pub(crate) fn delta(
    geometry: &LevelGeometry,
    options: &BuildOptions,
    state: AutomatonState,
    symbol: Symbol,
) -> AutomatonState {
    match symbol {
        Symbol::Reset => initial_state(geometry),
        Symbol::Move(direction) => apply_move(geometry, options, state, direction),
    }
}

fn apply_move(
    geometry: &LevelGeometry,
    options: &BuildOptions,
    state: AutomatonState,
    direction: Direction,
) -> AutomatonState {
    let AutomatonState::Alive { cell, items } = state else {
        return state;
    };

    let target = direction
        .step_from(cell)
        .filter(|target| geometry.in_bounds(*target) && !geometry.is_wall(*target));
    let Some(target) = target else {
        return match options.blocked_policy() {
            BlockedPolicy::Bounce => state,
            BlockedPolicy::Trap => AutomatonState::Trapped,
        };
    };

    // Hazard collision overrides item logic on the target cell.
    if geometry.is_hazard(target) {
        return AutomatonState::Dead;
    }

    let items = match geometry.item_index(target) {
        Some(index) => items.without(index),
        None => items,
    };
    AutomatonState::Alive {
        cell: target,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::{delta, initial_state};
    use maze_lab_core::{
        AutomatonState, BlockedPolicy, BuildOptions, CellCoord, Direction, ItemMask, Symbol,
    };
    use maze_lab_grid::{parse, LevelGeometry};

    fn geometry() -> LevelGeometry {
        parse("#####\n#S.G#\n#####").expect("map parses")
    }

    fn alive(column: u32, row: u32, items: ItemMask) -> AutomatonState {
        AutomatonState::Alive {
            cell: CellCoord::new(column, row),
            items,
        }
    }

    #[test]
    fn moving_onto_an_item_clears_its_bit() {
        let geometry = geometry();
        let options = BuildOptions::default();
        let after = delta(
            &geometry,
            &options,
            initial_state(&geometry),
            Symbol::Move(Direction::East),
        );
        assert_eq!(after, alive(2, 1, ItemMask::EMPTY));
    }

    #[test]
    fn revisiting_a_collected_cell_keeps_the_mask() {
        let geometry = geometry();
        let options = BuildOptions::default();
        let emptied = alive(1, 1, ItemMask::EMPTY);
        let after = delta(&geometry, &options, emptied, Symbol::Move(Direction::East));
        assert_eq!(after, alive(2, 1, ItemMask::EMPTY));
    }

    #[test]
    fn blocked_moves_bounce_under_the_default_policy() {
        let geometry = geometry();
        let options = BuildOptions::default();
        let start = initial_state(&geometry);
        assert_eq!(
            delta(&geometry, &options, start, Symbol::Move(Direction::North)),
            start
        );
        assert_eq!(
            delta(&geometry, &options, start, Symbol::Move(Direction::West)),
            start
        );
    }

    #[test]
    fn blocked_moves_trap_under_the_strict_policy() {
        let geometry = geometry();
        let options = BuildOptions::new(BlockedPolicy::Trap, true, false);
        let start = initial_state(&geometry);
        assert_eq!(
            delta(&geometry, &options, start, Symbol::Move(Direction::North)),
            AutomatonState::Trapped
        );
    }

    #[test]
    fn out_of_bounds_counts_as_blocked() {
        let geometry = parse("S").expect("map parses");
        let trap = BuildOptions::new(BlockedPolicy::Trap, true, false);
        let bounce = BuildOptions::default();
        let start = initial_state(&geometry);
        assert_eq!(
            delta(&geometry, &trap, start, Symbol::Move(Direction::North)),
            AutomatonState::Trapped
        );
        assert_eq!(
            delta(&geometry, &bounce, start, Symbol::Move(Direction::East)),
            start
        );
    }

    #[test]
    fn stepping_onto_a_hazard_is_fatal() {
        let geometry = geometry();
        let options = BuildOptions::default();
        let beside_hazard = alive(2, 1, ItemMask::EMPTY);
        assert_eq!(
            delta(
                &geometry,
                &options,
                beside_hazard,
                Symbol::Move(Direction::East)
            ),
            AutomatonState::Dead
        );
    }

    #[test]
    fn sinks_absorb_every_move_symbol() {
        let geometry = geometry();
        let options = BuildOptions::default();
        for sink in [AutomatonState::Trapped, AutomatonState::Dead] {
            for direction in Direction::ALL {
                assert_eq!(
                    delta(&geometry, &options, sink, Symbol::Move(direction)),
                    sink
                );
            }
        }
    }

    #[test]
    fn reset_restarts_from_the_initial_state_everywhere() {
        let geometry = geometry();
        let options = BuildOptions::new(BlockedPolicy::Bounce, true, true);
        let initial = initial_state(&geometry);
        for state in [
            alive(2, 1, ItemMask::EMPTY),
            AutomatonState::Trapped,
            AutomatonState::Dead,
            initial,
        ] {
            assert_eq!(delta(&geometry, &options, state, Symbol::Reset), initial);
        }
    }
}
