//! Column-choosing strategies for automated play.
//!
//! Every strategy returns a 1-based column number, the same form a human player types,
//! or `None` when the board has no valid column.
use crate::engine::{Board, Color};
use rand::seq::SliceRandom;
use rand::Rng;

/// All 1-based columns that currently accept a tile.
pub fn valid_columns(board: &Board) -> Vec<usize> {
    (1..=board.width())
        .filter(|&column| board.is_valid_column(column))
        .collect()
}

/// Counts the empty cells in `column` (0-based).
///
/// This is how many more tiles the column can take before it is full, as long as no
/// horizontal clear has left a gap in it.
pub fn open_cells(board: &Board, column: usize) -> usize {
    (0..board.height())
        .filter(|&row| board.cell_at(row, column).is_empty())
        .count()
}

/// Picks a valid column uniformly at random.
pub fn choose_column_random(board: &Board, rng: &mut impl Rng) -> Option<usize> {
    valid_columns(board).choose(rng).copied()
}

/// Chooses the column whose drop clears the most cells (Maximize Immediate Clear).
///
/// Each valid column is simulated on a copy of the board. Ties go to the leftmost column.
pub fn choose_column_max_clear(board: &Board, tile: Color) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;

    for column in valid_columns(board) {
        let mut sim = board.clone();
        let Ok(placement) = sim.drop_tile(tile, column - 1) else {
            continue;
        };
        let cleared = placement.cleared.len();
        if best.map_or(true, |(_, best_cleared)| cleared > best_cleared) {
            best = Some((column, cleared));
        }
    }
    best.map(|(column, _)| column)
}

/// Like `choose_column_max_clear`, but breaks ties by keeping the most room in the
/// chosen column, which delays filling the floor row.
pub fn choose_column_floor_guard(board: &Board, tile: Color) -> Option<usize> {
    let mut best: Option<(usize, (usize, usize))> = None;

    for column in valid_columns(board) {
        let mut sim = board.clone();
        let Ok(placement) = sim.drop_tile(tile, column - 1) else {
            continue;
        };
        let key = (placement.cleared.len(), open_cells(&sim, column - 1));
        if best.map_or(true, |(_, best_key)| key > best_key) {
            best = Some((column, key));
        }
    }
    best.map(|(column, _)| column)
}

/// The strategies available to the self-play evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Random,
    MaxClear,
    FloorGuard,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Random, Strategy::MaxClear, Strategy::FloorGuard];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Random => "RANDOM",
            Strategy::MaxClear => "MAXCLEAR",
            Strategy::FloorGuard => "FLOORGUARD",
        }
    }

    /// Chooses a 1-based column for `tile`. `rng` is only used by `Strategy::Random`.
    pub fn choose(self, board: &Board, tile: Color, rng: &mut impl Rng) -> Option<usize> {
        match self {
            Strategy::Random => choose_column_random(board, rng),
            Strategy::MaxClear => choose_column_max_clear(board, tile),
            Strategy::FloorGuard => choose_column_floor_guard(board, tile),
        }
    }
}
