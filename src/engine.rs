//! Core game engine for the match-three puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Color` and `Cell`: the tile colors and the contents of one grid position.
//! - `Board`: the grid, with tile placement, run detection, clearing and outcome evaluation.
//! - `Game`: one session, owning a `Board` and the random generator that feeds it tiles.
//!
//! Tiles stack from the top row (row 0) toward the floor row (`height - 1`). A dropped
//! tile settles directly under the lowest occupied cell of its column, and a column whose
//! floor cell is taken is full. When every floor cell is taken the game is lost; when every
//! row above the floor is empty the game is won.
//!
//! Clearing a run only empties cells. Nothing shifts afterwards and the cleared cells are
//! not re-checked, so a horizontal clear can leave tiles hanging below a gap in the
//! neighbouring columns.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::config::GameConfig;
use crate::error::{ColumnError, EngineError};

/// Number of distinct tile colors the engine knows about.
pub const MAX_COLOR_TYPES: usize = 4;

/// Shortest run of same-colored tiles that gets cleared.
pub const MIN_RUN_LENGTH: usize = 3;

/// A tile color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    /// All colors, in the order they are enabled by `num_color_types`.
    pub const ALL: [Color; MAX_COLOR_TYPES] =
        [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// Draws a color uniformly from the first `num_color_types` colors.
    ///
    /// `num_color_types` must be in `1..=MAX_COLOR_TYPES`. Debug builds panic on anything
    /// else; release builds clamp it into that range. Every call is an independent draw.
    ///
    /// # Examples
    /// ```
    /// use match_three::engine::Color;
    /// use rand::{rngs::SmallRng, SeedableRng};
    ///
    /// let mut rng = SmallRng::seed_from_u64(1);
    /// assert_eq!(Color::random(&mut rng, 1), Color::Red);
    /// ```
    pub fn random(rng: &mut impl Rng, num_color_types: usize) -> Color {
        debug_assert!(
            (1..=MAX_COLOR_TYPES).contains(&num_color_types),
            "num_color_types ({}) must be in 1..={}",
            num_color_types,
            MAX_COLOR_TYPES
        );
        let n = num_color_types.clamp(1, MAX_COLOR_TYPES);
        Color::ALL[rng.gen_range(0..n)]
    }

    /// Position of this color in `Color::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts the color to its character representation.
    ///
    /// ```
    /// use match_three::engine::Color;
    /// assert_eq!(Color::Red.to_char(), 'R');
    /// assert_eq!(Color::Yellow.to_char(), 'Y');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }

    /// Returns the ANSI background color code for terminal output.
    fn to_ansi_color_code(self) -> &'static str {
        match self {
            Color::Red => "41",
            Color::Green => "42",
            Color::Yellow => "43",
            Color::Blue => "44",
        }
    }
}

/// The contents of one grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Colored(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The color held by this cell, if any.
    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Colored(color) => Some(*color),
        }
    }

    /// `'.'` for an empty cell, otherwise the color's letter.
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Colored(color) => color.to_char(),
        }
    }

    /// Inverse of `to_char`. Returns `None` for unrecognized characters.
    pub fn from_char(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Empty),
            'R' => Some(Cell::Colored(Color::Red)),
            'G' => Some(Cell::Colored(Color::Green)),
            'B' => Some(Cell::Colored(Color::Blue)),
            'Y' => Some(Cell::Colored(Color::Yellow)),
            _ => None,
        }
    }

    fn to_ansi_color_code(self) -> &'static str {
        match self {
            Cell::Empty => "40",
            Cell::Colored(color) => color.to_ansi_color_code(),
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        Cell::Colored(color)
    }
}

/// Result of evaluating a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

/// What happened during one drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Row the tile landed in (0-based).
    pub row: usize,
    /// Column the tile was dropped into (0-based).
    pub column: usize,
    /// Cells emptied by the drop, sorted row-major, without duplicates.
    pub cleared: Vec<(usize, usize)>,
}

/// The game grid.
///
/// Cells are stored row-major. Row 0 is the top, row `height - 1` is the floor row.
/// The only way to change a cell after construction is `drop_tile`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board for `config`, filling the seed rows with random colors.
    ///
    /// Runs of three or more produced by the seed fill are left in place unless
    /// `config.clear_seeded_runs` is set.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidConfiguration` if `config` fails `GameConfig::validate`.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Result<Self, EngineError> {
        config.validate()?;

        let mut cells = vec![Cell::Empty; config.height * config.width];
        for cell in cells.iter_mut().take(config.seed_rows * config.width) {
            *cell = Cell::Colored(Color::random(rng, config.num_color_types));
        }
        let mut board = Board {
            height: config.height,
            width: config.width,
            cells,
        };

        if config.clear_seeded_runs {
            for (r, c) in board.find_all_runs() {
                board.set(r, c, Cell::Empty);
            }
        }
        Ok(board)
    }

    /// Builds a board from row-major cells. Used by the text fixture parser.
    pub(crate) fn from_grid(height: usize, width: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), height * width);
        Board {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of the floor row, `height - 1`.
    pub fn floor_row(&self) -> usize {
        self.height - 1
    }

    /// Returns the cell at `row`, `col` (both 0-based).
    ///
    /// # Panics
    /// Panics if `row` or `col` are outside the board.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "cell ({}, {}) is outside a {}x{} board",
            row,
            col,
            self.height,
            self.width
        );
        self.cells[row * self.width + col]
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.width + col] = cell;
    }

    /// Whether `tile` appears in any row above the floor row.
    ///
    /// The floor row is deliberately not searched.
    pub fn exists_on_board(&self, tile: Color) -> bool {
        self.cells[..self.floor_row() * self.width].contains(&Cell::Colored(tile))
    }

    /// Validates a 1-based column number and returns its 0-based index.
    ///
    /// # Errors
    /// `ColumnError::OutOfRange` if `column` is not in `1..=width`, and
    /// `ColumnError::Full` if the floor cell of the column is occupied.
    pub fn check_column(&self, column: usize) -> Result<usize, ColumnError> {
        if column == 0 || column > self.width {
            return Err(ColumnError::OutOfRange {
                column,
                width: self.width,
            });
        }
        let index = column - 1;
        if !self.cell_at(self.floor_row(), index).is_empty() {
            return Err(ColumnError::Full { column });
        }
        Ok(index)
    }

    /// Boolean form of `check_column`; `column` is 1-based.
    pub fn is_valid_column(&self, column: usize) -> bool {
        self.check_column(column).is_ok()
    }

    /// Lowest empty row that sits directly under an occupied cell (or row 0),
    /// scanning from the floor upward.
    fn landing_row(&self, column: usize) -> Option<usize> {
        (0..self.height).rev().find(|&row| {
            self.cell_at(row, column).is_empty()
                && (row == 0 || !self.cell_at(row - 1, column).is_empty())
        })
    }

    /// Top row of the vertical run that ends at `row` and extends upward.
    fn vertical_run_top(&self, row: usize, column: usize, tile: Cell) -> usize {
        let mut top = row;
        while top > 0 && self.cell_at(top - 1, column) == tile {
            top -= 1;
        }
        top
    }

    /// Leftmost and rightmost columns of the horizontal run through `column`.
    fn horizontal_run_bounds(&self, row: usize, column: usize, tile: Cell) -> (usize, usize) {
        let mut left = column;
        while left > 0 && self.cell_at(row, left - 1) == tile {
            left -= 1;
        }
        let mut right = column;
        while right + 1 < self.width && self.cell_at(row, right + 1) == tile {
            right += 1;
        }
        (left, right)
    }

    /// Drops `tile` into `column` (0-based) and clears the runs it completes.
    ///
    /// The tile lands in the lowest empty row directly under an occupied cell (row 0 in an
    /// empty column). The vertical run extending upward from the landing cell and the
    /// horizontal run through it are both measured right after placement; each is cleared
    /// if it is at least `MIN_RUN_LENGTH` long. Cleared cells stay empty and nothing is
    /// re-checked.
    ///
    /// # Errors
    /// Returns a `ColumnError` (with the 1-based column number) when `column` is outside
    /// the board or its floor cell is occupied. The board is unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// use match_three::engine::{Cell, Color};
    /// use match_three::utils::board_from_str_array;
    ///
    /// let mut board = board_from_str_array(&["RR.", "...", "..."]).unwrap();
    /// let placement = board.drop_tile(Color::Red, 2).unwrap();
    /// assert_eq!(placement.row, 0);
    /// assert_eq!(placement.cleared, vec![(0, 0), (0, 1), (0, 2)]);
    /// assert_eq!(board.cell_at(0, 0), Cell::Empty);
    /// ```
    pub fn drop_tile(&mut self, tile: Color, column: usize) -> Result<Placement, ColumnError> {
        let index = self.check_column(column.saturating_add(1))?;
        let row = self
            .landing_row(index)
            .ok_or(ColumnError::Full { column: column + 1 })?;

        let cell = Cell::Colored(tile);
        self.set(row, index, cell);

        let top = self.vertical_run_top(row, index, cell);
        let (left, right) = self.horizontal_run_bounds(row, index, cell);

        let mut cleared = Vec::new();
        if row - top + 1 >= MIN_RUN_LENGTH {
            cleared.extend((top..=row).map(|r| (r, index)));
        }
        if right - left + 1 >= MIN_RUN_LENGTH {
            cleared.extend((left..=right).map(|c| (row, c)));
        }
        cleared.sort_unstable();
        cleared.dedup();

        for &(r, c) in &cleared {
            self.set(r, c, Cell::Empty);
        }

        Ok(Placement {
            row,
            column: index,
            cleared,
        })
    }

    /// Current outcome. Loss is checked before win.
    pub fn evaluate(&self) -> Outcome {
        let floor = self.floor_row();
        let floor_full = (0..self.width).all(|c| !self.cell_at(floor, c).is_empty());
        if floor_full {
            return Outcome::Lost;
        }
        if self.cells[..floor * self.width].iter().all(Cell::is_empty) {
            Outcome::Won
        } else {
            Outcome::InProgress
        }
    }

    /// Every cell that belongs to a horizontal or vertical run of `MIN_RUN_LENGTH` or more,
    /// sorted and deduplicated.
    fn find_all_runs(&self) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        for r in 0..self.height {
            self.collect_runs((0..self.width).map(|c| (r, c)), &mut found);
        }
        for c in 0..self.width {
            self.collect_runs((0..self.height).map(|r| (r, c)), &mut found);
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    fn collect_runs(
        &self,
        line: impl Iterator<Item = (usize, usize)>,
        found: &mut Vec<(usize, usize)>,
    ) {
        let mut run = Vec::new();
        let mut current = Cell::Empty;
        for (r, c) in line {
            let cell = self.cell_at(r, c);
            if cell != current {
                if run.len() >= MIN_RUN_LENGTH {
                    found.extend_from_slice(&run);
                }
                run.clear();
                current = cell;
            }
            if !cell.is_empty() {
                run.push((r, c));
            }
        }
        if run.len() >= MIN_RUN_LENGTH {
            found.extend_from_slice(&run);
        }
    }

    /// Renders the board with 1-based column numbers and ANSI colors.
    ///
    /// If `pos` is `Some((r, c))`, that cell is drawn in brackets, which the
    /// interactive player uses to mark where the last tile landed.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for c_idx in 1..=self.width {
            output.push_str(&format!("{:<3}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..self.height {
            output.push_str(&format!("{:<3}", r_idx));
            for c_idx in 0..self.width {
                let cell = self.cell_at(r_idx, c_idx);
                let content = if pos == Some((r_idx, c_idx)) {
                    format!("[{}]", cell.to_char())
                } else {
                    format!(" {} ", cell.to_char())
                };
                output.push_str(&format!(
                    "\x1b[1;{}m{}\x1b[m",
                    cell.to_ansi_color_code(),
                    content
                ));
            }
            if r_idx < self.height - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// One game session: a board plus the random generator that supplies its tiles.
///
/// The generator is injected so a session can be replayed from a seed.
///
/// # Examples
/// ```
/// use match_three::config::GameConfig;
/// use match_three::engine::{Game, Outcome};
///
/// let mut game = Game::with_seed(GameConfig::default(), 42).unwrap();
/// assert_eq!(game.outcome(), Outcome::InProgress);
///
/// let tile = game.next_tile().unwrap();
/// assert!(game.board().exists_on_board(tile));
/// game.play(tile, 1).unwrap();
/// assert_eq!(game.turns(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Game<R = SmallRng> {
    board: Board,
    num_color_types: usize,
    rng: R,
    turns: u32,
}

impl Game<SmallRng> {
    /// Creates a game whose board and tiles come from `SmallRng::seed_from_u64(seed)`.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        Game::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Creates a game, building its board from `config` with `rng`.
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, EngineError> {
        let board = Board::new(&config, &mut rng)?;
        Ok(Game {
            board,
            num_color_types: config.num_color_types,
            rng,
            turns: 0,
        })
    }

    /// Creates a game around an existing board.
    pub fn with_board(board: Board, num_color_types: usize, rng: R) -> Result<Self, EngineError> {
        if num_color_types == 0 || num_color_types > MAX_COLOR_TYPES {
            return Err(EngineError::InvalidConfiguration(format!(
                "num_color_types ({}) must be in 1..={}",
                num_color_types, MAX_COLOR_TYPES
            )));
        }
        Ok(Game {
            board,
            num_color_types,
            rng,
            turns: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn num_color_types(&self) -> usize {
        self.num_color_types
    }

    /// Number of tiles placed so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// One independent draw from the configured colors.
    ///
    /// The color count was validated when the game was created, so `Color::random`
    /// never has to clamp it here.
    pub fn random_tile(&mut self) -> Color {
        Color::random(&mut self.rng, self.num_color_types)
    }

    /// Draws the tile for the next turn, re-rolling until its color exists above the floor.
    ///
    /// Returns `None` when no configured color is present above the floor row, since no
    /// draw could ever be accepted.
    pub fn next_tile(&mut self) -> Option<Color> {
        let playable = Color::ALL[..self.num_color_types]
            .iter()
            .any(|&color| self.board.exists_on_board(color));
        if !playable {
            return None;
        }
        loop {
            let tile = self.random_tile();
            if self.board.exists_on_board(tile) {
                return Some(tile);
            }
        }
    }

    /// Validates the 1-based `column`, drops `tile` into it and counts the turn.
    ///
    /// Rejected columns leave the game untouched.
    pub fn play(&mut self, tile: Color, column: usize) -> Result<Placement, ColumnError> {
        let index = self.board.check_column(column)?;
        let placement = self.board.drop_tile(tile, index)?;
        self.turns += 1;
        Ok(placement)
    }

    pub fn outcome(&self) -> Outcome {
        self.board.evaluate()
    }

    pub fn is_over(&self) -> bool {
        self.outcome() != Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    fn column_is_gravity_consistent(board: &Board, column: usize) -> bool {
        let mut seen_empty = false;
        for row in 0..board.height() {
            let empty = board.cell_at(row, column).is_empty();
            if seen_empty && !empty {
                return false;
            }
            seen_empty |= empty;
        }
        true
    }

    #[test]
    fn test_new_board_seed_rows() {
        let mut rng = SmallRng::seed_from_u64(514514);
        let board = Board::new(&GameConfig::new(6, 4, 3, 4), &mut rng).unwrap();
        assert_eq!(board.height(), 6);
        assert_eq!(board.width(), 4);
        for r in 0..6 {
            for c in 0..4 {
                assert_eq!(board.cell_at(r, c).is_empty(), r >= 3, "cell ({}, {})", r, c);
            }
        }
    }

    #[test]
    fn test_new_board_rejects_invalid_configuration() {
        let mut rng = SmallRng::seed_from_u64(0);
        let result = Board::new(&GameConfig::new(3, 3, 3, 1), &mut rng);
        assert!(matches!(result, Err(EngineError::InvalidConfiguration(_))));
        assert!(Board::new(&GameConfig::new(3, 3, 1, 0), &mut rng).is_err());
    }

    #[test]
    fn test_new_board_keeps_seeded_runs() {
        let mut rng = SmallRng::seed_from_u64(3);
        let board = Board::new(&GameConfig::new(3, 3, 1, 1), &mut rng).unwrap();
        for c in 0..3 {
            assert_eq!(board.cell_at(0, c), Cell::Colored(Color::Red));
        }
    }

    #[test]
    fn test_new_board_clears_seeded_runs_when_enabled() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut config = GameConfig::new(4, 2, 3, 1);
        config.clear_seeded_runs = true;
        let board = Board::new(&config, &mut rng).unwrap();
        // Rows are only two wide, so the cells go through the vertical runs.
        for r in 0..4 {
            for c in 0..2 {
                assert_eq!(board.cell_at(r, c), Cell::Empty);
            }
        }
    }

    #[test]
    fn test_find_all_runs_ignores_short_runs() {
        let board = board_from_str_array(&["RRGG", "RBBB", "R...", "...."]).unwrap();
        assert_eq!(
            board.find_all_runs(),
            vec![(0, 0), (1, 0), (1, 1), (1, 2), (1, 3), (2, 0)]
        );
    }

    #[test]
    fn test_random_color_never_exceeds_configured_colors() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..500 {
            let color = Color::random(&mut rng, 2);
            assert!(color == Color::Red || color == Color::Green);
        }
    }

    #[test]
    fn test_random_color_covers_every_configured_color() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut seen = [false; MAX_COLOR_TYPES];
        for _ in 0..1000 {
            seen[Color::random(&mut rng, MAX_COLOR_TYPES).index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "not every color was drawn: {:?}", seen);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "num_color_types (0) must be in 1..=4")]
    fn test_random_color_rejects_zero_colors() {
        let mut rng = SmallRng::seed_from_u64(1);
        Color::random(&mut rng, 0);
    }

    #[test]
    fn test_cell_char_round_trip() {
        for ch in ['.', 'R', 'G', 'B', 'Y'] {
            assert_eq!(Cell::from_char(ch).unwrap().to_char(), ch);
        }
        assert_eq!(Cell::from_char('X'), None);
        assert_eq!(Cell::from(Color::Blue).color(), Some(Color::Blue));
        assert_eq!(Cell::Empty.color(), None);
    }

    #[test]
    fn test_exists_on_board_skips_floor_row() {
        let board = board_from_str_array(&["R..", "...", "G.."]).unwrap();
        assert!(board.exists_on_board(Color::Red));
        assert!(!board.exists_on_board(Color::Green));
        assert!(!board.exists_on_board(Color::Blue));
    }

    #[test]
    fn test_exists_on_board_single_row_board() {
        let board = board_from_str_array(&["RGB"]).unwrap();
        for color in Color::ALL {
            assert!(!board.exists_on_board(color));
        }
    }

    #[test]
    fn test_is_valid_column() {
        let board = board_from_str_array(&["RGB", "R.B", "..B"]).unwrap();
        assert!(!board.is_valid_column(0));
        assert!(board.is_valid_column(1));
        assert!(board.is_valid_column(2));
        assert!(!board.is_valid_column(3), "floor cell is occupied");
        assert!(!board.is_valid_column(4));
    }

    #[test]
    fn test_check_column_reasons() {
        let board = board_from_str_array(&["RGB", "R.B", "..B"]).unwrap();
        assert_eq!(board.check_column(2), Ok(1));
        assert_eq!(
            board.check_column(4),
            Err(ColumnError::OutOfRange { column: 4, width: 3 })
        );
        assert_eq!(board.check_column(3), Err(ColumnError::Full { column: 3 }));
    }

    #[test]
    fn test_drop_into_full_or_missing_column_leaves_board_unchanged() {
        let mut board = board_from_str_array(&["RG", "B."]).unwrap();
        let before = board.clone();
        assert_eq!(
            board.drop_tile(Color::Red, 0),
            Err(ColumnError::Full { column: 1 })
        );
        assert_eq!(
            board.drop_tile(Color::Red, 2),
            Err(ColumnError::OutOfRange { column: 3, width: 2 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_drop_lands_under_stack() {
        let mut board = board_from_str_array(&["RGB", "G..", "...", "..."]).unwrap();
        let placement = board.drop_tile(Color::Blue, 0).unwrap();
        assert_eq!(placement.row, 2);
        assert_eq!(placement.column, 0);
        assert!(placement.cleared.is_empty());
        assert_eq!(board.cell_at(2, 0), Cell::Colored(Color::Blue));

        let placement = board.drop_tile(Color::Red, 1).unwrap();
        assert_eq!(placement.row, 1);
    }

    #[test]
    fn test_drop_into_empty_column_lands_in_top_row() {
        let mut board = board_from_str_array(&["R.", "..", ".."]).unwrap();
        let placement = board.drop_tile(Color::Green, 1).unwrap();
        assert_eq!(placement.row, 0);
        assert_eq!(board.cell_at(0, 1), Cell::Colored(Color::Green));
    }

    #[test]
    fn test_vertical_run_stops_at_other_color() {
        let mut board = board_from_str_array(&["R", "G", "R", "R", "."]).unwrap();
        let placement = board.drop_tile(Color::Red, 0).unwrap();
        assert_eq!(placement.row, 4);
        assert_eq!(placement.cleared, vec![(2, 0), (3, 0), (4, 0)]);
        assert_eq!(board.cell_at(0, 0), Cell::Colored(Color::Red));
        assert_eq!(board.cell_at(1, 0), Cell::Colored(Color::Green));
        assert_eq!(board.evaluate(), Outcome::InProgress);
    }

    #[test]
    fn test_two_in_a_row_is_not_cleared() {
        let mut board = board_from_str_array(&["R.B", "...", "..."]).unwrap();
        let placement = board.drop_tile(Color::Red, 1).unwrap();
        assert!(placement.cleared.is_empty());
        assert_eq!(board.cell_at(0, 1), Cell::Colored(Color::Red));
    }

    #[test]
    fn test_horizontal_run_longer_than_three() {
        let mut board = board_from_str_array(&["RR.R", "...."]).unwrap();
        let placement = board.drop_tile(Color::Red, 2).unwrap();
        assert_eq!(placement.cleared, vec![(0, 0), (0, 1), (0, 2), (0, 3)]);
        assert_eq!(board.evaluate(), Outcome::Won);
    }

    #[test]
    fn test_cross_shaped_run_clears_both_arms() {
        let mut board = board_from_str_array(&["BRB", "BRB", "R.R", "..."]).unwrap();
        let placement = board.drop_tile(Color::Red, 1).unwrap();
        assert_eq!(placement.row, 2);
        assert_eq!(
            placement.cleared,
            vec![(0, 1), (1, 1), (2, 0), (2, 1), (2, 2)]
        );
        let expected = board_from_str_array(&["B.B", "B.B", "...", "..."]).unwrap();
        assert_eq!(board, expected);
    }

    #[test]
    fn test_horizontal_clear_leaves_gap_without_refill() {
        let mut board = board_from_str_array(&["GBG", "R.R", "B..", "..."]).unwrap();
        let placement = board.drop_tile(Color::Red, 1).unwrap();
        assert_eq!(placement.row, 1);
        assert_eq!(placement.cleared, vec![(1, 0), (1, 1), (1, 2)]);

        // Column 0 now has an empty cell above the Blue tile; nothing falls into it.
        assert_eq!(board.cell_at(1, 0), Cell::Empty);
        assert_eq!(board.cell_at(2, 0), Cell::Colored(Color::Blue));
        assert!(!column_is_gravity_consistent(&board, 0));
        assert!(column_is_gravity_consistent(&board, 1));

        // The next tile in that column settles under the hanging tile, not in the gap.
        let placement = board.drop_tile(Color::Green, 0).unwrap();
        assert_eq!(placement.row, 3);
    }

    #[test]
    fn test_scenario_preseeded_run_survives() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::new(&GameConfig::new(3, 3, 1, 1), &mut rng).unwrap();

        for column in 0..2 {
            let placement = board.drop_tile(Color::Red, column).unwrap();
            assert_eq!(placement.row, 1);
            assert!(placement.cleared.is_empty());
        }
        let placement = board.drop_tile(Color::Red, 2).unwrap();
        assert_eq!(placement.cleared, vec![(1, 0), (1, 1), (1, 2)]);

        for c in 0..3 {
            assert_eq!(board.cell_at(0, c), Cell::Colored(Color::Red));
            assert_eq!(board.cell_at(1, c), Cell::Empty);
            assert_eq!(board.cell_at(2, c), Cell::Empty);
        }
        assert_eq!(board.evaluate(), Outcome::InProgress);
    }

    #[test]
    fn test_scenario_vertical_run_wins() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::new(&GameConfig::new(4, 1, 0, 1), &mut rng).unwrap();

        board.drop_tile(Color::Red, 0).unwrap();
        let placement = board.drop_tile(Color::Red, 0).unwrap();
        assert!(placement.cleared.is_empty());
        assert_eq!(board.cell_at(0, 0), Cell::Colored(Color::Red));
        assert_eq!(board.cell_at(1, 0), Cell::Colored(Color::Red));
        assert_eq!(board.evaluate(), Outcome::InProgress);

        let placement = board.drop_tile(Color::Red, 0).unwrap();
        assert_eq!(placement.cleared, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(board.evaluate(), Outcome::Won);
    }

    #[test]
    fn test_scenario_full_floor_loses() {
        let mut board = board_from_str_array(&["...", "..."]).unwrap();
        let drops = [
            (Color::Red, 0),
            (Color::Green, 0),
            (Color::Green, 1),
            (Color::Blue, 1),
            (Color::Blue, 2),
        ];
        for (tile, column) in drops {
            let placement = board.drop_tile(tile, column).unwrap();
            assert!(placement.cleared.is_empty());
            assert_eq!(board.evaluate(), Outcome::InProgress);
        }
        let placement = board.drop_tile(Color::Red, 2).unwrap();
        assert!(placement.cleared.is_empty());
        assert_eq!(board.evaluate(), Outcome::Lost);
        for column in 1..=3 {
            assert!(!board.is_valid_column(column));
        }
    }

    #[test]
    fn test_evaluate_loss_takes_priority_over_win() {
        let board = board_from_str_array(&["...", "RGB"]).unwrap();
        assert_eq!(board.evaluate(), Outcome::Lost);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board = board_from_str_array(&["RG.", "B..", "..."]).unwrap();
        assert_eq!(board.evaluate(), Outcome::InProgress);
        assert_eq!(board.evaluate(), board.evaluate());

        let won = board_from_str_array(&["...", "..."]).unwrap();
        assert_eq!(won.evaluate(), Outcome::Won);
        assert_eq!(won.evaluate(), Outcome::Won);
    }

    #[test]
    fn test_random_play_preserves_stacks_except_after_horizontal_clears() {
        for seed in 0..20 {
            let mut game = Game::with_seed(GameConfig::new(6, 5, 3, 3), seed).unwrap();
            let mut picker = SmallRng::seed_from_u64(seed + 1000);

            for _ in 0..200 {
                if game.is_over() {
                    break;
                }
                let Some(tile) = game.next_tile() else { break };
                let width = game.board().width();
                let valid: Vec<usize> = (1..=width)
                    .filter(|&c| game.board().is_valid_column(c))
                    .collect();
                let column = valid[picker.gen_range(0..valid.len())];

                let before = game.board().clone();
                let consistent_before: Vec<bool> = (0..width)
                    .map(|c| column_is_gravity_consistent(&before, c))
                    .collect();

                let placement = game.play(tile, column).unwrap();
                let after = game.board();

                if consistent_before[placement.column] {
                    assert!(column_is_gravity_consistent(after, placement.column));
                }
                for c in (0..width).filter(|&c| c != placement.column) {
                    let cleared_here = placement.cleared.iter().find(|&&(_, cc)| cc == c);
                    match cleared_here {
                        None => {
                            assert_eq!(
                                column_is_gravity_consistent(after, c),
                                consistent_before[c]
                            );
                        }
                        Some(&(r, _)) => {
                            let hanging =
                                r + 1 < after.height() && !after.cell_at(r + 1, c).is_empty();
                            if hanging {
                                assert!(!column_is_gravity_consistent(after, c));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from_str_array(&["R..", ".G.", "..B"]).unwrap();
        let display_str = format!("{}", board);
        assert!(display_str.starts_with("   1  2  3  \n"));
        assert_eq!(display_str.lines().count(), board.height() + 1);
        assert!(display_str.contains(" R "));

        let highlighted = board.to_string_with_highlight(Some((1, 1)));
        assert!(highlighted.contains("[G]"));
        assert!(!display_str.contains("[G]"));
    }

    #[test]
    fn test_game_with_seed_is_deterministic() {
        let mut a = Game::with_seed(GameConfig::default(), 2024).unwrap();
        let mut b = Game::with_seed(GameConfig::default(), 2024).unwrap();
        assert_eq!(a.board(), b.board());
        for _ in 0..10 {
            assert_eq!(a.next_tile(), b.next_tile());
        }
    }

    #[test]
    fn test_next_tile_only_offers_colors_above_floor() {
        let board = board_from_str_array(&["G...", "....", "R..."]).unwrap();
        let mut game = Game::with_board(board, 3, SmallRng::seed_from_u64(5)).unwrap();
        for _ in 0..50 {
            assert_eq!(game.next_tile(), Some(Color::Green));
        }
    }

    #[test]
    fn test_next_tile_none_when_nothing_above_floor() {
        let board = board_from_str_array(&["...", "..R"]).unwrap();
        let mut game = Game::with_board(board, 3, SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(game.next_tile(), None);
        assert_eq!(game.outcome(), Outcome::Won);
        assert!(game.is_over());
    }

    #[test]
    fn test_game_play_counts_only_accepted_turns() {
        let board = board_from_str_array(&["RG.", "...", "..."]).unwrap();
        let mut game = Game::with_board(board, 2, SmallRng::seed_from_u64(5)).unwrap();
        assert_eq!(game.turns(), 0);

        assert!(game.play(Color::Red, 0).is_err());
        assert!(game.play(Color::Red, 4).is_err());
        assert_eq!(game.turns(), 0);

        let placement = game.play(Color::Green, 3).unwrap();
        assert_eq!((placement.row, placement.column), (0, 2));
        assert_eq!(game.turns(), 1);
    }

    #[test]
    fn test_game_with_board_rejects_bad_color_count() {
        let board = board_from_str_array(&["R.", ".."]).unwrap();
        assert!(Game::with_board(board.clone(), 0, SmallRng::seed_from_u64(1)).is_err());
        assert!(Game::with_board(board, MAX_COLOR_TYPES + 1, SmallRng::seed_from_u64(1)).is_err());
    }
}
