//! Game configuration.

use crate::engine::MAX_COLOR_TYPES;
use crate::error::EngineError;

/// Dimensions and tile settings for one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of rows. Row `height - 1` is the floor row.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Rows filled with random tiles at construction, counted from the top.
    pub seed_rows: usize,
    /// How many colors are in play, `1..=MAX_COLOR_TYPES`.
    pub num_color_types: usize,
    /// Clear runs of three or more that the random seed fill happens to create.
    /// Off by default: such runs stay until a drop touches them.
    pub clear_seeded_runs: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            height: 5,
            width: 5,
            seed_rows: 3,
            num_color_types: 3,
            clear_seeded_runs: false,
        }
    }
}

impl GameConfig {
    /// Convenience constructor with `clear_seeded_runs` off.
    pub fn new(height: usize, width: usize, seed_rows: usize, num_color_types: usize) -> Self {
        GameConfig {
            height,
            width,
            seed_rows,
            num_color_types,
            clear_seeded_runs: false,
        }
    }

    /// Checks the construction preconditions.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidConfiguration` when a dimension is zero, when the cell
    /// count overflows `usize`, when no empty row would remain below the seed rows, or when
    /// the color count is out of range.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.height == 0 {
            return Err(EngineError::InvalidConfiguration(
                "height must be >= 1".into(),
            ));
        }
        if self.width == 0 {
            return Err(EngineError::InvalidConfiguration(
                "width must be >= 1".into(),
            ));
        }
        if self.height.checked_mul(self.width).is_none() {
            return Err(EngineError::InvalidConfiguration(format!(
                "a {}x{} board does not fit in memory",
                self.height, self.width
            )));
        }
        if self.seed_rows >= self.height {
            return Err(EngineError::InvalidConfiguration(format!(
                "seed_rows ({}) must be less than height ({})",
                self.seed_rows, self.height
            )));
        }
        if self.num_color_types == 0 || self.num_color_types > MAX_COLOR_TYPES {
            return Err(EngineError::InvalidConfiguration(format!(
                "num_color_types ({}) must be in 1..={}",
                self.num_color_types, MAX_COLOR_TYPES
            )));
        }
        Ok(())
    }
}
