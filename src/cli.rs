//! Command-line flags shared by the binaries.

use crate::config::GameConfig;
use clap::Args;

/// Board settings, flattened into each binary's argument parser.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Number of rows on the board
    #[clap(long, default_value_t = 5)]
    pub height: usize,

    /// Number of columns on the board
    #[clap(long, default_value_t = 5)]
    pub width: usize,

    /// Rows filled with random tiles at the start
    #[clap(long, default_value_t = 3)]
    pub seed_rows: usize,

    /// Number of tile colors in play
    #[clap(long, default_value_t = 3)]
    pub colors: usize,

    /// Clear runs of three that the starting tiles happen to form
    #[clap(long)]
    pub clear_seeded_runs: bool,
}

impl ConfigArgs {
    pub fn to_config(&self) -> GameConfig {
        GameConfig {
            height: self.height,
            width: self.width,
            seed_rows: self.seed_rows,
            num_color_types: self.colors,
            clear_seeded_runs: self.clear_seeded_runs,
        }
    }
}
