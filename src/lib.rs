//! # Match Three Library
//!
//! This library provides the core game logic for a turn-based match-three puzzle.
//! Each turn a random tile is offered, the player picks a column, the tile settles in that
//! column and any run of three or more same-colored tiles through it is cleared.
//!
//! It is used by two binaries:
//! - `human_player`: Allows interactive gameplay via the command line.
//! - `self_play`: Plays seeded games with each automated strategy and reports the results.
//!
//! ## Modules
//! - `engine`: The board (`Board`), tile types (`Color`, `Cell`), outcomes and the
//!   session type (`Game`).
//! - `config`: `GameConfig`, the board dimensions and tile settings.
//! - `error`: Error types for configuration, column choice and board parsing.
//! - `heuristics`: Column-choosing strategies for automated play.
//! - `utils`: Parsing boards from text rows.
//! - `cli`: Command-line flags shared by the binaries.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod utils;
