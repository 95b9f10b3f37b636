//! Error types for the match-three engine.

/// Errors raised while setting up a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Reasons a column cannot take a tile.
///
/// Rejections are expected during play; the caller asks for another column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    #[error("column {column} is outside 1..={width}")]
    OutOfRange { column: usize, width: usize },

    #[error("column {column} is full")]
    Full { column: usize },
}

/// Errors produced when parsing a board from text rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("board must have at least one non-empty row")]
    Empty,

    #[error("row {row} has {found} cells (expected {expected})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedChar { ch: char, row: usize, col: usize },
}
