use crate::engine::{Board, Cell};
use crate::error::BoardParseError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from the top (row 0). The number of rows is the
/// board height and the row length is the board width, so every row must have the same
/// number of characters.
///
/// Valid characters for cells are:
/// - 'R', 'G', 'B', 'Y': the four tile colors
/// - '.': an empty cell
///
/// No runs are cleared and no gravity is applied; the board is taken as written.
///
/// # Errors
/// * `BoardParseError::Empty` if there are no rows or the first row is empty.
/// * `BoardParseError::RaggedRow` if a row's length differs from the first row's.
/// * `BoardParseError::UnrecognizedChar` for any other character.
///
/// # Examples
/// ```
/// use match_three::utils::board_from_str_array;
/// use match_three::engine::{Cell, Color};
///
/// let board = board_from_str_array(&["RGY", "B.."]).unwrap();
/// assert_eq!(board.height(), 2);
/// assert_eq!(board.width(), 3);
/// assert_eq!(board.cell_at(0, 2), Cell::Colored(Color::Yellow));
/// assert_eq!(board.cell_at(1, 1), Cell::Empty);
///
/// assert!(board_from_str_array(&["RXB"]).is_err());
/// assert!(board_from_str_array(&["RGB", "R"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardParseError> {
    let width = s.first().map_or(0, |row| row.chars().count());
    if width == 0 {
        return Err(BoardParseError::Empty);
    }

    let mut cells = Vec::with_capacity(s.len() * width);
    for (r, row_str) in s.iter().enumerate() {
        let found = row_str.chars().count();
        if found != width {
            return Err(BoardParseError::RaggedRow {
                row: r,
                expected: width,
                found,
            });
        }
        for (c, ch) in row_str.chars().enumerate() {
            let cell = Cell::from_char(ch)
                .ok_or(BoardParseError::UnrecognizedChar { ch, row: r, col: c })?;
            cells.push(cell);
        }
    }

    Ok(Board::from_grid(s.len(), width, cells))
}
