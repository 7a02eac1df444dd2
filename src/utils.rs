use crate::engine::{Board, BOARD_SIZE};
use crate::error::EngineError;

/// Parses an array of string slices into a `Board` object.
///
/// Each string slice represents a row on the board, starting from row 0, made of
/// whitespace-separated cells. A cell is either a tile value (a power of two, or `0`)
/// or `.` for an empty cell.
/// If fewer than `BOARD_SIZE` rows are provided, the remaining rows are empty.
/// Similarly, if a row has fewer than `BOARD_SIZE` cells, the rest of that row is empty.
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the board.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(EngineError::InvalidBoard)` if:
///     - The number of rows in `s` exceeds `BOARD_SIZE`.
///     - Any row has more than `BOARD_SIZE` cells.
///     - A cell is neither `.` nor a number.
///     - A number is neither 0 nor a power of two of at least 2.
///
/// # Examples
/// ```
/// use twenty48::utils::board_from_str_array;
/// use twenty48::engine::Tile;
///
/// let board = board_from_str_array(&[
///     "2 . . 4", // Row 0
///     ". 8",     // Row 1
/// ])
/// .unwrap();
/// assert_eq!(board.get_tile(0, 0), Tile::new(2));
/// assert_eq!(board.get_tile(0, 3), Tile::new(4));
/// assert_eq!(board.get_tile(1, 1), Tile::new(8));
/// assert_eq!(board.get_tile(1, 2), Tile::EMPTY); // Rest of row 1 is empty
/// assert_eq!(board.get_tile(3, 0), Tile::EMPTY); // Row 3 is entirely empty
///
/// assert!(board_from_str_array(&["2 x"]).is_err());
/// assert!(board_from_str_array(&["3"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, EngineError> {
    if s.len() > BOARD_SIZE {
        return Err(EngineError::InvalidBoard(format!(
            "Invalid number of rows. Expected at most {}, found {}",
            BOARD_SIZE,
            s.len()
        )));
    }

    let mut values = [[0u32; BOARD_SIZE]; BOARD_SIZE];

    for (r, row_str) in s.iter().enumerate() {
        let cells: Vec<&str> = row_str.split_whitespace().collect();
        if cells.len() > BOARD_SIZE {
            return Err(EngineError::InvalidBoard(format!(
                "Row {} is too long. Expected at most {} cells, found {}",
                r,
                BOARD_SIZE,
                cells.len()
            )));
        }

        for (c, cell) in cells.into_iter().enumerate() {
            values[r][c] = parse_cell(cell).ok_or_else(|| {
                EngineError::InvalidBoard(format!(
                    "Unrecognized cell '{}' in row {} col {}",
                    cell, r, c
                ))
            })?;
        }
    }
    Ok(Board::from_values(values))
}

fn parse_cell(cell: &str) -> Option<u32> {
    if cell == "." {
        return Some(0);
    }
    let value: u32 = cell.parse().ok()?;
    (value == 0 || (value >= 2 && value.is_power_of_two())).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Tile;

    fn invalid_message(result: Result<Board, EngineError>) -> String {
        match result {
            Err(EngineError::InvalidBoard(msg)) => msg,
            other => panic!("Expected InvalidBoard, got {:?}", other),
        }
    }

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["2 4 8 16", ". . . .", "0 0 0 0", "2048 . . 2"]).unwrap();
        assert_eq!(board.values()[0], [2, 4, 8, 16]);
        assert_eq!(board.values()[1], [0, 0, 0, 0]);
        assert_eq!(board.values()[2], [0, 0, 0, 0]);
        assert_eq!(board.get_tile(3, 0), Tile::new(2048));
        assert_eq!(board.get_tile(3, 3), Tile::new(2));
    }

    #[test]
    fn test_board_from_str_array_extra_whitespace() {
        let board = board_from_str_array(&["  2   .\t4  "]).unwrap();
        assert_eq!(board.values()[0], [2, 0, 4, 0]);
    }

    #[test]
    fn test_board_from_str_array_invalid_cell() {
        let msg = invalid_message(board_from_str_array(&["2 X"]));
        assert!(msg.contains("Unrecognized cell 'X' in row 0 col 1"), "{}", msg);
        assert!(board_from_str_array(&["-2"]).is_err());
    }

    #[test]
    fn test_board_from_str_array_rejects_non_powers_of_two() {
        for bad in ["1", "3", "6", "100"] {
            let msg = invalid_message(board_from_str_array(&[bad]));
            assert!(msg.contains("Unrecognized cell"), "{}", msg);
        }
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let msg = invalid_message(board_from_str_array(&["2 2 2 2 2"]));
        assert!(msg.contains("Row 0 is too long"));
    }

    #[test]
    fn test_board_from_str_array_too_many_rows() {
        let rows = vec!["2"; BOARD_SIZE + 1];
        let msg = invalid_message(board_from_str_array(&rows));
        assert!(msg.contains("Invalid number of rows"));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board_str: [&str; 0] = [];
        let board = board_from_str_array(&board_str).unwrap();
        assert_eq!(board, Board::new_empty());
    }
}
