use std::fmt;

use super::board::Board;

/// Text dump of a board, one line per row with space-separated cells.
///
/// Occupied cells print their piece letter (`#` for garbage), empty cells print `.`.
///
/// ```
/// use tetrastar_engine::Board;
///
/// let board = Board::from_ascii("IIII......");
/// let text = board.display().to_string();
/// assert!(text.ends_with("I I I I . . . . . .\n"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    row_numbers: bool,
}

impl<'a> BoardDisplay<'a> {
    #[must_use]
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            row_numbers: false,
        }
    }

    /// Prefixes each line with its row index.
    #[must_use]
    pub fn with_row_numbers(self, row_numbers: bool) -> Self {
        Self {
            row_numbers,
            ..self
        }
    }
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.board.rows().enumerate() {
            if self.row_numbers {
                write!(f, "{y:2} ")?;
            }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Board {
    #[must_use]
    pub fn display(&self) -> BoardDisplay<'_> {
        BoardDisplay::new(self)
    }
}
