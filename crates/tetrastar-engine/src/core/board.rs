use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseBoardError, PlacementError};

use super::piece::{Piece, PieceKind};

/// A single cell of the board.
///
/// Occupied cells remember which kind of piece they came from. The identity is
/// only used when rendering the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Occupied cell with no piece identity (from ASCII art or configuration).
    Garbage,
    /// Square of a merged piece.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[must_use]
    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Garbage => '#',
            Cell::Piece(kind) => kind.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Garbage),
            _ => match PieceKind::from_char(c) {
                Some(kind) => Some(Cell::Piece(kind)),
                None => None,
            },
        }
    }
}

type Row = [Cell; Board::WIDTH];

/// Fixed-size `HEIGHT × WIDTH` grid of settled squares.
///
/// Row 0 is the top of the board. A board is a plain value: cloning it gives a
/// fully independent copy, and [`Board::with_piece`] produces a new board
/// without touching the original.
///
/// # Example
///
/// ```
/// use tetrastar_engine::{Board, Piece, PieceKind};
///
/// let board = Board::EMPTY;
/// let piece = Piece::spawn(PieceKind::I).dropped(&board);
/// let next = board.with_piece(piece).unwrap();
///
/// assert_eq!(board.occupied_cells(), 0);
/// assert_eq!(next.occupied_cells(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [Row; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: ["..........", ..., "IIII..OO.."] (one string per row, top to bottom)
        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.as_char()).collect())
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        Board::from_rows(&rows).map_err(serde::de::Error::custom)
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 20;

    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; Self::WIDTH]; Self::HEIGHT],
    };

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.rows[y][x].is_occupied()
    }

    /// Checks whether `(x, y)` is inside the board and empty.
    #[must_use]
    pub fn is_free(&self, x: isize, y: isize) -> bool {
        Self::index(x, y).is_some_and(|(x, y)| self.rows[y][x].is_empty())
    }

    /// Sets a single cell, overwriting whatever was there.
    ///
    /// Intended for building fixtures; pieces should go through [`Self::merge_piece`].
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Returns the number of occupied cells on the board.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_occupied())
            .count()
    }

    /// Merges a piece into the board.
    ///
    /// Every target cell must be inside the board and empty. All cells are
    /// checked before anything is written, so on error the board is unchanged.
    pub fn merge_piece(&mut self, piece: Piece) -> Result<(), PlacementError> {
        let mut targets = [(0, 0); 4];
        for (target, (x, y)) in targets.iter_mut().zip(piece.squares()) {
            let Some((cx, cy)) = Self::index(x, y) else {
                return Err(PlacementError::OutOfBounds { x, y });
            };
            if self.rows[cy][cx].is_occupied() {
                return Err(PlacementError::CellOccupied { x: cx, y: cy });
            }
            *target = (cx, cy);
        }
        for (x, y) in targets {
            self.rows[y][x] = Cell::Piece(piece.kind());
        }
        Ok(())
    }

    /// Like [`Self::merge_piece`], but returns the merged copy and leaves `self` untouched.
    pub fn with_piece(&self, piece: Piece) -> Result<Self, PlacementError> {
        let mut board = self.clone();
        board.merge_piece(piece)?;
        Ok(board)
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Rows above a cleared line shift down; empty rows are inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if self.rows[y].iter().all(|cell| cell.is_occupied()) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill([Cell::Empty; Self::WIDTH]);
        count
    }

    /// Builds a board from text rows, aligned to the bottom of the board.
    ///
    /// Each row must contain exactly [`Self::WIDTH`] cell characters (`.`, `#`, or a
    /// piece letter); whitespace inside a row is ignored. Fewer than
    /// [`Self::HEIGHT`] rows leave the top of the board empty.
    pub fn from_rows<S>(rows: &[S]) -> Result<Self, ParseBoardError>
    where
        S: AsRef<str>,
    {
        if rows.len() > Self::HEIGHT {
            return Err(ParseBoardError::TooManyRows {
                rows: rows.len(),
                max: Self::HEIGHT,
            });
        }

        let mut board = Self::EMPTY;
        let top = Self::HEIGHT - rows.len();
        for (i, line) in rows.iter().enumerate() {
            let cells = line
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|ch| Cell::from_char(ch).ok_or(ParseBoardError::InvalidCell { row: i, ch }))
                .collect::<Result<Vec<_>, _>>()?;
            let row: Row = cells
                .as_slice()
                .try_into()
                .map_err(|_| ParseBoardError::RowWidth {
                    row: i,
                    width: cells.len(),
                    expected: Self::WIDTH,
                })?;
            board.rows[top + i] = row;
        }
        Ok(board)
    }

    /// Creates a board from ASCII art for testing.
    ///
    /// Blank lines are skipped and the remaining rows are bottom-aligned, see
    /// [`Self::from_rows`].
    ///
    /// # Panics
    ///
    /// Panics if the art is malformed.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        match Self::from_rows(&lines) {
            Ok(board) => board,
            Err(e) => panic!("invalid board art: {e}"),
        }
    }

    fn index(x: isize, y: isize) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok().filter(|x| *x < Self::WIDTH)?;
        let y = usize::try_from(y).ok().filter(|y| *y < Self::HEIGHT)?;
        Some((x, y))
    }
}
