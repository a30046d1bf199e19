//! Board, piece geometry, and piece generation for the tetrastar planner.
//!
//! - [`Board`] - fixed 20×10 grid of [`Cell`]s with value semantics
//! - [`Piece`] - a tetromino instance with rotation and position, plus the
//!   movement/rotation contract used by placement search
//! - [`PieceGenerator`] - seedable piece stream for reproducible games

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Failure to merge a piece into a board.
///
/// The board is left untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("cell ({x}, {y}) is already occupied")]
    CellOccupied { x: usize, y: usize },
    #[display("square ({x}, {y}) lies outside the board")]
    OutOfBounds { x: isize, y: isize },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("expected at most {max} rows, got {rows}")]
    TooManyRows { rows: usize, max: usize },
    #[display("row {row} has {width} cells, expected {expected}")]
    RowWidth {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[display("invalid cell character {ch:?} in row {row}")]
    InvalidCell { row: usize, ch: char },
}
