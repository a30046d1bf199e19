//! Piece supply for planning and games.
//!
//! - [`PieceGenerator`] - seedable stream of [`PieceKind`](crate::PieceKind)s
//! - [`PieceSeed`] - 128-bit seed for reproducible streams
//! - [`PieceDistribution`] - independent uniform draws or the 7-bag system

pub use self::piece_generator::*;

mod piece_generator;
