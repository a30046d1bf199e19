//! Enumeration of every resting placement of a piece.
//!
//! For each of the four rotation counts, the piece is rotated at its spawn
//! position, slid to the left wall, then walked one column at a time to the
//! right wall. At every column it is hard-dropped and merged into a copy of the
//! board.
//!
//! Only straight drops are considered: tucks and spins under overhangs are not
//! reachable.

use std::iter;

use arrayvec::ArrayVec;
use tetrastar_engine::{Board, Piece, PieceKind};

/// A piece at its resting position together with the board it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    piece: Piece,
    board: Board,
}

impl Placement {
    #[must_use]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }
}

/// Orientations of `kind` reachable from its spawn position, each slid to the
/// left wall.
///
/// Orientation `r` is the spawn piece rotated clockwise `r` times. If any of
/// those rotation steps is blocked, orientation `r` is skipped entirely.
/// Visually identical orientations (such as the O-piece's) are all kept.
#[must_use]
pub fn oriented_pieces(board: &Board, kind: PieceKind) -> ArrayVec<Piece, 4> {
    let mut pieces = ArrayVec::new();
    let spawn = Piece::spawn(kind);
    if !spawn.fits(board) {
        return pieces;
    }

    for rotations in 0..4 {
        let rotated = (0..rotations).try_fold(spawn, |piece, _| piece.rotated_clockwise(board));
        let Some(rotated) = rotated else {
            log::trace!("{kind:?}: rotation {rotations} blocked at spawn");
            continue;
        };
        pieces.push(leftmost(rotated, board));
    }
    pieces
}

/// Every resting placement of `kind` on `board`.
///
/// An empty result means the piece cannot be placed at all (game over).
#[must_use]
pub fn enumerate_placements(board: &Board, kind: PieceKind) -> Vec<Placement> {
    oriented_pieces(board, kind)
        .into_iter()
        .flat_map(|piece| iter::successors(Some(piece), |p| p.right(board)))
        .filter_map(|piece| {
            let resting = piece.dropped(board);
            match board.with_piece(resting) {
                Ok(merged) => Some(Placement {
                    piece: resting,
                    board: merged,
                }),
                Err(e) => {
                    log::trace!("discarding placement {resting}: {e}");
                    None
                }
            }
        })
        .collect()
}

fn leftmost(piece: Piece, board: &Board) -> Piece {
    iter::successors(Some(piece), |p| p.left(board))
        .last()
        .unwrap_or(piece)
}
