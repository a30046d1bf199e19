//! Board metrics feeding the planner heuristic.
//!
//! [`BoardAnalysis`] computes each metric lazily and caches it, so evaluators
//! that need only a subset of the metrics pay only for those. The free
//! functions ([`height`], [`average_height`], [`hole_count`],
//! [`line_clear_signal`]) are shorthands for one-off queries.
//!
//! All functions are total: every well-formed [`Board`] has a defined value.

use std::cell::OnceCell;

use tetrastar_engine::Board;

/// Value returned by [`line_clear_signal`] when the stack dropped by 4 or more rows.
pub const TETRIS_SIGNAL: i32 = -100;

/// Height drop (in rows) that counts as a 4-line clear.
pub const TETRIS_HEIGHT_DROP: isize = 4;

#[derive(Debug)]
pub struct BoardAnalysis<'a> {
    board: &'a Board,
    column_heights: OnceCell<[u8; Board::WIDTH]>,
    max_height: OnceCell<u8>,
    average_height: OnceCell<f32>,
    hole_count: OnceCell<u16>,
    occupied_cells: OnceCell<u16>,
}

impl<'a> BoardAnalysis<'a> {
    #[must_use]
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            column_heights: OnceCell::new(),
            max_height: OnceCell::new(),
            average_height: OnceCell::new(),
            hole_count: OnceCell::new(),
            occupied_cells: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// Height of each column: rows from the bottom up to and including the
    /// topmost occupied cell, 0 for an empty column.
    #[must_use]
    pub fn column_heights(&self) -> &[u8; Board::WIDTH] {
        self.column_heights.get_or_init(|| {
            let mut column_heights = [0; Board::WIDTH];
            for (x, h) in column_heights.iter_mut().enumerate() {
                let top = (0..Board::HEIGHT).find(|&y| self.board.is_occupied(x, y));
                let Some(top) = top else {
                    continue;
                };
                *h = u8::try_from(Board::HEIGHT - top).expect("board height fits in u8");
            }
            column_heights
        })
    }

    #[must_use]
    pub fn max_height(&self) -> u8 {
        *self.max_height.get_or_init(|| {
            self.column_heights()
                .iter()
                .copied()
                .max()
                .expect("board has at least one column")
        })
    }

    #[must_use]
    pub fn average_height(&self) -> f32 {
        *self.average_height.get_or_init(|| {
            let total: u16 = self.column_heights().iter().copied().map(u16::from).sum();
            f32::from(total) / f32::from(u8::try_from(Board::WIDTH).expect("width fits in u8"))
        })
    }

    /// Number of empty cells covered by an occupied cell somewhere above them
    /// in the same column.
    ///
    /// Every empty cell directly under an occupied one starts a shaft that
    /// extends downward while cells stay empty. The count is taken over the
    /// union of those shafts, which is every empty cell below the topmost
    /// occupied cell of its column.
    #[must_use]
    pub fn hole_count(&self) -> u16 {
        *self.hole_count.get_or_init(|| {
            let mut holes = 0;
            for x in 0..Board::WIDTH {
                let mut covered = false;
                for y in 0..Board::HEIGHT {
                    if self.board.is_occupied(x, y) {
                        covered = true;
                    } else if covered {
                        holes += 1;
                    }
                }
            }
            holes
        })
    }

    #[must_use]
    pub fn occupied_cells(&self) -> u16 {
        *self.occupied_cells.get_or_init(|| {
            u16::try_from(self.board.occupied_cells()).expect("board cell count fits in u16")
        })
    }
}

/// Maximum column height of `board`.
#[must_use]
pub fn height(board: &Board) -> usize {
    usize::from(BoardAnalysis::new(board).max_height())
}

/// Mean column height of `board`.
#[must_use]
pub fn average_height(board: &Board) -> f32 {
    BoardAnalysis::new(board).average_height()
}

/// Number of covered empty cells on `board`.
#[must_use]
pub fn hole_count(board: &Board) -> usize {
    usize::from(BoardAnalysis::new(board).hole_count())
}

/// Detects a 4-line clear between two consecutive boards.
///
/// Returns [`TETRIS_SIGNAL`] when `height(new_board) - height(old_board) > -4`
/// does not hold, i.e. the stack shrank by at least [`TETRIS_HEIGHT_DROP`]
/// rows. Returns 0 otherwise.
#[must_use]
pub fn line_clear_signal(new_board: &Board, old_board: &Board) -> i32 {
    let delta = signed_height(new_board) - signed_height(old_board);
    if delta > -TETRIS_HEIGHT_DROP {
        0
    } else {
        TETRIS_SIGNAL
    }
}

/// Rows removed between two consecutive boards, inferred from the height drop.
#[must_use]
pub fn height_drop(before: &Board, after: &Board) -> usize {
    height(before).saturating_sub(height(after))
}

fn signed_height(board: &Board) -> isize {
    isize::from(BoardAnalysis::new(board).max_height())
}
