//! Board scoring for the planner.
//!
//! A [`BoardEvaluator`] assigns a score to a board after a placement; higher is
//! better. The search uses the negated score as its heuristic penalty, and the
//! greedy fallback picks the successor with the highest score.
//!
//! # Default weights
//!
//! [`WeightedBoardEvaluator`] computes
//!
//! ```text
//! score = -(10 × holes + 1 × height + 1 × average_height)
//! ```
//!
//! Holes dominate because a buried empty cell costs several line clears to
//! reopen, while stack height is recovered by a single clear.

use std::fmt;

use serde::{Deserialize, Serialize};
use tetrastar_engine::Board;

use crate::board_analysis::BoardAnalysis;

/// Scores boards (higher is better).
pub trait BoardEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_board(&self, board: &Board) -> f32;

    /// Search penalty for `board` (lower is better).
    fn board_penalty(&self, board: &Board) -> f32 {
        -self.evaluate_board(board)
    }
}

/// Linear penalty over holes, maximum height and average height.
///
/// # Example
///
/// ```
/// use tetrastar_engine::Board;
/// use tetrastar_evaluator::board_evaluator::{BoardEvaluator, WeightedBoardEvaluator};
///
/// let evaluator = WeightedBoardEvaluator::default();
/// let board = Board::from_ascii("IIII......");
/// // height 1, average height 0.4, no holes
/// assert!((evaluator.evaluate_board(&board) + 1.4).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedBoardEvaluator {
    pub hole_weight: f32,
    pub height_weight: f32,
    pub average_height_weight: f32,
}

impl Default for WeightedBoardEvaluator {
    fn default() -> Self {
        Self {
            hole_weight: 10.0,
            height_weight: 1.0,
            average_height_weight: 1.0,
        }
    }
}

impl WeightedBoardEvaluator {
    #[must_use]
    pub fn new(hole_weight: f32, height_weight: f32, average_height_weight: f32) -> Self {
        Self {
            hole_weight,
            height_weight,
            average_height_weight,
        }
    }
}

impl BoardEvaluator for WeightedBoardEvaluator {
    #[inline]
    fn evaluate_board(&self, board: &Board) -> f32 {
        let analysis = BoardAnalysis::new(board);
        let holes = f32::from(analysis.hole_count());
        let height = f32::from(analysis.max_height());
        let average_height = analysis.average_height();
        -(self.hole_weight * holes
            + self.height_weight * height
            + self.average_height_weight * average_height)
    }
}
