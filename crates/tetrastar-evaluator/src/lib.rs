//! Board analysis and scoring for the Tetris planner.
//!
//! - [`board_analysis`] - lazily evaluated board metrics (column heights, holes,
//!   average height) and the 4-line-clear signal
//! - [`board_evaluator`] - the [`BoardEvaluator`](board_evaluator::BoardEvaluator)
//!   trait and its weighted linear implementation
//!
//! # Example
//!
//! ```
//! use tetrastar_engine::Board;
//! use tetrastar_evaluator::{
//!     board_analysis,
//!     board_evaluator::{BoardEvaluator, WeightedBoardEvaluator},
//! };
//!
//! let board = Board::from_ascii(
//!     "
//!     OO........
//!     OO........
//!     ",
//! );
//! assert_eq!(board_analysis::height(&board), 2);
//! assert_eq!(board_analysis::hole_count(&board), 0);
//!
//! let evaluator = WeightedBoardEvaluator::default();
//! assert!(evaluator.evaluate_board(&board) < 0.0);
//! ```

pub mod board_analysis;
pub mod board_evaluator;
