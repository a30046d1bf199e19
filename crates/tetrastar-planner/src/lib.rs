//! Offline Tetris planner.
//!
//! Tetris is treated as a finite-horizon search problem: a state is a board
//! plus the queue of upcoming pieces, and each successor places the next piece
//! at one of its resting positions. A best-first search picks the sequence of
//! placements whose boards carry the lowest penalty (holes and stack height).
//!
//! # Modules
//!
//! - [`placement`] - enumeration of every resting placement of a piece
//! - [`problem`] - the search problem: goal conditions, queue refill, start queue
//! - [`greedy`] - one-ply greedy fallback
//! - [`game`] - game driver running repeated search rounds
//! - [`trial`] - test harness playing several independent games
//! - [`config`] - file-loadable settings
//!
//! # Example
//!
//! ```
//! use tetrastar_engine::PieceSeed;
//! use tetrastar_planner::game::{GameConfig, GameDriver};
//!
//! let mut config = GameConfig::default();
//! config.max_rounds = 1;
//! config.limits.max_expansions = 50;
//!
//! let seed = PieceSeed::from_bytes([0; 16]);
//! let report = GameDriver::new(config.clone(), config.generator(seed)).play(None);
//! assert_eq!(report.rounds.len(), 1);
//! ```

pub use self::{config::PlannerConfig, state::PlannerState};

pub mod config;
pub mod game;
pub mod greedy;
pub mod placement;
pub mod problem;
mod state;
pub mod trial;
