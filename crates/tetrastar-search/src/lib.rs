//! Generic best-first (A*) search.
//!
//! A [`SearchProblem`] describes start state, goal test and successor
//! generation. [`a_star_search`] explores it in order of path cost plus
//! heuristic estimate, within the bounds of [`SearchLimits`], and can be
//! cancelled from another thread through an [`AtomicBool`](std::sync::atomic::AtomicBool).
//!
//! When the search stops without reaching a goal, the [`SearchOutcome`] still
//! carries the most promising partial path, so callers can act on it.

pub use self::{best_first::*, problem::*};

mod best_first;
mod problem;
