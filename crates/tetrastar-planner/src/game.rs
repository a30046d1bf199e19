//! Game loop driving repeated search rounds.
//!
//! Each round builds a [`TetrisProblem`] from the current board and queue, runs
//! [`a_star_search`] on it and continues from the state the search ended in.
//! The game ends when the queue is empty, when a round makes no progress
//! (nothing can be placed, or the goal already holds at the start), when the
//! round limit is reached or when the caller cancels.

use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};
use tetrastar_engine::{Board, PieceDistribution, PieceGenerator, PieceKind, PieceSeed};
use tetrastar_evaluator::{
    board_analysis::{TETRIS_SIGNAL, height_drop, line_clear_signal},
    board_evaluator::WeightedBoardEvaluator,
};
use tetrastar_search::{SearchLimits, SearchStatus, a_star_search};

use crate::{
    problem::{PieceSequence, ProblemConfig, TetrisProblem, board_penalty},
    state::PlannerState,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Starting piece queue.
    pub pieces: PieceSequence,
    /// Distribution of random pieces.
    pub distribution: PieceDistribution,
    pub start_board: Board,
    pub problem: ProblemConfig,
    pub limits: SearchLimits,
    pub evaluator: WeightedBoardEvaluator,
    /// Maximum number of search rounds per game.
    pub max_rounds: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pieces: PieceSequence::default(),
            distribution: PieceDistribution::default(),
            start_board: Board::EMPTY,
            problem: ProblemConfig::default(),
            limits: SearchLimits::default(),
            evaluator: WeightedBoardEvaluator::default(),
            max_rounds: 5,
        }
    }
}

impl GameConfig {
    /// Piece generator for one game, using the configured distribution.
    #[must_use]
    pub fn generator(&self, seed: PieceSeed) -> PieceGenerator {
        PieceGenerator::with_seed(seed, self.distribution)
    }
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    /// Every piece of the queue was placed.
    QueueExhausted,
    /// The next piece could not be placed.
    GameOver,
    /// The configured number of rounds was played.
    RoundLimit,
    /// The round goal already held at the start of a round, so further
    /// rounds would place nothing.
    GoalAtStart,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Outcome of a single search round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    /// Boards along the chosen path, starting with the round's start board.
    pub boards: Vec<Board>,
    pub pieces_placed: usize,
    pub lines_cleared: usize,
    pub tetris_signals: usize,
    pub status: SearchStatus,
    pub expanded: usize,
    pub generated: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub rounds: Vec<RoundReport>,
    pub end: GameEnd,
    pub final_board: Board,
    /// Pieces left in the queue when the game stopped.
    pub remaining: Vec<PieceKind>,
}

impl GameReport {
    #[must_use]
    pub fn lines_cleared(&self) -> usize {
        self.rounds.iter().map(|round| round.lines_cleared).sum()
    }

    #[must_use]
    pub fn tetris_signals(&self) -> usize {
        self.rounds.iter().map(|round| round.tetris_signals).sum()
    }

    #[must_use]
    pub fn pieces_placed(&self) -> usize {
        self.rounds.iter().map(|round| round.pieces_placed).sum()
    }

    /// Every board of the game in order, without repeating round boundaries.
    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.rounds
            .iter()
            .enumerate()
            .flat_map(|(i, round)| round.boards.iter().skip(usize::from(i > 0)))
    }
}

#[derive(Debug)]
pub struct GameDriver {
    config: GameConfig,
    generator: PieceGenerator,
    board: Board,
    pending: Vec<PieceKind>,
}

impl GameDriver {
    /// Sets up a game; the starting queue is drawn from `generator`.
    #[must_use]
    pub fn new(config: GameConfig, mut generator: PieceGenerator) -> Self {
        let pending = config.pieces.generate(&mut generator);
        let board = config.start_board.clone();
        Self {
            config,
            generator,
            board,
            pending,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn pending(&self) -> &[PieceKind] {
        &self.pending
    }

    /// Plays search rounds until the game ends.
    pub fn play(&mut self, cancel: Option<&AtomicBool>) -> GameReport {
        let mut rounds = vec![];
        let end = loop {
            if self.pending.is_empty() {
                break GameEnd::QueueExhausted;
            }
            if rounds.len() >= self.config.max_rounds {
                break GameEnd::RoundLimit;
            }

            let round = self.play_round(cancel);
            log::debug!(
                "round {}: status={:?} placed={} lines={} expanded={}",
                rounds.len() + 1,
                round.status,
                round.pieces_placed,
                round.lines_cleared,
                round.expanded,
            );
            let status = round.status;
            let placed = round.pieces_placed;
            rounds.push(round);

            if self.pending.is_empty() {
                break GameEnd::QueueExhausted;
            }
            match status {
                SearchStatus::Cancelled => break GameEnd::Cancelled,
                SearchStatus::FrontierExhausted => break GameEnd::GameOver,
                SearchStatus::GoalReached if placed == 0 => break GameEnd::GoalAtStart,
                SearchStatus::BudgetExhausted if placed == 0 => break GameEnd::GameOver,
                SearchStatus::GoalReached | SearchStatus::BudgetExhausted => {}
            }
        };

        log::debug!("game ended: {end:?} after {} rounds", rounds.len());
        GameReport {
            rounds,
            end,
            final_board: self.board.clone(),
            remaining: self.pending.clone(),
        }
    }

    fn play_round(&mut self, cancel: Option<&AtomicBool>) -> RoundReport {
        let mut problem = TetrisProblem::new(
            self.config.problem,
            self.board.clone(),
            self.pending.clone(),
            self.generator.split(),
        );
        let outcome = a_star_search(
            &mut problem,
            board_penalty(&self.config.evaluator),
            &self.config.limits,
            cancel,
        );

        let boards: Vec<Board> = outcome.path.iter().map(|state| state.board.clone()).collect();
        let pieces_placed = outcome.depth();
        if let Some(PlannerState { board, pending, .. }) = outcome.path.into_iter().last() {
            self.board = board;
            self.pending = pending;
        }

        RoundReport {
            lines_cleared: lines_cleared_in_path(&boards),
            tetris_signals: tetris_signals_in_path(&boards),
            boards,
            pieces_placed,
            status: outcome.status,
            expanded: outcome.expanded,
            generated: outcome.generated,
        }
    }
}

/// Rows cleared along a path, inferred from drops in stack height.
#[must_use]
pub fn lines_cleared_in_path(boards: &[Board]) -> usize {
    boards.windows(2).map(|w| height_drop(&w[0], &w[1])).sum()
}

/// Consecutive board pairs along a path where the 4-line-clear signal fires.
#[must_use]
pub fn tetris_signals_in_path(boards: &[Board]) -> usize {
    boards
        .windows(2)
        .filter(|w| line_clear_signal(&w[1], &w[0]) == TETRIS_SIGNAL)
        .count()
}
