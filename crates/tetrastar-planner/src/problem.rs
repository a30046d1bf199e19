//! Tetris as a search problem.
//!
//! A state is a board plus the queue of upcoming pieces. Each successor places
//! the head of the queue at one of its resting positions (see
//! [`enumerate_placements`]). After the placement the queue is refilled according
//! to [`QueueRefill`], so that searches can look further ahead than the
//! pieces known at the start.

use serde::{Deserialize, Serialize};
use tetrastar_engine::{Board, PieceGenerator, PieceKind};
use tetrastar_evaluator::board_evaluator::BoardEvaluator;
use tetrastar_search::SearchProblem;

use crate::{placement::enumerate_placements, state::PlannerState};

/// Pieces of the demo game, followed by [`DEMO_RANDOM_TAIL`] random pieces.
pub const DEMO_SEQUENCE: [PieceKind; 14] = {
    use PieceKind::{I, J, L, O, T, Z};
    [I, O, O, T, Z, L, I, T, T, I, O, J, I, I]
};

pub const DEMO_RANDOM_TAIL: usize = 30;

/// When a search round is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum GoalCondition {
    /// At least this many pieces were placed since the round started.
    PiecesPlaced(usize),
    /// The queue holds exactly this many pieces.
    QueueLength(usize),
    /// No piece is left in the queue.
    QueueExhausted,
}

impl Default for GoalCondition {
    fn default() -> Self {
        Self::PiecesPlaced(4)
    }
}

impl GoalCondition {
    #[must_use]
    pub fn is_met(self, state: &PlannerState) -> bool {
        match self {
            Self::PiecesPlaced(n) => state.placed >= n,
            Self::QueueLength(n) => state.pending.len() == n,
            Self::QueueExhausted => state.pending.is_empty(),
        }
    }
}

/// What happens to the queue after a piece is placed.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum QueueRefill {
    /// Append one freshly drawn piece, keeping the queue length constant.
    #[default]
    RandomDraw,
    /// Append nothing; the queue shrinks by one per placement.
    None,
}

/// Starting piece queue of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceSequence {
    /// `len` pieces drawn from the game's generator.
    Random { len: usize },
    /// [`DEMO_SEQUENCE`] followed by random pieces.
    Demo,
    /// A literal queue.
    Fixed(Vec<PieceKind>),
}

impl Default for PieceSequence {
    fn default() -> Self {
        Self::Random { len: 10 }
    }
}

impl PieceSequence {
    pub fn generate(&self, generator: &mut PieceGenerator) -> Vec<PieceKind> {
        match self {
            Self::Random { len } => generator.take_kinds(*len),
            Self::Demo => {
                let mut pieces = DEMO_SEQUENCE.to_vec();
                pieces.extend(generator.take_kinds(DEMO_RANDOM_TAIL));
                pieces
            }
            Self::Fixed(pieces) => pieces.clone(),
        }
    }
}

/// Rules of a single search round.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemConfig {
    pub goal: GoalCondition,
    pub refill: QueueRefill,
    /// Remove full rows after each placement.
    pub clear_lines: bool,
}

#[derive(Debug)]
pub struct TetrisProblem {
    start: PlannerState,
    config: ProblemConfig,
    generator: PieceGenerator,
}

impl TetrisProblem {
    /// Creates a problem starting from `board` with the queue `pending`.
    ///
    /// Refill pieces are drawn from `generator`.
    #[must_use]
    pub fn new(
        config: ProblemConfig,
        board: Board,
        pending: Vec<PieceKind>,
        generator: PieceGenerator,
    ) -> Self {
        Self {
            start: PlannerState::new(board, pending),
            config,
            generator,
        }
    }
}

impl SearchProblem for TetrisProblem {
    type State = PlannerState;

    fn start_state(&mut self) -> PlannerState {
        self.start.clone()
    }

    fn is_goal(&self, state: &PlannerState) -> bool {
        self.config.goal.is_met(state)
    }

    fn successors(&mut self, state: &PlannerState) -> Vec<PlannerState> {
        let Some((&next, rest)) = state.pending.split_first() else {
            return vec![];
        };

        enumerate_placements(&state.board, next)
            .into_iter()
            .map(|placement| {
                let mut board = placement.into_board();
                if self.config.clear_lines {
                    board.clear_lines();
                }
                let mut pending = Vec::with_capacity(state.pending.len());
                pending.extend_from_slice(rest);
                if self.config.refill.is_random_draw() {
                    pending.push(self.generator.next_kind());
                }
                PlannerState {
                    board,
                    pending,
                    placed: state.placed + 1,
                }
            })
            .collect()
    }
}

/// Search heuristic scoring a state by its board alone (lower is better).
#[must_use]
pub fn board_penalty<E>(evaluator: &E) -> impl Fn(&PlannerState) -> f32 + '_
where
    E: BoardEvaluator + ?Sized,
{
    move |state| evaluator.board_penalty(&state.board)
}
