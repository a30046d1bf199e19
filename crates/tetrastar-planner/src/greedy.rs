//! One-ply greedy play, independent of the search.

use tetrastar_evaluator::board_evaluator::BoardEvaluator;
use tetrastar_search::SearchProblem as _;

use crate::{problem::TetrisProblem, state::PlannerState};

/// Returns the direct successor of `state` whose board scores highest.
///
/// Ties keep the first successor in enumeration order. Returns `None` when
/// `state` has no successors.
pub fn best_successor<E>(
    problem: &mut TetrisProblem,
    state: &PlannerState,
    evaluator: &E,
) -> Option<PlannerState>
where
    E: BoardEvaluator + ?Sized,
{
    let mut best_score = f32::MIN;
    let mut best = None;

    for successor in problem.successors(state) {
        let score = evaluator.evaluate_board(&successor.board);
        if best.is_none() || score > best_score {
            best_score = score;
            best = Some(successor);
        }
    }

    best
}

/// Plays up to `max_turns` greedy placements from the start state.
///
/// The returned path starts with the start state and stops early when no
/// placement is possible.
pub fn play_greedy<E>(
    problem: &mut TetrisProblem,
    evaluator: &E,
    max_turns: usize,
) -> Vec<PlannerState>
where
    E: BoardEvaluator + ?Sized,
{
    let mut current = problem.start_state();
    let mut path = vec![current.clone()];
    for _ in 0..max_turns {
        let Some(next) = best_successor(problem, &current, evaluator) else {
            break;
        };
        path.push(next.clone());
        current = next;
    }
    path
}

#[cfg(test)]
mod tests {
    use tetrastar_engine::{Board, PieceDistribution, PieceGenerator, PieceKind, PieceSeed};
    use tetrastar_evaluator::board_evaluator::WeightedBoardEvaluator;

    use super::*;
    use crate::problem::{ProblemConfig, QueueRefill};

    fn problem(board: Board, pending: Vec<PieceKind>, refill: QueueRefill) -> TetrisProblem {
        let config = ProblemConfig {
            refill,
            ..ProblemConfig::default()
        };
        let generator =
            PieceGenerator::with_seed(PieceSeed::from_bytes([1; 16]), PieceDistribution::Uniform);
        TetrisProblem::new(config, board, pending, generator)
    }

    #[test]
    fn test_best_successor_keeps_first_of_equal_scores() {
        let mut problem = problem(Board::EMPTY, vec![PieceKind::O], QueueRefill::None);
        let start = problem.start_state();
        let best = best_successor(&mut problem, &start, &WeightedBoardEvaluator::default()).unwrap();
        let expected = Board::from_ascii(
            "
            OO........
            OO........
            ",
        );
        assert_eq!(best.board, expected);
    }

    #[test]
    fn test_best_successor_scores_highest() {
        let board = Board::from_ascii(
            "
            #.........
            ##.#######
            ",
        );
        let evaluator = WeightedBoardEvaluator::default();
        let mut problem = problem(board, vec![PieceKind::J, PieceKind::T], QueueRefill::None);
        let start = problem.start_state();
        let best = best_successor(&mut problem, &start, &evaluator).unwrap();
        let best_score = evaluator.evaluate_board(&best.board);

        for successor in problem.successors(&start) {
            assert!(evaluator.evaluate_board(&successor.board) <= best_score);
        }
        assert_eq!(best.pending, vec![PieceKind::T]);
        assert_eq!(best.placed, 1);
    }

    #[test]
    fn test_no_successor_without_pieces() {
        let mut problem = problem(Board::EMPTY, vec![], QueueRefill::RandomDraw);
        let start = problem.start_state();
        assert!(best_successor(&mut problem, &start, &WeightedBoardEvaluator::default()).is_none());
    }

    #[test]
    fn test_play_greedy_stops_when_queue_runs_out() {
        let mut problem = problem(
            Board::EMPTY,
            vec![PieceKind::I, PieceKind::I, PieceKind::O],
            QueueRefill::None,
        );
        let path = play_greedy(&mut problem, &WeightedBoardEvaluator::default(), 10);
        assert_eq!(path.len(), 4);
        assert!(path.last().unwrap().pending.is_empty());
        assert_eq!(path.last().unwrap().placed, 3);
        assert!(
            path.windows(2)
                .all(|w| w[1].board.occupied_cells() == w[0].board.occupied_cells() + 4)
        );
    }

    #[test]
    fn test_play_greedy_respects_turn_limit() {
        let mut problem = problem(Board::EMPTY, vec![PieceKind::T; 3], QueueRefill::RandomDraw);
        let path = play_greedy(&mut problem, &WeightedBoardEvaluator::default(), 2);
        assert_eq!(path.len(), 3);
        assert_eq!(path[2].pending.len(), 3);
    }
}
