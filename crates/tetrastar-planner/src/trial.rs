use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tetrastar_engine::{PieceGenerator, PieceSeed};

use crate::game::{GameConfig, GameDriver, GameEnd};

/// Summary of one game played by [`run_trials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialGame {
    /// Seed that reproduces this game on its own.
    pub seed: PieceSeed,
    pub lines_cleared: usize,
    pub tetris_signals: usize,
    pub pieces_placed: usize,
    pub rounds: usize,
    pub end: GameEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialSummary {
    pub seed: PieceSeed,
    pub games: Vec<TrialGame>,
}

impl TrialSummary {
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.games.iter().map(|game| game.lines_cleared).sum()
    }
}

/// Plays `trials` independent games.
///
/// Each game gets its own seed, drawn from a generator seeded with `seed`.
/// `on_game` is called after every finished game. Stops early, with the games
/// played so far, once `cancel` is raised.
pub fn run_trials<F>(
    config: &GameConfig,
    trials: usize,
    seed: PieceSeed,
    cancel: Option<&AtomicBool>,
    mut on_game: F,
) -> TrialSummary
where
    F: FnMut(usize, &TrialGame),
{
    let mut seeds = PieceGenerator::with_seed(seed, config.distribution);
    let mut games = Vec::with_capacity(trials);

    for i in 0..trials {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            break;
        }
        let game_seed = seeds.next_seed();
        let mut driver = GameDriver::new(config.clone(), config.generator(game_seed));
        let report = driver.play(cancel);
        let game = TrialGame {
            seed: game_seed,
            lines_cleared: report.lines_cleared(),
            tetris_signals: report.tetris_signals(),
            pieces_placed: report.pieces_placed(),
            rounds: report.rounds.len(),
            end: report.end,
        };
        on_game(i, &game);
        games.push(game);
    }

    TrialSummary { seed, games }
}

#[cfg(test)]
mod tests {
    use tetrastar_search::SearchLimits;

    use super::*;

    fn quick_config() -> GameConfig {
        GameConfig {
            limits: SearchLimits {
                max_expansions: 20,
                time_budget_ms: None,
            },
            max_rounds: 1,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_trials_are_reproducible() {
        let config = quick_config();
        let seed = PieceSeed::from_bytes([42; 16]);
        let a = run_trials(&config, 3, seed, None, |_, _| {});
        let b = run_trials(&config, 3, seed, None, |_, _| {});
        assert_eq!(a, b);
        assert_eq!(a.games.len(), 3);
        assert_eq!(a.total_lines(), a.games.iter().map(|g| g.lines_cleared).sum::<usize>());
    }

    #[test]
    fn test_game_seed_replays_game() {
        let config = quick_config();
        let summary = run_trials(&config, 2, PieceSeed::from_bytes([9; 16]), None, |_, _| {});
        let second = &summary.games[1];

        let report = GameDriver::new(config.clone(), config.generator(second.seed)).play(None);
        assert_eq!(report.pieces_placed(), second.pieces_placed);
        assert_eq!(report.lines_cleared(), second.lines_cleared);
        assert_eq!(report.end, second.end);
    }

    #[test]
    fn test_callback_sees_every_game() {
        let mut seen = vec![];
        let summary = run_trials(
            &quick_config(),
            3,
            PieceSeed::from_bytes([1; 16]),
            None,
            |i, game| seen.push((i, game.seed)),
        );
        let expected: Vec<_> = summary.games.iter().enumerate().map(|(i, g)| (i, g.seed)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_cancelled_before_first_game() {
        let cancel = AtomicBool::new(true);
        let summary = run_trials(
            &quick_config(),
            3,
            PieceSeed::from_bytes([1; 16]),
            Some(&cancel),
            |_, _| {},
        );
        assert!(summary.games.is_empty());
        assert_eq!(summary.total_lines(), 0);
    }
}
