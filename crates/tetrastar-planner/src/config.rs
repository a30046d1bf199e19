use rand::Rng as _;
use serde::{Deserialize, Serialize};
use tetrastar_engine::PieceSeed;

use crate::game::GameConfig;

/// Top-level planner settings, as loaded from a JSON file.
///
/// Every field is optional in the file; missing fields take their defaults.
///
/// ```
/// use tetrastar_planner::PlannerConfig;
///
/// let config: PlannerConfig = serde_json::from_str(r#"{
///     "trials": 10,
///     "game": { "max_rounds": 1, "problem": { "clear_lines": true } }
/// }"#).unwrap();
/// assert_eq!(config.trials, 10);
/// assert!(config.game.problem.clear_lines);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Seed for reproducible runs; a random one is used when absent.
    pub seed: Option<PieceSeed>,
    /// Number of games played by a trial run.
    pub trials: usize,
    pub game: GameConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            trials: 3,
            game: GameConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Returns the configured seed, or a fresh random one.
    #[must_use]
    pub fn seed_or_random(&self) -> PieceSeed {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.trials, 3);
        assert_eq!(config.game.max_rounds, 5);
        assert_eq!(config.game.limits.max_expansions, 2000);
    }

    #[test]
    fn test_configured_seed_is_kept() {
        let config: PlannerConfig =
            serde_json::from_str(r#"{ "seed": "000102030405060708090a0b0c0d0e0f" }"#).unwrap();
        let expected = PieceSeed::from_bytes([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(config.seed, Some(expected));
        assert_eq!(config.seed_or_random(), expected);
    }

    #[test]
    fn test_serialization_round_trip_keeps_settings() {
        let mut config = PlannerConfig::default();
        config.game.max_rounds = 1;
        config.seed = Some(PieceSeed::from_bytes([3; 16]));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PlannerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
