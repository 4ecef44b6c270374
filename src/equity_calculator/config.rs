use serde::{Deserialize, Serialize};

use super::SimulatorError;
use crate::constants::DEFAULT_OPPONENT_HOLE_CARDS;

/// Settings for the monte carlo simulator
///
/// Missing fields fall back to their defaults when loaded from json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Hole cards dealt to every opponent
    pub opponent_hole_cards: usize,
    /// Worker threads sharing the trials
    pub n_threads: u8,
    /// Seed for reproducible runs, entropy when unset
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            opponent_hole_cards: DEFAULT_OPPONENT_HOLE_CARDS,
            n_threads: 1,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Load a config from json
    ///
    /// # Example
    ///
    /// ```
    /// use poker_odds::equity_calculator::SimulatorConfig;
    /// let config = SimulatorConfig::from_json(r#"{ "n_threads": 4 }"#).unwrap();
    /// assert_eq!(config.n_threads, 4);
    /// assert_eq!(config.opponent_hole_cards, 4);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, SimulatorError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_opponent_hole_cards(mut self, cards: usize) -> Self {
        self.opponent_hole_cards = cards;
        self
    }

    pub fn with_threads(mut self, n_threads: u8) -> Self {
        self.n_threads = n_threads;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.opponent_hole_cards, 4);
        assert_eq!(config.n_threads, 1);
        assert_eq!(config.seed, None);
        assert_eq!(SimulatorConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn test_from_json() {
        let config =
            SimulatorConfig::from_json(r#"{"opponent_hole_cards": 2, "seed": 99}"#).unwrap();
        assert_eq!(
            config,
            SimulatorConfig::default()
                .with_opponent_hole_cards(2)
                .with_seed(99)
        );
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(SimulatorConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_json() {
        match SimulatorConfig::from_json(r#"{"n_threads": -1}"#) {
            Err(SimulatorError::Config(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
