//! Search configuration and evaluation tunables.

use serde::{Deserialize, Serialize};

/// Heuristic and terminal evaluation weights.
///
/// The defaults are the empirically tuned values the game ships with; none
/// of them is load-bearing for correctness, so they are configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Blend factor for the wait-scaled board score.
    pub board_blend: f64,

    /// Blend factor for remaining hand potential.
    pub hand_blend: f64,

    /// Presence bonus per point of card value on an outer corner.
    pub corner_bonus: f64,

    /// Presence bonus per point of card value on an outer-ring cell in line
    /// with the center.
    pub cross_bonus: f64,

    /// Bonus shared evenly among the winners at a terminal node.
    pub win_bonus: f64,

    /// Baseline every player starts from at a terminal node; far below any
    /// non-terminal value so losers separate unambiguously.
    pub loss_baseline: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            board_blend: 0.4,
            hand_blend: 0.4,
            corner_bonus: 0.2,
            cross_bonus: 0.5,
            win_bonus: 10_000.0,
            loss_baseline: -500.0,
        }
    }
}

/// Tree-search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Extra plies of lookahead below the root. Depth 0 evaluates each root
    /// candidate immediately.
    pub depth: u32,

    /// Seed for the tie-breaking RNG.
    pub seed: u64,

    /// Evaluation weights.
    pub weights: EvalWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            seed: 42,
            weights: EvalWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Override the lookahead depth.
    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Override the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the evaluation weights.
    #[must_use]
    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.weights.board_blend, 0.4);
        assert_eq!(config.weights.hand_blend, 0.4);
        assert_eq!(config.weights.corner_bonus, 0.2);
        assert_eq!(config.weights.cross_bonus, 0.5);
        assert_eq!(config.weights.win_bonus, 10_000.0);
        assert_eq!(config.weights.loss_baseline, -500.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default().with_depth(3).with_seed(7);
        assert_eq!(config.depth, 3);
        assert_eq!(config.seed, 7);
    }
}
