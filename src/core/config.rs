//! Board geometry and scoring tunables.

use serde::{Deserialize, Serialize};

/// Game configuration: board geometry and scoring constants.
///
/// The defaults reproduce the standard game (5×5 board, twelve setup blanks
/// around the rim, rings weighted 1/2). The constants are configuration
/// rather than literals because they are empirically tuned, not structural.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board side length. Must be odd so a unique center cell exists.
    pub board_size: usize,

    /// 0-based grid coordinates seeded with setup-phase blanks.
    pub blank_cells: Vec<(usize, usize)>,

    /// Score weight for the four cells diagonally adjacent to the center.
    pub diagonal_weight: i64,

    /// Score weight for the four cells orthogonally adjacent to the center.
    pub orthogonal_weight: i64,

    /// Sanity ceiling for a single score adjustment. Exceeding it means
    /// corrupted game state, not a legitimate game event.
    pub score_ceiling: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 5,
            blank_cells: vec![
                (0, 0),
                (0, 1),
                (0, 3),
                (0, 4),
                (1, 0),
                (1, 4),
                (3, 0),
                (3, 4),
                (4, 0),
                (4, 1),
                (4, 3),
                (4, 4),
            ],
            diagonal_weight: 1,
            orthogonal_weight: 2,
            score_ceiling: 500,
        }
    }
}

impl GameConfig {
    /// Override the board size.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Override the setup-blank coordinates (0-based).
    #[must_use]
    pub fn with_blank_cells(mut self, cells: Vec<(usize, usize)>) -> Self {
        self.blank_cells = cells;
        self
    }

    /// Override the two ring weights.
    #[must_use]
    pub fn with_ring_weights(mut self, diagonal: i64, orthogonal: i64) -> Self {
        self.diagonal_weight = diagonal;
        self.orthogonal_weight = orthogonal;
        self
    }

    /// 0-based index of the center cell along either axis.
    #[must_use]
    pub fn center(&self) -> usize {
        self.board_size / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.center(), 2);
        assert_eq!(config.blank_cells.len(), 12);
        assert_eq!(config.diagonal_weight, 1);
        assert_eq!(config.orthogonal_weight, 2);
        assert_eq!(config.score_ceiling, 500);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_board_size(7)
            .with_blank_cells(vec![(0, 0)])
            .with_ring_weights(2, 3);

        assert_eq!(config.board_size, 7);
        assert_eq!(config.center(), 3);
        assert_eq!(config.blank_cells, vec![(0, 0)]);
        assert_eq!(config.diagonal_weight, 2);
        assert_eq!(config.orthogonal_weight, 3);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
