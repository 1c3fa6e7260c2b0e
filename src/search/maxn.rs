//! Depth-bounded maxN search.
//!
//! Every node maximizes the acting player's own projected value; scores are
//! independent per player, so there is no two-sided minimax to collapse to.
//! The board is shared mutable state across the whole recursion: each
//! candidate is tried against the real grid and undone from a snapshot before
//! the next one runs.

use super::config::SearchConfig;
use super::eval::evaluate;
use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::game::{GameState, Ply};

/// maxN game-tree search.
#[derive(Clone, Debug)]
pub struct MaxNSearch {
    config: SearchConfig,
}

impl MaxNSearch {
    /// Create a search with the given configuration.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// The search configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick the best move for the player to act.
    ///
    /// Mutates `state` during the search but leaves it exactly as found.
    /// Ties on the acting player's value are broken uniformly at random so
    /// repeated games do not become predictable.
    pub fn best_move(&self, state: &mut GameState, rng: &mut GameRng) -> (PlayerMap<f64>, Ply) {
        let zero = PlayerMap::with_value(state.player_count(), 0);
        self.node(state, self.config.depth, state.to_move(), &zero, rng)
    }

    fn node(
        &self,
        state: &mut GameState,
        depth: u32,
        turn: PlayerId,
        deltas: &PlayerMap<i64>,
        rng: &mut GameRng,
    ) -> (PlayerMap<f64>, Ply) {
        let plies = state.legal_plies(turn);
        assert!(!plies.is_empty(), "no candidate plies for {turn}");

        let snapshot = state.board().snapshot();
        let mut best: Option<PlayerMap<f64>> = None;
        let mut best_plies: Vec<Ply> = Vec::new();

        for ply in plies {
            let mut trial_deltas = deltas.clone();
            let trial = state
                .test_move(ply, turn, &mut trial_deltas)
                .unwrap_or_else(|err| {
                    panic!(
                        "search produced an illegal move {ply} ({err}) on\n{}",
                        state.board()
                    )
                });

            let values = if trial.game_over || depth == 0 {
                evaluate(
                    state,
                    &trial_deltas,
                    trial.next_turn,
                    trial.game_over,
                    &self.config.weights,
                )
            } else {
                self.node(state, depth - 1, trial.next_turn, &trial_deltas, rng)
                    .0
            };

            state.undo_trial(trial, &snapshot);

            match best.as_ref().map(|b| b[turn]) {
                Some(top) if values[turn] > top => {
                    best = Some(values);
                    best_plies.clear();
                    best_plies.push(ply);
                }
                Some(top) if values[turn] == top => best_plies.push(ply),
                Some(_) => {}
                None => {
                    best = Some(values);
                    best_plies.push(ply);
                }
            }
        }

        let choice = *rng
            .choose(&best_plies)
            .expect("at least one candidate survives");
        (best.expect("at least one candidate survives"), choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::core::GameConfig;
    use crate::game::PlayerSetup;

    fn three_player_game() -> GameState {
        GameState::new(
            GameConfig::default(),
            vec![
                PlayerSetup::new("Matt", Suit::Hearts),
                PlayerSetup::new("Rob", Suit::Diamonds),
                PlayerSetup::new("Helen", Suit::Clubs),
            ],
        )
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let mut state = three_player_game();
        let rows_before = state.board().display_rows();
        let open_before = state.board().open_cells();

        let search = MaxNSearch::new(SearchConfig::default());
        let mut rng = GameRng::new(1);
        let (_, ply) = search.best_move(&mut state, &mut rng);

        assert_eq!(state.board().display_rows(), rows_before);
        assert_eq!(state.board().open_cells(), open_before);
        assert!(!state.cards().card(ply.card).played);
        for card in state.cards().iter() {
            assert!(!card.played);
            assert!(!card.discarded);
        }
    }

    #[test]
    fn test_search_returns_legal_ply() {
        let mut state = three_player_game();
        let search = MaxNSearch::new(SearchConfig::default().with_depth(1));
        let mut rng = GameRng::new(1);

        let (_, ply) = search.best_move(&mut state, &mut rng);

        assert!(state.legal_plies(state.to_move()).contains(&ply));
        state.apply_move(ply).unwrap();
    }

    #[test]
    fn test_search_is_deterministic_per_seed() {
        let search = MaxNSearch::new(SearchConfig::default().with_depth(1));

        let mut state1 = three_player_game();
        let mut rng1 = GameRng::new(9);
        let (values1, ply1) = search.best_move(&mut state1, &mut rng1);

        let mut state2 = three_player_game();
        let mut rng2 = GameRng::new(9);
        let (values2, ply2) = search.best_move(&mut state2, &mut rng2);

        assert_eq!(ply1, ply2);
        assert_eq!(values1, values2);
    }

    #[test]
    fn test_depth_zero_matches_immediate_evaluation() {
        let mut state = three_player_game();
        let player = state.to_move();
        let weights = super::super::config::EvalWeights::default();

        // Recompute the one-ply values by hand.
        let mut expected_best = f64::NEG_INFINITY;
        let snapshot = state.board().snapshot();
        for ply in state.legal_plies(player) {
            let mut deltas = PlayerMap::with_value(3, 0);
            let trial = state.test_move(ply, player, &mut deltas).unwrap();
            let values = evaluate(&state, &deltas, trial.next_turn, trial.game_over, &weights);
            state.undo_trial(trial, &snapshot);
            if values[player] > expected_best {
                expected_best = values[player];
            }
        }

        let search = MaxNSearch::new(SearchConfig::default().with_depth(0));
        let mut rng = GameRng::new(3);
        let (values, _) = search.best_move(&mut state, &mut rng);

        assert_eq!(values[player], expected_best);
    }

    #[test]
    fn test_deep_search_completes_near_game_end() {
        let mut state = three_player_game();

        // Play until only the last few cards remain, then search past the
        // horizon: terminal nodes must be evaluated, not expanded.
        while state.history().len() < 37 {
            let ply = state.legal_plies(state.to_move())[0];
            state.apply_move(ply).unwrap();
        }

        let search = MaxNSearch::new(SearchConfig::default().with_depth(4));
        let mut rng = GameRng::new(5);
        let (values, ply) = search.best_move(&mut state, &mut rng);

        assert!(state.legal_plies(state.to_move()).contains(&ply));
        // Two moves from the end every leaf is terminal: someone carries a
        // win-bonus share.
        let top = PlayerId::all(3)
            .map(|p| values[p])
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(top > 1000.0);
    }
}
