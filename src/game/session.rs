//! The session driver: one agent per seat, turns until the game ends.

use std::time::{Duration, Instant};

use super::GameState;
use crate::agents::Agent;
use crate::error::MoveError;

/// A running game: state plus one agent per seat.
pub struct Session {
    state: GameState,
    agents: Vec<Box<dyn Agent>>,
}

impl Session {
    /// Create a session. Agents are seat-aligned with the players.
    #[must_use]
    pub fn new(state: GameState, agents: Vec<Box<dyn Agent>>) -> Self {
        assert_eq!(
            agents.len(),
            state.player_count(),
            "one agent per seat required"
        );
        Self { state, agents }
    }

    /// The game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the session, returning the state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Run one turn: ask the acting seat's agent for a move and apply it.
    ///
    /// A rejected move from a non-automated agent comes back as an error with
    /// the state unchanged, for the caller to re-prompt. Automated agents are
    /// backed by the enumerator, so a rejection there is a fault and panics
    /// with the offending move and board.
    pub fn turn(&mut self) -> Result<(), MoveError> {
        let player = self.state.to_move();
        let agent = &mut self.agents[player.index()];
        let automated = agent.automated();
        let ply = agent.make_move(&self.state);

        match self.state.apply_move(ply) {
            Ok(_) => {
                log::info!("{} played {ply}", self.state.players()[player]);
                Ok(())
            }
            Err(err) if automated => panic!(
                "agent for {} produced an illegal move {ply} ({err}) on\n{}",
                self.state.players()[player],
                self.state.board()
            ),
            Err(err) => {
                log::warn!("move rejected for {}: {err}", self.state.players()[player]);
                Err(err)
            }
        }
    }

    /// Run turns until the game ends.
    ///
    /// Rejected moves are logged and the seat is simply asked again next
    /// iteration, so a non-automated agent that never produces a legal move
    /// will spin here.
    pub fn run(&mut self) -> &GameState {
        while !self.state.is_over() {
            let _ = self.turn();
        }
        &self.state
    }

    /// Chain automated turns under an advisory wall-clock budget.
    ///
    /// Stops when the game ends, a non-automated seat comes up, or the
    /// budget has been spent. The budget bounds the chain, not a single
    /// move. Returns the number of turns taken.
    pub fn drive_automated(&mut self, budget: Duration) -> usize {
        let start = Instant::now();
        let mut taken = 0;

        while !self.state.is_over() && self.agents[self.state.to_move().index()].automated() {
            self.turn()
                .expect("automated moves are never rejected");
            taken += 1;
            if start.elapsed() > budget {
                break;
            }
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{RandomAgent, TreeSearchAgent};
    use crate::cards::Suit;
    use crate::core::{GameConfig, PlayerId};
    use crate::game::{PlayerSetup, Ply};
    use crate::search::SearchConfig;

    fn two_player_state() -> GameState {
        GameState::new(
            GameConfig::default(),
            vec![
                PlayerSetup::new("A", Suit::Hearts),
                PlayerSetup::new("B", Suit::Diamonds),
            ],
        )
    }

    #[test]
    fn test_random_game_runs_to_completion() {
        let mut session = Session::new(
            two_player_state(),
            vec![
                Box::new(RandomAgent::new(1)),
                Box::new(RandomAgent::new(2)),
            ],
        );

        let state = session.run();

        assert!(state.is_over());
        assert_eq!(state.history().len(), 26);
        assert!(state.board().is_finalized());
    }

    #[test]
    fn test_tree_search_game_runs_to_completion() {
        let mut session = Session::new(
            two_player_state(),
            vec![
                Box::new(TreeSearchAgent::new(
                    SearchConfig::default().with_depth(1).with_seed(1),
                )),
                Box::new(RandomAgent::new(2)),
            ],
        );

        let state = session.run();
        assert!(state.is_over());
    }

    #[test]
    fn test_drive_automated_stops_at_game_end() {
        let mut session = Session::new(
            two_player_state(),
            vec![
                Box::new(RandomAgent::new(1)),
                Box::new(RandomAgent::new(2)),
            ],
        );

        let taken = session.drive_automated(Duration::from_secs(5));

        assert_eq!(taken, 26);
        assert!(session.state().is_over());
    }

    #[test]
    fn test_drive_automated_respects_budget() {
        let mut session = Session::new(
            two_player_state(),
            vec![
                Box::new(RandomAgent::new(1)),
                Box::new(RandomAgent::new(2)),
            ],
        );

        // A zero budget still allows the first move, then stops.
        let taken = session.drive_automated(Duration::ZERO);

        assert_eq!(taken, 1);
        assert!(!session.state().is_over());
    }

    /// External adapter standing in for a human: returns scripted plies.
    struct Scripted {
        plies: Vec<Ply>,
    }

    impl Agent for Scripted {
        fn make_move(&mut self, _state: &GameState) -> Ply {
            self.plies.remove(0)
        }

        fn automated(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_rejected_external_move_is_recoverable() {
        let state = two_player_state();
        let bad = Ply {
            card: crate::cards::CardId::new(Suit::Diamonds, crate::cards::Rank::King),
            row: 1,
            column: 1,
        };
        let good = state.legal_plies(PlayerId::new(0))[0];

        let mut session = Session::new(
            state,
            vec![
                Box::new(Scripted {
                    plies: vec![bad, good],
                }),
                Box::new(RandomAgent::new(2)),
            ],
        );

        // First attempt references a card the seat does not hold.
        let err = session.turn().unwrap_err();
        assert!(matches!(err, MoveError::CardNotHeld { .. }));
        assert_eq!(session.state().to_move(), PlayerId::new(0));
        assert_eq!(session.state().history().len(), 0);

        // Re-prompting succeeds.
        session.turn().unwrap();
        assert_eq!(session.state().history().len(), 1);
    }
}
