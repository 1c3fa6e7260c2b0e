//! Agents: the per-turn move contract and its built-in implementations.
//!
//! Anything that can produce a ply for the acting player is an [`Agent`]:
//! the built-in random and tree-search players here, or an external adapter
//! collecting human input. Automated agents are held to a stricter contract,
//! where an illegal move is a fault rather than a retry.

use crate::core::GameRng;
use crate::game::{GameState, Ply};
use crate::search::{MaxNSearch, SearchConfig};

/// The per-turn move contract.
pub trait Agent {
    /// Produce a ply for the player to act in `state`.
    ///
    /// The ply must reference a card that player actually holds; for an
    /// automated agent a violation aborts the session.
    fn make_move(&mut self, state: &GameState) -> Ply;

    /// Whether this agent acts without outside input. Automated agents may
    /// be chained by the turn driver and never get a second chance at an
    /// illegal move.
    fn automated(&self) -> bool {
        true
    }
}

/// Plays the highest card at a uniformly random legal position.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    /// Create a random agent with its own seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn make_move(&mut self, state: &GameState) -> Ply {
        let player = state.to_move();
        let card = state.players()[player]
            .hand()
            .highest_unplayed(state.cards())
            .expect("asked to move with an exhausted hand");

        let open = state.board().open_cells();
        let (row, column) = if open.is_empty() {
            let n = state.board().size();
            let line = self.rng.gen_range_usize(1..n + 1);
            let edge = if self.rng.gen_bool(0.5) { 0 } else { n + 1 };
            if self.rng.gen_bool(0.5) {
                (edge, line)
            } else {
                (line, edge)
            }
        } else {
            *self.rng.choose(&open).expect("open cells are non-empty")
        };

        Ply { card, row, column }
    }
}

/// Chooses moves by depth-bounded maxN search.
#[derive(Clone, Debug)]
pub struct TreeSearchAgent {
    search: MaxNSearch,
    rng: GameRng,
}

impl TreeSearchAgent {
    /// Create a tree-search agent.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            search: MaxNSearch::new(config),
        }
    }

    /// The search configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        self.search.config()
    }
}

impl Agent for TreeSearchAgent {
    fn make_move(&mut self, state: &GameState) -> Ply {
        log::debug!("tree search for {}", state.players()[state.to_move()]);

        // Search on a private copy; the per-decision fork keeps every search
        // reproducible regardless of how many came before it. Canonical card
        // ids make the chosen ply directly valid against the real state.
        let mut scratch = state.clone();
        let mut rng = self.rng.fork();
        let (values, ply) = self.search.best_move(&mut scratch, &mut rng);

        log::debug!("tree search done: {ply}, projected {values:?}");
        ply
    }
}
