//! # cardslide
//!
//! Engine for a four-sided card-insertion board game for 2–4 players, with a
//! maxN tree-search AI.
//!
//! ## The game
//!
//! Each seat owns one full suit. The board starts in a setup phase where
//! moves fill designated blank cells directly; once the last blank is filled
//! the game is permanently in the rotation phase, where a card is inserted
//! from an outside edge, shifting the whole row or column and discarding the
//! cell pushed off the far end. The center cell is a pinned joker that never
//! moves. Points come from the eight cells around the joker, weighted per
//! ring, and accrue to whoever is about to move.
//!
//! ## Design notes
//!
//! - **N-player first**: scores are independent per seat, so the AI runs a
//!   maxN search rather than two-player minimax.
//! - **Shared mutable board**: the search tries candidates against the real
//!   grid and restores it from a value-semantic snapshot after every trial.
//! - **Deterministic randomness**: agents hold seeded, forkable RNGs; tie
//!   breaking is uniform among equal-value moves without sacrificing
//!   reproducibility.
//! - **Tunables over literals**: scoring weights and heuristic constants
//!   live in [`GameConfig`] and [`EvalWeights`].
//!
//! ## Modules
//!
//! - `core`: seats, per-player storage, RNG, configuration
//! - `cards`: suits, ranks, canonical card ids, hands, the instance table
//! - `board`: grid, insertion mechanics, scoring, snapshots
//! - `game`: game state, move enumeration/application, session driver,
//!   persistence snapshots
//! - `search`: maxN recursion and leaf evaluation
//! - `agents`: the per-turn move contract and built-in players

pub mod agents;
pub mod board;
pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod search;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap};

pub use crate::cards::{Card, CardId, CardTable, Hand, Rank, Suit};

pub use crate::board::{BlankCell, BlankId, Board, BoardSnapshot, Cell, Discard, GridSnapshot};

pub use crate::error::{MoveError, SnapshotError};

pub use crate::game::{
    CardPolicy, GameSnapshot, GameState, PlayerSetup, PlayerState, Ply, PlyRecord, Session,
    TrialMove, SNAPSHOT_VERSION,
};

pub use crate::search::{evaluate, EvalWeights, MaxNSearch, SearchConfig};

pub use crate::agents::{Agent, RandomAgent, TreeSearchAgent};
