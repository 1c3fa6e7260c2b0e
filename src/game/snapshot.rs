//! Versioned persistence snapshots.
//!
//! The engine exposes one complete, self-sufficient schema and leaves storage
//! to external collaborators. Restoration validates structure (version, grid
//! shape, joker placement, card/seat consistency) and rejects rather than
//! panics, since snapshot bytes come from outside the engine.

use serde::{Deserialize, Serialize};

use super::{CardPolicy, GameState, PlayerState, PlyRecord};
use crate::board::{Board, BoardSnapshot};
use crate::cards::{Card, CardId, CardTable, Hand, Suit};
use crate::core::{GameConfig, PlayerId, PlayerMap};
use crate::error::SnapshotError;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted seat state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Display name.
    pub name: String,

    /// Owned suit.
    pub suit: Suit,

    /// Cumulative score.
    pub score: i64,

    /// Hand contents, highest value first.
    pub hand: Vec<CardId>,

    /// Card-choice policy.
    pub policy: CardPolicy,
}

/// A complete game snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Schema version, checked on restore.
    pub version: u32,

    /// Board geometry and scoring tunables.
    pub config: GameConfig,

    /// Grid cells, blank bookkeeping, finalization.
    pub board: BoardSnapshot,

    /// All card instances, sorted by identity for stable bytes.
    pub cards: Vec<Card>,

    /// Seats in turn order.
    pub players: Vec<PlayerSnapshot>,

    /// Whose turn it is.
    pub turn: u8,

    /// Applied moves, oldest first.
    pub history: Vec<PlyRecord>,

    /// Whether the game has ended.
    pub game_over: bool,
}

impl GameSnapshot {
    /// Capture a game.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        let mut cards: Vec<Card> = state.cards().iter().copied().collect();
        cards.sort_by_key(|card| card.id);

        Self {
            version: SNAPSHOT_VERSION,
            config: state.config().clone(),
            board: BoardSnapshot::capture(state.board()),
            cards,
            players: state
                .players()
                .iter()
                .map(|(_, seat)| PlayerSnapshot {
                    name: seat.name().to_string(),
                    suit: seat.suit(),
                    score: seat.score(),
                    hand: seat.hand().cards().to_vec(),
                    policy: seat.policy(),
                })
                .collect(),
            turn: state.to_move().0,
            history: state.history().iter().copied().collect(),
            game_over: state.is_over(),
        }
    }

    /// Rebuild a game, validating structure.
    pub fn restore(&self) -> Result<GameState, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(self.version));
        }
        if !(2..=4).contains(&self.players.len()) {
            return Err(SnapshotError::Malformed(format!(
                "{} seats, expected 2-4",
                self.players.len()
            )));
        }
        if (self.turn as usize) >= self.players.len() {
            return Err(SnapshotError::Malformed(format!(
                "turn index {} with {} seats",
                self.turn,
                self.players.len()
            )));
        }
        for (i, a) in self.players.iter().enumerate() {
            for b in &self.players[i + 1..] {
                if a.suit == b.suit {
                    return Err(SnapshotError::Malformed(format!(
                        "suit {} appears on two seats",
                        a.suit
                    )));
                }
            }
        }

        let board = Board::from_saved(
            &self.config,
            self.board.cells.clone(),
            self.board.blanks.clone(),
            self.board.finalized,
        )
        .map_err(SnapshotError::Malformed)?;

        let mut cards = CardTable::new();
        for &card in &self.cards {
            if card.owner.index() >= self.players.len() {
                return Err(SnapshotError::Malformed(format!(
                    "card {} owned by missing seat {}",
                    card.id, card.owner
                )));
            }
            if cards.get(card.id).is_some() {
                return Err(SnapshotError::Malformed(format!(
                    "duplicate card instance {}",
                    card.id
                )));
            }
            cards.insert(card);
        }
        for seat in &self.players {
            for &id in &seat.hand {
                if cards.get(id).is_none() {
                    return Err(SnapshotError::Malformed(format!(
                        "hand card {id} has no instance"
                    )));
                }
            }
        }

        let players = PlayerMap::new(self.players.len(), |id| {
            let seat = &self.players[id.index()];
            PlayerState {
                name: seat.name.clone(),
                suit: seat.suit,
                score: seat.score,
                hand: Hand::from_cards(seat.hand.clone()),
                policy: seat.policy,
            }
        });

        Ok(GameState {
            config: self.config.clone(),
            board,
            players,
            cards,
            turn: PlayerId::new(self.turn),
            history: self.history.iter().copied().collect(),
            game_over: self.game_over,
        })
    }

    /// Encode to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
