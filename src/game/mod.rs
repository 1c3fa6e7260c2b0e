//! Game state: board, seats, cards, turn order, history.

pub mod moves;
pub mod session;
pub mod snapshot;

pub use moves::TrialMove;
pub use session::Session;
pub use snapshot::{GameSnapshot, SNAPSHOT_VERSION};

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Discard};
use crate::cards::{Card, CardTable, Hand, Suit};
use crate::core::{GameConfig, PlayerId, PlayerMap};

/// A proposed move: card + target position.
///
/// Coordinates are 1-based interior cells during setup and 0/(size+1)
/// sentinel edge coordinates during rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ply {
    /// The card to place.
    pub card: crate::cards::CardId,

    /// Target row.
    pub row: usize,

    /// Target column.
    pub column: usize,
}

impl std::fmt::Display for Ply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}, {}", self.card, self.row, self.column)
    }
}

/// One applied move and what it displaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlyRecord {
    /// The move.
    pub ply: Ply,

    /// What it pushed off or replaced.
    pub discard: Discard,
}

/// Which cards a seat offers to move enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardPolicy {
    /// Always play the highest-value card.
    #[default]
    Highest,

    /// Consider the highest and the lowest card, widening search breadth.
    HighLow,
}

/// Seat description handed to [`GameState::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    /// Display name.
    pub name: String,

    /// The suit this seat owns.
    pub suit: Suit,

    /// Card-choice policy for move enumeration.
    pub policy: CardPolicy,
}

impl PlayerSetup {
    /// A seat with the default policy.
    #[must_use]
    pub fn new(name: impl Into<String>, suit: Suit) -> Self {
        Self {
            name: name.into(),
            suit,
            policy: CardPolicy::default(),
        }
    }

    /// Override the card-choice policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CardPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// A seated player.
#[derive(Clone, Debug)]
pub struct PlayerState {
    name: String,
    suit: Suit,
    score: i64,
    hand: Hand,
    policy: CardPolicy,
}

impl PlayerState {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The suit this seat owns.
    #[must_use]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Cumulative score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The seat's hand.
    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Card-choice policy.
    #[must_use]
    pub fn policy(&self) -> CardPolicy {
        self.policy
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.suit)
    }
}

/// Complete game state.
///
/// Cloning is cheap enough for search agents to work on a private copy: the
/// grid is a small `Vec` of `Copy` cells and the history shares structure.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    players: PlayerMap<PlayerState>,
    cards: CardTable,
    turn: PlayerId,
    history: Vector<PlyRecord>,
    game_over: bool,
}

impl GameState {
    /// Start a game: build the board and deal each seat its full suit.
    ///
    /// Panics unless there are 2–4 seats with pairwise-distinct suits.
    #[must_use]
    pub fn new(config: GameConfig, seats: Vec<PlayerSetup>) -> Self {
        assert!(
            (2..=4).contains(&seats.len()),
            "supported seat counts are 2-4, got {}",
            seats.len()
        );
        for (i, a) in seats.iter().enumerate() {
            for b in &seats[i + 1..] {
                assert!(a.suit != b.suit, "duplicate suit {} across seats", a.suit);
            }
        }

        let board = Board::new(&config);
        let players = PlayerMap::new(seats.len(), |id| {
            let seat = &seats[id.index()];
            PlayerState {
                name: seat.name.clone(),
                suit: seat.suit,
                score: 0,
                hand: Hand::full_suit(seat.suit),
                policy: seat.policy,
            }
        });

        let mut cards = CardTable::new();
        for (player, state) in players.iter() {
            for &id in state.hand.cards() {
                cards.insert(Card::new(id, player));
            }
        }

        Self {
            config,
            board,
            players,
            cards,
            turn: PlayerId::new(0),
            history: Vector::new(),
            game_over: false,
        }
    }

    /// The game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All seats.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    /// The card instance table.
    #[must_use]
    pub fn cards(&self) -> &CardTable {
        &self.cards
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Whose turn it is.
    #[must_use]
    pub fn to_move(&self) -> PlayerId {
        self.turn
    }

    /// Applied moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<PlyRecord> {
        &self.history
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// The seat after `player` in turn order.
    #[must_use]
    pub fn next_player(&self, player: PlayerId) -> PlayerId {
        PlayerId::new(((player.index() + 1) % self.player_count()) as u8)
    }

    /// The seat owning a suit, if any does.
    #[must_use]
    pub fn player_by_suit(&self, suit: Suit) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, state)| state.suit == suit)
            .map(|(player, _)| player)
    }

    /// Textual status for rendering collaborators: whose turn, their current
    /// board score and hand, or the final standings once the game is over.
    #[must_use]
    pub fn status(&self) -> String {
        if self.game_over {
            return self.standings();
        }
        let seat = &self.players[self.turn];
        let hand: Vec<String> = seat
            .hand
            .cards()
            .iter()
            .map(|id| id.rank().token().to_string())
            .collect();
        format!(
            "{}'s turn\nThey scored {} points\nThey have in their hand:\n[{}]",
            seat,
            self.board.score(seat.suit),
            hand.join(", ")
        )
    }

    /// Final standings text.
    #[must_use]
    pub fn standings(&self) -> String {
        let lines: Vec<String> = self
            .players
            .iter()
            .map(|(_, seat)| format!("{}: {}", seat, seat.score))
            .collect();
        let winner = self
            .players
            .iter()
            .max_by_key(|(_, seat)| seat.score)
            .map(|(_, seat)| seat.name.clone())
            .unwrap_or_default();
        format!("Final score:\n{}\n{} Wins!", lines.join("\n"), winner)
    }

    /// Adjust a seat's cumulative score.
    ///
    /// A single adjustment above the configured ceiling is corrupted state,
    /// not a legitimate game event, and asserts.
    pub(crate) fn credit_score(&mut self, player: PlayerId, delta: i64) {
        assert!(
            delta <= self.config.score_ceiling,
            "score adjustment {delta} for {} exceeds the sanity ceiling {}",
            self.players[player],
            self.config.score_ceiling
        );
        self.players[player].score += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    fn three_seats() -> Vec<PlayerSetup> {
        vec![
            PlayerSetup::new("Matt", Suit::Hearts),
            PlayerSetup::new("Rob", Suit::Diamonds),
            PlayerSetup::new("Helen", Suit::Clubs),
        ]
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(GameConfig::default(), three_seats());

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.to_move(), PlayerId::new(0));
        assert!(!state.is_over());
        assert_eq!(state.cards().len(), 39);
        assert_eq!(state.players()[PlayerId::new(1)].hand().cards().len(), 13);
        assert!(state.board().in_setup_phase());
    }

    #[test]
    fn test_turn_order_wraps() {
        let state = GameState::new(GameConfig::default(), three_seats());

        assert_eq!(state.next_player(PlayerId::new(0)), PlayerId::new(1));
        assert_eq!(state.next_player(PlayerId::new(2)), PlayerId::new(0));
    }

    #[test]
    fn test_player_by_suit() {
        let state = GameState::new(GameConfig::default(), three_seats());

        assert_eq!(state.player_by_suit(Suit::Diamonds), Some(PlayerId::new(1)));
        assert_eq!(state.player_by_suit(Suit::Spades), None);
    }

    #[test]
    fn test_status_text() {
        let state = GameState::new(GameConfig::default(), three_seats());
        let status = state.status();

        assert!(status.starts_with("Matt (♥)'s turn"));
        assert!(status.contains("scored 0 points"));
        assert!(status.contains("[K, Q, J, 0, 9, 8, 7, 6, 5, 4, 3, 2, A]"));
    }

    #[test]
    #[should_panic(expected = "duplicate suit")]
    fn test_duplicate_suits_rejected() {
        GameState::new(
            GameConfig::default(),
            vec![
                PlayerSetup::new("A", Suit::Hearts),
                PlayerSetup::new("B", Suit::Hearts),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "supported seat counts")]
    fn test_single_seat_rejected() {
        GameState::new(
            GameConfig::default(),
            vec![PlayerSetup::new("A", Suit::Hearts)],
        );
    }

    #[test]
    #[should_panic(expected = "exceeds the sanity ceiling")]
    fn test_score_ceiling_asserts() {
        let mut state = GameState::new(GameConfig::default(), three_seats());
        state.credit_score(PlayerId::new(0), 501);
    }

    #[test]
    fn test_ply_display() {
        let ply = Ply {
            card: crate::cards::CardId::new(Suit::Hearts, Rank::King),
            row: 0,
            column: 2,
        };
        assert_eq!(format!("{ply}"), "K♥ at 0, 2");
    }
}
