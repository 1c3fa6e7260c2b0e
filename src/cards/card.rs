//! Card identities and instances.
//!
//! `CardId` is the canonical identity of a card: suit + rank. It is the
//! uniform lookup key everywhere. Hands, grid cells, and the instance table
//! all speak `CardId`, so a ply chosen on a cloned state is directly valid
//! against the real one.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One of the four playing-card suits. Each seated player owns exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits, in seating order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Display symbol for this suit.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in descending play value. Equal-value court cards keep a
    /// fixed order so hands sort deterministically: K, Q, J, 10 first, A last.
    pub const DESCENDING: [Rank; 13] = [
        Rank::King,
        Rank::Queen,
        Rank::Jack,
        Rank::Ten,
        Rank::Nine,
        Rank::Eight,
        Rank::Seven,
        Rank::Six,
        Rank::Five,
        Rank::Four,
        Rank::Three,
        Rank::Two,
        Rank::Ace,
    ];

    /// Scoring value: 2–9 count face value, tens and court cards count 10,
    /// the ace counts 1.
    #[must_use]
    pub const fn value(self) -> i64 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    /// Single-character display token. Ten renders as `0` so every cell is
    /// the same width.
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => '0',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }
}

/// Canonical card identity: suit + rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId {
    suit: Suit,
    rank: Rank,
}

impl CardId {
    /// Create a card identity.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// The card's suit.
    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    /// The card's rank.
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// The card's scoring value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.rank.value()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.token(), self.suit.symbol())
    }
}

/// A card instance in a game.
///
/// Identity and ownership are fixed at game start; only the two flags change,
/// and only through moves (or their undo).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Canonical identity.
    pub id: CardId,

    /// The seat this card belongs to.
    pub owner: PlayerId,

    /// Set when the card has been placed on the board. Speculative moves set
    /// it without removing the card from the hand.
    pub played: bool,

    /// Set when the card has been pushed off the board.
    pub discarded: bool,
}

impl Card {
    /// Create an unplayed card instance.
    #[must_use]
    pub fn new(id: CardId, owner: PlayerId) -> Self {
        Self {
            id,
            owner,
            played: false,
            discarded: false,
        }
    }
}
