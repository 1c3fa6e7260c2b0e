//! Grid cells and discards.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Index of a blank into the board's blank list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlankId(pub u8);

impl BlankId {
    /// Create a new blank id.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw index into the blank list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// The special center cell. Exactly one; never moves, never scores.
    Joker,

    /// Unowned zero-value cell seeded at construction. Shifts and discards
    /// like any card but belongs to nobody.
    Neutral,

    /// A setup-phase placeholder.
    Blank(BlankId),

    /// A played card.
    Card(CardId),
}

impl Cell {
    /// Scoring value of the occupant. Only real cards are worth anything.
    #[must_use]
    pub fn value(self) -> i64 {
        match self {
            Cell::Card(id) => id.value(),
            _ => 0,
        }
    }

    /// Suit of the occupant, if it is a real card.
    #[must_use]
    pub fn suit(self) -> Option<crate::cards::Suit> {
        match self {
            Cell::Card(id) => Some(id.suit()),
            _ => None,
        }
    }

    /// Display token for rendering collaborators.
    #[must_use]
    pub fn token(self) -> String {
        match self {
            Cell::Joker => "Jkr".to_string(),
            Cell::Neutral => "*".to_string(),
            Cell::Blank(_) => " ".to_string(),
            Cell::Card(id) => id.to_string(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A setup-phase blank and its bookkeeping.
///
/// Blanks never move: setup is the only phase in which they sit on the grid,
/// and setup moves replace cells rather than shifting them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlankCell {
    /// The 1-based board coordinate this blank was created at.
    pub origin: (usize, usize),

    /// Set once the blank has been replaced or pushed off. Speculative moves
    /// set and later restore it; real moves set it for good.
    pub discarded: bool,
}

impl BlankCell {
    /// Create a live blank at a 1-based coordinate.
    #[must_use]
    pub fn new(origin: (usize, usize)) -> Self {
        Self {
            origin,
            discarded: false,
        }
    }
}

/// The cell displaced off the board by an insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discard {
    /// A real card was pushed off.
    Card(CardId),

    /// A blank was consumed (setup) or pushed off.
    Blank(BlankId),

    /// A neutral seed cell fell off; nothing to record.
    Neutral,
}
