//! A player's hand: cards sorted descending by value.

use serde::{Deserialize, Serialize};

use super::card::{CardId, Rank, Suit};
use super::table::CardTable;

/// A hand of cards, highest value first.
///
/// Real moves remove cards; speculative moves leave the hand untouched and
/// mark cards `played` in the [`CardTable`] instead, so the "unplayed"
/// queries are what move enumeration and the heuristic consume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<CardId>,
}

impl Hand {
    /// A full thirteen-card suit: K, Q, J, 10, 9 … 2, A.
    #[must_use]
    pub fn full_suit(suit: Suit) -> Self {
        Self {
            cards: Rank::DESCENDING
                .iter()
                .map(|&rank| CardId::new(suit, rank))
                .collect(),
        }
    }

    /// Rebuild a hand from saved card ids. Order is preserved as given.
    #[must_use]
    pub(crate) fn from_cards(cards: Vec<CardId>) -> Self {
        Self { cards }
    }

    /// The cards, highest value first.
    #[must_use]
    pub fn cards(&self) -> &[CardId] {
        &self.cards
    }

    /// Typed lookup by canonical identity.
    #[must_use]
    pub fn find(&self, id: CardId) -> Option<CardId> {
        self.cards.iter().copied().find(|&c| c == id)
    }

    /// Remove a card. Returns true if it was held.
    pub fn remove(&mut self, id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == id) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether the hand holds no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over cards not yet played, highest value first.
    pub fn unplayed<'a>(&'a self, table: &'a CardTable) -> impl Iterator<Item = CardId> + 'a {
        self.cards
            .iter()
            .copied()
            .filter(move |&id| !table.card(id).played)
    }

    /// The highest-value unplayed card, if any.
    #[must_use]
    pub fn highest_unplayed(&self, table: &CardTable) -> Option<CardId> {
        self.unplayed(table).next()
    }

    /// The lowest-value unplayed card, if any.
    #[must_use]
    pub fn lowest_unplayed(&self, table: &CardTable) -> Option<CardId> {
        self.unplayed(table).last()
    }

    /// Whether any card remains unplayed.
    #[must_use]
    pub fn has_unplayed(&self, table: &CardTable) -> bool {
        self.unplayed(table).next().is_some()
    }

    /// Sum of unplayed card values: the hand's future scoring capacity.
    #[must_use]
    pub fn potential(&self, table: &CardTable) -> i64 {
        self.unplayed(table).map(CardId::value).sum()
    }
}
