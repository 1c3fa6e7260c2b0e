//! Central card instance store.

use rustc_hash::FxHashMap;

use super::card::{Card, CardId};

/// All card instances in a game, keyed by canonical identity.
///
/// The grid and the hands both reference cards by `CardId`; the table is
/// where the mutable `played`/`discarded` flags live.
#[derive(Clone, Debug, Default)]
pub struct CardTable {
    cards: FxHashMap<CardId, Card>,
}

impl CardTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card instance. Identities are unique per game.
    pub fn insert(&mut self, card: Card) {
        let previous = self.cards.insert(card.id, card);
        assert!(previous.is_none(), "duplicate card instance {}", card.id);
    }

    /// Look up a card instance.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a card instance, panicking if it does not exist.
    ///
    /// Every id reachable from a hand or a grid cell was registered at game
    /// start; a miss is an internal-consistency fault.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        self.cards
            .get(&id)
            .unwrap_or_else(|| panic!("card {id} has no registered instance"))
    }

    /// Mutable access to a card instance, panicking if it does not exist.
    pub fn card_mut(&mut self, id: CardId) -> &mut Card {
        self.cards
            .get_mut(&id)
            .unwrap_or_else(|| panic!("card {id} has no registered instance"))
    }

    /// Number of registered instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all instances in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::core::PlayerId;

    #[test]
    fn test_insert_and_get() {
        let mut table = CardTable::new();
        let id = CardId::new(Suit::Hearts, Rank::Seven);
        table.insert(Card::new(id, PlayerId::new(0)));

        assert_eq!(table.len(), 1);
        assert_eq!(table.card(id).owner, PlayerId::new(0));
        assert!(table.get(CardId::new(Suit::Clubs, Rank::Seven)).is_none());
    }

    #[test]
    fn test_flag_mutation() {
        let mut table = CardTable::new();
        let id = CardId::new(Suit::Spades, Rank::Ace);
        table.insert(Card::new(id, PlayerId::new(1)));

        table.card_mut(id).played = true;
        assert!(table.card(id).played);

        table.card_mut(id).played = false;
        assert!(!table.card(id).played);
    }

    #[test]
    #[should_panic(expected = "duplicate card instance")]
    fn test_duplicate_insert_panics() {
        let mut table = CardTable::new();
        let id = CardId::new(Suit::Hearts, Rank::Two);
        table.insert(Card::new(id, PlayerId::new(0)));
        table.insert(Card::new(id, PlayerId::new(1)));
    }

    #[test]
    #[should_panic(expected = "has no registered instance")]
    fn test_missing_card_panics() {
        let table = CardTable::new();
        let _ = table.card(CardId::new(Suit::Diamonds, Rank::King));
    }
}
