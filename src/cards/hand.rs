//! A player's hand: an unordered multiset of physical cards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Card, CardType, NUM_CARD_TYPES};

/// Unordered collection of physical cards owned by one player.
///
/// Cards are kept sorted by physical index so that two hands holding the
/// same cards compare equal regardless of acquisition order. Inline storage
/// covers typical hand sizes without heap allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Card; 8]>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Add a card, keeping the hand sorted.
    pub fn add(&mut self, card: Card) {
        let pos = self.cards.partition_point(|&c| c < card);
        self.cards.insert(pos, card);
    }

    /// Remove a specific physical card.
    ///
    /// Returns true if the card was held and removed.
    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check whether a specific physical card is held.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Iterate over held cards in physical-index order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// Number of held cards of the given type.
    #[must_use]
    pub fn count_type(&self, card_type: CardType) -> usize {
        self.cards
            .iter()
            .filter(|c| c.card_type() == card_type)
            .count()
    }

    /// First held card of the given type, if any.
    #[must_use]
    pub fn first_of_type(&self, card_type: CardType) -> Option<Card> {
        self.cards().find(|c| c.card_type() == card_type)
    }

    /// Held card counts per card type, in tensor-index order.
    #[must_use]
    pub fn type_counts(&self) -> [u8; NUM_CARD_TYPES] {
        let mut counts = [0u8; NUM_CARD_TYPES];
        for card in &self.cards {
            counts[card.card_type().index()] += 1;
        }
        counts
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for card in &self.cards {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_sorted() {
        let mut hand = Hand::new();
        hand.add(Card::new(5));
        hand.add(Card::new(1));
        hand.add(Card::new(9));

        let cards: Vec<_> = hand.cards().collect();
        assert_eq!(cards, vec![Card::new(1), Card::new(5), Card::new(9)]);
    }

    #[test]
    fn test_order_independent_equality() {
        let mut a = Hand::new();
        a.add(Card::new(3));
        a.add(Card::new(7));

        let mut b = Hand::new();
        b.add(Card::new(7));
        b.add(Card::new(3));

        assert_eq!(a, b);
    }

    #[test]
    fn test_remove() {
        let mut hand = Hand::new();
        hand.add(Card::new(2));
        hand.add(Card::new(4));

        assert!(hand.remove(Card::new(2)));
        assert!(!hand.remove(Card::new(2)));
        assert_eq!(hand.len(), 1);
        assert!(hand.contains(Card::new(4)));
    }

    #[test]
    fn test_count_type() {
        let mut hand = Hand::new();
        // Cards 0-4 are Skip, 16-18 are Cat1 in deck 0.
        hand.add(Card::new(0));
        hand.add(Card::new(3));
        hand.add(Card::new(16));

        assert_eq!(hand.count_type(CardType::Skip), 2);
        assert_eq!(hand.count_type(CardType::Cat1), 1);
        assert_eq!(hand.count_type(CardType::Defuse), 0);
    }

    #[test]
    fn test_first_of_type() {
        let mut hand = Hand::new();
        hand.add(Card::new(4));
        hand.add(Card::new(1));

        assert_eq!(hand.first_of_type(CardType::Skip), Some(Card::new(1)));
        assert_eq!(hand.first_of_type(CardType::Shuffle), None);
    }

    #[test]
    fn test_type_counts() {
        let mut hand = Hand::new();
        hand.add(Card::new(0)); // Skip
        hand.add(Card::new(19)); // Defuse

        let counts = hand.type_counts();
        assert_eq!(counts[CardType::Skip.index()], 1);
        assert_eq!(counts[CardType::Defuse.index()], 1);
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 2);
    }

    #[test]
    fn test_display() {
        let mut hand = Hand::new();
        hand.add(Card::new(21));
        hand.add(Card::new(0));
        assert_eq!(format!("{hand}"), "Skip(0) ExplodingKitten(21)");
    }
}
