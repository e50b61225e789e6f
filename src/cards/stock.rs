//! The stock (draw pile): unordered membership plus a determined top prefix.
//!
//! ## Representation
//!
//! Draw order is not materialized up front. The stock holds an unordered
//! membership set, and each draw is resolved by an explicit chance event
//! uniform over the undetermined cards. Order comes into existence only
//! where chance has already pinned it down:
//!
//! - SeeTheFuture reveals determine cards at the top, in order
//! - a defused kitten inserted at a depth inside the determined prefix
//!   stays determined
//!
//! The determined prefix (`known_top`) is drawn from deterministically
//! (single chance outcome with probability 1.0) until it is exhausted or
//! a Shuffle discards it back into the unordered set.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Card, NUM_CARDS};

/// The shared draw pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Membership of cards with no determined position.
    unordered: [bool; NUM_CARDS],
    unordered_count: u8,
    /// Determined cards at the top of the pile, front first.
    known_top: SmallVec<[Card; 4]>,
}

impl Stock {
    /// Create an empty stock.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            unordered: [false; NUM_CARDS],
            unordered_count: 0,
            known_top: SmallVec::new(),
        }
    }

    /// Create a stock containing the given cards, all undetermined.
    #[must_use]
    pub fn with_cards(cards: impl Iterator<Item = Card>) -> Self {
        let mut stock = Self::empty();
        for card in cards {
            stock.add_unordered(card);
        }
        stock
    }

    /// Total number of cards in the pile.
    #[must_use]
    pub fn size(&self) -> usize {
        self.unordered_count as usize + self.known_top.len()
    }

    /// Check whether a specific physical card is anywhere in the pile.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.unordered[card.index()] || self.known_top.contains(&card)
    }

    /// Add a card to the undetermined set.
    pub fn add_unordered(&mut self, card: Card) {
        debug_assert!(!self.contains(card), "card already in stock");
        self.unordered[card.index()] = true;
        self.unordered_count += 1;
    }

    /// Remove a card from the undetermined set.
    ///
    /// Returns true if the card was present.
    pub fn remove_unordered(&mut self, card: Card) -> bool {
        if self.unordered[card.index()] {
            self.unordered[card.index()] = false;
            self.unordered_count -= 1;
            true
        } else {
            false
        }
    }

    /// Iterate over undetermined cards in physical-index order.
    pub fn unordered_cards(&self) -> impl Iterator<Item = Card> + '_ {
        Card::all().filter(|c| self.unordered[c.index()])
    }

    /// Number of undetermined cards.
    #[must_use]
    pub fn unordered_count(&self) -> usize {
        self.unordered_count as usize
    }

    /// The determined top prefix, top card first.
    #[must_use]
    pub fn known_top(&self) -> &[Card] {
        &self.known_top
    }

    /// The top card, if its identity is determined.
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.known_top.first().copied()
    }

    /// The bottom card, determined only when no undetermined cards remain
    /// below the known prefix.
    #[must_use]
    pub fn bottom_card(&self) -> Option<Card> {
        if self.unordered_count == 0 {
            self.known_top.last().copied()
        } else {
            None
        }
    }

    /// Draw the determined top card.
    pub fn draw_known_top(&mut self) -> Card {
        debug_assert!(!self.known_top.is_empty());
        self.known_top.remove(0)
    }

    /// Draw the determined bottom card (only valid when fully determined).
    pub fn draw_known_bottom(&mut self) -> Card {
        debug_assert_eq!(self.unordered_count, 0);
        self.known_top.pop().expect("stock is not empty")
    }

    /// Move an undetermined card to the back of the determined prefix.
    ///
    /// This is how a SeeTheFuture chance outcome pins down the next card.
    pub fn determine_next(&mut self, card: Card) {
        let removed = self.remove_unordered(card);
        debug_assert!(removed, "card not in undetermined set");
        self.known_top.push(card);
    }

    /// Reinsert the exploding kitten at the given depth from the top.
    ///
    /// Depths inside (or directly below) the determined prefix keep the
    /// kitten's position determined; deeper insertions return it to the
    /// undetermined set.
    pub fn insert_kitten(&mut self, depth: usize) {
        debug_assert!(depth <= self.size());
        if depth <= self.known_top.len() {
            self.known_top.insert(depth, Card::EXPLODING_KITTEN);
        } else {
            self.add_unordered(Card::EXPLODING_KITTEN);
        }
    }

    /// Discard all ordering knowledge; membership is unchanged.
    pub fn forget_order(&mut self) {
        for card in std::mem::take(&mut self.known_top) {
            self.add_unordered(card);
        }
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stock[{}]", self.size())?;
        if !self.known_top.is_empty() {
            write!(f, " top:")?;
            for card in &self.known_top {
                write!(f, " {card}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    fn full_stock() -> Stock {
        Stock::with_cards(Card::all())
    }

    #[test]
    fn test_with_cards() {
        let stock = full_stock();
        assert_eq!(stock.size(), NUM_CARDS);
        assert_eq!(stock.unordered_count(), NUM_CARDS);
        assert!(stock.contains(Card::new(0)));
        assert!(stock.top_card().is_none());
    }

    #[test]
    fn test_remove_unordered() {
        let mut stock = full_stock();
        assert!(stock.remove_unordered(Card::new(5)));
        assert!(!stock.remove_unordered(Card::new(5)));
        assert_eq!(stock.size(), NUM_CARDS - 1);
        assert!(!stock.contains(Card::new(5)));
    }

    #[test]
    fn test_determine_next_and_draw() {
        let mut stock = full_stock();
        stock.determine_next(Card::new(3));
        stock.determine_next(Card::new(8));

        assert_eq!(stock.known_top(), &[Card::new(3), Card::new(8)]);
        assert_eq!(stock.top_card(), Some(Card::new(3)));
        assert_eq!(stock.size(), NUM_CARDS);

        assert_eq!(stock.draw_known_top(), Card::new(3));
        assert_eq!(stock.top_card(), Some(Card::new(8)));
        assert_eq!(stock.size(), NUM_CARDS - 1);
    }

    #[test]
    fn test_insert_kitten_in_known_prefix() {
        let mut stock = Stock::with_cards(Card::all().filter(|&c| c != Card::EXPLODING_KITTEN));
        stock.determine_next(Card::new(0));
        stock.determine_next(Card::new(1));

        stock.insert_kitten(1);
        assert_eq!(
            stock.known_top(),
            &[Card::new(0), Card::EXPLODING_KITTEN, Card::new(1)]
        );
    }

    #[test]
    fn test_insert_kitten_deep() {
        let mut stock = Stock::with_cards(Card::all().filter(|&c| c != Card::EXPLODING_KITTEN));
        let size = stock.size();

        stock.insert_kitten(size);
        assert!(stock.contains(Card::EXPLODING_KITTEN));
        assert!(stock.known_top().is_empty());
        assert_eq!(stock.size(), size + 1);
    }

    #[test]
    fn test_bottom_card_known_only_when_fully_determined() {
        let mut stock = Stock::empty();
        stock.add_unordered(Card::new(1));
        stock.add_unordered(Card::new(2));
        assert!(stock.bottom_card().is_none());

        stock.determine_next(Card::new(2));
        assert!(stock.bottom_card().is_none());

        stock.determine_next(Card::new(1));
        assert_eq!(stock.bottom_card(), Some(Card::new(1)));
        assert_eq!(stock.draw_known_bottom(), Card::new(1));
        assert_eq!(stock.size(), 1);
    }

    #[test]
    fn test_forget_order() {
        let mut stock = full_stock();
        stock.determine_next(Card::new(4));
        stock.determine_next(Card::new(9));

        stock.forget_order();
        assert!(stock.known_top().is_empty());
        assert_eq!(stock.size(), NUM_CARDS);
        assert!(stock.contains(Card::new(4)));
    }

    #[test]
    fn test_display_shows_known_prefix() {
        let mut stock = Stock::empty();
        stock.add_unordered(Card::new(0));
        stock.add_unordered(Card::new(9));
        stock.determine_next(Card::new(9));
        assert_eq!(Card::new(9).card_type(), CardType::SeeTheFuture);
        assert_eq!(format!("{stock}"), "stock[2] top: SeeTheFuture(9)");
    }
}
