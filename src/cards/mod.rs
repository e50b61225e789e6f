//! Card model: card types, physical card identities, and deck composition.
//!
//! ## Key Types
//!
//! - `CardType`: the rules-relevant kind of a card (Skip, Defuse, ...)
//! - `Card`: one *physical* card in the deck, identified by a small index
//! - `Hand`: a player's unordered card multiset
//! - `Stock`: the shared draw pile
//!
//! ## Physical cards vs card types
//!
//! Chance outcomes are enumerated per physical card, not per card type: two
//! copies of Skip are two distinct, equally likely draw outcomes. Consumers
//! doing exact information-state reasoning rely on this distinction.

pub mod hand;
pub mod stock;

pub use hand::Hand;
pub use stock::Stock;

use serde::{Deserialize, Serialize};

/// Number of distinct card types (three cat variants counted separately).
pub const NUM_CARD_TYPES: usize = 11;

/// Number of physical cards in a deck.
pub const NUM_CARDS: usize = 22;

/// Number of available deck variants.
pub const NUM_DECKS: usize = 1;

/// Cards dealt to each player before play begins.
pub const HAND_SIZE: usize = 5;

/// Stock size when play begins (deck minus both dealt hands).
pub const MAX_STOCK_SIZE: usize = NUM_CARDS - 2 * HAND_SIZE;

/// The rules-relevant kind of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Cancels an otherwise-fatal ExplodingKitten draw.
    Defuse,
    /// Eliminates the player who draws it, unless defused.
    ExplodingKitten,
    /// End the current turn without drawing.
    Skip,
    /// End the turn without drawing; opponent owes one extra turn.
    Slap1x,
    /// End the turn without drawing; opponent owes two extra turns.
    Slap2x,
    /// Reveal the top of the stock to the actor only.
    SeeTheFuture,
    /// Discard all ordering knowledge of the stock.
    Shuffle,
    /// End the turn by drawing the bottom card instead of the top.
    DrawFromBottom,
    /// Cat variant 1; a pair forces the opponent to surrender a card.
    Cat1,
    /// Cat variant 2.
    Cat2,
    /// Cat variant 3.
    Cat3,
}

impl CardType {
    /// All card types, in tensor-index order.
    pub const ALL: [CardType; NUM_CARD_TYPES] = [
        CardType::Defuse,
        CardType::ExplodingKitten,
        CardType::Skip,
        CardType::Slap1x,
        CardType::Slap2x,
        CardType::SeeTheFuture,
        CardType::Shuffle,
        CardType::DrawFromBottom,
        CardType::Cat1,
        CardType::Cat2,
        CardType::Cat3,
    ];

    /// Stable index of this type in [0, NUM_CARD_TYPES).
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&t| t == self)
            .expect("type is in ALL")
    }

    /// Cat variant number (1-3), or `None` for non-cat types.
    #[must_use]
    pub fn cat_variant(self) -> Option<u8> {
        match self {
            CardType::Cat1 => Some(1),
            CardType::Cat2 => Some(2),
            CardType::Cat3 => Some(3),
            _ => None,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CardType::Defuse => "Defuse",
            CardType::ExplodingKitten => "ExplodingKitten",
            CardType::Skip => "Skip",
            CardType::Slap1x => "Slap1x",
            CardType::Slap2x => "Slap2x",
            CardType::SeeTheFuture => "SeeTheFuture",
            CardType::Shuffle => "Shuffle",
            CardType::DrawFromBottom => "DrawFromBottom",
            CardType::Cat1 => "Cat1",
            CardType::Cat2 => "Cat2",
            CardType::Cat3 => "Cat3",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Composition of deck 0 (the two-player core deck), indexed by physical card.
///
/// All three cat cards share variant 1 so that cat pairs are playable.
/// The two Defuse cards and the kitten take the last three slots.
const DECK_0: [CardType; NUM_CARDS] = [
    CardType::Skip,
    CardType::Skip,
    CardType::Skip,
    CardType::Skip,
    CardType::Skip,
    CardType::Slap1x,
    CardType::Slap1x,
    CardType::Slap1x,
    CardType::Slap2x,
    CardType::SeeTheFuture,
    CardType::SeeTheFuture,
    CardType::SeeTheFuture,
    CardType::Shuffle,
    CardType::Shuffle,
    CardType::DrawFromBottom,
    CardType::DrawFromBottom,
    CardType::Cat1,
    CardType::Cat1,
    CardType::Cat1,
    CardType::Defuse,
    CardType::Defuse,
    CardType::ExplodingKitten,
];

/// A physical card, identified by its index in the deck composition table.
///
/// Physical identity matters: chance outcomes, hand contents, and the stock
/// all track individual cards, never aggregated type counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(pub u8);

impl Card {
    /// The single exploding kitten in deck 0.
    pub const EXPLODING_KITTEN: Card = Card(NUM_CARDS as u8 - 1);

    /// Create a card from its physical index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Physical index in [0, NUM_CARDS).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The card's type under the (single) deck composition.
    #[must_use]
    pub fn card_type(self) -> CardType {
        DECK_0[self.index()]
    }

    /// Iterate over every physical card in the deck.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..NUM_CARDS as u8).map(Card)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.card_type(), self.0)
    }
}
