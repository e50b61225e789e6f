//! The flat action space shared by players and chance.
//!
//! Every choice in the game, whether made by a player or resolved by
//! chance, is one integer id out of a fixed global space:
//!
//! - `0..22` — card actions: play / give / deal / draw this physical card
//! - `22` — end the turn by drawing from the top of the stock
//! - `23` — shuffle resolution (single chance outcome)
//! - `24..37` — reinsert the defused kitten at depth 0..=12
//!
//! The same card id means "play this card" in `PlayTurn`, "surrender this
//! card" in `GiveCard`, and "this card was drawn" at chance nodes; the
//! current phase disambiguates.

use serde::{Deserialize, Serialize};

use super::player::Actor;
use crate::cards::{Card, MAX_STOCK_SIZE, NUM_CARDS};

/// Total number of distinct action ids.
pub const NUM_DISTINCT_ACTIONS: usize = NUM_CARDS + 2 + (MAX_STOCK_SIZE + 1);

/// One action id out of the global action space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u8);

impl ActionId {
    /// End the turn by drawing the top card of the stock.
    pub const DRAW: ActionId = ActionId(NUM_CARDS as u8);

    /// Chance resolution of a shuffle.
    pub const SHUFFLE: ActionId = ActionId(NUM_CARDS as u8 + 1);

    const INSERT_BASE: u8 = NUM_CARDS as u8 + 2;

    /// The action id for a specific physical card.
    #[must_use]
    pub const fn card(card: Card) -> Self {
        Self(card.0)
    }

    /// The chance action id for reinserting the kitten at `depth`.
    ///
    /// # Panics
    ///
    /// Panics if `depth` exceeds the maximum stock size.
    #[must_use]
    pub fn insert_at(depth: usize) -> Self {
        assert!(depth <= MAX_STOCK_SIZE, "insertion depth out of range");
        Self(Self::INSERT_BASE + depth as u8)
    }

    /// Raw index into the action space.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0 as usize
    }

    /// The physical card, if this is a card action.
    #[must_use]
    pub fn as_card(self) -> Option<Card> {
        if (self.0 as usize) < NUM_CARDS {
            Some(Card(self.0))
        } else {
            None
        }
    }

    /// The insertion depth, if this is an insert action.
    #[must_use]
    pub fn as_insert_depth(self) -> Option<usize> {
        if self.0 >= Self::INSERT_BASE && self.raw() < NUM_DISTINCT_ACTIONS {
            Some((self.0 - Self::INSERT_BASE) as usize)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(card) = self.as_card() {
            write!(f, "{card}")
        } else if *self == Self::DRAW {
            write!(f, "Draw")
        } else if *self == Self::SHUFFLE {
            write!(f, "ShuffleStock")
        } else if let Some(depth) = self.as_insert_depth() {
            write!(f, "InsertKitten@{depth}")
        } else {
            write!(f, "InvalidAction({})", self.0)
        }
    }
}

/// One applied action, with the actor that took it, for replay and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who acted (player or chance).
    pub actor: Actor,
    /// The action applied.
    pub action: ActionId,
    /// 0-based ply at which the action was applied.
    pub ply: u32,
}
