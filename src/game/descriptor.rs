//! The immutable game descriptor shared by every state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::state::KittensState;
use crate::cards::{NUM_CARDS, NUM_DECKS};
use crate::core::{NUM_DISTINCT_ACTIONS, NUM_PLAYERS};
use crate::error::GameError;
use crate::observer::OBSERVATION_TENSOR_SIZE;

/// Safety cutoff: a game reaching this many plies ends in a draw.
pub const MAX_GAME_LENGTH: usize = 100;

/// Construction parameters for a game descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParams {
    /// Which deck composition to use, in [0, NUM_DECKS).
    pub deck: usize,
    /// Seed for the state-owned RNG used to sample chance outcomes.
    pub seed: u64,
}

impl Default for GameParams {
    fn default() -> Self {
        Self { deck: 0, seed: 0 }
    }
}

/// Immutable game descriptor: fixed parameters and derived constants.
///
/// One descriptor is created per parameterization and shared (via `Arc`)
/// by every state derived from it; states never copy its contents.
#[derive(Debug)]
pub struct KittensGame {
    params: GameParams,
}

impl KittensGame {
    /// Create a descriptor, validating the parameters.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidDeck` if the deck selector is out of range.
    pub fn new(params: GameParams) -> Result<Arc<Self>, GameError> {
        if params.deck >= NUM_DECKS {
            return Err(GameError::InvalidDeck {
                selector: params.deck,
                num_decks: NUM_DECKS,
            });
        }
        Ok(Arc::new(Self { params }))
    }

    /// The parameters this descriptor was built from.
    #[must_use]
    pub fn params(&self) -> GameParams {
        self.params
    }

    /// Create a fresh state in the `Deal` phase.
    #[must_use]
    pub fn new_initial_state(self: &Arc<Self>) -> KittensState {
        KittensState::new(Arc::clone(self))
    }

    /// Size of the flat action space.
    #[must_use]
    pub fn num_distinct_actions(&self) -> usize {
        NUM_DISTINCT_ACTIONS
    }

    /// Maximum number of outcomes any chance node can declare.
    #[must_use]
    pub fn max_chance_outcomes(&self) -> usize {
        NUM_CARDS
    }

    /// Number of players (always 2).
    #[must_use]
    pub fn num_players(&self) -> usize {
        NUM_PLAYERS
    }

    /// Lowest terminal return a player can receive.
    #[must_use]
    pub fn min_utility(&self) -> f64 {
        -1.0
    }

    /// Highest terminal return a player can receive.
    #[must_use]
    pub fn max_utility(&self) -> f64 {
        1.0
    }

    /// Sum of terminal returns (zero-sum).
    #[must_use]
    pub fn utility_sum(&self) -> f64 {
        0.0
    }

    /// Length of the observation tensor.
    #[must_use]
    pub fn observation_tensor_size(&self) -> usize {
        OBSERVATION_TENSOR_SIZE
    }

    /// Ply cutoff after which the game is scored as a draw.
    #[must_use]
    pub fn max_game_length(&self) -> usize {
        MAX_GAME_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let game = KittensGame::new(GameParams::default()).unwrap();
        assert_eq!(game.params().deck, 0);
        assert_eq!(game.num_players(), 2);
        assert_eq!(game.num_distinct_actions(), 37);
        assert_eq!(game.max_chance_outcomes(), NUM_CARDS);
        assert_eq!(game.max_game_length(), 100);
    }

    #[test]
    fn test_utility_bounds() {
        let game = KittensGame::new(GameParams::default()).unwrap();
        assert_eq!(game.min_utility(), -1.0);
        assert_eq!(game.max_utility(), 1.0);
        assert_eq!(game.utility_sum(), 0.0);
    }

    #[test]
    fn test_invalid_deck_selector() {
        let err = KittensGame::new(GameParams { deck: 1, seed: 0 }).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidDeck {
                selector: 1,
                num_decks: NUM_DECKS,
            }
        );
    }

    #[test]
    fn test_params_serialization() {
        let params = GameParams { deck: 0, seed: 99 };
        let json = serde_json::to_string(&params).unwrap();
        let back: GameParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
