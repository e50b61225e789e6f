//! Core engine types: players, actors, actions, RNG.
//!
//! These are the building blocks the game state machine is assembled from.

pub mod action;
pub mod player;
pub mod rng;

pub use action::{ActionId, ActionRecord, NUM_DISTINCT_ACTIONS};
pub use player::{Actor, PlayerId, PlayerMap, NUM_PLAYERS};
pub use rng::{GameRng, GameRngState};
