//! The game itself: descriptor, phase machine, and mutable state.
//!
//! ## Key Types
//!
//! - `KittensGame`: immutable descriptor, shared via `Arc` by every state
//! - `KittensState`: one play-through's mutable state machine
//! - `Phase`: which part of a turn the state machine is in

pub mod descriptor;
pub mod phase;
pub mod state;

pub use descriptor::{GameParams, KittensGame, MAX_GAME_LENGTH};
pub use phase::{Phase, NUM_PHASES};
pub use state::KittensState;
