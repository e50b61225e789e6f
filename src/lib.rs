//! A two-player Exploding Kittens engine with explicit chance events.
//!
//! The engine models the game as a descriptor/state pair: a `KittensGame`
//! fixes the rules parameters, and each `KittensState` walks one
//! play-through's phase machine. All randomness (dealing, draws,
//! SeeTheFuture reveals, kitten reinsertion) is surfaced as explicit chance
//! nodes with declared outcome probabilities, so consumers doing search or
//! exact probabilistic reasoning control every stochastic branch. States
//! clone cheaply and deeply for speculative look-ahead.
//!
//! ## Modules
//!
//! - [`cards`]: card types, physical card identities, hands, and the stock
//! - [`core`]: players, the actor sum type, the action space, and RNG
//! - [`game`]: the descriptor, phase machine, and mutable state
//! - [`observer`]: per-player observation tensors and text renderings
//! - [`error`]: construction-time errors
//!
//! ## Example
//!
//! ```
//! use exploding_kittens::{Actor, GameParams, KittensGame};
//!
//! let game = KittensGame::new(GameParams::default())?;
//! let mut state = game.new_initial_state();
//!
//! while !state.is_terminal() {
//!     match state.current_actor() {
//!         Actor::Chance => {
//!             state.apply_random_chance();
//!         }
//!         Actor::Player(_) => {
//!             let actions = state.legal_actions();
//!             state.apply_action(actions[0]);
//!         }
//!         Actor::Terminal => unreachable!(),
//!     }
//! }
//! let _returns = state.returns();
//! # Ok::<(), exploding_kittens::GameError>(())
//! ```

pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod observer;

pub use cards::{Card, CardType, Hand, Stock};
pub use core::{ActionId, ActionRecord, Actor, PlayerId, NUM_PLAYERS};
pub use error::GameError;
pub use game::{GameParams, KittensGame, KittensState, Phase};
pub use observer::OBSERVATION_TENSOR_SIZE;
