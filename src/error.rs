//! Errors for fallible engine entry points.
//!
//! Only construction is fallible. In-game misuse (acting on a terminal
//! state, applying an illegal action, querying chance outcomes at a player
//! node) is a programming-contract violation and panics immediately rather
//! than returning an error: continuing would corrupt the game trace.

use thiserror::Error;

/// Errors from constructing a game descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The requested deck selector does not exist.
    #[error("deck selector {selector} is out of range (must be < {num_decks})")]
    InvalidDeck {
        /// The rejected selector value.
        selector: usize,
        /// Number of available decks.
        num_decks: usize,
    },
}
