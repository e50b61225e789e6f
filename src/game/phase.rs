//! The turn/phase state machine's phase tags.

use serde::{Deserialize, Serialize};

/// Number of phases (fixed; used for one-hot observation encoding).
pub const NUM_PHASES: usize = 7;

/// The phase the state machine is currently in.
///
/// Exactly one phase is active at a time; the phase plus the current player
/// fully determine whose move is awaited and which actions are legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Chance deals alternating cards until both hands are full.
    Deal,
    /// The current player plays cards or draws to end the turn.
    PlayTurn,
    /// The opponent must surrender a card to the cat-pair player.
    GiveCard,
    /// Chance discards all stock ordering knowledge.
    ShuffleDrawPile,
    /// The player who drew the kitten must defuse or lose.
    MustDefuse,
    /// Chance reinserts the defused kitten at a random depth.
    InsertKittenRandom,
    /// Terminal; only queries are allowed.
    GameOver,
}

impl Phase {
    /// All phases, in observation-index order.
    pub const ALL: [Phase; NUM_PHASES] = [
        Phase::Deal,
        Phase::PlayTurn,
        Phase::GiveCard,
        Phase::ShuffleDrawPile,
        Phase::MustDefuse,
        Phase::InsertKittenRandom,
        Phase::GameOver,
    ];

    /// Stable index in [0, NUM_PHASES).
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&p| p == self)
            .expect("phase is in ALL")
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Phase::Deal => "Deal",
            Phase::PlayTurn => "PlayTurn",
            Phase::GiveCard => "GiveCard",
            Phase::ShuffleDrawPile => "ShuffleDrawPile",
            Phase::MustDefuse => "MustDefuse",
            Phase::InsertKittenRandom => "InsertKittenRandom",
            Phase::GameOver => "GameOver",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
