//! Per-player observation encoding.
//!
//! Observations expose exactly the information a player is entitled to:
//! their own hand, the opponent's hand *size*, the public phase and stock
//! size, and their own last SeeTheFuture peek. Opponent hand contents and
//! undetermined stock order never appear.
//!
//! The numeric tensor is the single source of truth; the textual rendering
//! is decoded back out of the tensor, so the two representations cannot
//! diverge.

use crate::cards::{CardType, NUM_CARD_TYPES};
use crate::core::{Actor, PlayerId};
use crate::game::phase::{Phase, NUM_PHASES};
use crate::game::KittensState;

/// Slots reserved for the last SeeTheFuture peek.
const PEEK_SLOTS: usize = 3;

/// Fixed length of the observation tensor.
///
/// Layout: own hand counts per type, opponent hand size, stock size,
/// phase one-hot, to-move flag, peek slots.
pub const OBSERVATION_TENSOR_SIZE: usize = NUM_CARD_TYPES + 1 + 1 + NUM_PHASES + 1 + PEEK_SLOTS;

const IDX_OPP_HAND: usize = NUM_CARD_TYPES;
const IDX_STOCK: usize = NUM_CARD_TYPES + 1;
const IDX_PHASE: usize = NUM_CARD_TYPES + 2;
const IDX_TO_MOVE: usize = IDX_PHASE + NUM_PHASES;
const IDX_PEEK: usize = IDX_TO_MOVE + 1;

/// Encode the state from one player's perspective.
#[must_use]
pub fn encode(state: &KittensState, player: PlayerId) -> Vec<f32> {
    let mut tensor = vec![0.0f32; OBSERVATION_TENSOR_SIZE];

    for (i, &count) in state.hand(player).type_counts().iter().enumerate() {
        tensor[i] = f32::from(count);
    }

    tensor[IDX_OPP_HAND] = state.hand(player.opponent()).len() as f32;
    tensor[IDX_STOCK] = state.stock().size() as f32;
    tensor[IDX_PHASE + state.phase().index()] = 1.0;

    if state.current_actor() == Actor::Player(player) {
        tensor[IDX_TO_MOVE] = 1.0;
    }

    for (slot, card) in state.seen_future(player).iter().take(PEEK_SLOTS).enumerate() {
        tensor[IDX_PEEK + slot] = (card.card_type().index() + 1) as f32;
    }

    tensor
}

/// Render an observation tensor as text.
///
/// Reads only the tensor, never the state, so that the string and numeric
/// representations stay consistent by construction.
#[must_use]
pub fn decode(tensor: &[f32]) -> String {
    assert_eq!(tensor.len(), OBSERVATION_TENSOR_SIZE, "bad tensor length");

    let phase = Phase::ALL
        .iter()
        .find(|p| tensor[IDX_PHASE + p.index()] == 1.0)
        .expect("tensor has a phase bit set");

    let mut hand = String::new();
    for (i, t) in CardType::ALL.iter().enumerate() {
        let count = tensor[i] as usize;
        if count > 0 {
            if !hand.is_empty() {
                hand.push(' ');
            }
            hand.push_str(&format!("{t}x{count}"));
        }
    }
    if hand.is_empty() {
        hand.push('-');
    }

    let mut future = String::new();
    for slot in 0..PEEK_SLOTS {
        let v = tensor[IDX_PEEK + slot] as usize;
        if v == 0 {
            break;
        }
        if !future.is_empty() {
            future.push(' ');
        }
        future.push_str(CardType::ALL[v - 1].name());
    }
    if future.is_empty() {
        future.push('-');
    }

    format!(
        "Phase: {} | Hand: {} | OppHand: {} | Stock: {} | ToMove: {} | Future: {}",
        phase,
        hand,
        tensor[IDX_OPP_HAND] as usize,
        tensor[IDX_STOCK] as usize,
        if tensor[IDX_TO_MOVE] == 1.0 { "yes" } else { "no" },
        future,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameParams, KittensGame};

    fn dealt_state() -> KittensState {
        let game = KittensGame::new(GameParams::default()).unwrap();
        let mut state = game.new_initial_state();
        // Deal cards 0..9 alternating between the players.
        for i in 0..10u8 {
            state.apply_action(crate::core::ActionId::card(crate::cards::Card::new(i)));
        }
        state
    }

    #[test]
    fn test_tensor_size() {
        assert_eq!(OBSERVATION_TENSOR_SIZE, 24);
        let state = dealt_state();
        assert_eq!(encode(&state, PlayerId::new(0)).len(), OBSERVATION_TENSOR_SIZE);
    }

    #[test]
    fn test_encode_hides_opponent_hand() {
        let state = dealt_state();
        let t0 = encode(&state, PlayerId::new(0));
        let t1 = encode(&state, PlayerId::new(1));

        // Each player sees 5 cards of their own and only a size for the other.
        let own0: f32 = t0[..NUM_CARD_TYPES].iter().sum();
        let own1: f32 = t1[..NUM_CARD_TYPES].iter().sum();
        assert_eq!(own0, 5.0);
        assert_eq!(own1, 5.0);
        assert_eq!(t0[IDX_OPP_HAND], 5.0);
        assert_eq!(t1[IDX_OPP_HAND], 5.0);
    }

    #[test]
    fn test_encode_phase_and_to_move() {
        let state = dealt_state();
        let t0 = encode(&state, PlayerId::new(0));
        let t1 = encode(&state, PlayerId::new(1));

        assert_eq!(t0[IDX_PHASE + Phase::PlayTurn.index()], 1.0);
        assert_eq!(t0[IDX_TO_MOVE], 1.0);
        assert_eq!(t1[IDX_TO_MOVE], 0.0);
    }

    #[test]
    fn test_encode_is_idempotent() {
        let state = dealt_state();
        let a = encode(&state, PlayerId::new(0));
        let b = encode(&state, PlayerId::new(0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_matches_encode() {
        let state = dealt_state();
        let tensor = encode(&state, PlayerId::new(0));
        let text = decode(&tensor);

        assert!(text.contains("Phase: PlayTurn"));
        assert!(text.contains("OppHand: 5"));
        assert!(text.contains("Stock: 12"));
        assert!(text.contains("ToMove: yes"));
        assert!(text.contains("Future: -"));
        // Player 0 was dealt cards 0,2,4 (Skip), 6 (Slap1x), 8 (Slap2x).
        assert!(text.contains("Skipx3"));
        assert!(text.contains("Slap1xx1"));
        assert!(text.contains("Slap2xx1"));
    }

    #[test]
    #[should_panic(expected = "bad tensor length")]
    fn test_decode_rejects_wrong_length() {
        let _ = decode(&[0.0; 3]);
    }
}
