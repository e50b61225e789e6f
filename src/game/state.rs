//! The mutable game state machine.
//!
//! One `KittensState` owns all mutable state for a single play-through.
//! The harness repeatedly queries `current_actor`, fetches legal actions
//! or chance outcomes, and feeds one choice into `apply_action` until the
//! state reports terminal. `apply_action` dispatches on the current phase;
//! each phase's transition logic lives in its own `apply_*` method.
//!
//! ## Turn accounting
//!
//! `turns_owed` counts turns the active player must still take, including
//! the current one. Ending a turn decrements it; at zero the turn passes
//! and the opponent owes one turn. Slap cards transfer any remaining debt
//! to the opponent, plus one or two extra turns.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::descriptor::{KittensGame, MAX_GAME_LENGTH};
use super::phase::Phase;
use crate::cards::{Card, CardType, Hand, Stock, HAND_SIZE};
use crate::core::{ActionId, ActionRecord, Actor, GameRng, PlayerId, PlayerMap, NUM_PLAYERS};
use crate::observer;

/// How many cards a SeeTheFuture play reveals.
const PEEK_DEPTH: usize = 3;

/// Which end of the stock a pending draw resolves from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum DrawKind {
    Top,
    Bottom,
}

/// Game state for one play-through.
///
/// Cloning produces an independent deep copy: mutating the clone never
/// affects the original, so consumers can run speculative look-ahead.
#[derive(Clone, Debug)]
pub struct KittensState {
    game: Arc<KittensGame>,
    phase: Phase,
    cur_player: PlayerId,
    hands: PlayerMap<Hand>,
    stock: Stock,
    discard: Vec<Card>,
    turns_owed: u8,
    pending_draw: Option<DrawKind>,
    pending_reveal: u8,
    seen_future: PlayerMap<SmallVec<[Card; 3]>>,
    cards_dealt: u8,
    exploded: Option<PlayerId>,
    ply: u32,
    history: Vector<ActionRecord>,
    rng: GameRng,
}

impl KittensState {
    /// Create a fresh state in the `Deal` phase.
    ///
    /// The stock holds every card except the kitten; the kitten joins the
    /// stock once both hands are dealt, so no player is ever dealt it.
    #[must_use]
    pub(crate) fn new(game: Arc<KittensGame>) -> Self {
        let seed = game.params().seed;
        Self {
            game,
            phase: Phase::Deal,
            cur_player: PlayerId::new(0),
            hands: PlayerMap::default(),
            stock: Stock::with_cards(Card::all().filter(|&c| c != Card::EXPLODING_KITTEN)),
            discard: Vec::new(),
            turns_owed: 0,
            pending_draw: None,
            pending_reveal: 0,
            seen_future: PlayerMap::default(),
            cards_dealt: 0,
            exploded: None,
            ply: 0,
            history: Vector::new(),
            rng: GameRng::new(seed),
        }
    }

    // === Queries ===

    /// The descriptor this state was created from.
    #[must_use]
    pub fn game(&self) -> &Arc<KittensGame> {
        &self.game
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whose move the engine is waiting on.
    #[must_use]
    pub fn current_actor(&self) -> Actor {
        match self.phase {
            Phase::GameOver => Actor::Terminal,
            Phase::Deal | Phase::ShuffleDrawPile | Phase::InsertKittenRandom => Actor::Chance,
            Phase::PlayTurn if self.pending_draw.is_some() || self.pending_reveal > 0 => {
                Actor::Chance
            }
            Phase::PlayTurn | Phase::MustDefuse => Actor::Player(self.cur_player),
            Phase::GiveCard => Actor::Player(self.cur_player.opponent()),
        }
    }

    /// Check whether the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Plies applied so far (player and chance actions both count).
    #[must_use]
    pub fn ply(&self) -> usize {
        self.ply as usize
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    /// The shared draw pile.
    #[must_use]
    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    /// Cards played or spent, most recent last.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    /// A player's last SeeTheFuture peek (top card first).
    #[must_use]
    pub fn seen_future(&self, player: PlayerId) -> &[Card] {
        &self.seen_future[player]
    }

    /// Applied actions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ActionRecord> {
        self.history.iter()
    }

    /// Terminal returns per player; all zeros while the game is running
    /// and for the ply-cutoff draw.
    #[must_use]
    pub fn returns(&self) -> [f64; NUM_PLAYERS] {
        match self.exploded {
            Some(loser) if self.is_terminal() => {
                let mut returns = [1.0; NUM_PLAYERS];
                returns[loser.index()] = -1.0;
                returns
            }
            _ => [0.0; NUM_PLAYERS],
        }
    }

    // === Action generation ===

    /// Legal actions for the acting player, ascending.
    ///
    /// Empty when the current actor is chance or the state is terminal.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<ActionId> {
        let Actor::Player(player) = self.current_actor() else {
            return Vec::new();
        };

        match self.phase {
            Phase::PlayTurn => {
                let mut actions: Vec<ActionId> = self.hands[player]
                    .cards()
                    .filter(|&c| self.is_playable(player, c))
                    .map(ActionId::card)
                    .collect();
                actions.push(ActionId::DRAW);
                actions
            }
            Phase::GiveCard => self.hands[player].cards().map(ActionId::card).collect(),
            Phase::MustDefuse => {
                let defuses: Vec<ActionId> = self.hands[player]
                    .cards()
                    .filter(|c| c.card_type() == CardType::Defuse)
                    .map(ActionId::card)
                    .collect();
                if defuses.is_empty() {
                    // No defuse: the only move is to accept the kitten.
                    vec![ActionId::card(Card::EXPLODING_KITTEN)]
                } else {
                    defuses
                }
            }
            _ => unreachable!("player phases are handled above"),
        }
    }

    fn is_playable(&self, player: PlayerId, card: Card) -> bool {
        match card.card_type() {
            CardType::Skip
            | CardType::Slap1x
            | CardType::Slap2x
            | CardType::SeeTheFuture
            | CardType::Shuffle
            | CardType::DrawFromBottom => true,
            ty @ (CardType::Cat1 | CardType::Cat2 | CardType::Cat3) => {
                self.hands[player].count_type(ty) >= 2
            }
            // Defuse only resolves a kitten; the kitten itself is never played.
            CardType::Defuse | CardType::ExplodingKitten => false,
        }
    }

    /// Declared chance outcomes with probabilities summing to 1.0.
    ///
    /// # Panics
    ///
    /// Panics if the current actor is not chance.
    #[must_use]
    pub fn chance_outcomes(&self) -> Vec<(ActionId, f64)> {
        let actor = self.current_actor();
        assert!(
            actor.is_chance(),
            "chance_outcomes() called when actor is {actor}"
        );

        match self.phase {
            Phase::Deal => self.uniform_unordered(self.stock.size()),
            Phase::ShuffleDrawPile => vec![(ActionId::SHUFFLE, 1.0)],
            Phase::InsertKittenRandom => {
                let positions = self.stock.size() + 1;
                let p = 1.0 / positions as f64;
                (0..positions).map(|d| (ActionId::insert_at(d), p)).collect()
            }
            Phase::PlayTurn => match self.pending_draw {
                Some(DrawKind::Top) => match self.stock.top_card() {
                    Some(card) => vec![(ActionId::card(card), 1.0)],
                    None => self.uniform_unordered(self.stock.size()),
                },
                Some(DrawKind::Bottom) => match self.stock.bottom_card() {
                    Some(card) => vec![(ActionId::card(card), 1.0)],
                    None => self.uniform_unordered(self.stock.unordered_count()),
                },
                // Pending reveal: the next undetermined card is pinned down.
                None => self.uniform_unordered(self.stock.unordered_count()),
            },
            _ => unreachable!("non-chance phases are rejected above"),
        }
    }

    fn uniform_unordered(&self, denominator: usize) -> Vec<(ActionId, f64)> {
        let p = 1.0 / denominator as f64;
        self.stock
            .unordered_cards()
            .map(|c| (ActionId::card(c), p))
            .collect()
    }

    // === Mutation ===

    /// Apply one action (player choice or chance outcome).
    ///
    /// # Panics
    ///
    /// Panics if the state is terminal or the action is not currently
    /// legal; both are harness contract violations.
    pub fn apply_action(&mut self, action: ActionId) {
        assert!(!self.is_terminal(), "cannot act on a terminal state");

        let actor = self.current_actor();
        let legal = match actor {
            Actor::Chance => self.chance_outcomes().iter().any(|&(a, _)| a == action),
            Actor::Player(_) => self.legal_actions().contains(&action),
            Actor::Terminal => unreachable!(),
        };
        assert!(legal, "action {action} is not legal in phase {}", self.phase);

        self.history.push_back(ActionRecord {
            actor,
            action,
            ply: self.ply,
        });

        match self.phase {
            Phase::Deal => self.apply_deal(action),
            Phase::PlayTurn => {
                if self.pending_draw.is_some() {
                    self.apply_draw_outcome(action);
                } else if self.pending_reveal > 0 {
                    self.apply_reveal_outcome(action);
                } else {
                    self.apply_play(action);
                }
            }
            Phase::GiveCard => self.apply_give(action),
            Phase::ShuffleDrawPile => self.apply_shuffle(),
            Phase::MustDefuse => self.apply_must_defuse(action),
            Phase::InsertKittenRandom => self.apply_insert(action),
            Phase::GameOver => unreachable!("terminal states are rejected above"),
        }

        self.ply += 1;
        if !self.is_terminal() && self.ply as usize >= MAX_GAME_LENGTH {
            // Forced draw at the length cutoff.
            self.phase = Phase::GameOver;
            self.exploded = None;
        }
    }

    /// Sample a chance outcome with the state-owned RNG and apply it.
    ///
    /// Convenience for random playouts; returns the sampled action.
    ///
    /// # Panics
    ///
    /// Panics if the current actor is not chance.
    pub fn apply_random_chance(&mut self) -> ActionId {
        let outcomes = self.chance_outcomes();
        let weights: Vec<f64> = outcomes.iter().map(|&(_, p)| p).collect();
        let idx = self
            .rng
            .choose_weighted(&weights)
            .expect("chance node has outcomes");
        let action = outcomes[idx].0;
        self.apply_action(action);
        action
    }

    fn apply_deal(&mut self, action: ActionId) {
        let card = action.as_card().expect("deal outcomes are cards");
        self.stock.remove_unordered(card);

        let player = PlayerId::new(self.cards_dealt % 2);
        self.hands[player].add(card);
        self.cards_dealt += 1;

        if self.cards_dealt as usize == NUM_PLAYERS * HAND_SIZE {
            self.stock.add_unordered(Card::EXPLODING_KITTEN);
            self.phase = Phase::PlayTurn;
            self.cur_player = PlayerId::new(0);
            self.turns_owed = 1;
        }
    }

    fn apply_play(&mut self, action: ActionId) {
        if action == ActionId::DRAW {
            self.pending_draw = Some(DrawKind::Top);
            return;
        }

        let card = action.as_card().expect("play actions are cards");
        self.hands[self.cur_player].remove(card);
        self.discard.push(card);

        match card.card_type() {
            CardType::Skip => self.end_turn(),
            CardType::Slap1x => self.apply_slap(1),
            CardType::Slap2x => self.apply_slap(2),
            CardType::SeeTheFuture => self.start_peek(),
            CardType::Shuffle => self.phase = Phase::ShuffleDrawPile,
            CardType::DrawFromBottom => self.pending_draw = Some(DrawKind::Bottom),
            ty @ (CardType::Cat1 | CardType::Cat2 | CardType::Cat3) => {
                let partner = self.hands[self.cur_player]
                    .first_of_type(ty)
                    .expect("cat pair was checked by legality");
                self.hands[self.cur_player].remove(partner);
                self.discard.push(partner);
                if !self.hands[self.cur_player.opponent()].is_empty() {
                    self.phase = Phase::GiveCard;
                }
                // Empty opponent hand: the pair is spent for nothing.
            }
            CardType::Defuse | CardType::ExplodingKitten => {
                unreachable!("never legal in PlayTurn")
            }
        }
    }

    fn apply_slap(&mut self, extra: u8) {
        // Remaining debt beyond the turn being ended transfers with the slap.
        let carry = self.turns_owed - 1;
        self.cur_player = self.cur_player.opponent();
        self.turns_owed = carry + extra;
    }

    fn start_peek(&mut self) {
        let total = PEEK_DEPTH.min(self.stock.size());
        let already_known = self.stock.known_top().len().min(total);
        self.pending_reveal = (total - already_known) as u8;
        if self.pending_reveal == 0 {
            self.record_peek();
        }
    }

    fn record_peek(&mut self) {
        let total = PEEK_DEPTH.min(self.stock.size());
        self.seen_future[self.cur_player] =
            self.stock.known_top().iter().take(total).copied().collect();
    }

    fn apply_reveal_outcome(&mut self, action: ActionId) {
        let card = action.as_card().expect("reveal outcomes are cards");
        self.stock.determine_next(card);
        self.pending_reveal -= 1;
        if self.pending_reveal == 0 {
            self.record_peek();
        }
    }

    fn apply_draw_outcome(&mut self, action: ActionId) {
        let card = action.as_card().expect("draw outcomes are cards");
        let kind = self.pending_draw.take().expect("a draw is pending");

        match kind {
            DrawKind::Top => {
                if self.stock.top_card() == Some(card) {
                    self.stock.draw_known_top();
                    // Peeks slide up with the drawn card.
                    self.seen_future.for_each_mut(|_, peek| {
                        if peek.first() == Some(&card) {
                            peek.remove(0);
                        } else {
                            peek.clear();
                        }
                    });
                } else {
                    self.stock.remove_unordered(card);
                }
            }
            DrawKind::Bottom => {
                if self.stock.bottom_card() == Some(card) {
                    self.stock.draw_known_bottom();
                }
                self.stock.remove_unordered(card);
                self.seen_future.for_each_mut(|_, peek| {
                    if let Some(pos) = peek.iter().position(|&c| c == card) {
                        peek.remove(pos);
                    }
                });
            }
        }

        if card == Card::EXPLODING_KITTEN {
            // The kitten is held in limbo until defused or conceded.
            self.phase = Phase::MustDefuse;
        } else {
            self.hands[self.cur_player].add(card);
            self.end_turn();
        }
    }

    fn apply_give(&mut self, action: ActionId) {
        let card = action.as_card().expect("give actions are cards");
        let giver = self.cur_player.opponent();
        self.hands[giver].remove(card);
        self.hands[self.cur_player].add(card);
        self.phase = Phase::PlayTurn;
    }

    fn apply_shuffle(&mut self) {
        self.stock.forget_order();
        self.seen_future.for_each_mut(|_, peek| peek.clear());
        self.phase = Phase::PlayTurn;
    }

    fn apply_must_defuse(&mut self, action: ActionId) {
        let card = action.as_card().expect("defuse actions are cards");
        if card.card_type() == CardType::Defuse {
            self.hands[self.cur_player].remove(card);
            self.discard.push(card);
            self.phase = Phase::InsertKittenRandom;
        } else {
            // Conceding to the kitten: immediate elimination.
            self.exploded = Some(self.cur_player);
            self.phase = Phase::GameOver;
        }
    }

    fn apply_insert(&mut self, action: ActionId) {
        let depth = action.as_insert_depth().expect("insert outcomes are depths");
        self.stock.insert_kitten(depth);
        // Any peeked ordering may have shifted underneath the peekers.
        self.seen_future.for_each_mut(|_, peek| peek.clear());
        self.phase = Phase::PlayTurn;
        // The draw that surfaced the kitten ends the turn.
        self.end_turn();
    }

    fn end_turn(&mut self) {
        self.turns_owed -= 1;
        if self.turns_owed == 0 {
            self.cur_player = self.cur_player.opponent();
            self.turns_owed = 1;
        }
    }

    // === Observations ===

    /// Fixed-length observation tensor from one player's perspective.
    #[must_use]
    pub fn observation_tensor(&self, player: PlayerId) -> Vec<f32> {
        observer::encode(self, player)
    }

    /// Textual observation, decoded from the tensor encoding.
    #[must_use]
    pub fn observation_string(&self, player: PlayerId) -> String {
        observer::decode(&self.observation_tensor(player))
    }
}

impl PartialEq for KittensState {
    fn eq(&self, other: &Self) -> bool {
        self.game.params() == other.game.params()
            && self.phase == other.phase
            && self.cur_player == other.cur_player
            && self.hands == other.hands
            && self.stock == other.stock
            && self.discard == other.discard
            && self.turns_owed == other.turns_owed
            && self.pending_draw == other.pending_draw
            && self.pending_reveal == other.pending_reveal
            && self.seen_future == other.seen_future
            && self.cards_dealt == other.cards_dealt
            && self.exploded == other.exploded
            && self.ply == other.ply
            && self.history == other.history
            && self.rng.state() == other.rng.state()
    }
}

impl std::fmt::Display for KittensState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "phase: {} actor: {} ply: {} owed: {}",
            self.phase,
            self.current_actor(),
            self.ply,
            self.turns_owed
        )?;
        for (player, hand) in self.hands.iter() {
            writeln!(f, "{player} hand: {hand}")?;
        }
        writeln!(f, "{}", self.stock)?;
        write!(f, "discard[{}]", self.discard.len())?;
        for card in &self.discard {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}
