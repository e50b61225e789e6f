//! Player identity, the actor sum type, and per-player storage.
//!
//! ## Actor
//!
//! The engine distinguishes three kinds of "whose move is it" answers:
//! a real player, the chance pseudo-player, and nobody (terminal). These
//! are a sum type rather than integer sentinels, so a forgotten chance
//! check fails to compile instead of misbehaving at runtime.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of players. The rules are defined for exactly two.
pub const NUM_PLAYERS: usize = 2;

/// Identifier for one of the two players (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub fn new(id: u8) -> Self {
        assert!((id as usize) < NUM_PLAYERS, "player index out of range");
        Self(id)
    }

    /// Raw 0-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    /// Iterate over both player IDs.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..NUM_PLAYERS as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Whose move the engine is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// A real player must choose among `legal_actions`.
    Player(PlayerId),
    /// A chance outcome must be applied (see `chance_outcomes`).
    Chance,
    /// The game is over; no further actions are accepted.
    Terminal,
}

impl Actor {
    /// Check whether this actor is the chance pseudo-player.
    #[must_use]
    pub fn is_chance(self) -> bool {
        matches!(self, Actor::Chance)
    }

    /// The player, if this actor is one.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Actor::Player(p) => Some(p),
            _ => None,
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Actor::Player(p) => write!(f, "{p}"),
            Actor::Chance => write!(f, "Chance"),
            Actor::Terminal => write!(f, "Terminal"),
        }
    }
}

/// Fixed-size per-player storage with O(1) access.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; NUM_PLAYERS],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Iterate over `(PlayerId, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Apply a mutation to both entries.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(PlayerId, &mut T)) {
        for (i, v) in self.data.iter_mut().enumerate() {
            f(PlayerId(i as u8), v);
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p0.opponent(), p1);
        assert_eq!(p1.opponent(), p0);
        assert_eq!(format!("{p0}"), "Player 0");
    }

    #[test]
    #[should_panic(expected = "player index out of range")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_all() {
        let players: Vec<_> = PlayerId::all().collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1)]);
    }

    #[test]
    fn test_actor() {
        let actor = Actor::Player(PlayerId::new(1));
        assert!(!actor.is_chance());
        assert_eq!(actor.player(), Some(PlayerId::new(1)));

        assert!(Actor::Chance.is_chance());
        assert_eq!(Actor::Chance.player(), None);
        assert_eq!(Actor::Terminal.player(), None);
    }

    #[test]
    fn test_actor_display() {
        assert_eq!(format!("{}", Actor::Player(PlayerId::new(0))), "Player 0");
        assert_eq!(format!("{}", Actor::Chance), "Chance");
    }

    #[test]
    fn test_player_map() {
        let mut map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(1)], 10);

        map[PlayerId::new(0)] = 7;
        assert_eq!(map[PlayerId::new(0)], 7);

        let pairs: Vec<_> = map.iter().map(|(p, &v)| (p, v)).collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), 7), (PlayerId::new(1), 10)]);
    }

    #[test]
    fn test_player_map_for_each_mut() {
        let mut map: PlayerMap<Vec<i32>> = PlayerMap::default();
        map.for_each_mut(|p, v| v.push(p.index() as i32));
        assert_eq!(map[PlayerId::new(1)], vec![1]);
    }

    #[test]
    fn test_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
