//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! Every match has exactly two roles: the Attacker besieging the citadel
//! and the Defender holding it. The roles are asymmetric (different home
//! locations, different blocked territory), so this is a closed enum
//! rather than a player index.
//!
//! ## SideMap
//!
//! Per-side data storage with O(1) access, indexable by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two roles in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    /// Both sides, attacker first (phase order within a turn).
    pub const BOTH: [Side; 2] = [Side::Attacker, Side::Defender];

    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    /// Lowercase wire name ("attacker" / "defender").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Attacker => "attacker",
            Side::Defender => "defender",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-side data storage.
///
/// ## Example
///
/// ```
/// use siegefront::core::{Side, SideMap};
///
/// let mut drawn: SideMap<bool> = SideMap::default();
/// drawn[Side::Attacker] = true;
/// assert!(drawn[Side::Attacker]);
/// assert!(!drawn[Side::Defender]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideMap<T> {
    attacker: T,
    defender: T,
}

impl<T> SideMap<T> {
    /// Create a map with explicit values for each side.
    #[must_use]
    pub fn new(attacker: T, defender: T) -> Self {
        Self { attacker, defender }
    }

    /// Create a map with both entries set to the same value.
    #[must_use]
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            attacker: value.clone(),
            defender: value,
        }
    }

    /// Iterate over (Side, &T) pairs, attacker first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Attacker, &self.attacker), (Side::Defender, &self.defender)].into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::Attacker.opponent(), Side::Defender);
        assert_eq!(Side::Defender.opponent(), Side::Attacker);
    }

    #[test]
    fn test_side_map_indexing() {
        let mut map = SideMap::new(1, 2);
        assert_eq!(map[Side::Attacker], 1);
        assert_eq!(map[Side::Defender], 2);

        map[Side::Defender] = 5;
        assert_eq!(map[Side::Defender], 5);
    }

    #[test]
    fn test_side_map_iter_order() {
        let map = SideMap::new("a", "d");
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::Attacker, &"a"), (Side::Defender, &"d")]);
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&Side::Attacker).unwrap(), "\"attacker\"");
        let side: Side = serde_json::from_str("\"defender\"").unwrap();
        assert_eq!(side, Side::Defender);
    }
}
