//! Location and zone identifiers.
//!
//! ## The map
//!
//! Seven locations arranged in three rows, attacker's side at the
//! bottom:
//!
//! ```text
//!     Courtyard   Keep            (defender home, blocked to attacker)
//!   Gate   Walls   Sewers         (capturable)
//!     Camp     Forest             (attacker home, blocked to defender)
//! ```
//!
//! The graph is fixed; so is the set of capturable locations. A side can
//! reach an enemy home location only after capturing a capturable
//! location adjacent to it.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Base capture threshold before enemy health is added in.
pub const CAPTURE_BASE_THRESHOLD: i32 = 5;

/// One of the seven battlefield locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationId {
    Camp,
    Forest,
    Gate,
    Walls,
    Sewers,
    Courtyard,
    Keep,
}

impl LocationId {
    /// All locations, in map order.
    pub const ALL: [LocationId; 7] = [
        LocationId::Camp,
        LocationId::Forest,
        LocationId::Gate,
        LocationId::Walls,
        LocationId::Sewers,
        LocationId::Courtyard,
        LocationId::Keep,
    ];

    /// Dense index for array-backed storage.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            LocationId::Camp => 0,
            LocationId::Forest => 1,
            LocationId::Gate => 2,
            LocationId::Walls => 3,
            LocationId::Sewers => 4,
            LocationId::Courtyard => 5,
            LocationId::Keep => 6,
        }
    }

    /// Wire/display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LocationId::Camp => "Camp",
            LocationId::Forest => "Forest",
            LocationId::Gate => "Gate",
            LocationId::Walls => "Walls",
            LocationId::Sewers => "Sewers",
            LocationId::Courtyard => "Courtyard",
            LocationId::Keep => "Keep",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn from_str_opt(name: &str) -> Option<LocationId> {
        LocationId::ALL.into_iter().find(|l| l.as_str() == name)
    }

    /// Neighbors in the undirected adjacency graph.
    #[must_use]
    pub const fn adjacent(self) -> &'static [LocationId] {
        match self {
            LocationId::Camp => &[LocationId::Forest, LocationId::Gate, LocationId::Walls],
            LocationId::Forest => &[LocationId::Camp, LocationId::Walls, LocationId::Sewers],
            LocationId::Gate => &[LocationId::Camp, LocationId::Courtyard],
            LocationId::Walls => &[
                LocationId::Camp,
                LocationId::Forest,
                LocationId::Courtyard,
                LocationId::Keep,
            ],
            LocationId::Sewers => &[LocationId::Forest, LocationId::Keep],
            LocationId::Courtyard => &[LocationId::Gate, LocationId::Walls, LocationId::Keep],
            LocationId::Keep => &[
                LocationId::Walls,
                LocationId::Sewers,
                LocationId::Courtyard,
            ],
        }
    }

    #[must_use]
    pub fn is_adjacent_to(self, other: LocationId) -> bool {
        self.adjacent().contains(&other)
    }

    /// Whether this location is eligible for area control.
    #[must_use]
    pub const fn is_capturable(self) -> bool {
        matches!(self, LocationId::Gate | LocationId::Walls | LocationId::Sewers)
    }

    /// The side barred from entering this location until it captures an
    /// adjacent capturable location. Home territory only.
    #[must_use]
    pub const fn blocked_for(self) -> Option<Side> {
        match self {
            LocationId::Camp | LocationId::Forest => Some(Side::Defender),
            LocationId::Courtyard | LocationId::Keep => Some(Side::Attacker),
            LocationId::Gate | LocationId::Walls | LocationId::Sewers => None,
        }
    }

    /// The side whose home territory this is, if any.
    #[must_use]
    pub const fn home_of(self) -> Option<Side> {
        match self.blocked_for() {
            Some(side) => Some(side.opponent()),
            None => None,
        }
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three zones within a location.
///
/// Home zones have a fixed blocker side; the middle zone's blocker is
/// whoever claimed it first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    AttackerZone,
    MiddleZone,
    DefenderZone,
}

impl ZoneId {
    /// All zones, attacker side first.
    pub const ALL: [ZoneId; 3] = [ZoneId::AttackerZone, ZoneId::MiddleZone, ZoneId::DefenderZone];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ZoneId::AttackerZone => 0,
            ZoneId::MiddleZone => 1,
            ZoneId::DefenderZone => 2,
        }
    }

    /// Wire name ("attacker_zone" / "middle_zone" / "defender_zone").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ZoneId::AttackerZone => "attacker_zone",
            ZoneId::MiddleZone => "middle_zone",
            ZoneId::DefenderZone => "defender_zone",
        }
    }

    /// Fixed blocker side for home zones; `None` for the middle zone.
    #[must_use]
    pub const fn fixed_blocker(self) -> Option<Side> {
        match self {
            ZoneId::AttackerZone => Some(Side::Attacker),
            ZoneId::DefenderZone => Some(Side::Defender),
            ZoneId::MiddleZone => None,
        }
    }

    /// The home zone belonging to a side.
    #[must_use]
    pub const fn home_zone(side: Side) -> ZoneId {
        match side {
            Side::Attacker => ZoneId::AttackerZone,
            Side::Defender => ZoneId::DefenderZone,
        }
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
