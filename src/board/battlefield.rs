//! Battlefield storage: per-location zone contents, controllers, and the
//! capture ledger.

use std::ops::{Index, IndexMut};

use crate::cards::{Tag, Unit};
use crate::core::{Side, SideMap};

use super::location::{LocationId, ZoneId, CAPTURE_BASE_THRESHOLD};
use super::zone::ZoneMap;

/// One location's full state.
#[derive(Clone, Debug)]
pub struct LocationState {
    pub zones: ZoneMap,
    /// Current controller. Fixed home locations start controlled by
    /// their side; capturable locations start uncontrolled and flip at
    /// most once.
    pub controller: Option<Side>,
    /// Accumulated capture power per side. Only capturable locations
    /// ever accumulate; reset to zero on capture.
    pub capture_power: SideMap<i32>,
}

impl LocationState {
    fn new(id: LocationId) -> Self {
        Self {
            zones: ZoneMap::default(),
            controller: id.home_of(),
            capture_power: SideMap::default(),
        }
    }

    #[must_use]
    pub fn has_presence(&self, side: Side) -> bool {
        self.zones.iter().any(|(_, z)| z.has_units(side))
    }

    #[must_use]
    pub fn has_scout(&self, side: Side) -> bool {
        self.zones.iter().any(|(_, z)| z.has_tag(side, Tag::Scout))
    }

    /// Fog-of-war predicate: a viewer sees enemy units here when it has
    /// a unit (or a Scout) of its own at this location.
    #[must_use]
    pub fn can_see(&self, viewer: Side) -> bool {
        self.has_presence(viewer) || self.has_scout(viewer)
    }

    /// Sum of current health of a side's units across all zones.
    #[must_use]
    pub fn total_health(&self, side: Side) -> i32 {
        self.zones
            .iter()
            .flat_map(|(_, z)| z.units[side].iter())
            .map(|u| u.current_health)
            .sum()
    }

    /// Capture threshold for `side`: base constant plus the current
    /// health of everything the enemy has standing here.
    #[must_use]
    pub fn capture_threshold(&self, side: Side) -> i32 {
        CAPTURE_BASE_THRESHOLD + self.total_health(side.opponent())
    }

    #[must_use]
    pub fn unit_count(&self, side: Side) -> usize {
        self.zones.iter().map(|(_, z)| z.units[side].len()).sum()
    }
}

/// The full battlefield: all seven locations.
#[derive(Clone, Debug)]
pub struct Battlefield {
    locations: [LocationState; 7],
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new()
    }
}

impl Battlefield {
    #[must_use]
    pub fn new() -> Self {
        Self {
            locations: LocationId::ALL.map(LocationState::new),
        }
    }

    /// Iterate over (LocationId, &LocationState) pairs, in map order.
    pub fn iter(&self) -> impl Iterator<Item = (LocationId, &LocationState)> {
        LocationId::ALL.into_iter().map(|id| (id, &self.locations[id.index()]))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (LocationId, &mut LocationState)> {
        LocationId::ALL.into_iter().zip(self.locations.iter_mut())
    }

    /// Whether `side` may place or move into `location`: its own and
    /// neutral territory always; enemy home territory only once it
    /// controls an adjacent capturable location.
    #[must_use]
    pub fn is_accessible(&self, side: Side, location: LocationId) -> bool {
        match location.blocked_for() {
            Some(blocked) if blocked == side => location
                .adjacent()
                .iter()
                .any(|&adj| adj.is_capturable() && self[adj].controller == Some(side)),
            _ => true,
        }
    }

    /// Remove a unit by index from a zone. Part of the remove-then-insert
    /// move discipline; the caller re-inserts at the destination.
    pub fn remove_unit(
        &mut self,
        location: LocationId,
        zone: ZoneId,
        side: Side,
        index: usize,
    ) -> Option<Unit> {
        let units = &mut self[location].zones[zone].units[side];
        (index < units.len()).then(|| units.remove(index))
    }

    /// Total unit count for a side across the whole battlefield.
    #[must_use]
    pub fn unit_count(&self, side: Side) -> usize {
        self.iter().map(|(_, loc)| loc.unit_count(side)).sum()
    }

    /// Whether a side still has a leader unit anywhere on the board.
    #[must_use]
    pub fn has_leader(&self, side: Side) -> bool {
        self.iter().any(|(_, loc)| {
            loc.zones
                .iter()
                .any(|(_, z)| z.units[side].iter().any(|u| u.def.is_leader()))
        })
    }
}

impl Index<LocationId> for Battlefield {
    type Output = LocationState;

    fn index(&self, id: LocationId) -> &LocationState {
        &self.locations[id.index()]
    }
}

impl IndexMut<LocationId> for Battlefield {
    fn index_mut(&mut self, id: LocationId) -> &mut LocationState {
        &mut self.locations[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog;

    fn unit(id: &str) -> Unit {
        Unit::new(catalog::get(id).unwrap(), 1)
    }

    #[test]
    fn test_initial_controllers() {
        let bf = Battlefield::new();
        assert_eq!(bf[LocationId::Camp].controller, Some(Side::Attacker));
        assert_eq!(bf[LocationId::Keep].controller, Some(Side::Defender));
        assert_eq!(bf[LocationId::Walls].controller, None);
    }

    #[test]
    fn test_home_territory_blocked_until_capture() {
        let mut bf = Battlefield::new();
        assert!(!bf.is_accessible(Side::Attacker, LocationId::Keep));
        assert!(bf.is_accessible(Side::Attacker, LocationId::Camp));
        assert!(bf.is_accessible(Side::Attacker, LocationId::Walls));

        // Capturing the Walls opens the Keep and Courtyard.
        bf[LocationId::Walls].controller = Some(Side::Attacker);
        assert!(bf.is_accessible(Side::Attacker, LocationId::Keep));
        assert!(bf.is_accessible(Side::Attacker, LocationId::Courtyard));
        // Still closed to the defender's mirror image.
        assert!(!bf.is_accessible(Side::Defender, LocationId::Camp));
    }

    #[test]
    fn test_capture_threshold_scales_with_enemy_health() {
        let mut bf = Battlefield::new();
        assert_eq!(bf[LocationId::Gate].capture_threshold(Side::Attacker), 5);

        bf[LocationId::Gate].zones[ZoneId::MiddleZone].insert(Side::Defender, unit("Guardian"));
        assert_eq!(bf[LocationId::Gate].capture_threshold(Side::Attacker), 9);
        // The defender's own units do not raise its threshold.
        assert_eq!(bf[LocationId::Gate].capture_threshold(Side::Defender), 5);
    }

    #[test]
    fn test_visibility_requires_presence() {
        let mut bf = Battlefield::new();
        bf[LocationId::Walls].zones[ZoneId::MiddleZone].insert(Side::Defender, unit("Knight"));
        assert!(!bf[LocationId::Walls].can_see(Side::Attacker));

        bf[LocationId::Walls].zones[ZoneId::AttackerZone].insert(Side::Attacker, unit("Eagle"));
        assert!(bf[LocationId::Walls].can_see(Side::Attacker));
    }

    #[test]
    fn test_remove_unit_bounds() {
        let mut bf = Battlefield::new();
        bf[LocationId::Camp].zones[ZoneId::MiddleZone].insert(Side::Attacker, unit("Footman"));
        assert!(bf
            .remove_unit(LocationId::Camp, ZoneId::MiddleZone, Side::Attacker, 1)
            .is_none());
        let removed = bf
            .remove_unit(LocationId::Camp, ZoneId::MiddleZone, Side::Attacker, 0)
            .unwrap();
        assert_eq!(removed.def.id, "Footman");
        assert_eq!(bf.unit_count(Side::Attacker), 0);
    }

    #[test]
    fn test_has_leader() {
        let mut bf = Battlefield::new();
        assert!(!bf.has_leader(Side::Attacker));
        bf[LocationId::Camp].zones[ZoneId::MiddleZone]
            .insert(Side::Attacker, unit("Avatar"));
        assert!(bf.has_leader(Side::Attacker));
    }
}
