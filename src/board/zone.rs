//! Zone state: the units of both sides standing in one sub-area of a
//! location, plus the middle zone's first-placer claim.

use std::ops::{Index, IndexMut};

use crate::cards::{Tag, Unit};
use crate::core::{Side, SideMap};

use super::location::ZoneId;

/// One zone's contents.
#[derive(Clone, Debug, Default)]
pub struct Zone {
    pub units: SideMap<Vec<Unit>>,
    /// First side to place a unit here. Set exactly once per match and
    /// never cleared, even when the zone empties; this is the rule, not
    /// an oversight. Only meaningful for the middle zone.
    pub first_placer: Option<Side>,
}

impl Zone {
    /// Insert a unit, recording the first-placer claim if unclaimed.
    pub fn insert(&mut self, side: Side, unit: Unit) {
        if self.first_placer.is_none() {
            self.first_placer = Some(side);
        }
        self.units[side].push(unit);
    }

    #[must_use]
    pub fn is_contested(&self) -> bool {
        !self.units[Side::Attacker].is_empty() && !self.units[Side::Defender].is_empty()
    }

    #[must_use]
    pub fn has_units(&self, side: Side) -> bool {
        !self.units[side].is_empty()
    }

    #[must_use]
    pub fn has_tag(&self, side: Side, tag: Tag) -> bool {
        self.units[side].iter().any(|u| u.has_tag(tag))
    }

    /// Remove all dead units, returning them for on-death processing.
    pub fn cull_dead(&mut self, side: Side) -> Vec<Unit> {
        let mut dead = Vec::new();
        self.units[side].retain(|u| {
            if u.is_alive() {
                true
            } else {
                dead.push(u.clone());
                false
            }
        });
        dead
    }
}

/// Per-zone storage for a location, indexable by [`ZoneId`].
#[derive(Clone, Debug, Default)]
pub struct ZoneMap {
    zones: [Zone; 3],
}

impl ZoneMap {
    /// Iterate over (ZoneId, &Zone) pairs, attacker zone first.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, &Zone)> {
        ZoneId::ALL.into_iter().map(|id| (id, &self.zones[id.index()]))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ZoneId, &mut Zone)> {
        ZoneId::ALL.into_iter().zip(self.zones.iter_mut())
    }
}

impl Index<ZoneId> for ZoneMap {
    type Output = Zone;

    fn index(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }
}

impl IndexMut<ZoneId> for ZoneMap {
    fn index_mut(&mut self, id: ZoneId) -> &mut Zone {
        &mut self.zones[id.index()]
    }
}
