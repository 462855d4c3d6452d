//! The authoritative turn engine.
//!
//! ## Turn structure
//!
//! `AttackerPhase → DefenderPhase → TurnResolution → AttackerPhase` of
//! the next turn. During its phase a side may draw at most one card,
//! move at most one unit, place any number of cards, then end the
//! phase.
//!
//! ## Turn resolution
//!
//! When the defender ends its phase the engine resolves the turn:
//! reinforcement arrivals, end-of-turn abilities, then combat at every
//! contested zone. Contested zones are queued and resolved one at a
//! time: the engine parks in [`Phase::Resolving`] and waits for the
//! blocker side of the front pair to submit assignments. Once the queue
//! drains, capture power accumulates, captures are evaluated, and the
//! next turn begins.
//!
//! All rule violations are non-fatal: the offending action is rejected
//! with a [`RuleError`] and state is unchanged.

mod combat;
mod error;

pub use combat::{Assignments, PendingCombat};
pub use error::RuleError;

use std::collections::VecDeque;

use crate::abilities;
use crate::board::{Battlefield, LocationId, ZoneId};
use crate::cards::{catalog, CardDef, Unit};
use crate::core::{Side, SideMap};

/// Deck handed to a side when its user has no stored deck.
#[must_use]
pub fn default_deck(side: Side) -> Vec<String> {
    let ids: &[&str] = match side {
        Side::Attacker => &["Footman", "Footman", "Archer", "Eagle", "Knight"],
        Side::Defender => &["Footman", "Footman", "Knight", "War_Hound", "Guardian"],
    };
    ids.iter().map(|s| (*s).to_owned()).collect()
}

/// Where the engine currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Attacker's half of the turn.
    Attacker,
    /// Defender's half of the turn.
    Defender,
    /// Turn resolution parked on combat, awaiting blocker assignments.
    Resolving,
}

#[derive(Clone, Copy, Debug, Default)]
struct PhaseFlags {
    drawn: bool,
    moved: bool,
}

/// A drawn card travelling toward its owner's hand.
#[derive(Clone, Debug)]
pub struct ReinforcementEntry {
    pub def: &'static CardDef,
    pub side: Side,
    pub turns_remaining: u32,
}

#[derive(Debug)]
pub struct GameEngine {
    turn: u32,
    phase: Phase,
    pub battlefield: Battlefield,
    hands: SideMap<Vec<&'static CardDef>>,
    decks: SideMap<Vec<&'static CardDef>>,
    reinforcements: Vec<ReinforcementEntry>,
    flags: SideMap<PhaseFlags>,
    combat_queue: VecDeque<PendingCombat>,
    winner: Option<Side>,
}

impl GameEngine {
    /// Build an engine from per-side deck lists. The leader is seeded
    /// directly into each hand; it never passes through deck or queue.
    pub fn new(deck_ids: SideMap<Vec<String>>) -> Result<Self, RuleError> {
        let mut decks: SideMap<Vec<&'static CardDef>> = SideMap::default();
        for side in Side::BOTH {
            for id in &deck_ids[side] {
                let def = catalog::get(id).ok_or_else(|| RuleError::UnknownCard(id.clone()))?;
                decks[side].push(def);
            }
        }
        Ok(Self {
            turn: 1,
            phase: Phase::Attacker,
            battlefield: Battlefield::new(),
            hands: SideMap::with_value(vec![catalog::leader()]),
            decks,
            reinforcements: Vec::new(),
            flags: SideMap::default(),
            combat_queue: VecDeque::new(),
            winner: None,
        })
    }

    /// Engine with the stock decks.
    pub fn with_default_decks() -> Result<Self, RuleError> {
        Self::new(SideMap::new(
            default_deck(Side::Attacker),
            default_deck(Side::Defender),
        ))
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// The side whose phase it is; `None` during resolution.
    #[must_use]
    pub fn active_side(&self) -> Option<Side> {
        match self.phase {
            Phase::Attacker => Some(Side::Attacker),
            Phase::Defender => Some(Side::Defender),
            Phase::Resolving => None,
        }
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &[&'static CardDef] {
        &self.hands[side]
    }

    #[must_use]
    pub fn deck(&self, side: Side) -> &[&'static CardDef] {
        &self.decks[side]
    }

    pub fn reinforcements(&self, side: Side) -> impl Iterator<Item = &ReinforcementEntry> {
        self.reinforcements.iter().filter(move |e| e.side == side)
    }

    #[must_use]
    pub fn can_draw(&self, side: Side) -> bool {
        self.active_side() == Some(side) && !self.flags[side].drawn
    }

    #[must_use]
    pub fn can_move(&self, side: Side) -> bool {
        self.active_side() == Some(side) && !self.flags[side].moved
    }

    /// The combat pair currently awaiting blocker assignments.
    #[must_use]
    pub fn pending_combat(&self) -> Option<PendingCombat> {
        match self.phase {
            Phase::Resolving => self.combat_queue.front().copied(),
            _ => None,
        }
    }

    fn ensure_acting(&self, side: Side) -> Result<(), RuleError> {
        if self.winner.is_some() {
            return Err(RuleError::MatchOver);
        }
        if self.active_side() != Some(side) {
            return Err(RuleError::NotYourTurn(side));
        }
        Ok(())
    }

    /// Draw a card by id from the deck into the reinforcement queue.
    /// One draw per phase; the card arrives after `cost` full turns.
    pub fn draw_card(&mut self, side: Side, card_id: &str) -> Result<(), RuleError> {
        self.ensure_acting(side)?;
        if self.flags[side].drawn {
            return Err(RuleError::AlreadyDrew(side));
        }
        let def =
            catalog::get(card_id).ok_or_else(|| RuleError::UnknownCard(card_id.to_owned()))?;
        let pos = self.decks[side]
            .iter()
            .position(|d| d.id == def.id)
            .ok_or_else(|| RuleError::CardNotInDeck(card_id.to_owned()))?;
        self.decks[side].remove(pos);
        self.reinforcements.push(ReinforcementEntry {
            def,
            side,
            turns_remaining: def.cost,
        });
        self.flags[side].drawn = true;
        Ok(())
    }

    /// Place a card from hand into a zone. Fires on-play abilities
    /// scoped to that zone and returns their notes.
    pub fn place_card(
        &mut self,
        side: Side,
        card_id: &str,
        location: LocationId,
        zone_id: ZoneId,
    ) -> Result<Vec<String>, RuleError> {
        self.ensure_acting(side)?;
        if !self.battlefield.is_accessible(side, location) {
            return Err(RuleError::LocationBlocked { side, location });
        }
        let pos = self.hands[side]
            .iter()
            .position(|d| d.id == card_id)
            .ok_or_else(|| RuleError::CardNotInHand(card_id.to_owned()))?;
        let def = self.hands[side].remove(pos);

        let zone = &mut self.battlefield[location].zones[zone_id];
        zone.insert(side, Unit::new(def, self.turn));
        let played_index = zone.units[side].len() - 1;
        let notes = abilities::on_play(zone, side, played_index, self.turn);

        // An on-play effect can take the last enemy leader with it.
        self.update_winner();
        Ok(notes)
    }

    /// Move a unit to an adjacent location's middle zone. `unit_index`
    /// counts the side's units at the source location across all three
    /// zones in order. One move per side per phase; a unit cannot move
    /// on the turn it was placed and moves at most once per turn.
    pub fn move_unit(
        &mut self,
        side: Side,
        from: LocationId,
        to: LocationId,
        unit_index: usize,
    ) -> Result<(), RuleError> {
        self.ensure_acting(side)?;
        if self.flags[side].moved {
            return Err(RuleError::AlreadyMoved(side));
        }
        if !from.is_adjacent_to(to) {
            return Err(RuleError::NotAdjacent { from, to });
        }
        if !self.battlefield.is_accessible(side, to) {
            return Err(RuleError::LocationBlocked { side, location: to });
        }

        let (zone_id, local_index) = self
            .locate_unit(side, from, unit_index)
            .ok_or(RuleError::InvalidUnitIndex(unit_index))?;
        {
            let unit = &self.battlefield[from].zones[zone_id].units[side][local_index];
            if unit.turn_placed >= self.turn {
                return Err(RuleError::UnitJustPlaced);
            }
            if unit.has_moved_this_turn {
                return Err(RuleError::UnitAlreadyMoved);
            }
        }

        let mut unit = self
            .battlefield
            .remove_unit(from, zone_id, side, local_index)
            .ok_or(RuleError::InvalidUnitIndex(unit_index))?;
        unit.has_moved_this_turn = true;
        self.battlefield[to].zones[ZoneId::MiddleZone].insert(side, unit);
        self.flags[side].moved = true;
        Ok(())
    }

    /// Resolve a side-global unit index into (zone, local index).
    fn locate_unit(
        &self,
        side: Side,
        location: LocationId,
        unit_index: usize,
    ) -> Option<(ZoneId, usize)> {
        let mut remaining = unit_index;
        for (zone_id, zone) in self.battlefield[location].zones.iter() {
            let count = zone.units[side].len();
            if remaining < count {
                return Some((zone_id, remaining));
            }
            remaining -= count;
        }
        None
    }

    /// End the acting side's phase. Ending the defender's phase kicks
    /// off turn resolution; the returned notes cover everything that
    /// resolved before the engine parked (or finished the turn).
    pub fn end_phase(&mut self, side: Side) -> Result<Vec<String>, RuleError> {
        self.ensure_acting(side)?;
        match side {
            Side::Attacker => {
                self.phase = Phase::Defender;
                self.flags[Side::Defender].drawn = false;
                self.flags[Side::Defender].moved = false;
                self.untap(Side::Defender);
                Ok(Vec::new())
            }
            Side::Defender => Ok(self.begin_resolution()),
        }
    }

    /// Submit blocker assignments for the front combat pair. Only the
    /// pair's blocker side is accepted.
    pub fn submit_assignments(
        &mut self,
        side: Side,
        assignments: &Assignments,
    ) -> Result<Vec<String>, RuleError> {
        if self.winner.is_some() {
            return Err(RuleError::MatchOver);
        }
        let pending = self.pending_combat().ok_or(RuleError::NotResolving)?;
        if side != pending.blocker_side {
            return Err(RuleError::NotBlockerSide(pending.blocker_side));
        }

        let zone = &mut self.battlefield[pending.location].zones[pending.zone];
        let mut notes: Vec<String> =
            combat::resolve_zone_combat(zone, pending.blocker_side, assignments, self.turn)?
                .into_iter()
                .map(|n| format!("{}/{}: {}", pending.location, pending.zone, n))
                .collect();

        self.combat_queue.pop_front();
        self.advance_combat_queue();
        self.update_winner();

        if self.winner.is_none() && self.combat_queue.is_empty() {
            notes.extend(self.finish_turn());
        }
        Ok(notes)
    }

    fn begin_resolution(&mut self) -> Vec<String> {
        let mut notes = Vec::new();

        // (a) Reinforcement arrivals.
        let hands = &mut self.hands;
        self.reinforcements.retain_mut(|entry| {
            entry.turns_remaining = entry.turns_remaining.saturating_sub(1);
            if entry.turns_remaining == 0 {
                hands[entry.side].push(entry.def);
                notes.push(format!(
                    "{} arrived in the {}'s hand",
                    entry.def.name, entry.side
                ));
                false
            } else {
                true
            }
        });

        // (b) End-of-turn abilities, every location and zone.
        for (loc, state) in self.battlefield.iter_mut() {
            for (zone_id, zone) in state.zones.iter_mut() {
                for note in abilities::end_of_turn(zone) {
                    notes.push(format!("{loc}/{zone_id}: {note}"));
                }
            }
        }

        // (c) Queue combat at every contested zone with a determinate
        // blocker side.
        self.combat_queue.clear();
        for (location, state) in self.battlefield.iter() {
            for (zone_id, zone) in state.zones.iter() {
                if !zone.is_contested() {
                    continue;
                }
                let blocker = zone_id.fixed_blocker().or(zone.first_placer);
                if let Some(blocker_side) = blocker {
                    self.combat_queue.push_back(PendingCombat {
                        location,
                        zone: zone_id,
                        blocker_side,
                    });
                }
            }
        }

        if self.combat_queue.is_empty() {
            notes.extend(self.finish_turn());
        } else {
            self.phase = Phase::Resolving;
        }
        notes
    }

    /// Drop queued pairs that earlier combats emptied out.
    fn advance_combat_queue(&mut self) {
        while let Some(front) = self.combat_queue.front() {
            let zone = &self.battlefield[front.location].zones[front.zone];
            if zone.is_contested() {
                break;
            }
            self.combat_queue.pop_front();
        }
    }

    fn finish_turn(&mut self) -> Vec<String> {
        let mut notes = Vec::new();

        // (d) Accumulate capture power at uncaptured capturable
        // locations: base attack, doubled for units standing in the
        // enemy's home zone.
        for (location, state) in self.battlefield.iter_mut() {
            if !location.is_capturable() || state.controller.is_some() {
                continue;
            }
            for side in Side::BOTH {
                let enemy_home = ZoneId::home_zone(side.opponent());
                let gained: i32 = state.zones[ZoneId::MiddleZone].units[side]
                    .iter()
                    .map(|u| u.def.attack)
                    .sum::<i32>()
                    + state.zones[enemy_home].units[side]
                        .iter()
                        .map(|u| u.def.attack * 2)
                        .sum::<i32>();
                state.capture_power[side] += gained;
            }
        }

        // (e) Evaluate captures. Capturing takes a unit in the middle
        // zone and accumulated power at or past the threshold; when
        // both sides qualify, strictly higher power wins and a tie
        // stays contested.
        for (location, state) in self.battlefield.iter_mut() {
            if !location.is_capturable() || state.controller.is_some() {
                continue;
            }
            let qualifies = |side: Side| {
                state.zones[ZoneId::MiddleZone].has_units(side)
                    && state.capture_power[side] >= state.capture_threshold(side)
            };
            let new_controller = match (qualifies(Side::Attacker), qualifies(Side::Defender)) {
                (true, false) => Some(Side::Attacker),
                (false, true) => Some(Side::Defender),
                (true, true) => {
                    let a = state.capture_power[Side::Attacker];
                    let d = state.capture_power[Side::Defender];
                    match a.cmp(&d) {
                        std::cmp::Ordering::Greater => Some(Side::Attacker),
                        std::cmp::Ordering::Less => Some(Side::Defender),
                        std::cmp::Ordering::Equal => None,
                    }
                }
                (false, false) => None,
            };
            if let Some(side) = new_controller {
                state.controller = Some(side);
                state.capture_power = SideMap::default();
                notes.push(format!("{side} captured {location}"));
            }
        }

        // (f) New turn.
        self.flags = SideMap::default();
        self.turn += 1;
        self.phase = Phase::Attacker;
        self.untap(Side::Attacker);
        self.update_winner();
        notes
    }

    fn untap(&mut self, side: Side) {
        for (_, state) in self.battlefield.iter_mut() {
            for (_, zone) in state.zones.iter_mut() {
                for unit in zone.units[side].iter_mut() {
                    unit.untap();
                }
            }
        }
    }

    /// A side loses the moment it has no leader on the battlefield, in
    /// hand, or inbound in the reinforcement queue.
    fn side_has_leader(&self, side: Side) -> bool {
        self.battlefield.has_leader(side)
            || self.hands[side].iter().any(|d| d.is_leader())
            || self
                .reinforcements
                .iter()
                .any(|e| e.side == side && e.def.is_leader())
    }

    fn update_winner(&mut self) {
        if self.winner.is_some() {
            return;
        }
        if !self.side_has_leader(Side::Attacker) {
            self.winner = Some(Side::Defender);
        } else if !self.side_has_leader(Side::Defender) {
            self.winner = Some(Side::Attacker);
        }
    }
}
