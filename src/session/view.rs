//! Fog-of-war state projection.
//!
//! Every outbound `game_state` payload is built here, per viewer. The
//! viewer always sees its own units, hand, deck and reinforcement queue;
//! it sees enemy units at a location only when it has a unit (or Scout)
//! of its own standing there. Blind locations carry only an opaque
//! per-zone enemy count. Capture ledgers are public.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::{LocationId, Zone, ZoneId};
use crate::cards::{CardDef, Unit};
use crate::core::Side;
use crate::engine::GameEngine;

/// A unit or hand card as serialized on the wire.
#[derive(Clone, Debug, Serialize)]
pub struct CardView {
    pub card_id: &'static str,
    pub name: &'static str,
    pub attack: i32,
    pub health: i32,
    pub cost: u32,
    pub subtype: String,
    pub special: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_health: Option<i32>,
    pub is_tapped: bool,
    pub turn_placed: u32,
    pub has_moved_this_turn: bool,
    pub can_move: bool,
}

impl CardView {
    fn from_unit(unit: &Unit, current_turn: u32) -> Self {
        Self {
            card_id: unit.def.id,
            name: unit.def.name,
            attack: unit.def.attack,
            health: unit.def.health,
            cost: unit.def.cost,
            subtype: unit.def.subtype_string(),
            special: unit.def.special,
            current_health: Some(unit.current_health),
            is_tapped: unit.is_tapped,
            turn_placed: unit.turn_placed,
            has_moved_this_turn: unit.has_moved_this_turn,
            can_move: unit.turn_placed < current_turn && !unit.has_moved_this_turn,
        }
    }

    fn from_def(def: &'static CardDef) -> Self {
        Self {
            card_id: def.id,
            name: def.name,
            attack: def.attack,
            health: def.health,
            cost: def.cost,
            subtype: def.subtype_string(),
            special: def.special,
            current_health: None,
            is_tapped: false,
            turn_placed: 0,
            has_moved_this_turn: false,
            can_move: false,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ZoneView {
    pub own_cards: Vec<CardView>,
    /// `None` when fog hides this location from the viewer.
    pub enemy_cards: Option<Vec<CardView>>,
    pub enemy_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_placer: Option<Side>,
}

impl ZoneView {
    fn project(zone: &Zone, zone_id: ZoneId, viewer: Side, can_see: bool, turn: u32) -> Self {
        let enemy = viewer.opponent();
        Self {
            own_cards: zone.units[viewer]
                .iter()
                .map(|u| CardView::from_unit(u, turn))
                .collect(),
            enemy_cards: can_see.then(|| {
                zone.units[enemy]
                    .iter()
                    .map(|u| CardView::from_unit(u, turn))
                    .collect()
            }),
            enemy_count: zone.units[enemy].len(),
            first_placer: match zone_id {
                ZoneId::MiddleZone => zone.first_placer,
                _ => None,
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ZonesView {
    pub attacker_zone: ZoneView,
    pub middle_zone: ZoneView,
    pub defender_zone: ZoneView,
}

/// Area-control ledger for a capturable location. Always visible.
#[derive(Clone, Debug, Serialize)]
pub struct CaptureView {
    pub capturable: bool,
    pub controller: Option<Side>,
    pub attacker_power: i32,
    pub defender_power: i32,
    pub attacker_threshold: i32,
    pub defender_threshold: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct LocationView {
    pub zones: ZonesView,
    pub can_see: bool,
    pub controller: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_info: Option<CaptureView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReinforcementView {
    pub card_id: &'static str,
    pub turns_remaining: u32,
}

/// The blocker-assignment prompt shown while resolution is parked.
#[derive(Clone, Debug, Serialize)]
pub struct CombatView {
    pub phase: &'static str,
    pub location: LocationId,
    pub zone: ZoneId,
    pub blocker_side: Side,
    pub is_your_turn_to_assign: bool,
    pub attackers: Vec<CardView>,
    pub your_blockers: Vec<CardView>,
}

/// Everything one player is allowed to know about the match.
#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub turn: u32,
    pub current_player: Option<Side>,
    pub your_role: Side,
    pub is_your_turn: bool,
    pub battlefield: BTreeMap<&'static str, LocationView>,
    pub hand: Vec<CardView>,
    pub reinforcements: Vec<ReinforcementView>,
    pub deck_count: usize,
    /// The viewer's own deck ids, for the draw menu. Private to the
    /// owner, not a fog concern.
    pub deck_cards: Vec<&'static str>,
    pub can_draw: bool,
    pub can_move: bool,
    pub combat_state: Option<CombatView>,
    pub winner: Option<Side>,
}

impl PlayerView {
    /// Project the match state as seen by `viewer`.
    #[must_use]
    pub fn project(engine: &GameEngine, viewer: Side) -> Self {
        let turn = engine.turn();

        let mut battlefield = BTreeMap::new();
        for (location, state) in engine.battlefield.iter() {
            let can_see = state.can_see(viewer);
            let project_zone = |zone_id: ZoneId| {
                ZoneView::project(&state.zones[zone_id], zone_id, viewer, can_see, turn)
            };
            let capture_info = location.is_capturable().then(|| CaptureView {
                capturable: true,
                controller: state.controller,
                attacker_power: state.capture_power[Side::Attacker],
                defender_power: state.capture_power[Side::Defender],
                attacker_threshold: state.capture_threshold(Side::Attacker),
                defender_threshold: state.capture_threshold(Side::Defender),
            });
            battlefield.insert(
                location.as_str(),
                LocationView {
                    zones: ZonesView {
                        attacker_zone: project_zone(ZoneId::AttackerZone),
                        middle_zone: project_zone(ZoneId::MiddleZone),
                        defender_zone: project_zone(ZoneId::DefenderZone),
                    },
                    can_see,
                    controller: state.controller,
                    capture_info,
                },
            );
        }

        let combat_state = engine.pending_combat().map(|pending| {
            let zone = &engine.battlefield[pending.location].zones[pending.zone];
            let is_yours = pending.blocker_side == viewer;
            let attacker_side = pending.blocker_side.opponent();
            CombatView {
                phase: "assign_blockers",
                location: pending.location,
                zone: pending.zone,
                blocker_side: pending.blocker_side,
                is_your_turn_to_assign: is_yours,
                attackers: zone.units[attacker_side]
                    .iter()
                    .map(|u| CardView::from_unit(u, turn))
                    .collect(),
                your_blockers: if is_yours {
                    zone.units[pending.blocker_side]
                        .iter()
                        .map(|u| CardView::from_unit(u, turn))
                        .collect()
                } else {
                    Vec::new()
                },
            }
        });

        Self {
            turn,
            current_player: engine.active_side(),
            your_role: viewer,
            is_your_turn: engine.active_side() == Some(viewer),
            battlefield,
            hand: engine.hand(viewer).iter().map(|d| CardView::from_def(d)).collect(),
            reinforcements: engine
                .reinforcements(viewer)
                .map(|e| ReinforcementView {
                    card_id: e.def.id,
                    turns_remaining: e.turns_remaining,
                })
                .collect(),
            deck_count: engine.deck(viewer).len(),
            deck_cards: engine.deck(viewer).iter().map(|d| d.id).collect(),
            can_draw: engine.can_draw(viewer),
            can_move: engine.can_move(viewer),
            combat_state,
            winner: engine.winner(),
        }
    }
}
