//! Match sessions.
//!
//! A `MatchSession` binds one [`GameEngine`] to the two user ids playing
//! it, brokers wire actions into engine calls, and produces per-viewer
//! fog-of-war projections. It owns no I/O; the server layer holds it
//! behind a lock and pushes the projections out.

mod view;

pub use view::{CardView, CombatView, LocationView, PlayerView, ReinforcementView, ZoneView};

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::board::{LocationId, ZoneId};
use crate::core::{Side, SideMap};
use crate::engine::{Assignments, GameEngine, RuleError};
use crate::protocol::{GameAction, ServerMessage};

pub struct MatchSession {
    pub match_id: Uuid,
    users: SideMap<u64>,
    engine: GameEngine,
}

impl MatchSession {
    /// Create a session over freshly built engine state.
    pub fn new(
        match_id: Uuid,
        users: SideMap<u64>,
        decks: SideMap<Vec<String>>,
    ) -> Result<Self, RuleError> {
        Ok(Self {
            match_id,
            users,
            engine: GameEngine::new(decks)?,
        })
    }

    /// The role a user plays in this match, if any.
    #[must_use]
    pub fn role_of(&self, user_id: u64) -> Option<Side> {
        Side::BOTH.into_iter().find(|&s| self.users[s] == user_id)
    }

    #[must_use]
    pub fn user(&self, side: Side) -> u64 {
        self.users[side]
    }

    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.engine.winner()
    }

    /// The projection sent to a user, or `None` for strangers.
    #[must_use]
    pub fn view_for(&self, user_id: u64) -> Option<PlayerView> {
        self.role_of(user_id)
            .map(|side| PlayerView::project(&self.engine, side))
    }

    /// Apply one wire action for a user. Always answers with an
    /// `action_result`; rule violations leave the match untouched.
    pub fn handle_action(&mut self, user_id: u64, action: GameAction) -> ServerMessage {
        let verb = action.verb();
        let Some(side) = self.role_of(user_id) else {
            return ServerMessage::action_err(verb, "not a player in this match");
        };
        match self.apply(side, action) {
            Ok(notes) => ServerMessage::action_ok(verb, notes, self.engine.winner()),
            Err(reason) => ServerMessage::action_err(verb, reason),
        }
    }

    fn apply(&mut self, side: Side, action: GameAction) -> Result<Vec<String>, String> {
        match action {
            GameAction::DrawCard { card_id } => {
                self.engine
                    .draw_card(side, &card_id)
                    .map_err(|e| e.to_string())?;
                Ok(Vec::new())
            }
            GameAction::PlaceCard {
                card_id,
                location,
                zone,
            } => {
                let location = parse_location(&location)?;
                let zone = match zone.as_deref() {
                    None => ZoneId::MiddleZone,
                    Some(name) => parse_zone(name)?,
                };
                self.engine
                    .place_card(side, &card_id, location, zone)
                    .map_err(|e| e.to_string())
            }
            GameAction::MoveCard {
                from_location,
                to_location,
                card_index,
            } => {
                let from = parse_location(&from_location)?;
                let to = parse_location(&to_location)?;
                self.engine
                    .move_unit(side, from, to, card_index)
                    .map_err(|e| e.to_string())?;
                Ok(Vec::new())
            }
            GameAction::EndTurn => self.engine.end_phase(side).map_err(|e| e.to_string()),
            GameAction::CombatAssignments { assignments } => {
                let assignments = parse_assignments(&assignments)?;
                self.engine
                    .submit_assignments(side, &assignments)
                    .map_err(|e| e.to_string())
            }
        }
    }
}

fn parse_location(name: &str) -> Result<LocationId, String> {
    LocationId::from_str_opt(name).ok_or_else(|| format!("unknown location: {name}"))
}

fn parse_zone(name: &str) -> Result<ZoneId, String> {
    ZoneId::ALL
        .into_iter()
        .find(|z| z.as_str() == name)
        .ok_or_else(|| format!("unknown zone: {name}"))
}

/// JSON object keys arrive as strings; resolve them to attacker indices.
fn parse_assignments(raw: &BTreeMap<String, Vec<usize>>) -> Result<Assignments, String> {
    raw.iter()
        .map(|(key, blockers)| {
            key.parse::<usize>()
                .map(|idx| (idx, blockers.clone()))
                .map_err(|_| format!("bad attacker index: {key}"))
        })
        .collect()
}
