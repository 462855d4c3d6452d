//! Wire protocol.
//!
//! Messages are discriminated JSON objects over a persistent WebSocket,
//! one connection per user. Inbound game actions arrive wrapped in a
//! `game_action` envelope; outbound state is always the viewer's
//! fog-of-war projection, never the raw match state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Side;
use crate::session::PlayerView;

/// Client → server messages.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Authenticate the connection.
    Auth { token: String },
    /// Join the matchmaking queue (paired with the first waiting user).
    FindMatch,
    /// Leave the matchmaking queue.
    CancelMatch,
    /// An in-match action.
    GameAction { action: GameAction },
}

/// One player action inside a match.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GameAction {
    DrawCard {
        card_id: String,
    },
    PlaceCard {
        card_id: String,
        location: String,
        /// Wire zone name; defaults to the middle zone.
        #[serde(default)]
        zone: Option<String>,
    },
    MoveCard {
        from_location: String,
        to_location: String,
        /// Index across the side's units at the source location, all
        /// zones in order.
        card_index: usize,
    },
    EndTurn,
    CombatAssignments {
        /// Attacker index → ordered blocker indices. JSON object keys
        /// are strings; the session parses them.
        assignments: BTreeMap<String, Vec<usize>>,
    },
}

impl GameAction {
    /// Verb name echoed back in action results.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            GameAction::DrawCard { .. } => "draw_card",
            GameAction::PlaceCard { .. } => "place_card",
            GameAction::MoveCard { .. } => "move_card",
            GameAction::EndTurn => "end_turn",
            GameAction::CombatAssignments { .. } => "combat_assignments",
        }
    }
}

/// Server → client messages.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    AuthSuccess {
        user_id: u64,
    },
    AuthFailed {
        error: String,
    },
    WaitingForMatch,
    MatchFound {
        match_id: Uuid,
        role: Side,
    },
    MatchRejoined {
        match_id: Uuid,
        role: Side,
    },
    GameState {
        data: PlayerView,
    },
    ActionResult {
        success: bool,
        action: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        notes: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        winner: Option<Side>,
    },
    MatchError {
        error: String,
    },
}

impl ServerMessage {
    #[must_use]
    pub fn action_ok(action: &'static str, notes: Vec<String>, winner: Option<Side>) -> Self {
        ServerMessage::ActionResult {
            success: true,
            action,
            error: None,
            notes,
            winner,
        }
    }

    #[must_use]
    pub fn action_err(action: &'static str, error: impl Into<String>) -> Self {
        ServerMessage::ActionResult {
            success: false,
            action,
            error: Some(error.into()),
            notes: Vec::new(),
            winner: None,
        }
    }
}
