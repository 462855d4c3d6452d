//! The WebSocket session server.
//!
//! One connection per user. Each connection gets an outbound channel
//! and a writer task; game state is pushed as fog-of-war projections
//! after every accepted action. Matchmaking pairs the first two waiting
//! users. A user who reconnects mid-match is re-attached to their match
//! and receives the current projection.
//!
//! Matches are independent: each lives behind its own mutex, so slow
//! combat in one match never blocks another.

mod backend;

pub use backend::{Backend, MemoryBackend};

use std::sync::Arc;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use dashmap::DashMap;
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{Side, SideMap};
use crate::protocol::{ClientMessage, GameAction, ServerMessage};
use crate::session::MatchSession;

type Tx = mpsc::UnboundedSender<ServerMessage>;

struct MatchRoom {
    session: Mutex<MatchSession>,
}

#[derive(Clone)]
pub struct AppState {
    backend: Arc<dyn Backend>,
    matches: Arc<DashMap<Uuid, Arc<MatchRoom>>>,
    user_matches: Arc<DashMap<u64, Uuid>>,
    connections: Arc<DashMap<u64, Tx>>,
    waiting: Arc<Mutex<Option<u64>>>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            matches: Arc::new(DashMap::new()),
            user_matches: Arc::new(DashMap::new()),
            connections: Arc::new(DashMap::new()),
            waiting: Arc::new(Mutex::new(None)),
        }
    }

    fn send_to(&self, user_id: u64, msg: ServerMessage) {
        if let Some(tx) = self.connections.get(&user_id) {
            let _ = tx.send(msg);
        }
    }

    /// Push fresh projections to both players of a match.
    fn broadcast_state(&self, room: &MatchRoom) {
        let session = room.session.lock();
        for side in Side::BOTH {
            let user = session.user(side);
            if let Some(view) = session.view_for(user) {
                self.send_to(user, ServerMessage::GameState { data: view });
            }
        }
    }

    fn room_for(&self, user_id: u64) -> Option<Arc<MatchRoom>> {
        let match_id = *self.user_matches.get(&user_id)?;
        self.matches.get(&match_id).map(|r| Arc::clone(&r))
    }

    /// Tear down a closed connection: drop its sender (unless a newer
    /// connection for the same user already replaced it) and vacate the
    /// matchmaking queue so the next `find_match` cannot pair against a
    /// gone user.
    fn cleanup_connection(&self, user_id: u64, tx: &Tx) {
        self.connections
            .remove_if(&user_id, |_, existing| existing.same_channel(tx));
        let mut waiting = self.waiting.lock();
        if *waiting == Some(user_id) {
            *waiting = None;
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/ws", get(ws_handler))
        .with_state(state)
}

async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket))
}

async fn handle_socket(state: AppState, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Writer task: everything outbound funnels through the channel.
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(err) => {
                    warn!(error = %err, "failed to serialize outbound message");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut user_id: Option<u64> = None;

    while let Some(Ok(msg)) = ws_rx.next().await {
        let Message::Text(text) = msg else {
            if matches!(msg, Message::Close(_)) {
                break;
            }
            continue;
        };
        let parsed = match serde_json::from_str::<ClientMessage>(&text) {
            Ok(parsed) => parsed,
            Err(err) => {
                let _ = tx.send(ServerMessage::MatchError {
                    error: format!("bad message: {err}"),
                });
                continue;
            }
        };

        match parsed {
            ClientMessage::Auth { token } => match state.backend.validate_session(&token) {
                Some(id) => {
                    user_id = Some(id);
                    state.connections.insert(id, tx.clone());
                    info!(user_id = id, "user authenticated");
                    let _ = tx.send(ServerMessage::AuthSuccess { user_id: id });
                    rejoin_if_in_match(&state, id);
                }
                None => {
                    let _ = tx.send(ServerMessage::AuthFailed {
                        error: "invalid token".to_owned(),
                    });
                }
            },
            ClientMessage::FindMatch => {
                let Some(id) = user_id else {
                    let _ = tx.send(ServerMessage::MatchError {
                        error: "authenticate first".to_owned(),
                    });
                    continue;
                };
                handle_find_match(&state, id);
            }
            ClientMessage::CancelMatch => {
                if let Some(id) = user_id {
                    let mut waiting = state.waiting.lock();
                    if *waiting == Some(id) {
                        *waiting = None;
                    }
                }
            }
            ClientMessage::GameAction { action } => {
                let Some(id) = user_id else {
                    let _ = tx.send(ServerMessage::MatchError {
                        error: "authenticate first".to_owned(),
                    });
                    continue;
                };
                handle_game_action(&state, id, action, &tx);
            }
        }
    }

    if let Some(id) = user_id {
        state.cleanup_connection(id, &tx);
        info!(user_id = id, "connection closed");
    }
    writer.abort();
}

fn rejoin_if_in_match(state: &AppState, user_id: u64) {
    let Some(room) = state.room_for(user_id) else {
        return;
    };
    let (match_id, role, view) = {
        let session = room.session.lock();
        let Some(role) = session.role_of(user_id) else {
            return;
        };
        (session.match_id, role, session.view_for(user_id))
    };
    info!(user_id, %match_id, "user rejoined match");
    state.send_to(user_id, ServerMessage::MatchRejoined { match_id, role });
    if let Some(view) = view {
        state.send_to(user_id, ServerMessage::GameState { data: view });
    }
}

fn handle_find_match(state: &AppState, user_id: u64) {
    if state.user_matches.contains_key(&user_id) {
        state.send_to(
            user_id,
            ServerMessage::MatchError {
                error: "already in a match".to_owned(),
            },
        );
        return;
    }

    let opponent = {
        let mut waiting = state.waiting.lock();
        match *waiting {
            Some(other) if other != user_id => waiting.take(),
            Some(_) => None,
            None => {
                *waiting = Some(user_id);
                None
            }
        }
    };

    let Some(opponent) = opponent else {
        state.send_to(user_id, ServerMessage::WaitingForMatch);
        return;
    };

    // First-waiting user attacks; the newcomer defends.
    let users = SideMap::new(opponent, user_id);
    let decks = SideMap::new(
        state.backend.get_active_deck(opponent, Side::Attacker),
        state.backend.get_active_deck(user_id, Side::Defender),
    );
    let match_id = Uuid::new_v4();
    let session = match MatchSession::new(match_id, users.clone(), decks) {
        Ok(session) => session,
        Err(err) => {
            warn!(%match_id, error = %err, "failed to create match");
            for side in Side::BOTH {
                state.send_to(
                    users[side],
                    ServerMessage::MatchError {
                        error: err.to_string(),
                    },
                );
            }
            return;
        }
    };

    let room = Arc::new(MatchRoom {
        session: Mutex::new(session),
    });
    state.matches.insert(match_id, Arc::clone(&room));
    for side in Side::BOTH {
        state.user_matches.insert(users[side], match_id);
        state.send_to(
            users[side],
            ServerMessage::MatchFound {
                match_id,
                role: side,
            },
        );
    }
    info!(%match_id, attacker = users[Side::Attacker], defender = users[Side::Defender], "match created");
    state.backend.create_match(match_id, users);
    state.broadcast_state(&room);
}

fn handle_game_action(state: &AppState, user_id: u64, action: GameAction, tx: &Tx) {
    let Some(room) = state.room_for(user_id) else {
        let _ = tx.send(ServerMessage::MatchError {
            error: "not in a match".to_owned(),
        });
        return;
    };

    let (reply, winner, match_id) = {
        let mut session = room.session.lock();
        let reply = session.handle_action(user_id, action);
        state.backend.save_snapshot(&session);
        (reply, session.winner(), session.match_id)
    };

    let _ = tx.send(reply);
    state.broadcast_state(&room);

    if let Some(winner) = winner {
        info!(%match_id, %winner, "match decided");
        let session = room.session.lock();
        for side in Side::BOTH {
            state.user_matches.remove(&session.user(side));
        }
        drop(session);
        state.matches.remove(&match_id);
        state.backend.end_match(match_id, Some(winner));
    }
}
