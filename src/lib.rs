//! Siegefront: authoritative rules engine and session server for a
//! two-sided tactical card battle game.
//!
//! The attacker besieges a citadel the defender holds. Units deploy
//! onto a seven-location battlefield, three zones per location; turns
//! alternate through attacker and defender phases and resolve combat,
//! abilities, and territorial capture at the turn boundary. The engine
//! is fully deterministic and server-authoritative; each client only
//! ever receives its own fog-of-war projection.
//!
//! ## Layout
//!
//! - [`core`]: sides and per-side storage.
//! - [`cards`]: the static catalog, tags, and runtime unit state.
//! - [`board`]: locations, zones, and the capture ledger.
//! - [`abilities`]: the tag-driven effect resolver.
//! - [`engine`]: the turn/phase state machine and combat protocol.
//! - [`session`]: match sessions and per-player projections.
//! - [`protocol`]: the JSON wire messages.
//! - [`server`]: the axum WebSocket server and backend trait.

pub mod abilities;
pub mod board;
pub mod cards;
pub mod core;
pub mod engine;
pub mod protocol;
pub mod server;
pub mod session;
