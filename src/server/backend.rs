//! External collaborators behind a trait.
//!
//! Accounts, credentials, and persisted deck lists live outside this
//! system. The server only needs a handful of calls; `MemoryBackend`
//! satisfies them for tests and local play.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use uuid::Uuid;

use crate::cards::catalog;
use crate::core::{Side, SideMap};
use crate::engine::default_deck;
use crate::session::MatchSession;

pub trait Backend: Send + Sync + 'static {
    /// Resolve an auth token to a user id.
    fn validate_session(&self, token: &str) -> Option<u64>;

    /// The deck a user brings into a match.
    fn get_active_deck(&self, user_id: u64, side: Side) -> Vec<String>;

    /// A match was created.
    fn create_match(&self, _match_id: Uuid, _users: SideMap<u64>) {}

    /// A match ended, possibly by disconnect before a winner.
    fn end_match(&self, _match_id: Uuid, _winner: Option<Side>) {}

    /// Persist match state for recovery or replay.
    fn save_snapshot(&self, _session: &MatchSession) {}
}

/// Permissive in-memory backend: every token authenticates, ids are
/// handed out per token, decks fall back to the stock lists.
#[derive(Default)]
pub struct MemoryBackend {
    tokens: DashMap<String, u64>,
    decks: DashMap<u64, Vec<String>>,
    next_user: AtomicU64,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a deck for a user, dropping ids the catalog does not offer
    /// for deck building.
    pub fn set_deck(&self, user_id: u64, deck: Vec<String>) {
        let deck = deck
            .into_iter()
            .filter(|id| catalog::deck_card_ids().any(|known| known == id.as_str()))
            .collect();
        self.decks.insert(user_id, deck);
    }
}

impl Backend for MemoryBackend {
    fn validate_session(&self, token: &str) -> Option<u64> {
        if let Ok(id) = token.parse::<u64>() {
            return Some(id);
        }
        let id = *self
            .tokens
            .entry(token.to_owned())
            .or_insert_with(|| self.next_user.fetch_add(1, Ordering::Relaxed) + 1_000_000);
        Some(id)
    }

    fn get_active_deck(&self, user_id: u64, side: Side) -> Vec<String> {
        self.decks
            .get(&user_id)
            .map(|d| d.clone())
            .unwrap_or_else(|| default_deck(side))
    }
}
