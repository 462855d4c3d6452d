//! Static card definitions.
//!
//! A `CardDef` holds the unchanging properties of a card: stats, cost,
//! subtype tags, display text. Definitions live in the compiled-in
//! catalog and are shared by `&'static` reference; instance state
//! (damage, tapped, movement flags) lives on [`super::Unit`].

use serde::Serialize;

use super::tags::{Species, Tag};

/// Broad card category. The current roster is all units, but the wire
/// format carries the type so non-unit cards can be added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CardType {
    Unit,
}

/// Static card definition, shared by reference from the catalog.
#[derive(Debug, Serialize)]
pub struct CardDef {
    /// Stable string key used on the wire and in deck lists.
    pub id: &'static str,
    pub card_type: CardType,
    /// Ordered subtype tags; ability dispatch reads these.
    pub tags: &'static [Tag],
    pub species: Species,
    /// Base attack before any modifiers.
    pub attack: i32,
    /// Base health before any modifiers.
    pub health: i32,
    /// Turns in the reinforcement queue between drawing and arrival.
    pub cost: u32,
    /// Display name.
    pub name: &'static str,
    /// Ability text shown to players.
    pub special: &'static str,
}

impl CardDef {
    /// Check whether this definition carries a tag.
    #[must_use]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// Comma-separated subtype list as it appears on the wire.
    #[must_use]
    pub fn subtype_string(&self) -> String {
        self.tags
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Whether this is the leader unit.
    #[must_use]
    pub fn is_leader(&self) -> bool {
        self.has_tag(Tag::Leader)
    }
}

impl PartialEq for CardDef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CardDef {}
