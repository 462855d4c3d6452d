//! Runtime unit state.
//!
//! A `Unit` pairs a `&'static CardDef` with everything that changes over
//! the course of a match: remaining health, tap state, movement flags,
//! and the attack/health modifiers left behind by abilities.

use super::catalog;
use super::definition::CardDef;
use super::tags::Tag;

/// A unit on the battlefield (or in a hand/reinforcement slot about to
/// arrive on it).
#[derive(Clone, Debug)]
pub struct Unit {
    pub def: &'static CardDef,
    /// Remaining health. A unit at 0 or below is dead and gets culled.
    pub current_health: i32,
    /// Set when the unit strikes in combat, cleared at its side's untap
    /// step. Summoned tokens arrive tapped; regular deployments do not.
    pub is_tapped: bool,
    /// Turn number the unit entered the battlefield.
    pub turn_placed: u32,
    pub has_moved_this_turn: bool,
    /// Net attack adjustment from Inspire/Commander/Curse etc.
    pub attack_modifier: i32,
    /// Net max-health adjustment from Commander/Nature.
    pub health_modifier: i32,
    /// Whether a Charge unit has spent its empowered first strike.
    pub has_charged: bool,
}

impl Unit {
    /// A freshly deployed unit. It cannot move until the turn after
    /// placement (`turn_placed` enforces that, not the tap flag).
    #[must_use]
    pub fn new(def: &'static CardDef, turn_placed: u32) -> Self {
        Self {
            def,
            current_health: def.health,
            is_tapped: false,
            turn_placed,
            has_moved_this_turn: false,
            attack_modifier: 0,
            health_modifier: 0,
            has_charged: false,
        }
    }

    /// A token summoned mid-resolution (e.g. the Skeleton a Necromancer
    /// leaves behind). Arrives tapped.
    #[must_use]
    pub fn token(def: &'static CardDef, turn_placed: u32) -> Self {
        Self {
            is_tapped: true,
            ..Self::new(def, turn_placed)
        }
    }

    /// The Skeleton token left behind by Summon units.
    #[must_use]
    pub fn skeleton_token(turn_placed: u32) -> Option<Self> {
        catalog::get("Skeleton").map(|def| Self::token(def, turn_placed))
    }

    /// Attack after modifiers, floored at zero.
    #[must_use]
    pub fn effective_attack(&self) -> i32 {
        (self.def.attack + self.attack_modifier).max(0)
    }

    /// Maximum health after modifiers.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.def.health + self.health_modifier
    }

    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.current_health < self.max_health()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    #[must_use]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.def.has_tag(tag)
    }

    /// Apply damage. Returns true if the unit died from it.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.current_health -= amount.max(0);
        self.current_health <= 0
    }

    /// Heal up to `amount`, capped at max health.
    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount.max(0)).min(self.max_health());
    }

    /// Reset per-turn state at the start of a new turn.
    pub fn untap(&mut self) {
        self.is_tapped = false;
        self.has_moved_this_turn = false;
    }
}
