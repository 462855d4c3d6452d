//! Subtype tags and species.
//!
//! Abilities are dispatched off a fixed enumeration of tags rather than
//! parsing ability text at runtime. A card carries an ordered list of
//! tags; the resolver inspects them at each of the four trigger points.
//!
//! Some tags are purely descriptive today (e.g. `Ranged`, `Flying`) and
//! carry no server-side behavior; they still ship so clients can render
//! them and future effects can hook them.

use serde::{Deserialize, Serialize};

/// Subtype tag carried by a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// The leader unit; losing every copy of it loses the match.
    Leader,
    /// Grants vision of enemy units at the unit's location.
    Scout,
    /// Must be chosen as the primary blocker while alive.
    Taunt,
    /// +2 attack while damaged.
    Frenzy,
    /// Bonus attack on the unit's first strike.
    Charge,
    /// +1 attack per same-named ally in the zone.
    Pack,
    /// Double damage against Mounted targets.
    AntiCavalry,
    /// +1 effective damage.
    Piercing,
    /// Double damage against Undead species.
    Holy,
    /// Halves incoming damage from non-Magic attackers.
    Ethereal,
    /// Attacks count as magic damage.
    Magic,
    /// On play: allies in the zone gain +1 attack.
    Inspire,
    /// On play: allies in the zone gain +1/+1.
    Commander,
    /// On play: Beast allies in the zone gain +1/+1.
    Nature,
    /// On play: first enemy in the zone loses 1 attack.
    Curse,
    /// On play: 2 damage to the lowest-health enemy in the zone.
    Execute,
    /// On play: destroys one enemy Siege/Machinery unit in the zone.
    Sabotage,
    /// On death: leaves a Skeleton token behind.
    Summon,
    /// End of turn: heals each damaged ally in the zone by 1.
    Support,
    /// Heals 1 when an opposing unit dies in its zone's combat.
    Lifedrink,
    /// Enemies in the zone deal -1 damage.
    Intimidate,
    Mounted,
    Ranged,
    Siege,
    Machinery,
    Stealth,
    Flying,
    Swift,
    Undead,
    Slow,
    Petrify,
    Duel,
    Bodyguard,
}

impl Tag {
    /// Wire/display name, matching the catalog's subtype strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Leader => "Leader",
            Tag::Scout => "Scout",
            Tag::Taunt => "Taunt",
            Tag::Frenzy => "Frenzy",
            Tag::Charge => "Charge",
            Tag::Pack => "Pack",
            Tag::AntiCavalry => "AntiCavalry",
            Tag::Piercing => "Piercing",
            Tag::Holy => "Holy",
            Tag::Ethereal => "Ethereal",
            Tag::Magic => "Magic",
            Tag::Inspire => "Inspire",
            Tag::Commander => "Commander",
            Tag::Nature => "Nature",
            Tag::Curse => "Curse",
            Tag::Execute => "Execute",
            Tag::Sabotage => "Sabotage",
            Tag::Summon => "Summon",
            Tag::Support => "Support",
            Tag::Lifedrink => "Lifedrink",
            Tag::Intimidate => "Intimidate",
            Tag::Mounted => "Mounted",
            Tag::Ranged => "Ranged",
            Tag::Siege => "Siege",
            Tag::Machinery => "Machinery",
            Tag::Stealth => "Stealth",
            Tag::Flying => "Flying",
            Tag::Swift => "Swift",
            Tag::Undead => "Undead",
            Tag::Slow => "Slow",
            Tag::Petrify => "Petrify",
            Tag::Duel => "Duel",
            Tag::Bodyguard => "Bodyguard",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Species of a unit. Referenced by species-gated effects (Holy, Nature).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    #[default]
    None,
    Human,
    Beast,
    Undead,
    Dragon,
    Bird,
    Canine,
}
