//! The card catalog: every card definition in the game, constructed once
//! and never mutated. Lookup is by stable string id.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::definition::{CardDef, CardType};
use super::tags::{Species, Tag};

macro_rules! card {
    ($id:literal, $tags:expr, $species:expr, $atk:literal / $hp:literal, cost $cost:literal, $name:literal, $special:literal) => {
        CardDef {
            id: $id,
            card_type: CardType::Unit,
            tags: $tags,
            species: $species,
            attack: $atk,
            health: $hp,
            cost: $cost,
            name: $name,
            special: $special,
        }
    };
}

/// All card definitions, in catalog order.
pub static CARDS: &[CardDef] = &[
    card!("Avatar", &[Tag::Leader], Species::None, 2/2, cost 0, "Avatar",
        "Your very representation in the battlefield. Don't let it die or you lose!"),
    card!("Footman", &[], Species::Human, 2/2, cost 2, "Footman", ""),
    card!("Archer", &[Tag::Ranged], Species::Human, 3/2, cost 3, "Archer", ""),
    card!("Knight_Commander", &[Tag::Inspire], Species::Human, 4/4, cost 5, "Knight Commander",
        "+1 damage to all allies in the area"),
    card!("Eagle", &[Tag::Ranged, Tag::Scout], Species::Bird, 0/1, cost 1, "Eagle",
        "It cannot scout over closed areas"),
    card!("War_Hound", &[Tag::Scout], Species::Canine, 1/1, cost 1, "War Hound", ""),
    card!("Knight", &[], Species::Human, 3/3, cost 3, "Knight", ""),
    card!("Trebuchet", &[Tag::Machinery], Species::None, 5/5, cost 7, "Trebuchet",
        "Destructive: Can target Stations"),
    card!("Guardian", &[], Species::Human, 2/4, cost 3, "Guardian", ""),
    card!("Spearman", &[], Species::Human, 3/2, cost 2, "Spearman", ""),
    card!("Mercenary", &[], Species::Human, 2/2, cost 2, "Mercenary", ""),
    card!("Mentor", &[], Species::Human, 1/2, cost 2, "Mentor", ""),
    card!("Warrior", &[], Species::Human, 3/3, cost 3, "Warrior", ""),
    // Infantry
    card!("Pikeman", &[Tag::AntiCavalry], Species::Human, 2/3, cost 2, "Pikeman",
        "Deals double damage to mounted units"),
    card!("Shieldbearer", &[Tag::Taunt], Species::Human, 1/5, cost 3, "Shieldbearer",
        "Mark: Enemies must attack this unit first"),
    card!("Berserker", &[Tag::Frenzy], Species::Human, 5/2, cost 4, "Berserker",
        "Enraged: Gains +2 attack when damaged"),
    card!("Militia", &[], Species::Human, 1/2, cost 1, "Militia", ""),
    card!("Veteran", &[], Species::Human, 3/4, cost 4, "Veteran", ""),
    card!("Bannerman", &[Tag::Inspire], Species::Human, 2/2, cost 3, "Bannerman",
        "Allies in same area gain +1 attack"),
    // Ranged
    card!("Crossbowman", &[Tag::Ranged, Tag::Piercing], Species::Human, 4/2, cost 4, "Crossbowman",
        "Trueshot: Ignores 1 point of enemy health"),
    card!("Longbowman", &[Tag::Ranged], Species::Human, 2/2, cost 3, "Longbowman",
        "Longsight: Can attack adjacent areas"),
    card!("Javeliner", &[Tag::Ranged], Species::Human, 2/2, cost 2, "Javeliner", ""),
    // Cavalry
    card!("Light_Cavalry", &[Tag::Mounted, Tag::Swift], Species::Human, 2/2, cost 3, "Light Cavalry",
        "Nimble: Can move twice per turn"),
    card!("Heavy_Cavalry", &[Tag::Mounted, Tag::Charge], Species::Human, 4/4, cost 5, "Heavy Cavalry",
        "Empowered Strike: Deals +2 damage on first attack"),
    // Siege
    card!("Catapult", &[Tag::Machinery, Tag::Siege], Species::None, 4/3, cost 5, "Catapult",
        "Destructive: Can target Stations"),
    card!("Battering_Ram", &[Tag::Machinery, Tag::Siege], Species::None, 6/6, cost 8, "Battering Ram",
        "Destructive: Double damage to Stations"),
    card!("Ballista", &[Tag::Machinery, Tag::Ranged], Species::None, 5/2, cost 5, "Ballista",
        "Piercing shots ignore armor"),
    // Mystical creatures
    card!("Dire_Wolf", &[Tag::Scout, Tag::Pack], Species::Beast, 2/2, cost 2, "Dire Wolf",
        "Gains +1 attack per other wolf in area"),
    card!("War_Bear", &[Tag::Intimidate], Species::Beast, 4/5, cost 5, "War Bear",
        "Weakening: Enemies deal -1 damage"),
    card!("Wyvern", &[Tag::Flying, Tag::Ranged], Species::Dragon, 3/3, cost 6, "Wyvern",
        "Dextrous: Can attack without being attacked back"),
    card!("Griffin", &[Tag::Flying, Tag::Mounted], Species::Beast, 4/4, cost 6, "Griffin",
        "Flying: ignores terrain restrictions"),
    card!("Basilisk", &[Tag::Petrify], Species::Beast, 2/4, cost 5, "Basilisk",
        "Empowered Strike: First attack stuns enemy for 1 turn"),
    card!("Shadow_Hound", &[Tag::Scout, Tag::Stealth], Species::Beast, 2/1, cost 2, "Shadow Hound",
        "Hidden: Cannot be seen by non-scouts"),
    // Magic units
    card!("Battle_Mage", &[Tag::Ranged, Tag::Magic], Species::Human, 3/2, cost 4, "Battle Mage",
        "Attacks deal magic damage (ignores armor)"),
    card!("Healer", &[Tag::Support], Species::Human, 0/2, cost 3, "Healer",
        "Heals 1 health to all allies at end of turn"),
    card!("Warlock", &[Tag::Magic, Tag::Curse], Species::Human, 2/3, cost 4, "Warlock",
        "On play: enemy unit loses 1 attack"),
    card!("Necromancer", &[Tag::Magic, Tag::Summon], Species::Human, 2/2, cost 5, "Necromancer",
        "Last Whisper: summons a Skeleton"),
    card!("Druid", &[Tag::Magic, Tag::Nature], Species::Human, 1/3, cost 3, "Druid",
        "Beasts in same area gain +1/+1"),
    // Special units
    card!("Spy", &[Tag::Scout, Tag::Stealth], Species::Human, 1/1, cost 2, "Spy",
        "Reveals all enemy cards in area"),
    card!("Assassin", &[Tag::Stealth, Tag::Execute], Species::Human, 4/1, cost 4, "Assassin",
        "On play: deal 2 damage to weakest enemy"),
    card!("Saboteur", &[Tag::Stealth, Tag::Sabotage], Species::Human, 1/2, cost 3, "Saboteur",
        "On play: destroy enemy siege weapon"),
    card!("Champion", &[Tag::Duel], Species::Human, 5/5, cost 6, "Champion",
        "Enforcing: Forces 1v1 combat with strongest enemy"),
    card!("Royal_Guard", &[Tag::Bodyguard], Species::Human, 3/4, cost 4, "Royal Guard",
        "Reflective: Redirects damage from your Avatar to self"),
    card!("War_Drummer", &[Tag::Inspire], Species::Human, 0/2, cost 2, "War Drummer",
        "All allies gain +1 attack"),
    // Undead
    card!("Skeleton", &[Tag::Undead], Species::Undead, 1/1, cost 1, "Skeleton", ""),
    card!("Zombie", &[Tag::Undead, Tag::Slow], Species::Undead, 2/3, cost 2, "Zombie",
        "Slow: Takes 1 extra turn to arrive"),
    card!("Wraith", &[Tag::Undead, Tag::Ethereal], Species::Undead, 3/2, cost 4, "Wraith",
        "Takes half damage from non-magic attacks"),
    card!("Death_Knight", &[Tag::Undead, Tag::Mounted, Tag::Lifedrink], Species::Undead, 4/4, cost 5, "Death Knight",
        "Heals 1 when it kills an enemy"),
    // Elite units
    card!("Templar", &[Tag::Holy], Species::Human, 3/4, cost 5, "Templar",
        "Deals double damage to Undead"),
    card!("Inquisitor", &[Tag::Holy, Tag::Magic], Species::Human, 2/3, cost 4, "Inquisitor",
        "Reveals and damages Stealth units"),
    card!("General", &[Tag::Commander], Species::Human, 3/4, cost 6, "General",
        "All allies gain +1/+1"),
    card!("Executioner", &[Tag::Execute], Species::Human, 5/3, cost 5, "Executioner",
        "Execute: Instantly kills enemies with 2 or less health"),
];

static INDEX: Lazy<FxHashMap<&'static str, &'static CardDef>> = Lazy::new(|| {
    CARDS.iter().map(|def| (def.id, def)).collect()
});

/// Look up a card definition by id.
#[must_use]
pub fn get(card_id: &str) -> Option<&'static CardDef> {
    INDEX.get(card_id).copied()
}

/// The leader unit definition.
#[must_use]
pub fn leader() -> &'static CardDef {
    get("Avatar").expect("catalog always contains the leader")
}

/// All card ids except the leader (for deck building).
pub fn deck_card_ids() -> impl Iterator<Item = &'static str> {
    CARDS.iter().filter(|d| !d.is_leader()).map(|d| d.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let footman = get("Footman").unwrap();
        assert_eq!(footman.attack, 2);
        assert_eq!(footman.health, 2);
        assert_eq!(footman.cost, 2);

        assert!(get("Nonexistent").is_none());
    }

    #[test]
    fn test_leader_is_avatar() {
        let avatar = leader();
        assert_eq!(avatar.id, "Avatar");
        assert!(avatar.is_leader());
        assert_eq!(avatar.cost, 0);
    }

    #[test]
    fn test_ids_unique() {
        let mut seen = std::collections::HashSet::new();
        for def in CARDS {
            assert!(seen.insert(def.id), "duplicate card id {}", def.id);
        }
    }

    #[test]
    fn test_deck_cards_exclude_leader() {
        assert!(deck_card_ids().all(|id| id != "Avatar"));
    }

    #[test]
    fn test_tagged_cards() {
        assert!(get("Shieldbearer").unwrap().has_tag(crate::cards::Tag::Taunt));
        assert!(get("Dire_Wolf").unwrap().has_tag(crate::cards::Tag::Pack));
        assert!(get("Death_Knight").unwrap().has_tag(crate::cards::Tag::Lifedrink));
    }
}
