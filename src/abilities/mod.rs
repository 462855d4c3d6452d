//! Tag-driven ability resolution.
//!
//! Abilities fire at four points (on-play, combat, end-of-turn, and
//! on-death) and are always scoped to a single zone. Dispatch is off
//! the fixed [`Tag`] enumeration; no ability text is interpreted at
//! runtime.
//!
//! Each resolver returns human-readable effect notes for the combat log.

use crate::board::Zone;
use crate::cards::{Species, Tag, Unit};
use crate::core::Side;

/// Resolve on-play abilities for the unit at `played_index` in `side`'s
/// list. The unit must already be inserted into the zone.
pub fn on_play(zone: &mut Zone, side: Side, played_index: usize, turn: u32) -> Vec<String> {
    let mut notes = Vec::new();
    let Some(played) = zone.units[side].get(played_index) else {
        return notes;
    };
    let def = played.def;
    let enemy = side.opponent();

    // Execute: 2 damage to the lowest-health enemy in the zone.
    if def.has_tag(Tag::Execute) {
        let target = zone.units[enemy]
            .iter()
            .enumerate()
            .min_by_key(|(_, u)| u.current_health)
            .map(|(i, _)| i);
        if let Some(idx) = target {
            let died = zone.units[enemy][idx].take_damage(2);
            let target_name = zone.units[enemy][idx].def.name;
            notes.push(format!("{} deals 2 damage to {}", def.name, target_name));
            if died {
                let dead = zone.units[enemy].remove(idx);
                notes.push(format!("{} was slain by the {}", dead.def.name, def.name));
                notes.extend(on_death(zone, enemy, &dead, turn));
            }
        }
    }

    // Curse: the first enemy in the zone loses 1 attack.
    if def.has_tag(Tag::Curse) {
        if let Some(target) = zone.units[enemy].first_mut() {
            target.attack_modifier -= 1;
            notes.push(format!("{} curses {} (-1 attack)", def.name, target.def.name));
        }
    }

    // Sabotage: destroy one enemy siege engine in the zone.
    if def.has_tag(Tag::Sabotage) {
        let target = zone.units[enemy]
            .iter()
            .position(|u| u.has_tag(Tag::Siege) || u.has_tag(Tag::Machinery));
        if let Some(idx) = target {
            let dead = zone.units[enemy].remove(idx);
            notes.push(format!("{} destroyed {}", def.name, dead.def.name));
            notes.extend(on_death(zone, enemy, &dead, turn));
        }
    }

    // Inspire: allies in the zone (not the played unit) gain +1 attack.
    if def.has_tag(Tag::Inspire) {
        let mut buffed = false;
        for (i, ally) in zone.units[side].iter_mut().enumerate() {
            if i != played_index {
                ally.attack_modifier += 1;
                buffed = true;
            }
        }
        if buffed {
            notes.push(format!("{} inspires allies (+1 attack)", def.name));
        }
    }

    // Commander: allies in the zone gain +1/+1.
    if def.has_tag(Tag::Commander) {
        let mut buffed = false;
        for (i, ally) in zone.units[side].iter_mut().enumerate() {
            if i != played_index {
                ally.attack_modifier += 1;
                ally.health_modifier += 1;
                ally.current_health += 1;
                buffed = true;
            }
        }
        if buffed {
            notes.push(format!("{} rallies allies (+1/+1)", def.name));
        }
    }

    // Nature: Beast allies in the zone gain +1/+1.
    if def.has_tag(Tag::Nature) {
        let mut buffed = false;
        for ally in zone.units[side].iter_mut() {
            if ally.def.species == Species::Beast {
                ally.attack_modifier += 1;
                ally.health_modifier += 1;
                ally.current_health += 1;
                buffed = true;
            }
        }
        if buffed {
            notes.push(format!("{} empowers nearby beasts (+1/+1)", def.name));
        }
    }

    notes
}

/// Flat attack bonus a unit brings into a combat, recomputed fresh each
/// time: Frenzy while damaged, the unspent Charge strike, Pack allies,
/// and the enemy's Intimidate presence.
#[must_use]
pub fn combat_attack_bonus(units: &[Unit], index: usize, enemies: &[Unit]) -> i32 {
    let unit = &units[index];
    let mut bonus = 0;

    if unit.has_tag(Tag::Frenzy) && unit.is_damaged() {
        bonus += 2;
    }
    if unit.has_tag(Tag::Charge) && !unit.has_charged {
        bonus += if unit.def.id == "Heavy_Cavalry" { 2 } else { 1 };
    }
    if unit.has_tag(Tag::Pack) {
        bonus += units
            .iter()
            .enumerate()
            .filter(|&(i, ally)| i != index && ally.def.id == unit.def.id)
            .count() as i32;
    }
    bonus -= enemies.iter().filter(|e| e.has_tag(Tag::Intimidate)).count() as i32;

    bonus
}

/// Damage one strike deals to one target. Applied identically whether
/// the striker is the attacking side or a blocker striking back.
///
/// Order matters: the anti-cavalry and holy doublings apply before the
/// piercing point is added in their respective spots, and the ethereal
/// halving comes last.
#[must_use]
pub fn strike_damage(striker: &Unit, bonus: i32, target: &Unit) -> i32 {
    let mut damage = striker.effective_attack() + bonus;

    if striker.has_tag(Tag::AntiCavalry) && target.has_tag(Tag::Mounted) {
        damage *= 2;
    }
    if striker.has_tag(Tag::Piercing) {
        damage += 1;
    }
    if striker.has_tag(Tag::Holy) && target.def.species == Species::Undead {
        damage *= 2;
    }
    if target.has_tag(Tag::Ethereal) && !striker.has_tag(Tag::Magic) {
        damage /= 2;
    }

    damage.max(0)
}

/// End-of-turn abilities for one zone: each Support unit heals every
/// damaged ally in the zone by 1.
pub fn end_of_turn(zone: &mut Zone) -> Vec<String> {
    let mut notes = Vec::new();
    for side in Side::BOTH {
        let support_count = zone.units[side].iter().filter(|u| u.has_tag(Tag::Support)).count();
        if support_count == 0 {
            continue;
        }
        let mut healed = false;
        for _ in 0..support_count {
            for ally in zone.units[side].iter_mut() {
                if ally.is_damaged() {
                    ally.heal(1);
                    healed = true;
                }
            }
        }
        if healed {
            notes.push(format!("{side} allies are healed for 1"));
        }
    }
    notes
}

/// On-death abilities for a unit just removed from `side`'s list in
/// this zone.
pub fn on_death(zone: &mut Zone, side: Side, dead: &Unit, turn: u32) -> Vec<String> {
    let mut notes = Vec::new();

    // Summon: leave a Skeleton token behind, tapped.
    if dead.has_tag(Tag::Summon) {
        if let Some(token) = Unit::skeleton_token(turn) {
            notes.push(format!("{}'s death summons a {}", dead.def.name, token.def.name));
            zone.units[side].push(token);
        }
    }

    notes
}

/// After a combat kill, surviving opposing Lifedrink units each heal 1.
pub fn lifedrink(zone: &mut Zone, killer_side: Side) -> Vec<String> {
    let mut notes = Vec::new();
    for unit in zone.units[killer_side].iter_mut() {
        if unit.has_tag(Tag::Lifedrink) && unit.is_alive() {
            unit.heal(1);
            notes.push(format!("{} drains life from the kill", unit.def.name));
        }
    }
    notes
}
