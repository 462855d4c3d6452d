//! Zone combat under the blocker-assignment protocol.
//!
//! For each contested (location, zone) pair the blocker side submits an
//! assignment map: attacking-unit index → ordered blocker indices. An
//! assigned attacker deals its full strike to the first listed blocker;
//! every listed blocker strikes back. Damage within a zone lands
//! simultaneously; deaths and their triggers resolve before the next
//! pair is processed.
//!
//! Unassigned attackers go unblocked: their damage is computed for the
//! log but lands nowhere.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::abilities;
use crate::board::{LocationId, Zone, ZoneId};
use crate::cards::Tag;
use crate::core::Side;

use super::error::RuleError;

/// Blocker assignments for one zone: attacker index → ordered blocker
/// indices. A `BTreeMap` keeps resolution order deterministic.
pub type Assignments = BTreeMap<usize, Vec<usize>>;

/// One contested (location, zone) pair awaiting blocker assignments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingCombat {
    pub location: LocationId,
    pub zone: ZoneId,
    pub blocker_side: Side,
}

/// Validate an assignment map against the current zone contents.
pub fn validate_assignments(
    zone: &Zone,
    blocker_side: Side,
    assignments: &Assignments,
) -> Result<(), RuleError> {
    let attacker_side = blocker_side.opponent();
    let attacker_count = zone.units[attacker_side].len();
    let blocker_count = zone.units[blocker_side].len();
    let taunt_present = zone.has_tag(blocker_side, Tag::Taunt);

    for (&attacker_idx, blockers) in assignments {
        if attacker_idx >= attacker_count {
            return Err(RuleError::InvalidAttackerIndex(attacker_idx));
        }
        for &blocker_idx in blockers {
            if blocker_idx >= blocker_count {
                return Err(RuleError::InvalidBlockerIndex(blocker_idx));
            }
        }
        if taunt_present {
            match blockers.first() {
                Some(&primary) if zone.units[blocker_side][primary].has_tag(Tag::Taunt) => {}
                Some(_) => return Err(RuleError::TauntMustBlock),
                None => {}
            }
        }
    }
    Ok(())
}

/// Resolve one zone's combat with validated assignments.
pub fn resolve_zone_combat(
    zone: &mut Zone,
    blocker_side: Side,
    assignments: &Assignments,
    turn: u32,
) -> Result<Vec<String>, RuleError> {
    validate_assignments(zone, blocker_side, assignments)?;

    let attacker_side = blocker_side.opponent();
    let mut notes = Vec::new();

    let mut damage_to_blockers: FxHashMap<usize, i32> = FxHashMap::default();
    let mut damage_to_attackers: FxHashMap<usize, i32> = FxHashMap::default();
    let mut strikers: SmallVec<[(Side, usize); 8]> = SmallVec::new();

    {
        let attackers = &zone.units[attacker_side];
        let blockers = &zone.units[blocker_side];

        for (i, attacker) in attackers.iter().enumerate() {
            let bonus = abilities::combat_attack_bonus(attackers, i, blockers);
            match assignments.get(&i).filter(|b| !b.is_empty()) {
                Some(assigned) => {
                    let target_idx = assigned[0];
                    let damage =
                        abilities::strike_damage(attacker, bonus, &blockers[target_idx]);
                    *damage_to_blockers.entry(target_idx).or_insert(0) += damage;
                    strikers.push((attacker_side, i));
                    notes.push(format!(
                        "{} strikes {} for {}",
                        attacker.def.name, blockers[target_idx].def.name, damage
                    ));

                    for &blocker_idx in assigned {
                        let blocker = &blockers[blocker_idx];
                        let blocker_bonus =
                            abilities::combat_attack_bonus(blockers, blocker_idx, attackers);
                        let counter = abilities::strike_damage(blocker, blocker_bonus, attacker);
                        *damage_to_attackers.entry(i).or_insert(0) += counter;
                        strikers.push((blocker_side, blocker_idx));
                        notes.push(format!(
                            "{} strikes back at {} for {}",
                            blocker.def.name, attacker.def.name, counter
                        ));
                    }
                }
                None => {
                    // Unblocked: the strike is computed for the record
                    // but its damage lands nowhere.
                    let damage = attacker.effective_attack() + bonus;
                    notes.push(format!(
                        "{} attacks unblocked ({} damage unspent)",
                        attacker.def.name,
                        damage.max(0)
                    ));
                }
            }
        }
    }

    for (side, idx) in strikers {
        let unit = &mut zone.units[side][idx];
        unit.is_tapped = true;
        if unit.has_tag(Tag::Charge) {
            unit.has_charged = true;
        }
    }

    for (idx, damage) in &damage_to_attackers {
        zone.units[attacker_side][*idx].take_damage(*damage);
    }
    for (idx, damage) in &damage_to_blockers {
        zone.units[blocker_side][*idx].take_damage(*damage);
    }

    for side in [attacker_side, blocker_side] {
        for dead in zone.cull_dead(side) {
            notes.push(format!("{} ({side}) was destroyed", dead.def.name));
            notes.extend(abilities::on_death(zone, side, &dead, turn));
            notes.extend(abilities::lifedrink(zone, side.opponent()));
        }
    }

    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{catalog, Unit};

    fn unit(id: &str) -> Unit {
        Unit::new(catalog::get(id).unwrap(), 1)
    }

    fn contested(attackers: &[&str], blockers: &[&str], blocker_side: Side) -> Zone {
        let mut zone = Zone::default();
        for id in blockers {
            zone.insert(blocker_side, unit(id));
        }
        for id in attackers {
            zone.insert(blocker_side.opponent(), unit(id));
        }
        zone
    }

    fn assign(pairs: &[(usize, &[usize])]) -> Assignments {
        pairs.iter().map(|&(a, b)| (a, b.to_vec())).collect()
    }

    #[test]
    fn test_mutual_destruction() {
        let mut zone = contested(&["Footman"], &["Footman"], Side::Defender);
        let notes = resolve_zone_combat(
            &mut zone,
            Side::Defender,
            &assign(&[(0, &[0])]),
            1,
        )
        .unwrap();

        assert!(zone.units[Side::Attacker].is_empty());
        assert!(zone.units[Side::Defender].is_empty());
        assert!(notes.iter().any(|n| n.contains("destroyed")));
    }

    #[test]
    fn test_unblocked_damage_is_discarded() {
        let mut zone = contested(&["Knight"], &["Footman"], Side::Defender);
        resolve_zone_combat(&mut zone, Side::Defender, &Assignments::new(), 1).unwrap();

        // Nobody took damage and nobody struck back.
        assert_eq!(zone.units[Side::Attacker][0].current_health, 3);
        assert_eq!(zone.units[Side::Defender][0].current_health, 2);
    }

    #[test]
    fn test_multi_blocker_counterattacks_stack() {
        let mut zone = contested(&["Guardian"], &["Footman", "Footman"], Side::Defender);
        resolve_zone_combat(
            &mut zone,
            Side::Defender,
            &assign(&[(0, &[0, 1])]),
            1,
        )
        .unwrap();

        // The Guardian (2/4) hits the first Footman for 2; both Footmen
        // strike back for 2 each, killing the 4-health Guardian.
        assert!(zone.units[Side::Attacker].is_empty());
        assert_eq!(zone.units[Side::Defender].len(), 1);
    }

    #[test]
    fn test_taunt_must_be_primary_blocker() {
        let mut zone = contested(&["Knight"], &["Shieldbearer", "Footman"], Side::Defender);
        let err = resolve_zone_combat(
            &mut zone,
            Side::Defender,
            &assign(&[(0, &[1])]),
            1,
        )
        .unwrap_err();
        assert_eq!(err, RuleError::TauntMustBlock);

        // Routing through the Shieldbearer is accepted.
        resolve_zone_combat(&mut zone, Side::Defender, &assign(&[(0, &[0])]), 1).unwrap();
        assert_eq!(zone.units[Side::Defender][0].current_health, 2);
    }

    #[test]
    fn test_out_of_range_indices_rejected() {
        let mut zone = contested(&["Knight"], &["Footman"], Side::Defender);
        assert_eq!(
            resolve_zone_combat(&mut zone, Side::Defender, &assign(&[(3, &[0])]), 1),
            Err(RuleError::InvalidAttackerIndex(3))
        );
        assert_eq!(
            resolve_zone_combat(&mut zone, Side::Defender, &assign(&[(0, &[3])]), 1),
            Err(RuleError::InvalidBlockerIndex(3))
        );
    }

    #[test]
    fn test_combat_participants_become_tapped() {
        let mut zone = contested(&["Guardian"], &["Guardian"], Side::Defender);
        resolve_zone_combat(&mut zone, Side::Defender, &assign(&[(0, &[0])]), 1).unwrap();

        // Both survive at 2 health and both read tapped.
        assert_eq!(zone.units[Side::Attacker][0].current_health, 2);
        assert!(zone.units[Side::Attacker][0].is_tapped);
        assert!(zone.units[Side::Defender][0].is_tapped);
    }

    #[test]
    fn test_unblocked_attacker_stays_untapped() {
        let mut zone = contested(&["Knight"], &["Footman"], Side::Defender);
        resolve_zone_combat(&mut zone, Side::Defender, &Assignments::new(), 1).unwrap();

        // Nobody struck, so nobody tapped.
        assert!(!zone.units[Side::Attacker][0].is_tapped);
        assert!(!zone.units[Side::Defender][0].is_tapped);
    }

    #[test]
    fn test_charge_spent_on_first_strike() {
        let mut zone = contested(&["Heavy_Cavalry"], &["Guardian"], Side::Defender);
        resolve_zone_combat(&mut zone, Side::Defender, &assign(&[(0, &[0])]), 1).unwrap();

        // 4 base + 2 charge = 6 damage kills the Guardian; the charge
        // is then spent.
        assert!(zone.units[Side::Attacker][0].has_charged);
        assert!(zone.units[Side::Defender].is_empty());
    }

    #[test]
    fn test_death_triggers_fire_before_next_pair() {
        let mut zone = contested(&["Executioner"], &["Necromancer"], Side::Defender);
        resolve_zone_combat(&mut zone, Side::Defender, &assign(&[(0, &[0])]), 2).unwrap();

        // The Necromancer dies and its Skeleton appears immediately.
        assert_eq!(zone.units[Side::Defender].len(), 1);
        assert_eq!(zone.units[Side::Defender][0].def.id, "Skeleton");
    }

    #[test]
    fn test_lifedrink_heals_on_kill() {
        let mut zone = contested(
            &["Death_Knight", "Knight"],
            &["Footman"],
            Side::Defender,
        );
        zone.units[Side::Attacker][0].current_health = 2;
        resolve_zone_combat(&mut zone, Side::Defender, &assign(&[(1, &[0])]), 1).unwrap();

        // The Footman dies to the Knight; the Death Knight still drinks.
        assert!(zone.units[Side::Defender].is_empty());
        assert_eq!(zone.units[Side::Attacker][0].current_health, 3);
    }
}
