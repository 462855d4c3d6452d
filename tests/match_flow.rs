//! End-to-end match flow tests.
//!
//! These drive full turns through the engine and session layers:
//! - capture accumulation and control transfer
//! - movement timing (placement turn, once per turn, once per phase)
//! - combat through the blocker-assignment protocol
//! - win by leader destruction
//! - idempotent resolution of an empty turn

use siegefront::board::{LocationId, ZoneId};
use siegefront::cards::{catalog, Unit};
use siegefront::core::{Side, SideMap};
use siegefront::engine::{default_deck, Assignments, GameEngine, RuleError};
use siegefront::protocol::{GameAction, ServerMessage};
use siegefront::session::MatchSession;
use uuid::Uuid;

fn engine() -> GameEngine {
    GameEngine::with_default_decks().unwrap()
}

fn unit(id: &str, turn: u32) -> Unit {
    Unit::new(catalog::get(id).unwrap(), turn)
}

/// Run both phases of the current turn with no actions.
fn pass_turn(engine: &mut GameEngine) {
    engine.end_phase(Side::Attacker).unwrap();
    engine.end_phase(Side::Defender).unwrap();
}

/// A 3-attack unit alone in the middle zone of an uncaptured location
/// accumulates 3 power per turn against the base threshold of 5:
/// control transfers on the second resolution.
#[test]
fn test_capture_transfers_when_power_reaches_threshold() {
    let mut engine = engine();
    engine.battlefield[LocationId::Gate].zones[ZoneId::MiddleZone]
        .insert(Side::Attacker, unit("Archer", 1));

    pass_turn(&mut engine);
    assert_eq!(engine.battlefield[LocationId::Gate].controller, None);
    assert_eq!(
        engine.battlefield[LocationId::Gate].capture_power[Side::Attacker],
        3
    );

    pass_turn(&mut engine);
    assert_eq!(
        engine.battlefield[LocationId::Gate].controller,
        Some(Side::Attacker)
    );
}

/// Enemy health present at the location raises the threshold, and power
/// without a middle-zone unit never captures.
#[test]
fn test_capture_blocked_without_middle_zone_unit() {
    let mut engine = engine();
    // 5 attack in the enemy home zone earns 10 power per turn but can
    // never capture alone.
    engine.battlefield[LocationId::Sewers].zones[ZoneId::DefenderZone]
        .insert(Side::Attacker, unit("Trebuchet", 1));

    for _ in 0..4 {
        pass_turn(&mut engine);
    }
    assert_eq!(engine.battlefield[LocationId::Sewers].controller, None);
    assert!(engine.battlefield[LocationId::Sewers].capture_power[Side::Attacker] >= 40);
}

/// Capturing a capturable location unlocks the adjacent enemy home
/// territory for placement.
#[test]
fn test_capture_unlocks_blocked_territory() {
    let mut engine = engine();
    engine.battlefield[LocationId::Walls].zones[ZoneId::MiddleZone]
        .insert(Side::Attacker, unit("Trebuchet", 1));
    pass_turn(&mut engine);
    assert_eq!(
        engine.battlefield[LocationId::Walls].controller,
        Some(Side::Attacker)
    );

    engine
        .place_card(Side::Attacker, "Avatar", LocationId::Courtyard, ZoneId::MiddleZone)
        .unwrap();
    engine.end_phase(Side::Attacker).unwrap();

    // The defender captured nothing, so attacker home territory stays
    // closed to it.
    assert_eq!(
        engine.place_card(Side::Defender, "Avatar", LocationId::Camp, ZoneId::MiddleZone),
        Err(RuleError::LocationBlocked {
            side: Side::Defender,
            location: LocationId::Camp
        })
    );
}

/// A unit cannot move on its placement turn; it can the next turn, to
/// an adjacent accessible location only, and only once.
#[test]
fn test_movement_timing() {
    let mut engine = engine();
    engine
        .place_card(Side::Attacker, "Avatar", LocationId::Forest, ZoneId::MiddleZone)
        .unwrap();
    assert_eq!(
        engine.move_unit(Side::Attacker, LocationId::Forest, LocationId::Sewers, 0),
        Err(RuleError::UnitJustPlaced)
    );
    pass_turn(&mut engine);

    engine
        .move_unit(Side::Attacker, LocationId::Forest, LocationId::Sewers, 0)
        .unwrap();
    assert!(engine.battlefield[LocationId::Sewers].zones[ZoneId::MiddleZone]
        .has_units(Side::Attacker));
    // The unit left its source; it exists in exactly one place.
    assert!(!engine.battlefield[LocationId::Forest].has_presence(Side::Attacker));
    assert_eq!(
        engine.move_unit(Side::Attacker, LocationId::Sewers, LocationId::Forest, 0),
        Err(RuleError::AlreadyMoved(Side::Attacker))
    );

    // Next turn the same unit may move again; a second unit may not
    // follow in the same phase.
    pass_turn(&mut engine);
    engine.battlefield[LocationId::Camp].zones[ZoneId::MiddleZone]
        .insert(Side::Attacker, unit("Footman", 1));
    engine
        .move_unit(Side::Attacker, LocationId::Sewers, LocationId::Forest, 0)
        .unwrap();
    assert_eq!(
        engine.move_unit(Side::Attacker, LocationId::Camp, LocationId::Forest, 0),
        Err(RuleError::AlreadyMoved(Side::Attacker))
    );
}

/// One draw per phase, enforced separately for each side.
#[test]
fn test_draw_limit_per_phase() {
    let mut engine = engine();
    engine.draw_card(Side::Attacker, "Footman").unwrap();
    assert_eq!(
        engine.draw_card(Side::Attacker, "Footman"),
        Err(RuleError::AlreadyDrew(Side::Attacker))
    );
    engine.end_phase(Side::Attacker).unwrap();

    engine.draw_card(Side::Defender, "Guardian").unwrap();
    assert_eq!(
        engine.draw_card(Side::Defender, "Knight"),
        Err(RuleError::AlreadyDrew(Side::Defender))
    );
}

/// Destroying the defender's only leader in combat ends the match with
/// the attacker as winner.
#[test]
fn test_leader_destruction_wins_match() {
    let mut engine = engine();
    engine
        .place_card(Side::Attacker, "Avatar", LocationId::Camp, ZoneId::MiddleZone)
        .unwrap();
    engine.end_phase(Side::Attacker).unwrap();
    engine
        .place_card(Side::Defender, "Avatar", LocationId::Walls, ZoneId::MiddleZone)
        .unwrap();
    // A knight contests the zone; the defender claimed it first and
    // therefore assigns blockers.
    engine.battlefield[LocationId::Walls].zones[ZoneId::MiddleZone]
        .insert(Side::Attacker, unit("Knight", 1));
    engine.end_phase(Side::Defender).unwrap();

    let pending = engine.pending_combat().unwrap();
    assert_eq!(pending.blocker_side, Side::Defender);

    let mut assignments = Assignments::new();
    assignments.insert(0, vec![0]);
    engine
        .submit_assignments(Side::Defender, &assignments)
        .unwrap();

    // The avatar (2 health) dies to the knight's 3 attack; the knight
    // survives the counter.
    assert_eq!(engine.winner(), Some(Side::Attacker));
    assert_eq!(
        engine.end_phase(Side::Attacker),
        Err(RuleError::MatchOver)
    );
}

/// Every unit that strikes in a combat reads tapped afterwards; the
/// untap steps clear it per side, attacker at the new turn's start and
/// defender at the next phase handoff.
#[test]
fn test_combat_survivors_read_tapped() {
    let mut engine = engine();
    let zone = &mut engine.battlefield[LocationId::Walls].zones[ZoneId::MiddleZone];
    zone.insert(Side::Defender, unit("Guardian", 1));
    zone.insert(Side::Attacker, unit("Guardian", 1));
    engine.end_phase(Side::Attacker).unwrap();
    engine.end_phase(Side::Defender).unwrap();

    // Defender claimed the middle zone first and blocks.
    let mut assignments = Assignments::new();
    assignments.insert(0, vec![0]);
    engine
        .submit_assignments(Side::Defender, &assignments)
        .unwrap();

    let zone = &engine.battlefield[LocationId::Walls].zones[ZoneId::MiddleZone];
    // Both Guardians survive at 2 health. The defender's stays tapped
    // until the phase handoff; the new turn already untapped the
    // attacker's.
    assert_eq!(zone.units[Side::Defender][0].current_health, 2);
    assert!(zone.units[Side::Defender][0].is_tapped);
    assert!(!zone.units[Side::Attacker][0].is_tapped);

    engine.end_phase(Side::Attacker).unwrap();
    let zone = &engine.battlefield[LocationId::Walls].zones[ZoneId::MiddleZone];
    assert!(!zone.units[Side::Defender][0].is_tapped);
}

/// Resolving a turn with nothing queued only advances flags and the
/// turn counter: ledgers, controllers, and zone contents are untouched.
#[test]
fn test_empty_resolution_is_idempotent() {
    let mut engine = engine();
    engine.draw_card(Side::Attacker, "Knight").unwrap();
    pass_turn(&mut engine);

    let turn_before = engine.turn();
    pass_turn(&mut engine);

    assert_eq!(engine.turn(), turn_before + 1);
    assert!(engine.can_draw(Side::Attacker));
    assert!(engine.can_move(Side::Attacker));
    for (location, state) in engine.battlefield.iter() {
        assert_eq!(state.controller, location.home_of());
        assert_eq!(state.capture_power[Side::Attacker], 0);
        assert_eq!(state.capture_power[Side::Defender], 0);
    }
}

/// The Assassin's on-play strike picks the lowest-health enemy and
/// fires the victim's on-death trigger before anything else resolves.
#[test]
fn test_assassin_on_play_chain() {
    // Custom attacker deck so the Assassin can be drawn through the
    // normal flow (it arrives after 4 resolutions).
    let decks = SideMap::new(vec!["Assassin".to_owned()], Vec::new());
    let mut engine = GameEngine::new(decks).unwrap();
    engine.draw_card(Side::Attacker, "Assassin").unwrap();
    for _ in 0..4 {
        pass_turn(&mut engine);
    }

    let zone = &mut engine.battlefield[LocationId::Walls].zones[ZoneId::MiddleZone];
    zone.insert(Side::Defender, unit("Guardian", 1));
    let mut necromancer = unit("Necromancer", 1);
    necromancer.current_health = 2;
    zone.insert(Side::Defender, necromancer);

    let notes = engine
        .place_card(Side::Attacker, "Assassin", LocationId::Walls, ZoneId::MiddleZone)
        .unwrap();

    let zone = &engine.battlefield[LocationId::Walls].zones[ZoneId::MiddleZone];
    let defenders: Vec<&str> = zone.units[Side::Defender].iter().map(|u| u.def.id).collect();
    // The wounded Necromancer died and left its Skeleton behind.
    assert_eq!(defenders, vec!["Guardian", "Skeleton"]);
    assert!(notes.iter().any(|n| n.contains("Skeleton")));
}

/// Reinforcements arrive exactly `cost` resolutions after the draw.
#[test]
fn test_reinforcement_arrival() {
    let mut engine = engine();
    engine.draw_card(Side::Attacker, "Knight").unwrap();

    for _ in 0..2 {
        pass_turn(&mut engine);
        assert_eq!(engine.hand(Side::Attacker).len(), 1);
    }
    pass_turn(&mut engine);
    assert_eq!(engine.hand(Side::Attacker).len(), 2);
    assert!(engine.hand(Side::Attacker).iter().any(|d| d.id == "Knight"));
}

/// The session layer reports rule violations to the caller without
/// disturbing the match, and only the blocker side may assign.
#[test]
fn test_session_rejects_wrong_side_assignments() {
    let mut session = MatchSession::new(
        Uuid::new_v4(),
        SideMap::new(1, 2),
        SideMap::new(default_deck(Side::Attacker), default_deck(Side::Defender)),
    )
    .unwrap();

    for user in [1u64, 2u64] {
        let reply = session.handle_action(
            user,
            GameAction::PlaceCard {
                card_id: "Avatar".to_owned(),
                location: "Walls".to_owned(),
                zone: None,
            },
        );
        assert!(matches!(
            reply,
            ServerMessage::ActionResult { success: true, .. }
        ));
        let reply = session.handle_action(user, GameAction::EndTurn);
        assert!(matches!(
            reply,
            ServerMessage::ActionResult { success: true, .. }
        ));
    }

    // The attacker (user 1) claimed the middle zone first; the defender
    // may not assign.
    let reply = session.handle_action(
        2,
        GameAction::CombatAssignments {
            assignments: [("0".to_owned(), vec![0])].into_iter().collect(),
        },
    );
    let ServerMessage::ActionResult { success, error, .. } = reply else {
        panic!("wrong reply type");
    };
    assert!(!success);
    assert!(error.unwrap().contains("attacker"));
}
