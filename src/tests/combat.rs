use crate::battle::combat_phase;
use crate::events::GameEvent;
use crate::state::GameState;
use crate::types::{UnitId, UnitKind};

use super::{place_enemy, place_player, ConstRng};

#[test]
fn units_act_in_descending_speed_order() {
    let mut state = GameState::new();
    // Assassin (speed 4), knight (speed 2), enemy tank (speed 1), all
    // adjacent to the tank.
    let assassin = place_player(&mut state, UnitKind::Assassin, 5, 0);
    let knight = place_player(&mut state, UnitKind::Knight, 6, 1);
    let tank = place_enemy(&mut state, UnitKind::Tank, 6, 0);

    let mut events = Vec::new();
    // u64::MAX: abilities never trigger, random picks take the last option.
    combat_phase(
        &mut state,
        &[assassin, knight],
        &[tank],
        &mut ConstRng(u64::MAX),
        &mut events,
    );

    let sources: Vec<UnitId> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::DamageDealt { source, .. } => Some(*source),
            _ => None,
        })
        .collect();
    assert_eq!(sources, vec![assassin, knight, tank]);

    // Max roll adds 1 to each attack: 16 + 9 into the tank, 6 into the
    // knight (the last in-range player).
    assert_eq!(state.unit(tank).unwrap().health, 40 - 16 - 9);
    assert_eq!(state.unit(knight).unwrap().health, 25 - 6);
    assert_eq!(state.unit(assassin).unwrap().health, 10);
}

#[test]
fn lethal_attack_clamps_health_and_clears_the_cell() {
    let mut state = GameState::new();
    let attacker = place_player(&mut state, UnitKind::Knight, 5, 0);
    {
        let unit = state.unit_mut(attacker).unwrap();
        unit.attack = 10;
        // Keep the ability out of the picture; the cooldown only ticks to 4.
        unit.ability_cooldown = 5;
    }
    let victim = place_enemy(&mut state, UnitKind::Tank, 5, 1);
    state.unit_mut(victim).unwrap().health = 5;

    let mut events = Vec::new();
    combat_phase(
        &mut state,
        &[attacker],
        &[victim],
        &mut ConstRng(0),
        &mut events,
    );

    // Roll 0 makes damage 10 + 0 - 1 = 9, more than enough.
    assert_eq!(state.unit(victim).unwrap().health, 0);
    assert!(state.arena.position_of(victim).is_none());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::DamageDealt { amount: 9, .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::UnitDefeated { unit } if *unit == victim)));
    assert_eq!(state.unit(attacker).unwrap().ability_cooldown, 4);
}

#[test]
fn damage_never_drops_below_one() {
    let mut state = GameState::new();
    let attacker = place_player(&mut state, UnitKind::Knight, 5, 0);
    {
        let unit = state.unit_mut(attacker).unwrap();
        unit.attack = 0;
        unit.ability_cooldown = 5;
    }
    let victim = place_enemy(&mut state, UnitKind::Tank, 5, 1);

    let mut events = Vec::new();
    combat_phase(
        &mut state,
        &[attacker],
        &[victim],
        &mut ConstRng(0),
        &mut events,
    );

    assert_eq!(state.unit(victim).unwrap().health, 39);
}

#[test]
fn ready_ability_fires_and_resets_its_cooldown() {
    let mut state = GameState::new();
    let knight = place_player(&mut state, UnitKind::Knight, 5, 0);
    let tank = place_enemy(&mut state, UnitKind::Tank, 5, 1);

    let mut events = Vec::new();
    // 0: every ability roll succeeds.
    combat_phase(&mut state, &[knight], &[tank], &mut ConstRng(0), &mut events);

    // Knight bursts for floor(8 x 1.5) = 12; the tank then self-sustains
    // back to full.
    assert!(events.iter().any(
        |e| matches!(e, GameEvent::AbilityUsed { unit, name } if *unit == knight && name == "Burst Strike")
    ));
    assert!(events.iter().any(
        |e| matches!(e, GameEvent::DamageDealt { source, amount: 12, .. } if *source == knight)
    ));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::UnitHealed { unit, amount: 15, .. } if *unit == tank)));
    assert_eq!(state.unit(tank).unwrap().health, 40);
    assert_eq!(state.unit(knight).unwrap().ability_cooldown, 3);
    assert_eq!(state.unit(tank).unwrap().ability_cooldown, 6);
}

#[test]
fn cooldown_ticks_before_the_trigger_check() {
    let mut state = GameState::new();
    let knight = place_player(&mut state, UnitKind::Knight, 5, 0);
    state.unit_mut(knight).unwrap().ability_cooldown = 3;
    let tank = place_enemy(&mut state, UnitKind::Tank, 5, 1);
    state.unit_mut(tank).unwrap().ability_cooldown = 6;

    let mut events = Vec::new();
    combat_phase(&mut state, &[knight], &[tank], &mut ConstRng(0), &mut events);

    // Neither unit reached 0 this turn, so both swung normally.
    assert_eq!(state.unit(knight).unwrap().ability_cooldown, 2);
    assert_eq!(state.unit(tank).unwrap().ability_cooldown, 5);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::AbilityUsed { .. })));
    // Roll 0: knight deals 8 - 1 = 7, tank deals 5 - 1 = 4.
    assert_eq!(state.unit(tank).unwrap().health, 33);
    assert_eq!(state.unit(knight).unwrap().health, 21);

    // A unit entering the turn at cooldown 1 is ready the same turn.
    state.unit_mut(knight).unwrap().ability_cooldown = 1;
    let mut more_events = Vec::new();
    combat_phase(
        &mut state,
        &[knight],
        &[tank],
        &mut ConstRng(0),
        &mut more_events,
    );
    assert!(more_events.iter().any(
        |e| matches!(e, GameEvent::AbilityUsed { unit, .. } if *unit == knight)
    ));
    assert_eq!(state.unit(knight).unwrap().ability_cooldown, 3);
}

#[test]
fn out_of_range_units_do_nothing() {
    let mut state = GameState::new();
    let knight = place_player(&mut state, UnitKind::Knight, 7, 0);
    state.unit_mut(knight).unwrap().ability_cooldown = 5;
    let tank = place_enemy(&mut state, UnitKind::Tank, 0, 5);
    state.unit_mut(tank).unwrap().ability_cooldown = 5;

    let mut events = Vec::new();
    combat_phase(&mut state, &[knight], &[tank], &mut ConstRng(0), &mut events);

    assert!(events.is_empty());
    assert_eq!(state.unit(knight).unwrap().health, 25);
    assert_eq!(state.unit(tank).unwrap().health, 40);
}
