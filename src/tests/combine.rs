use crate::combine::run_combine;
use crate::events::GameEvent;
use crate::state::GameState;
use crate::types::{Pos, UnitKind};

use super::{assert_single_location, bench_player, place_player};

#[test]
fn three_tier1_archers_merge_into_one_tier2() {
    let mut state = GameState::new();
    let a = bench_player(&mut state, UnitKind::Archer);
    let b = bench_player(&mut state, UnitKind::Archer);
    let c = bench_player(&mut state, UnitKind::Archer);

    let mut events = Vec::new();
    run_combine(&mut state, &mut events);

    assert_eq!(state.units.len(), 1);
    let merged = state.units.values().next().unwrap();
    assert_eq!(merged.kind, UnitKind::Archer);
    assert_eq!(merged.tier, 2);
    assert_eq!(merged.cost, 0);
    // floor(base x 1.5): archer is 6/15.
    assert_eq!(merged.attack, 9);
    assert_eq!(merged.health, 22);
    assert_eq!(merged.max_health, 22);
    assert_eq!(state.bench[0], Some(merged.id));
    for id in [a, b, c] {
        assert!(state.unit(id).is_none());
    }
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::UnitsCombined { tier: 2, .. })));
    assert_single_location(&state);
}

#[test]
fn merge_consumes_units_from_bench_and_arena_alike() {
    let mut state = GameState::new();
    bench_player(&mut state, UnitKind::Knight);
    bench_player(&mut state, UnitKind::Knight);
    place_player(&mut state, UnitKind::Knight, 5, 2);

    let mut events = Vec::new();
    run_combine(&mut state, &mut events);

    assert_eq!(state.units.len(), 1);
    let merged = state.units.values().next().unwrap();
    assert_eq!(merged.tier, 2);
    // floor(base x 1.5): knight is 8/25.
    assert_eq!(merged.attack, 12);
    assert_eq!(merged.health, 37);
    assert_eq!(state.bench[0], Some(merged.id));
    assert!(!state.arena.is_occupied(Pos::new(5, 2)));
    assert_single_location(&state);
}

#[test]
fn six_of_a_kind_collapse_into_two() {
    let mut state = GameState::new();
    for _ in 0..6 {
        bench_player(&mut state, UnitKind::Archer);
    }

    let mut events = Vec::new();
    run_combine(&mut state, &mut events);

    assert_eq!(state.units.len(), 2);
    assert!(state.units.values().all(|unit| unit.tier == 2));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::UnitsCombined { .. }))
            .count(),
        2
    );
}

#[test]
fn nine_of_a_kind_cascade_to_tier3_in_one_pass() {
    let mut state = GameState::new();
    for _ in 0..8 {
        bench_player(&mut state, UnitKind::Archer);
    }
    place_player(&mut state, UnitKind::Archer, 5, 0);

    let mut events = Vec::new();
    run_combine(&mut state, &mut events);

    // 3 tier-2 products immediately form a tier-3 triple.
    assert_eq!(state.units.len(), 1);
    let merged = state.units.values().next().unwrap();
    assert_eq!(merged.tier, 3);
    // floor(base x 1.8): archer is 6/15.
    assert_eq!(merged.attack, 10);
    assert_eq!(merged.health, 27);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::UnitsCombined { .. }))
            .count(),
        4
    );
    assert_single_location(&state);
}

#[test]
fn different_tiers_never_group() {
    let mut state = GameState::new();
    bench_player(&mut state, UnitKind::Archer);
    bench_player(&mut state, UnitKind::Archer);
    let upgraded = state.factory.combined(UnitKind::Archer, 1);
    let upgraded_id = upgraded.id;
    state.units.insert(upgraded_id, upgraded);
    assert!(state.bench_unit(upgraded_id));

    let mut events = Vec::new();
    run_combine(&mut state, &mut events);

    assert_eq!(state.units.len(), 3);
    assert!(events.is_empty());
}

#[test]
fn rerunning_on_resolved_state_is_a_noop() {
    let mut state = GameState::new();
    for _ in 0..3 {
        bench_player(&mut state, UnitKind::Knight);
    }
    let mut events = Vec::new();
    run_combine(&mut state, &mut events);

    let snapshot = state.clone();
    let mut second_events = Vec::new();
    run_combine(&mut state, &mut second_events);

    assert_eq!(state, snapshot);
    assert!(second_events.is_empty());
}

#[test]
fn no_combinable_flags_survive_resolution() {
    let mut state = GameState::new();
    for _ in 0..4 {
        bench_player(&mut state, UnitKind::Archer);
    }

    let mut events = Vec::new();
    run_combine(&mut state, &mut events);

    // One leftover archer plus the product; neither is part of a triple now.
    assert_eq!(state.units.len(), 2);
    assert!(state.units.values().all(|unit| !unit.combinable));
}

#[test]
fn full_bench_drops_the_merge_product() {
    let mut state = GameState::new();
    for kind in [UnitKind::Knight, UnitKind::Tank, UnitKind::Mage, UnitKind::Assassin] {
        bench_player(&mut state, kind);
        bench_player(&mut state, kind);
    }
    for col in 0..3 {
        place_player(&mut state, UnitKind::Archer, 5, col);
    }

    let mut events = Vec::new();
    run_combine(&mut state, &mut events);

    // The archer triple merged but its product had nowhere to go.
    assert_eq!(state.units.len(), 8);
    assert!(state.units.values().all(|unit| unit.kind != UnitKind::Archer));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::UnitsCombined { kind: UnitKind::Archer, .. })));
    assert_single_location(&state);
}
