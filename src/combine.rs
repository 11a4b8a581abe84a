//! The merge engine.
//!
//! Any three player units of the same kind and tier collapse into one unit a
//! tier higher. The scan re-runs after every state-mutating preparation
//! command and iterates until no group of three remains, so a merge product
//! that completes a higher-tier triple is consumed in the same command.

use crate::events::GameEvent;
use crate::state::GameState;
use crate::types::{UnitId, UnitKind};

/// Re-evaluate merge state to a fixed point.
pub fn run_combine(state: &mut GameState, events: &mut Vec<GameEvent>) {
    while combine_pass(state, events) {}
}

/// One scan/flag/merge pass; true when at least one merge happened.
fn combine_pass(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let player_ids = state.player_units_scan_order();

    // Flags from the previous evaluation are stale by definition.
    for &id in &player_ids {
        if let Some(unit) = state.unit_mut(id) {
            unit.combinable = false;
        }
    }

    // Group by (kind, tier), keeping first-encountered order of both the
    // groups and their members.
    let mut groups: Vec<((UnitKind, i32), Vec<UnitId>)> = Vec::new();
    for &id in &player_ids {
        let Some(unit) = state.unit(id) else { continue };
        let key = (unit.kind, unit.tier);
        match groups.iter_mut().find(|(group_key, _)| *group_key == key) {
            Some((_, members)) => members.push(id),
            None => groups.push((key, vec![id])),
        }
    }

    let mut merged = false;
    for ((kind, tier), mut members) in groups {
        if members.len() < 3 {
            continue;
        }
        for &id in &members {
            if let Some(unit) = state.unit_mut(id) {
                unit.combinable = true;
            }
        }
        while members.len() >= 3 {
            let consumed: Vec<UnitId> = members.drain(..3).collect();
            merge_three(state, kind, tier, consumed, events);
            merged = true;
        }
    }
    merged
}

fn merge_three(
    state: &mut GameState,
    kind: UnitKind,
    tier: i32,
    consumed: Vec<UnitId>,
    events: &mut Vec<GameEvent>,
) {
    for &id in &consumed {
        state.remove_from_locations(id);
        state.units.remove(&id);
    }

    let unit = state.factory.combined(kind, tier);
    let produced = unit.id;
    let produced_tier = unit.tier;
    state.units.insert(produced, unit);

    log::debug!(
        "combine: 3x tier {} {} -> tier {} {:?}",
        tier,
        kind.name(),
        produced_tier,
        produced
    );
    events.push(GameEvent::UnitsCombined {
        kind,
        tier: produced_tier,
        consumed,
        produced,
    });

    // A full bench drops the product outright.
    if !state.bench_unit(produced) {
        state.units.remove(&produced);
        log::debug!("combine: bench full, {:?} discarded", produced);
    }
}
