//! Battle resolution: the synchronous turn loop with its movement and combat
//! sub-phases.
//!
//! The whole battle runs to completion in one call; pacing is a presentation
//! concern and lives entirely in the drained event stream.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::abilities::Ability;
use crate::arena::Arena;
use crate::events::GameEvent;
use crate::state::GameState;
use crate::types::{Pos, UnitId};

/// Turn cap; exhausting it with both sides alive counts as a player loss.
pub const MAX_BATTLE_TURNS: u32 = 100;

/// Chance that a unit with a ready ability uses it instead of attacking.
const ABILITY_TRIGGER_CHANCE: f64 = 0.3;

/// Final outcome of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Run a battle to completion, mutating arena/unit state and appending
/// playback events.
///
/// Decision checks happen at each turn boundary, player side first, so a
/// mutually-emptied board counts as a defeat.
pub fn resolve_battle<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> BattleOutcome {
    let mut turn = 0;
    while turn < MAX_BATTLE_TURNS {
        let player_units = state.living_units(false);
        let enemy_units = state.living_units(true);

        if player_units.is_empty() {
            return BattleOutcome::Defeat;
        }
        if enemy_units.is_empty() {
            return BattleOutcome::Victory;
        }

        events.push(GameEvent::TurnStarted { turn: turn + 1 });

        movement_phase(state, &player_units, &enemy_units, events);
        combat_phase(state, &player_units, &enemy_units, rng, events);

        turn += 1;
    }
    BattleOutcome::Defeat
}

/// Movement sub-phase. The full player side moves before any enemy does; the
/// asymmetry is deliberate and load-bearing for reproducibility.
pub(crate) fn movement_phase(
    state: &mut GameState,
    player_units: &[UnitId],
    enemy_units: &[UnitId],
    events: &mut Vec<GameEvent>,
) {
    for &id in player_units {
        if state.unit(id).is_some_and(|unit| unit.is_alive()) {
            move_toward_opponents(state, id, enemy_units, events);
        }
    }
    for &id in enemy_units {
        if state.unit(id).is_some_and(|unit| unit.is_alive()) {
            move_toward_opponents(state, id, player_units, events);
        }
    }
}

/// Pick the nearest living opponent and step toward it. A unit that already
/// has any opponent within attack range stays put.
fn move_toward_opponents(
    state: &mut GameState,
    id: UnitId,
    opponents: &[UnitId],
    events: &mut Vec<GameEvent>,
) {
    let Some(unit_pos) = state.arena.position_of(id) else {
        return;
    };
    let Some(unit) = state.unit(id) else { return };
    let (speed, range) = (unit.speed, unit.range);

    let mut target = None;
    let mut closest = i32::MAX;
    for &opponent_id in opponents {
        let Some(opponent) = state.unit(opponent_id) else {
            continue;
        };
        if !opponent.is_alive() {
            continue;
        }
        let Some(opponent_pos) = state.arena.position_of(opponent_id) else {
            continue;
        };
        let distance = unit_pos.distance(&opponent_pos);
        if distance <= range {
            return;
        }
        if distance < closest {
            closest = distance;
            target = Some(opponent_pos);
        }
    }
    let Some(target_pos) = target else { return };

    if let Some(dest) = best_move(&state.arena, unit_pos, target_pos, speed, range) {
        if dest != unit_pos && state.arena.relocate(id, dest) {
            if let Some(unit) = state.unit_mut(id) {
                unit.has_moved = true;
            }
            events.push(GameEvent::UnitMoved {
                unit: id,
                from: unit_pos,
                to: dest,
            });
        }
    }
}

/// Prefer the free cell that is both within attack range of the target and
/// closest to it; failing that, the free cell closest to the target, even
/// when that cell is no closer than where the unit already stands.
fn best_move(arena: &Arena, from: Pos, target: Pos, speed: i32, range: i32) -> Option<Pos> {
    let candidates = reachable_cells(from, speed);

    let mut best = None;
    let mut best_score = i32::MAX;
    for &pos in &candidates {
        if arena.is_occupied(pos) {
            continue;
        }
        let distance = pos.distance(&target);
        if distance <= range && distance < best_score {
            best_score = distance;
            best = Some(pos);
        }
    }

    if best.is_none() {
        for &pos in &candidates {
            if arena.is_occupied(pos) {
                continue;
            }
            let distance = pos.distance(&target);
            if distance < best_score {
                best_score = distance;
                best = Some(pos);
            }
        }
    }

    best
}

/// All in-bounds cells within Manhattan `speed` of `from`, excluding `from`
/// itself. Enumeration order (row delta outer, column delta inner) is part of
/// the tie-break contract.
fn reachable_cells(from: Pos, speed: i32) -> Vec<Pos> {
    let mut cells = Vec::new();
    for dr in -speed..=speed {
        for dc in -speed..=speed {
            if dr.abs() + dc.abs() > speed {
                continue;
            }
            if dr == 0 && dc == 0 {
                continue;
            }
            let pos = Pos::new(from.row + dr, from.col + dc);
            if Arena::in_bounds(pos) {
                cells.push(pos);
            }
        }
    }
    cells
}

/// Combat sub-phase. Everyone acts in descending speed order; the sort is
/// stable, so equal speeds keep player-before-enemy scan order.
pub(crate) fn combat_phase<R: Rng>(
    state: &mut GameState,
    player_units: &[UnitId],
    enemy_units: &[UnitId],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let mut order: Vec<UnitId> = player_units
        .iter()
        .chain(enemy_units.iter())
        .copied()
        .filter(|&id| state.unit(id).is_some_and(|unit| unit.is_alive()))
        .collect();
    order.sort_by(|a, b| {
        let speed_a = state.unit(*a).map_or(0, |unit| unit.speed);
        let speed_b = state.unit(*b).map_or(0, |unit| unit.speed);
        speed_b.cmp(&speed_a)
    });

    for id in order {
        let Some(unit) = state.unit(id) else { continue };
        if !unit.is_alive() {
            continue;
        }
        let opponents = if unit.is_enemy {
            player_units
        } else {
            enemy_units
        };
        unit_action(state, id, opponents, rng, events);
    }
}

/// One combat action: tick the cooldown, maybe fire the special ability,
/// otherwise swing at a random in-range target.
fn unit_action<R: Rng>(
    state: &mut GameState,
    id: UnitId,
    opponents: &[UnitId],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if state.arena.position_of(id).is_none() {
        return;
    }

    // The cooldown ticks before the trigger check, so a unit entering the
    // turn at cooldown 1 may fire this turn.
    let ready = {
        let Some(unit) = state.unit_mut(id) else { return };
        if unit.ability_cooldown > 0 {
            unit.ability_cooldown -= 1;
        }
        unit.ability_cooldown == 0
    };

    if ready && rng.gen_bool(ABILITY_TRIGGER_CHANCE) {
        let Some(unit) = state.unit(id) else { return };
        let (kind, cooldown_max) = (unit.kind, unit.ability_cooldown_max);
        let ability = Ability::of(kind);
        events.push(GameEvent::AbilityUsed {
            unit: id,
            name: ability.name().to_string(),
        });
        ability.apply(id, opponents, state, events);
        if let Some(unit) = state.unit_mut(id) {
            unit.ability_cooldown = cooldown_max;
        }
        return;
    }

    regular_attack(state, id, opponents, rng, events);
}

fn regular_attack<R: Rng>(
    state: &mut GameState,
    id: UnitId,
    opponents: &[UnitId],
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let in_range = targets_in_range(state, id, opponents);
    if in_range.is_empty() {
        return;
    }

    let target_id = in_range[rng.gen_range(0..in_range.len())];
    let attack = state.unit(id).map_or(0, |unit| unit.attack);
    let roll: i32 = rng.gen_range(0..3);
    let damage = (attack + roll - 1).max(1);

    let Some(target) = state.unit_mut(target_id) else {
        return;
    };
    target.take_damage(damage);
    let remaining = target.health;
    events.push(GameEvent::DamageDealt {
        source: id,
        target: target_id,
        amount: damage,
        remaining_health: remaining,
    });

    // A regular-attack kill clears the cell immediately.
    if remaining == 0 {
        state.arena.remove(target_id);
        events.push(GameEvent::UnitDefeated { unit: target_id });
    }
}

/// Living opponents within the actor's attack range, in list order.
pub(crate) fn targets_in_range(
    state: &GameState,
    id: UnitId,
    opponents: &[UnitId],
) -> Vec<UnitId> {
    let Some(pos) = state.arena.position_of(id) else {
        return Vec::new();
    };
    let Some(unit) = state.unit(id) else {
        return Vec::new();
    };
    let range = unit.range;

    opponents
        .iter()
        .copied()
        .filter(|&target_id| {
            let Some(target) = state.unit(target_id) else {
                return false;
            };
            if !target.is_alive() {
                return false;
            }
            let Some(target_pos) = state.arena.position_of(target_id) else {
                return false;
            };
            pos.distance(&target_pos) <= range
        })
        .collect()
}
