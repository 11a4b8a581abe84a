//! Enemy team generation.
//!
//! Each round fields a fresh, round-scaled team in the enemy zone; enemies
//! never persist across rounds.

use rand::Rng;

use crate::state::GameState;
use crate::types::{Pos, UnitId};

/// Fixed deployment table inside the enemy zone. Enemy count is capped at
/// its length, so placement is always defined.
pub const ENEMY_POSITIONS: [Pos; 12] = [
    Pos { row: 1, col: 2 },
    Pos { row: 1, col: 3 },
    Pos { row: 0, col: 1 },
    Pos { row: 0, col: 4 },
    Pos { row: 2, col: 0 },
    Pos { row: 2, col: 5 },
    Pos { row: 0, col: 2 },
    Pos { row: 0, col: 3 },
    Pos { row: 1, col: 0 },
    Pos { row: 1, col: 5 },
    Pos { row: 2, col: 2 },
    Pos { row: 2, col: 3 },
];

/// Enemies fielded for a round.
pub fn enemy_count(round: i32) -> usize {
    ((2 + round / 2) as usize).min(ENEMY_POSITIONS.len())
}

/// Drop the previous enemy team and field a fresh scaled one for the round.
pub fn generate_enemy_team<R: Rng>(state: &mut GameState, rng: &mut R) {
    let old: Vec<UnitId> = state
        .units
        .values()
        .filter(|unit| unit.is_enemy)
        .map(|unit| unit.id)
        .collect();
    for id in old {
        state.arena.remove(id);
        state.units.remove(&id);
    }

    let count = enemy_count(state.round);
    for position in ENEMY_POSITIONS.iter().take(count) {
        let unit = state.factory.enemy(state.round, rng);
        let id = unit.id;
        state.units.insert(id, unit);
        let _placed = state.arena.place(id, *position);
        debug_assert!(_placed, "enemy zone cell already occupied");
    }
    log::debug!("opponents: fielded {} enemies for round {}", count, state.round);
}
