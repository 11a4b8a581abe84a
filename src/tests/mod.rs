mod combat;
mod combine;

use rand::{Error, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::state::GameState;
use crate::types::{Pos, UnitId, UnitKind};

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// Spawn a player unit straight into the pool and onto an arena cell.
fn place_player(state: &mut GameState, kind: UnitKind, row: i32, col: i32) -> UnitId {
    let unit = state.factory.unit(kind, kind.cost());
    let id = unit.id;
    state.units.insert(id, unit);
    assert!(state.arena.place(id, Pos::new(row, col)));
    id
}

/// Spawn an unscaled enemy unit onto an arena cell.
fn place_enemy(state: &mut GameState, kind: UnitKind, row: i32, col: i32) -> UnitId {
    let mut unit = state.factory.unit(kind, kind.cost());
    unit.is_enemy = true;
    let id = unit.id;
    state.units.insert(id, unit);
    assert!(state.arena.place(id, Pos::new(row, col)));
    id
}

/// Spawn a player unit onto the lowest empty bench slot.
fn bench_player(state: &mut GameState, kind: UnitKind) -> UnitId {
    let unit = state.factory.unit(kind, kind.cost());
    let id = unit.id;
    state.units.insert(id, unit);
    assert!(state.bench_unit(id));
    id
}

/// Remove the generated enemy team so battles can be scripted by hand.
fn clear_enemies(state: &mut GameState) {
    let ids: Vec<UnitId> = state
        .units
        .values()
        .filter(|unit| unit.is_enemy)
        .map(|unit| unit.id)
        .collect();
    for id in ids {
        state.arena.remove(id);
        state.units.remove(&id);
    }
}

/// No unit may sit in more than one location, and the grid must agree with
/// its position index.
fn assert_single_location(state: &GameState) {
    for &id in state.units.keys() {
        let on_bench = state.bench.iter().filter(|slot| **slot == Some(id)).count();
        let on_arena = usize::from(state.arena.position_of(id).is_some());
        assert!(
            on_bench + on_arena <= 1,
            "{id:?} occupies {} locations",
            on_bench + on_arena
        );
    }
    for (pos, id) in state.arena.iter() {
        assert_eq!(state.arena.position_of(id), Some(pos));
    }
}

fn chacha(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Fixed-output RNG for forcing one side of the random checks: 0 makes every
/// ability roll succeed and every random pick take the first option;
/// `u64::MAX` makes ability rolls fail and random picks take the last option.
struct ConstRng(u64);

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        self.0 as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.0 as u8;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
