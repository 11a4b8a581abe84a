use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::types::{Unit, UnitId};
use crate::units::UnitFactory;

/// Number of bench slots.
pub const BENCH_SIZE: usize = 8;
/// Number of shop offers.
pub const SHOP_SIZE: usize = 5;
/// Gold at the start of a run.
pub const STARTING_GOLD: i32 = 10;
/// Player health at the start of a run.
pub const STARTING_HEALTH: i32 = 100;
/// Gold cost of a shop refresh.
pub const REFRESH_COST: i32 = 2;

/// Current phase of the session. `Eliminated` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    Preparation,
    Battle,
    Results,
    Eliminated,
}

/// The complete session state.
///
/// Units live in the pool; bench and arena hold ids only, so a unit can never
/// silently occupy two locations. Shop offers are held by value until bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Every owned or fielded unit, keyed by id.
    pub units: BTreeMap<UnitId, Unit>,
    pub arena: Arena,
    /// Bench slots; insertion always picks the lowest empty index.
    pub bench: Vec<Option<UnitId>>,
    /// Current shop offers, regenerated wholesale on refresh or new round.
    pub shop: Vec<Unit>,
    pub gold: i32,
    pub health: i32,
    pub round: i32,
    pub phase: GamePhase,
    /// Player units recorded at battle entry, in scan order; resurrected and
    /// returned to the bench when the next round starts.
    pub fighters: Vec<UnitId>,
    pub factory: UnitFactory,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            units: BTreeMap::new(),
            arena: Arena::new(),
            bench: vec![None; BENCH_SIZE],
            shop: Vec::new(),
            gold: STARTING_GOLD,
            health: STARTING_HEALTH,
            round: 1,
            phase: GamePhase::Preparation,
            fighters: Vec::new(),
            factory: UnitFactory::new(),
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn find_empty_bench_slot(&self) -> Option<usize> {
        self.bench.iter().position(|slot| slot.is_none())
    }

    pub fn bench_index_of(&self, id: UnitId) -> Option<usize> {
        self.bench.iter().position(|slot| *slot == Some(id))
    }

    /// Bench the unit at the lowest empty slot; false when the bench is full.
    pub fn bench_unit(&mut self, id: UnitId) -> bool {
        match self.find_empty_bench_slot() {
            Some(slot) => {
                self.bench[slot] = Some(id);
                true
            }
            None => false,
        }
    }

    /// Detach the unit from whichever single location currently holds it.
    pub fn remove_from_locations(&mut self, id: UnitId) {
        if let Some(slot) = self.bench_index_of(id) {
            self.bench[slot] = None;
        }
        self.arena.remove(id);
    }

    /// Player-owned unit ids in merge scan order: bench slots first, then the
    /// arena row-major.
    pub fn player_units_scan_order(&self) -> Vec<UnitId> {
        let mut ids: Vec<UnitId> = self.bench.iter().flatten().copied().collect();
        ids.extend(self.arena.iter().filter_map(|(_, id)| {
            self.unit(id).filter(|unit| !unit.is_enemy).map(|unit| unit.id)
        }));
        ids
    }

    /// Player units currently on the arena (any health), in scan order.
    pub fn arena_player_units(&self) -> Vec<UnitId> {
        self.arena
            .iter()
            .filter_map(|(_, id)| self.unit(id).filter(|unit| !unit.is_enemy).map(|unit| unit.id))
            .collect()
    }

    /// Living arena units of one side, in scan order.
    pub fn living_units(&self, enemy: bool) -> Vec<UnitId> {
        self.arena
            .iter()
            .filter_map(|(_, id)| {
                self.unit(id)
                    .filter(|unit| unit.is_enemy == enemy && unit.is_alive())
                    .map(|unit| unit.id)
            })
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
