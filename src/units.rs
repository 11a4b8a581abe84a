//! Unit construction.

use rand::Rng;

use crate::types::{Unit, UnitId, UnitKind};

/// Builds units and owns the monotonic id sequence.
///
/// The sequence lives on the game state rather than in a process-wide
/// counter, so independent simulations never share ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFactory {
    next_id: u32,
}

impl UnitFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    fn next_id(&mut self) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        id
    }

    /// A tier-1 unit of `kind` with its base stat line.
    pub fn unit(&mut self, kind: UnitKind, cost: i32) -> Unit {
        let stats = kind.base_stats();
        Unit {
            id: self.next_id(),
            kind,
            tier: 1,
            cost,
            attack: stats.attack,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            range: stats.range,
            ability_cooldown: 0,
            ability_cooldown_max: stats.ability_cooldown_max,
            is_enemy: false,
            combinable: false,
            sold: false,
            has_moved: false,
        }
    }

    /// A fresh shop offer of a uniformly random kind at its fixed price.
    pub fn shop_offer<R: Rng>(&mut self, rng: &mut R) -> Unit {
        let kind = UnitKind::ALL[rng.gen_range(0..UnitKind::ALL.len())];
        self.unit(kind, kind.cost())
    }

    /// An enemy of a uniformly random kind, attack and health scaled for the
    /// round.
    pub fn enemy<R: Rng>(&mut self, round: i32, rng: &mut R) -> Unit {
        let kind = UnitKind::ALL[rng.gen_range(0..UnitKind::ALL.len())];
        let mut unit = self.unit(kind, kind.cost());
        unit.is_enemy = true;
        let scale = 1.0 + round as f64 * 0.1;
        unit.attack = (unit.attack as f64 * scale).floor() as i32;
        unit.health = (unit.health as f64 * scale).floor() as i32;
        unit.max_health = unit.health;
        unit
    }

    /// The product of merging three identical `(kind, tier)` units: one tier
    /// higher, costs nothing, stats grown from the tier-1 base line.
    pub fn combined(&mut self, kind: UnitKind, input_tier: i32) -> Unit {
        let mut unit = self.unit(kind, 0);
        unit.tier = input_tier + 1;
        let growth = 1.5 + 0.3 * (input_tier - 1) as f64;
        unit.attack = (unit.attack as f64 * growth).floor() as i32;
        unit.health = (unit.health as f64 * growth).floor() as i32;
        unit.max_health = unit.health;
        unit
    }
}

impl Default for UnitFactory {
    fn default() -> Self {
        Self::new()
    }
}
