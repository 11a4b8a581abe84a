use serde::{Deserialize, Serialize};

/// Unique identifier for units, assigned monotonically by the factory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

/// A cell coordinate on the arena grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance; both movement budgets and attack ranges use it.
    pub fn distance(&self, other: &Pos) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

/// The fixed set of unit types.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum UnitKind {
    Knight,
    Archer,
    Mage,
    Tank,
    Assassin,
}

/// Base combat profile for a tier-1 unit of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub attack: i32,
    pub health: i32,
    pub speed: i32,
    pub range: i32,
    pub ability_cooldown_max: i32,
}

impl UnitKind {
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Knight,
        UnitKind::Archer,
        UnitKind::Mage,
        UnitKind::Tank,
        UnitKind::Assassin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Knight => "knight",
            UnitKind::Archer => "archer",
            UnitKind::Mage => "mage",
            UnitKind::Tank => "tank",
            UnitKind::Assassin => "assassin",
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            UnitKind::Knight => BaseStats {
                attack: 8,
                health: 25,
                speed: 2,
                range: 1,
                ability_cooldown_max: 3,
            },
            UnitKind::Archer => BaseStats {
                attack: 6,
                health: 15,
                speed: 3,
                range: 4,
                ability_cooldown_max: 4,
            },
            UnitKind::Mage => BaseStats {
                attack: 12,
                health: 12,
                speed: 2,
                range: 3,
                ability_cooldown_max: 5,
            },
            UnitKind::Tank => BaseStats {
                attack: 5,
                health: 40,
                speed: 1,
                range: 1,
                ability_cooldown_max: 6,
            },
            UnitKind::Assassin => BaseStats {
                attack: 15,
                health: 10,
                speed: 4,
                range: 1,
                ability_cooldown_max: 3,
            },
        }
    }

    /// Shop price in gold.
    pub fn cost(&self) -> i32 {
        match self {
            UnitKind::Knight => 3,
            UnitKind::Archer => 2,
            UnitKind::Mage => 4,
            UnitKind::Tank => 5,
            UnitKind::Assassin => 3,
        }
    }
}

/// A unit instance: a shop offer, a benched unit, or a combatant on the arena.
///
/// `speed` doubles as the movement budget per turn. `sold` only ever flips
/// from false to true, and only on shop offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub tier: i32,
    pub cost: i32,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub speed: i32,
    pub range: i32,
    pub ability_cooldown: i32,
    pub ability_cooldown_max: i32,
    pub is_enemy: bool,
    pub combinable: bool,
    pub sold: bool,
    pub has_moved: bool,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Health clamps at 0; the caller decides whether the corpse leaves the
    /// grid.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Applied on battle entry and again on end-of-round resurrection.
    pub fn reset_for_battle(&mut self) {
        self.health = self.max_health;
        self.ability_cooldown = 0;
        self.has_moved = false;
    }
}
