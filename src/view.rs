//! View types for presentation layers.
//!
//! Each view carries enough data to render without reaching back into the
//! engine.

use serde::{Deserialize, Serialize};

use crate::abilities::Ability;
use crate::arena::{ARENA_COLS, ARENA_ROWS};
use crate::state::{GamePhase, GameState, REFRESH_COST};
use crate::types::{Pos, Unit, UnitId, UnitKind};

/// Snapshot of a bench or arena unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub name: String,
    pub tier: i32,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub speed: i32,
    pub range: i32,
    pub ability_cooldown: i32,
    pub ability_name: String,
    pub is_enemy: bool,
    pub combinable: bool,
}

impl From<&Unit> for UnitView {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            kind: unit.kind,
            name: unit.kind.name().to_string(),
            tier: unit.tier,
            attack: unit.attack,
            health: unit.health,
            max_health: unit.max_health,
            speed: unit.speed,
            range: unit.range,
            ability_cooldown: unit.ability_cooldown,
            ability_name: Ability::of(unit.kind).name().to_string(),
            is_enemy: unit.is_enemy,
            combinable: unit.combinable,
        }
    }
}

/// A shop offer as rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOfferView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub name: String,
    pub cost: i32,
    pub attack: i32,
    pub health: i32,
    pub speed: i32,
    pub range: i32,
    pub ability_name: String,
    pub sold: bool,
}

/// The complete game view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub gold: i32,
    pub health: i32,
    pub round: i32,
    pub phase: GamePhase,
    /// Row-major rows of cells, `None` for empty.
    pub arena: Vec<Vec<Option<UnitView>>>,
    pub bench: Vec<Option<UnitView>>,
    pub shop: Vec<ShopOfferView>,
    pub can_start_battle: bool,
    pub can_refresh: bool,
}

impl GameView {
    pub fn from_state(state: &GameState) -> Self {
        let arena = (0..ARENA_ROWS)
            .map(|row| {
                (0..ARENA_COLS)
                    .map(|col| {
                        state
                            .arena
                            .unit_at(Pos::new(row, col))
                            .and_then(|id| state.unit(id))
                            .map(UnitView::from)
                    })
                    .collect()
            })
            .collect();

        let bench = state
            .bench
            .iter()
            .map(|slot| slot.and_then(|id| state.unit(id)).map(UnitView::from))
            .collect();

        let shop = state
            .shop
            .iter()
            .map(|offer| ShopOfferView {
                id: offer.id,
                kind: offer.kind,
                name: offer.kind.name().to_string(),
                cost: offer.cost,
                attack: offer.attack,
                health: offer.health,
                speed: offer.speed,
                range: offer.range,
                ability_name: Ability::of(offer.kind).name().to_string(),
                sold: offer.sold,
            })
            .collect();

        let in_play = state.phase == GamePhase::Preparation && state.health > 0;
        Self {
            gold: state.gold,
            health: state.health,
            round: state.round,
            phase: state.phase,
            arena,
            bench,
            shop,
            can_start_battle: in_play,
            can_refresh: in_play && state.gold >= REFRESH_COST,
        }
    }
}
