//! Outbound events for presentation playback.
//!
//! The engine appends events as commands and battles resolve; a frontend
//! drains the queue and replays it at its own pace. Nothing in the simulation
//! waits on the playback.

use serde::{Deserialize, Serialize};

use crate::battle::BattleOutcome;
use crate::state::GamePhase;
use crate::types::{Pos, UnitId, UnitKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum GameEvent {
    #[serde(rename_all = "camelCase")]
    UnitPurchased {
        unit: UnitId,
        kind: UnitKind,
        cost: i32,
        bench_slot: usize,
    },
    #[serde(rename_all = "camelCase")]
    UnitsCombined {
        kind: UnitKind,
        tier: i32,
        consumed: Vec<UnitId>,
        produced: UnitId,
    },
    #[serde(rename_all = "camelCase")]
    UnitPlaced { unit: UnitId, at: Pos },
    #[serde(rename_all = "camelCase")]
    UnitBenched { unit: UnitId, slot: usize },
    #[serde(rename_all = "camelCase")]
    UnitsSwapped { a: Pos, b: Pos },
    #[serde(rename_all = "camelCase")]
    UnitSold {
        unit: UnitId,
        kind: UnitKind,
        tier: i32,
        price: i32,
    },
    ShopRefreshed,
    #[serde(rename_all = "camelCase")]
    TurnStarted { turn: u32 },
    #[serde(rename_all = "camelCase")]
    UnitMoved { unit: UnitId, from: Pos, to: Pos },
    #[serde(rename_all = "camelCase")]
    AbilityUsed { unit: UnitId, name: String },
    #[serde(rename_all = "camelCase")]
    DamageDealt {
        source: UnitId,
        target: UnitId,
        amount: i32,
        remaining_health: i32,
    },
    #[serde(rename_all = "camelCase")]
    UnitHealed {
        unit: UnitId,
        amount: i32,
        health: i32,
    },
    #[serde(rename_all = "camelCase")]
    UnitDefeated { unit: UnitId },
    #[serde(rename_all = "camelCase")]
    PhaseChanged { phase: GamePhase },
    #[serde(rename_all = "camelCase")]
    BattleEnded {
        outcome: BattleOutcome,
        gold_reward: i32,
        health_loss: i32,
    },
    #[serde(rename_all = "camelCase")]
    RoundStarted { round: i32 },
}
