//! Gridclash: deterministic simulation core for a grid-based tactical
//! auto-battler.
//!
//! Players buy units, place them on an 8x6 arena, and an automated engine
//! resolves the battle against a round-scaled enemy team. The crate covers
//! the whole simulation — preparation commands, the merge engine, the battle
//! loop — behind an in-process command/event/query surface; rendering and
//! input handling live elsewhere and consume the drained event stream.

mod abilities;
mod arena;
mod battle;
mod combine;
mod engine;
mod error;
mod events;
mod opponents;
mod state;
mod types;
mod units;
mod view;

#[cfg(test)]
mod tests;

pub use abilities::Ability;
pub use arena::{Arena, ARENA_COLS, ARENA_ROWS, ENEMY_ZONE_ROWS, PLAYER_ZONE_START};
pub use battle::{resolve_battle, BattleOutcome, MAX_BATTLE_TURNS};
pub use combine::run_combine;
pub use engine::GameEngine;
pub use error::{GameError, GameResult};
pub use events::GameEvent;
pub use opponents::{enemy_count, generate_enemy_team, ENEMY_POSITIONS};
pub use state::{
    GamePhase, GameState, BENCH_SIZE, REFRESH_COST, SHOP_SIZE, STARTING_GOLD, STARTING_HEALTH,
};
pub use types::{BaseStats, Pos, Unit, UnitId, UnitKind};
pub use units::UnitFactory;
pub use view::{GameView, ShopOfferView, UnitView};
