//! The game engine: inbound commands, derived queries, and the outbound
//! event queue.
//!
//! Commands validate first and mutate only on success; every rejection is a
//! plain error for the caller to handle. The engine owns the only randomness
//! source, so a fixed seed replays a run command-for-command.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::arena::Arena;
use crate::battle::{resolve_battle, BattleOutcome};
use crate::combine::run_combine;
use crate::error::{GameError, GameResult};
use crate::events::GameEvent;
use crate::opponents::generate_enemy_team;
use crate::state::{GamePhase, GameState, BENCH_SIZE, REFRESH_COST, SHOP_SIZE};
use crate::types::{Pos, UnitId};
use crate::view::GameView;

#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// A fresh run seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// A fresh run with a fixed seed; identical commands replay identically.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut engine = Self {
            state: GameState::new(),
            rng,
            events: Vec::new(),
        };
        engine.restock_shop();
        generate_enemy_team(&mut engine.state, &mut engine.rng);
        log::info!(
            "new run: gold={} health={}",
            engine.state.gold,
            engine.state.health
        );
        engine
    }

    // ==========================================
    // PREPARATION COMMANDS
    // ==========================================

    /// Buy the shop offer at `index` onto the bench.
    pub fn buy_unit(&mut self, index: usize) -> GameResult<()> {
        self.require_preparation()?;
        let offer = self
            .state
            .shop
            .get(index)
            .ok_or(GameError::InvalidShopSlot { index })?;
        if offer.sold {
            return Err(GameError::AlreadySold);
        }
        let (id, kind, cost) = (offer.id, offer.kind, offer.cost);
        if self.state.gold < cost {
            return Err(GameError::NotEnoughGold {
                have: self.state.gold,
                need: cost,
            });
        }
        let slot = self
            .state
            .find_empty_bench_slot()
            .ok_or(GameError::BenchFull)?;

        self.state.gold -= cost;
        self.state.shop[index].sold = true;
        let unit = self.state.shop[index].clone();
        self.state.units.insert(id, unit);
        self.state.bench[slot] = Some(id);

        log::debug!("buy_unit: {:?} ({}) for {} gold", id, kind.name(), cost);
        self.events.push(GameEvent::UnitPurchased {
            unit: id,
            kind,
            cost,
            bench_slot: slot,
        });
        run_combine(&mut self.state, &mut self.events);
        Ok(())
    }

    /// Deploy or reposition a player unit onto an arena cell.
    ///
    /// Bench units may only deploy into the player zone; a unit already on
    /// the arena may go anywhere. Dropping onto a teammate from the arena
    /// swaps the two.
    pub fn place_unit(&mut self, unit: UnitId, row: i32, col: i32) -> GameResult<()> {
        self.require_preparation()?;
        let pos = Pos::new(row, col);
        if !Arena::in_bounds(pos) {
            return Err(GameError::OutOfBounds { row, col });
        }

        let moving = self.state.unit(unit).ok_or(GameError::UnknownUnit)?;
        if moving.is_enemy {
            return Err(GameError::NotPlayerUnit);
        }
        let from_arena = self.state.arena.position_of(unit);
        let from_bench = self.state.bench_index_of(unit);
        if from_arena.is_none() && from_bench.is_none() {
            return Err(GameError::UnknownUnit);
        }
        if from_bench.is_some() && !Arena::is_player_zone(row) {
            return Err(GameError::OutsidePlayerZone);
        }

        match self.state.arena.unit_at(pos) {
            Some(occupant) if occupant == unit => {}
            Some(occupant) => {
                let occupant_is_player = self
                    .state
                    .unit(occupant)
                    .is_some_and(|other| !other.is_enemy);
                let Some(from) = from_arena else {
                    return Err(GameError::CellOccupied { row, col });
                };
                if !occupant_is_player {
                    return Err(GameError::CellOccupied { row, col });
                }
                self.state.arena.swap(from, pos);
                self.events.push(GameEvent::UnitsSwapped { a: from, b: pos });
            }
            None => {
                self.state.remove_from_locations(unit);
                let _placed = self.state.arena.place(unit, pos);
                debug_assert!(_placed);
                self.events.push(GameEvent::UnitPlaced { unit, at: pos });
            }
        }

        run_combine(&mut self.state, &mut self.events);
        Ok(())
    }

    /// Return a player unit to a specific empty bench slot.
    pub fn place_on_bench(&mut self, unit: UnitId, slot: usize) -> GameResult<()> {
        self.require_preparation()?;
        if slot >= BENCH_SIZE {
            return Err(GameError::InvalidBenchSlot { slot });
        }
        let moving = self.state.unit(unit).ok_or(GameError::UnknownUnit)?;
        if moving.is_enemy {
            return Err(GameError::NotPlayerUnit);
        }
        if self.state.bench[slot] == Some(unit) {
            return Ok(());
        }
        if self.state.bench[slot].is_some() {
            return Err(GameError::BenchSlotOccupied { slot });
        }

        self.state.remove_from_locations(unit);
        self.state.bench[slot] = Some(unit);
        self.events.push(GameEvent::UnitBenched { unit, slot });
        run_combine(&mut self.state, &mut self.events);
        Ok(())
    }

    /// Exchange the player units on two occupied arena cells.
    pub fn swap_units(&mut self, a: Pos, b: Pos) -> GameResult<()> {
        self.require_preparation()?;
        for pos in [a, b] {
            if !Arena::in_bounds(pos) {
                return Err(GameError::OutOfBounds {
                    row: pos.row,
                    col: pos.col,
                });
            }
        }
        for pos in [a, b] {
            let id = self.state.arena.unit_at(pos).ok_or(GameError::EmptyCell {
                row: pos.row,
                col: pos.col,
            })?;
            if self.state.unit(id).is_some_and(|unit| unit.is_enemy) {
                return Err(GameError::NotPlayerUnit);
            }
        }

        self.state.arena.swap(a, b);
        self.events.push(GameEvent::UnitsSwapped { a, b });
        run_combine(&mut self.state, &mut self.events);
        Ok(())
    }

    /// Sell a player unit for half its cost (minimum 1 gold).
    pub fn sell_unit(&mut self, unit: UnitId) -> GameResult<()> {
        self.require_preparation()?;
        let selling = self.state.unit(unit).ok_or(GameError::UnknownUnit)?;
        if selling.is_enemy {
            return Err(GameError::NotPlayerUnit);
        }
        let (kind, tier) = (selling.kind, selling.tier);
        let price = (selling.cost / 2).max(1);

        self.state.remove_from_locations(unit);
        self.state.units.remove(&unit);
        self.state.gold += price;

        log::debug!(
            "sell_unit: {:?} (tier {} {}) for {} gold",
            unit,
            tier,
            kind.name(),
            price
        );
        self.events.push(GameEvent::UnitSold {
            unit,
            kind,
            tier,
            price,
        });
        run_combine(&mut self.state, &mut self.events);
        Ok(())
    }

    /// Regenerate all shop offers for a fixed gold cost.
    pub fn refresh_shop(&mut self) -> GameResult<()> {
        self.require_preparation()?;
        if self.state.gold < REFRESH_COST {
            return Err(GameError::NotEnoughGold {
                have: self.state.gold,
                need: REFRESH_COST,
            });
        }
        self.state.gold -= REFRESH_COST;
        self.restock_shop();
        self.events.push(GameEvent::ShopRefreshed);
        Ok(())
    }

    // ==========================================
    // BATTLE & ROUND FLOW
    // ==========================================

    /// Snapshot the deployed units and run the battle to completion.
    pub fn start_battle(&mut self) -> GameResult<BattleOutcome> {
        self.require_preparation()?;
        let fighters = self.state.arena_player_units();
        if fighters.is_empty() {
            return Err(GameError::NoUnitsDeployed);
        }

        self.state.phase = GamePhase::Battle;
        self.events.push(GameEvent::PhaseChanged {
            phase: GamePhase::Battle,
        });
        log::info!(
            "battle: round {} with {} player units",
            self.state.round,
            fighters.len()
        );
        self.state.fighters = fighters;

        // Everyone on the grid starts the battle at full strength.
        let ids: Vec<UnitId> = self.state.arena.iter().map(|(_, id)| id).collect();
        for id in ids {
            if let Some(unit) = self.state.unit_mut(id) {
                unit.reset_for_battle();
            }
        }

        let outcome = resolve_battle(&mut self.state, &mut self.rng, &mut self.events);
        self.finish_battle(outcome);
        Ok(outcome)
    }

    fn finish_battle(&mut self, outcome: BattleOutcome) {
        self.state.phase = GamePhase::Results;
        self.events.push(GameEvent::PhaseChanged {
            phase: GamePhase::Results,
        });

        let (gold_reward, health_loss) = match outcome {
            BattleOutcome::Victory => (2 + self.state.round / 2, 0),
            BattleOutcome::Defeat => (0, 10 + self.state.round / 2),
        };
        self.state.gold += gold_reward;
        self.state.health = (self.state.health - health_loss).max(0);

        log::info!(
            "battle over: {:?}, gold +{}, health -{}",
            outcome,
            gold_reward,
            health_loss
        );
        self.events.push(GameEvent::BattleEnded {
            outcome,
            gold_reward,
            health_loss,
        });

        if self.state.health == 0 {
            self.state.phase = GamePhase::Eliminated;
            self.events.push(GameEvent::PhaseChanged {
                phase: GamePhase::Eliminated,
            });
        }
    }

    /// Advance to the next round's preparation phase.
    pub fn next_round(&mut self) -> GameResult<()> {
        if self.state.phase != GamePhase::Results {
            return Err(GameError::WrongPhase);
        }
        self.state.round += 1;
        self.state.gold += 1;
        self.state.phase = GamePhase::Preparation;

        // Resurrect everyone who fought and bring them home to reposition;
        // the arena is wiped wholesale, corpses included.
        let fighters = std::mem::take(&mut self.state.fighters);
        for &id in &fighters {
            if let Some(unit) = self.state.unit_mut(id) {
                unit.reset_for_battle();
            }
        }
        self.state.arena.clear();
        for &id in &fighters {
            if !self.state.bench_unit(id) {
                // Bench overflow drops the unit.
                self.state.units.remove(&id);
                log::debug!("next_round: bench full, {:?} dropped", id);
            }
        }

        run_combine(&mut self.state, &mut self.events);
        generate_enemy_team(&mut self.state, &mut self.rng);
        self.restock_shop();

        self.events.push(GameEvent::PhaseChanged {
            phase: GamePhase::Preparation,
        });
        self.events.push(GameEvent::RoundStarted {
            round: self.state.round,
        });
        log::info!("round {} begins", self.state.round);
        Ok(())
    }

    // ==========================================
    // QUERIES
    // ==========================================

    pub fn gold(&self) -> i32 {
        self.state.gold
    }

    pub fn health(&self) -> i32 {
        self.state.health
    }

    pub fn round(&self) -> i32 {
        self.state.round
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Read access to the full state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Snapshot for a presentation layer.
    pub fn view(&self) -> GameView {
        GameView::from_state(&self.state)
    }

    /// Take all events accumulated since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    fn require_preparation(&self) -> GameResult<()> {
        if self.state.phase != GamePhase::Preparation {
            return Err(GameError::WrongPhase);
        }
        Ok(())
    }

    fn restock_shop(&mut self) {
        let mut offers = Vec::with_capacity(SHOP_SIZE);
        for _ in 0..SHOP_SIZE {
            offers.push(self.state.factory.shop_offer(&mut self.rng));
        }
        self.state.shop = offers;
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}
