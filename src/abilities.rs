//! Special abilities, one per unit kind.
//!
//! Abilities are dispatched as tagged variants rather than a closure table,
//! each exposing one `apply(actor, opposing, state)` operation, which keeps
//! the table data-driven and testable away from the turn loop. Abilities
//! never move units and never cost an action beyond the one already budgeted.

use crate::battle::targets_in_range;
use crate::events::GameEvent;
use crate::state::GameState;
use crate::types::{UnitId, UnitKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    /// Knight: one in-range target takes 1.5x attack.
    BurstStrike,
    /// Archer: up to three in-range targets take 0.7x attack each.
    Volley,
    /// Mage: every living opposing unit takes 0.8x attack, range ignored.
    AreaBlast,
    /// Tank: self-heal 15 per tier, clamped to max health.
    SelfSustain,
    /// Assassin: the furthest in-range target takes 2x attack.
    Execute,
}

impl Ability {
    /// The ability for a unit kind; the mapping is total.
    pub fn of(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Knight => Ability::BurstStrike,
            UnitKind::Archer => Ability::Volley,
            UnitKind::Mage => Ability::AreaBlast,
            UnitKind::Tank => Ability::SelfSustain,
            UnitKind::Assassin => Ability::Execute,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::BurstStrike => "Burst Strike",
            Ability::Volley => "Volley",
            Ability::AreaBlast => "Area Blast",
            Ability::SelfSustain => "Self-Sustain",
            Ability::Execute => "Execute",
        }
    }

    /// Apply side effects against the opposing side.
    ///
    /// Ability damage clamps health at 0 but leaves the victim on the grid;
    /// only regular attacks clear the cell.
    pub fn apply(
        &self,
        actor: UnitId,
        opponents: &[UnitId],
        state: &mut GameState,
        events: &mut Vec<GameEvent>,
    ) {
        match self {
            Ability::BurstStrike => {
                let targets = targets_in_range(state, actor, opponents);
                if let Some(&target) = targets.first() {
                    let damage = scaled_damage(state, actor, 1.5);
                    deal_ability_damage(state, actor, target, damage, events);
                }
            }
            Ability::Volley => {
                let targets = targets_in_range(state, actor, opponents);
                let damage = scaled_damage(state, actor, 0.7);
                for &target in targets.iter().take(3) {
                    deal_ability_damage(state, actor, target, damage, events);
                }
            }
            Ability::AreaBlast => {
                let damage = scaled_damage(state, actor, 0.8);
                let living: Vec<UnitId> = opponents
                    .iter()
                    .copied()
                    .filter(|&id| state.unit(id).is_some_and(|unit| unit.is_alive()))
                    .collect();
                for target in living {
                    deal_ability_damage(state, actor, target, damage, events);
                }
            }
            Ability::SelfSustain => {
                let Some(unit) = state.unit_mut(actor) else {
                    return;
                };
                let amount = 15 * unit.tier;
                unit.heal(amount);
                let health = unit.health;
                events.push(GameEvent::UnitHealed {
                    unit: actor,
                    amount,
                    health,
                });
            }
            Ability::Execute => {
                let Some(actor_pos) = state.arena.position_of(actor) else {
                    return;
                };
                let Some(unit) = state.unit(actor) else { return };
                let (attack, range) = (unit.attack, unit.range);

                let mut furthest = None;
                let mut max_distance = 0;
                for &target_id in opponents {
                    let Some(target) = state.unit(target_id) else {
                        continue;
                    };
                    if !target.is_alive() {
                        continue;
                    }
                    let Some(target_pos) = state.arena.position_of(target_id) else {
                        continue;
                    };
                    let distance = actor_pos.distance(&target_pos);
                    if distance > max_distance && distance <= range {
                        max_distance = distance;
                        furthest = Some(target_id);
                    }
                }

                if let Some(target) = furthest {
                    deal_ability_damage(state, actor, target, attack * 2, events);
                }
            }
        }
    }
}

fn scaled_damage(state: &GameState, actor: UnitId, factor: f64) -> i32 {
    let attack = state.unit(actor).map_or(0, |unit| unit.attack);
    (attack as f64 * factor).floor() as i32
}

fn deal_ability_damage(
    state: &mut GameState,
    actor: UnitId,
    target_id: UnitId,
    damage: i32,
    events: &mut Vec<GameEvent>,
) {
    let Some(target) = state.unit_mut(target_id) else {
        return;
    };
    target.take_damage(damage);
    events.push(GameEvent::DamageDealt {
        source: actor,
        target: target_id,
        amount: damage,
        remaining_health: target.health,
    });
}
