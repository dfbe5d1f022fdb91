use serde::{Deserialize, Serialize};
use tracing::debug;

use super::combat::{defence_bonus, resolve};
use super::{acting_unit, observed};
use crate::actions::action::{Action, Command, Subject};
use crate::actors::UnitStatus;
use crate::core::constants::{VETERAN_HP_BONUS, VETERAN_KILLS};
use crate::core::{ActorId, Result};
use crate::game::GameState;

/// Attack an enemy unit within range. Melee attackers stay where they are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attack {
    pub unit: ActorId,
    pub target: ActorId,
}

impl Attack {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let Some((u, _)) = acting_unit(gs, unit) else {
            return Vec::new();
        };
        if !u.status.can_attack() || u.attack() <= 0.0 {
            return Vec::new();
        }
        gs.units()
            .filter(|t| t.tribe != u.tribe && t.position.distance(u.position) <= u.range())
            .map(|t| Attack {
                unit,
                target: t.id,
            })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for Attack {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((unit, _)) = acting_unit(gs, self.unit) else {
            return false;
        };
        if !unit.status.can_attack() || unit.attack() <= 0.0 {
            return false;
        }
        let Some(target) = gs.unit(self.target) else {
            return false;
        };
        target.tribe != unit.tribe
            && unit.position.distance(target.position) <= unit.range()
            && observed(gs, unit.tribe, target.position)
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let attacker = gs.unit_ref(self.unit)?.clone();
        let defender = gs.unit_ref(self.target)?.clone();
        let outcome = resolve(&attacker, &defender, defence_bonus(gs, &defender));

        gs.tribe_mut(attacker.tribe)?.attacked_this_turn = true;

        let defender_died = gs.unit_mut(self.target)?.take_damage(outcome.damage);
        let mut attacker_died = false;
        if defender_died {
            gs.remove_unit(self.target)?;
            credit_kill(gs, self.unit)?;
        } else if attacker.position.distance(defender.position) <= defender.range() {
            attacker_died = gs.unit_mut(self.unit)?.take_damage(outcome.retaliation);
            if attacker_died {
                gs.remove_unit(self.unit)?;
                credit_kill(gs, self.target)?;
            }
        }
        if !attacker_died {
            gs.unit_mut(self.unit)?.status = UnitStatus::Finished;
        }
        debug!(
            attacker = %self.unit,
            defender = %self.target,
            damage = outcome.damage,
            retaliation = outcome.retaliation,
            defender_died,
            attacker_died,
            "combat resolved"
        );
        Ok(())
    }
}

/// Count a kill for `killer` and its tribe, promoting it when due.
fn credit_kill(gs: &mut GameState, killer: ActorId) -> Result<()> {
    let unit = gs.unit_mut(killer)?;
    unit.kills += 1;
    if unit.promotion_due(VETERAN_KILLS) {
        unit.veteran = true;
        unit.max_hp += VETERAN_HP_BONUS;
        unit.hp = unit.max_hp;
    }
    let tribe = unit.tribe;
    gs.tribe_mut(tribe)?.kills += 1;
    Ok(())
}
