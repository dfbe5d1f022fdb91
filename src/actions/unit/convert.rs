use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{acting_unit, observed};
use crate::actions::action::{Action, Command, Subject};
use crate::actors::UnitStatus;
use crate::core::{ActorId, Result};
use crate::game::GameState;

/// A mind bender turns an enemy unit within range to its own tribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Convert {
    pub unit: ActorId,
    pub target: ActorId,
}

impl Convert {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let Some((u, _)) = acting_unit(gs, unit) else {
            return Vec::new();
        };
        if !u.kind.is_mind_bender() || !u.status.can_attack() {
            return Vec::new();
        }
        gs.units()
            .filter(|t| t.tribe != u.tribe)
            .map(|t| Convert {
                unit,
                target: t.id,
            })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for Convert {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((unit, _)) = acting_unit(gs, self.unit) else {
            return false;
        };
        if !unit.kind.is_mind_bender() || !unit.status.can_attack() {
            return false;
        }
        gs.unit(self.target).map_or(false, |target| {
            target.tribe != unit.tribe
                && unit.position.distance(target.position) <= unit.range()
                && observed(gs, unit.tribe, target.position)
        })
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let tribe = gs.unit_ref(self.unit)?.tribe;
        gs.make_homeless(self.target)?;
        let target = gs.unit_mut(self.target)?;
        let previous = target.tribe;
        target.tribe = tribe;
        target.status = UnitStatus::Finished;
        gs.unit_mut(self.unit)?.status = UnitStatus::Finished;
        gs.tribe_mut(tribe)?.attacked_this_turn = true;
        debug!(unit = %self.unit, target = %self.target, from = %previous, "unit converted");
        Ok(())
    }
}
