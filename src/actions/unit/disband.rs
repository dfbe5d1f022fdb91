use serde::{Deserialize, Serialize};

use super::acting_unit;
use crate::actions::action::{Action, Command, Subject};
use crate::actors::Unit;
use crate::core::{ActorId, Result, Technology};
use crate::game::GameState;

/// Dismiss a unit for half its training cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disband {
    pub unit: ActorId,
}

impl Disband {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let disband = Disband { unit };
        if disband.is_feasible(gs) {
            vec![Action::from(disband)]
        } else {
            Vec::new()
        }
    }

    /// Naval units refund what their embarked land unit cost.
    fn refund(unit: &Unit) -> u32 {
        let kind = unit.land_type.unwrap_or(unit.kind);
        kind.stats().cost / 2
    }
}

impl Command for Disband {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        acting_unit(gs, self.unit)
            .map_or(false, |(_, tribe)| tribe.tech.is_researched(Technology::FreeSpirit))
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let unit = gs.remove_unit(self.unit)?;
        gs.tribe_mut(unit.tribe)?.add_stars(Self::refund(&unit));
        Ok(())
    }
}
