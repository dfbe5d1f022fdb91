use serde::{Deserialize, Serialize};

use super::{acting_unit, adjacent_friends};
use crate::actions::action::{Action, Command, Subject};
use crate::actors::UnitStatus;
use crate::core::constants::{HEAL_OTHERS_HP, RECOVER_HP, RECOVER_HP_IN_TERRITORY};
use crate::core::{ActorId, Result};
use crate::game::GameState;

/// A mind bender heals every wounded friendly unit next to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealOthers {
    pub unit: ActorId,
}

impl HealOthers {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let heal = HealOthers { unit };
        if heal.is_feasible(gs) {
            vec![Action::from(heal)]
        } else {
            Vec::new()
        }
    }
}

impl Command for HealOthers {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((unit, _)) = acting_unit(gs, self.unit) else {
            return false;
        };
        unit.kind.is_mind_bender()
            && unit.status.can_move()
            && adjacent_friends(gs, unit.tribe, unit.position).any(|u| u.hp < u.max_hp)
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let (tribe, position) = {
            let u = gs.unit_ref(self.unit)?;
            (u.tribe, u.position)
        };
        let patients: Vec<ActorId> = adjacent_friends(gs, tribe, position)
            .map(|u| u.id)
            .collect();
        for id in patients {
            gs.unit_mut(id)?.heal(HEAL_OTHERS_HP);
        }
        gs.unit_mut(self.unit)?.status = UnitStatus::Finished;
        Ok(())
    }
}

/// Rest for a turn to regain health; faster inside own borders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recover {
    pub unit: ActorId,
}

impl Recover {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let recover = Recover { unit };
        if recover.is_feasible(gs) {
            vec![Action::from(recover)]
        } else {
            Vec::new()
        }
    }
}

impl Command for Recover {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        acting_unit(gs, self.unit)
            .map_or(false, |(u, _)| u.status.can_move() && u.hp < u.max_hp)
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let (tribe, position) = {
            let u = gs.unit_ref(self.unit)?;
            (u.tribe, u.position)
        };
        let at_home = gs
            .board()
            .city_at(position)?
            .and_then(|c| gs.city(c))
            .map_or(false, |c| c.tribe == tribe);
        let amount = if at_home {
            RECOVER_HP_IN_TERRITORY
        } else {
            RECOVER_HP
        };
        let unit = gs.unit_mut(self.unit)?;
        unit.heal(amount);
        unit.status = UnitStatus::Finished;
        Ok(())
    }
}
