use serde::{Deserialize, Serialize};
use tracing::debug;

use super::acting_city;
use crate::actions::action::{Action, Command, Subject};
use crate::actors::{UnitStatus, UnitType};
use crate::core::{ActorId, GameError, Result};
use crate::game::GameState;

/// Train a land unit on the city centre. The unit cannot act this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spawn {
    pub city: ActorId,
    pub unit_type: UnitType,
}

impl Spawn {
    #[must_use]
    pub fn variants(gs: &GameState, city: ActorId) -> Vec<Action> {
        UnitType::TRAINABLE
            .into_iter()
            .map(|unit_type| Spawn { city, unit_type })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for Spawn {
    fn subject(&self) -> Subject {
        Subject::Actor(self.city)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        if !UnitType::TRAINABLE.contains(&self.unit_type) {
            return false;
        }
        let Some((city, tribe)) = acting_city(gs, self.city) else {
            return false;
        };
        let stats = self.unit_type.stats();
        if !tribe.can_afford(stats.cost) {
            return false;
        }
        if let Some(tech) = stats.tech {
            if !tribe.tech.is_researched(tech) {
                return false;
            }
        }
        city.has_unit_room() && gs.board().unit_at(city.position).ok() == Some(None)
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let (tribe, position) = {
            let city = gs.city_ref(self.city)?;
            (city.tribe, city.position)
        };
        let cost = self.unit_type.stats().cost;
        if !gs.tribe_mut(tribe)?.spend(cost) {
            return Err(GameError::InconsistentState(format!(
                "{tribe} cannot pay for {:?}",
                self.unit_type
            )));
        }
        let unit = gs.add_unit(
            self.unit_type,
            tribe,
            position,
            Some(self.city),
            UnitStatus::Finished,
        )?;
        debug!(city = %self.city, %unit, kind = ?self.unit_type, "unit trained");
        Ok(())
    }
}
