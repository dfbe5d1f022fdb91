use serde::{Deserialize, Serialize};

use super::{acting_city, city_tiles, owned_tile};
use crate::actions::action::{Action, Command, Subject};
use crate::core::constants::{RESOURCE_GATHER_COST, RESOURCE_POPULATION, WHALES_STARS};
use crate::core::{ActorId, GameError, Position, Resource, Result};
use crate::game::GameState;

/// Harvest fish, fruit, animals or whales from a city tile.
///
/// Harvesting consumes the resource: fish, fruit and animals feed the city,
/// whales pay stars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceGathering {
    pub city: ActorId,
    pub position: Position,
}

impl ResourceGathering {
    #[must_use]
    pub fn variants(gs: &GameState, city: ActorId) -> Vec<Action> {
        match acting_city(gs, city) {
            Some((_, tribe)) if tribe.can_afford(RESOURCE_GATHER_COST) => {}
            _ => return Vec::new(),
        }
        city_tiles(gs, city)
            .into_iter()
            .map(|position| ResourceGathering { city, position })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for ResourceGathering {
    fn subject(&self) -> Subject {
        Subject::Actor(self.city)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((_, tribe)) = acting_city(gs, self.city) else {
            return false;
        };
        if !tribe.can_afford(RESOURCE_GATHER_COST) {
            return false;
        }
        let Some(tile) = owned_tile(gs, self.city, self.position) else {
            return false;
        };
        match tile.resource.and_then(Resource::gathering_tech) {
            Some(tech) => tile.building.is_none() && tribe.tech.is_researched(tech),
            None => false,
        }
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let resource = gs.board().resource_at(self.position)?.ok_or_else(|| {
            GameError::InconsistentState(format!("nothing to gather at {}", self.position))
        })?;
        let tribe = gs.city_ref(self.city)?.tribe;
        if !gs.tribe_mut(tribe)?.spend(RESOURCE_GATHER_COST) {
            return Err(GameError::InconsistentState(format!(
                "{tribe} cannot pay for gathering"
            )));
        }
        gs.board.set_resource(self.position, None)?;
        match resource {
            Resource::Whales => gs.tribe_mut(tribe)?.add_stars(WHALES_STARS),
            _ => gs.city_mut(self.city)?.add_population(RESOURCE_POPULATION),
        }
        Ok(())
    }
}
