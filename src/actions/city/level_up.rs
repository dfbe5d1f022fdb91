//! Levelling a city and claiming its bonus.
//!
//! A city whose population reached its capacity may level up. The action
//! carries the chosen [`CityBonus`]; each level offers two.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::acting_city;
use crate::actions::action::{Action, Command, Subject};
use crate::actors::{CityBonus, UnitStatus, UnitType};
use crate::core::constants::{
    CITY_LEVEL_POINTS, EXPLORER_RADIUS, PARK_POINTS, POP_GROWTH_BONUS, RESOURCES_BONUS_STARS,
    WORKSHOP_PRODUCTION,
};
use crate::core::{ActorId, Result};
use crate::game::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelUp {
    pub city: ActorId,
    pub bonus: CityBonus,
}

impl LevelUp {
    #[must_use]
    pub fn variants(gs: &GameState, city: ActorId) -> Vec<Action> {
        let Some((c, _)) = acting_city(gs, city) else {
            return Vec::new();
        };
        if !c.can_level_up() {
            return Vec::new();
        }
        CityBonus::options(c.level + 1)
            .into_iter()
            .map(|bonus| LevelUp { city, bonus })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for LevelUp {
    fn subject(&self) -> Subject {
        Subject::Actor(self.city)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((city, _)) = acting_city(gs, self.city) else {
            return false;
        };
        if !city.can_level_up()
            || !CityBonus::options(city.level.saturating_add(1)).contains(&self.bonus)
        {
            return false;
        }
        match self.bonus {
            CityBonus::Superunit => gs.board().unit_at(city.position).ok() == Some(None),
            _ => true,
        }
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let (tribe, position, level) = {
            let city = gs.city_mut(self.city)?;
            city.level = city.level.saturating_add(1);
            city.population = 0;
            city.production += 1;
            (city.tribe, city.position, city.level)
        };
        gs.tribe_mut(tribe)?
            .add_score(CITY_LEVEL_POINTS * u32::from(level));

        match self.bonus {
            CityBonus::Workshop => gs.city_mut(self.city)?.production += WORKSHOP_PRODUCTION,
            CityBonus::Explorer => gs.board.reveal(tribe, position, EXPLORER_RADIUS)?,
            CityBonus::CityWall => gs.city_mut(self.city)?.has_walls = true,
            CityBonus::Resources => gs.tribe_mut(tribe)?.add_stars(RESOURCES_BONUS_STARS),
            CityBonus::PopulationGrowth => {
                gs.city_mut(self.city)?.add_population(POP_GROWTH_BONUS);
            }
            CityBonus::BorderGrowth => {
                gs.city_mut(self.city)?.bound += 1;
                gs.claim_tiles(self.city)?;
            }
            CityBonus::Park => gs.tribe_mut(tribe)?.add_score(PARK_POINTS),
            CityBonus::Superunit => {
                gs.add_unit(
                    UnitType::Superunit,
                    tribe,
                    position,
                    Some(self.city),
                    UnitStatus::Finished,
                )?;
            }
        }
        debug!(city = %self.city, level, bonus = ?self.bonus, "city levelled up");
        Ok(())
    }
}
