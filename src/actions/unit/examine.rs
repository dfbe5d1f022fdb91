use serde::{Deserialize, Serialize};
use tracing::debug;

use super::acting_unit;
use crate::actions::action::{Action, Command, Subject};
use crate::actors::UnitStatus;
use crate::core::constants::{EXAMINE_POPULATION, EXAMINE_REVEAL_RADIUS, EXAMINE_STARS};
use crate::core::{ActorId, Resource, Result, Technology, TribeId};
use crate::game::GameState;

/// What exploring ruins can yield. Drawn uniformly from the game RNG.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuinsReward {
    Stars,
    Population,
    Research,
    Explorer,
}

impl RuinsReward {
    pub const ALL: [RuinsReward; 4] = [
        RuinsReward::Stars,
        RuinsReward::Population,
        RuinsReward::Research,
        RuinsReward::Explorer,
    ];
}

/// Explore the ruins under the unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Examine {
    pub unit: ActorId,
}

impl Examine {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let examine = Examine { unit };
        if examine.is_feasible(gs) {
            vec![Action::from(examine)]
        } else {
            Vec::new()
        }
    }
}

impl Command for Examine {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((unit, _)) = acting_unit(gs, self.unit) else {
            return false;
        };
        !unit.status.is_finished()
            && gs.board().resource_at(unit.position).ok().flatten() == Some(Resource::Ruins)
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let (tribe, position, home) = {
            let u = gs.unit_ref(self.unit)?;
            (u.tribe, u.position, u.city)
        };
        let reward = *gs
            .rng_mut()
            .choose(&RuinsReward::ALL)
            .unwrap_or(&RuinsReward::Stars);

        gs.board.set_resource(position, None)?;
        match reward {
            RuinsReward::Stars => gs.tribe_mut(tribe)?.add_stars(EXAMINE_STARS),
            RuinsReward::Population => {
                let city = home
                    .filter(|c| gs.city(*c).map_or(false, |c| c.tribe == tribe))
                    .or_else(|| owned_capital(gs, tribe));
                match city {
                    Some(city) => gs.city_mut(city)?.add_population(EXAMINE_POPULATION),
                    None => gs.tribe_mut(tribe)?.add_stars(EXAMINE_STARS),
                }
            }
            RuinsReward::Research => {
                let open: Vec<Technology> = {
                    let tree = &gs.tribe_ref(tribe)?.tech;
                    Technology::ALL
                        .into_iter()
                        .filter(|t| tree.can_research(*t))
                        .collect()
                };
                match gs.rng_mut().choose(&open).copied() {
                    Some(tech) => {
                        gs.tribe_mut(tribe)?.tech.research(tech);
                    }
                    None => gs.tribe_mut(tribe)?.add_stars(EXAMINE_STARS),
                }
            }
            RuinsReward::Explorer => gs.board.reveal(tribe, position, EXAMINE_REVEAL_RADIUS)?,
        }
        gs.unit_mut(self.unit)?.status = UnitStatus::Finished;
        debug!(unit = %self.unit, %position, ?reward, "ruins examined");
        Ok(())
    }
}

fn owned_capital(gs: &GameState, tribe: TribeId) -> Option<ActorId> {
    gs.tribe(tribe)?
        .capital
        .filter(|c| gs.city(*c).map_or(false, |c| c.tribe == tribe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::setup::GameBuilder;

    fn ruins_game(seed: u64) -> (GameState, ActorId) {
        let t0 = TribeId::new(0);
        let gs = GameBuilder::new(8)
            .with_capital(t0, Position::new(1, 1))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .with_resource(Position::new(2, 2), Resource::Ruins)
            .with_unit(t0, crate::actors::UnitType::Warrior, Position::new(2, 2))
            .build(seed)
            .unwrap();
        let unit = gs.board().unit_at(Position::new(2, 2)).unwrap().unwrap();
        (gs, unit)
    }

    #[test]
    fn test_examine_consumes_ruins() {
        let (mut gs, unit) = ruins_game(21);
        let before = gs.tribe(TribeId::new(0)).unwrap().clone();
        assert!(Examine { unit }.execute(&mut gs).unwrap());
        assert_eq!(gs.board().resource_at(Position::new(2, 2)).unwrap(), None);
        assert_eq!(gs.unit(unit).unwrap().status, UnitStatus::Finished);
        assert!(!Examine { unit }.is_feasible(&gs));

        let after = gs.tribe(TribeId::new(0)).unwrap();
        let city = gs.city(after.capital.unwrap()).unwrap();
        let rewarded = after.stars() > before.stars()
            || city.population > 0
            || after.tech.researched_count() > before.tech.researched_count()
            || gs.board().observed_count(TribeId::new(0)) > 16;
        assert!(rewarded);
    }

    #[test]
    fn test_copies_draw_the_same_reward() {
        let (mut gs, unit) = ruins_game(5);
        let mut copy = gs.copy();
        assert!(Examine { unit }.execute(&mut gs).unwrap());
        assert!(Examine { unit }.execute(&mut copy).unwrap());
        assert_eq!(gs.snapshot().unwrap(), copy.snapshot().unwrap());
    }
}
