//! Constructing buildings on city tiles.
//!
//! A building's [`BuildingSpec`] lists its constraints. They are checked
//! cheapest first: stars and technology, then the target tile, then the
//! neighbour scan for adjacency and finally the scan over all city tiles
//! for buildings allowed once per city.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{acting_city, city_tiles, owned_tile};
use crate::actions::action::{Action, Command, Subject};
use crate::core::{
    ActorId, Building, BuildingBonus, BuildingSpec, GameError, Position, Result, Uniqueness,
};
use crate::game::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Build {
    pub city: ActorId,
    pub building: Building,
    pub position: Position,
}

impl Build {
    #[must_use]
    pub fn variants(gs: &GameState, city: ActorId) -> Vec<Action> {
        if acting_city(gs, city).is_none() {
            return Vec::new();
        }
        let tiles = city_tiles(gs, city);
        let mut out = Vec::new();
        for building in Building::ALL {
            for &position in &tiles {
                let candidate = Build {
                    city,
                    building,
                    position,
                };
                if candidate.is_feasible(gs) {
                    out.push(Action::from(candidate));
                }
            }
        }
        out
    }

    fn adjacent_count(gs: &GameState, center: Position, kind: Building) -> u32 {
        let board = gs.board();
        center
            .neighborhood(1, board.size())
            .into_iter()
            .filter(|p| board.building_at(*p).ok().flatten() == Some(kind))
            .count() as u32
    }
}

impl Command for Build {
    fn subject(&self) -> Subject {
        Subject::Actor(self.city)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((_, tribe)) = acting_city(gs, self.city) else {
            return false;
        };
        let spec: BuildingSpec = self.building.spec();

        if !tribe.can_afford(spec.cost) {
            return false;
        }
        if let Some(tech) = spec.tech {
            if !tribe.tech.is_researched(tech) {
                return false;
            }
        }
        if spec.uniqueness == Uniqueness::OncePerTribe
            && !tribe.monuments.is_buildable(self.building)
        {
            return false;
        }

        let Some(tile) = owned_tile(gs, self.city, self.position) else {
            return false;
        };
        if tile.building.is_some() || !spec.terrains.contains(&tile.terrain) {
            return false;
        }
        if let Some(resource) = spec.resource {
            if tile.resource != Some(resource) {
                return false;
            }
        }
        let enemy_unit = tile
            .unit
            .and_then(|u| gs.unit(u))
            .map_or(false, |u| u.tribe != tribe.id);
        if enemy_unit {
            return false;
        }

        if let Some(needed) = spec.adjacent {
            if Self::adjacent_count(gs, self.position, needed) == 0 {
                return false;
            }
        }

        if spec.uniqueness == Uniqueness::OncePerCity {
            let board = gs.board();
            let duplicate = board
                .city_tiles(self.city)
                .any(|p| board.building_at(p).ok().flatten() == Some(self.building));
            if duplicate {
                return false;
            }
        }
        true
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let spec = self.building.spec();
        let tribe_id = gs.city_ref(self.city)?.tribe;
        gs.board().tile(self.position)?;

        // Existing special buildings next door profit from the new one.
        let mut neighbour_bonuses: Vec<(Position, ActorId, BuildingBonus)> = Vec::new();
        for p in self.position.neighborhood(1, gs.board().size()) {
            let tile = gs.board().tile(p)?;
            if let (Some(existing), Some(owner)) = (tile.building, tile.city) {
                match existing.spec().bonus {
                    bonus @ (BuildingBonus::PopulationPerAdjacent(kind, _)
                    | BuildingBonus::ProductionPerAdjacent(kind, _))
                        if kind == self.building =>
                    {
                        neighbour_bonuses.push((p, owner, bonus));
                    }
                    _ => {}
                }
            }
        }
        let own_bonus = match spec.bonus {
            BuildingBonus::PopulationPerAdjacent(kind, n) => {
                BuildingBonus::Population(n * Self::adjacent_count(gs, self.position, kind))
            }
            BuildingBonus::ProductionPerAdjacent(kind, n) => {
                BuildingBonus::ProductionPerAdjacent(
                    kind,
                    n * Self::adjacent_count(gs, self.position, kind),
                )
            }
            other => other,
        };

        let tribe = gs.tribe_mut(tribe_id)?;
        if !tribe.spend(spec.cost) {
            return Err(GameError::InconsistentState(format!(
                "{tribe_id} cannot pay for {:?}",
                self.building
            )));
        }
        tribe.add_score(spec.points);
        if self.building.is_monument() && !tribe.monuments.mark_built(self.building) {
            return Err(GameError::InconsistentState(format!(
                "{:?} was not available to {tribe_id}",
                self.building
            )));
        }

        gs.board.set_building(self.position, Some(self.building))?;
        apply_bonus(gs, self.city, own_bonus)?;
        if let BuildingBonus::ProductionPerAdjacent(_, n) = own_bonus {
            gs.board.set_production(self.position, n)?;
        }
        for (position, owner, bonus) in neighbour_bonuses {
            if gs.city(owner).is_none() {
                continue;
            }
            let single = match bonus {
                BuildingBonus::PopulationPerAdjacent(_, n) => BuildingBonus::Population(n),
                other => other,
            };
            apply_bonus(gs, owner, single)?;
            if let BuildingBonus::ProductionPerAdjacent(_, n) = single {
                let recorded = gs.board().tile(position)?.production;
                gs.board.set_production(position, recorded + n)?;
            }
        }

        match self.building {
            Building::Port => {
                gs.board.set_trade_network(self.position, true)?;
                gs.update_trade_network(tribe_id)?;
            }
            Building::EyeOfGod => gs.board.reveal_all(tribe_id)?,
            _ => {}
        }
        debug!(city = %self.city, building = ?self.building, position = %self.position, "built");
        Ok(())
    }
}

/// Credit `bonus` to `city`. Per-adjacent production carries its already
/// multiplied amount.
fn apply_bonus(gs: &mut GameState, city: ActorId, bonus: BuildingBonus) -> Result<()> {
    let c = gs.city_mut(city)?;
    match bonus {
        BuildingBonus::Population(n) => c.add_population(n),
        BuildingBonus::ProductionPerAdjacent(_, n) => c.production += n,
        BuildingBonus::PopulationPerAdjacent(_, n) => c.add_population(n),
        BuildingBonus::None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Resource, Technology, Terrain, TribeId};
    use crate::setup::GameBuilder;

    fn game() -> GameState {
        GameBuilder::new(8)
            .with_capital(TribeId::new(0), Position::new(2, 2))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .with_stars(TribeId::new(0), 50)
            .with_tech(TribeId::new(0), Technology::FreeSpirit)
            .build(11)
            .unwrap()
    }

    fn capital(gs: &GameState) -> ActorId {
        gs.tribe(TribeId::new(0)).unwrap().capital.unwrap()
    }

    #[test]
    fn test_temple_costs_twenty() {
        let mut gs = game();
        let city = capital(&gs);
        let build = Build {
            city,
            building: Building::Temple,
            position: Position::new(2, 3),
        };
        assert!(build.execute(&mut gs).unwrap());
        assert_eq!(gs.tribe(TribeId::new(0)).unwrap().stars(), 30);
        assert_eq!(
            gs.board().building_at(Position::new(2, 3)).unwrap(),
            Some(Building::Temple)
        );
        assert_eq!(gs.tribe(TribeId::new(0)).unwrap().score, 100);
    }

    #[test]
    fn test_insufficient_stars_changes_nothing() {
        let mut gs = game();
        gs.tribe_mut(TribeId::new(0)).unwrap().set_stars(19);
        let before = gs.snapshot().unwrap();
        let build = Build {
            city: capital(&gs),
            building: Building::Temple,
            position: Position::new(2, 3),
        };
        assert!(!build.execute(&mut gs).unwrap());
        assert_eq!(gs.snapshot().unwrap(), before);
    }

    #[test]
    fn test_requires_owned_tile_and_matching_terrain() {
        let mut gs = game();
        let city = capital(&gs);
        let outside = Build {
            city,
            building: Building::Temple,
            position: Position::new(5, 5),
        };
        assert!(!outside.is_feasible(&gs));

        gs.board.set_terrain(Position::new(2, 3), Terrain::Forest).unwrap();
        let forest = Build {
            city,
            building: Building::Temple,
            position: Position::new(2, 3),
        };
        assert!(!forest.is_feasible(&gs));
    }

    #[test]
    fn test_farm_needs_crops_and_windmill_needs_farm() {
        let mut gs = game();
        let city = capital(&gs);
        let t0 = TribeId::new(0);
        for tech in [Technology::Farming, Technology::Construction] {
            gs.tribe_mut(t0).unwrap().tech.research(tech);
        }
        let farm = Build {
            city,
            building: Building::Farm,
            position: Position::new(1, 1),
        };
        assert!(!farm.is_feasible(&gs));
        gs.board
            .set_resource(Position::new(1, 1), Some(Resource::Crops))
            .unwrap();
        assert!(farm.execute(&mut gs).unwrap());
        assert_eq!(gs.city(city).unwrap().population, 2);

        let far_windmill = Build {
            city,
            building: Building::Windmill,
            position: Position::new(3, 3),
        };
        assert!(!far_windmill.is_feasible(&gs));

        let windmill = Build {
            city,
            building: Building::Windmill,
            position: Position::new(1, 2),
        };
        assert!(windmill.execute(&mut gs).unwrap());

        let second = Build {
            city,
            building: Building::Windmill,
            position: Position::new(2, 1),
        };
        assert!(!second.is_feasible(&gs));
    }

    #[test]
    fn test_monument_built_once_per_tribe() {
        let mut gs = game();
        let city = capital(&gs);
        let t0 = TribeId::new(0);
        gs.tribe_mut(t0)
            .unwrap()
            .monuments
            .make_available(Building::EmperorsTomb);

        let first = Build {
            city,
            building: Building::EmperorsTomb,
            position: Position::new(1, 3),
        };
        assert!(first.execute(&mut gs).unwrap());
        assert_eq!(gs.tribe(t0).unwrap().monuments.built_count(), 1);

        let second = Build {
            city,
            building: Building::EmperorsTomb,
            position: Position::new(3, 1),
        };
        assert!(!second.execute(&mut gs).unwrap());
        assert_eq!(gs.tribe(t0).unwrap().monuments.built_count(), 1);
    }

    #[test]
    fn test_variants_are_feasible() {
        let gs = game();
        let variants = Build::variants(&gs, capital(&gs));
        // Temple on each free plain tile of the capital
        assert_eq!(variants.len(), 8);
        assert!(variants.iter().all(|a| a.is_feasible(&gs)));
    }
}
