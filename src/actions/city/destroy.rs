use serde::{Deserialize, Serialize};

use super::{acting_city, city_tiles, owned_tile};
use crate::actions::action::{Action, Command, Subject};
use crate::core::{ActorId, Building, BuildingBonus, GameError, Position, Result, Technology};
use crate::game::GameState;

/// Tear down a non-monument building, undoing what it gave the city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Destroy {
    pub city: ActorId,
    pub position: Position,
}

impl Destroy {
    #[must_use]
    pub fn variants(gs: &GameState, city: ActorId) -> Vec<Action> {
        if acting_city(gs, city).is_none() {
            return Vec::new();
        }
        city_tiles(gs, city)
            .into_iter()
            .map(|position| Destroy { city, position })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for Destroy {
    fn subject(&self) -> Subject {
        Subject::Actor(self.city)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((_, tribe)) = acting_city(gs, self.city) else {
            return false;
        };
        if !tribe.tech.is_researched(Technology::Construction) {
            return false;
        }
        owned_tile(gs, self.city, self.position)
            .and_then(|tile| tile.building)
            .map_or(false, |b| !b.is_monument())
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let tile = gs.board().tile(self.position)?;
        let building = tile.building.ok_or_else(|| {
            GameError::InconsistentState(format!("no building at {}", self.position))
        })?;
        let production = tile.production;
        let tribe = gs.city_ref(self.city)?.tribe;
        let board = gs.board();
        let neighbours = self.position.neighborhood(1, board.size());
        let adjacent = |kind: Building| {
            neighbours
                .iter()
                .filter(|p| board.building_at(**p).ok().flatten() == Some(kind))
                .count() as u32
        };
        let population = match building.spec().bonus {
            BuildingBonus::Population(n) => n,
            BuildingBonus::PopulationPerAdjacent(kind, n) => n * adjacent(kind),
            BuildingBonus::ProductionPerAdjacent(..) | BuildingBonus::None => 0,
        };

        gs.board.set_building(self.position, None)?;
        let city = gs.city_mut(self.city)?;
        city.remove_population(population);
        city.production = city.production.saturating_sub(production);

        // Neighbours that counted this building lose their share of it.
        for p in neighbours {
            let tile = gs.board().tile(p)?;
            let (Some(existing), Some(owner)) = (tile.building, tile.city) else {
                continue;
            };
            if gs.city(owner).is_none() {
                continue;
            }
            match existing.spec().bonus {
                BuildingBonus::PopulationPerAdjacent(kind, n) if kind == building => {
                    gs.city_mut(owner)?.remove_population(n);
                }
                BuildingBonus::ProductionPerAdjacent(kind, n) if kind == building => {
                    let taken = n.min(tile.production);
                    let remaining = tile.production - taken;
                    gs.board.set_production(p, remaining)?;
                    let c = gs.city_mut(owner)?;
                    c.production = c.production.saturating_sub(taken);
                }
                _ => {}
            }
        }

        if building == Building::Port {
            gs.board.set_trade_network(self.position, false)?;
            gs.update_trade_network(tribe)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Build;
    use crate::core::{Resource, Terrain, TribeId};
    use crate::setup::GameBuilder;

    #[test]
    fn test_destroy_reverts_population() {
        let t0 = TribeId::new(0);
        let mut gs = GameBuilder::new(8)
            .with_capital(t0, Position::new(2, 2))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .with_resource(Position::new(1, 1), Resource::Crops)
            .with_tech(t0, Technology::Farming)
            .with_tech(t0, Technology::Construction)
            .with_stars(t0, 20)
            .build(3)
            .unwrap();
        let city = gs.tribe(t0).unwrap().capital.unwrap();
        let farm = Build {
            city,
            building: Building::Farm,
            position: Position::new(1, 1),
        };
        assert!(farm.execute(&mut gs).unwrap());
        assert_eq!(gs.city(city).unwrap().population, 2);

        let variants = Destroy::variants(&gs, city);
        assert_eq!(variants.len(), 1);

        let destroy = Destroy {
            city,
            position: Position::new(1, 1),
        };
        assert!(destroy.execute(&mut gs).unwrap());
        assert_eq!(gs.board().building_at(Position::new(1, 1)).unwrap(), None);
        assert_eq!(gs.city(city).unwrap().population, 0);
        assert!(!destroy.is_feasible(&gs));
    }

    #[test]
    fn test_port_and_custom_house_cycle_returns_production() {
        let t0 = TribeId::new(0);
        let port_at = Position::new(2, 3);
        let house_at = Position::new(1, 3);
        let mut gs = GameBuilder::new(8)
            .with_capital(t0, Position::new(2, 2))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .with_terrain(port_at, Terrain::ShallowWater)
            .with_tech(t0, Technology::Fishing)
            .with_tech(t0, Technology::Trade)
            .with_tech(t0, Technology::Construction)
            .with_stars(t0, 100)
            .build(3)
            .unwrap();
        let city = gs.tribe(t0).unwrap().capital.unwrap();
        let base = gs.city(city).unwrap().production;
        assert_eq!(base, 1);

        for _ in 0..3 {
            let port = Build {
                city,
                building: Building::Port,
                position: port_at,
            };
            let house = Build {
                city,
                building: Building::CustomHouse,
                position: house_at,
            };
            assert!(port.execute(&mut gs).unwrap());
            assert!(house.execute(&mut gs).unwrap());
            assert_eq!(gs.city(city).unwrap().production, base + 2);

            // Port first: the custom house keeps its tile but loses the credit
            let destroy_port = Destroy {
                city,
                position: port_at,
            };
            assert!(destroy_port.execute(&mut gs).unwrap());
            assert_eq!(gs.city(city).unwrap().production, base);
            assert_eq!(gs.board().tile(house_at).unwrap().production, 0);

            let destroy_house = Destroy {
                city,
                position: house_at,
            };
            assert!(destroy_house.execute(&mut gs).unwrap());
            assert_eq!(gs.city(city).unwrap().production, base);
        }
    }

    #[test]
    fn test_port_built_after_custom_house_is_reverted() {
        let t0 = TribeId::new(0);
        let mut gs = GameBuilder::new(8)
            .with_capital(t0, Position::new(2, 2))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .with_terrain(Position::new(2, 3), Terrain::ShallowWater)
            .with_terrain(Position::new(3, 3), Terrain::ShallowWater)
            .with_tech(t0, Technology::Fishing)
            .with_tech(t0, Technology::Trade)
            .with_tech(t0, Technology::Construction)
            .with_stars(t0, 100)
            .build(3)
            .unwrap();
        let city = gs.tribe(t0).unwrap().capital.unwrap();
        for (building, x, y) in [
            (Building::Port, 2, 3),
            (Building::CustomHouse, 1, 2),
            (Building::Port, 3, 3),
        ] {
            let build = Build {
                city,
                building,
                position: Position::new(x, y),
            };
            assert!(build.execute(&mut gs).unwrap());
        }
        // Only (2, 3) touches the custom house at (1, 2)
        assert_eq!(gs.city(city).unwrap().production, 3);

        let far_port = Destroy {
            city,
            position: Position::new(3, 3),
        };
        assert!(far_port.execute(&mut gs).unwrap());
        assert_eq!(gs.city(city).unwrap().production, 3);

        let house = Destroy {
            city,
            position: Position::new(1, 2),
        };
        assert!(house.execute(&mut gs).unwrap());
        assert_eq!(gs.city(city).unwrap().production, 1);
    }
}
