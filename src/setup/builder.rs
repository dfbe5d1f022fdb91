//! Programmatic game construction.

use std::collections::BTreeMap;

use crate::actors::{UnitStatus, UnitType};
use crate::board::{Board, Tile};
use crate::core::{
    Building, GameConfig, GameError, Position, Resource, Result, Technology, Terrain, TribeId,
};
use crate::game::GameState;
use crate::tribe::{Tribe, TribeKind};

use super::generator::MapGenerator;

/// Builder for a ready-to-play [`GameState`].
///
/// Boards default to plain terrain. Each capital receives its tribe's
/// starting unit, homed in the capital. The game is started before
/// `build` returns, so the first tribe is already active.
///
/// ```
/// use rust_tribes::core::{Position, TribeId};
/// use rust_tribes::setup::GameBuilder;
///
/// let gs = GameBuilder::new(8)
///     .with_capital(TribeId::new(0), Position::new(1, 1))
///     .with_capital(TribeId::new(1), Position::new(6, 6))
///     .build(42)
///     .unwrap();
/// assert_eq!(gs.active_tribe(), Some(TribeId::new(0)));
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    size: usize,
    config: GameConfig,
    tribes: Option<Vec<TribeKind>>,
    map_seed: Option<u64>,
    terrain: BTreeMap<Position, Terrain>,
    resources: BTreeMap<Position, Resource>,
    roads: Vec<Position>,
    cities: Vec<(TribeId, Position, bool)>,
    units: Vec<(TribeId, UnitType, Position)>,
    stars: Vec<(TribeId, u32)>,
    techs: Vec<(TribeId, Technology)>,
    monuments: Vec<(TribeId, Building)>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            config: GameConfig::default(),
            tribes: None,
            map_seed: None,
            terrain: BTreeMap::new(),
            resources: BTreeMap::new(),
            roads: Vec::new(),
            cities: Vec::new(),
            units: Vec::new(),
            stars: Vec::new(),
            techs: Vec::new(),
            monuments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Tribe kinds in turn order. Defaults to as many tribes as the highest
    /// tribe id used (at least two), kinds taken from [`TribeKind::ALL`].
    #[must_use]
    pub fn with_tribes(mut self, kinds: Vec<TribeKind>) -> Self {
        self.tribes = Some(kinds);
        self
    }

    /// Generate terrain, resources, villages and (if none are given)
    /// capitals from `seed`. Explicit overrides still win.
    #[must_use]
    pub fn generated(mut self, seed: u64) -> Self {
        self.map_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_capital(mut self, tribe: TribeId, position: Position) -> Self {
        self.cities.push((tribe, position, true));
        self
    }

    /// An extra city with no starting unit.
    #[must_use]
    pub fn with_city(mut self, tribe: TribeId, position: Position) -> Self {
        self.cities.push((tribe, position, false));
        self
    }

    #[must_use]
    pub fn with_terrain(mut self, position: Position, terrain: Terrain) -> Self {
        self.terrain.insert(position, terrain);
        self
    }

    #[must_use]
    pub fn with_resource(mut self, position: Position, resource: Resource) -> Self {
        self.resources.insert(position, resource);
        self
    }

    #[must_use]
    pub fn with_village(self, position: Position) -> Self {
        self.with_terrain(position, Terrain::Village)
    }

    #[must_use]
    pub fn with_road(mut self, position: Position) -> Self {
        self.roads.push(position);
        self
    }

    /// Override a tribe's starting stars.
    #[must_use]
    pub fn with_stars(mut self, tribe: TribeId, stars: u32) -> Self {
        self.stars.push((tribe, stars));
        self
    }

    /// Research a technology up front, ignoring prerequisites.
    #[must_use]
    pub fn with_tech(mut self, tribe: TribeId, tech: Technology) -> Self {
        self.techs.push((tribe, tech));
        self
    }

    /// An extra homeless land unit, Fresh.
    #[must_use]
    pub fn with_unit(mut self, tribe: TribeId, kind: UnitType, position: Position) -> Self {
        self.units.push((tribe, kind, position));
        self
    }

    #[must_use]
    pub fn with_monument_available(mut self, tribe: TribeId, monument: Building) -> Self {
        self.monuments.push((tribe, monument));
        self
    }

    fn tribe_kinds(&self) -> Result<Vec<TribeKind>> {
        let used = self
            .cities
            .iter()
            .map(|(t, _, _)| t)
            .chain(self.units.iter().map(|(t, _, _)| t))
            .chain(self.stars.iter().map(|(t, _)| t))
            .chain(self.techs.iter().map(|(t, _)| t))
            .chain(self.monuments.iter().map(|(t, _)| t))
            .map(|t| t.index() + 1)
            .max()
            .unwrap_or(0);

        match &self.tribes {
            Some(kinds) if kinds.len() < used => Err(GameError::InvalidParameter(format!(
                "{} tribe kinds given but tribe ids up to {} are used",
                kinds.len(),
                used - 1
            ))),
            Some(kinds) if kinds.is_empty() => {
                Err(GameError::InvalidParameter("no tribes given".into()))
            }
            Some(kinds) => Ok(kinds.clone()),
            None => {
                let count = used.max(2);
                Ok((0..count)
                    .map(|i| TribeKind::ALL[i % TribeKind::ALL.len()])
                    .collect())
            }
        }
    }

    /// Build and start the game. `seed` drives the game's RNG.
    pub fn build(self, seed: u64) -> Result<GameState> {
        if self.size < 2 {
            return Err(GameError::InvalidParameter(format!(
                "board size must be at least 2, got {}",
                self.size
            )));
        }
        let kinds = self.tribe_kinds()?;
        let size = self.size;

        let mut cities = self.cities.clone();
        let mut generated: BTreeMap<Position, Tile> = BTreeMap::new();
        if let Some(map_seed) = self.map_seed {
            if size < 6 {
                return Err(GameError::InvalidParameter(format!(
                    "generated maps need size 6 or more, got {size}"
                )));
            }
            if !cities.iter().any(|(_, _, capital)| *capital) {
                if kinds.len() > 4 {
                    return Err(GameError::InvalidParameter(
                        "generated capitals support at most four tribes".into(),
                    ));
                }
                for (i, pos) in MapGenerator::capital_sites(size, kinds.len())
                    .into_iter()
                    .enumerate()
                {
                    cities.push((TribeId::new(i as u8), pos, true));
                }
            }
            let capitals: Vec<Position> = cities.iter().map(|(_, p, _)| *p).collect();
            for (pos, cell) in MapGenerator::new(map_seed).generate(size, &capitals) {
                let mut tile = Tile::new(cell.terrain);
                tile.resource = cell.resource;
                generated.insert(pos, tile);
            }
        }

        for pos in self
            .terrain
            .keys()
            .chain(self.resources.keys())
            .chain(self.roads.iter())
            .chain(cities.iter().map(|(_, p, _)| p))
            .chain(self.units.iter().map(|(_, _, p)| p))
        {
            if !pos.in_bounds(size) {
                return Err(GameError::OutOfBounds {
                    position: *pos,
                    size,
                });
            }
        }

        let board = Board::from_tiles(size, kinds.len(), |pos| {
            let mut tile = generated.remove(&pos).unwrap_or_default();
            if let Some(terrain) = self.terrain.get(&pos) {
                tile.terrain = *terrain;
            }
            if let Some(resource) = self.resources.get(&pos) {
                tile.resource = Some(*resource);
            }
            tile.road = self.roads.contains(&pos);
            tile
        });

        let mut tribes: Vec<Tribe> = kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| Tribe::new(TribeId::new(i as u8), *kind, self.config.initial_stars))
            .collect();
        for (tribe, tech) in &self.techs {
            tribes[tribe.index()].tech.research(*tech);
        }
        for (tribe, stars) in &self.stars {
            tribes[tribe.index()].set_stars(*stars);
        }
        for (tribe, monument) in &self.monuments {
            tribes[tribe.index()].monuments.make_available(*monument);
        }

        let mut gs = GameState::new(self.config.clone(), board, tribes, seed)?;

        for (tribe, pos, capital) in cities {
            let city = gs.found_city(tribe, pos, capital)?;
            if capital {
                let kind = kinds[tribe.index()].starting_unit();
                gs.add_unit(kind, tribe, pos, Some(city), UnitStatus::Fresh)?;
            }
        }
        for (tribe, kind, pos) in &self.units {
            if kind.is_naval() {
                return Err(GameError::InvalidParameter(format!(
                    "{kind:?} cannot be placed directly; embark a land unit instead"
                )));
            }
            gs.add_unit(*kind, *tribe, *pos, None, UnitStatus::Fresh)?;
        }

        let tribe_ids: Vec<TribeId> = gs.tribes().map(|t| t.id).collect();
        for tribe in tribe_ids {
            gs.update_trade_network(tribe)?;
        }
        gs.start()?;
        Ok(gs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TurnPhase;

    #[test]
    fn test_capitals_get_starting_units() {
        let gs = GameBuilder::new(8)
            .with_capital(TribeId::new(0), Position::new(1, 1))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .build(1)
            .unwrap();
        assert_eq!(gs.phase(), TurnPhase::TribeTurn(TribeId::new(0)));
        for tribe in [TribeId::new(0), TribeId::new(1)] {
            let capital = gs.tribe(tribe).unwrap().capital.unwrap();
            let city = gs.city(capital).unwrap();
            assert!(city.is_capital);
            assert_eq!(city.units.len(), 1);
            assert_eq!(gs.units_of(tribe).count(), 1);
            assert_eq!(gs.tribe(tribe).unwrap().stars(), 5);
            assert_eq!(gs.tribe(tribe).unwrap().score, 0);
        }
        gs.check_invariants().unwrap();
    }

    #[test]
    fn test_extra_city_has_no_unit() {
        let gs = GameBuilder::new(10)
            .with_capital(TribeId::new(0), Position::new(1, 1))
            .with_city(TribeId::new(0), Position::new(5, 1))
            .with_capital(TribeId::new(1), Position::new(8, 8))
            .build(1)
            .unwrap();
        assert_eq!(gs.city_count(TribeId::new(0)), 2);
        assert_eq!(gs.board().unit_at(Position::new(5, 1)).unwrap(), None);
    }

    #[test]
    fn test_too_few_tribe_kinds_rejected() {
        let err = GameBuilder::new(8)
            .with_tribes(vec![TribeKind::Bardur])
            .with_capital(TribeId::new(1), Position::new(2, 2))
            .build(1)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidParameter(_)));
    }

    #[test]
    fn test_out_of_bounds_override_rejected() {
        let err = GameBuilder::new(4)
            .with_capital(TribeId::new(0), Position::new(1, 1))
            .with_terrain(Position::new(9, 9), Terrain::Forest)
            .build(1)
            .unwrap_err();
        assert!(matches!(err, GameError::OutOfBounds { .. }));
    }

    #[test]
    fn test_generated_map_is_reproducible() {
        let a = GameBuilder::new(12).generated(99).build(1).unwrap();
        let b = GameBuilder::new(12).generated(99).build(1).unwrap();
        assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
        assert_eq!(a.cities().count(), 2);
        a.check_invariants().unwrap();
    }

    #[test]
    fn test_oumaji_start_with_a_rider() {
        let gs = GameBuilder::new(8)
            .with_tribes(vec![TribeKind::Oumaji, TribeKind::XinXi])
            .with_capital(TribeId::new(0), Position::new(1, 1))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .build(1)
            .unwrap();
        let unit = gs.units_of(TribeId::new(0)).next().unwrap();
        assert_eq!(unit.kind, UnitType::Rider);
    }
}
