//! The board: a square tile grid, per-tribe observation and city tiles.
//!
//! `Board` is a passive store. It never decides whether a change is legal;
//! actions check that before calling the setters here. Every accessor that
//! takes a position fails with [`GameError::OutOfBounds`] outside the grid.
//!
//! Tiles, observation grids and city tile lists are `im` persistent
//! collections, so cloning a board shares structure and a write on either
//! side copies only the touched chunk.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::tile::Tile;
use crate::core::{
    ActorId, Building, GameError, Position, Resource, Result, Terrain, TribeId, TribeMap,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,

    /// Row-major by `x`: index = `x * size + y`.
    tiles: Vector<Tile>,

    /// Per-tribe explored grid, same indexing as `tiles`. Never reset.
    observed: TribeMap<Vector<bool>>,

    /// Tiles controlled by each city, in the order they were claimed.
    city_tiles: OrdMap<ActorId, Vector<Position>>,
}

impl Board {
    /// Create a plain-terrain board for `tribe_count` tribes.
    #[must_use]
    pub fn new(size: usize, tribe_count: usize) -> Self {
        Self::from_tiles(size, tribe_count, |_| Tile::default())
    }

    /// Create a board whose tiles come from `factory`.
    pub fn from_tiles(
        size: usize,
        tribe_count: usize,
        mut factory: impl FnMut(Position) -> Tile,
    ) -> Self {
        let mut tiles = Vector::new();
        for x in 0..size as i32 {
            for y in 0..size as i32 {
                tiles.push_back(factory(Position::new(x, y)));
            }
        }
        let blank: Vector<bool> = std::iter::repeat(false).take(size * size).collect();
        Self {
            size,
            tiles,
            observed: TribeMap::with_value(tribe_count, blank),
            city_tiles: OrdMap::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size as i32;
        (0..size).flat_map(move |x| (0..size).map(move |y| Position::new(x, y)))
    }

    fn index(&self, pos: Position) -> Result<usize> {
        if pos.in_bounds(self.size) {
            Ok(pos.x as usize * self.size + pos.y as usize)
        } else {
            Err(GameError::OutOfBounds {
                position: pos,
                size: self.size,
            })
        }
    }

    fn tile_mut(&mut self, pos: Position) -> Result<&mut Tile> {
        let idx = self.index(pos)?;
        self.tiles
            .get_mut(idx)
            .ok_or_else(|| GameError::InconsistentState(format!("missing tile at {pos}")))
    }

    // === Reads ===

    pub fn tile(&self, pos: Position) -> Result<&Tile> {
        let idx = self.index(pos)?;
        self.tiles
            .get(idx)
            .ok_or_else(|| GameError::InconsistentState(format!("missing tile at {pos}")))
    }

    pub fn terrain_at(&self, pos: Position) -> Result<Terrain> {
        Ok(self.tile(pos)?.terrain)
    }

    pub fn resource_at(&self, pos: Position) -> Result<Option<Resource>> {
        Ok(self.tile(pos)?.resource)
    }

    pub fn building_at(&self, pos: Position) -> Result<Option<Building>> {
        Ok(self.tile(pos)?.building)
    }

    pub fn has_road(&self, pos: Position) -> Result<bool> {
        Ok(self.tile(pos)?.road)
    }

    pub fn in_trade_network(&self, pos: Position) -> Result<bool> {
        Ok(self.tile(pos)?.trade_network)
    }

    /// City controlling the tile.
    pub fn city_at(&self, pos: Position) -> Result<Option<ActorId>> {
        Ok(self.tile(pos)?.city)
    }

    /// Unit standing on the tile.
    pub fn unit_at(&self, pos: Position) -> Result<Option<ActorId>> {
        Ok(self.tile(pos)?.unit)
    }

    /// Tiles controlled by `city`. Empty for unknown ids.
    pub fn city_tiles(&self, city: ActorId) -> impl Iterator<Item = Position> + '_ {
        self.city_tiles.get(&city).into_iter().flat_map(|v| v.iter().copied())
    }

    #[must_use]
    pub fn city_tile_count(&self, city: ActorId) -> usize {
        self.city_tiles.get(&city).map_or(0, Vector::len)
    }

    /// Ids of every city that controls tiles.
    pub fn cities_with_tiles(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.city_tiles.keys().copied()
    }

    // === Writes ===

    pub fn set_terrain(&mut self, pos: Position, terrain: Terrain) -> Result<()> {
        self.tile_mut(pos)?.terrain = terrain;
        Ok(())
    }

    pub fn set_resource(&mut self, pos: Position, resource: Option<Resource>) -> Result<()> {
        self.tile_mut(pos)?.resource = resource;
        Ok(())
    }

    /// Place or clear a building. The tile's recorded production is reset.
    pub fn set_building(&mut self, pos: Position, building: Option<Building>) -> Result<()> {
        let tile = self.tile_mut(pos)?;
        tile.building = building;
        tile.production = 0;
        Ok(())
    }

    pub fn set_production(&mut self, pos: Position, production: u32) -> Result<()> {
        self.tile_mut(pos)?.production = production;
        Ok(())
    }

    pub fn set_road(&mut self, pos: Position, road: bool) -> Result<()> {
        self.tile_mut(pos)?.road = road;
        Ok(())
    }

    pub fn set_trade_network(&mut self, pos: Position, connected: bool) -> Result<()> {
        self.tile_mut(pos)?.trade_network = connected;
        Ok(())
    }

    pub fn set_unit(&mut self, pos: Position, unit: Option<ActorId>) -> Result<()> {
        self.tile_mut(pos)?.unit = unit;
        Ok(())
    }

    /// Give `pos` to `city`, taking it from any previous owner.
    pub fn assign_tile(&mut self, pos: Position, city: ActorId) -> Result<()> {
        let previous = self.tile(pos)?.city;
        if previous == Some(city) {
            return Ok(());
        }
        if let Some(old) = previous {
            if let Some(list) = self.city_tiles.get_mut(&old) {
                list.retain(|p| *p != pos);
            }
        }
        self.tile_mut(pos)?.city = Some(city);
        match self.city_tiles.get_mut(&city) {
            Some(list) => list.push_back(pos),
            None => {
                self.city_tiles.insert(city, Vector::unit(pos));
            }
        }
        Ok(())
    }

    // === Observation ===

    pub fn is_observed(&self, tribe: TribeId, pos: Position) -> Result<bool> {
        let idx = self.index(pos)?;
        Ok(self
            .observed
            .get(tribe)
            .and_then(|grid| grid.get(idx).copied())
            .unwrap_or(false))
    }

    /// Mark every tile within `radius` of `center` as observed by `tribe`.
    pub fn reveal(&mut self, tribe: TribeId, center: Position, radius: u32) -> Result<()> {
        self.index(center)?;
        let size = self.size;
        let grid = self.observed.get_mut(tribe).ok_or_else(|| {
            GameError::InconsistentState(format!("no observation grid for {tribe}"))
        })?;
        let r = radius as i32;
        for x in (center.x - r)..=(center.x + r) {
            for y in (center.y - r)..=(center.y + r) {
                let p = Position::new(x, y);
                if p.in_bounds(size) {
                    grid.set(x as usize * size + y as usize, true);
                }
            }
        }
        Ok(())
    }

    /// Reveal the whole board to `tribe`.
    pub fn reveal_all(&mut self, tribe: TribeId) -> Result<()> {
        let grid = self.observed.get_mut(tribe).ok_or_else(|| {
            GameError::InconsistentState(format!("no observation grid for {tribe}"))
        })?;
        *grid = std::iter::repeat(true).take(self.size * self.size).collect();
        Ok(())
    }

    #[must_use]
    pub fn observed_count(&self, tribe: TribeId) -> usize {
        self.observed
            .get(tribe)
            .map_or(0, |grid| grid.iter().filter(|seen| **seen).count())
    }

    #[must_use]
    pub fn is_fully_observed(&self, tribe: TribeId) -> bool {
        self.observed_count(tribe) == self.size * self.size
    }
}
