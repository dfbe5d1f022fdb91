//! Cities: population, level, production and garrison.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ActorId, Position, TribeId};

/// Reward chosen when a city levels up. Two options exist per level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CityBonus {
    Workshop,
    Explorer,
    CityWall,
    Resources,
    PopulationGrowth,
    BorderGrowth,
    Park,
    Superunit,
}

impl CityBonus {
    /// The two bonuses offered when a city reaches `new_level`.
    #[must_use]
    pub const fn options(new_level: u8) -> [CityBonus; 2] {
        match new_level {
            0..=2 => [CityBonus::Workshop, CityBonus::Explorer],
            3 => [CityBonus::CityWall, CityBonus::Resources],
            4 => [CityBonus::PopulationGrowth, CityBonus::BorderGrowth],
            _ => [CityBonus::Park, CityBonus::Superunit],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: ActorId,
    pub tribe: TribeId,
    pub position: Position,
    pub level: u8,
    /// Progress towards the next level, in `0..=capacity()`.
    pub population: u32,
    /// Stars added to the tribe at the start of each of its turns.
    pub production: u32,
    pub is_capital: bool,
    pub has_walls: bool,
    /// Radius of the square of tiles the city may control.
    pub bound: u32,
    /// Units trained here and still alive.
    pub units: SmallVec<[ActorId; 4]>,
    /// Whether the city is joined to its tribe's capital by the trade network.
    pub connected: bool,
}

impl City {
    #[must_use]
    pub fn new(id: ActorId, tribe: TribeId, position: Position, is_capital: bool) -> Self {
        Self {
            id,
            tribe,
            position,
            level: 1,
            population: 0,
            production: 1,
            is_capital,
            has_walls: false,
            bound: 1,
            units: SmallVec::new(),
            connected: is_capital,
        }
    }

    /// Population needed to level up.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        u32::from(self.level) + 1
    }

    #[must_use]
    pub fn can_level_up(&self) -> bool {
        self.level < u8::MAX && self.population >= self.capacity()
    }

    /// Add population, clamped to capacity.
    pub fn add_population(&mut self, amount: u32) {
        self.population = (self.population + amount).min(self.capacity());
    }

    /// Remove population, floored at zero.
    pub fn remove_population(&mut self, amount: u32) {
        self.population = self.population.saturating_sub(amount);
    }

    /// Garrison limit: a city supports `level + 1` units.
    #[must_use]
    pub fn unit_capacity(&self) -> usize {
        usize::from(self.level) + 1
    }

    #[must_use]
    pub fn has_unit_room(&self) -> bool {
        self.units.len() < self.unit_capacity()
    }

    pub fn add_unit(&mut self, unit: ActorId) {
        if !self.units.contains(&unit) {
            self.units.push(unit);
        }
    }

    pub fn remove_unit(&mut self, unit: ActorId) {
        self.units.retain(|u| *u != unit);
    }
}
