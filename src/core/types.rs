//! Rule enumerations: terrain, resources, technologies and buildings.
//!
//! ## Technology
//!
//! Twenty-five technologies arranged as five three-tier branches. Each
//! technology maps to one bit so a tribe's research state is a single `u32`
//! (see `tribe::TechnologyTree`).
//!
//! ## Buildings
//!
//! Every building's constraints are a constant [`BuildingSpec`] looked up
//! through [`Building::spec`]. The build action evaluates it; nothing
//! else interprets it.

use serde::{Deserialize, Serialize};

use super::constants::{MONUMENT_POINTS, MONUMENT_POPULATION};

/// Terrain of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Plain,
    ShallowWater,
    DeepWater,
    Mountain,
    Forest,
    /// Neutral settlement that can be captured into a city.
    Village,
    /// City centre.
    City,
}

impl Terrain {
    #[must_use]
    pub const fn is_water(self) -> bool {
        matches!(self, Terrain::ShallowWater | Terrain::DeepWater)
    }

    #[must_use]
    pub const fn is_land(self) -> bool {
        !self.is_water()
    }
}

/// Harvestable or examinable resource on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    Fish,
    Fruit,
    Animal,
    Whales,
    Ore,
    Crops,
    Ruins,
}

impl Resource {
    /// Technology needed to gather this resource, or `None` if it can't be
    /// gathered (ore and crops are used by buildings, ruins are examined).
    #[must_use]
    pub const fn gathering_tech(self) -> Option<Technology> {
        match self {
            Resource::Fish => Some(Technology::Fishing),
            Resource::Fruit => Some(Technology::Organization),
            Resource::Animal => Some(Technology::Hunting),
            Resource::Whales => Some(Technology::Whaling),
            Resource::Ore | Resource::Crops | Resource::Ruins => None,
        }
    }
}

/// A researchable technology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Technology {
    Climbing,
    Mining,
    Smithery,
    Meditation,
    Philosophy,
    Fishing,
    Sailing,
    Navigation,
    Whaling,
    Aquatism,
    Hunting,
    Archery,
    Spiritualism,
    Forestry,
    Mathematics,
    Organization,
    Farming,
    Construction,
    Strategy,
    Diplomacy,
    Riding,
    FreeSpirit,
    Chivalry,
    Roads,
    Trade,
}

impl Technology {
    /// Every technology, in declaration order.
    pub const ALL: [Technology; 25] = [
        Technology::Climbing,
        Technology::Mining,
        Technology::Smithery,
        Technology::Meditation,
        Technology::Philosophy,
        Technology::Fishing,
        Technology::Sailing,
        Technology::Navigation,
        Technology::Whaling,
        Technology::Aquatism,
        Technology::Hunting,
        Technology::Archery,
        Technology::Spiritualism,
        Technology::Forestry,
        Technology::Mathematics,
        Technology::Organization,
        Technology::Farming,
        Technology::Construction,
        Technology::Strategy,
        Technology::Diplomacy,
        Technology::Riding,
        Technology::FreeSpirit,
        Technology::Chivalry,
        Technology::Roads,
        Technology::Trade,
    ];

    /// Prerequisite technology, `None` for the five roots.
    #[must_use]
    pub const fn parent(self) -> Option<Technology> {
        use Technology::*;
        match self {
            Climbing | Fishing | Hunting | Organization | Riding => None,
            Mining | Meditation => Some(Climbing),
            Smithery => Some(Mining),
            Philosophy => Some(Meditation),
            Sailing | Whaling => Some(Fishing),
            Navigation => Some(Sailing),
            Aquatism => Some(Whaling),
            Archery | Forestry => Some(Hunting),
            Spiritualism => Some(Archery),
            Mathematics => Some(Forestry),
            Farming | Strategy => Some(Organization),
            Construction => Some(Farming),
            Diplomacy => Some(Strategy),
            FreeSpirit | Roads => Some(Riding),
            Chivalry => Some(FreeSpirit),
            Trade => Some(Roads),
        }
    }

    /// Depth in the tree, 1 to 3.
    #[must_use]
    pub const fn tier(self) -> u32 {
        match self.parent() {
            None => 1,
            Some(parent) => match parent.parent() {
                None => 2,
                Some(_) => 3,
            },
        }
    }

    /// Bit used by the tribe's research mask.
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << (self as u8)
    }
}

/// How often a building may appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Uniqueness {
    Repeatable,
    OncePerCity,
    /// Monuments.
    OncePerTribe,
}

/// What a finished building gives its city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingBonus {
    /// Flat population.
    Population(u32),
    /// Population per adjacent building of the given kind.
    PopulationPerAdjacent(Building, u32),
    /// Production per adjacent building of the given kind.
    ProductionPerAdjacent(Building, u32),
    /// Score only.
    None,
}

/// Constant description of one building kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingSpec {
    pub cost: u32,
    pub points: u32,
    pub tech: Option<Technology>,
    pub terrains: &'static [Terrain],
    pub resource: Option<Resource>,
    /// A building of this kind must stand on one of the eight neighbours.
    pub adjacent: Option<Building>,
    pub uniqueness: Uniqueness,
    pub bonus: BuildingBonus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Building {
    Port,
    Mine,
    Forge,
    Farm,
    Windmill,
    CustomHouse,
    LumberHut,
    Sawmill,
    Temple,
    WaterTemple,
    ForestTemple,
    MountainTemple,
    AltarOfPeace,
    EmperorsTomb,
    EyeOfGod,
    GateOfPower,
    ParkOfFortune,
    TowerOfWisdom,
}

const PLAIN: &[Terrain] = &[Terrain::Plain];
const SHALLOW: &[Terrain] = &[Terrain::ShallowWater];
const MOUNTAIN: &[Terrain] = &[Terrain::Mountain];
const FOREST: &[Terrain] = &[Terrain::Forest];

const fn monument() -> BuildingSpec {
    BuildingSpec {
        cost: 0,
        points: MONUMENT_POINTS,
        tech: None,
        terrains: PLAIN,
        resource: None,
        adjacent: None,
        uniqueness: Uniqueness::OncePerTribe,
        bonus: BuildingBonus::Population(MONUMENT_POPULATION),
    }
}

const fn temple(tech: Technology, terrains: &'static [Terrain]) -> BuildingSpec {
    BuildingSpec {
        cost: 20,
        points: 100,
        tech: Some(tech),
        terrains,
        resource: None,
        adjacent: None,
        uniqueness: Uniqueness::Repeatable,
        bonus: BuildingBonus::None,
    }
}

impl Building {
    pub const ALL: [Building; 18] = [
        Building::Port,
        Building::Mine,
        Building::Forge,
        Building::Farm,
        Building::Windmill,
        Building::CustomHouse,
        Building::LumberHut,
        Building::Sawmill,
        Building::Temple,
        Building::WaterTemple,
        Building::ForestTemple,
        Building::MountainTemple,
        Building::AltarOfPeace,
        Building::EmperorsTomb,
        Building::EyeOfGod,
        Building::GateOfPower,
        Building::ParkOfFortune,
        Building::TowerOfWisdom,
    ];

    pub const MONUMENTS: [Building; 6] = [
        Building::AltarOfPeace,
        Building::EmperorsTomb,
        Building::EyeOfGod,
        Building::GateOfPower,
        Building::ParkOfFortune,
        Building::TowerOfWisdom,
    ];

    #[must_use]
    pub const fn spec(self) -> BuildingSpec {
        use Building::*;
        match self {
            Port => BuildingSpec {
                cost: 10,
                points: 0,
                tech: Some(Technology::Fishing),
                terrains: SHALLOW,
                resource: None,
                adjacent: None,
                uniqueness: Uniqueness::Repeatable,
                bonus: BuildingBonus::Population(1),
            },
            Mine => BuildingSpec {
                cost: 5,
                points: 0,
                tech: Some(Technology::Mining),
                terrains: MOUNTAIN,
                resource: Some(Resource::Ore),
                adjacent: None,
                uniqueness: Uniqueness::Repeatable,
                bonus: BuildingBonus::Population(2),
            },
            Farm => BuildingSpec {
                cost: 5,
                points: 0,
                tech: Some(Technology::Farming),
                terrains: PLAIN,
                resource: Some(Resource::Crops),
                adjacent: None,
                uniqueness: Uniqueness::Repeatable,
                bonus: BuildingBonus::Population(2),
            },
            LumberHut => BuildingSpec {
                cost: 2,
                points: 0,
                tech: Some(Technology::Forestry),
                terrains: FOREST,
                resource: None,
                adjacent: None,
                uniqueness: Uniqueness::Repeatable,
                bonus: BuildingBonus::Population(1),
            },
            Forge => BuildingSpec {
                cost: 5,
                points: 0,
                tech: Some(Technology::Smithery),
                terrains: PLAIN,
                resource: None,
                adjacent: Some(Mine),
                uniqueness: Uniqueness::OncePerCity,
                bonus: BuildingBonus::PopulationPerAdjacent(Mine, 2),
            },
            Windmill => BuildingSpec {
                cost: 5,
                points: 0,
                tech: Some(Technology::Construction),
                terrains: PLAIN,
                resource: None,
                adjacent: Some(Farm),
                uniqueness: Uniqueness::OncePerCity,
                bonus: BuildingBonus::PopulationPerAdjacent(Farm, 1),
            },
            Sawmill => BuildingSpec {
                cost: 5,
                points: 0,
                tech: Some(Technology::Mathematics),
                terrains: PLAIN,
                resource: None,
                adjacent: Some(LumberHut),
                uniqueness: Uniqueness::OncePerCity,
                bonus: BuildingBonus::PopulationPerAdjacent(LumberHut, 1),
            },
            CustomHouse => BuildingSpec {
                cost: 5,
                points: 0,
                tech: Some(Technology::Trade),
                terrains: PLAIN,
                resource: None,
                adjacent: Some(Port),
                uniqueness: Uniqueness::OncePerCity,
                bonus: BuildingBonus::ProductionPerAdjacent(Port, 2),
            },
            Temple => temple(Technology::FreeSpirit, PLAIN),
            WaterTemple => temple(Technology::Aquatism, SHALLOW),
            ForestTemple => temple(Technology::Spiritualism, FOREST),
            MountainTemple => temple(Technology::Meditation, MOUNTAIN),
            AltarOfPeace | EmperorsTomb | EyeOfGod | GateOfPower | ParkOfFortune
            | TowerOfWisdom => monument(),
        }
    }

    #[must_use]
    pub const fn is_monument(self) -> bool {
        matches!(self.spec().uniqueness, Uniqueness::OncePerTribe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_technology_tree_shape() {
        let roots = Technology::ALL.iter().filter(|t| t.tier() == 1).count();
        let second = Technology::ALL.iter().filter(|t| t.tier() == 2).count();
        let third = Technology::ALL.iter().filter(|t| t.tier() == 3).count();
        assert_eq!((roots, second, third), (5, 10, 10));
    }

    #[test]
    fn test_technology_bits_are_distinct() {
        let mask = Technology::ALL.iter().fold(0u32, |acc, t| {
            assert_eq!(acc & t.bit(), 0);
            acc | t.bit()
        });
        assert_eq!(mask.count_ones(), 25);
    }

    #[test]
    fn test_parent_chain() {
        assert_eq!(Technology::Smithery.parent(), Some(Technology::Mining));
        assert_eq!(Technology::Mining.parent(), Some(Technology::Climbing));
        assert_eq!(Technology::Climbing.parent(), None);
        assert_eq!(Technology::Trade.tier(), 3);
    }

    #[test]
    fn test_monuments() {
        for b in Building::ALL {
            assert_eq!(b.is_monument(), Building::MONUMENTS.contains(&b));
        }
        assert_eq!(Building::EyeOfGod.spec().cost, 0);
    }

    #[test]
    fn test_temple_spec() {
        let spec = Building::Temple.spec();
        assert_eq!(spec.cost, 20);
        assert_eq!(spec.tech, Some(Technology::FreeSpirit));
        assert_eq!(spec.terrains, &[Terrain::Plain]);
        assert!(spec.adjacent.is_none() && spec.resource.is_none());
    }

    #[test]
    fn test_gathering_tech() {
        assert_eq!(Resource::Whales.gathering_tech(), Some(Technology::Whaling));
        assert_eq!(Resource::Ruins.gathering_tech(), None);
    }
}
