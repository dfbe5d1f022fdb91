use serde::{Deserialize, Serialize};

use crate::core::{ActorId, Building, Resource, Terrain};

/// Contents of one board cell.
///
/// `city` is the owning city (set for every tile a city controls, including
/// its centre). `unit` is the actor standing on the tile, if any.
/// `production` is what the building here currently adds to its city's
/// production, so tearing it down removes exactly that.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: Terrain,
    pub resource: Option<Resource>,
    pub building: Option<Building>,
    pub road: bool,
    pub trade_network: bool,
    pub production: u32,
    pub city: Option<ActorId>,
    pub unit: Option<ActorId>,
}

impl Tile {
    #[must_use]
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            resource: None,
            building: None,
            road: false,
            trade_network: false,
            production: 0,
            city: None,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resource = Some(resource);
        self
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(Terrain::Plain)
    }
}
