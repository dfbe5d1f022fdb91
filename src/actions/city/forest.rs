//! Terrain work on forest and plain tiles of a city.

use serde::{Deserialize, Serialize};

use super::{acting_city, city_tiles, owned_tile};
use crate::actions::action::{Action, Command, Subject};
use crate::board::Tile;
use crate::core::constants::{BURN_FOREST_COST, CLEAR_FOREST_STARS, GROW_FOREST_COST};
use crate::core::{ActorId, GameError, Position, Resource, Result, Technology, Terrain};
use crate::game::GameState;

/// Shared feasibility: the acting city owns an empty tile of `terrain` and
/// its tribe knows `tech` and holds `cost` stars.
fn workable(
    gs: &GameState,
    city: ActorId,
    position: Position,
    tech: Technology,
    cost: u32,
    accepts: impl Fn(&Tile) -> bool,
) -> bool {
    let Some((_, tribe)) = acting_city(gs, city) else {
        return false;
    };
    if !tribe.tech.is_researched(tech) || !tribe.can_afford(cost) {
        return false;
    }
    owned_tile(gs, city, position).map_or(false, |tile| tile.building.is_none() && accepts(tile))
}

fn pay(gs: &mut GameState, city: ActorId, cost: u32) -> Result<()> {
    let tribe = gs.city_ref(city)?.tribe;
    if gs.tribe_mut(tribe)?.spend(cost) {
        Ok(())
    } else {
        Err(GameError::InconsistentState(format!(
            "{tribe} cannot pay {cost} for forest work"
        )))
    }
}

macro_rules! tile_variants {
    ($ty:ident) => {
        impl $ty {
            #[must_use]
            pub fn variants(gs: &GameState, city: ActorId) -> Vec<Action> {
                if acting_city(gs, city).is_none() {
                    return Vec::new();
                }
                city_tiles(gs, city)
                    .into_iter()
                    .map(|position| $ty { city, position })
                    .filter(|a| a.is_feasible(gs))
                    .map(Action::from)
                    .collect()
            }
        }
    };
}

/// Turn a forest into a plain with crops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BurnForest {
    pub city: ActorId,
    pub position: Position,
}

tile_variants!(BurnForest);

impl Command for BurnForest {
    fn subject(&self) -> Subject {
        Subject::Actor(self.city)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        workable(
            gs,
            self.city,
            self.position,
            Technology::Chivalry,
            BURN_FOREST_COST,
            |tile| tile.terrain == Terrain::Forest,
        )
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        gs.board().tile(self.position)?;
        pay(gs, self.city, BURN_FOREST_COST)?;
        gs.board.set_terrain(self.position, Terrain::Plain)?;
        gs.board.set_resource(self.position, Some(Resource::Crops))
    }
}

/// Cut a forest down for a star.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClearForest {
    pub city: ActorId,
    pub position: Position,
}

tile_variants!(ClearForest);

impl Command for ClearForest {
    fn subject(&self) -> Subject {
        Subject::Actor(self.city)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        workable(gs, self.city, self.position, Technology::Forestry, 0, |tile| {
            tile.terrain == Terrain::Forest
        })
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let tribe = gs.city_ref(self.city)?.tribe;
        gs.board.set_terrain(self.position, Terrain::Plain)?;
        gs.board.set_resource(self.position, None)?;
        gs.tribe_mut(tribe)?.add_stars(CLEAR_FOREST_STARS);
        Ok(())
    }
}

/// Plant a forest on a bare plain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrowForest {
    pub city: ActorId,
    pub position: Position,
}

tile_variants!(GrowForest);

impl Command for GrowForest {
    fn subject(&self) -> Subject {
        Subject::Actor(self.city)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        workable(
            gs,
            self.city,
            self.position,
            Technology::Spiritualism,
            GROW_FOREST_COST,
            |tile| tile.terrain == Terrain::Plain && tile.resource.is_none(),
        )
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        gs.board().tile(self.position)?;
        pay(gs, self.city, GROW_FOREST_COST)?;
        gs.board.set_terrain(self.position, Terrain::Forest)
    }
}
