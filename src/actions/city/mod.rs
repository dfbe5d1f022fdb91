//! City actions.
//!
//! Every city action targets the acting city itself or one of the tiles it
//! controls. The helpers here hold the checks they all share.

mod build;
mod destroy;
mod forest;
mod gathering;
mod level_up;
mod spawn;

pub use build::Build;
pub use destroy::Destroy;
pub use forest::{BurnForest, ClearForest, GrowForest};
pub use gathering::ResourceGathering;
pub use level_up::LevelUp;
pub use spawn::Spawn;

use crate::actors::City;
use crate::board::Tile;
use crate::core::{ActorId, Position};
use crate::game::GameState;
use crate::tribe::Tribe;

/// The city and its tribe, if the city belongs to the active tribe.
pub(crate) fn acting_city(gs: &GameState, city: ActorId) -> Option<(&City, &Tribe)> {
    let c = gs.acting_city(city)?;
    let t = gs.tribe(c.tribe)?;
    Some((c, t))
}

/// The tile at `pos` if `city` controls it.
pub(crate) fn owned_tile(gs: &GameState, city: ActorId, pos: Position) -> Option<&Tile> {
    gs.board()
        .tile(pos)
        .ok()
        .filter(|tile| tile.city == Some(city))
}

/// Tiles controlled by `city`, in claim order.
pub(crate) fn city_tiles(gs: &GameState, city: ActorId) -> Vec<Position> {
    gs.board().city_tiles(city).collect()
}
