//! Unit actions.
//!
//! Movement and combat live in their own modules; the remaining actions
//! are small and grouped by theme. Shared helpers below answer the
//! questions most unit actions ask about the board.

mod attack;
mod capture;
pub mod combat;
mod convert;
mod disband;
mod examine;
mod heal;
pub mod movement;
mod naval;

pub use attack::Attack;
pub use capture::Capture;
pub use convert::Convert;
pub use disband::Disband;
pub use examine::{Examine, RuinsReward};
pub use heal::{HealOthers, Recover};
pub use movement::{reachable_tiles, Move};
pub use naval::{Disembark, Embark, Upgrade};

use crate::actors::Unit;
use crate::core::{Position, Technology, Terrain, TribeId};
use crate::game::GameState;
use crate::tribe::Tribe;

/// The unit and its tribe, if the unit belongs to the active tribe.
pub(crate) fn acting_unit(gs: &GameState, unit: crate::core::ActorId) -> Option<(&Unit, &Tribe)> {
    let u = gs.acting_unit(unit)?;
    let t = gs.tribe(u.tribe)?;
    Some((u, t))
}

/// A unit of another tribe standing at `pos`.
pub(crate) fn enemy_unit_at(gs: &GameState, tribe: TribeId, pos: Position) -> Option<&Unit> {
    gs.board()
        .unit_at(pos)
        .ok()
        .flatten()
        .and_then(|id| gs.unit(id))
        .filter(|u| u.tribe != tribe)
}

/// Whether `pos` is observed by `tribe`; out-of-bounds positions are not.
pub(crate) fn observed(gs: &GameState, tribe: TribeId, pos: Position) -> bool {
    gs.board().is_observed(tribe, pos).unwrap_or(false)
}

/// Whether a unit of this kind may stand on `terrain`, given its tribe's
/// technology.
pub(crate) fn can_stand_on(unit: &Unit, tribe: &Tribe, terrain: Terrain) -> bool {
    if unit.is_naval() {
        match terrain {
            Terrain::ShallowWater => true,
            Terrain::DeepWater => tribe.tech.is_researched(Technology::Sailing),
            _ => false,
        }
    } else {
        match terrain {
            Terrain::Mountain => tribe.tech.is_researched(Technology::Climbing),
            t => t.is_land(),
        }
    }
}

/// Friendly units within one tile of `center`, excluding `center` itself.
pub(crate) fn adjacent_friends<'a>(
    gs: &'a GameState,
    tribe: TribeId,
    center: Position,
) -> impl Iterator<Item = &'a Unit> + 'a {
    center
        .neighborhood(1, gs.board().size())
        .into_iter()
        .filter_map(move |p| gs.board().unit_at(p).ok().flatten())
        .filter_map(move |id| gs.unit(id))
        .filter(move |u| u.tribe == tribe)
}
