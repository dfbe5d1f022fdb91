//! Trade network: roads, city centres and ports linked to the capital.
//!
//! Land links step between adjacent road, city-centre and port tiles that
//! are neutral or owned by the tribe. Ports also link to one another across
//! any stretch of water.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::debug;

use super::state::GameState;
use crate::core::{ActorId, Building, Position, Result, Terrain, TribeId};

impl GameState {
    /// Recompute which of `tribe`'s cities reach its capital.
    ///
    /// A city joining the network grows by one population and so does the
    /// capital.
    pub(crate) fn update_trade_network(&mut self, tribe: TribeId) -> Result<()> {
        let Some(capital) = self
            .tribe_ref(tribe)?
            .capital
            .and_then(|c| self.city(c))
            .filter(|c| c.tribe == tribe)
            .map(|c| (c.id, c.position))
        else {
            return Ok(());
        };

        let reached = self.flood_network(tribe, capital.1)?;
        let cities: Vec<(ActorId, Position, bool)> = self
            .cities_of(tribe)
            .filter(|c| c.id != capital.0)
            .map(|c| (c.id, c.position, c.connected))
            .collect();

        for (id, pos, was_connected) in cities {
            let now = reached.contains(&pos);
            if now && !was_connected {
                self.city_mut(id)?.add_population(1);
                self.city_mut(capital.0)?.add_population(1);
                debug!(city = %id, %tribe, "city joined trade network");
            }
            self.city_mut(id)?.connected = now;
        }
        Ok(())
    }

    fn flood_network(&self, tribe: TribeId, start: Position) -> Result<FxHashSet<Position>> {
        let size = self.board.size();
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            let here = self.link_kind(tribe, pos)?;
            for next in pos.neighborhood(1, size) {
                if seen.contains(&next) {
                    continue;
                }
                let there = self.link_kind(tribe, next)?;
                let connects = match (here, there) {
                    (Link::Land | Link::Port, Link::Land | Link::Port) => true,
                    (Link::Port | Link::Water, Link::Water | Link::Port) => true,
                    _ => false,
                };
                if connects {
                    seen.insert(next);
                    queue.push_back(next);
                }
            }
        }
        Ok(seen)
    }

    fn link_kind(&self, tribe: TribeId, pos: Position) -> Result<Link> {
        let tile = self.board.tile(pos)?;
        let owner = tile.city.and_then(|c| self.city(c)).map(|c| c.tribe);
        let friendly = owner.map_or(true, |o| o == tribe);

        if tile.building == Some(Building::Port) {
            return Ok(if owner == Some(tribe) { Link::Port } else { Link::None });
        }
        if tile.terrain.is_water() {
            return Ok(Link::Water);
        }
        if friendly && (tile.road || (tile.terrain == Terrain::City && owner == Some(tribe))) {
            return Ok(Link::Land);
        }
        Ok(Link::None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Link {
    Land,
    Port,
    Water,
    None,
}
