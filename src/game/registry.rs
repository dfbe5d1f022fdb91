//! Actor registry bookkeeping.
//!
//! These helpers keep the registry, the board's unit/city layers and city
//! garrisons in step. Actions call them only after feasibility passed; each
//! one checks its own lookups before the first write.

use tracing::debug;

use super::state::GameState;
use crate::actors::{Actor, City, Unit, UnitStatus, UnitType};
use crate::core::types::Terrain;
use crate::core::{ActorId, GameError, Position, Result, TribeId};

impl GameState {
    pub(crate) fn alloc_actor_id(&mut self) -> ActorId {
        let id = self.next_actor_id;
        self.next_actor_id = id.next();
        id
    }

    /// Place a new unit. `home` gains the unit in its garrison.
    pub(crate) fn add_unit(
        &mut self,
        kind: UnitType,
        tribe: TribeId,
        position: Position,
        home: Option<ActorId>,
        status: UnitStatus,
    ) -> Result<ActorId> {
        if let Some(other) = self.board.unit_at(position)? {
            return Err(GameError::InconsistentState(format!(
                "cannot place unit at {position}: {other} is there"
            )));
        }
        if let Some(city) = home {
            self.city_ref(city)?;
        }
        self.tribe_ref(tribe)?;

        let id = self.alloc_actor_id();
        let unit = Unit::new(id, kind, tribe, position, home).with_status(status);
        self.board.set_unit(position, Some(id))?;
        self.actors.insert(id, Actor::Unit(unit));
        if let Some(city) = home {
            self.city_mut(city)?.add_unit(id);
        }
        Ok(id)
    }

    /// Remove a unit from the registry, the board and its home garrison.
    pub(crate) fn remove_unit(&mut self, id: ActorId) -> Result<Unit> {
        let unit = self.unit_ref(id)?.clone();
        if self.board.unit_at(unit.position)? == Some(id) {
            self.board.set_unit(unit.position, None)?;
        }
        if let Some(city) = unit.city {
            if let Ok(home) = self.city_mut(city) {
                home.remove_unit(id);
            }
        }
        self.actors.remove(&id);
        self.exhausted.remove(&id);
        debug!(unit = %id, kind = ?unit.kind, tribe = %unit.tribe, "unit removed");
        Ok(unit)
    }

    /// Move a unit's board entry and position.
    pub(crate) fn relocate_unit(&mut self, id: ActorId, to: Position) -> Result<()> {
        let from = self.unit_ref(id)?.position;
        if from == to {
            return Ok(());
        }
        if let Some(other) = self.board.unit_at(to)? {
            return Err(GameError::InconsistentState(format!(
                "cannot move {id} to {to}: {other} is there"
            )));
        }
        self.board.set_unit(from, None)?;
        self.board.set_unit(to, Some(id))?;
        self.unit_mut(id)?.position = to;
        Ok(())
    }

    /// Detach a unit from its home city.
    pub(crate) fn make_homeless(&mut self, id: ActorId) -> Result<()> {
        let home = self.unit_ref(id)?.city;
        if let Some(city) = home {
            if let Ok(c) = self.city_mut(city) {
                c.remove_unit(id);
            }
        }
        self.unit_mut(id)?.city = None;
        Ok(())
    }

    /// Found a level-1 city at `position`, claiming unowned tiles around it.
    pub(crate) fn found_city(
        &mut self,
        tribe: TribeId,
        position: Position,
        capital: bool,
    ) -> Result<ActorId> {
        if let Some(owner) = self.board.city_at(position)? {
            if self.city(owner).map(|c| c.position) == Some(position) {
                return Err(GameError::InconsistentState(format!(
                    "{position} is already the centre of {owner}"
                )));
            }
        }
        self.tribe_ref(tribe)?;

        let id = self.alloc_actor_id();
        self.actors
            .insert(id, Actor::City(City::new(id, tribe, position, capital)));
        self.board.set_terrain(position, Terrain::City)?;
        self.board.set_resource(position, None)?;
        self.board.assign_tile(position, id)?;
        self.claim_tiles(id)?;
        if capital {
            self.tribe_mut(tribe)?.capital = Some(id);
        }
        debug!(city = %id, %tribe, %position, capital, "city founded");
        Ok(id)
    }

    /// Give `city` every unowned tile within its bound.
    pub(crate) fn claim_tiles(&mut self, city: ActorId) -> Result<()> {
        let (center, bound) = {
            let c = self.city_ref(city)?;
            (c.position, c.bound)
        };
        let size = self.board.size();
        for pos in center.area(bound, size) {
            if self.board.city_at(pos)?.is_none() {
                self.board.assign_tile(pos, city)?;
            }
        }
        Ok(())
    }

    /// Hand `city` to `tribe`. Its garrison stays behind, homeless.
    pub(crate) fn transfer_city(&mut self, city: ActorId, tribe: TribeId) -> Result<()> {
        let garrison = self.city_ref(city)?.units.clone();
        self.tribe_ref(tribe)?;
        for unit in garrison {
            if self.unit(unit).is_some() {
                self.unit_mut(unit)?.city = None;
            }
        }
        let c = self.city_mut(city)?;
        c.tribe = tribe;
        c.is_capital = false;
        c.connected = false;
        c.units.clear();
        self.exhausted.remove(&city);
        Ok(())
    }
}
