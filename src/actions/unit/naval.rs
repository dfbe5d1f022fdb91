//! Embarking, disembarking and upgrading boats.
//!
//! A land unit steps onto an adjacent friendly port and becomes a boat
//! that remembers what it was. Disembarking restores the land type; max HP
//! is carried through unchanged.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{acting_unit, can_stand_on, observed};
use crate::actions::action::{Action, Command, Subject};
use crate::actors::{UnitStatus, UnitType};
use crate::core::constants::{BATTLESHIP_UPGRADE_COST, SHIP_UPGRADE_COST};
use crate::core::{ActorId, Building, GameError, Position, Result};
use crate::game::GameState;

fn free_neighbours(gs: &GameState, center: Position) -> impl Iterator<Item = Position> + '_ {
    center
        .neighborhood(1, gs.board().size())
        .into_iter()
        .filter(move |p| gs.board().unit_at(*p).ok() == Some(None))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Embark {
    pub unit: ActorId,
    pub destination: Position,
}

impl Embark {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let Some((u, _)) = acting_unit(gs, unit) else {
            return Vec::new();
        };
        if u.is_naval() || !u.status.can_move() {
            return Vec::new();
        }
        free_neighbours(gs, u.position)
            .map(|destination| Embark { unit, destination })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for Embark {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((unit, _)) = acting_unit(gs, self.unit) else {
            return false;
        };
        if unit.is_naval() || !unit.status.can_move() {
            return false;
        }
        if unit.position.distance(self.destination) != 1 {
            return false;
        }
        let Ok(tile) = gs.board().tile(self.destination) else {
            return false;
        };
        let own_port = tile.building == Some(Building::Port)
            && tile
                .city
                .and_then(|c| gs.city(c))
                .map_or(false, |c| c.tribe == unit.tribe);
        own_port && tile.unit.is_none()
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        gs.relocate_unit(self.unit, self.destination)?;
        let unit = gs.unit_mut(self.unit)?;
        unit.land_type = Some(unit.kind);
        unit.kind = UnitType::Boat;
        unit.status = UnitStatus::Finished;
        debug!(unit = %self.unit, port = %self.destination, "embarked");
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disembark {
    pub unit: ActorId,
    pub destination: Position,
}

impl Disembark {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let Some((u, _)) = acting_unit(gs, unit) else {
            return Vec::new();
        };
        if !u.is_naval() || !u.status.can_move() {
            return Vec::new();
        }
        free_neighbours(gs, u.position)
            .map(|destination| Disembark { unit, destination })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for Disembark {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((unit, tribe)) = acting_unit(gs, self.unit) else {
            return false;
        };
        let Some(land) = unit.land_type.filter(|_| unit.is_naval()) else {
            return false;
        };
        if !unit.status.can_move() || unit.position.distance(self.destination) != 1 {
            return false;
        }
        let Ok(tile) = gs.board().tile(self.destination) else {
            return false;
        };
        let mut ashore = unit.clone();
        ashore.kind = land;
        tile.unit.is_none()
            && observed(gs, unit.tribe, self.destination)
            && can_stand_on(&ashore, tribe, tile.terrain)
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let land = gs.unit_ref(self.unit)?.land_type.ok_or_else(|| {
            GameError::InconsistentState(format!("{} carries no land unit", self.unit))
        })?;
        gs.relocate_unit(self.unit, self.destination)?;
        let unit = gs.unit_mut(self.unit)?;
        unit.kind = land;
        unit.land_type = None;
        unit.status = UnitStatus::Finished;
        debug!(unit = %self.unit, to = %self.destination, "disembarked");
        Ok(())
    }
}

/// Boat to ship, ship to battleship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Upgrade {
    pub unit: ActorId,
}

impl Upgrade {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let upgrade = Upgrade { unit };
        if upgrade.is_feasible(gs) {
            vec![Action::from(upgrade)]
        } else {
            Vec::new()
        }
    }

    fn cost(next: UnitType) -> u32 {
        match next {
            UnitType::Battleship => BATTLESHIP_UPGRADE_COST,
            _ => SHIP_UPGRADE_COST,
        }
    }
}

impl Command for Upgrade {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((unit, tribe)) = acting_unit(gs, self.unit) else {
            return false;
        };
        let Some(next) = unit.kind.upgrade() else {
            return false;
        };
        !unit.status.is_finished()
            && tribe.can_afford(Self::cost(next))
            && next
                .stats()
                .tech
                .map_or(true, |t| tribe.tech.is_researched(t))
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let (tribe, next) = {
            let u = gs.unit_ref(self.unit)?;
            let next = u.kind.upgrade().ok_or_else(|| {
                GameError::InconsistentState(format!("{:?} has no upgrade", u.kind))
            })?;
            (u.tribe, next)
        };
        if !gs.tribe_mut(tribe)?.spend(Self::cost(next)) {
            return Err(GameError::InconsistentState(format!(
                "{tribe} cannot pay for {next:?}"
            )));
        }
        gs.unit_mut(self.unit)?.kind = next;
        Ok(())
    }
}
