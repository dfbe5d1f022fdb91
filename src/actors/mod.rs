//! Actor model: cities and units held in the game state's registry.
//!
//! Actors reference each other only through [`ActorId`]s, so the registry
//! can be cloned wholesale without fixing up pointers.

pub mod city;
pub mod unit;

use serde::{Deserialize, Serialize};

pub use city::{City, CityBonus};
pub use unit::{Unit, UnitStats, UnitStatus, UnitType};

use crate::core::{ActorId, Position, TribeId};

/// Type tag used for dispatch and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    City,
    Unit(UnitType),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    City(City),
    Unit(Unit),
}

impl Actor {
    #[must_use]
    pub fn id(&self) -> ActorId {
        match self {
            Actor::City(c) => c.id,
            Actor::Unit(u) => u.id,
        }
    }

    #[must_use]
    pub fn tribe(&self) -> TribeId {
        match self {
            Actor::City(c) => c.tribe,
            Actor::Unit(u) => u.tribe,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Actor::City(c) => c.position,
            Actor::Unit(u) => u.position,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::City(_) => ActorKind::City,
            Actor::Unit(u) => ActorKind::Unit(u.kind),
        }
    }

    #[must_use]
    pub fn as_city(&self) -> Option<&City> {
        match self {
            Actor::City(c) => Some(c),
            Actor::Unit(_) => None,
        }
    }

    #[must_use]
    pub fn as_unit(&self) -> Option<&Unit> {
        match self {
            Actor::Unit(u) => Some(u),
            Actor::City(_) => None,
        }
    }

    pub fn as_city_mut(&mut self) -> Option<&mut City> {
        match self {
            Actor::City(c) => Some(c),
            Actor::Unit(_) => None,
        }
    }

    pub fn as_unit_mut(&mut self) -> Option<&mut Unit> {
        match self {
            Actor::Unit(u) => Some(u),
            Actor::City(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_accessors() {
        let unit = Actor::Unit(Unit::new(
            ActorId::new(4),
            UnitType::Archer,
            TribeId::new(1),
            Position::new(3, 1),
            None,
        ));
        assert_eq!(unit.id(), ActorId::new(4));
        assert_eq!(unit.tribe(), TribeId::new(1));
        assert_eq!(unit.kind(), ActorKind::Unit(UnitType::Archer));
        assert!(unit.as_city().is_none());

        let city = Actor::City(City::new(
            ActorId::new(2),
            TribeId::new(0),
            Position::new(0, 0),
            false,
        ));
        assert_eq!(city.kind(), ActorKind::City);
        assert_eq!(city.position(), Position::new(0, 0));
        assert!(city.as_unit().is_none());
    }
}
