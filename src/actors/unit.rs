//! Units: type stat tables and per-instance state.
//!
//! Attack, defence, movement and range are functions of [`UnitType`]; only
//! hit points, kills, the veteran flag, position, status and ownership live
//! on the instance.

use serde::{Deserialize, Serialize};

use crate::core::{ActorId, Position, Technology, TribeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Warrior,
    Rider,
    Defender,
    Swordman,
    Archer,
    Catapult,
    Knight,
    MindBender,
    Boat,
    Ship,
    Battleship,
    Superunit,
}

/// Constant stats of a unit type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitStats {
    pub attack: f64,
    pub defence: f64,
    pub movement: u32,
    /// Naval types report 0; they inherit the max HP of the land unit
    /// that embarked.
    pub max_hp: u32,
    pub range: u32,
    pub cost: u32,
    pub tech: Option<Technology>,
}

const fn stats(
    attack: f64,
    defence: f64,
    movement: u32,
    max_hp: u32,
    range: u32,
    cost: u32,
    tech: Option<Technology>,
) -> UnitStats {
    UnitStats {
        attack,
        defence,
        movement,
        max_hp,
        range,
        cost,
        tech,
    }
}

impl UnitType {
    /// Land types a city can train, in spawn-variant order.
    pub const TRAINABLE: [UnitType; 8] = [
        UnitType::Warrior,
        UnitType::Rider,
        UnitType::Defender,
        UnitType::Swordman,
        UnitType::Archer,
        UnitType::Catapult,
        UnitType::Knight,
        UnitType::MindBender,
    ];

    #[must_use]
    pub const fn stats(self) -> UnitStats {
        use Technology as T;
        match self {
            UnitType::Warrior => stats(2.0, 2.0, 1, 10, 1, 2, None),
            UnitType::Rider => stats(2.0, 1.0, 2, 10, 1, 3, Some(T::Riding)),
            UnitType::Defender => stats(1.0, 3.0, 1, 15, 1, 3, Some(T::Strategy)),
            UnitType::Swordman => stats(3.0, 3.0, 1, 15, 1, 5, Some(T::Smithery)),
            UnitType::Archer => stats(2.0, 1.0, 1, 10, 2, 3, Some(T::Archery)),
            UnitType::Catapult => stats(4.0, 0.0, 1, 10, 3, 8, Some(T::Mathematics)),
            UnitType::Knight => stats(3.5, 1.0, 3, 15, 1, 8, Some(T::Chivalry)),
            UnitType::MindBender => stats(0.0, 1.0, 1, 10, 1, 5, Some(T::Philosophy)),
            UnitType::Boat => stats(1.0, 1.0, 2, 0, 2, 0, Some(T::Fishing)),
            UnitType::Ship => stats(2.0, 2.0, 3, 0, 2, 0, Some(T::Sailing)),
            UnitType::Battleship => stats(4.0, 3.0, 3, 0, 2, 0, Some(T::Navigation)),
            UnitType::Superunit => stats(5.0, 4.0, 1, 40, 1, 0, None),
        }
    }

    #[must_use]
    pub const fn is_naval(self) -> bool {
        matches!(self, UnitType::Boat | UnitType::Ship | UnitType::Battleship)
    }

    /// Only mind benders convert and heal others.
    #[must_use]
    pub const fn is_mind_bender(self) -> bool {
        matches!(self, UnitType::MindBender)
    }

    /// Naval upgrade path: Boat to Ship to Battleship.
    #[must_use]
    pub const fn upgrade(self) -> Option<UnitType> {
        match self {
            UnitType::Boat => Some(UnitType::Ship),
            UnitType::Ship => Some(UnitType::Battleship),
            _ => None,
        }
    }
}

/// Per-turn progress of a unit. Reset to `Fresh` when its tribe's turn
/// begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    #[default]
    Fresh,
    Moved,
    Attacked,
    Finished,
}

impl UnitStatus {
    #[must_use]
    pub const fn can_move(self) -> bool {
        matches!(self, UnitStatus::Fresh)
    }

    #[must_use]
    pub const fn can_attack(self) -> bool {
        matches!(self, UnitStatus::Fresh | UnitStatus::Moved)
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, UnitStatus::Finished)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: ActorId,
    pub tribe: TribeId,
    pub kind: UnitType,
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub kills: u32,
    pub veteran: bool,
    pub status: UnitStatus,
    /// City that trained the unit. `None` once that city is lost.
    pub city: Option<ActorId>,
    /// Land type carried by a naval unit, restored on disembark.
    pub land_type: Option<UnitType>,
}

impl Unit {
    /// A land unit at full health.
    #[must_use]
    pub fn new(
        id: ActorId,
        kind: UnitType,
        tribe: TribeId,
        position: Position,
        city: Option<ActorId>,
    ) -> Self {
        let max_hp = kind.stats().max_hp;
        Self {
            id,
            tribe,
            kind,
            position,
            hp: max_hp,
            max_hp,
            kills: 0,
            veteran: false,
            status: UnitStatus::Fresh,
            city,
            land_type: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn attack(&self) -> f64 {
        self.kind.stats().attack
    }

    #[must_use]
    pub fn defence(&self) -> f64 {
        self.kind.stats().defence
    }

    #[must_use]
    pub fn movement(&self) -> u32 {
        self.kind.stats().movement
    }

    #[must_use]
    pub fn range(&self) -> u32 {
        self.kind.stats().range
    }

    #[must_use]
    pub fn is_naval(&self) -> bool {
        self.kind.is_naval()
    }

    /// Apply damage; HP floors at zero. Returns whether the unit died.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.hp = self.hp.saturating_sub(damage);
        self.hp == 0
    }

    /// Restore up to `amount` HP, capped at max HP.
    pub fn heal(&mut self, amount: u32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Whether the unit has enough kills to be promoted.
    #[must_use]
    pub fn promotion_due(&self, threshold: u32) -> bool {
        !self.veteran && self.kills >= threshold
    }
}
