//! Action representation and dispatch.
//!
//! An [`Action`] is a plain value: a family tag (tribe, city or unit), the
//! concrete action and its parameters. It names its subject and targets by
//! id or position only, so the same value can be checked or executed against
//! any copy of a game state.
//!
//! Every concrete action implements [`Command`]:
//! - `is_feasible` is a pure predicate over the state.
//! - `apply` performs the effects; only ever called after `is_feasible`.
//! - `execute` combines the two and never mutates an infeasible action.
//!
//! Each action type also has a `variants` function enumerating every
//! feasible parameterization for a subject; [`ActionType::variants`]
//! dispatches to it.
//!
//! ```
//! use rust_tribes::actions::{Action, ActionType, EndTurn};
//! use rust_tribes::core::TribeId;
//!
//! let end = Action::from(EndTurn { tribe: TribeId::new(0) });
//! assert_eq!(end.action_type(), ActionType::EndTurn);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::city::{
    Build, BurnForest, ClearForest, Destroy, GrowForest, LevelUp, ResourceGathering, Spawn,
};
use super::tribe::{BuildRoad, EndTurn, ResearchTech};
use super::unit::{
    Attack, Capture, Convert, Disband, Disembark, Embark, Examine, HealOthers, Move, Recover,
    Upgrade,
};
use crate::core::{ActorId, Result, TribeId};
use crate::game::GameState;

/// Who performs an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Tribe(TribeId),
    Actor(ActorId),
}

/// Shared protocol of every concrete action.
pub trait Command: std::fmt::Debug {
    fn subject(&self) -> Subject;

    /// Whether the action may run now. Pure; never fails.
    fn is_feasible(&self, gs: &GameState) -> bool;

    /// Perform the effects. Callers must have checked feasibility.
    fn apply(&self, gs: &mut GameState) -> Result<()>;

    /// Check feasibility and apply. `Ok(false)` leaves `gs` untouched.
    fn execute(&self, gs: &mut GameState) -> Result<bool> {
        if !self.is_feasible(gs) {
            trace!(action = ?self, "rejected infeasible action");
            return Ok(false);
        }
        self.apply(gs)?;
        debug!(action = ?self, "applied action");
        Ok(true)
    }
}

macro_rules! action_family {
    ($(#[$doc:meta])* $family:ident => $outer:ident { $($variant:ident),* $(,)? }) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $family {
            $($variant($variant)),*
        }

        impl $family {
            #[must_use]
            pub fn action_type(&self) -> ActionType {
                match self {
                    $(Self::$variant(_) => ActionType::$variant),*
                }
            }
        }

        impl Command for $family {
            fn subject(&self) -> Subject {
                match self {
                    $(Self::$variant(a) => a.subject()),*
                }
            }

            fn is_feasible(&self, gs: &GameState) -> bool {
                match self {
                    $(Self::$variant(a) => a.is_feasible(gs)),*
                }
            }

            fn apply(&self, gs: &mut GameState) -> Result<()> {
                match self {
                    $(Self::$variant(a) => a.apply(gs)),*
                }
            }
        }

        $(
            impl From<$variant> for Action {
                fn from(action: $variant) -> Self {
                    Action::$outer($family::$variant(action))
                }
            }
        )*
    };
}

action_family!(
    /// Actions whose subject is a whole tribe.
    TribeAction => Tribe { ResearchTech, BuildRoad, EndTurn }
);

action_family!(
    /// Actions performed by a city.
    CityAction => City {
        Build, BurnForest, ClearForest, Destroy, GrowForest, LevelUp, ResourceGathering, Spawn,
    }
);

action_family!(
    /// Actions performed by a unit.
    UnitAction => Unit {
        Move, Attack, Capture, Convert, Disband, Embark, Disembark, Examine, HealOthers,
        Recover, Upgrade,
    }
);

/// A complete game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Tribe(TribeAction),
    City(CityAction),
    Unit(UnitAction),
}

impl Action {
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        match self {
            Action::Tribe(a) => a.action_type(),
            Action::City(a) => a.action_type(),
            Action::Unit(a) => a.action_type(),
        }
    }
}

impl Command for Action {
    fn subject(&self) -> Subject {
        match self {
            Action::Tribe(a) => a.subject(),
            Action::City(a) => a.subject(),
            Action::Unit(a) => a.subject(),
        }
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        match self {
            Action::Tribe(a) => a.is_feasible(gs),
            Action::City(a) => a.is_feasible(gs),
            Action::Unit(a) => a.is_feasible(gs),
        }
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        match self {
            Action::Tribe(a) => a.apply(gs),
            Action::City(a) => a.apply(gs),
            Action::Unit(a) => a.apply(gs),
        }
    }
}

/// Abstract action kind, without parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionType {
    // Tribe
    ResearchTech,
    BuildRoad,
    EndTurn,
    // City
    Build,
    BurnForest,
    ClearForest,
    Destroy,
    GrowForest,
    LevelUp,
    ResourceGathering,
    Spawn,
    // Unit
    Move,
    Attack,
    Capture,
    Convert,
    Disband,
    Embark,
    Disembark,
    Examine,
    HealOthers,
    Recover,
    Upgrade,
}

impl ActionType {
    pub const TRIBE: [ActionType; 3] = [
        ActionType::ResearchTech,
        ActionType::BuildRoad,
        ActionType::EndTurn,
    ];

    pub const CITY: [ActionType; 8] = [
        ActionType::Build,
        ActionType::BurnForest,
        ActionType::ClearForest,
        ActionType::Destroy,
        ActionType::GrowForest,
        ActionType::LevelUp,
        ActionType::ResourceGathering,
        ActionType::Spawn,
    ];

    pub const UNIT: [ActionType; 11] = [
        ActionType::Move,
        ActionType::Attack,
        ActionType::Capture,
        ActionType::Convert,
        ActionType::Disband,
        ActionType::Embark,
        ActionType::Disembark,
        ActionType::Examine,
        ActionType::HealOthers,
        ActionType::Recover,
        ActionType::Upgrade,
    ];

    /// Every feasible concrete action of this kind for `subject`.
    ///
    /// Empty when the subject is of the wrong family, unknown, or has no
    /// legal parameterization.
    #[must_use]
    pub fn variants(self, gs: &GameState, subject: Subject) -> Vec<Action> {
        match (self, subject) {
            (ActionType::ResearchTech, Subject::Tribe(t)) => ResearchTech::variants(gs, t),
            (ActionType::BuildRoad, Subject::Tribe(t)) => BuildRoad::variants(gs, t),
            (ActionType::EndTurn, Subject::Tribe(t)) => EndTurn::variants(gs, t),

            (ActionType::Build, Subject::Actor(c)) => Build::variants(gs, c),
            (ActionType::BurnForest, Subject::Actor(c)) => BurnForest::variants(gs, c),
            (ActionType::ClearForest, Subject::Actor(c)) => ClearForest::variants(gs, c),
            (ActionType::Destroy, Subject::Actor(c)) => Destroy::variants(gs, c),
            (ActionType::GrowForest, Subject::Actor(c)) => GrowForest::variants(gs, c),
            (ActionType::LevelUp, Subject::Actor(c)) => LevelUp::variants(gs, c),
            (ActionType::ResourceGathering, Subject::Actor(c)) => {
                ResourceGathering::variants(gs, c)
            }
            (ActionType::Spawn, Subject::Actor(c)) => Spawn::variants(gs, c),

            (ActionType::Move, Subject::Actor(u)) => Move::variants(gs, u),
            (ActionType::Attack, Subject::Actor(u)) => Attack::variants(gs, u),
            (ActionType::Capture, Subject::Actor(u)) => Capture::variants(gs, u),
            (ActionType::Convert, Subject::Actor(u)) => Convert::variants(gs, u),
            (ActionType::Disband, Subject::Actor(u)) => Disband::variants(gs, u),
            (ActionType::Embark, Subject::Actor(u)) => Embark::variants(gs, u),
            (ActionType::Disembark, Subject::Actor(u)) => Disembark::variants(gs, u),
            (ActionType::Examine, Subject::Actor(u)) => Examine::variants(gs, u),
            (ActionType::HealOthers, Subject::Actor(u)) => HealOthers::variants(gs, u),
            (ActionType::Recover, Subject::Actor(u)) => Recover::variants(gs, u),
            (ActionType::Upgrade, Subject::Actor(u)) => Upgrade::variants(gs, u),

            _ => Vec::new(),
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The tribe whose turn it was.
    pub tribe: TribeId,
    pub action: Action,
    pub turn: u32,
    /// Position in the game's history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(tribe: TribeId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            tribe,
            action,
            turn,
            sequence,
        }
    }
}

/// Every legal action of `subject`, in a stable order.
#[must_use]
pub fn variants(gs: &GameState, subject: Subject) -> Vec<Action> {
    let kinds: &[ActionType] = match subject {
        Subject::Tribe(_) => &ActionType::TRIBE,
        Subject::Actor(id) => match gs.actor(id) {
            Some(crate::actors::Actor::City(_)) => &ActionType::CITY,
            Some(crate::actors::Actor::Unit(_)) => &ActionType::UNIT,
            None => &[],
        },
    };
    kinds
        .iter()
        .flat_map(|kind| kind.variants(gs, subject))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, Technology};

    #[test]
    fn test_action_type_tags() {
        let research = Action::from(ResearchTech {
            tribe: TribeId::new(0),
            tech: Technology::Fishing,
        });
        assert_eq!(research.action_type(), ActionType::ResearchTech);
        assert_eq!(research.subject(), Subject::Tribe(TribeId::new(0)));

        let mv = Action::from(Move {
            unit: ActorId::new(3),
            destination: Position::new(1, 1),
        });
        assert_eq!(mv.action_type(), ActionType::Move);
        assert_eq!(mv.subject(), Subject::Actor(ActorId::new(3)));
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::from(Build {
            city: ActorId::new(2),
            building: crate::core::Building::Farm,
            position: Position::new(4, 1),
        });
        let json = serde_json::to_string(&action).unwrap();
        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, restored);
    }

    #[test]
    fn test_family_lists_cover_every_type() {
        assert_eq!(
            ActionType::TRIBE.len() + ActionType::CITY.len() + ActionType::UNIT.len(),
            22
        );
    }
}
