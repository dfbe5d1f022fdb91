//! The action subsystem: every move a tribe, city or unit can make.

pub mod action;
pub mod city;
pub mod tribe;
pub mod unit;

pub use action::{
    variants, Action, ActionRecord, ActionType, CityAction, Command, Subject, TribeAction,
    UnitAction,
};
pub use city::{
    Build, BurnForest, ClearForest, Destroy, GrowForest, LevelUp, ResourceGathering, Spawn,
};
pub use tribe::{BuildRoad, EndTurn, ResearchTech};
pub use unit::{
    reachable_tiles, Attack, Capture, Convert, Disband, Disembark, Embark, Examine, HealOthers,
    Move, Recover, RuinsReward, Upgrade,
};
