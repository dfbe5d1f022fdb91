//! Core engine types: ids, positions, RNG, configuration, rule enumerations
//! and errors.
//!
//! Everything here is plain data shared by the board, actors, tribes and the
//! action subsystem.

pub mod constants;
pub mod config;
pub mod error;
pub mod ids;
pub mod position;
pub mod rng;
pub mod types;

pub use config::{GameConfig, GameMode};
pub use error::{GameError, Result};
pub use ids::{ActorId, TribeId, TribeMap};
pub use position::Position;
pub use rng::{GameRng, GameRngState};
pub use types::{Building, BuildingBonus, BuildingSpec, Resource, Technology, Terrain, Uniqueness};
