//! # rust-tribes
//!
//! A forward model for a turn-based, multi-tribe strategy game on a square
//! grid, built for search agents and self-play.
//!
//! ## Design Principles
//!
//! 1. **Copyable State**: `GameState::copy` is cheap and fully independent.
//!    Board, actors and history live in `im-rs` persistent structures so
//!    lookahead agents can branch freely.
//!
//! 2. **Feasibility Before Execution**: every action answers
//!    `is_feasible` without side effects. `execute` on an infeasible action
//!    changes nothing and reports `false`.
//!
//! 3. **Deterministic Under Seed**: all randomness flows through the
//!    state's `GameRng`. Same seed and same actions give the same game.
//!
//! ## Modules
//!
//! - `core`: ids, positions, RNG, configuration, rule tables, errors
//! - `board`: tiles, the grid and per-tribe observation
//! - `actors`: cities and units
//! - `tribe`: stars, research, monuments and score
//! - `actions`: the command set and its variant enumeration
//! - `game`: the state aggregate, turn flow, trade network and results
//! - `setup`: scenario builder and procedural maps
//! - `agent`: the agent trait and the sequential driver loop

pub mod core;
pub mod board;
pub mod actors;
pub mod tribe;
pub mod actions;
pub mod game;
pub mod setup;
pub mod agent;

// Re-export commonly used types
pub use crate::core::{
    ActorId, TribeId, TribeMap,
    GameRng, GameRngState,
    GameConfig, GameMode, GameError, Result,
    Position, Terrain, Resource, Technology, Building,
};

pub use crate::board::{Board, Tile};

pub use crate::actors::{Actor, ActorKind, City, CityBonus, Unit, UnitStatus, UnitType};

pub use crate::tribe::{Tribe, TribeKind, TribeResult};

pub use crate::actions::{Action, ActionRecord, ActionType, Command};

pub use crate::game::{GameResult, GameState, TurnPhase};

pub use crate::setup::GameBuilder;

pub use crate::agent::{play_game, Agent, DoNothingAgent, RandomAgent};
