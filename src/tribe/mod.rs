//! Tribe and economy model: stars, research, monuments and score.

pub mod monuments;
pub mod player;
pub mod tech;

pub use monuments::{MonumentStatus, Monuments};
pub use player::{Tribe, TribeKind, TribeResult};
pub use tech::TechnologyTree;
