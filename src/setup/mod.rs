//! Building games: explicit scenarios and seeded procedural maps.

mod builder;
pub mod generator;

pub use builder::GameBuilder;
pub use generator::{GeneratedTile, MapGenerator};
