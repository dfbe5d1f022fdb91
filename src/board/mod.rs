//! Spatial layer: tiles, the board grid and per-tribe observation.

pub mod grid;
pub mod tile;

pub use grid::Board;
pub use tile::Tile;
