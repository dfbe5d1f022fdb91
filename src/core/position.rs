//! Grid coordinates.
//!
//! Boards are square. Distances use the Chebyshev metric (diagonal steps
//! cost the same as orthogonal ones), which is what movement, attack range
//! and vision all measure.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A cell on the board. Signed so that offsets may step outside the grid;
/// [`Position::in_bounds`] tells whether a value is addressable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this position lies on a `size` x `size` board.
    #[must_use]
    pub const fn in_bounds(self, size: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < size && (self.y as usize) < size
    }

    /// Chebyshev distance.
    #[must_use]
    pub fn distance(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// All in-bounds positions within `radius`, excluding `self`, row-major.
    ///
    /// ```
    /// use rust_tribes::core::Position;
    ///
    /// // Corner cell on a 5x5 board has three neighbours.
    /// assert_eq!(Position::new(0, 0).neighborhood(1, 5).len(), 3);
    /// assert_eq!(Position::new(2, 2).neighborhood(1, 5).len(), 8);
    /// ```
    #[must_use]
    pub fn neighborhood(self, radius: u32, size: usize) -> SmallVec<[Position; 8]> {
        let r = radius as i32;
        let mut out = SmallVec::new();
        for x in (self.x - r)..=(self.x + r) {
            for y in (self.y - r)..=(self.y + r) {
                let p = Position::new(x, y);
                if p != self && p.in_bounds(size) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Like [`Position::neighborhood`] but including `self` when in bounds.
    #[must_use]
    pub fn area(self, radius: u32, size: usize) -> SmallVec<[Position; 9]> {
        let r = radius as i32;
        let mut out = SmallVec::new();
        for x in (self.x - r)..=(self.x + r) {
            for y in (self.y - r)..=(self.y + r) {
                let p = Position::new(x, y);
                if p.in_bounds(size) {
                    out.push(p);
                }
            }
        }
        out
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
