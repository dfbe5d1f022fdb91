use serde::{Deserialize, Serialize};

use crate::core::Building;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonumentStatus {
    #[default]
    Unavailable,
    Available,
    /// Final: a built monument never becomes available again.
    Built,
}

/// Status of each of the six monuments for one tribe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Monuments {
    status: [MonumentStatus; 6],
}

fn slot(monument: Building) -> Option<usize> {
    Building::MONUMENTS.iter().position(|m| *m == monument)
}

impl Monuments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `Unavailable` for non-monument buildings.
    #[must_use]
    pub fn status(&self, monument: Building) -> MonumentStatus {
        slot(monument).map_or(MonumentStatus::Unavailable, |i| self.status[i])
    }

    #[must_use]
    pub fn is_buildable(&self, monument: Building) -> bool {
        self.status(monument) == MonumentStatus::Available
    }

    /// Make a monument available. No effect once built. Returns whether the
    /// status changed.
    pub fn make_available(&mut self, monument: Building) -> bool {
        match slot(monument) {
            Some(i) if self.status[i] == MonumentStatus::Unavailable => {
                self.status[i] = MonumentStatus::Available;
                true
            }
            _ => false,
        }
    }

    /// Record a monument as built. Returns `false` (and changes nothing)
    /// unless it was available.
    pub fn mark_built(&mut self, monument: Building) -> bool {
        match slot(monument) {
            Some(i) if self.status[i] == MonumentStatus::Available => {
                self.status[i] = MonumentStatus::Built;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn built_count(&self) -> usize {
        self.status
            .iter()
            .filter(|s| **s == MonumentStatus::Built)
            .count()
    }

    /// Monuments with their status, in [`Building::MONUMENTS`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Building, MonumentStatus)> + '_ {
        Building::MONUMENTS.into_iter().zip(self.status.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut m = Monuments::new();
        assert!(!m.mark_built(Building::EyeOfGod));

        assert!(m.make_available(Building::EyeOfGod));
        assert!(m.is_buildable(Building::EyeOfGod));
        assert!(m.mark_built(Building::EyeOfGod));
        assert_eq!(m.built_count(), 1);

        assert!(!m.mark_built(Building::EyeOfGod));
        assert!(!m.make_available(Building::EyeOfGod));
        assert_eq!(m.status(Building::EyeOfGod), MonumentStatus::Built);
        assert_eq!(m.built_count(), 1);
    }

    #[test]
    fn test_non_monument_ignored() {
        let mut m = Monuments::new();
        assert!(!m.make_available(Building::Farm));
        assert_eq!(m.status(Building::Farm), MonumentStatus::Unavailable);
    }
}
