//! Per-tribe research state.

use serde::{Deserialize, Serialize};

use crate::core::constants::TECH_BASE_COST;
use crate::core::Technology;

/// Researched technologies as a bit mask over [`Technology::bit`].
///
/// Research is monotone: nothing ever clears a bit.
///
/// ```
/// use rust_tribes::core::Technology;
/// use rust_tribes::tribe::TechnologyTree;
///
/// let mut tree = TechnologyTree::new();
/// assert!(!tree.can_research(Technology::Mining));
/// assert!(tree.research(Technology::Climbing));
/// assert!(tree.can_research(Technology::Mining));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TechnologyTree {
    researched: u32,
}

impl TechnologyTree {
    #[must_use]
    pub const fn new() -> Self {
        Self { researched: 0 }
    }

    #[must_use]
    pub const fn is_researched(&self, tech: Technology) -> bool {
        self.researched & tech.bit() != 0
    }

    /// Not yet researched and its parent (if any) is.
    #[must_use]
    pub fn can_research(&self, tech: Technology) -> bool {
        !self.is_researched(tech) && tech.parent().map_or(true, |p| self.is_researched(p))
    }

    /// Mark `tech` researched. Returns `false` if it already was.
    pub fn research(&mut self, tech: Technology) -> bool {
        if self.is_researched(tech) {
            return false;
        }
        self.researched |= tech.bit();
        true
    }

    /// Stars needed to research `tech` for a tribe owning `cities` cities.
    #[must_use]
    pub fn cost(&self, tech: Technology, cities: usize) -> u32 {
        let base = tech.tier() * cities as u32 + TECH_BASE_COST;
        if self.is_researched(Technology::Philosophy) {
            base - base / 3
        } else {
            base
        }
    }

    #[must_use]
    pub const fn researched_count(&self) -> u32 {
        self.researched.count_ones()
    }

    #[must_use]
    pub fn all_researched(&self) -> bool {
        self.researched_count() as usize == Technology::ALL.len()
    }

    /// Researched technologies in declaration order.
    pub fn researched(&self) -> impl Iterator<Item = Technology> + '_ {
        Technology::ALL
            .into_iter()
            .filter(move |t| self.is_researched(*t))
    }
}
