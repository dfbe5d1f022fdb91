//! Tribe and actor identification.
//!
//! ## TribeId
//!
//! Type-safe tribe (player) identifier supporting 1-255 tribes.
//!
//! ## TribeMap
//!
//! Per-tribe storage backed by `Vec` for O(1) access, indexable by `TribeId`.
//!
//! ## ActorId
//!
//! Every city and unit has a unique `ActorId`. Actions and cross-references
//! (a city's garrison, a unit's home city) hold ids, never live references,
//! so they stay valid against any copy of the game state.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Tribe identifier. Tribe indices are 0-based and match turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TribeId(pub u8);

impl TribeId {
    /// Create a new tribe ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw tribe index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all tribe IDs for a game with `tribe_count` tribes.
    ///
    /// ```
    /// use rust_tribes::core::TribeId;
    ///
    /// let tribes: Vec<_> = TribeId::all(3).collect();
    /// assert_eq!(tribes, vec![TribeId::new(0), TribeId::new(1), TribeId::new(2)]);
    /// ```
    pub fn all(tribe_count: usize) -> impl Iterator<Item = TribeId> {
        (0..tribe_count as u8).map(TribeId)
    }
}

impl std::fmt::Display for TribeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tribe {}", self.0)
    }
}

/// Unique identifier for a city or unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    /// Create a new actor ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor({})", self.0)
    }
}

/// Per-tribe data storage with O(1) access.
///
/// ```
/// use rust_tribes::core::{TribeId, TribeMap};
///
/// let mut stars: TribeMap<u32> = TribeMap::with_value(2, 5);
/// stars[TribeId::new(1)] += 3;
/// assert_eq!(stars[TribeId::new(1)], 8);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TribeMap<T> {
    data: Vec<T>,
}

impl<T> TribeMap<T> {
    /// Create a new TribeMap with values from a factory function.
    pub fn new(tribe_count: usize, factory: impl Fn(TribeId) -> T) -> Self {
        assert!(tribe_count > 0, "Must have at least 1 tribe");
        assert!(tribe_count <= 255, "At most 255 tribes supported");

        let data = (0..tribe_count as u8).map(|i| factory(TribeId(i))).collect();
        Self { data }
    }

    /// Create a new TribeMap with all entries set to the same value.
    pub fn with_value(tribe_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(tribe_count, |_| value.clone())
    }

    /// Build from an already ordered vector (entry `i` belongs to `TribeId(i)`).
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 tribe");
        assert!(data.len() <= 255, "At most 255 tribes supported");
        Self { data }
    }

    /// Number of tribes.
    #[must_use]
    pub fn tribe_count(&self) -> usize {
        self.data.len()
    }

    /// Get a tribe's entry, or `None` for an unknown id.
    #[must_use]
    pub fn get(&self, tribe: TribeId) -> Option<&T> {
        self.data.get(tribe.index())
    }

    /// Mutable variant of [`TribeMap::get`].
    pub fn get_mut(&mut self, tribe: TribeId) -> Option<&mut T> {
        self.data.get_mut(tribe.index())
    }

    /// Iterate over (TribeId, &T) pairs in tribe order.
    pub fn iter(&self) -> impl Iterator<Item = (TribeId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (TribeId(i as u8), v))
    }

    /// Iterate over (TribeId, &mut T) pairs in tribe order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (TribeId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (TribeId(i as u8), v))
    }

    /// Iterate over all tribe IDs.
    pub fn tribe_ids(&self) -> impl Iterator<Item = TribeId> {
        (0..self.data.len() as u8).map(TribeId)
    }
}

impl<T> Index<TribeId> for TribeMap<T> {
    type Output = T;

    fn index(&self, tribe: TribeId) -> &Self::Output {
        &self.data[tribe.index()]
    }
}

impl<T> IndexMut<TribeId> for TribeMap<T> {
    fn index_mut(&mut self, tribe: TribeId) -> &mut Self::Output {
        &mut self.data[tribe.index()]
    }
}
