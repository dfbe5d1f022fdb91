//! Tribe (player) economy and standing.

use serde::{Deserialize, Serialize};

use super::monuments::Monuments;
use super::tech::TechnologyTree;
use crate::actors::UnitType;
use crate::core::{ActorId, Technology, TribeId};

/// Playable tribe archetypes. Each starts with one technology and one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TribeKind {
    XinXi,
    Imperius,
    Bardur,
    Oumaji,
}

impl TribeKind {
    pub const ALL: [TribeKind; 4] = [
        TribeKind::XinXi,
        TribeKind::Imperius,
        TribeKind::Bardur,
        TribeKind::Oumaji,
    ];

    #[must_use]
    pub const fn starting_tech(self) -> Technology {
        match self {
            TribeKind::XinXi => Technology::Climbing,
            TribeKind::Imperius => Technology::Organization,
            TribeKind::Bardur => Technology::Hunting,
            TribeKind::Oumaji => Technology::Riding,
        }
    }

    #[must_use]
    pub const fn starting_unit(self) -> UnitType {
        match self {
            TribeKind::Oumaji => UnitType::Rider,
            _ => UnitType::Warrior,
        }
    }
}

/// Standing of a tribe in the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TribeResult {
    #[default]
    InProgress,
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tribe {
    pub id: TribeId,
    pub kind: TribeKind,
    stars: u32,
    pub score: u32,
    pub tech: TechnologyTree,
    pub monuments: Monuments,
    pub capital: Option<ActorId>,
    /// Enemy units killed, for the Gate of Power.
    pub kills: u32,
    /// Consecutive own turns ended without attacking, for the Altar of Peace.
    pub turns_without_attack: u32,
    /// Set by any attack this turn; cleared when the turn ends.
    pub attacked_this_turn: bool,
    pub result: TribeResult,
}

impl Tribe {
    #[must_use]
    pub fn new(id: TribeId, kind: TribeKind, stars: u32) -> Self {
        let mut tech = TechnologyTree::new();
        tech.research(kind.starting_tech());
        Self {
            id,
            kind,
            stars,
            score: 0,
            tech,
            monuments: Monuments::new(),
            capital: None,
            kills: 0,
            turns_without_attack: 0,
            attacked_this_turn: false,
            result: TribeResult::InProgress,
        }
    }

    #[must_use]
    pub fn stars(&self) -> u32 {
        self.stars
    }

    #[must_use]
    pub fn can_afford(&self, cost: u32) -> bool {
        self.stars >= cost
    }

    /// Spend `cost` stars. Returns `false` and changes nothing if the tribe
    /// can't afford it.
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.stars.checked_sub(cost) {
            Some(left) => {
                self.stars = left;
                true
            }
            None => false,
        }
    }

    pub fn add_stars(&mut self, amount: u32) {
        self.stars = self.stars.saturating_add(amount);
    }

    pub fn set_stars(&mut self, stars: u32) {
        self.stars = stars;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.result == TribeResult::InProgress
    }
}
