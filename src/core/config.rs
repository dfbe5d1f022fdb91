//! Game configuration.
//!
//! Drivers configure a game at startup by providing a `GameConfig`. The
//! forward model reads it for end conditions and starting resources; rule
//! constants that never vary between games live in [`super::constants`].

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_MAX_TURNS, INITIAL_STARS};

/// How a game is won.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// A tribe also loses when another tribe holds its original capital.
    #[default]
    Capitals,
    /// Only elimination or the turn limit ends the game; ranking by score.
    Score,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,

    /// The game ends once the turn counter exceeds this value.
    pub max_turns: u32,

    /// Stars each tribe starts with.
    pub initial_stars: u32,

    /// End a tribe's turn automatically once `EndTurn` is its only legal action.
    pub auto_end_turn: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Capitals,
            max_turns: DEFAULT_MAX_TURNS,
            initial_stars: INITIAL_STARS,
            auto_end_turn: false,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    #[must_use]
    pub fn with_initial_stars(mut self, stars: u32) -> Self {
        self.initial_stars = stars;
        self
    }

    /// Enable automatic turn ending.
    #[must_use]
    pub fn with_auto_end_turn(mut self, enabled: bool) -> Self {
        self.auto_end_turn = enabled;
        self
    }
}
