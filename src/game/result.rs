use serde::{Deserialize, Serialize};

use crate::core::TribeId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(TribeId),
    /// Nobody won.
    Draw,
    /// Shared victory (tied score at the turn limit).
    Winners(Vec<TribeId>),
}

impl GameResult {
    #[must_use]
    pub fn from_winners(mut winners: Vec<TribeId>) -> Self {
        match winners.len() {
            0 => GameResult::Draw,
            1 => GameResult::Winner(winners[0]),
            _ => {
                winners.sort();
                GameResult::Winners(winners)
            }
        }
    }

    /// Check if a tribe won.
    #[must_use]
    pub fn is_winner(&self, tribe: TribeId) -> bool {
        match self {
            GameResult::Winner(t) => *t == tribe,
            GameResult::Winners(ts) => ts.contains(&tribe),
            GameResult::Draw => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(TribeId::new(1));
        assert!(!result.is_winner(TribeId::new(0)));
        assert!(result.is_winner(TribeId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(TribeId::new(0)));

        let shared = GameResult::Winners(vec![TribeId::new(0), TribeId::new(2)]);
        assert!(shared.is_winner(TribeId::new(0)));
        assert!(!shared.is_winner(TribeId::new(1)));
    }

    #[test]
    fn test_from_winners() {
        assert_eq!(GameResult::from_winners(vec![]), GameResult::Draw);
        assert_eq!(
            GameResult::from_winners(vec![TribeId::new(2)]),
            GameResult::Winner(TribeId::new(2))
        );
        assert_eq!(
            GameResult::from_winners(vec![TribeId::new(3), TribeId::new(1)]),
            GameResult::Winners(vec![TribeId::new(1), TribeId::new(3)])
        );
    }
}
