use thiserror::Error;

use super::position::Position;

/// Structural and interface errors.
///
/// Rule violations are not errors: feasibility checks answer `false` and
/// `execute` answers `Ok(false)`. The variants here signal caller bugs
/// (`OutOfBounds`), broken internal bookkeeping (`InconsistentState`) or
/// rejected input at the crate's outer surfaces.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("position {position} is outside the {size}x{size} board")]
    OutOfBounds { position: Position, size: usize },

    #[error("inconsistent state: {0}")]
    InconsistentState(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("action not available now: {0}")]
    IllegalAction(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
