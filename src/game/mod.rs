//! Game state: the aggregate root driving the forward model.

pub mod invariants;
mod legal;
mod observation;
mod registry;
pub mod result;
pub mod state;
mod trade;
mod turn;

pub use invariants::invariant_violations;
pub use result::GameResult;
pub use state::{GameState, TurnPhase};
