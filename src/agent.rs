//! Agents and the sequential driver loop.
//!
//! An [`Agent`] picks one action for the active tribe from a read-only view
//! of the state. Agents that want to look ahead work on
//! [`GameState::copy`] and discard it; they never touch the authoritative
//! state.

use tracing::{debug, warn};

use crate::actions::{Action, EndTurn};
use crate::core::{GameError, GameRng, Result};
use crate::game::{GameResult, GameState};

// =============================================================================
// Agents
// =============================================================================

pub trait Agent: Send {
    /// Choose an action for the active tribe. `None` ends the turn.
    fn act(&mut self, gs: &GameState) -> Option<Action>;
}

/// Ends its turn immediately, every turn.
#[derive(Clone, Debug, Default)]
pub struct DoNothingAgent;

impl Agent for DoNothingAgent {
    fn act(&mut self, gs: &GameState) -> Option<Action> {
        gs.active_tribe().map(|tribe| Action::from(EndTurn { tribe }))
    }
}

/// Picks uniformly among the legal actions.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, gs: &GameState) -> Option<Action> {
        let legal = gs.legal_actions();
        self.rng.choose(&legal).copied()
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Play until the game ends or `max_actions` actions have been executed.
///
/// `agents[i]` plays tribe `i`. An agent returning `None` or an action that
/// turns out infeasible has its turn ended for it. Returns the result if
/// the game reached a terminal state.
pub fn play_game(
    gs: &mut GameState,
    agents: &mut [Box<dyn Agent>],
    max_actions: usize,
) -> Result<Option<GameResult>> {
    if agents.len() < gs.tribe_count() {
        return Err(GameError::InvalidParameter(format!(
            "{} agents for {} tribes",
            agents.len(),
            gs.tribe_count()
        )));
    }

    let mut executed = 0;
    while executed < max_actions {
        let Some(tribe) = gs.active_tribe() else {
            break;
        };
        let end = Action::from(EndTurn { tribe });
        let action = agents[tribe.index()].act(gs).unwrap_or(end);
        if !gs.execute(&action)? {
            warn!(%tribe, ?action, "agent chose an infeasible action; ending its turn");
            gs.execute(&end)?;
        }
        executed += 1;
    }

    let result = gs.result();
    debug!(executed, turn = gs.turn(), ?result, "driver loop finished");
    Ok(result)
}
