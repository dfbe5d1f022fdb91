//! The authoritative game state.
//!
//! ## GameState
//!
//! Owns the board, the tribes, the actor registry, turn bookkeeping and the
//! RNG. Everything is either `Copy` or an `im` persistent collection, so
//! [`GameState::copy`] is O(1) and the copy shares no mutable memory with
//! the original: the first write on either side copies the touched chunk.
//!
//! ## Copies for search
//!
//! - [`GameState::copy`] is an exact clone, RNG position included. Replaying
//!   the same actions on the copy yields the same outcomes.
//! - [`GameState::clone_state`] forks the RNG so sibling rollouts diverge.
//!
//! Turn lifecycle lives in `turn.rs`, actor bookkeeping in `registry.rs`,
//! fog in `observation.rs` and the trade network in `trade.rs`.

use im::{OrdMap, OrdSet, Vector};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::result::GameResult;
use crate::actions::{Action, ActionRecord, ActionType, Command};
use crate::actors::{Actor, City, Unit};
use crate::board::Board;
use crate::core::{ActorId, GameConfig, GameError, GameRng, Result, TribeId, TribeMap};
use crate::tribe::{Tribe, TribeResult};

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Constructed, no tribe has started its turn.
    Setup,
    TribeTurn(TribeId),
    Terminal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) tribes: TribeMap<Tribe>,
    pub(crate) actors: OrdMap<ActorId, Actor>,
    pub(crate) next_actor_id: ActorId,
    pub(crate) phase: TurnPhase,
    /// Starts at 1; incremented when the last tribe in order ends its turn.
    pub(crate) turn: u32,
    /// Actors of the active tribe with no legal action left this turn.
    pub(crate) exhausted: OrdSet<ActorId>,
    pub(crate) rng: GameRng,
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a game in the `Setup` phase from a board and tribes.
    ///
    /// Tribe `i` must carry `TribeId(i)` and the board must hold one
    /// observation grid per tribe.
    pub fn new(config: GameConfig, board: Board, tribes: Vec<Tribe>, seed: u64) -> Result<Self> {
        if tribes.is_empty() || tribes.len() > 255 {
            return Err(GameError::InvalidParameter(format!(
                "tribe count must be in 1..=255, got {}",
                tribes.len()
            )));
        }
        if let Some((i, t)) = tribes
            .iter()
            .enumerate()
            .find(|(i, t)| t.id.index() != *i)
        {
            return Err(GameError::InvalidParameter(format!(
                "tribe at index {i} has id {}",
                t.id
            )));
        }
        if board.size() == 0 {
            return Err(GameError::InvalidParameter("board size must be positive".into()));
        }

        Ok(Self {
            config,
            board,
            tribes: TribeMap::from_vec(tribes),
            actors: OrdMap::new(),
            next_actor_id: ActorId::new(0),
            phase: TurnPhase::Setup,
            turn: 1,
            exhausted: OrdSet::new(),
            rng: GameRng::new(seed),
            history: Vector::new(),
        })
    }

    // === Copies ===

    /// Independent exact copy, RNG position included.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Independent copy with a forked RNG.
    ///
    /// Takes `&mut self` because forking the RNG advances the fork counter.
    #[must_use]
    pub fn clone_state(&mut self) -> Self {
        let rng = self.rng.fork();
        Self {
            rng,
            ..self.clone()
        }
    }

    // === Persistence ===

    /// Serialize the whole state.
    pub fn save(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Restore a state produced by [`GameState::save`].
    pub fn restore(bytes: &[u8]) -> Result<Self> {
        let state: Self = bincode::deserialize(bytes)?;
        state.check_invariants()?;
        Ok(state)
    }

    /// Byte image used to compare states for equality.
    pub fn snapshot(&self) -> Result<Vec<u8>> {
        self.save()
    }

    // === Reads ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn tribe_count(&self) -> usize {
        self.tribes.tribe_count()
    }

    #[must_use]
    pub fn tribe(&self, id: TribeId) -> Option<&Tribe> {
        self.tribes.get(id)
    }

    pub fn tribes(&self) -> impl Iterator<Item = &Tribe> {
        self.tribes.iter().map(|(_, t)| t)
    }

    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    #[must_use]
    pub fn city(&self, id: ActorId) -> Option<&City> {
        self.actors.get(&id).and_then(Actor::as_city)
    }

    #[must_use]
    pub fn unit(&self, id: ActorId) -> Option<&Unit> {
        self.actors.get(&id).and_then(Actor::as_unit)
    }

    /// All actors in id order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.actors.values().filter_map(Actor::as_city)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.actors.values().filter_map(Actor::as_unit)
    }

    pub fn cities_of(&self, tribe: TribeId) -> impl Iterator<Item = &City> {
        self.cities().filter(move |c| c.tribe == tribe)
    }

    pub fn units_of(&self, tribe: TribeId) -> impl Iterator<Item = &Unit> {
        self.units().filter(move |u| u.tribe == tribe)
    }

    #[must_use]
    pub fn city_count(&self, tribe: TribeId) -> usize {
        self.cities_of(tribe).count()
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Tribe whose turn it is, if any.
    #[must_use]
    pub fn active_tribe(&self) -> Option<TribeId> {
        match self.phase {
            TurnPhase::TribeTurn(t) => Some(t),
            TurnPhase::Setup | TurnPhase::Terminal => None,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == TurnPhase::Terminal
    }

    #[must_use]
    pub fn is_exhausted(&self, actor: ActorId) -> bool {
        self.exhausted.contains(&actor)
    }

    pub fn exhausted_actors(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.exhausted.iter().copied()
    }

    /// Every executed action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn tribe_result(&self, tribe: TribeId) -> Option<TribeResult> {
        self.tribes.get(tribe).map(|t| t.result)
    }

    /// Final result once the game is terminal.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_terminal() {
            return None;
        }
        let winners: Vec<TribeId> = self
            .tribes()
            .filter(|t| t.result == TribeResult::Won)
            .map(|t| t.id)
            .collect();
        Some(GameResult::from_winners(winners))
    }

    /// Tribes ordered by standing: winners first, then by score, then id.
    #[must_use]
    pub fn ranking(&self) -> Vec<(TribeId, u32)> {
        let mut ranked: Vec<&Tribe> = self.tribes().collect();
        ranked.sort_by(|a, b| {
            let rank = |t: &Tribe| match t.result {
                TribeResult::Won => 0,
                TribeResult::InProgress => 1,
                TribeResult::Lost => 2,
            };
            rank(a)
                .cmp(&rank(b))
                .then(b.score.cmp(&a.score))
                .then(a.id.cmp(&b.id))
        });
        ranked.into_iter().map(|t| (t.id, t.score)).collect()
    }

    // === Internal access for actions ===

    pub(crate) fn tribe_mut(&mut self, id: TribeId) -> Result<&mut Tribe> {
        self.tribes
            .get_mut(id)
            .ok_or_else(|| GameError::InconsistentState(format!("unknown {id}")))
    }

    pub(crate) fn city_mut(&mut self, id: ActorId) -> Result<&mut City> {
        self.actors
            .get_mut(&id)
            .and_then(Actor::as_city_mut)
            .ok_or_else(|| GameError::InconsistentState(format!("{id} is not a city")))
    }

    pub(crate) fn unit_mut(&mut self, id: ActorId) -> Result<&mut Unit> {
        self.actors
            .get_mut(&id)
            .and_then(Actor::as_unit_mut)
            .ok_or_else(|| GameError::InconsistentState(format!("{id} is not a unit")))
    }

    /// City lookup that fails loudly; for use after feasibility passed.
    pub(crate) fn city_ref(&self, id: ActorId) -> Result<&City> {
        self.city(id)
            .ok_or_else(|| GameError::InconsistentState(format!("{id} is not a city")))
    }

    pub(crate) fn unit_ref(&self, id: ActorId) -> Result<&Unit> {
        self.unit(id)
            .ok_or_else(|| GameError::InconsistentState(format!("{id} is not a unit")))
    }

    pub(crate) fn tribe_ref(&self, id: TribeId) -> Result<&Tribe> {
        self.tribes
            .get(id)
            .ok_or_else(|| GameError::InconsistentState(format!("unknown {id}")))
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    /// `tribe` may act: it is the active tribe and the game is running.
    #[must_use]
    pub fn can_act(&self, tribe: TribeId) -> bool {
        self.active_tribe() == Some(tribe)
    }

    /// City owned by the active tribe.
    #[must_use]
    pub fn acting_city(&self, id: ActorId) -> Option<&City> {
        self.city(id).filter(|c| self.can_act(c.tribe))
    }

    /// Unit owned by the active tribe.
    #[must_use]
    pub fn acting_unit(&self, id: ActorId) -> Option<&Unit> {
        self.unit(id).filter(|u| self.can_act(u.tribe))
    }

    // === Driving the game ===

    /// Execute `action`.
    ///
    /// Returns `Ok(false)` without touching the state when the action is not
    /// feasible. After a successful action the acting tribe's fog is
    /// refreshed, exhaustion is recomputed for each of its actors, end
    /// conditions are evaluated and, with `auto_end_turn`, the turn ends once
    /// `EndTurn` is the only legal action.
    pub fn execute(&mut self, action: &Action) -> Result<bool> {
        let Some(tribe) = self.active_tribe() else {
            return Ok(false);
        };
        let turn = self.turn;

        let applied = match action.execute(self) {
            Ok(applied) => applied,
            Err(err) => {
                warn!(?action, error = %err, "structural error while applying action");
                return Err(err);
            }
        };
        if !applied {
            return Ok(false);
        }

        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(tribe, *action, turn, sequence));

        if action.action_type() != ActionType::EndTurn {
            self.refresh_all_observation()?;
            self.update_exhaustion(tribe);
            self.update_results()?;
            if self.config.auto_end_turn && self.can_act(tribe) && self.only_end_turn_left(tribe) {
                debug!(%tribe, "auto-ending turn");
                self.end_turn()?;
            }
        }
        Ok(true)
    }

    /// Interactive wrapper: an infeasible action becomes
    /// [`GameError::IllegalAction`].
    pub fn perform(&mut self, action: &Action) -> Result<()> {
        if self.execute(action)? {
            Ok(())
        } else {
            Err(GameError::IllegalAction(format!("{action:?}")))
        }
    }

    /// An action can take options away from actors other than its subject
    /// (stars spent, tiles occupied), so every actor of `tribe` is checked.
    fn update_exhaustion(&mut self, tribe: TribeId) {
        let actors: Vec<ActorId> = self
            .cities_of(tribe)
            .map(|c| c.id)
            .chain(self.units_of(tribe).map(|u| u.id))
            .collect();
        self.exhausted = actors
            .into_iter()
            .filter(|id| self.actor_actions(*id).is_empty())
            .collect();
    }

    fn only_end_turn_left(&self, tribe: TribeId) -> bool {
        let actions = self.legal_actions_of(tribe);
        actions.len() == 1 && actions[0].action_type() == ActionType::EndTurn
    }
}
