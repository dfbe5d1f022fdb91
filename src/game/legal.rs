//! Legal action queries.
//!
//! Order is stable for a given state: cities by id, then units by id, then
//! the tribe's own actions with `EndTurn` last.

use super::state::GameState;
use crate::actions::{self, Action, Subject};
use crate::core::{ActorId, TribeId};

impl GameState {
    /// Every legal action of the active tribe. Empty when the game is over.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.active_tribe() {
            Some(tribe) => self.legal_actions_of(tribe),
            None => Vec::new(),
        }
    }

    /// Every legal action of `tribe`; empty unless it is the active tribe.
    #[must_use]
    pub fn legal_actions_of(&self, tribe: TribeId) -> Vec<Action> {
        if !self.can_act(tribe) {
            return Vec::new();
        }
        let mut out = Vec::new();
        for city in self.cities_of(tribe) {
            out.extend(actions::variants(self, Subject::Actor(city.id)));
        }
        for unit in self.units_of(tribe) {
            out.extend(actions::variants(self, Subject::Actor(unit.id)));
        }
        out.extend(actions::variants(self, Subject::Tribe(tribe)));
        out
    }

    /// Legal actions of one city or unit.
    #[must_use]
    pub fn actor_actions(&self, actor: ActorId) -> Vec<Action> {
        actions::variants(self, Subject::Actor(actor))
    }

    /// Legal research, road and end-turn actions of `tribe`.
    #[must_use]
    pub fn tribe_actions(&self, tribe: TribeId) -> Vec<Action> {
        actions::variants(self, Subject::Tribe(tribe))
    }
}
