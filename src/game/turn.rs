//! Turn lifecycle and end conditions.
//!
//! `Setup -> TribeTurn(i)* -> Terminal`. A tribe turn begins by refreshing
//! its units and collecting income; it ends by updating monument
//! availability and handing over to the next tribe still in the game.

use tracing::debug;

use super::state::{GameState, TurnPhase};
use crate::actors::{Actor, UnitStatus};
use crate::core::constants::{
    ALTAR_OF_PEACE_TURNS, EMPERORS_TOMB_STARS, GATE_OF_POWER_KILLS, PARK_OF_FORTUNE_LEVEL,
};
use crate::core::{Building, GameMode, Result, Technology, TribeId};
use crate::tribe::TribeResult;

impl GameState {
    /// Leave `Setup` and begin the first tribe's turn.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != TurnPhase::Setup {
            return Ok(());
        }
        self.refresh_all_observation()?;
        self.update_results()?;
        if self.is_terminal() {
            return Ok(());
        }
        match self.next_in_game(None) {
            Some(first) => self.begin_turn(first),
            None => {
                self.phase = TurnPhase::Terminal;
                Ok(())
            }
        }
    }

    /// Make `tribe` active: fresh units, cleared exhaustion, fog refresh and,
    /// from turn 2 on, city income.
    pub(crate) fn begin_turn(&mut self, tribe: TribeId) -> Result<()> {
        self.phase = TurnPhase::TribeTurn(tribe);
        self.exhausted.clear();

        let own_units: Vec<_> = self.units_of(tribe).map(|u| u.id).collect();
        for id in own_units {
            self.unit_mut(id)?.status = UnitStatus::Fresh;
        }

        if self.turn >= 2 {
            let income: u32 = self.cities_of(tribe).map(|c| c.production).sum();
            self.tribe_mut(tribe)?.add_stars(income);
        }

        self.refresh_observation(tribe)?;
        debug!(%tribe, turn = self.turn, stars = self.tribe_ref(tribe)?.stars(), "turn begins");
        Ok(())
    }

    /// End the active tribe's turn and start the next one.
    pub(crate) fn end_turn(&mut self) -> Result<()> {
        let Some(tribe) = self.active_tribe() else {
            return Ok(());
        };

        {
            let t = self.tribe_mut(tribe)?;
            if t.attacked_this_turn {
                t.turns_without_attack = 0;
            } else {
                t.turns_without_attack += 1;
            }
            t.attacked_this_turn = false;
        }
        self.update_monuments(tribe)?;

        let Some(next) = self.next_in_game(Some(tribe)) else {
            self.phase = TurnPhase::Terminal;
            return Ok(());
        };
        if next <= tribe {
            self.turn += 1;
            debug!(turn = self.turn, "round complete");
            if self.turn > self.config.max_turns {
                return self.finish_by_score();
            }
        }
        self.begin_turn(next)
    }

    /// Next tribe after `after` (or the first) that is still in the game.
    fn next_in_game(&self, after: Option<TribeId>) -> Option<TribeId> {
        let count = self.tribe_count();
        let start = after.map_or(0, |t| t.index() + 1);
        (0..count)
            .map(|offset| TribeId::new(((start + offset) % count) as u8))
            .find(|t| self.tribes[*t].is_active())
    }

    /// Mark monuments available whose conditions `tribe` now meets.
    pub(crate) fn update_monuments(&mut self, tribe: TribeId) -> Result<()> {
        let t = self.tribe_ref(tribe)?;
        let mut unlocked = Vec::new();
        if t.tech.is_researched(Technology::Meditation)
            && t.turns_without_attack >= ALTAR_OF_PEACE_TURNS
        {
            unlocked.push(Building::AltarOfPeace);
        }
        if t.stars() >= EMPERORS_TOMB_STARS {
            unlocked.push(Building::EmperorsTomb);
        }
        if self.board.is_fully_observed(tribe) {
            unlocked.push(Building::EyeOfGod);
        }
        if t.kills >= GATE_OF_POWER_KILLS {
            unlocked.push(Building::GateOfPower);
        }
        if self
            .cities_of(tribe)
            .any(|c| c.level >= PARK_OF_FORTUNE_LEVEL)
        {
            unlocked.push(Building::ParkOfFortune);
        }
        if t.tech.all_researched() {
            unlocked.push(Building::TowerOfWisdom);
        }

        let t = self.tribe_mut(tribe)?;
        for monument in unlocked {
            if t.monuments.make_available(monument) {
                debug!(%tribe, ?monument, "monument available");
            }
        }
        Ok(())
    }

    /// Apply elimination rules; finish the game when one tribe remains.
    pub(crate) fn update_results(&mut self) -> Result<()> {
        if self.is_terminal() {
            return Ok(());
        }
        let mut losers = Vec::new();
        for tribe in self.tribes() {
            if !tribe.is_active() {
                continue;
            }
            let no_cities = self.city_count(tribe.id) == 0;
            let capital_lost = self.config.mode == GameMode::Capitals
                && tribe
                    .capital
                    .and_then(|c| self.actors.get(&c))
                    .map_or(false, |c| c.tribe() != tribe.id);
            if no_cities || capital_lost {
                losers.push(tribe.id);
            }
        }
        for id in losers {
            self.tribe_mut(id)?.result = TribeResult::Lost;
            debug!(tribe = %id, "tribe eliminated");
        }

        let remaining: Vec<TribeId> = self
            .tribes()
            .filter(|t| t.is_active())
            .map(|t| t.id)
            .collect();
        match remaining.as_slice() {
            [] => {
                self.phase = TurnPhase::Terminal;
                debug!("game over: no tribe left");
            }
            [winner] if self.tribe_count() > 1 => {
                self.tribe_mut(*winner)?.result = TribeResult::Won;
                self.phase = TurnPhase::Terminal;
                debug!(winner = %winner, "game over: last tribe standing");
            }
            _ => {
                if let Some(active) = self.active_tribe() {
                    if !self.tribes[active].is_active() {
                        if let Some(next) = self.next_in_game(Some(active)) {
                            self.begin_turn(next)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Turn limit reached: the highest scores win, everyone else loses.
    fn finish_by_score(&mut self) -> Result<()> {
        let best = self
            .tribes()
            .filter(|t| t.is_active())
            .map(|t| t.score)
            .max()
            .unwrap_or(0);
        let ids: Vec<TribeId> = self.tribes().map(|t| t.id).collect();
        for id in ids {
            let t = self.tribe_mut(id)?;
            if t.is_active() {
                t.result = if t.score == best {
                    TribeResult::Won
                } else {
                    TribeResult::Lost
                };
            }
        }
        self.phase = TurnPhase::Terminal;
        debug!(turn = self.turn, best_score = best, "game over: turn limit");
        Ok(())
    }

    /// The tribe's original capital, whoever owns it now.
    #[must_use]
    pub fn capital_of(&self, tribe: TribeId) -> Option<&Actor> {
        self.tribes
            .get(tribe)
            .and_then(|t| t.capital)
            .and_then(|c| self.actors.get(&c))
    }
}
