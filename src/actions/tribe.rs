//! Tribe-level actions: research, roads and ending the turn.

use serde::{Deserialize, Serialize};

use super::action::{Action, Command, Subject};
use crate::core::constants::{ROAD_COST, TECH_POINTS_PER_TIER};
use crate::core::{GameError, Position, Result, Technology, Terrain, TribeId};
use crate::game::GameState;

/// Research a technology whose parent is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResearchTech {
    pub tribe: TribeId,
    pub tech: Technology,
}

impl ResearchTech {
    fn cost(&self, gs: &GameState) -> Option<u32> {
        let tribe = gs.tribe(self.tribe)?;
        Some(tribe.tech.cost(self.tech, gs.city_count(self.tribe)))
    }

    #[must_use]
    pub fn variants(gs: &GameState, tribe: TribeId) -> Vec<Action> {
        Technology::ALL
            .into_iter()
            .map(|tech| ResearchTech { tribe, tech })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for ResearchTech {
    fn subject(&self) -> Subject {
        Subject::Tribe(self.tribe)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        if !gs.can_act(self.tribe) {
            return false;
        }
        let Some(tribe) = gs.tribe(self.tribe) else {
            return false;
        };
        let Some(cost) = self.cost(gs) else {
            return false;
        };
        tribe.can_afford(cost) && tribe.tech.can_research(self.tech)
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let cost = self.cost(gs).unwrap_or(u32::MAX);
        let tribe = gs.tribe_mut(self.tribe)?;
        if !tribe.spend(cost) {
            return Err(GameError::InconsistentState(format!(
                "{} cannot pay {cost} for {:?}",
                self.tribe, self.tech
            )));
        }
        tribe.tech.research(self.tech);
        tribe.add_score(TECH_POINTS_PER_TIER * self.tech.tier());
        Ok(())
    }
}

/// Build a road on an observed land tile that no enemy holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildRoad {
    pub tribe: TribeId,
    pub position: Position,
}

impl BuildRoad {
    #[must_use]
    pub fn variants(gs: &GameState, tribe: TribeId) -> Vec<Action> {
        let ready = gs.can_act(tribe)
            && gs.tribe(tribe).map_or(false, |t| {
                t.tech.is_researched(Technology::Roads) && t.can_afford(ROAD_COST)
            });
        if !ready {
            return Vec::new();
        }
        gs.board()
            .positions()
            .map(|position| BuildRoad { tribe, position })
            .filter(|a| a.is_feasible(gs))
            .map(Action::from)
            .collect()
    }
}

impl Command for BuildRoad {
    fn subject(&self) -> Subject {
        Subject::Tribe(self.tribe)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        if !gs.can_act(self.tribe) {
            return false;
        }
        let Some(tribe) = gs.tribe(self.tribe) else {
            return false;
        };
        if !tribe.can_afford(ROAD_COST) || !tribe.tech.is_researched(Technology::Roads) {
            return false;
        }
        let board = gs.board();
        let Ok(tile) = board.tile(self.position) else {
            return false;
        };
        if tile.road || !matches!(tile.terrain, Terrain::Plain | Terrain::Forest) {
            return false;
        }
        if !board.is_observed(self.tribe, self.position).unwrap_or(false) {
            return false;
        }
        let enemy_land = tile
            .city
            .and_then(|c| gs.city(c))
            .map_or(false, |c| c.tribe != self.tribe);
        let enemy_unit = tile
            .unit
            .and_then(|u| gs.unit(u))
            .map_or(false, |u| u.tribe != self.tribe);
        !enemy_land && !enemy_unit
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        gs.board().tile(self.position)?;
        if !gs.tribe_mut(self.tribe)?.spend(ROAD_COST) {
            return Err(GameError::InconsistentState(format!(
                "{} cannot pay for a road",
                self.tribe
            )));
        }
        gs.board.set_road(self.position, true)?;
        gs.update_trade_network(self.tribe)
    }
}

/// End the active tribe's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndTurn {
    pub tribe: TribeId,
}

impl EndTurn {
    #[must_use]
    pub fn variants(gs: &GameState, tribe: TribeId) -> Vec<Action> {
        let end = EndTurn { tribe };
        if end.is_feasible(gs) {
            vec![Action::from(end)]
        } else {
            Vec::new()
        }
    }
}

impl Command for EndTurn {
    fn subject(&self) -> Subject {
        Subject::Tribe(self.tribe)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        gs.can_act(self.tribe)
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        gs.end_turn()
    }
}
