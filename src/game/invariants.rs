//! Bookkeeping sanity checks.
//!
//! These never trigger in a correctly implemented forward model. They back
//! `GameState::restore` and the property tests.

use super::state::GameState;
use crate::actors::Actor;
use crate::core::{GameError, Result, Terrain};

/// Every violated invariant, described. Empty if the state is consistent.
#[must_use]
pub fn invariant_violations(state: &GameState) -> Vec<String> {
    let mut violations = Vec::new();
    let board = state.board();

    for actor in state.actors() {
        let id = actor.id();
        let pos = actor.position();
        if !pos.in_bounds(board.size()) {
            violations.push(format!("{id} is off the board at {pos}"));
            continue;
        }
        if state.tribe(actor.tribe()).is_none() {
            violations.push(format!("{id} belongs to unknown {}", actor.tribe()));
        }
        match actor {
            Actor::Unit(unit) => {
                if board.unit_at(pos).ok().flatten() != Some(id) {
                    violations.push(format!("board does not hold {id} at {pos}"));
                }
                if unit.hp == 0 || unit.hp > unit.max_hp {
                    violations.push(format!("{id} has hp {} of {}", unit.hp, unit.max_hp));
                }
                if let Some(home) = unit.city {
                    let listed = state.city(home).map_or(false, |c| c.units.contains(&id));
                    if !listed {
                        violations.push(format!("{id} is not in the garrison of {home}"));
                    }
                }
            }
            Actor::City(city) => {
                if board.city_at(pos).ok().flatten() != Some(id) {
                    violations.push(format!("{id} does not own its centre {pos}"));
                }
                if board.terrain_at(pos).ok() != Some(Terrain::City) {
                    violations.push(format!("{id} centre {pos} is not city terrain"));
                }
                if city.population > city.capacity() {
                    violations.push(format!(
                        "{id} population {} exceeds capacity {}",
                        city.population,
                        city.capacity()
                    ));
                }
                for unit in &city.units {
                    if state.unit(*unit).and_then(|u| u.city) != Some(id) {
                        violations.push(format!("{id} lists {unit} which is not its unit"));
                    }
                }
                for tile in board.city_tiles(id) {
                    if board.city_at(tile).ok().flatten() != Some(id) {
                        violations.push(format!("{id} lists {tile} which it does not own"));
                    }
                }
            }
        }
    }

    for pos in board.positions() {
        let Ok(tile) = board.tile(pos) else { continue };
        if let Some(unit) = tile.unit {
            if state.unit(unit).map(|u| u.position) != Some(pos) {
                violations.push(format!("board has stale {unit} at {pos}"));
            }
        }
        if let Some(city) = tile.city {
            if state.city(city).is_none() {
                violations.push(format!("{pos} is owned by missing {city}"));
            }
        }
    }

    violations
}

impl GameState {
    /// Fail with [`GameError::InconsistentState`] if any bookkeeping
    /// invariant is broken.
    pub fn check_invariants(&self) -> Result<()> {
        let violations = invariant_violations(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(GameError::InconsistentState(violations.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, TribeId};
    use crate::setup::GameBuilder;

    #[test]
    fn test_fresh_game_is_consistent() {
        let gs = GameBuilder::new(8)
            .with_capital(TribeId::new(0), Position::new(1, 1))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .build(5)
            .unwrap();
        assert!(invariant_violations(&gs).is_empty());
    }

    #[test]
    fn test_detects_stale_board_unit() {
        let mut gs = GameBuilder::new(8)
            .with_capital(TribeId::new(0), Position::new(1, 1))
            .with_capital(TribeId::new(1), Position::new(6, 6))
            .build(5)
            .unwrap();
        gs.board
            .set_unit(Position::new(3, 3), Some(crate::core::ActorId::new(999)))
            .unwrap();
        let err = gs.check_invariants().unwrap_err();
        assert!(matches!(err, GameError::InconsistentState(_)));
    }
}
