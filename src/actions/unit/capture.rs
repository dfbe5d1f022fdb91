use serde::{Deserialize, Serialize};
use tracing::info;

use super::acting_unit;
use crate::actions::action::{Action, Command, Subject};
use crate::actors::UnitStatus;
use crate::core::constants::CAPTURE_POINTS;
use crate::core::{ActorId, GameError, Position, Result, Terrain};
use crate::game::GameState;

/// Take the village or enemy city the unit is standing on.
///
/// A village becomes a new level-1 city of the capturing tribe; an enemy
/// city changes hands with its tiles, leaving its old garrison homeless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub unit: ActorId,
    pub position: Position,
}

impl Capture {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let Some((u, _)) = acting_unit(gs, unit) else {
            return Vec::new();
        };
        let capture = Capture {
            unit,
            position: u.position,
        };
        if capture.is_feasible(gs) {
            vec![Action::from(capture)]
        } else {
            Vec::new()
        }
    }
}

enum Target {
    Village,
    City(ActorId),
}

fn target(gs: &GameState, unit: ActorId, position: Position) -> Option<Target> {
    let (u, _) = acting_unit(gs, unit)?;
    if u.position != position || !u.status.can_move() {
        return None;
    }
    let tile = gs.board().tile(position).ok()?;
    match tile.terrain {
        Terrain::Village => Some(Target::Village),
        Terrain::City => {
            let city = tile.city.and_then(|c| gs.city(c))?;
            (city.position == position && city.tribe != u.tribe).then_some(Target::City(city.id))
        }
        _ => None,
    }
}

impl Command for Capture {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        target(gs, self.unit, self.position).is_some()
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        let tribe = gs.unit_ref(self.unit)?.tribe;
        match target(gs, self.unit, self.position) {
            Some(Target::Village) => {
                let city = gs.found_city(tribe, self.position, false)?;
                gs.update_trade_network(tribe)?;
                info!(%tribe, %city, position = %self.position, "village captured");
            }
            Some(Target::City(city)) => {
                let previous = gs.city_ref(city)?.tribe;
                gs.transfer_city(city, tribe)?;
                gs.update_trade_network(tribe)?;
                gs.update_trade_network(previous)?;
                info!(%tribe, %city, from = %previous, "city captured");
            }
            None => {
                return Err(GameError::InconsistentState(format!(
                    "nothing to capture at {}",
                    self.position
                )))
            }
        }
        gs.tribe_mut(tribe)?.add_score(CAPTURE_POINTS);
        gs.unit_mut(self.unit)?.status = UnitStatus::Finished;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TribeId;
    use crate::game::TurnPhase;
    use crate::setup::GameBuilder;

    #[test]
    fn test_capture_village_founds_city() {
        let t0 = TribeId::new(0);
        let mut gs = GameBuilder::new(10)
            .with_capital(t0, Position::new(1, 1))
            .with_capital(TribeId::new(1), Position::new(8, 8))
            .with_village(Position::new(4, 4))
            .with_unit(t0, crate::actors::UnitType::Warrior, Position::new(4, 4))
            .build(3)
            .unwrap();
        let unit = gs.board().unit_at(Position::new(4, 4)).unwrap().unwrap();
        let variants = Capture::variants(&gs, unit);
        assert_eq!(variants.len(), 1);
        assert!(variants[0].execute(&mut gs).unwrap());

        assert_eq!(gs.city_count(t0), 2);
        let city = gs.board().city_at(Position::new(4, 4)).unwrap().unwrap();
        assert_eq!(gs.city(city).unwrap().tribe, t0);
        assert_eq!(gs.board().terrain_at(Position::new(4, 4)).unwrap(), Terrain::City);
        assert_eq!(gs.tribe(t0).unwrap().score, CAPTURE_POINTS);
        assert_eq!(gs.unit(unit).unwrap().status, UnitStatus::Finished);
        gs.check_invariants().unwrap();
    }

    #[test]
    fn test_capturing_enemy_capital_ends_game() {
        let t0 = TribeId::new(0);
        let t1 = TribeId::new(1);
        let mut gs = GameBuilder::new(8)
            .with_capital(t0, Position::new(1, 1))
            .with_capital(t1, Position::new(5, 5))
            .build(3)
            .unwrap();
        // Clear the enemy's starting unit off its capital and step in.
        let defender = gs.board().unit_at(Position::new(5, 5)).unwrap().unwrap();
        gs.remove_unit(defender).unwrap();
        let ours = gs.board().unit_at(Position::new(1, 1)).unwrap().unwrap();
        gs.relocate_unit(ours, Position::new(5, 5)).unwrap();

        let capture = Action::from(Capture {
            unit: ours,
            position: Position::new(5, 5),
        });
        assert!(gs.execute(&capture).unwrap());
        assert_eq!(gs.phase(), TurnPhase::Terminal);
        assert!(gs.result().unwrap().is_winner(t0));
    }

    #[test]
    fn test_cannot_capture_own_city() {
        let t0 = TribeId::new(0);
        let gs = GameBuilder::new(8)
            .with_capital(t0, Position::new(1, 1))
            .with_capital(TribeId::new(1), Position::new(5, 5))
            .build(3)
            .unwrap();
        let ours = gs.board().unit_at(Position::new(1, 1)).unwrap().unwrap();
        assert!(Capture::variants(&gs, ours).is_empty());
    }
}
