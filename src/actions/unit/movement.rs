//! Unit movement and path finding.
//!
//! Movement is measured in half points so road steps can cost half a
//! regular step. A unit spends 2 per step, or 1 when both the tile it
//! leaves and the one it enters carry a road (a city centre counts as
//! road). Entering a forest or mountain without a road ends movement, as
//! does entering a tile next to an enemy unit.
//!
//! Every tile on a path must be observed by the moving tribe. Units pass
//! through friendly units but may not stop on them; enemy units block.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{acting_unit, can_stand_on, enemy_unit_at, observed};
use crate::actions::action::{Action, Command, Subject};
use crate::actors::{Unit, UnitStatus};
use crate::board::Tile;
use crate::core::{ActorId, Position, Result, Terrain};
use crate::game::GameState;
use crate::tribe::Tribe;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub unit: ActorId,
    pub destination: Position,
}

impl Move {
    #[must_use]
    pub fn variants(gs: &GameState, unit: ActorId) -> Vec<Action> {
        let Some((u, tribe)) = acting_unit(gs, unit) else {
            return Vec::new();
        };
        if !u.status.can_move() {
            return Vec::new();
        }
        paths(gs, u, tribe)
            .into_iter()
            .map(|destination| Action::from(Move { unit, destination }))
            .collect()
    }
}

impl Command for Move {
    fn subject(&self) -> Subject {
        Subject::Actor(self.unit)
    }

    fn is_feasible(&self, gs: &GameState) -> bool {
        let Some((unit, tribe)) = acting_unit(gs, self.unit) else {
            return false;
        };
        if !unit.status.can_move() || unit.position == self.destination {
            return false;
        }
        // Cheap rejections before the search.
        if unit.position.distance(self.destination) > unit.movement() * 2
            || !observed(gs, unit.tribe, self.destination)
            || gs.board().unit_at(self.destination).ok() != Some(None)
        {
            return false;
        }
        paths(gs, unit, tribe).binary_search(&self.destination).is_ok()
    }

    fn apply(&self, gs: &mut GameState) -> Result<()> {
        gs.relocate_unit(self.unit, self.destination)?;
        gs.unit_mut(self.unit)?.status = UnitStatus::Moved;
        Ok(())
    }
}

/// Every tile `unit` could end its move on this turn, sorted.
///
/// Ignores the unit's status and whose turn it is.
#[must_use]
pub fn reachable_tiles(gs: &GameState, unit: ActorId) -> Vec<Position> {
    match gs.unit(unit).and_then(|u| Some((u, gs.tribe(u.tribe)?))) {
        Some((u, tribe)) => paths(gs, u, tribe),
        None => Vec::new(),
    }
}

fn is_roadlike(tile: &Tile) -> bool {
    tile.road || tile.terrain == Terrain::City
}

fn paths(gs: &GameState, unit: &Unit, tribe: &Tribe) -> Vec<Position> {
    let board = gs.board();
    let size = board.size();
    let budget = unit.movement() * 2;

    let mut best: FxHashMap<Position, u32> = FxHashMap::default();
    let mut heap = BinaryHeap::new();
    best.insert(unit.position, 0);
    heap.push(Reverse((0u32, unit.position)));

    while let Some(Reverse((spent, pos))) = heap.pop() {
        if best.get(&pos).map_or(false, |&b| b < spent) {
            continue;
        }
        let Ok(here) = board.tile(pos) else {
            continue;
        };
        if pos != unit.position && stops_movement(gs, unit, pos, here) {
            continue;
        }
        for next in pos.neighborhood(1, size) {
            let Ok(there) = board.tile(next) else {
                continue;
            };
            if !observed(gs, unit.tribe, next) || !can_stand_on(unit, tribe, there.terrain) {
                continue;
            }
            if enemy_unit_at(gs, unit.tribe, next).is_some() {
                continue;
            }
            let step = if is_roadlike(here) && is_roadlike(there) {
                1
            } else {
                2
            };
            let cost = spent + step;
            if cost > budget {
                continue;
            }
            if best.get(&next).map_or(true, |&b| cost < b) {
                best.insert(next, cost);
                heap.push(Reverse((cost, next)));
            }
        }
    }

    let mut out: Vec<Position> = best
        .into_keys()
        .filter(|p| *p != unit.position && board.unit_at(*p).ok() == Some(None))
        .collect();
    out.sort_unstable();
    out
}

/// Whether a unit that just entered `pos` must stop there.
fn stops_movement(gs: &GameState, unit: &Unit, pos: Position, tile: &Tile) -> bool {
    if !tile.road && matches!(tile.terrain, Terrain::Forest | Terrain::Mountain) {
        return true;
    }
    pos.neighborhood(1, gs.board().size())
        .into_iter()
        .any(|p| enemy_unit_at(gs, unit.tribe, p).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::UnitType;
    use crate::core::{Technology, TribeId};
    use crate::setup::GameBuilder;

    fn open_board() -> GameBuilder {
        GameBuilder::new(10)
            .with_capital(TribeId::new(0), Position::new(1, 1))
            .with_capital(TribeId::new(1), Position::new(8, 8))
    }

    fn warrior_at(gs: &GameState, pos: Position) -> ActorId {
        gs.board().unit_at(pos).unwrap().unwrap()
    }

    #[test]
    fn test_warrior_moves_one_step() {
        let gs = open_board().build(1).unwrap();
        let unit = warrior_at(&gs, Position::new(1, 1));
        let reach = reachable_tiles(&gs, unit);
        assert_eq!(reach.len(), 8);
        assert!(reach.iter().all(|p| p.distance(Position::new(1, 1)) == 1));
    }

    #[test]
    fn test_move_updates_board_and_status() {
        let mut gs = open_board().build(1).unwrap();
        let unit = warrior_at(&gs, Position::new(1, 1));
        let mv = Move {
            unit,
            destination: Position::new(2, 2),
        };
        assert!(mv.execute(&mut gs).unwrap());
        assert_eq!(gs.board().unit_at(Position::new(2, 2)).unwrap(), Some(unit));
        assert_eq!(gs.board().unit_at(Position::new(1, 1)).unwrap(), None);
        assert_eq!(gs.unit(unit).unwrap().status, UnitStatus::Moved);
        assert!(!mv.is_feasible(&gs));
        assert!(Move::variants(&gs, unit).is_empty());
    }

    #[test]
    fn test_roads_double_range() {
        let mut builder = open_board();
        for x in 2..=3 {
            builder = builder.with_road(Position::new(x, 1));
        }
        let gs = builder.build(1).unwrap();
        let unit = warrior_at(&gs, Position::new(1, 1));
        let reach = reachable_tiles(&gs, unit);
        assert!(reach.contains(&Position::new(3, 1)));
        assert!(!reach.contains(&Position::new(3, 2)));
    }

    #[test]
    fn test_mountains_need_climbing_and_stop() {
        let gs = open_board()
            .with_terrain(Position::new(2, 1), Terrain::Mountain)
            .with_tribes(vec![
                crate::tribe::TribeKind::Imperius,
                crate::tribe::TribeKind::Bardur,
            ])
            .build(1)
            .unwrap();
        let unit = warrior_at(&gs, Position::new(1, 1));
        assert!(!reachable_tiles(&gs, unit).contains(&Position::new(2, 1)));

        let mut gs = gs;
        gs.tribe_mut(TribeId::new(0))
            .unwrap()
            .tech
            .research(Technology::Climbing);
        assert!(reachable_tiles(&gs, unit).contains(&Position::new(2, 1)));
    }

    #[test]
    fn test_zone_of_control_stops_rider() {
        let t0 = TribeId::new(0);
        let gs = open_board()
            .with_unit(t0, UnitType::Rider, Position::new(4, 1))
            .with_unit(TribeId::new(1), UnitType::Warrior, Position::new(6, 1))
            .build(1)
            .unwrap();
        let mut gs = gs;
        gs.board.reveal_all(t0).unwrap();
        let rider = warrior_at(&gs, Position::new(4, 1));
        let reach = reachable_tiles(&gs, rider);
        // (5, 2) borders the enemy: reachable, but movement ends there, so
        // (6, 3) behind it is out of reach.
        assert!(reach.contains(&Position::new(5, 2)));
        assert!(!reach.contains(&Position::new(6, 3)));
        assert!(!reach.contains(&Position::new(6, 1)));
        assert!(reach.contains(&Position::new(4, 3)));
    }

    #[test]
    fn test_unobserved_tiles_are_unreachable() {
        let t0 = TribeId::new(0);
        let gs = open_board()
            .with_unit(t0, UnitType::Rider, Position::new(2, 2))
            .build(1)
            .unwrap();
        let rider = warrior_at(&gs, Position::new(2, 2));
        // Vision radius 1 around the rider; (4, 4) stays hidden.
        assert!(!reachable_tiles(&gs, rider).contains(&Position::new(4, 4)));
        assert!(reachable_tiles(&gs, rider).contains(&Position::new(3, 3)));
    }
}
