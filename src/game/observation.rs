//! Fog of war.
//!
//! A tribe's explored grid is rebuilt from its current unit and city
//! positions after every executed action. Tiles once seen stay seen.

use super::state::GameState;
use crate::core::constants::{MOUNTAIN_VISION, UNIT_VISION};
use crate::core::{Position, Result, Terrain, TribeId};

impl GameState {
    /// Reveal everything `tribe` can currently see.
    pub(crate) fn refresh_observation(&mut self, tribe: TribeId) -> Result<()> {
        let mut sights: Vec<(Position, u32)> = Vec::new();
        for unit in self.units_of(tribe) {
            let radius = if self.board.terrain_at(unit.position)? == Terrain::Mountain {
                MOUNTAIN_VISION
            } else {
                UNIT_VISION
            };
            sights.push((unit.position, radius));
        }
        for city in self.cities_of(tribe) {
            sights.extend(self.board.city_tiles(city.id).map(|p| (p, 1)));
        }
        for (center, radius) in sights {
            self.board.reveal(tribe, center, radius)?;
        }
        Ok(())
    }

    pub(crate) fn refresh_all_observation(&mut self) -> Result<()> {
        let tribes: Vec<TribeId> = self.tribes.tribe_ids().collect();
        for tribe in tribes {
            self.refresh_observation(tribe)?;
        }
        Ok(())
    }
}
