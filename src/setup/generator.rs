//! Seeded procedural maps.
//!
//! Capitals sit near the corners; everything else is drawn tile by tile
//! from fixed terrain and resource weights. The same seed and size always
//! produce the same map.

use crate::core::{GameRng, Position, Resource, Terrain};

/// Terrain weights out of 100 for tiles away from capitals.
const TERRAIN_WEIGHTS: [(Terrain, u32); 5] = [
    (Terrain::Plain, 50),
    (Terrain::Forest, 20),
    (Terrain::Mountain, 10),
    (Terrain::ShallowWater, 13),
    (Terrain::DeepWater, 7),
];

const VILLAGE_CHANCE: f64 = 0.08;
const RUINS_CHANCE: f64 = 0.03;

/// One generated cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratedTile {
    pub terrain: Terrain,
    pub resource: Option<Resource>,
}

pub struct MapGenerator {
    rng: GameRng,
}

impl MapGenerator {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Capital sites for up to four tribes, one per corner.
    #[must_use]
    pub fn capital_sites(size: usize, tribes: usize) -> Vec<Position> {
        let far = size as i32 - 2;
        [
            Position::new(1, 1),
            Position::new(far, far),
            Position::new(1, far),
            Position::new(far, 1),
        ]
        .into_iter()
        .take(tribes)
        .collect()
    }

    /// Generate every tile of a `size` board, row-major.
    ///
    /// Tiles within one step of a capital are kept as land; villages stay
    /// at least three tiles from capitals and from each other.
    pub fn generate(
        &mut self,
        size: usize,
        capitals: &[Position],
    ) -> Vec<(Position, GeneratedTile)> {
        let mut out = Vec::with_capacity(size * size);
        let mut villages: Vec<Position> = Vec::new();
        for x in 0..size as i32 {
            for y in 0..size as i32 {
                let pos = Position::new(x, y);
                let nearest = capitals
                    .iter()
                    .map(|c| c.distance(pos))
                    .min()
                    .unwrap_or(u32::MAX);
                let tile = if nearest == 0 {
                    GeneratedTile {
                        terrain: Terrain::Plain,
                        resource: None,
                    }
                } else if nearest == 1 {
                    self.land_tile()
                } else if nearest >= 3
                    && villages.iter().all(|v| v.distance(pos) >= 3)
                    && self.rng.gen_bool(VILLAGE_CHANCE)
                {
                    villages.push(pos);
                    GeneratedTile {
                        terrain: Terrain::Village,
                        resource: None,
                    }
                } else {
                    self.any_tile()
                };
                out.push((pos, tile));
            }
        }
        out
    }

    fn draw_terrain(&mut self, weights: &[(Terrain, u32)]) -> Terrain {
        let total: u32 = weights.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.gen_range(0..total as i32) as u32;
        for &(terrain, weight) in weights {
            if roll < weight {
                return terrain;
            }
            roll -= weight;
        }
        Terrain::Plain
    }

    fn any_tile(&mut self) -> GeneratedTile {
        let terrain = self.draw_terrain(&TERRAIN_WEIGHTS);
        let resource = self.resource_for(terrain);
        GeneratedTile { terrain, resource }
    }

    fn land_tile(&mut self) -> GeneratedTile {
        let terrain = self.draw_terrain(&TERRAIN_WEIGHTS[..3]);
        let resource = self.resource_for(terrain);
        GeneratedTile { terrain, resource }
    }

    fn resource_for(&mut self, terrain: Terrain) -> Option<Resource> {
        if terrain.is_land() && self.rng.gen_bool(RUINS_CHANCE) {
            return Some(Resource::Ruins);
        }
        let (resource, chance) = match terrain {
            Terrain::Plain => {
                if self.rng.gen_bool(0.5) {
                    (Resource::Fruit, 0.2)
                } else {
                    (Resource::Crops, 0.2)
                }
            }
            Terrain::Forest => (Resource::Animal, 0.3),
            Terrain::Mountain => (Resource::Ore, 0.3),
            Terrain::ShallowWater => (Resource::Fish, 0.3),
            Terrain::DeepWater => (Resource::Whales, 0.1),
            Terrain::Village | Terrain::City => return None,
        };
        self.rng.gen_bool(chance).then_some(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_map() {
        let caps = MapGenerator::capital_sites(12, 2);
        let a = MapGenerator::new(7).generate(12, &caps);
        let b = MapGenerator::new(7).generate(12, &caps);
        assert_eq!(a, b);
        assert_eq!(a.len(), 144);
    }

    #[test]
    fn test_capital_surroundings_are_land() {
        let caps = MapGenerator::capital_sites(10, 4);
        assert_eq!(caps.len(), 4);
        for seed in 0..20 {
            let map = MapGenerator::new(seed).generate(10, &caps);
            for (pos, tile) in &map {
                if caps.iter().any(|c| c.distance(*pos) <= 1) {
                    assert!(tile.terrain.is_land(), "{pos} is {:?}", tile.terrain);
                    assert_ne!(tile.terrain, Terrain::Village);
                }
            }
        }
    }

    #[test]
    fn test_villages_keep_their_distance() {
        let caps = MapGenerator::capital_sites(16, 2);
        let map = MapGenerator::new(3).generate(16, &caps);
        let villages: Vec<Position> = map
            .iter()
            .filter(|(_, t)| t.terrain == Terrain::Village)
            .map(|(p, _)| *p)
            .collect();
        for (i, a) in villages.iter().enumerate() {
            assert!(caps.iter().all(|c| c.distance(*a) >= 3));
            for b in &villages[i + 1..] {
                assert!(a.distance(*b) >= 3);
            }
        }
    }
}
