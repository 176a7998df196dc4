//! Random obstacle terrain.
//!
//! Every cell is independently blocked with a fixed probability, which is
//! enough to produce maps with occasional walls, dead ends and, now and
//! then, unreachable pockets.

use rand::{Rng, RngExt};

use crate::geom::Point;
use crate::grid::Grid;

/// Parameters for [`random_terrain`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainConfig {
    /// Grid width in cells.
    pub columns: i32,
    /// Grid height in cells.
    pub rows: i32,
    /// Probability (0.0–1.0) that a cell is blocked.
    pub wall_chance: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            rows: 20,
            wall_chance: 0.1,
        }
    }
}

/// Generate a grid where each cell is blocked with probability
/// `config.wall_chance`.
pub fn random_terrain<R: Rng>(config: &TerrainConfig, rng: &mut R) -> Grid {
    let mut grid = Grid::new(config.columns, config.rows);
    let chance = config.wall_chance.clamp(0.0, 1.0);
    for y in 0..grid.rows() {
        for x in 0..grid.columns() {
            let r: f64 = rng.random();
            if r < chance {
                grid.set_blocked(Point::new(x, y), true);
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dimensions_follow_config() {
        let cfg = TerrainConfig {
            columns: 12,
            rows: 7,
            ..TerrainConfig::default()
        };
        let g = random_terrain(&cfg, &mut StdRng::seed_from_u64(1));
        assert_eq!(g.columns(), 12);
        assert_eq!(g.rows(), 7);
    }

    #[test]
    fn test_extreme_chances() {
        let mut rng = StdRng::seed_from_u64(7);
        let open = TerrainConfig {
            wall_chance: 0.0,
            ..TerrainConfig::default()
        };
        assert_eq!(random_terrain(&open, &mut rng).open_count(), 400);

        let solid = TerrainConfig {
            wall_chance: 1.0,
            ..TerrainConfig::default()
        };
        assert_eq!(random_terrain(&solid, &mut rng).open_count(), 0);
    }

    #[test]
    fn test_same_seed_same_terrain() {
        let cfg = TerrainConfig::default();
        let a = random_terrain(&cfg, &mut StdRng::seed_from_u64(42));
        let b = random_terrain(&cfg, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_density_is_sparse() {
        let g = random_terrain(&TerrainConfig::default(), &mut StdRng::seed_from_u64(3));
        let walls = g.len() - g.open_count();
        // 10% of 400 cells on average; allow a wide margin.
        assert!(walls > 10 && walls < 90, "walls = {walls}");
    }
}
