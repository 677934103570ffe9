//! Preset test maps
//!
//! Four fixed scenarios of increasing difficulty, each with an agent start,
//! a package and a drop-off.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Cell;
use crate::world::{Grid, GroundType, MovingObstacle};

/// Seed for the random obstacles on the large map, fixed so runs compare
pub const LARGE_MAP_SEED: u64 = 12345;

/// Number of random obstacles scattered over the large map
pub const LARGE_MAP_OBSTACLES: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MapPreset {
    /// 15x15, a short wall and a sludge band
    Small,
    /// 22x22, an obstacle cross and a river strip along the west edge
    Medium,
    /// 55x55, scattered obstacles over asphalt, sludge and river regions
    Large,
    /// 25x25, a wall plus a moving obstacle with pace 2
    Dynamic,
}

/// A ready-to-run delivery setup
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: Grid,
    pub start: Cell,
    pub package: Cell,
    pub drop_off: Cell,
}

fn paint(grid: &mut Grid, xs: std::ops::Range<i32>, ys: std::ops::Range<i32>, ground: GroundType) -> Result<()> {
    for x in xs {
        for y in ys.clone() {
            grid.set_terrain(Cell::new(x, y), ground)?;
        }
    }
    Ok(())
}

impl MapPreset {
    pub const ALL: [MapPreset; 4] = [
        MapPreset::Small,
        MapPreset::Medium,
        MapPreset::Large,
        MapPreset::Dynamic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MapPreset::Small => "small",
            MapPreset::Medium => "medium",
            MapPreset::Large => "large",
            MapPreset::Dynamic => "dynamic",
        }
    }

    /// Build the scenario on a grid whose untouched cells use `default_ground`
    pub fn build(&self, default_ground: GroundType) -> Result<Scenario> {
        let start = Cell::new(0, 0);
        match self {
            MapPreset::Small => {
                let mut grid = Grid::with_default_ground(15, 15, default_ground);
                for x in 5..9 {
                    grid.add_static_obstacle(Cell::new(x, 7))?;
                }
                paint(&mut grid, 0..15, 0..5, GroundType::Asphalt)?;
                paint(&mut grid, 0..15, 9..15, GroundType::Sludge)?;
                Ok(Scenario {
                    grid,
                    start,
                    package: Cell::new(8, 8),
                    drop_off: Cell::new(3, 5),
                })
            }
            MapPreset::Medium => {
                let mut grid = Grid::with_default_ground(22, 22, default_ground);
                for i in 6..12 {
                    grid.add_static_obstacle(Cell::new(i, 9))?;
                    grid.add_static_obstacle(Cell::new(9, i))?;
                }
                paint(&mut grid, 0..22, 0..6, GroundType::Asphalt)?;
                paint(&mut grid, 0..22, 13..22, GroundType::Sludge)?;
                paint(&mut grid, 0..6, 0..22, GroundType::River)?;
                Ok(Scenario {
                    grid,
                    start,
                    package: Cell::new(15, 15),
                    drop_off: Cell::new(8, 6),
                })
            }
            MapPreset::Large => {
                let mut grid = Grid::with_default_ground(55, 55, default_ground);
                let package = Cell::new(35, 35);
                let drop_off = Cell::new(12, 12);

                let mut rng = ChaCha8Rng::seed_from_u64(LARGE_MAP_SEED);
                for _ in 0..LARGE_MAP_OBSTACLES {
                    let cell = Cell::new(rng.gen_range(0..55), rng.gen_range(0..55));
                    if cell != start && cell != package && cell != drop_off {
                        grid.add_static_obstacle(cell)?;
                    }
                }

                paint(&mut grid, 0..55, 0..12, GroundType::Asphalt)?;
                paint(&mut grid, 0..55, 35..55, GroundType::Sludge)?;
                paint(&mut grid, 0..12, 0..55, GroundType::River)?;
                Ok(Scenario {
                    grid,
                    start,
                    package,
                    drop_off,
                })
            }
            MapPreset::Dynamic => {
                let mut grid = Grid::with_default_ground(25, 25, default_ground);
                for x in 12..18 {
                    grid.add_static_obstacle(Cell::new(x, 15))?;
                }

                let patrol = [
                    (4, 4),
                    (4, 5),
                    (4, 6),
                    (5, 5),
                    (6, 5),
                    (5, 6),
                    (5, 4),
                    (6, 4),
                    (6, 6),
                ]
                .map(Cell::from)
                .to_vec();
                grid.add_moving_obstacle(MovingObstacle::new(Cell::new(3, 3), patrol, 2)?)?;

                paint(&mut grid, 0..25, 0..12, GroundType::Field)?;
                Ok(Scenario {
                    grid,
                    start,
                    package: Cell::new(18, 18),
                    drop_off: Cell::new(9, 4),
                })
            }
        }
    }
}

impl std::fmt::Display for MapPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
