//! Grid world model
//!
//! Terrain costs, static obstacles and moving obstacles, plus the text layout
//! format used to load and save worlds.

pub mod grid;
pub mod layout;
pub mod obstacle;
pub mod terrain;

pub use grid::Grid;
pub use layout::{GridLayout, ObstacleSpec};
pub use obstacle::MovingObstacle;
pub use terrain::{CellType, GroundType};
