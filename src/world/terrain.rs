//! Ground types and cell classifications
//!
//! The numeric value of a ground type is the cost of entering a cell of that
//! type. River is expensive but never impassable; only obstacles block.

use serde::{Deserialize, Serialize};

/// Terrain covering a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GroundType {
    #[default]
    Asphalt, // 2
    Field,  // 4
    Sludge, // 8
    River,  // 12, near-blocking penalty
}

impl GroundType {
    pub const ALL: [GroundType; 4] = [
        GroundType::Asphalt,
        GroundType::Field,
        GroundType::Sludge,
        GroundType::River,
    ];

    /// Cost of entering a cell with this ground
    pub fn movement_cost(&self) -> u32 {
        match self {
            GroundType::Asphalt => 2,
            GroundType::Field => 4,
            GroundType::Sludge => 8,
            GroundType::River => 12,
        }
    }

    /// Inverse of `movement_cost`; `None` for values outside the enumeration
    pub fn from_cost(cost: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.movement_cost() == cost)
    }

    /// Single-character glyph used by the ASCII renderer
    pub fn glyph(&self) -> char {
        match self {
            GroundType::Asphalt => '.',
            GroundType::Field => ',',
            GroundType::Sludge => '~',
            GroundType::River => '=',
        }
    }
}

/// What occupies a cell in a rendered snapshot of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CellType {
    #[default]
    Empty,
    Obstacle,
    MovingObstacle,
    Agent,
    Cargo,
    Destination,
}

impl CellType {
    /// Does this occupant block movement?
    pub fn blocks_movement(&self) -> bool {
        matches!(self, CellType::Obstacle | CellType::MovingObstacle)
    }

    /// Glyph for the ASCII renderer; `None` means "show the ground instead"
    pub fn glyph(&self) -> Option<char> {
        match self {
            CellType::Empty => None,
            CellType::Obstacle => Some('#'),
            CellType::MovingObstacle => Some('M'),
            CellType::Agent => Some('A'),
            CellType::Cargo => Some('P'),
            CellType::Destination => Some('D'),
        }
    }
}
