//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter (discrete time unit)
pub type Tick = u64;

/// Fixed 4-connected expansion order: +x, -x, +y, -y
///
/// Every planner walks neighbours in this order, which keeps tie-breaking
/// reproducible.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A discrete grid coordinate
///
/// Signed so that neighbours of border cells are representable; the grid
/// rejects them in its queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance (|dx| + |dy|)
    pub fn manhattan_distance(&self, other: &Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours in expansion order
    pub fn neighbors(&self) -> [Cell; 4] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| Cell::new(self.x + dx, self.y + dy))
    }

    /// True if `other` is exactly one orthogonal step away
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::str::FromStr for Cell {
    type Err = String;

    /// Parses `"x,y"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
        let x = x
            .trim()
            .parse()
            .map_err(|_| format!("invalid x coordinate '{}'", x))?;
        let y = y
            .trim()
            .parse()
            .map_err(|_| format!("invalid y coordinate '{}'", y))?;
        Ok(Cell::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Cell::new(0, 0);
        let b = Cell::new(4, 4);
        assert_eq!(a.manhattan_distance(&b), 8);
        assert_eq!(b.manhattan_distance(&a), 8);
        assert_eq!(Cell::new(-1, 2).manhattan_distance(&Cell::new(1, 0)), 4);
    }

    #[test]
    fn test_neighbor_order() {
        let n = Cell::new(2, 2).neighbors();
        assert_eq!(
            n,
            [
                Cell::new(3, 2),
                Cell::new(1, 2),
                Cell::new(2, 3),
                Cell::new(2, 1)
            ]
        );
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!("3,4".parse::<Cell>(), Ok(Cell::new(3, 4)));
        assert_eq!(" 5 , 0 ".parse::<Cell>(), Ok(Cell::new(5, 0)));
        assert!("3".parse::<Cell>().is_err());
        assert!("a,1".parse::<Cell>().is_err());
    }

    #[test]
    fn test_adjacency() {
        assert!(Cell::new(0, 0).is_adjacent(&Cell::new(0, 1)));
        assert!(!Cell::new(0, 0).is_adjacent(&Cell::new(1, 1)));
        assert!(!Cell::new(0, 0).is_adjacent(&Cell::new(0, 0)));
    }
}
