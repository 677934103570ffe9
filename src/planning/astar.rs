//! A* pathfinding for the delivery grid
//!
//! Manhattan distance never exceeds the true remaining cost because every
//! move costs at least 2, so routes stay optimal.

use crate::core::error::Result;
use crate::core::types::{Cell, Tick};
use crate::planning::{best_first, PlanResult};
use crate::world::Grid;

/// Find the cheapest route, guided by Manhattan distance to `destination`
pub fn a_star(grid: &Grid, origin: Cell, destination: Cell, time_step: Tick) -> Result<PlanResult> {
    best_first::search(grid, origin, destination, time_step, |cell| {
        cell.manhattan_distance(&destination)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::test_support::{assert_valid_path, small_grid};
    use crate::planning::uniform_cost;
    use crate::world::GroundType;

    #[test]
    fn test_pathfind_straight_line() {
        let grid = Grid::new(10, 10);
        let start = Cell::new(0, 0);
        let goal = Cell::new(5, 0);

        let result = a_star(&grid, start, goal, 0).unwrap();

        let path = result.path.unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len(), 6);
        assert_eq!(result.cost, 10.0);
    }

    #[test]
    fn test_pathfind_around_obstacle() {
        let mut grid = Grid::new(10, 10);
        grid.add_static_obstacle(Cell::new(2, 0)).unwrap();
        grid.add_static_obstacle(Cell::new(3, 0)).unwrap();

        let result = a_star(&grid, Cell::new(0, 0), Cell::new(5, 0), 0).unwrap();

        let path = result.path.unwrap();
        assert!(!path.contains(&Cell::new(2, 0)));
        assert!(!path.contains(&Cell::new(3, 0)));
        assert_valid_path(&grid, &path, Cell::new(0, 0), Cell::new(5, 0), 0);
    }

    #[test]
    fn test_pathfind_no_path() {
        let mut grid = Grid::new(10, 10);
        let goal = Cell::new(5, 5);
        for neighbor in goal.neighbors() {
            grid.add_static_obstacle(neighbor).unwrap();
        }

        let result = a_star(&grid, Cell::new(0, 0), goal, 0).unwrap();

        assert!(result.path.is_none());
        assert!(result.cost.is_infinite());
    }

    #[test]
    fn test_pathfind_same_start_goal() {
        let grid = Grid::new(10, 10);
        let start = Cell::new(5, 5);

        let result = a_star(&grid, start, start, 0).unwrap();

        assert_eq!(result.path, Some(vec![start]));
        assert_eq!(result.nodes_expanded, 1);
    }

    #[test]
    fn test_pathfind_prefers_road() {
        // Field everywhere except an asphalt road along y = 1
        let mut grid = Grid::with_default_ground(10, 10, GroundType::Field);
        for x in 0..10 {
            grid.set_terrain(Cell::new(x, 1), GroundType::Asphalt).unwrap();
        }

        let result = a_star(&grid, Cell::new(0, 0), Cell::new(9, 0), 0).unwrap();

        // down (2) + 9 along the road (18) + up (4) beats 9 field moves (36)
        assert_eq!(result.cost, 24.0);
        assert!(result.path.unwrap().contains(&Cell::new(5, 1)));
    }

    #[test]
    fn test_matches_ucs_cost_with_fewer_expansions() {
        let grid = small_grid();
        let (from, to) = (Cell::new(1, 1), Cell::new(5, 5));

        let astar = a_star(&grid, from, to, 0).unwrap();
        let ucs = uniform_cost(&grid, from, to, 0).unwrap();

        assert_eq!(astar.cost, ucs.cost);
        assert!(astar.nodes_expanded <= ucs.nodes_expanded);
        assert_eq!(astar.path.as_ref().map(|p| p.len()), Some(9));
        assert_eq!(astar.path.unwrap().last(), Some(&Cell::new(5, 5)));
    }

    #[test]
    fn test_moving_obstacle_checked_at_time_step() {
        use crate::world::MovingObstacle;

        // A 1-wide corridor blocked at time 0 by an obstacle that leaves at time 1
        let mut grid = Grid::new(3, 1);
        let path = vec![Cell::new(1, 0), Cell::new(2, 0)];
        grid.add_moving_obstacle(MovingObstacle::new(Cell::new(1, 0), path, 1).unwrap())
            .unwrap();

        assert!(!a_star(&grid, Cell::new(0, 0), Cell::new(2, 0), 0)
            .unwrap()
            .is_found());
        // At time 1 the obstacle sits on the destination instead
        assert!(!a_star(&grid, Cell::new(0, 0), Cell::new(2, 0), 1)
            .unwrap()
            .is_found());
        assert!(a_star(&grid, Cell::new(0, 0), Cell::new(1, 0), 1)
            .unwrap()
            .is_found());
    }
}
