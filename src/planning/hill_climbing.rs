//! Greedy hill climbing toward the destination
//!
//! Not optimal and not complete: an attempt walks into the first cul-de-sac
//! it finds and gives up there. Kept as a comparison baseline.

use ahash::AHashSet;

use crate::core::error::Result;
use crate::core::types::{Cell, Tick};
use crate::planning::{check_endpoints, PlanResult};
use crate::world::Grid;

/// Run up to `max_restarts` greedy attempts and keep the shortest that arrives
///
/// Attempts never revisit a cell within themselves. Ties between equally
/// close neighbours go to the first in expansion order, so attempts are
/// deterministic. `nodes_expanded` counts the cells stepped onto across all
/// attempts.
pub fn hill_climbing(
    grid: &Grid,
    origin: Cell,
    destination: Cell,
    time_step: Tick,
    max_restarts: u32,
) -> Result<PlanResult> {
    check_endpoints(grid, origin, destination)?;
    if !grid.is_traversable(origin, time_step) {
        return Ok(PlanResult::unreachable(0));
    }

    let mut best_path: Option<Vec<Cell>> = None;
    let mut nodes_expanded = 0;

    for _ in 0..max_restarts {
        let mut current = origin;
        let mut path = vec![origin];
        let mut visited: AHashSet<Cell> = AHashSet::new();
        visited.insert(origin);

        while current != destination {
            let next = current
                .neighbors()
                .into_iter()
                .filter(|n| grid.is_traversable(*n, time_step) && !visited.contains(n))
                .min_by_key(|n| n.manhattan_distance(&destination));

            let Some(next) = next else {
                break; // dead end
            };

            nodes_expanded += 1;
            visited.insert(next);
            path.push(next);
            current = next;
        }

        let shorter = best_path.as_ref().map_or(true, |best| path.len() < best.len());
        if current == destination && shorter {
            best_path = Some(path);
        }
    }

    match best_path {
        Some(path) => {
            let cost = grid.path_cost(&path)?;
            Ok(PlanResult::found(path, cost as f64, nodes_expanded))
        }
        None => Ok(PlanResult::unreachable(nodes_expanded)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::test_support::{assert_valid_path, small_grid};
    use crate::world::GroundType;

    #[test]
    fn test_hill_climbing_reaches_goal() {
        let grid = small_grid();
        let result = hill_climbing(&grid, Cell::new(1, 1), Cell::new(5, 5), 0, 5).unwrap();
        let path = result.path.unwrap();
        assert_valid_path(&grid, &path, Cell::new(1, 1), Cell::new(5, 5), 0);
        assert!(!path.contains(&Cell::new(3, 3)));
    }

    #[test]
    fn test_hill_climbing_open_grid_is_direct() {
        let grid = Grid::new(8, 8);
        let result = hill_climbing(&grid, Cell::new(0, 0), Cell::new(4, 3), 0, 1).unwrap();
        assert_eq!(result.moves(), 7);
        assert_eq!(result.cost, 14.0);
    }

    #[test]
    fn test_hill_climbing_reports_terrain_cost() {
        let mut grid = Grid::new(3, 1);
        grid.set_terrain(Cell::new(1, 0), GroundType::Sludge).unwrap();
        grid.set_terrain(Cell::new(2, 0), GroundType::Field).unwrap();
        let result = hill_climbing(&grid, Cell::new(0, 0), Cell::new(2, 0), 0, 3).unwrap();
        assert_eq!(result.cost, 12.0);
    }

    #[test]
    fn test_hill_climbing_dead_ends_in_cul_de_sac() {
        // A U-shaped trap opening away from the goal:
        //
        //   . . . . . . .
        //   . # # # # . .
        //   . . S . # . G
        //   . # # # # . .
        //
        // Greedy descent walks right into the pocket and stalls at (3, 2).
        let mut grid = Grid::new(7, 4);
        for x in 1..5 {
            grid.add_static_obstacle(Cell::new(x, 1)).unwrap();
            grid.add_static_obstacle(Cell::new(x, 3)).unwrap();
        }
        grid.add_static_obstacle(Cell::new(4, 2)).unwrap();

        let result = hill_climbing(&grid, Cell::new(2, 2), Cell::new(6, 2), 0, 5).unwrap();
        assert!(result.path.is_none());
        assert!(result.cost.is_infinite());

        // BFS proves the goal is reachable
        let bfs = crate::planning::breadth_first(&grid, Cell::new(2, 2), Cell::new(6, 2), 0).unwrap();
        assert!(bfs.is_found());
    }

    #[test]
    fn test_zero_restarts_fails() {
        let grid = Grid::new(4, 4);
        let result = hill_climbing(&grid, Cell::new(0, 0), Cell::new(3, 3), 0, 0).unwrap();
        assert!(!result.is_found());
        assert_eq!(result.nodes_expanded, 0);
    }

    #[test]
    fn test_origin_is_destination() {
        let grid = Grid::new(4, 4);
        let result = hill_climbing(&grid, Cell::new(2, 2), Cell::new(2, 2), 0, 1).unwrap();
        assert_eq!(result.path, Some(vec![Cell::new(2, 2)]));
        assert_eq!(result.cost, 0.0);
    }
}
