//! Integration tests for the planner family against the grid world

use courier_grid::core::config::PlannerConfig;
use courier_grid::core::error::CourierError;
use courier_grid::core::types::Cell;
use courier_grid::planning::{
    a_star, breadth_first, hill_climbing, uniform_cost, Algorithm, Planner,
};
use courier_grid::world::{Grid, GroundType, MovingObstacle};

fn six_by_six() -> Grid {
    let mut grid = Grid::new(6, 6);
    grid.add_static_obstacle(Cell::new(3, 3)).unwrap();
    grid
}

fn assert_connected(grid: &Grid, path: &[Cell], origin: Cell, destination: Cell, time_step: u64) {
    assert_eq!(path.first(), Some(&origin));
    assert_eq!(path.last(), Some(&destination));
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(&pair[1]), 1, "{} -> {}", pair[0], pair[1]);
    }
    for cell in path {
        assert!(grid.is_traversable(*cell, time_step), "{} blocked", cell);
    }
}

fn seeded_planner() -> Planner {
    Planner::new(PlannerConfig {
        seed: Some(2024),
        ..PlannerConfig::default()
    })
}

#[test]
fn test_bfs_around_single_obstacle() {
    let grid = six_by_six();
    let result = breadth_first(&grid, Cell::new(0, 0), Cell::new(4, 4), 0).unwrap();

    let path = result.path.unwrap();
    assert_eq!(path.len(), 9);
    assert_eq!(result.cost, 8.0);
    assert!(!path.contains(&Cell::new(3, 3)));
    assert_connected(&grid, &path, Cell::new(0, 0), Cell::new(4, 4), 0);
}

#[test]
fn test_ucs_and_astar_agree_around_obstacle() {
    let grid = six_by_six();
    let ucs = uniform_cost(&grid, Cell::new(1, 1), Cell::new(5, 5), 0).unwrap();
    let astar = a_star(&grid, Cell::new(1, 1), Cell::new(5, 5), 0).unwrap();

    assert_eq!(ucs.cost, 16.0);
    assert_eq!(astar.cost, ucs.cost);
    assert!(astar.nodes_expanded <= ucs.nodes_expanded);
}

#[test]
fn test_enclosed_destination_is_unreachable_for_complete_planners() {
    let mut grid = Grid::new(8, 8);
    let goal = Cell::new(6, 6);
    for wall in goal.neighbors() {
        grid.add_static_obstacle(wall).unwrap();
    }

    for algorithm in [Algorithm::Bfs, Algorithm::Ucs, Algorithm::AStar] {
        let result = seeded_planner()
            .plan(&grid, Cell::new(0, 0), goal, algorithm)
            .unwrap();
        assert!(result.path.is_none(), "{} found a path", algorithm);
        assert!(result.cost.is_infinite());
        assert!(result.nodes_expanded > 0);
    }
}

#[test]
fn test_every_planner_returns_valid_paths_on_terrain() {
    let mut grid = Grid::with_default_ground(12, 12, GroundType::Field);
    for y in 0..12 {
        grid.set_terrain(Cell::new(6, y), GroundType::River).unwrap();
    }
    for y in 2..10 {
        grid.add_static_obstacle(Cell::new(4, y)).unwrap();
    }
    let (origin, destination) = (Cell::new(1, 5), Cell::new(10, 5));

    let mut planner = seeded_planner();
    for algorithm in Algorithm::ALL {
        let result = planner.plan(&grid, origin, destination, algorithm).unwrap();
        if let Some(path) = &result.path {
            assert_connected(&grid, path, origin, destination, 0);
            assert!(result.cost.is_finite());
        } else {
            assert!(algorithm.is_stochastic() || algorithm == Algorithm::HillClimbing);
            assert!(result.cost.is_infinite());
        }
    }
}

#[test]
fn test_terrain_cost_drives_optimal_route() {
    // A sludge band across the middle with a single asphalt gap far to the east
    let mut grid = Grid::new(9, 5);
    for x in 0..9 {
        grid.set_terrain(Cell::new(x, 2), GroundType::Sludge).unwrap();
    }
    grid.set_terrain(Cell::new(8, 2), GroundType::Asphalt).unwrap();

    let ucs = uniform_cost(&grid, Cell::new(0, 0), Cell::new(0, 4), 0).unwrap();
    let bfs = breadth_first(&grid, Cell::new(0, 0), Cell::new(0, 4), 0).unwrap();

    // Straight through the sludge: 2 + 8 + 2 + 2 = 14 beats the 20-move detour
    assert_eq!(ucs.cost, 14.0);
    assert_eq!(bfs.cost, 4.0);
    assert_eq!(grid.path_cost(bfs.path.as_ref().unwrap()).unwrap(), 14);
}

#[test]
fn test_moving_obstacle_blocks_at_planning_time_only() {
    // Row y = 1 is a wall with a single gap at (2, 1)
    let mut grid = Grid::new(5, 3);
    for x in 0..5 {
        if x != 2 {
            grid.add_static_obstacle(Cell::new(x, 1)).unwrap();
        }
    }
    let patrol = vec![Cell::new(2, 1), Cell::new(2, 0)];
    grid.add_moving_obstacle(MovingObstacle::new(Cell::new(2, 1), patrol, 1).unwrap())
        .unwrap();

    // Time 0: the obstacle fills the gap
    assert!(!a_star(&grid, Cell::new(0, 2), Cell::new(2, 1), 0).unwrap().is_found());
    // Time 1: the gap is free but the obstacle sits on its northern approach
    assert!(a_star(&grid, Cell::new(0, 2), Cell::new(2, 1), 1).unwrap().is_found());
    assert!(!a_star(&grid, Cell::new(0, 0), Cell::new(0, 2), 1).unwrap().is_found());

    // After one real tick the nominal time step 0 sees the moved obstacle
    grid.advance_time();
    assert!(!grid.is_traversable(Cell::new(2, 0), 0));
    let through_gap = Planner::new(PlannerConfig::default())
        .plan(&grid, Cell::new(1, 2), Cell::new(2, 1), Algorithm::Bfs)
        .unwrap();
    assert_eq!(
        through_gap.path,
        Some(vec![Cell::new(1, 2), Cell::new(2, 2), Cell::new(2, 1)])
    );
}

#[test]
fn test_hill_climbing_is_not_complete() {
    let mut grid = Grid::new(7, 4);
    for x in 1..5 {
        grid.add_static_obstacle(Cell::new(x, 1)).unwrap();
        grid.add_static_obstacle(Cell::new(x, 3)).unwrap();
    }
    grid.add_static_obstacle(Cell::new(4, 2)).unwrap();

    let greedy = hill_climbing(&grid, Cell::new(2, 2), Cell::new(6, 2), 0, 5).unwrap();
    let complete = breadth_first(&grid, Cell::new(2, 2), Cell::new(6, 2), 0).unwrap();

    assert!(!greedy.is_found());
    assert!(complete.is_found());
}

#[test]
fn test_annealing_is_reproducible_with_seed() {
    let grid = six_by_six();
    let run = || {
        seeded_planner()
            .plan(&grid, Cell::new(0, 0), Cell::new(5, 5), Algorithm::SimulatedAnnealing)
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_out_of_bounds_endpoints_are_errors() {
    let grid = Grid::new(4, 4);
    let mut planner = seeded_planner();
    for algorithm in Algorithm::ALL {
        let err = planner
            .plan(&grid, Cell::new(-1, 0), Cell::new(3, 3), algorithm)
            .unwrap_err();
        assert!(matches!(err, CourierError::OutOfBounds { x: -1, y: 0, .. }));

        assert!(planner
            .plan(&grid, Cell::new(0, 0), Cell::new(4, 0), algorithm)
            .is_err());
    }
}

#[test]
fn test_plan_on_loaded_layout() {
    let text = "5 3\n2\n2 0\n2 1\n2 2 2 2 2\n2 2 2 2 2\n2 2 12 2 2\n0\n";
    let mut grid = Grid::default();
    grid.load_from_str(text).unwrap();

    let result = a_star(&grid, Cell::new(0, 0), Cell::new(4, 0), 0).unwrap();

    // Forced through the river at (2, 2): 2 + 2 + 2 + 12 + 2 + 2 + 2 + 2
    assert_eq!(result.cost, 26.0);
    assert!(result.path.unwrap().contains(&Cell::new(2, 2)));
    assert_eq!(grid.to_layout_string(), text);
}

#[test]
fn test_agent_on_patrol_cell_gets_no_route() {
    // The patrol returns to (1, 1) every other tick
    let mut grid = Grid::new(5, 5);
    let patrol = vec![Cell::new(1, 1), Cell::new(2, 1)];
    grid.add_moving_obstacle(MovingObstacle::new(Cell::new(1, 1), patrol, 1).unwrap())
        .unwrap();
    let origin = Cell::new(1, 1);
    let destination = Cell::new(4, 4);

    let mut planner = seeded_planner();
    for algorithm in Algorithm::ALL {
        let blocked = planner.plan(&grid, origin, destination, algorithm).unwrap();
        assert!(blocked.path.is_none(), "{} planned from an occupied cell", algorithm);
    }

    let free = a_star(&grid, origin, destination, 1).unwrap();
    assert_connected(&grid, free.path.as_ref().unwrap(), origin, destination, 1);
}
