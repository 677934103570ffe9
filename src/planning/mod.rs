//! Route planners
//!
//! Five interchangeable algorithms share one contract: they read the grid
//! through `is_traversable`/`movement_cost` at a fixed time step and return a
//! `PlanResult`. Failing to reach the destination is not an error; only
//! endpoints outside the grid are.
//!
//! | Algorithm            | Optimal | Complete | Cost reported          |
//! |----------------------|---------|----------|------------------------|
//! | Breadth-first        | steps   | yes      | number of moves        |
//! | Uniform-cost         | terrain | yes      | terrain cost           |
//! | A*                   | terrain | yes      | terrain cost           |
//! | Hill climbing        | no      | no       | terrain cost of path   |
//! | Simulated annealing  | no      | no       | terrain cost of moves  |

pub mod annealing;
pub mod astar;
pub mod bfs;
pub mod best_first;
pub mod hill_climbing;
pub mod ucs;

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::PlannerConfig;
use crate::core::error::Result;
use crate::core::types::Cell;
use crate::world::Grid;

pub use annealing::simulated_annealing;
pub use astar::a_star;
pub use bfs::breadth_first;
pub use hill_climbing::hill_climbing;
pub use ucs::uniform_cost;

/// Outcome of a single planner invocation
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    /// Cells from origin to destination inclusive; `None` if unreachable
    pub path: Option<Vec<Cell>>,
    /// Total cost, `f64::INFINITY` when no path was found
    pub cost: f64,
    /// Search effort, for comparing planners
    pub nodes_expanded: usize,
}

impl PlanResult {
    pub fn found(path: Vec<Cell>, cost: f64, nodes_expanded: usize) -> Self {
        Self {
            path: Some(path),
            cost,
            nodes_expanded,
        }
    }

    pub fn unreachable(nodes_expanded: usize) -> Self {
        Self {
            path: None,
            cost: f64::INFINITY,
            nodes_expanded,
        }
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of moves in the path (0 if unreachable)
    pub fn moves(&self) -> usize {
        self.path
            .as_ref()
            .map(|p| p.len().saturating_sub(1))
            .unwrap_or(0)
    }
}

/// Planner selection
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[value(alias = "breadth_first")]
    Bfs,
    #[value(alias = "uniform_cost")]
    Ucs,
    #[value(alias = "a_star")]
    AStar,
    #[value(alias = "hill")]
    HillClimbing,
    #[value(alias = "sa")]
    SimulatedAnnealing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bfs,
        Algorithm::Ucs,
        Algorithm::AStar,
        Algorithm::HillClimbing,
        Algorithm::SimulatedAnnealing,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Ucs => "ucs",
            Algorithm::AStar => "a_star",
            Algorithm::HillClimbing => "hill_climbing",
            Algorithm::SimulatedAnnealing => "simulated_annealing",
        }
    }

    /// Does this planner draw random numbers?
    pub fn is_stochastic(&self) -> bool {
        matches!(self, Algorithm::SimulatedAnnealing)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Dispatches to the selected algorithm with shared tuning and a seeded RNG
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    rng: ChaCha8Rng,
}

impl Planner {
    /// Seeds from `config.seed`, or from the OS when no seed is set
    pub fn new(config: PlannerConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Plan a route from `origin` to `destination`
    pub fn plan(
        &mut self,
        grid: &Grid,
        origin: Cell,
        destination: Cell,
        algorithm: Algorithm,
    ) -> Result<PlanResult> {
        let time_step = self.config.time_step;
        let result = match algorithm {
            Algorithm::Bfs => breadth_first(grid, origin, destination, time_step)?,
            Algorithm::Ucs => uniform_cost(grid, origin, destination, time_step)?,
            Algorithm::AStar => a_star(grid, origin, destination, time_step)?,
            Algorithm::HillClimbing => hill_climbing(
                grid,
                origin,
                destination,
                time_step,
                self.config.hill_climbing.max_restarts,
            )?,
            Algorithm::SimulatedAnnealing => simulated_annealing(
                grid,
                origin,
                destination,
                time_step,
                &self.config.annealing,
                &mut self.rng,
            )?,
        };

        tracing::debug!(
            "{} {} -> {}: found={} cost={} nodes_expanded={}",
            algorithm,
            origin,
            destination,
            result.is_found(),
            result.cost,
            result.nodes_expanded
        );

        Ok(result)
    }
}

/// Reject endpoints outside the grid
pub(crate) fn check_endpoints(grid: &Grid, origin: Cell, destination: Cell) -> Result<()> {
    grid.check_bounds(origin)?;
    grid.check_bounds(destination)
}

/// Walk the parent map back from `goal`
pub(crate) fn reconstruct_path(parents: &AHashMap<Cell, Cell>, mut current: Cell) -> Vec<Cell> {
    let mut path = vec![current];
    while let Some(&prev) = parents.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Asserts the structural guarantees every returned path must satisfy
    pub fn assert_valid_path(grid: &Grid, path: &[Cell], origin: Cell, destination: Cell, time_step: u64) {
        assert_eq!(path.first(), Some(&origin), "path must start at origin");
        assert_eq!(path.last(), Some(&destination), "path must end at destination");
        for pair in path.windows(2) {
            assert!(
                pair[0].is_adjacent(&pair[1]),
                "{} -> {} is not a single orthogonal step",
                pair[0],
                pair[1]
            );
        }
        for cell in path {
            assert!(grid.is_traversable(*cell, time_step), "{} is not traversable", cell);
        }
    }

    /// 6x6 grid with a single obstacle at (3, 3)
    pub fn small_grid() -> Grid {
        let mut grid = Grid::new(6, 6);
        grid.add_static_obstacle(Cell::new(3, 3)).unwrap();
        grid
    }
}
