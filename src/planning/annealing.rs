//! Simulated annealing over single moves
//!
//! The walk proposes a random traversable neighbour each iteration and
//! accepts it if it gets closer to the destination, or otherwise with
//! probability `exp(delta / T)` where `delta` is the improvement in Manhattan
//! distance (negative for a worsening move). Accepted cells are appended to
//! the path as-is, so the path may revisit cells.

use rand::Rng;

use crate::core::config::AnnealingConfig;
use crate::core::error::Result;
use crate::core::types::{Cell, Tick};
use crate::planning::{check_endpoints, PlanResult};
use crate::world::Grid;

/// Acceptance rule for a proposed move with heuristic improvement `delta`
///
/// Improvements are taken without drawing a random number. At zero
/// temperature `delta / T` is negative infinity for any worsening move, which
/// is never accepted.
fn accepts<R: Rng + ?Sized>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    delta > 0.0 || (delta / temperature).exp() > rng.gen::<f64>()
}

/// Single annealing run from `origin` toward `destination`
///
/// `nodes_expanded` counts iterations executed; the cost is the terrain cost
/// of every accepted move, repeats included.
pub fn simulated_annealing<R: Rng + ?Sized>(
    grid: &Grid,
    origin: Cell,
    destination: Cell,
    time_step: Tick,
    config: &AnnealingConfig,
    rng: &mut R,
) -> Result<PlanResult> {
    check_endpoints(grid, origin, destination)?;
    if !grid.is_traversable(origin, time_step) {
        return Ok(PlanResult::unreachable(0));
    }

    let mut current = origin;
    let mut path = vec![origin];
    let mut cost = 0u32;
    let mut temperature = config.temperature;
    let mut iterations = 0;

    for _ in 0..config.max_iterations {
        if current == destination {
            break;
        }
        iterations += 1;

        let neighbors: Vec<Cell> = current
            .neighbors()
            .into_iter()
            .filter(|n| grid.is_traversable(*n, time_step))
            .collect();
        if neighbors.is_empty() {
            break;
        }

        let next = neighbors[rng.gen_range(0..neighbors.len())];
        let delta = current.manhattan_distance(&destination) as f64
            - next.manhattan_distance(&destination) as f64;

        if accepts(delta, temperature, rng) {
            cost += grid.movement_cost(next)?;
            path.push(next);
            current = next;
        }

        temperature *= config.cooling_rate;
    }

    if current == destination {
        Ok(PlanResult::found(path, cost as f64, iterations))
    } else {
        Ok(PlanResult::unreachable(iterations))
    }
}
