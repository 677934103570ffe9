//! Uniform-cost search (Dijkstra over terrain costs)

use crate::core::error::Result;
use crate::core::types::{Cell, Tick};
use crate::planning::{best_first, PlanResult};
use crate::world::Grid;

/// Find the cheapest route by terrain cost
pub fn uniform_cost(
    grid: &Grid,
    origin: Cell,
    destination: Cell,
    time_step: Tick,
) -> Result<PlanResult> {
    best_first::search(grid, origin, destination, time_step, |_| 0)
}
