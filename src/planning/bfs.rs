//! Breadth-first search
//!
//! Every move counts as one unit regardless of terrain, so the result is the
//! route with the fewest moves and the reported cost is that move count.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::core::error::Result;
use crate::core::types::{Cell, Tick};
use crate::planning::{check_endpoints, reconstruct_path, PlanResult};
use crate::world::Grid;

/// Find the route with the fewest moves
pub fn breadth_first(
    grid: &Grid,
    origin: Cell,
    destination: Cell,
    time_step: Tick,
) -> Result<PlanResult> {
    check_endpoints(grid, origin, destination)?;
    if !grid.is_traversable(origin, time_step) {
        return Ok(PlanResult::unreachable(0));
    }

    let mut queue = VecDeque::new();
    let mut visited: AHashSet<Cell> = AHashSet::new();
    let mut came_from: AHashMap<Cell, Cell> = AHashMap::new();
    let mut nodes_expanded = 0;

    queue.push_back(origin);
    visited.insert(origin);

    while let Some(current) = queue.pop_front() {
        nodes_expanded += 1;

        if current == destination {
            let path = reconstruct_path(&came_from, destination);
            let moves = (path.len() - 1) as f64;
            return Ok(PlanResult::found(path, moves, nodes_expanded));
        }

        for neighbor in current.neighbors() {
            if grid.is_traversable(neighbor, time_step) && visited.insert(neighbor) {
                came_from.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    Ok(PlanResult::unreachable(nodes_expanded))
}
