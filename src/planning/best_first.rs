//! Shared best-first search over terrain costs
//!
//! Uniform-cost search and A* differ only in the heuristic added to the
//! accumulated cost when ordering the frontier.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use crate::core::error::Result;
use crate::core::types::{Cell, Tick};
use crate::planning::{check_endpoints, reconstruct_path, PlanResult};
use crate::world::Grid;

/// Entry in the open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierNode {
    cell: Cell,
    /// Accumulated terrain cost from the origin
    cost: u32,
    /// `cost + heuristic`
    priority: u32,
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; ties fall back to the cell so the
        // expansion order is stable across runs
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first search ordered by `g + heuristic(cell)`
///
/// Each cell is expanded at most once; entries for cells already expanded
/// are stale and skipped without counting.
pub(crate) fn search<H>(
    grid: &Grid,
    origin: Cell,
    destination: Cell,
    time_step: Tick,
    heuristic: H,
) -> Result<PlanResult>
where
    H: Fn(Cell) -> u32,
{
    check_endpoints(grid, origin, destination)?;
    if !grid.is_traversable(origin, time_step) {
        return Ok(PlanResult::unreachable(0));
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<Cell, Cell> = AHashMap::new();
    let mut g_scores: AHashMap<Cell, u32> = AHashMap::new();
    let mut closed_set: AHashSet<Cell> = AHashSet::new();
    let mut nodes_expanded = 0;

    g_scores.insert(origin, 0);
    open_set.push(FrontierNode {
        cell: origin,
        cost: 0,
        priority: heuristic(origin),
    });

    while let Some(current) = open_set.pop() {
        if !closed_set.insert(current.cell) {
            continue;
        }
        nodes_expanded += 1;

        if current.cell == destination {
            let path = reconstruct_path(&came_from, destination);
            return Ok(PlanResult::found(path, current.cost as f64, nodes_expanded));
        }

        for neighbor in current.cell.neighbors() {
            if !grid.is_traversable(neighbor, time_step) {
                continue;
            }

            let tentative_g = current.cost + grid.movement_cost(neighbor)?;
            let improves = g_scores
                .get(&neighbor)
                .map_or(true, |&known| tentative_g < known);

            if improves {
                came_from.insert(neighbor, current.cell);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(FrontierNode {
                    cell: neighbor,
                    cost: tentative_g,
                    priority: tentative_g + heuristic(neighbor),
                });
            }
        }
    }

    Ok(PlanResult::unreachable(nodes_expanded))
}
