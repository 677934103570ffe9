//! Delivery agent: pick up a package, drop it off, pay for every move in fuel

use serde::{Deserialize, Serialize};

use crate::core::error::{CourierError, Result};
use crate::core::types::Cell;
use crate::planning::{Algorithm, Planner};
use crate::world::Grid;

/// Which half of the delivery a leg covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegKind {
    ToPackage,
    ToDropOff,
}

/// Why a delivery stopped short
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeliveryFailure {
    /// The planner found no route for this leg
    NoRoute { leg: LegKind },
    /// The route exists but costs more fuel than is left
    OutOfFuel {
        leg: LegKind,
        required: f64,
        available: f64,
    },
}

impl std::fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryFailure::NoRoute { leg } => write!(f, "no route for leg {:?}", leg),
            DeliveryFailure::OutOfFuel {
                leg,
                required,
                available,
            } => write!(
                f,
                "leg {:?} needs {} fuel but only {} remains",
                leg, required, available
            ),
        }
    }
}

/// One planned leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegReport {
    pub kind: LegKind,
    pub from: Cell,
    pub to: Cell,
    pub path: Option<Vec<Cell>>,
    /// `None` when no route was found
    pub cost: Option<f64>,
    pub nodes_expanded: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub algorithm: Algorithm,
    pub success: bool,
    pub failure: Option<DeliveryFailure>,
    /// Cells actually travelled, start to finish
    pub route: Vec<Cell>,
    /// Fuel spent on completed legs
    pub total_cost: f64,
    pub fuel_remaining: f64,
    pub nodes_expanded: usize,
    pub legs: Vec<LegReport>,
}

/// An agent carrying at most one package
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryAgent {
    position: Cell,
    fuel: f64,
    package: Option<Cell>,
    drop_off: Option<Cell>,
    carrying: bool,
}

impl DeliveryAgent {
    pub fn new(position: Cell, fuel: f64) -> Self {
        Self {
            position,
            fuel,
            package: None,
            drop_off: None,
            carrying: false,
        }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying
    }

    pub fn package(&self) -> Option<Cell> {
        self.package
    }

    pub fn drop_off(&self) -> Option<Cell> {
        self.drop_off
    }

    pub fn set_package(&mut self, cell: Cell) {
        self.package = Some(cell);
    }

    pub fn set_drop_off(&mut self, cell: Cell) {
        self.drop_off = Some(cell);
    }

    /// Plan and walk both legs
    ///
    /// Each leg is planned from the agent's current position against the grid
    /// as it stands, then walked: fuel drops by the leg cost and the grid
    /// advances one tick per move. A leg without a route, or one that costs
    /// more than the remaining fuel, ends the delivery with a failure report.
    /// Errors are reserved for invalid input (unset or out-of-bounds targets).
    pub fn deliver(
        &mut self,
        grid: &mut Grid,
        planner: &mut Planner,
        algorithm: Algorithm,
    ) -> Result<DeliveryReport> {
        let package = self
            .package
            .ok_or_else(|| CourierError::InvalidConfig("no package location set".into()))?;
        let drop_off = self
            .drop_off
            .ok_or_else(|| CourierError::InvalidConfig("no drop-off location set".into()))?;

        let mut report = DeliveryReport {
            algorithm,
            success: false,
            failure: None,
            route: vec![self.position],
            total_cost: 0.0,
            fuel_remaining: self.fuel,
            nodes_expanded: 0,
            legs: Vec::with_capacity(2),
        };

        let legs = if self.carrying {
            vec![(LegKind::ToDropOff, drop_off)]
        } else {
            vec![(LegKind::ToPackage, package), (LegKind::ToDropOff, drop_off)]
        };

        for (kind, target) in legs {
            let from = self.position;
            let plan = planner.plan(grid, from, target, algorithm)?;
            report.nodes_expanded += plan.nodes_expanded;
            report.legs.push(LegReport {
                kind,
                from,
                to: target,
                path: plan.path.clone(),
                cost: plan.path.as_ref().map(|_| plan.cost),
                nodes_expanded: plan.nodes_expanded,
            });

            let Some(path) = plan.path else {
                tracing::warn!("{}: no route from {} to {} ({:?})", algorithm, from, target, kind);
                report.failure = Some(DeliveryFailure::NoRoute { leg: kind });
                return Ok(report);
            };

            if plan.cost > self.fuel {
                tracing::warn!(
                    "{}: leg {:?} needs {} fuel, {} left",
                    algorithm,
                    kind,
                    plan.cost,
                    self.fuel
                );
                report.failure = Some(DeliveryFailure::OutOfFuel {
                    leg: kind,
                    required: plan.cost,
                    available: self.fuel,
                });
                return Ok(report);
            }

            for _ in 1..path.len() {
                grid.advance_time();
            }
            self.fuel -= plan.cost;
            self.position = target;
            self.carrying = kind == LegKind::ToPackage;

            report.route.extend(path.iter().skip(1).copied());
            report.total_cost += plan.cost;
            report.fuel_remaining = self.fuel;

            tracing::info!(
                "{}: {:?} {} -> {} in {} moves, cost {}, fuel left {}",
                algorithm,
                kind,
                from,
                target,
                path.len() - 1,
                plan.cost,
                self.fuel
            );
        }

        report.success = true;
        Ok(report)
    }
}
