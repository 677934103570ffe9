//! Planner comparison runs on the preset maps
//!
//! Each run builds a fresh scenario, walks a full delivery with one planner
//! and records the outcome. Results serialize to a pretty-printed JSON array.

pub mod maps;

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::config::CourierConfig;
use crate::core::error::Result;
use crate::delivery::DeliveryAgent;
use crate::planning::{Algorithm, Planner};

pub use maps::{MapPreset, Scenario};

/// Summary of one delivery run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub map: MapPreset,
    pub algorithm: Algorithm,
    pub success: bool,
    /// Fuel spent on the delivery; `None` if it failed
    pub path_cost: Option<f64>,
    pub fuel_remaining: f64,
    pub time_taken_ms: f64,
    /// Cells on the travelled route, start included
    pub path_length: usize,
    pub nodes_expanded: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// Run one delivery on `preset` with `algorithm`
pub fn run_experiment(
    preset: MapPreset,
    algorithm: Algorithm,
    config: &CourierConfig,
) -> Result<ExperimentResult> {
    config.validate()?;

    let Scenario {
        mut grid,
        start,
        package,
        drop_off,
    } = preset.build(config.world.default_ground)?;

    let mut agent = DeliveryAgent::new(start, config.delivery.initial_fuel);
    agent.set_package(package);
    agent.set_drop_off(drop_off);
    let mut planner = Planner::new(config.planner.clone());

    let started = Instant::now();
    let report = agent.deliver(&mut grid, &mut planner, algorithm)?;
    let time_taken_ms = started.elapsed().as_secs_f64() * 1000.0;

    tracing::info!(
        "{} on {}: success={} cost={} nodes={} in {:.3}ms",
        algorithm,
        preset,
        report.success,
        report.total_cost,
        report.nodes_expanded,
        time_taken_ms
    );

    Ok(ExperimentResult {
        map: preset,
        algorithm,
        success: report.success,
        path_cost: report.success.then_some(report.total_cost),
        fuel_remaining: report.fuel_remaining,
        time_taken_ms,
        path_length: report.route.len(),
        nodes_expanded: report.nodes_expanded,
        failure: report.failure.map(|f| f.to_string()),
    })
}

/// Every preset against every algorithm, map-major
pub fn run_all(config: &CourierConfig) -> Result<Vec<ExperimentResult>> {
    let mut results = Vec::with_capacity(MapPreset::ALL.len() * Algorithm::ALL.len());
    for preset in MapPreset::ALL {
        for algorithm in Algorithm::ALL {
            results.push(run_experiment(preset, algorithm, config)?);
        }
    }
    Ok(results)
}

pub fn save_results(path: &Path, results: &[ExperimentResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    tracing::info!("Saved {} results to {}", results.len(), path.display());
    Ok(())
}

pub fn load_results(path: &Path) -> Result<Vec<ExperimentResult>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
