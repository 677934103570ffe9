//! Simulation configuration with documented defaults
//!
//! Every tuning knob the planners and the delivery agent read is collected
//! here. Values can be overridden from a TOML file; any field left out keeps
//! its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CourierError, Result};
use crate::core::types::Tick;
use crate::world::terrain::GroundType;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    pub planner: PlannerConfig,
    pub delivery: DeliveryConfig,
    pub world: WorldConfig,
}

/// Planner tuning shared by every algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Time step at which every planner evaluates traversability
    ///
    /// Planners do not advance time along a path; moving obstacles are
    /// checked at this single snapshot.
    pub time_step: Tick,

    /// Seed for the stochastic planners
    ///
    /// `None` draws a fresh seed from the OS on every planner construction.
    pub seed: Option<u64>,

    pub hill_climbing: HillClimbingConfig,
    pub annealing: AnnealingConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            time_step: 0,
            seed: None,
            hill_climbing: HillClimbingConfig::default(),
            annealing: AnnealingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbingConfig {
    /// Number of independent greedy attempts
    pub max_restarts: u32,
}

impl Default for HillClimbingConfig {
    fn default() -> Self {
        Self { max_restarts: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Upper bound on proposal steps in a single run
    pub max_iterations: u32,

    /// Starting temperature
    ///
    /// At 98.0 a move away from the destination (delta = -1) is accepted
    /// about 99% of the time early on.
    pub temperature: f64,

    /// Multiplicative cooling applied once per iteration, in (0, 1)
    ///
    /// At 0.95 the temperature drops below 1.0 after roughly 90 iterations,
    /// after which worsening moves become rare.
    pub cooling_rate: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            temperature: 98.0,
            cooling_rate: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Fuel the agent starts with; every leg consumes its planned cost
    pub initial_fuel: f64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            initial_fuel: 10_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Ground type assigned to every cell on creation or reset
    pub default_ground: GroundType,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            default_ground: GroundType::Asphalt,
        }
    }
}

impl CourierConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CourierConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let annealing = &self.planner.annealing;
        if !(annealing.cooling_rate > 0.0 && annealing.cooling_rate < 1.0) {
            return Err(CourierError::InvalidConfig(format!(
                "cooling_rate ({}) must lie strictly between 0 and 1",
                annealing.cooling_rate
            )));
        }

        if !(annealing.temperature >= 0.0) {
            return Err(CourierError::InvalidConfig(format!(
                "temperature ({}) must be non-negative",
                annealing.temperature
            )));
        }

        if !(self.delivery.initial_fuel > 0.0) {
            return Err(CourierError::InvalidConfig(format!(
                "initial_fuel ({}) must be positive",
                self.delivery.initial_fuel
            )));
        }

        Ok(())
    }
}
