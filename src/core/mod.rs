pub mod config;
pub mod error;
pub mod types;

pub use config::{AnnealingConfig, CourierConfig, DeliveryConfig, HillClimbingConfig, PlannerConfig, WorldConfig};
pub use error::{CourierError, Result};
pub use types::{Cell, Tick};
