//! Delivery orchestration on top of the planners

pub mod agent;

pub use agent::{DeliveryAgent, DeliveryFailure, DeliveryReport, LegKind, LegReport};
