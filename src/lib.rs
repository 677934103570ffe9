//! Courier Grid - route planning for a delivery agent on a weighted grid

pub mod core;
pub mod delivery;
pub mod experiment;
pub mod planning;
pub mod world;
