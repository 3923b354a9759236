//! Electric-vehicle domain
//!
//! Configuration, longitudinal physics and the model mapping a design genome
//! to its `[range, acceleration]` objective vector.

pub mod config;
pub mod model;
pub mod physics;

pub mod prelude {
    pub use super::config::*;
    pub use super::model::{VehicleModel, VehiclePerformance, OBJECTIVE_NAMES};
}
