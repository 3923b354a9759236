//! Evolutionary algorithms
//!
//! This module provides the NSGA-II engine and the vehicle optimisation entry points.

pub mod nsga2;

pub mod prelude {
    pub use super::nsga2::*;
}
