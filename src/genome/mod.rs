//! Genome abstractions and implementations
//!
//! This module provides the `RealValuedGenome` trait, parameter bounds and the
//! two-parameter vehicle design genome.

pub mod bounds;
pub mod traits;
pub mod vehicle_genome;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::traits::*;
    pub use super::vehicle_genome::*;
}
