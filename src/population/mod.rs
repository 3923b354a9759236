//! Population management
//!
//! This module provides the Individual and Population types, and the frozen
//! per-generation snapshots a run records.

pub mod individual;
#[allow(clippy::module_inception)]
pub mod population;
pub mod snapshot;

pub mod prelude {
    pub use super::individual::*;
    pub use super::population::*;
    pub use super::snapshot::*;
}
