//! Fitness evaluation
//!
//! This module provides objective directions and the multi-objective fitness abstraction.

pub mod traits;

pub mod prelude {
    pub use super::traits::*;
}
