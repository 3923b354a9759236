//! # ev-optimise
//!
//! Multi-objective design optimisation for electric vehicles.
//!
//! A design is a motor power and a battery capacity. Each design is scored by a
//! longitudinal vehicle simulation on two objectives, driving range and mean
//! acceleration, both maximised. NSGA-II searches for the Pareto-optimal
//! trade-off between them.
//!
//! ## Core Concepts
//!
//! - **Explicit objective directions**: dominance and crowding read a per-objective
//!   [`Direction`](fitness::traits::Direction), so sorting works for any mix of
//!   maximised and minimised objectives
//! - **Reproducible runs**: every random draw comes from one seeded generator
//! - **Frozen history**: each generation is recorded as an immutable snapshot
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ev_optimise::prelude::*;
//!
//! let config = VehicleConfig::default();
//! let history = optimise(&config, 50, 100, Some(42))?;
//!
//! if let Some(last) = history.last() {
//!     for individual in last.pareto_front() {
//!         println!("{} -> {:?}", individual.genome, individual.objectives);
//!     }
//! }
//! # Ok::<(), ev_optimise::error::OptimiseError>(())
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod pareto;
pub mod population;
pub mod vehicle;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::pareto::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::vehicle::prelude::*;
}
