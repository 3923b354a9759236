//! Error types for ev-optimise
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error raised while constructing or validating a configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter's lower bound exceeds its upper bound (or is not finite)
    #[error("Invalid bounds for {parameter}: min ({min}) must be <= max ({max})")]
    InvalidBounds {
        parameter: String,
        min: f64,
        max: f64,
    },

    /// A physical constant that must be strictly positive is not
    #[error("Physical constant {name} must be positive, got {value}")]
    NonPositiveConstant { name: &'static str, value: f64 },

    /// A value lies outside its permitted range
    #[error("{name} must be in {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// Any other invalid algorithm parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The configuration document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Error raised by the vehicle model when a genome leaves the simulation's domain of validity
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// A design parameter lies outside its declared bounds
    #[error("{parameter} = {value} is outside [{min}, {max}]")]
    OutOfBounds {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A computed quantity is NaN or infinite
    #[error("Non-finite {quantity}: {value}")]
    NonFinite { quantity: &'static str, value: f64 },

    /// Resistive forces at the target speed meet or exceed the drive force
    #[error("Drive force cannot overcome resistance at {target_kmh} km/h (net force {net_force_n:.1} N)")]
    TargetSpeedUnreachable { target_kmh: f64, net_force_n: f64 },

    /// The acceleration integration ran past its time limit
    #[error("Target speed not reached within {limit_s} s")]
    TimeLimitExceeded { limit_s: f64 },
}

/// Top-level error type for optimisation runs
#[derive(Debug, Error)]
pub enum OptimiseError {
    /// Invalid configuration; no run was started
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// A genome could not be evaluated; the run was aborted
    #[error("Simulation failed in generation {generation}: {source}")]
    Simulation {
        generation: usize,
        #[source]
        source: SimulationError,
    },

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// Genome length does not match the problem's parameter count
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl OptimiseError {
    /// Attach the generation index to a simulation failure
    pub fn simulation(generation: usize, source: SimulationError) -> Self {
        Self::Simulation { generation, source }
    }
}

/// Result type alias for optimisation operations
pub type OptimiseResult<T> = Result<T, OptimiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidBounds {
            parameter: "motor_power_kw".to_string(),
            min: 500.0,
            max: 50.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid bounds for motor_power_kw: min (500) must be <= max (50)"
        );

        let err = ConfigError::NonPositiveConstant {
            name: "drag_coefficient",
            value: -0.1,
        };
        assert_eq!(
            err.to_string(),
            "Physical constant drag_coefficient must be positive, got -0.1"
        );
    }

    #[test]
    fn test_simulation_error_display() {
        let err = SimulationError::OutOfBounds {
            parameter: "battery_capacity_kwh",
            value: 10.0,
            min: 30.0,
            max: 150.0,
        };
        assert_eq!(err.to_string(), "battery_capacity_kwh = 10 is outside [30, 150]");
    }

    #[test]
    fn test_optimise_error_from_config_error() {
        let err: OptimiseError = ConfigError::InvalidParameter("bad".to_string()).into();
        assert!(matches!(err, OptimiseError::Configuration(_)));
    }

    #[test]
    fn test_simulation_error_carries_generation() {
        let err = OptimiseError::simulation(3, SimulationError::TimeLimitExceeded { limit_s: 120.0 });
        assert_eq!(
            err.to_string(),
            "Simulation failed in generation 3: Target speed not reached within 120 s"
        );
    }
}
