//! Vehicle design genome
//!
//! A candidate vehicle is described by two design parameters, in this fixed order:
//! motor power (kW) and battery capacity (kWh).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OptimiseResult;
use crate::genome::traits::{check_dimension, RealValuedGenome};

/// Two-parameter vehicle design
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleGenome {
    genes: [f64; VehicleGenome::DIMENSION],
}

impl VehicleGenome {
    /// Number of design parameters
    pub const DIMENSION: usize = 2;
    /// Gene index of the motor power
    pub const MOTOR_POWER: usize = 0;
    /// Gene index of the battery capacity
    pub const BATTERY_CAPACITY: usize = 1;
    /// Parameter names, in gene order
    pub const PARAMETER_NAMES: [&'static str; VehicleGenome::DIMENSION] =
        ["motor_power_kw", "battery_capacity_kwh"];

    /// Create a genome from its design parameters
    pub fn new(motor_power_kw: f64, battery_capacity_kwh: f64) -> Self {
        Self {
            genes: [motor_power_kw, battery_capacity_kwh],
        }
    }

    /// Motor power in kW
    pub fn motor_power_kw(&self) -> f64 {
        self.genes[Self::MOTOR_POWER]
    }

    /// Battery capacity in kWh
    pub fn battery_capacity_kwh(&self) -> f64 {
        self.genes[Self::BATTERY_CAPACITY]
    }
}

impl RealValuedGenome for VehicleGenome {
    fn genes(&self) -> &[f64] {
        &self.genes
    }

    fn from_genes(genes: Vec<f64>) -> OptimiseResult<Self> {
        check_dimension(Self::DIMENSION, genes.len())?;
        Ok(Self::new(
            genes[Self::MOTOR_POWER],
            genes[Self::BATTERY_CAPACITY],
        ))
    }
}

impl fmt::Display for VehicleGenome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle(motor_power={:.2} kW, battery_capacity={:.2} kWh)",
            self.motor_power_kw(),
            self.battery_capacity_kwh()
        )
    }
}
