//! Vehicle model
//!
//! Maps a [`VehicleGenome`] to its objective vector `[range_km, acceleration_ms2]`,
//! both maximised, through a deterministic longitudinal simulation.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::fitness::traits::{Direction, MultiObjectiveFitness};
use crate::genome::traits::RealValuedGenome;
use crate::genome::vehicle_genome::VehicleGenome;
use crate::vehicle::config::VehicleConfig;
use crate::vehicle::physics::{
    aerodynamic_drag_force, coeff_rolling_resistance, kmh_to_ms, motor_driving_force,
    rolling_resistance_force, rpm_to_rads, time_to_battery_drain,
};

/// Objective names, in objective-vector order
pub const OBJECTIVE_NAMES: [&str; 2] = ["range_km", "acceleration_ms2"];

/// Index of the range objective
pub const RANGE: usize = 0;
/// Index of the acceleration objective
pub const ACCELERATION: usize = 1;

/// Simulated performance of one vehicle design
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehiclePerformance {
    /// Motor plus battery mass
    pub mass_kg: f64,
    /// Distance covered at cruising speed on one charge
    pub range_km: f64,
    /// Time from standstill to the target speed
    pub time_to_target_s: f64,
    /// Mean acceleration over the run to the target speed
    pub acceleration_ms2: f64,
}

impl VehiclePerformance {
    /// Objective vector `[range_km, acceleration_ms2]`
    pub fn objectives(&self) -> Vec<f64> {
        vec![self.range_km, self.acceleration_ms2]
    }
}

/// Deterministic vehicle simulation
#[derive(Clone, Debug)]
pub struct VehicleModel {
    config: VehicleConfig,
    directions: [Direction; 2],
}

impl VehicleModel {
    /// Create a model for a validated configuration
    pub fn new(config: VehicleConfig) -> Self {
        Self {
            config,
            directions: [Direction::Maximize, Direction::Maximize],
        }
    }

    /// The model's configuration
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Motor plus battery mass in kg
    pub fn mass(&self, genome: &VehicleGenome) -> f64 {
        genome.motor_power_kw() * self.config.motor_weight_ratio()
            + genome.battery_capacity_kwh() * self.config.battery_weight_ratio()
    }

    /// Simulate range and acceleration for a genome
    pub fn performance(&self, genome: &VehicleGenome) -> Result<VehiclePerformance, SimulationError> {
        self.check_domain(genome)?;

        let mass_kg = self.mass(genome);
        let range_km = finite("range_km", self.range_km(genome, mass_kg))?;
        let time_to_target_s = finite("time_to_target_s", self.time_to_target_s(genome, mass_kg)?)?;
        let acceleration_ms2 = finite(
            "acceleration_ms2",
            kmh_to_ms(self.config.target_speed_kmh()) / time_to_target_s,
        )?;

        Ok(VehiclePerformance {
            mass_kg,
            range_km,
            time_to_target_s,
            acceleration_ms2,
        })
    }

    fn check_domain(&self, genome: &VehicleGenome) -> Result<(), SimulationError> {
        let bounds = self.config.bounds();
        for ((&value, bound), &parameter) in genome
            .genes()
            .iter()
            .zip(bounds.iter())
            .zip(VehicleGenome::PARAMETER_NAMES.iter())
        {
            if !value.is_finite() {
                return Err(SimulationError::NonFinite {
                    quantity: parameter,
                    value,
                });
            }
            if !bound.contains(value) {
                return Err(SimulationError::OutOfBounds {
                    parameter,
                    value,
                    min: bound.min,
                    max: bound.max,
                });
            }
        }
        Ok(())
    }

    /// Rolling plus aerodynamic resistance in N at a velocity in m/s
    fn resistive_force(&self, velocity_ms: f64, mass_kg: f64) -> f64 {
        let c = &self.config;
        let c_r = coeff_rolling_resistance(c.tire_pressure_bar(), velocity_ms * 3.6);
        rolling_resistance_force(c_r, mass_kg, c.gravity())
            + aerodynamic_drag_force(
                c.drag_coefficient(),
                velocity_ms,
                c.frontal_area_m2(),
                c.air_density(),
            )
    }

    fn range_km(&self, genome: &VehicleGenome, mass_kg: f64) -> f64 {
        let c = &self.config;
        let cruise_ms = kmh_to_ms(c.cruising_speed_kmh());
        let force = self.resistive_force(cruise_ms, mass_kg);
        let hours = time_to_battery_drain(
            force,
            c.cruising_speed_kmh(),
            c.drivetrain_efficiency(),
            genome.battery_capacity_kwh(),
        );
        hours * c.cruising_speed_kmh()
    }

    /// Explicit Euler integration from standstill to the target speed
    fn time_to_target_s(&self, genome: &VehicleGenome, mass_kg: f64) -> Result<f64, SimulationError> {
        let c = &self.config;
        let drive_force = motor_driving_force(
            genome.motor_power_kw() * 1000.0,
            rpm_to_rads(c.motor_rpm()),
            c.gear_ratio(),
            c.tire_radius_m(),
        );
        let target_ms = kmh_to_ms(c.target_speed_kmh());
        let dt = c.time_step_s();

        // Resistance grows with speed, so a positive margin at the target holds all the way up.
        let margin = drive_force - self.resistive_force(target_ms, mass_kg);
        if margin <= 0.0 {
            return Err(SimulationError::TargetSpeedUnreachable {
                target_kmh: c.target_speed_kmh(),
                net_force_n: margin,
            });
        }

        let mut velocity = 0.0;
        let mut time = 0.0;
        while velocity < target_ms {
            if time >= c.max_simulation_time_s() {
                return Err(SimulationError::TimeLimitExceeded {
                    limit_s: c.max_simulation_time_s(),
                });
            }

            let net_force = drive_force - self.resistive_force(velocity, mass_kg);
            let acceleration = net_force / mass_kg;
            let next = velocity + acceleration * dt;
            if next >= target_ms {
                // partial final step
                time += (target_ms - velocity) / acceleration;
                velocity = target_ms;
            } else {
                time += dt;
                velocity = next;
            }
        }
        Ok(time)
    }
}

fn finite(quantity: &'static str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::NonFinite { quantity, value })
    }
}

impl MultiObjectiveFitness<VehicleGenome> for VehicleModel {
    fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn evaluate(&self, genome: &VehicleGenome) -> Result<Vec<f64>, SimulationError> {
        self.performance(genome).map(|p| p.objectives())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> VehicleModel {
        VehicleModel::new(VehicleConfig::default())
    }

    #[test]
    fn test_mass() {
        let m = model();
        assert_relative_eq!(m.mass(&VehicleGenome::new(100.0, 100.0)), 1000.0);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let m = model();
        let g = VehicleGenome::new(150.0, 75.0);
        assert_eq!(m.evaluate(&g).unwrap(), m.evaluate(&g).unwrap());
    }

    #[test]
    fn test_range_matches_closed_form() {
        let m = model();
        let g = VehicleGenome::new(100.0, 80.0);
        let mass = m.mass(&g);
        let v = 100.0 / 3.6;
        let c_r = coeff_rolling_resistance(2.5, 100.0);
        let force = c_r * mass * 9.81 + 0.5 * 1.2 * 0.25 * 2.2 * v * v;
        let expected = 80.0 * 1000.0 / (force * v) * 100.0;
        let perf = m.performance(&g).unwrap();
        assert_relative_eq!(perf.range_km, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_bigger_battery_goes_further() {
        let m = model();
        let small = m.performance(&VehicleGenome::new(100.0, 40.0)).unwrap();
        let large = m.performance(&VehicleGenome::new(100.0, 120.0)).unwrap();
        assert!(large.range_km > small.range_km);
        // but the extra mass slows it down
        assert!(large.acceleration_ms2 < small.acceleration_ms2);
    }

    #[test]
    fn test_more_power_accelerates_faster() {
        let m = model();
        let weak = m.performance(&VehicleGenome::new(60.0, 60.0)).unwrap();
        let strong = m.performance(&VehicleGenome::new(400.0, 60.0)).unwrap();
        assert!(strong.time_to_target_s < weak.time_to_target_s);
        assert!(strong.acceleration_ms2 > weak.acceleration_ms2);
        assert_relative_eq!(
            strong.acceleration_ms2,
            (100.0 / 3.6) / strong.time_to_target_s
        );
    }

    #[test]
    fn test_out_of_bounds_genome_rejected() {
        let m = model();
        let err = m.evaluate(&VehicleGenome::new(10.0, 60.0)).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::OutOfBounds {
                parameter: "motor_power_kw",
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_genome_rejected() {
        let m = model();
        let err = m.evaluate(&VehicleGenome::new(100.0, f64::NAN)).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::NonFinite {
                quantity: "battery_capacity_kwh",
                ..
            }
        ));
    }

    #[test]
    fn test_unreachable_target_speed() {
        let config = VehicleConfig::builder()
            .target_speed_kmh(400.0)
            .build()
            .unwrap();
        let m = VehicleModel::new(config);
        let err = m.evaluate(&VehicleGenome::new(50.0, 150.0)).unwrap_err();
        assert!(matches!(err, SimulationError::TargetSpeedUnreachable { .. }));
    }

    #[test]
    fn test_time_limit() {
        let config = VehicleConfig::builder()
            .max_simulation_time_s(0.5)
            .build()
            .unwrap();
        let m = VehicleModel::new(config);
        let err = m.evaluate(&VehicleGenome::new(50.0, 150.0)).unwrap_err();
        assert_eq!(err, SimulationError::TimeLimitExceeded { limit_s: 0.5 });
    }

    #[test]
    fn test_directions_are_maximize() {
        let m = model();
        assert_eq!(m.directions(), &[Direction::Maximize, Direction::Maximize]);
        assert_eq!(m.num_objectives(), OBJECTIVE_NAMES.len());
    }
}
