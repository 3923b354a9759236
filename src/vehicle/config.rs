//! Vehicle configuration
//!
//! Parameter bounds and the physical constants consumed by the vehicle simulation.
//! A [`VehicleConfig`] can only be obtained through validation, either from
//! [`VehicleConfigBuilder::build`] or by deserializing a complete document.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::genome::bounds::{Bounds, MultiBounds};
use crate::genome::vehicle_genome::VehicleGenome;

/// Largest number of Euler steps one acceleration run may take
///
/// Bounds `max_simulation_time_s / time_step_s`, and with it the cost of
/// evaluating a single genome.
pub const MAX_INTEGRATION_STEPS: f64 = 1e7;

/// Builder for [`VehicleConfig`], pre-filled with the documented defaults.
///
/// Deserializing a builder requires every field to be present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfigBuilder {
    motor_power_kw: Bounds,
    battery_capacity_kwh: Bounds,
    tire_pressure_bar: f64,
    motor_rpm: f64,
    tire_radius_m: f64,
    frontal_area_m2: f64,
    drag_coefficient: f64,
    gear_ratio: f64,
    cruising_speed_kmh: f64,
    drivetrain_efficiency: f64,
    motor_weight_ratio: f64,
    battery_weight_ratio: f64,
    air_density: f64,
    gravity: f64,
    target_speed_kmh: f64,
    time_step_s: f64,
    max_simulation_time_s: f64,
}

impl Default for VehicleConfigBuilder {
    fn default() -> Self {
        Self {
            motor_power_kw: Bounds::new(50.0, 500.0),
            battery_capacity_kwh: Bounds::new(30.0, 150.0),
            tire_pressure_bar: 2.5,
            motor_rpm: 6000.0,
            tire_radius_m: 0.65,
            frontal_area_m2: 2.2,
            drag_coefficient: 0.25,
            gear_ratio: 10.0,
            cruising_speed_kmh: 100.0,
            drivetrain_efficiency: 1.0,
            motor_weight_ratio: 4.0,
            battery_weight_ratio: 6.0,
            air_density: 1.2,
            gravity: 9.81,
            target_speed_kmh: 100.0,
            time_step_s: 0.01,
            max_simulation_time_s: 120.0,
        }
    }
}

impl VehicleConfigBuilder {
    /// Start from the default vehicle
    pub fn new() -> Self {
        Self::default()
    }

    /// Motor power bounds in kW
    pub fn motor_power_kw(mut self, min: f64, max: f64) -> Self {
        self.motor_power_kw = Bounds { min, max };
        self
    }

    /// Battery capacity bounds in kWh
    pub fn battery_capacity_kwh(mut self, min: f64, max: f64) -> Self {
        self.battery_capacity_kwh = Bounds { min, max };
        self
    }

    /// Tyre pressure in bar
    pub fn tire_pressure_bar(mut self, value: f64) -> Self {
        self.tire_pressure_bar = value;
        self
    }

    /// Maximum motor speed in rpm
    pub fn motor_rpm(mut self, value: f64) -> Self {
        self.motor_rpm = value;
        self
    }

    /// Tyre radius in m
    pub fn tire_radius_m(mut self, value: f64) -> Self {
        self.tire_radius_m = value;
        self
    }

    /// Frontal area in m²
    pub fn frontal_area_m2(mut self, value: f64) -> Self {
        self.frontal_area_m2 = value;
        self
    }

    /// Aerodynamic drag coefficient
    pub fn drag_coefficient(mut self, value: f64) -> Self {
        self.drag_coefficient = value;
        self
    }

    /// Gear ratio between motor and wheels
    pub fn gear_ratio(mut self, value: f64) -> Self {
        self.gear_ratio = value;
        self
    }

    /// Cruising speed used for the range estimate, in km/h
    pub fn cruising_speed_kmh(mut self, value: f64) -> Self {
        self.cruising_speed_kmh = value;
        self
    }

    /// Drivetrain efficiency in (0, 1]
    pub fn drivetrain_efficiency(mut self, value: f64) -> Self {
        self.drivetrain_efficiency = value;
        self
    }

    /// Motor mass per kW of power
    pub fn motor_weight_ratio(mut self, value: f64) -> Self {
        self.motor_weight_ratio = value;
        self
    }

    /// Battery mass per kWh of capacity
    pub fn battery_weight_ratio(mut self, value: f64) -> Self {
        self.battery_weight_ratio = value;
        self
    }

    /// Air density in kg/m³
    pub fn air_density(mut self, value: f64) -> Self {
        self.air_density = value;
        self
    }

    /// Gravitational acceleration in m/s²
    pub fn gravity(mut self, value: f64) -> Self {
        self.gravity = value;
        self
    }

    /// Speed the acceleration run ends at, in km/h
    pub fn target_speed_kmh(mut self, value: f64) -> Self {
        self.target_speed_kmh = value;
        self
    }

    /// Integration step of the acceleration run, in s
    pub fn time_step_s(mut self, value: f64) -> Self {
        self.time_step_s = value;
        self
    }

    /// Simulated time after which the acceleration run is abandoned, in s
    pub fn max_simulation_time_s(mut self, value: f64) -> Self {
        self.max_simulation_time_s = value;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<VehicleConfig, ConfigError> {
        self.motor_power_kw
            .validate(VehicleGenome::PARAMETER_NAMES[VehicleGenome::MOTOR_POWER])?;
        self.battery_capacity_kwh
            .validate(VehicleGenome::PARAMETER_NAMES[VehicleGenome::BATTERY_CAPACITY])?;
        positive("motor_power_kw.min", self.motor_power_kw.min)?;
        positive("battery_capacity_kwh.min", self.battery_capacity_kwh.min)?;

        positive("tire_pressure_bar", self.tire_pressure_bar)?;
        positive("motor_rpm", self.motor_rpm)?;
        positive("tire_radius_m", self.tire_radius_m)?;
        positive("frontal_area_m2", self.frontal_area_m2)?;
        positive("drag_coefficient", self.drag_coefficient)?;
        positive("gear_ratio", self.gear_ratio)?;
        positive("cruising_speed_kmh", self.cruising_speed_kmh)?;
        positive("motor_weight_ratio", self.motor_weight_ratio)?;
        positive("battery_weight_ratio", self.battery_weight_ratio)?;
        positive("air_density", self.air_density)?;
        positive("gravity", self.gravity)?;
        positive("target_speed_kmh", self.target_speed_kmh)?;
        positive("time_step_s", self.time_step_s)?;
        positive("max_simulation_time_s", self.max_simulation_time_s)?;

        if !(self.drivetrain_efficiency > 0.0 && self.drivetrain_efficiency <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "drivetrain_efficiency",
                value: self.drivetrain_efficiency,
                expected: "(0, 1]",
            });
        }
        if self.time_step_s >= self.max_simulation_time_s {
            return Err(ConfigError::InvalidParameter(format!(
                "time_step_s ({}) must be smaller than max_simulation_time_s ({})",
                self.time_step_s, self.max_simulation_time_s
            )));
        }
        let steps = self.max_simulation_time_s / self.time_step_s;
        if steps > MAX_INTEGRATION_STEPS {
            return Err(ConfigError::OutOfRange {
                name: "max_simulation_time_s / time_step_s",
                value: steps,
                expected: "(1, 1e7]",
            });
        }

        Ok(VehicleConfig { params: self })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveConstant { name, value })
    }
}

/// Validated vehicle configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VehicleConfigBuilder", into = "VehicleConfigBuilder")]
pub struct VehicleConfig {
    params: VehicleConfigBuilder,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        // The defaults are known to validate.
        Self {
            params: VehicleConfigBuilder::default(),
        }
    }
}

impl TryFrom<VehicleConfigBuilder> for VehicleConfig {
    type Error = ConfigError;

    fn try_from(builder: VehicleConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

impl From<VehicleConfig> for VehicleConfigBuilder {
    fn from(config: VehicleConfig) -> Self {
        config.params
    }
}

impl VehicleConfig {
    /// Create a builder pre-filled with defaults
    pub fn builder() -> VehicleConfigBuilder {
        VehicleConfigBuilder::default()
    }

    /// Reopen this configuration for modification
    pub fn to_builder(&self) -> VehicleConfigBuilder {
        self.params.clone()
    }

    /// Parse and validate a JSON document; every field is required
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Per-parameter bounds in genome order
    pub fn bounds(&self) -> MultiBounds {
        MultiBounds::new(vec![
            self.params.motor_power_kw,
            self.params.battery_capacity_kwh,
        ])
    }

    pub fn motor_power_bounds(&self) -> Bounds {
        self.params.motor_power_kw
    }

    pub fn battery_capacity_bounds(&self) -> Bounds {
        self.params.battery_capacity_kwh
    }

    pub fn tire_pressure_bar(&self) -> f64 {
        self.params.tire_pressure_bar
    }

    pub fn motor_rpm(&self) -> f64 {
        self.params.motor_rpm
    }

    pub fn tire_radius_m(&self) -> f64 {
        self.params.tire_radius_m
    }

    pub fn frontal_area_m2(&self) -> f64 {
        self.params.frontal_area_m2
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.params.drag_coefficient
    }

    pub fn gear_ratio(&self) -> f64 {
        self.params.gear_ratio
    }

    pub fn cruising_speed_kmh(&self) -> f64 {
        self.params.cruising_speed_kmh
    }

    pub fn drivetrain_efficiency(&self) -> f64 {
        self.params.drivetrain_efficiency
    }

    pub fn motor_weight_ratio(&self) -> f64 {
        self.params.motor_weight_ratio
    }

    pub fn battery_weight_ratio(&self) -> f64 {
        self.params.battery_weight_ratio
    }

    pub fn air_density(&self) -> f64 {
        self.params.air_density
    }

    pub fn gravity(&self) -> f64 {
        self.params.gravity
    }

    pub fn target_speed_kmh(&self) -> f64 {
        self.params.target_speed_kmh
    }

    pub fn time_step_s(&self) -> f64 {
        self.params.time_step_s
    }

    pub fn max_simulation_time_s(&self) -> f64 {
        self.params.max_simulation_time_s
    }
}
