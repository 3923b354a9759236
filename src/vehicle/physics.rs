//! Longitudinal vehicle physics
//!
//! Pure scalar formulas used by the vehicle model. Units are given per function.

use std::f64::consts::PI;

/// Convert rpm to rad/s
pub fn rpm_to_rads(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

/// Convert km/h to m/s
pub fn kmh_to_ms(kmh: f64) -> f64 {
    kmh / 3.6
}

/// Rolling resistance coefficient for a tyre pressure in bar at a velocity in km/h
pub fn coeff_rolling_resistance(tire_pressure_bar: f64, velocity_kmh: f64) -> f64 {
    let velocity_term = 0.0095 * (velocity_kmh / 100.0).powi(2);
    0.005 + (1.0 / tire_pressure_bar) * (0.01 + velocity_term)
}

/// Rolling resistance force in N
pub fn rolling_resistance_force(coefficient: f64, mass_kg: f64, gravity: f64) -> f64 {
    coefficient * mass_kg * gravity
}

/// Aerodynamic drag force in N at a velocity in m/s
pub fn aerodynamic_drag_force(
    drag_coefficient: f64,
    velocity_ms: f64,
    frontal_area_m2: f64,
    air_density: f64,
) -> f64 {
    0.5 * air_density * drag_coefficient * frontal_area_m2 * velocity_ms.powi(2)
}

/// Tractive force in N delivered at the wheels by a motor at its rated power and speed
pub fn motor_driving_force(
    power_w: f64,
    angular_velocity_rads: f64,
    gear_ratio: f64,
    tire_radius_m: f64,
) -> f64 {
    let torque = power_w / angular_velocity_rads;
    torque * gear_ratio / tire_radius_m
}

/// Hours until a battery in kWh is drained while overcoming `force_n` at `velocity_kmh`
pub fn time_to_battery_drain(
    force_n: f64,
    velocity_kmh: f64,
    drivetrain_efficiency: f64,
    battery_capacity_kwh: f64,
) -> f64 {
    let power_w = force_n * kmh_to_ms(velocity_kmh) / drivetrain_efficiency;
    battery_capacity_kwh * 1000.0 / power_w
}
