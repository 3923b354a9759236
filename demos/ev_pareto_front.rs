//! Electric Vehicle Pareto Front
//!
//! This example searches motor power and battery capacity for the trade-off
//! between driving range and acceleration, then prints the final Pareto front.
//!
//! Set `RUST_LOG=ev_optimise=debug` to follow the run generation by generation.

use ev_optimise::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Electric Vehicle Pareto Front ===\n");

    let config = VehicleConfig::default();
    let model = VehicleModel::new(config.clone());

    let history = optimise(&config, 50, 100, Some(42))?;

    let last = history.last().ok_or("empty history")?;
    let mut front = last.pareto_front();
    front.sort_by(|a, b| a.objectives[0].total_cmp(&b.objectives[0]));

    println!(
        "Generation {}: {} designs on the Pareto front\n",
        last.generation(),
        front.len()
    );
    println!(
        "{:>12} {:>14} {:>10} {:>10} {:>12} {:>14}",
        "motor [kW]", "battery [kWh]", "mass [kg]", "range [km]", "0-100 [s]", "accel [m/s^2]"
    );
    for ind in front {
        let performance = model.performance(&ind.genome)?;
        println!(
            "{:>12.1} {:>14.1} {:>10.0} {:>10.1} {:>12.2} {:>14.3}",
            ind.genome.motor_power_kw(),
            ind.genome.battery_capacity_kwh(),
            performance.mass_kg,
            performance.range_km,
            performance.time_to_target_s,
            performance.acceleration_ms2
        );
    }

    let summary = RunSummary::from_history(
        &history,
        model.directions(),
        Some([0.0, 0.0]),
    );
    println!("\n{}", summary.summary());

    Ok(())
}
