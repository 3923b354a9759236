//! Custom Operators
//!
//! This example builds the NSGA-II engine directly, swapping the default
//! SBX crossover and polynomial mutation for BLX-α crossover and a small
//! proportional mutation, on a vehicle with a heavier battery chemistry.

use ev_optimise::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== NSGA-II with BLX-α and Proportional Mutation ===\n");

    let config = VehicleConfig::builder()
        .battery_weight_ratio(8.0)
        .drivetrain_efficiency(0.9)
        .build()?;

    let nsga2 = Nsga2::new(
        VehicleModel::new(config.clone()),
        config.bounds(),
        BlxAlphaCrossover::new(0.2),
        ProportionalMutation::new(0.05).with_probability(0.5),
    )
    .with_population_size(60)
    .with_crossover_probability(0.9)
    .with_reference_point([0.0, 0.0]);

    let mut rng = StdRng::seed_from_u64(7);
    let history = nsga2.run(40, &mut rng)?;

    let summary = RunSummary::from_history(&history, nsga2.fitness().directions(), Some([0.0, 0.0]));
    for stats in summary.generations.iter().step_by(10) {
        println!(
            "Gen {:3}: fronts = {:2}, front size = {:2}, hypervolume = {:.1}",
            stats.generation,
            stats.num_fronts,
            stats.pareto_front_size,
            stats.hypervolume.unwrap_or(0.0)
        );
    }

    if let Some(last) = history.last() {
        println!("\nFinal Pareto front:");
        for ind in last.pareto_front() {
            println!(
                "  {} -> range {:.1} km, acceleration {:.3} m/s^2",
                ind.genome, ind.objectives[0], ind.objectives[1]
            );
        }
    }

    // Export for an external plotting layer
    let json = history.to_json(&config)?;
    println!("\nExported {} bytes of generation records", json.len());

    Ok(())
}
