//! Diagnostics and statistics
//!
//! This module provides per-generation statistics and a run summary computed
//! from a recorded [`History`].

pub mod hypervolume;

use serde::{Deserialize, Serialize};

use crate::fitness::traits::Direction;
use crate::genome::traits::RealValuedGenome;
use crate::population::snapshot::{GenerationSnapshot, History};

pub use hypervolume::hypervolume_2d;

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Number of individuals in the generation
    pub population_size: usize,
    /// Number of non-dominated fronts
    pub num_fronts: usize,
    /// Size of the first front
    pub pareto_front_size: usize,
    /// Best value of each objective over the first front
    pub ideal: Vec<f64>,
    /// Worst value of each objective over the first front
    pub nadir: Vec<f64>,
    /// Hypervolume of the first front, when a reference point was given
    pub hypervolume: Option<f64>,
}

impl GenerationStats {
    /// Compute statistics from a snapshot
    ///
    /// The hypervolume is only computed for two-objective problems with a
    /// reference point.
    pub fn from_snapshot<G: RealValuedGenome>(
        snapshot: &GenerationSnapshot<G>,
        directions: &[Direction],
        reference: Option<[f64; 2]>,
    ) -> Self {
        let front: Vec<&[f64]> = snapshot
            .pareto_front()
            .into_iter()
            .map(|ind| ind.objectives.as_slice())
            .collect();

        let mut ideal = Vec::with_capacity(directions.len());
        let mut nadir = Vec::with_capacity(directions.len());
        for (k, &direction) in directions.iter().enumerate() {
            let mut values = front.iter().filter_map(|o| o.get(k).copied());
            if let Some(first) = values.next() {
                let (best, worst) = values.fold((first, first), |(best, worst), v| {
                    (direction.better(best, v), direction.worse(worst, v))
                });
                ideal.push(best);
                nadir.push(worst);
            }
        }

        let hypervolume = match (directions, reference) {
            (&[d0, d1], Some(reference)) => Some(hypervolume_2d(&front, [d0, d1], reference)),
            _ => None,
        };

        Self {
            generation: snapshot.generation(),
            population_size: snapshot.len(),
            num_fronts: snapshot.num_fronts(),
            pareto_front_size: front.len(),
            ideal,
            nadir,
            hypervolume,
        }
    }
}

/// Statistics collected over a whole run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Statistics per generation, in generation order
    pub generations: Vec<GenerationStats>,
}

impl RunSummary {
    /// Compute statistics for every generation of a history
    pub fn from_history<G: RealValuedGenome>(
        history: &History<G>,
        directions: &[Direction],
        reference: Option<[f64; 2]>,
    ) -> Self {
        Self {
            generations: history
                .iter()
                .map(|(_, snapshot)| GenerationStats::from_snapshot(snapshot, directions, reference))
                .collect(),
        }
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Statistics of the last generation
    pub fn final_stats(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    /// Hypervolume per generation
    pub fn hypervolume_history(&self) -> Vec<Option<f64>> {
        self.generations.iter().map(|g| g.hypervolume).collect()
    }

    /// Size of the first front per generation
    pub fn pareto_front_size_history(&self) -> Vec<usize> {
        self.generations.iter().map(|g| g.pareto_front_size).collect()
    }

    /// Get a summary of the optimisation run
    pub fn summary(&self) -> String {
        let Some(last) = self.final_stats() else {
            return "Optimisation Summary:\n - Generations: 0".to_string();
        };
        let format_vec = |v: &[f64]| {
            v.iter()
                .map(|x| format!("{:.3}", x))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let hypervolume = last
            .hypervolume
            .map(|h| format!("{:.3}", h))
            .unwrap_or_else(|| "n/a".to_string());

        format!(
            "Optimisation Summary:\n\
             - Generations: {}\n\
             - Population size: {}\n\
             - Fronts: {}\n\
             - Pareto front size: {}\n\
             - Ideal: [{}]\n\
             - Nadir: [{}]\n\
             - Hypervolume: {}",
            self.num_generations(),
            last.population_size,
            last.num_fronts,
            last.pareto_front_size,
            format_vec(&last.ideal),
            format_vec(&last.nadir),
            hypervolume
        )
    }
}

pub mod prelude {
    pub use super::hypervolume::*;
    pub use super::{GenerationStats, RunSummary};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::vehicle_genome::VehicleGenome;
    use crate::pareto::rank_population;
    use crate::population::individual::Individual;
    use approx::assert_relative_eq;

    const MAX2: [Direction; 2] = [Direction::Maximize, Direction::Maximize];

    fn snapshot(generation: usize, objectives: &[[f64; 2]]) -> GenerationSnapshot<VehicleGenome> {
        let mut individuals: Vec<_> = objectives
            .iter()
            .map(|o| Individual::new(VehicleGenome::new(100.0, 50.0), o.to_vec()))
            .collect();
        let fronts = rank_population(&mut individuals, &MAX2);
        GenerationSnapshot::new(generation, individuals, fronts)
    }

    #[test]
    fn test_generation_stats_from_snapshot() {
        let snap = snapshot(3, &[[300.0, 5.0], [250.0, 6.0], [200.0, 4.0]]);
        let stats = GenerationStats::from_snapshot(&snap, &MAX2, Some([0.0, 0.0]));

        assert_eq!(stats.generation, 3);
        assert_eq!(stats.population_size, 3);
        assert_eq!(stats.num_fronts, 2);
        assert_eq!(stats.pareto_front_size, 2);
        assert_eq!(stats.ideal, vec![300.0, 6.0]);
        assert_eq!(stats.nadir, vec![250.0, 5.0]);
        assert_relative_eq!(stats.hypervolume.unwrap(), 1750.0);
    }

    #[test]
    fn test_generation_stats_without_reference() {
        let snap = snapshot(0, &[[1.0, 1.0]]);
        let stats = GenerationStats::from_snapshot(&snap, &MAX2, None);
        assert_eq!(stats.hypervolume, None);
        assert_eq!(stats.ideal, stats.nadir);
    }

    #[test]
    fn test_run_summary() {
        let mut history = History::new();
        history.record(snapshot(0, &[[100.0, 2.0], [50.0, 3.0]]));
        history.record(snapshot(1, &[[300.0, 5.0], [250.0, 6.0], [200.0, 4.0]]));

        let summary = RunSummary::from_history(&history, &MAX2, Some([0.0, 0.0]));
        assert_eq!(summary.num_generations(), 2);
        assert_eq!(summary.pareto_front_size_history(), vec![2, 2]);
        assert_relative_eq!(summary.hypervolume_history()[0].unwrap(), 250.0);

        let text = summary.summary();
        assert!(text.contains("Generations: 2"));
        assert!(text.contains("Pareto front size: 2"));
        assert!(text.contains("Hypervolume: 1750.000"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::default();
        assert!(summary.final_stats().is_none());
        assert!(summary.summary().contains("Generations: 0"));
    }
}
