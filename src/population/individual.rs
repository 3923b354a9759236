//! Individual wrapper type
//!
//! This module provides the Individual type that wraps a genome with its cached
//! objective vector and its per-generation ranking annotations.

use serde::{Deserialize, Serialize};

use crate::fitness::traits::Direction;
use crate::genome::traits::RealValuedGenome;

/// Rank of an individual that has not been sorted yet
pub const UNRANKED: usize = usize::MAX;

/// An individual in the population
///
/// `rank` and `crowding_distance` are transient: they are reset and recomputed
/// every time the individual's population is ranked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "G: Serialize + serde::de::DeserializeOwned")]
pub struct Individual<G: RealValuedGenome> {
    /// The genome of this individual
    pub genome: G,
    /// Objective values, computed once when the individual is created
    pub objectives: Vec<f64>,
    /// Pareto rank (0 = first front)
    pub rank: usize,
    /// Crowding distance within its front
    pub crowding_distance: f64,
}

impl<G: RealValuedGenome> Individual<G> {
    /// Create a new individual with evaluated objectives
    pub fn new(genome: G, objectives: Vec<f64>) -> Self {
        Self {
            genome,
            objectives,
            rank: UNRANKED,
            crowding_distance: 0.0,
        }
    }

    /// Whether a rank has been assigned
    pub fn is_ranked(&self) -> bool {
        self.rank != UNRANKED
    }

    /// Drop the ranking annotations
    pub fn clear_annotations(&mut self) {
        self.rank = UNRANKED;
        self.crowding_distance = 0.0;
    }

    /// Check if this individual dominates another under the given directions
    pub fn dominates(&self, other: &Self, directions: &[Direction]) -> bool {
        crate::pareto::dominance::dominates(&self.objectives, &other.objectives, directions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::vehicle_genome::VehicleGenome;

    #[test]
    fn test_new_individual_is_unranked() {
        let ind = Individual::new(VehicleGenome::new(100.0, 50.0), vec![300.0, 5.0]);
        assert!(!ind.is_ranked());
        assert_eq!(ind.crowding_distance, 0.0);
    }

    #[test]
    fn test_clear_annotations() {
        let mut ind = Individual::new(VehicleGenome::new(100.0, 50.0), vec![300.0, 5.0]);
        ind.rank = 2;
        ind.crowding_distance = f64::INFINITY;
        ind.clear_annotations();
        assert_eq!(ind.rank, UNRANKED);
        assert_eq!(ind.crowding_distance, 0.0);
    }

    #[test]
    fn test_dominates_uses_directions() {
        let a = Individual::new(VehicleGenome::new(1.0, 1.0), vec![300.0, 5.0]);
        let c = Individual::new(VehicleGenome::new(1.0, 1.0), vec![200.0, 4.0]);
        let max = [Direction::Maximize, Direction::Maximize];
        let min = [Direction::Minimize, Direction::Minimize];
        assert!(a.dominates(&c, &max));
        assert!(c.dominates(&a, &min));
    }
}
