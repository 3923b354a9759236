//! Pareto ranking
//!
//! Dominance, fast non-dominated sorting, crowding distance and the crowded
//! comparison that orders individuals by rank, then by isolation.

pub mod crowding;
pub mod dominance;
pub mod sorting;

use std::cmp::Ordering;

use crate::fitness::traits::Direction;
use crate::genome::traits::RealValuedGenome;
use crate::population::individual::Individual;

pub use crowding::assign_crowding_distance;
pub use dominance::{compare, dominates, Dominance};
pub use sorting::fast_non_dominated_sort;

/// Crowded comparison as an ordering; `Less` means `a` is preferred
///
/// Lower rank wins; within a rank, higher crowding distance wins.
pub fn crowded_cmp<G: RealValuedGenome>(a: &Individual<G>, b: &Individual<G>) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then_with(|| b.crowding_distance.total_cmp(&a.crowding_distance))
}

/// Crowded comparison operator
///
/// Returns true if a is strictly better than b
pub fn crowded_comparison<G: RealValuedGenome>(a: &Individual<G>, b: &Individual<G>) -> bool {
    crowded_cmp(a, b) == Ordering::Less
}

/// Rank a population from scratch: clear old annotations, sort into fronts and
/// assign crowding distances within every front
pub fn rank_population<G: RealValuedGenome>(
    population: &mut [Individual<G>],
    directions: &[Direction],
) -> Vec<Vec<usize>> {
    for ind in population.iter_mut() {
        ind.clear_annotations();
    }
    let fronts = fast_non_dominated_sort(population, directions);
    for front in &fronts {
        assign_crowding_distance(population, front);
    }
    fronts
}

pub mod prelude {
    pub use super::crowding::*;
    pub use super::dominance::*;
    pub use super::sorting::*;
    pub use super::{crowded_cmp, crowded_comparison, rank_population};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::vehicle_genome::VehicleGenome;

    fn ind(rank: usize, crowding_distance: f64) -> Individual<VehicleGenome> {
        let mut i = Individual::new(VehicleGenome::new(100.0, 50.0), vec![0.0, 0.0]);
        i.rank = rank;
        i.crowding_distance = crowding_distance;
        i
    }

    #[test]
    fn test_crowded_comparison() {
        let a = ind(0, 2.0);
        let b = ind(1, 3.0);
        let c = ind(0, 1.0);

        assert!(crowded_comparison(&a, &b));
        assert!(crowded_comparison(&a, &c));
        assert!(!crowded_comparison(&c, &a));
        assert!(!crowded_comparison(&a, &a));
    }

    #[test]
    fn test_crowded_cmp_infinite_ties() {
        let a = ind(0, f64::INFINITY);
        let b = ind(0, f64::INFINITY);
        assert_eq!(crowded_cmp(&a, &b), Ordering::Equal);
        assert_eq!(crowded_cmp(&a, &ind(0, 5.0)), Ordering::Less);
    }

    #[test]
    fn test_rank_population_resets_annotations() {
        let mut pop: Vec<Individual<VehicleGenome>> = [[300.0, 5.0], [250.0, 6.0], [200.0, 4.0]]
            .iter()
            .map(|o| {
                let mut i = Individual::new(VehicleGenome::new(100.0, 50.0), o.to_vec());
                i.rank = 7;
                i.crowding_distance = 0.25;
                i
            })
            .collect();
        let fronts = rank_population(&mut pop, &[Direction::Maximize, Direction::Maximize]);

        assert_eq!(fronts.len(), 2);
        assert_eq!(pop[2].rank, 1);
        assert!(pop.iter().all(|i| i.crowding_distance.is_infinite()));
    }
}
