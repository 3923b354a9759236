//! Fast non-dominated sort
//!
//! Reference: Deb, K., Pratap, A., Agarwal, S., & Meyarivan, T. (2002).
//! A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II.
//! IEEE Transactions on Evolutionary Computation, 6(2).

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fitness::traits::Direction;
use crate::genome::traits::RealValuedGenome;
use crate::pareto::dominance::dominates;
use crate::population::individual::Individual;

/// `dominated_set[i]` = ascending indices of the individuals `i` dominates
#[cfg(feature = "parallel")]
fn dominated_sets<G: RealValuedGenome>(
    population: &[Individual<G>],
    directions: &[Direction],
) -> Vec<Vec<usize>> {
    (0..population.len())
        .into_par_iter()
        .map(|i| {
            (0..population.len())
                .filter(|&j| {
                    i != j
                        && dominates(
                            &population[i].objectives,
                            &population[j].objectives,
                            directions,
                        )
                })
                .collect()
        })
        .collect()
}

/// `dominated_set[i]` = ascending indices of the individuals `i` dominates
#[cfg(not(feature = "parallel"))]
fn dominated_sets<G: RealValuedGenome>(
    population: &[Individual<G>],
    directions: &[Direction],
) -> Vec<Vec<usize>> {
    let n = population.len();
    let mut dominated_set: Vec<Vec<usize>> = vec![vec![]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            if dominates(&population[i].objectives, &population[j].objectives, directions) {
                dominated_set[i].push(j);
            } else if dominates(&population[j].objectives, &population[i].objectives, directions) {
                dominated_set[j].push(i);
            }
        }
    }
    dominated_set
}

/// Fast non-dominated sort
///
/// Tags every individual with its rank and returns the fronts, where `fronts[0]`
/// is the Pareto-optimal front. Runs in O(M² · K) for M individuals and K objectives.
pub fn fast_non_dominated_sort<G: RealValuedGenome>(
    population: &mut [Individual<G>],
    directions: &[Direction],
) -> Vec<Vec<usize>> {
    let n = population.len();
    if n == 0 {
        return vec![];
    }

    let dominated_set = dominated_sets(population, directions);

    // domination_count[i] = number of individuals that dominate i
    let mut domination_count = vec![0usize; n];
    for set in &dominated_set {
        for &j in set {
            domination_count[j] += 1;
        }
    }

    let mut fronts: Vec<Vec<usize>> = vec![];
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    let mut rank = 0;
    while !current_front.is_empty() {
        for &i in &current_front {
            population[i].rank = rank;
        }

        let mut next_front = vec![];
        for &i in &current_front {
            for &j in &dominated_set[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next_front.push(j);
                }
            }
        }

        fronts.push(current_front);
        current_front = next_front;
        rank += 1;
    }

    fronts
}
