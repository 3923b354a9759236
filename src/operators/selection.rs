//! Selection operators
//!
//! This module provides the crowded binary tournament used to build mating pools.

use std::cmp::Ordering;

use rand::Rng;

use crate::error::{OptimiseError, OptimiseResult};
use crate::genome::traits::RealValuedGenome;
use crate::operators::traits::SelectionOperator;
use crate::pareto::crowded_cmp;
use crate::population::individual::Individual;

/// Binary tournament under the crowded comparison
///
/// Draws two contestants uniformly with replacement; the lower rank wins, then
/// the larger crowding distance. Full ties are settled by a fair coin drawn from
/// the same `rng`.
#[derive(Clone, Debug, Default)]
pub struct BinaryTournament;

impl BinaryTournament {
    /// Create a new binary tournament
    pub fn new() -> Self {
        Self
    }

    /// Decide a tournament between two known contestants
    pub fn compete<G: RealValuedGenome, R: Rng>(
        &self,
        population: &[Individual<G>],
        a: usize,
        b: usize,
        rng: &mut R,
    ) -> usize {
        match crowded_cmp(&population[a], &population[b]) {
            Ordering::Less => a,
            Ordering::Greater => b,
            Ordering::Equal => {
                if rng.gen_bool(0.5) {
                    a
                } else {
                    b
                }
            }
        }
    }
}

impl<G: RealValuedGenome> SelectionOperator<G> for BinaryTournament {
    fn select<R: Rng>(&self, population: &[Individual<G>], rng: &mut R) -> OptimiseResult<usize> {
        if population.is_empty() {
            return Err(OptimiseError::EmptyPopulation);
        }
        let a = rng.gen_range(0..population.len());
        let b = rng.gen_range(0..population.len());
        Ok(self.compete(population, a, b, rng))
    }
}
