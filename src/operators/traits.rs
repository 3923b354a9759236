//! Operator traits
//!
//! This module defines the selection and variation operator traits. Variation
//! operators are pure: they borrow their parents and return new genomes, with
//! every random draw taken from the caller's `rng`.

use rand::Rng;

use crate::error::OptimiseResult;
use crate::genome::bounds::MultiBounds;
use crate::genome::traits::RealValuedGenome;
use crate::population::individual::Individual;

/// Selection operator trait
///
/// Selects individuals from a ranked population for reproduction.
pub trait SelectionOperator<G: RealValuedGenome>: Send + Sync {
    /// Select a single individual from the population
    ///
    /// Returns the index of the selected individual.
    fn select<R: Rng>(&self, population: &[Individual<G>], rng: &mut R) -> OptimiseResult<usize>;

    /// Select multiple individuals from the population
    fn select_many<R: Rng>(
        &self,
        population: &[Individual<G>],
        count: usize,
        rng: &mut R,
    ) -> OptimiseResult<Vec<usize>> {
        (0..count).map(|_| self.select(population, rng)).collect()
    }
}

/// Crossover operator trait
///
/// Combines genetic material from two parents to create two offspring. Genes
/// that leave their bounds are clamped back.
pub trait CrossoverOperator<G: RealValuedGenome>: Send + Sync {
    /// Apply crossover to two parents and produce two offspring
    fn crossover<R: Rng>(
        &self,
        parent1: &G,
        parent2: &G,
        bounds: &MultiBounds,
        rng: &mut R,
    ) -> OptimiseResult<(G, G)>;
}

/// Mutation operator trait
///
/// Perturbs genes independently, each with the operator's per-gene probability,
/// and clamps the result to the bounds. Genome length and gene order are preserved.
pub trait MutationOperator<G: RealValuedGenome>: Send + Sync {
    /// Return a mutated copy of `genome`
    fn mutate<R: Rng>(&self, genome: &G, bounds: &MultiBounds, rng: &mut R) -> OptimiseResult<G>;

    /// Per-gene mutation probability for a genome of the given length
    fn gene_probability(&self, dimension: usize) -> f64;
}
