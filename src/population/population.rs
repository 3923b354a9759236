//! Population type
//!
//! This module provides the Population container type.

use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{OptimiseError, OptimiseResult, SimulationError};
use crate::fitness::traits::MultiObjectiveFitness;
use crate::genome::bounds::MultiBounds;
use crate::genome::traits::RealValuedGenome;
use crate::population::individual::Individual;

/// An ordered population of evaluated individuals
#[derive(Clone, Debug, PartialEq)]
pub struct Population<G: RealValuedGenome> {
    individuals: Vec<Individual<G>>,
}

impl<G: RealValuedGenome> Population<G> {
    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<Individual<G>>) -> Self {
        Self { individuals }
    }

    /// Sample `size` genomes uniformly within `bounds` and evaluate them
    ///
    /// Genomes are drawn sequentially from `rng` before any evaluation starts.
    pub fn random<F, R>(
        size: usize,
        bounds: &MultiBounds,
        fitness: &F,
        rng: &mut R,
    ) -> OptimiseResult<Self>
    where
        F: MultiObjectiveFitness<G> + ?Sized,
        R: Rng,
    {
        let genomes = (0..size)
            .map(|_| G::generate(rng, bounds))
            .collect::<OptimiseResult<Vec<_>>>()?;
        Self::evaluate(genomes, fitness).map_err(|e| OptimiseError::simulation(0, e))
    }

    /// Evaluate genomes into a population, preserving their order
    #[cfg(feature = "parallel")]
    pub fn evaluate<F>(genomes: Vec<G>, fitness: &F) -> Result<Self, SimulationError>
    where
        F: MultiObjectiveFitness<G> + ?Sized,
    {
        let individuals = genomes
            .into_par_iter()
            .map(|genome| {
                let objectives = fitness.evaluate(&genome)?;
                Ok(Individual::new(genome, objectives))
            })
            .collect::<Result<Vec<_>, SimulationError>>()?;
        Ok(Self { individuals })
    }

    /// Evaluate genomes into a population, preserving their order
    #[cfg(not(feature = "parallel"))]
    pub fn evaluate<F>(genomes: Vec<G>, fitness: &F) -> Result<Self, SimulationError>
    where
        F: MultiObjectiveFitness<G> + ?Sized,
    {
        let individuals = genomes
            .into_iter()
            .map(|genome| {
                let objectives = fitness.evaluate(&genome)?;
                Ok(Individual::new(genome, objectives))
            })
            .collect::<Result<Vec<_>, SimulationError>>()?;
        Ok(Self { individuals })
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&Individual<G>> {
        self.individuals.get(index)
    }

    /// Get an iterator over the individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual<G>> {
        self.individuals.iter()
    }

    /// Get the individuals as a slice
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Get mutable access to the individuals, for ranking
    pub fn individuals_mut(&mut self) -> &mut [Individual<G>] {
        &mut self.individuals
    }

    /// Consume the population and return its individuals
    pub fn into_individuals(self) -> Vec<Individual<G>> {
        self.individuals
    }

    /// Append another population after this one
    pub fn merge(mut self, other: Population<G>) -> Self {
        self.individuals.extend(other.individuals);
        self
    }
}

impl<G: RealValuedGenome> IntoIterator for Population<G> {
    type Item = Individual<G>;
    type IntoIter = std::vec::IntoIter<Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}
