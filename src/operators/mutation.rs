//! Mutation operators
//!
//! This module provides the bounded real-valued mutation operators.

use rand::Rng;

use crate::error::OptimiseResult;
use crate::genome::bounds::{Bounds, MultiBounds};
use crate::genome::traits::{check_dimension, RealValuedGenome};
use crate::operators::traits::MutationOperator;

fn per_gene_probability(fixed: Option<f64>, dimension: usize) -> f64 {
    fixed.unwrap_or(1.0 / dimension.max(1) as f64)
}

/// Polynomial mutation (bounded)
///
/// Uses the polynomial probability distribution to perturb genes.
/// Respects bounds and is commonly used with NSGA-II.
///
/// Reference: Deb, K. (2001). Multi-Objective Optimization using Evolutionary Algorithms.
#[derive(Clone, Debug)]
pub struct PolynomialMutation {
    /// Distribution index (typically 20-100)
    /// Higher values = smaller mutations
    pub eta_m: f64,
    /// Per-gene mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
}

impl PolynomialMutation {
    /// Create a new polynomial mutation with the given distribution index
    pub fn new(eta_m: f64) -> Self {
        assert!(eta_m >= 0.0, "Distribution index must be non-negative");
        Self {
            eta_m,
            mutation_probability: None,
        }
    }

    /// Set a fixed mutation probability per gene
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.mutation_probability = Some(probability);
        self
    }

    /// Apply polynomial mutation to a gene
    fn mutate_gene<R: Rng>(&self, gene: f64, bound: &Bounds, rng: &mut R) -> f64 {
        let range = bound.range();
        if range <= 0.0 {
            return bound.min;
        }
        let gene = bound.clamp(gene);

        let delta1 = (gene - bound.min) / range;
        let delta2 = (bound.max - gene) / range;

        let u = rng.gen::<f64>();
        let delta_q = if u <= 0.5 {
            let val = 2.0 * u + (1.0 - 2.0 * u) * (1.0 - delta1).powf(self.eta_m + 1.0);
            val.powf(1.0 / (self.eta_m + 1.0)) - 1.0
        } else {
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * (1.0 - delta2).powf(self.eta_m + 1.0);
            1.0 - val.powf(1.0 / (self.eta_m + 1.0))
        };

        bound.clamp(gene + delta_q * range)
    }
}

impl Default for PolynomialMutation {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl<G: RealValuedGenome> MutationOperator<G> for PolynomialMutation {
    fn mutate<R: Rng>(&self, genome: &G, bounds: &MultiBounds, rng: &mut R) -> OptimiseResult<G> {
        check_dimension(bounds.dimension(), genome.dimension())?;
        let prob = per_gene_probability(self.mutation_probability, genome.dimension());

        let genes = genome
            .genes()
            .iter()
            .zip(bounds.iter())
            .map(|(&gene, bound)| {
                if rng.gen::<f64>() < prob {
                    self.mutate_gene(gene, bound, rng)
                } else {
                    gene
                }
            })
            .collect();
        G::from_genes(genes)
    }

    fn gene_probability(&self, dimension: usize) -> f64 {
        per_gene_probability(self.mutation_probability, dimension)
    }
}

/// Proportional mutation
///
/// Scales a gene by a factor drawn uniformly from `[1 - max_change, 1 + max_change]`,
/// so the step size grows with the gene's magnitude.
#[derive(Clone, Debug)]
pub struct ProportionalMutation {
    /// Largest relative change applied to a gene
    pub max_change: f64,
    /// Per-gene mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
}

impl ProportionalMutation {
    /// Create a new proportional mutation
    pub fn new(max_change: f64) -> Self {
        assert!(
            max_change >= 0.0 && max_change.is_finite(),
            "Relative change must be non-negative"
        );
        Self {
            max_change,
            mutation_probability: None,
        }
    }

    /// Set a fixed mutation probability per gene
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.mutation_probability = Some(probability);
        self
    }
}

impl Default for ProportionalMutation {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl<G: RealValuedGenome> MutationOperator<G> for ProportionalMutation {
    fn mutate<R: Rng>(&self, genome: &G, bounds: &MultiBounds, rng: &mut R) -> OptimiseResult<G> {
        check_dimension(bounds.dimension(), genome.dimension())?;
        let prob = per_gene_probability(self.mutation_probability, genome.dimension());

        let genes = genome
            .genes()
            .iter()
            .zip(bounds.iter())
            .map(|(&gene, bound)| {
                if rng.gen::<f64>() < prob {
                    let factor = 1.0 + rng.gen_range(-self.max_change..=self.max_change);
                    bound.clamp(gene * factor)
                } else {
                    gene
                }
            })
            .collect();
        G::from_genes(genes)
    }

    fn gene_probability(&self, dimension: usize) -> f64 {
        per_gene_probability(self.mutation_probability, dimension)
    }
}
