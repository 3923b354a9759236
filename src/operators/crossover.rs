//! Crossover operators
//!
//! This module provides the real-valued crossover operators.

use rand::Rng;

use crate::error::OptimiseResult;
use crate::genome::bounds::MultiBounds;
use crate::genome::traits::{check_dimension, RealValuedGenome};
use crate::operators::traits::CrossoverOperator;

fn check_parents<G: RealValuedGenome>(
    parent1: &G,
    parent2: &G,
    bounds: &MultiBounds,
) -> OptimiseResult<()> {
    check_dimension(bounds.dimension(), parent1.dimension())?;
    check_dimension(bounds.dimension(), parent2.dimension())
}

/// Simulated Binary Crossover (SBX)
///
/// SBX generates offspring from parents using a spread factor that
/// simulates single-point crossover for binary strings.
///
/// Reference: Deb, K., & Agrawal, R. B. (1995). Simulated Binary Crossover
/// for Continuous Search Space.
#[derive(Clone, Debug)]
pub struct SbxCrossover {
    /// Distribution index (typically 2-20)
    /// Higher values = offspring closer to parents
    pub eta: f64,
    /// Probability that a given gene pair is recombined
    pub gene_probability: f64,
}

impl SbxCrossover {
    /// Create a new SBX crossover with the given distribution index
    pub fn new(eta: f64) -> Self {
        assert!(eta >= 0.0, "Distribution index must be non-negative");
        Self {
            eta,
            gene_probability: 1.0,
        }
    }

    /// Set the per-gene recombination probability
    pub fn with_gene_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.gene_probability = probability;
        self
    }

    /// Compute the spread factor β from a uniform random value
    fn spread_factor(&self, u: f64) -> f64 {
        if u <= 0.5 {
            (2.0 * u).powf(1.0 / (self.eta + 1.0))
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (self.eta + 1.0))
        }
    }
}

impl Default for SbxCrossover {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl<G: RealValuedGenome> CrossoverOperator<G> for SbxCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &G,
        parent2: &G,
        bounds: &MultiBounds,
        rng: &mut R,
    ) -> OptimiseResult<(G, G)> {
        check_parents(parent1, parent2, bounds)?;

        let mut child1: Vec<f64> = parent1.genes().to_vec();
        let mut child2: Vec<f64> = parent2.genes().to_vec();

        for (i, bound) in bounds.iter().enumerate() {
            if rng.gen::<f64>() >= self.gene_probability {
                continue;
            }
            let x1 = child1[i];
            let x2 = child2[i];

            // Only apply if parents differ sufficiently
            if (x1 - x2).abs() > 1e-14 {
                // u in [0, 1) keeps the u > 0.5 branch finite
                let beta = self.spread_factor(rng.gen::<f64>());

                child1[i] = bound.clamp(0.5 * ((1.0 + beta) * x1 + (1.0 - beta) * x2));
                child2[i] = bound.clamp(0.5 * ((1.0 - beta) * x1 + (1.0 + beta) * x2));
            }
        }

        Ok((G::from_genes(child1)?, G::from_genes(child2)?))
    }
}

/// Blend Crossover (BLX-α)
///
/// Each child gene is drawn uniformly from the parents' interval extended by
/// `alpha` times its width on both sides.
///
/// Reference: Eshelman, L. J., & Schaffer, J. D. (1993). Real-Coded Genetic
/// Algorithms and Interval-Schemata.
#[derive(Clone, Debug)]
pub struct BlxAlphaCrossover {
    /// Extension factor
    pub alpha: f64,
}

impl BlxAlphaCrossover {
    /// Create a new BLX-α crossover
    pub fn new(alpha: f64) -> Self {
        assert!(alpha >= 0.0, "Alpha must be non-negative");
        Self { alpha }
    }

    /// Sampling interval for a pair of parent genes
    pub fn interval(&self, x1: f64, x2: f64) -> (f64, f64) {
        let min_val = x1.min(x2);
        let max_val = x1.max(x2);
        let spread = (max_val - min_val) * self.alpha;
        (min_val - spread, max_val + spread)
    }
}

impl Default for BlxAlphaCrossover {
    fn default() -> Self {
        Self::new(0.2)
    }
}

impl<G: RealValuedGenome> CrossoverOperator<G> for BlxAlphaCrossover {
    fn crossover<R: Rng>(
        &self,
        parent1: &G,
        parent2: &G,
        bounds: &MultiBounds,
        rng: &mut R,
    ) -> OptimiseResult<(G, G)> {
        check_parents(parent1, parent2, bounds)?;

        let mut child1_genes = Vec::with_capacity(bounds.dimension());
        let mut child2_genes = Vec::with_capacity(bounds.dimension());

        for ((&x1, &x2), bound) in parent1
            .genes()
            .iter()
            .zip(parent2.genes().iter())
            .zip(bounds.iter())
        {
            let (low, high) = self.interval(x1, x2);
            child1_genes.push(bound.clamp(rng.gen_range(low..=high)));
            child2_genes.push(bound.clamp(rng.gen_range(low..=high)));
        }

        Ok((G::from_genes(child1_genes)?, G::from_genes(child2_genes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptimiseError;
    use crate::genome::vehicle_genome::VehicleGenome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vehicle_bounds() -> MultiBounds {
        vec![(50.0, 500.0), (30.0, 150.0)].into_iter().collect()
    }

    #[test]
    fn test_sbx_creates_valid_offspring() {
        let mut rng = StdRng::seed_from_u64(3);
        let parent1 = VehicleGenome::new(100.0, 50.0);
        let parent2 = VehicleGenome::new(120.0, 60.0);

        let (child1, child2) = SbxCrossover::new(20.0)
            .crossover(&parent1, &parent2, &vehicle_bounds(), &mut rng)
            .unwrap();
        assert_eq!(child1.dimension(), 2);
        assert_eq!(child2.dimension(), 2);
    }

    #[test]
    fn test_sbx_preserves_gene_means() {
        // Without clamping, SBX children are symmetric about the parents' midpoint
        let mut rng = StdRng::seed_from_u64(11);
        let parent1 = VehicleGenome::new(200.0, 80.0);
        let parent2 = VehicleGenome::new(220.0, 90.0);
        let (c1, c2) = SbxCrossover::new(20.0)
            .crossover(&parent1, &parent2, &vehicle_bounds(), &mut rng)
            .unwrap();
        assert!((c1.motor_power_kw() + c2.motor_power_kw() - 420.0).abs() < 1e-9);
        assert!((c1.battery_capacity_kwh() + c2.battery_capacity_kwh() - 170.0).abs() < 1e-9);
    }

    #[test]
    fn test_sbx_with_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let parent1 = VehicleGenome::new(55.0, 32.0);
        let parent2 = VehicleGenome::new(495.0, 148.0);
        let bounds = vehicle_bounds();
        // Low eta = more spread
        let sbx = SbxCrossover::new(0.5);

        for _ in 0..200 {
            let (child1, child2) = sbx.crossover(&parent1, &parent2, &bounds, &mut rng).unwrap();
            assert!(child1.is_within(&bounds));
            assert!(child2.is_within(&bounds));
        }
    }

    #[test]
    fn test_sbx_identical_parents_are_copied() {
        let mut rng = StdRng::seed_from_u64(9);
        let parent = VehicleGenome::new(150.0, 75.0);
        let (c1, c2) = SbxCrossover::default()
            .crossover(&parent, &parent, &vehicle_bounds(), &mut rng)
            .unwrap();
        assert_eq!(c1, parent);
        assert_eq!(c2, parent);
    }

    #[test]
    fn test_sbx_zero_gene_probability_copies_parents() {
        let mut rng = StdRng::seed_from_u64(9);
        let parent1 = VehicleGenome::new(100.0, 50.0);
        let parent2 = VehicleGenome::new(300.0, 120.0);
        let (c1, c2) = SbxCrossover::new(20.0)
            .with_gene_probability(0.0)
            .crossover(&parent1, &parent2, &vehicle_bounds(), &mut rng)
            .unwrap();
        assert_eq!(c1, parent1);
        assert_eq!(c2, parent2);
    }

    #[test]
    fn test_sbx_dimension_mismatch() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds: MultiBounds = vec![(0.0, 1.0)].into_iter().collect();
        let err = SbxCrossover::default()
            .crossover(
                &VehicleGenome::new(0.5, 0.5),
                &VehicleGenome::new(0.5, 0.5),
                &bounds,
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, OptimiseError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_sbx_is_reproducible() {
        let parent1 = VehicleGenome::new(100.0, 50.0);
        let parent2 = VehicleGenome::new(300.0, 120.0);
        let sbx = SbxCrossover::default();
        let a = sbx
            .crossover(&parent1, &parent2, &vehicle_bounds(), &mut StdRng::seed_from_u64(77))
            .unwrap();
        let b = sbx
            .crossover(&parent1, &parent2, &vehicle_bounds(), &mut StdRng::seed_from_u64(77))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blx_interval() {
        let blx = BlxAlphaCrossover::new(0.0);
        assert_eq!(blx.interval(5.0, 10.0), (5.0, 10.0));
        let blx = BlxAlphaCrossover::new(0.2);
        assert_eq!(blx.interval(10.0, 10.0), (10.0, 10.0));
        assert_eq!(blx.interval(3.0, 7.0), blx.interval(7.0, 3.0));
    }

    #[test]
    fn test_blx_offspring_within_extended_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        let parent1 = VehicleGenome::new(100.0, 50.0);
        let parent2 = VehicleGenome::new(120.0, 60.0);
        let blx = BlxAlphaCrossover::new(0.2);
        let (low_m, high_m) = blx.interval(100.0, 120.0);
        let (low_b, high_b) = blx.interval(50.0, 60.0);

        for _ in 0..100 {
            let (c1, c2) = blx.crossover(&parent1, &parent2, &vehicle_bounds(), &mut rng).unwrap();
            for c in [c1, c2] {
                assert!(c.motor_power_kw() >= low_m && c.motor_power_kw() <= high_m);
                assert!(c.battery_capacity_kwh() >= low_b && c.battery_capacity_kwh() <= high_b);
            }
        }
    }

    #[test]
    fn test_blx_clamps_to_bounds() {
        let mut rng = StdRng::seed_from_u64(8);
        let bounds = vehicle_bounds();
        let blx = BlxAlphaCrossover::new(1.0);
        for _ in 0..100 {
            let (c1, c2) = blx
                .crossover(
                    &VehicleGenome::new(50.0, 30.0),
                    &VehicleGenome::new(500.0, 150.0),
                    &bounds,
                    &mut rng,
                )
                .unwrap();
            assert!(c1.is_within(&bounds));
            assert!(c2.is_within(&bounds));
        }
    }
}
