//! Core genome traits
//!
//! This module defines the `RealValuedGenome` trait shared by every genome the
//! search engine and the variation operators work with.

use std::fmt::Debug;

use rand::Rng;

use crate::error::{OptimiseError, OptimiseResult};
use crate::genome::bounds::MultiBounds;

/// Fixed-length vector of real-valued design parameters.
///
/// Genomes are values: operators never modify one in place, they build a new
/// genome through [`RealValuedGenome::from_genes`].
pub trait RealValuedGenome: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Get the genes as a slice of f64 values
    fn genes(&self) -> &[f64];

    /// Build a genome from raw gene values
    ///
    /// Fails when the number of genes does not match the genome's fixed length.
    fn from_genes(genes: Vec<f64>) -> OptimiseResult<Self>;

    /// Number of genes
    fn dimension(&self) -> usize {
        self.genes().len()
    }

    /// Generate a random genome with every gene drawn uniformly within its bounds
    fn generate<R: Rng>(rng: &mut R, bounds: &MultiBounds) -> OptimiseResult<Self> {
        Self::from_genes(bounds.sample(rng))
    }

    /// Check that the genome has one gene per bound and every gene is inside its bound
    fn is_within(&self, bounds: &MultiBounds) -> bool {
        bounds.contains_vec(self.genes())
    }
}

/// Check a gene count against the expected genome length
pub(crate) fn check_dimension(expected: usize, actual: usize) -> OptimiseResult<()> {
    if expected != actual {
        return Err(OptimiseError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
