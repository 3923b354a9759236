//! Pareto dominance
//!
//! Objective directions are taken from the caller, so the same comparison serves
//! maximised and minimised objectives.

use crate::fitness::traits::Direction;

/// Relationship between two objective vectors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dominance {
    /// The first vector dominates the second
    Dominates,
    /// The second vector dominates the first
    DominatedBy,
    /// Neither dominates the other
    NonDominated,
}

/// True if `a` is at least as good as `b` in every objective and strictly better in one
pub fn dominates(a: &[f64], b: &[f64], directions: &[Direction]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), directions.len());

    let mut strictly_better = false;
    for ((&x, &y), &dir) in a.iter().zip(b.iter()).zip(directions.iter()) {
        if !dir.is_at_least_as_good(x, y) {
            return false;
        }
        if dir.is_better(x, y) {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Classify the dominance relationship between two objective vectors
pub fn compare(a: &[f64], b: &[f64], directions: &[Direction]) -> Dominance {
    if dominates(a, b, directions) {
        Dominance::Dominates
    } else if dominates(b, a, directions) {
        Dominance::DominatedBy
    } else {
        Dominance::NonDominated
    }
}
