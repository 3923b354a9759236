//! Fitness traits
//!
//! This module defines objective directions and the multi-objective evaluation trait.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Optimisation sense of a single objective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger values are better
    Maximize,
    /// Smaller values are better
    Minimize,
}

impl Direction {
    /// True if `a` is strictly better than `b` under this direction
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Maximize => a > b,
            Direction::Minimize => a < b,
        }
    }

    /// True if `a` is at least as good as `b` under this direction
    pub fn is_at_least_as_good(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Maximize => a >= b,
            Direction::Minimize => a <= b,
        }
    }

    /// The worse of two values under this direction
    pub fn worse(self, a: f64, b: f64) -> f64 {
        if self.is_better(a, b) {
            b
        } else {
            a
        }
    }

    /// The better of two values under this direction
    pub fn better(self, a: f64, b: f64) -> f64 {
        if self.is_better(b, a) {
            b
        } else {
            a
        }
    }
}

/// Multi-objective fitness function trait
///
/// Evaluation must be pure: the same genome always yields the same objective vector.
#[cfg(feature = "parallel")]
pub trait MultiObjectiveFitness<G>: Send + Sync {
    /// Direction of each objective, in objective-vector order
    fn directions(&self) -> &[Direction];

    /// Number of objectives
    fn num_objectives(&self) -> usize {
        self.directions().len()
    }

    /// Evaluate all objectives
    fn evaluate(&self, genome: &G) -> Result<Vec<f64>, SimulationError>;
}

/// Multi-objective fitness function trait
///
/// Evaluation must be pure: the same genome always yields the same objective vector.
#[cfg(not(feature = "parallel"))]
pub trait MultiObjectiveFitness<G> {
    /// Direction of each objective, in objective-vector order
    fn directions(&self) -> &[Direction];

    /// Number of objectives
    fn num_objectives(&self) -> usize {
        self.directions().len()
    }

    /// Evaluate all objectives
    fn evaluate(&self, genome: &G) -> Result<Vec<f64>, SimulationError>;
}

/// Fitness function built from a closure and explicit objective directions
pub struct ObjectiveFn<F> {
    directions: Vec<Direction>,
    f: F,
}

impl<F> ObjectiveFn<F> {
    /// Wrap `f`, whose output has one value per entry in `directions`
    pub fn new(directions: Vec<Direction>, f: F) -> Self {
        Self { directions, f }
    }
}

#[cfg(feature = "parallel")]
impl<G, F> MultiObjectiveFitness<G> for ObjectiveFn<F>
where
    F: Fn(&G) -> Result<Vec<f64>, SimulationError> + Send + Sync,
{
    fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn evaluate(&self, genome: &G) -> Result<Vec<f64>, SimulationError> {
        (self.f)(genome)
    }
}

#[cfg(not(feature = "parallel"))]
impl<G, F> MultiObjectiveFitness<G> for ObjectiveFn<F>
where
    F: Fn(&G) -> Result<Vec<f64>, SimulationError>,
{
    fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn evaluate(&self, genome: &G) -> Result<Vec<f64>, SimulationError> {
        (self.f)(genome)
    }
}
