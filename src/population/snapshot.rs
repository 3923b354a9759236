//! Generation snapshots and run history
//!
//! A [`GenerationSnapshot`] is the frozen, ranked population of one generation.
//! The engine records one per generation into a [`History`], which is the
//! run's only output. Neither type exposes mutation.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::genome::traits::RealValuedGenome;
use crate::genome::vehicle_genome::VehicleGenome;
use crate::population::individual::Individual;
use crate::vehicle::config::VehicleConfig;
use crate::vehicle::model::{ACCELERATION, RANGE};

/// Immutable record of one generation
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationSnapshot<G: RealValuedGenome> {
    generation: usize,
    individuals: Vec<Individual<G>>,
    fronts: Vec<Vec<usize>>,
}

impl<G: RealValuedGenome> GenerationSnapshot<G> {
    pub(crate) fn new(
        generation: usize,
        individuals: Vec<Individual<G>>,
        fronts: Vec<Vec<usize>>,
    ) -> Self {
        Self {
            generation,
            individuals,
            fronts,
        }
    }

    /// Generation index (0 = initial population)
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Ranked individuals, each carrying its genome, objectives, rank and crowding distance
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the snapshot holds no individuals
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Indices into [`individuals`](Self::individuals) per front, ordered by rank
    pub fn fronts(&self) -> &[Vec<usize>] {
        &self.fronts
    }

    /// Number of fronts
    pub fn num_fronts(&self) -> usize {
        self.fronts.len()
    }

    /// Members of the front with the given rank
    pub fn front(&self, rank: usize) -> Vec<&Individual<G>> {
        self.fronts
            .get(rank)
            .map(|front| front.iter().map(|&i| &self.individuals[i]).collect())
            .unwrap_or_default()
    }

    /// Members of front 0
    pub fn pareto_front(&self) -> Vec<&Individual<G>> {
        self.front(0)
    }

    /// Objective vectors in population order
    pub fn objectives(&self) -> Vec<&[f64]> {
        self.individuals
            .iter()
            .map(|ind| ind.objectives.as_slice())
            .collect()
    }
}

/// Generation-indexed results of a run
#[derive(Clone, Debug, PartialEq)]
pub struct History<G: RealValuedGenome> {
    snapshots: BTreeMap<usize, GenerationSnapshot<G>>,
}

impl<G: RealValuedGenome> History<G> {
    pub(crate) fn new() -> Self {
        Self {
            snapshots: BTreeMap::new(),
        }
    }

    /// Record a completed generation; a generation is written once
    pub(crate) fn record(&mut self, snapshot: GenerationSnapshot<G>) {
        debug_assert!(!self.snapshots.contains_key(&snapshot.generation));
        self.snapshots.entry(snapshot.generation).or_insert(snapshot);
    }

    /// Snapshot of a generation
    pub fn get(&self, generation: usize) -> Option<&GenerationSnapshot<G>> {
        self.snapshots.get(&generation)
    }

    /// Number of recorded generations (including generation 0)
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Recorded generation indices, ascending
    pub fn generations(&self) -> impl Iterator<Item = usize> + '_ {
        self.snapshots.keys().copied()
    }

    /// Snapshots in generation order
    pub fn iter(&self) -> btree_map::Iter<'_, usize, GenerationSnapshot<G>> {
        self.snapshots.iter()
    }

    /// The initial population's snapshot
    pub fn first(&self) -> Option<&GenerationSnapshot<G>> {
        self.snapshots.values().next()
    }

    /// The final generation's snapshot
    pub fn last(&self) -> Option<&GenerationSnapshot<G>> {
        self.snapshots.values().next_back()
    }
}

impl<'a, G: RealValuedGenome> IntoIterator for &'a History<G> {
    type Item = (&'a usize, &'a GenerationSnapshot<G>);
    type IntoIter = btree_map::Iter<'a, usize, GenerationSnapshot<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// One row per individual per generation, flattened for plotting layers
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndividualRecord {
    pub generation: usize,
    pub index: usize,
    pub motor_power_kw: f64,
    pub battery_capacity_kwh: f64,
    pub mass_kg: f64,
    /// `None` when the individual has no range objective
    pub range_km: Option<f64>,
    /// `None` when the individual has no acceleration objective
    pub acceleration_ms2: Option<f64>,
    pub front: usize,
    /// `None` when the distance is infinite (JSON has no infinity)
    pub crowding_distance: Option<f64>,
}

impl History<VehicleGenome> {
    /// Flatten every snapshot into records
    ///
    /// Objectives are read in [`VehicleModel`](crate::vehicle::model::VehicleModel)
    /// order, `[range_km, acceleration_ms2]`. Histories from other fitness
    /// functions yield `None` for any objective they do not carry.
    pub fn records(&self, config: &VehicleConfig) -> Vec<IndividualRecord> {
        self.iter()
            .flat_map(|(&generation, snapshot)| {
                snapshot
                    .individuals()
                    .iter()
                    .enumerate()
                    .map(move |(index, ind)| IndividualRecord {
                        generation,
                        index,
                        motor_power_kw: ind.genome.motor_power_kw(),
                        battery_capacity_kwh: ind.genome.battery_capacity_kwh(),
                        mass_kg: ind.genome.motor_power_kw() * config.motor_weight_ratio()
                            + ind.genome.battery_capacity_kwh() * config.battery_weight_ratio(),
                        range_km: ind.objectives.get(RANGE).copied(),
                        acceleration_ms2: ind.objectives.get(ACCELERATION).copied(),
                        front: ind.rank,
                        crowding_distance: ind
                            .crowding_distance
                            .is_finite()
                            .then_some(ind.crowding_distance),
                    })
            })
            .collect()
    }

    /// Records as a JSON array
    pub fn to_json(&self, config: &VehicleConfig) -> serde_json::Result<String> {
        serde_json::to_string(&self.records(config))
    }
}
