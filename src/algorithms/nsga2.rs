//! NSGA-II (Non-dominated Sorting Genetic Algorithm II)
//!
//! Implements the NSGA-II algorithm for multi-objective optimization.
//!
//! Reference: Deb, K., Pratap, A., Agarwal, S., & Meyarivan, T. (2002).
//! A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II.
//! IEEE Transactions on Evolutionary Computation, 6(2).

use std::marker::PhantomData;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::diagnostics::GenerationStats;
use crate::error::{ConfigError, OptimiseError, OptimiseResult};
use crate::fitness::traits::{Direction, MultiObjectiveFitness};
use crate::genome::bounds::MultiBounds;
use crate::genome::traits::{check_dimension, RealValuedGenome};
use crate::genome::vehicle_genome::VehicleGenome;
use crate::operators::crossover::SbxCrossover;
use crate::operators::mutation::PolynomialMutation;
use crate::operators::selection::BinaryTournament;
use crate::operators::traits::{CrossoverOperator, MutationOperator, SelectionOperator};
use crate::pareto::{assign_crowding_distance, fast_non_dominated_sort, rank_population};
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::population::snapshot::{GenerationSnapshot, History};
use crate::vehicle::config::VehicleConfig;
use crate::vehicle::model::VehicleModel;

/// Configuration for NSGA-II with SBX crossover and polynomial mutation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nsga2Config {
    /// Population size
    pub population_size: usize,
    /// Probability that a mating pair is recombined
    pub crossover_probability: f64,
    /// SBX distribution index
    pub crossover_eta: f64,
    /// Polynomial mutation distribution index
    pub mutation_eta: f64,
    /// Per-gene mutation probability (default: 1/n)
    pub mutation_probability: Option<f64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            crossover_probability: 0.9,
            crossover_eta: 20.0,
            mutation_eta: 20.0,
            mutation_probability: None,
        }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "[0, 1]",
        })
    }
}

fn check_distribution_index(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "[0, inf)",
        })
    }
}

impl Nsga2Config {
    /// Set population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set crossover probability
    pub fn with_crossover_probability(mut self, prob: f64) -> Self {
        self.crossover_probability = prob;
        self
    }

    /// Set a fixed per-gene mutation probability
    pub fn with_mutation_probability(mut self, prob: f64) -> Self {
        self.mutation_probability = Some(prob);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidParameter(
                "population_size must be at least 1".to_string(),
            ));
        }
        check_probability("crossover_probability", self.crossover_probability)?;
        check_distribution_index("crossover_eta", self.crossover_eta)?;
        check_distribution_index("mutation_eta", self.mutation_eta)?;
        if let Some(prob) = self.mutation_probability {
            check_probability("mutation_probability", prob)?;
        }
        Ok(())
    }

    /// SBX crossover configured by this config
    pub fn crossover(&self) -> SbxCrossover {
        SbxCrossover::new(self.crossover_eta)
    }

    /// Polynomial mutation configured by this config
    pub fn mutation(&self) -> PolynomialMutation {
        let mutation = PolynomialMutation::new(self.mutation_eta);
        match self.mutation_probability {
            Some(prob) => mutation.with_probability(prob),
            None => mutation,
        }
    }
}

/// Elitist survivor selection
///
/// Sorts `combined` into fronts and returns the indices of the `size` survivors:
/// whole fronts in rank order while they fit, then the members of the first
/// overflowing front in descending crowding distance. The sort is stable, so
/// equal distances keep front order.
pub fn select_survivors<G: RealValuedGenome>(
    combined: &mut [Individual<G>],
    directions: &[Direction],
    size: usize,
) -> Vec<usize> {
    for ind in combined.iter_mut() {
        ind.clear_annotations();
    }
    let fronts = fast_non_dominated_sort(combined, directions);

    let mut selected = Vec::with_capacity(size);
    for front in fronts {
        if selected.len() + front.len() <= size {
            selected.extend_from_slice(&front);
        } else {
            // Partial front - sort by crowding distance
            assign_crowding_distance(combined, &front);

            let mut sorted_front = front;
            sorted_front.sort_by(|&a, &b| {
                combined[b]
                    .crowding_distance
                    .total_cmp(&combined[a].crowding_distance)
            });

            let remaining = size - selected.len();
            selected.extend(sorted_front.into_iter().take(remaining));
            break;
        }
    }
    selected
}

/// NSGA-II algorithm
///
/// Owns the problem (fitness and bounds) and the variation operators. Every
/// random draw comes from the `rng` handed to [`Nsga2::run`], in a fixed order:
/// initial sampling, then per mating pair two tournaments, the crossover coin,
/// crossover and the two mutations.
pub struct Nsga2<G, F, C, M> {
    fitness: F,
    bounds: MultiBounds,
    crossover: C,
    mutation: M,
    selection: BinaryTournament,
    /// Population size
    pub population_size: usize,
    /// Crossover probability
    pub crossover_probability: f64,
    /// Reference point for the per-generation hypervolume in debug logs
    pub reference_point: Option<[f64; 2]>,
    _genome: PhantomData<fn() -> G>,
}

impl<G, F, C, M> Nsga2<G, F, C, M>
where
    G: RealValuedGenome,
    F: MultiObjectiveFitness<G>,
    C: CrossoverOperator<G>,
    M: MutationOperator<G>,
{
    /// Create a new NSGA-II algorithm
    pub fn new(fitness: F, bounds: MultiBounds, crossover: C, mutation: M) -> Self {
        Self {
            fitness,
            bounds,
            crossover,
            mutation,
            selection: BinaryTournament::new(),
            population_size: 100,
            crossover_probability: 0.9,
            reference_point: None,
            _genome: PhantomData,
        }
    }

    /// Set population size
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set crossover probability
    pub fn with_crossover_probability(mut self, prob: f64) -> Self {
        self.crossover_probability = prob;
        self
    }

    /// Set the hypervolume reference point used in per-generation logs
    pub fn with_reference_point(mut self, reference: [f64; 2]) -> Self {
        self.reference_point = Some(reference);
        self
    }

    /// The fitness function
    pub fn fitness(&self) -> &F {
        &self.fitness
    }

    /// Problem bounds
    pub fn bounds(&self) -> &MultiBounds {
        &self.bounds
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidParameter(
                "population_size must be at least 1".to_string(),
            ));
        }
        check_probability("crossover_probability", self.crossover_probability)
    }

    /// Sample and rank the initial population
    pub fn initialize<R: Rng>(
        &self,
        rng: &mut R,
    ) -> OptimiseResult<(Vec<Individual<G>>, Vec<Vec<usize>>)> {
        self.validate()?;
        let population =
            Population::random(self.population_size, &self.bounds, &self.fitness, rng)?;
        let mut individuals = population.into_individuals();
        let fronts = rank_population(&mut individuals, self.fitness.directions());
        Ok((individuals, fronts))
    }

    /// Evaluate and rank a caller-supplied initial population
    pub fn initialize_from(
        &self,
        genomes: Vec<G>,
    ) -> OptimiseResult<(Vec<Individual<G>>, Vec<Vec<usize>>)> {
        check_probability("crossover_probability", self.crossover_probability)?;
        if genomes.is_empty() {
            return Err(OptimiseError::EmptyPopulation);
        }
        for genome in &genomes {
            check_dimension(self.bounds.dimension(), genome.dimension())?;
        }
        let population = Population::evaluate(genomes, &self.fitness)
            .map_err(|e| OptimiseError::simulation(0, e))?;
        let mut individuals = population.into_individuals();
        let fronts = rank_population(&mut individuals, self.fitness.directions());
        Ok((individuals, fronts))
    }

    /// Create offspring genomes
    ///
    /// Mating pairs are formed until `population.len()` children exist; with an
    /// odd size the second child of the last pair is dropped.
    pub fn create_offspring<R: Rng>(
        &self,
        population: &[Individual<G>],
        rng: &mut R,
    ) -> OptimiseResult<Vec<G>> {
        let size = population.len();
        let mut offspring = Vec::with_capacity(size + 1);

        while offspring.len() < size {
            let parent1 = &population[self.selection.select(population, rng)?].genome;
            let parent2 = &population[self.selection.select(population, rng)?].genome;

            let (child1, child2) = if rng.gen::<f64>() < self.crossover_probability {
                self.crossover.crossover(parent1, parent2, &self.bounds, rng)?
            } else {
                (parent1.clone(), parent2.clone())
            };

            offspring.push(self.mutation.mutate(&child1, &self.bounds, rng)?);
            offspring.push(self.mutation.mutate(&child2, &self.bounds, rng)?);
        }

        offspring.truncate(size);
        Ok(offspring)
    }

    /// Run one generation of NSGA-II
    ///
    /// `population` must carry rank and crowding annotations. Returns the next
    /// population, freshly ranked, and its fronts.
    pub fn step<R: Rng>(
        &self,
        population: &[Individual<G>],
        generation: usize,
        rng: &mut R,
    ) -> OptimiseResult<(Vec<Individual<G>>, Vec<Vec<usize>>)> {
        let size = population.len();
        let offspring = self.create_offspring(population, rng)?;
        let offspring = Population::evaluate(offspring, &self.fitness)
            .map_err(|e| OptimiseError::simulation(generation, e))?;

        // Combine parent and offspring populations
        let mut combined: Vec<Individual<G>> = population.to_vec();
        combined.extend(offspring.into_individuals());

        let selected = select_survivors(&mut combined, self.fitness.directions(), size);

        let mut slots: Vec<Option<Individual<G>>> = combined.into_iter().map(Some).collect();
        let mut next: Vec<Individual<G>> = selected
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();
        let fronts = rank_population(&mut next, self.fitness.directions());

        Ok((next, fronts))
    }

    /// Run NSGA-II for a fixed number of generations
    ///
    /// The history holds generation 0 (the initial population) through
    /// `n_generations`.
    pub fn run<R: Rng>(&self, n_generations: usize, rng: &mut R) -> OptimiseResult<History<G>> {
        let (individuals, fronts) = self.initialize(rng)?;
        self.evolve(individuals, fronts, n_generations, rng)
    }

    /// Run NSGA-II starting from the given genomes
    ///
    /// The population size is the number of genomes supplied.
    pub fn run_from<R: Rng>(
        &self,
        initial: Vec<G>,
        n_generations: usize,
        rng: &mut R,
    ) -> OptimiseResult<History<G>> {
        let (individuals, fronts) = self.initialize_from(initial)?;
        self.evolve(individuals, fronts, n_generations, rng)
    }

    fn evolve<R: Rng>(
        &self,
        individuals: Vec<Individual<G>>,
        fronts: Vec<Vec<usize>>,
        n_generations: usize,
        rng: &mut R,
    ) -> OptimiseResult<History<G>> {
        let mut history = History::new();
        let mut current = GenerationSnapshot::new(0, individuals, fronts);
        self.log_generation(&current);

        for generation in 1..=n_generations {
            let (individuals, fronts) = self
                .step(current.individuals(), generation, rng)
                .map_err(|err| {
                    tracing::warn!(message = "Run aborted", generation, err = %err);
                    err
                })?;
            let next = GenerationSnapshot::new(generation, individuals, fronts);
            self.log_generation(&next);
            history.record(std::mem::replace(&mut current, next));
        }
        history.record(current);

        Ok(history)
    }

    fn log_generation(&self, snapshot: &GenerationSnapshot<G>) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        let stats =
            GenerationStats::from_snapshot(snapshot, self.fitness.directions(), self.reference_point);
        tracing::debug!(
            message = "Generation complete",
            generation = stats.generation,
            num_fronts = stats.num_fronts,
            pareto_front_size = stats.pareto_front_size,
            hypervolume = ?stats.hypervolume,
        );
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Optimise vehicle designs with default NSGA-II settings
///
/// Returns generations `0..=n_generations`, each holding `n_population`
/// individuals. Runs are reproducible for a fixed `seed`; `None` seeds from
/// OS entropy.
pub fn optimise(
    config: &VehicleConfig,
    n_generations: usize,
    n_population: usize,
    seed: Option<u64>,
) -> OptimiseResult<History<VehicleGenome>> {
    let nsga2_config = Nsga2Config::default().with_population_size(n_population);
    optimise_with(config, &nsga2_config, n_generations, seed)
}

/// Optimise vehicle designs with explicit NSGA-II settings
#[instrument(
    level = "info",
    skip_all,
    fields(
        n_generations = n_generations,
        population_size = nsga2_config.population_size,
        seed = ?seed
    )
)]
pub fn optimise_with(
    config: &VehicleConfig,
    nsga2_config: &Nsga2Config,
    n_generations: usize,
    seed: Option<u64>,
) -> OptimiseResult<History<VehicleGenome>> {
    check_generations(n_generations)?;
    nsga2_config.validate()?;

    let engine = vehicle_engine(config, nsga2_config);
    let mut rng = seeded_rng(seed);

    tracing::info!(message = "Starting optimisation");
    let history = engine.run(n_generations, &mut rng)?;
    log_finished(&history);
    Ok(history)
}

/// Optimise vehicle designs starting from a given population
///
/// `nsga2_config.population_size` is ignored; the population size is the
/// number of genomes supplied.
#[instrument(
    level = "info",
    skip_all,
    fields(
        n_generations = n_generations,
        population_size = initial.len(),
        seed = ?seed
    )
)]
pub fn optimise_from_population(
    config: &VehicleConfig,
    nsga2_config: &Nsga2Config,
    initial: Vec<VehicleGenome>,
    n_generations: usize,
    seed: Option<u64>,
) -> OptimiseResult<History<VehicleGenome>> {
    check_generations(n_generations)?;
    if initial.is_empty() {
        return Err(OptimiseError::EmptyPopulation);
    }
    nsga2_config
        .clone()
        .with_population_size(initial.len())
        .validate()?;

    let engine = vehicle_engine(config, nsga2_config);
    let mut rng = seeded_rng(seed);

    tracing::info!(message = "Starting optimisation from supplied population");
    let history = engine.run_from(initial, n_generations, &mut rng)?;
    log_finished(&history);
    Ok(history)
}

fn check_generations(n_generations: usize) -> Result<(), ConfigError> {
    if n_generations == 0 {
        return Err(ConfigError::InvalidParameter(
            "n_generations must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn vehicle_engine(
    config: &VehicleConfig,
    nsga2_config: &Nsga2Config,
) -> Nsga2<VehicleGenome, VehicleModel, SbxCrossover, PolynomialMutation> {
    Nsga2::new(
        VehicleModel::new(config.clone()),
        config.bounds(),
        nsga2_config.crossover(),
        nsga2_config.mutation(),
    )
    .with_population_size(nsga2_config.population_size)
    .with_crossover_probability(nsga2_config.crossover_probability)
    .with_reference_point([0.0, 0.0])
}

fn log_finished(history: &History<VehicleGenome>) {
    if let Some(last) = history.last() {
        tracing::info!(
            message = "Optimisation finished",
            generations = history.len(),
            pareto_front_size = last.fronts().first().map_or(0, Vec::len),
        );
    }
}
