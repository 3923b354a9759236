//! Property-based tests for ev-optimise
//!
//! Uses proptest to verify invariants and properties of the library.

use ev_optimise::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAX2: [Direction; 2] = [Direction::Maximize, Direction::Maximize];

fn individuals(objectives: &[(f64, f64)]) -> Vec<Individual<VehicleGenome>> {
    objectives
        .iter()
        .map(|&(a, b)| Individual::new(VehicleGenome::new(100.0, 50.0), vec![a, b]))
        .collect()
}

fn objective_set() -> impl Strategy<Value = Vec<(f64, f64)>> {
    // Coarse grid values so that ties and duplicates actually occur
    prop::collection::vec(((0i32..20).prop_map(f64::from), (0i32..20).prop_map(f64::from)), 1..40)
}

fn vehicle_bounds() -> MultiBounds {
    VehicleConfig::default().bounds()
}

fn genome_strategy() -> impl Strategy<Value = VehicleGenome> {
    (50.0f64..=500.0, 30.0f64..=150.0).prop_map(|(m, b)| VehicleGenome::new(m, b))
}

proptest! {
    // ==================== Sorting Properties ====================

    #[test]
    fn fronts_partition_population(objectives in objective_set()) {
        let mut pop = individuals(&objectives);
        let fronts = fast_non_dominated_sort(&mut pop, &MAX2);

        let mut seen: Vec<usize> = fronts.iter().flatten().copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..objectives.len()).collect::<Vec<_>>());
        for (rank, front) in fronts.iter().enumerate() {
            prop_assert!(!front.is_empty());
            for &i in front {
                prop_assert_eq!(pop[i].rank, rank);
            }
        }
    }

    #[test]
    fn no_domination_within_front(objectives in objective_set()) {
        let mut pop = individuals(&objectives);
        let fronts = fast_non_dominated_sort(&mut pop, &MAX2);

        for front in &fronts {
            for &a in front {
                for &b in front {
                    prop_assert!(!pop[a].dominates(&pop[b], &MAX2));
                }
            }
        }
    }

    #[test]
    fn front_zero_is_undominated(objectives in objective_set()) {
        let mut pop = individuals(&objectives);
        let fronts = fast_non_dominated_sort(&mut pop, &MAX2);

        for &inside in &fronts[0] {
            for other in &pop {
                prop_assert!(!other.dominates(&pop[inside], &MAX2));
            }
        }
    }

    #[test]
    fn every_later_member_is_dominated_by_previous_front(objectives in objective_set()) {
        let mut pop = individuals(&objectives);
        let fronts = fast_non_dominated_sort(&mut pop, &MAX2);

        for pair in fronts.windows(2) {
            for &j in &pair[1] {
                prop_assert!(pair[0].iter().any(|&i| pop[i].dominates(&pop[j], &MAX2)));
            }
        }
    }

    // ==================== Crowding Properties ====================

    #[test]
    fn crowding_extremes_are_infinite(objectives in objective_set()) {
        let mut pop = individuals(&objectives);
        let fronts = rank_population(&mut pop, &MAX2);

        for front in fronts.iter().filter(|f| f.len() >= 2) {
            for k in 0..2 {
                let min = front.iter().map(|&i| pop[i].objectives[k]).fold(f64::INFINITY, f64::min);
                let max = front.iter().map(|&i| pop[i].objectives[k]).fold(f64::NEG_INFINITY, f64::max);
                // At least one holder of each extreme value is a boundary member
                prop_assert!(front.iter().any(|&i| pop[i].objectives[k] == min && pop[i].crowding_distance.is_infinite()));
                prop_assert!(front.iter().any(|&i| pop[i].objectives[k] == max && pop[i].crowding_distance.is_infinite()));
            }
        }
    }

    #[test]
    fn crowding_is_non_negative(objectives in objective_set()) {
        let mut pop = individuals(&objectives);
        rank_population(&mut pop, &MAX2);
        for ind in &pop {
            prop_assert!(ind.crowding_distance >= 0.0);
        }
    }

    // ==================== Operator Properties ====================

    #[test]
    fn sbx_respects_bounds(
        p1 in genome_strategy(),
        p2 in genome_strategy(),
        eta in 0.0f64..50.0,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = vehicle_bounds();
        let (c1, c2) = SbxCrossover::new(eta).crossover(&p1, &p2, &bounds, &mut rng).unwrap();
        prop_assert!(c1.is_within(&bounds));
        prop_assert!(c2.is_within(&bounds));
    }

    #[test]
    fn blx_respects_bounds(
        p1 in genome_strategy(),
        p2 in genome_strategy(),
        alpha in 0.0f64..2.0,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = vehicle_bounds();
        let (c1, c2) = BlxAlphaCrossover::new(alpha).crossover(&p1, &p2, &bounds, &mut rng).unwrap();
        prop_assert!(c1.is_within(&bounds));
        prop_assert!(c2.is_within(&bounds));
    }

    #[test]
    fn mutations_respect_bounds(
        genome in genome_strategy(),
        eta in 0.0f64..100.0,
        seed in any::<u64>()
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = vehicle_bounds();
        let poly = PolynomialMutation::new(eta).with_probability(1.0);
        let proportional = ProportionalMutation::new(0.5).with_probability(1.0);
        prop_assert!(poly.mutate(&genome, &bounds, &mut rng).unwrap().is_within(&bounds));
        prop_assert!(proportional.mutate(&genome, &bounds, &mut rng).unwrap().is_within(&bounds));
    }

    // ==================== Vehicle Model Properties ====================

    #[test]
    fn vehicle_model_is_deterministic(genome in genome_strategy()) {
        let model = VehicleModel::new(VehicleConfig::default());
        let a = model.evaluate(&genome).unwrap();
        let b = model.evaluate(&genome).unwrap();
        prop_assert_eq!(a.len(), 2);
        prop_assert!(a.iter().all(|v| v.is_finite() && *v > 0.0));
        prop_assert_eq!(a, b);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // ==================== Engine Properties ====================

    #[test]
    fn run_invariants_hold(
        n_population in 2usize..24,
        n_generations in 1usize..6,
        seed in any::<u64>()
    ) {
        let config = VehicleConfig::default();
        let bounds = config.bounds();
        let history = optimise(&config, n_generations, n_population, Some(seed)).unwrap();

        prop_assert_eq!(history.len(), n_generations + 1);
        for (&generation, snapshot) in &history {
            prop_assert_eq!(snapshot.generation(), generation);
            prop_assert_eq!(snapshot.len(), n_population);
            for ind in snapshot.individuals() {
                prop_assert!(ind.genome.is_within(&bounds));
                prop_assert!(ind.is_ranked());
            }
        }
    }

    #[test]
    fn runs_are_reproducible(n_population in 2usize..16, seed in any::<u64>()) {
        let config = VehicleConfig::default();
        let a = optimise(&config, 3, n_population, Some(seed)).unwrap();
        let b = optimise(&config, 3, n_population, Some(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn front_zero_never_regresses(n_population in 4usize..20, seed in any::<u64>()) {
        let history = optimise(&VehicleConfig::default(), 5, n_population, Some(seed)).unwrap();

        for g in 1..history.len() {
            let previous = history.get(g - 1).unwrap().pareto_front();
            let current = history.get(g).unwrap().pareto_front();
            for c in &current {
                for p in &previous {
                    prop_assert!(!p.dominates(c, &MAX2));
                }
            }
        }
    }
}
