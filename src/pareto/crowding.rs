//! Crowding distance
//!
//! Scores each member of a front by how sparse its neighbourhood is in objective
//! space. Higher is more isolated.

use crate::genome::traits::RealValuedGenome;
use crate::population::individual::Individual;

/// Calculate crowding distance for a front
///
/// Per objective, the front is sorted by value; the two boundary members get an
/// infinite distance and every interior member adds the normalised gap between
/// its neighbours. An objective whose values are all equal adds nothing to the
/// interior members. Sorting is stable, so equal values keep front order.
pub fn assign_crowding_distance<G: RealValuedGenome>(
    population: &mut [Individual<G>],
    front: &[usize],
) {
    let n = front.len();
    if n == 0 {
        return;
    }
    if n <= 2 {
        for &i in front {
            population[i].crowding_distance = f64::INFINITY;
        }
        return;
    }

    for &i in front {
        population[i].crowding_distance = 0.0;
    }

    let num_objectives = population[front[0]].objectives.len();

    for obj in 0..num_objectives {
        let mut sorted_indices: Vec<usize> = front.to_vec();
        sorted_indices.sort_by(|&a, &b| {
            population[a].objectives[obj].total_cmp(&population[b].objectives[obj])
        });

        population[sorted_indices[0]].crowding_distance = f64::INFINITY;
        population[sorted_indices[n - 1]].crowding_distance = f64::INFINITY;

        let obj_min = population[sorted_indices[0]].objectives[obj];
        let obj_max = population[sorted_indices[n - 1]].objectives[obj];
        let obj_range = obj_max - obj_min;

        if obj_range > 0.0 {
            for w in sorted_indices.windows(3) {
                let prev_val = population[w[0]].objectives[obj];
                let next_val = population[w[2]].objectives[obj];
                population[w[1]].crowding_distance += (next_val - prev_val) / obj_range;
            }
        }
    }
}
