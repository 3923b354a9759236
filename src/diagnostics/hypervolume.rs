//! Two-objective hypervolume
//!
//! The hypervolume of a point set is the area of objective space it dominates,
//! bounded by a reference point that every counted point must strictly improve on.

use crate::fitness::traits::Direction;

/// Express a value so that smaller is better
fn minimised(value: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Minimize => value,
        Direction::Maximize => -value,
    }
}

/// Area dominated by `points` and bounded by `reference`
///
/// Only the first two objectives of each point are read. Points that do not
/// strictly improve on the reference in both objectives, or that are not finite,
/// contribute nothing. Dominated and duplicate points are harmless.
pub fn hypervolume_2d(points: &[&[f64]], directions: [Direction; 2], reference: [f64; 2]) -> f64 {
    let r0 = minimised(reference[0], directions[0]);
    let r1 = minimised(reference[1], directions[1]);

    let mut front: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.len() >= 2)
        .map(|p| (minimised(p[0], directions[0]), minimised(p[1], directions[1])))
        .filter(|&(a, b)| a.is_finite() && b.is_finite() && a < r0 && b < r1)
        .collect();
    front.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    // Sweep along the first objective, stacking horizontal slabs
    let mut area = 0.0;
    let mut ceiling = r1;
    for (a, b) in front {
        if b < ceiling {
            area += (r0 - a) * (ceiling - b);
            ceiling = b;
        }
    }
    area
}
