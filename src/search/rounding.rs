//! Rounding feasibility heuristic.
//!
//! Tries to turn the root relaxation vertex into an integer-feasible point
//! so the search starts with a finite lower bound and can prune early.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::Problem;

const FEAS_TOL: f64 = 1e-9;

/// Attempt to build an integer-feasible point from a relaxation solution.
///
/// Candidates, in order: component-wise floor, component-wise ceiling, a
/// randomized rounding of each component by its fractional part (seeded, so
/// runs stay reproducible), and the all-zero vector. Returns the first
/// candidate satisfying `A x <= b, x >= 0`, or `None`.
pub fn rounding_heuristic(problem: &Problem, relax_x: &[f64], seed: u64) -> Option<Vec<f64>> {
    let floor: Vec<f64> = relax_x.iter().map(|v| v.floor().max(0.0)).collect();
    if problem.satisfies(&floor, FEAS_TOL) {
        return Some(floor);
    }

    let ceil: Vec<f64> = relax_x.iter().map(|v| v.ceil().max(0.0)).collect();
    if problem.satisfies(&ceil, FEAS_TOL) {
        return Some(ceil);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let random: Vec<f64> = relax_x
        .iter()
        .map(|v| {
            let base = v.floor().max(0.0);
            let frac = (v - v.floor()).clamp(0.0, 1.0);
            if rng.gen::<f64>() < frac {
                base + 1.0
            } else {
                base
            }
        })
        .collect();
    if problem.satisfies(&random, FEAS_TOL) {
        return Some(random);
    }

    let zero = vec![0.0; problem.num_vars()];
    if problem.satisfies(&zero, FEAS_TOL) {
        return Some(zero);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_rounding_succeeds() {
        // max x + y, x + y <= 4: flooring an interior relaxation point works.
        let prob =
            Problem::from_dense(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![4.0]).unwrap();
        let x = rounding_heuristic(&prob, &[2.3, 1.6], 0).unwrap();
        assert_eq!(x, vec![2.0, 1.0]);
        assert!(prob.satisfies(&x, 1e-9));
    }

    #[test]
    fn test_no_integer_point() {
        // 1/4 <= x <= 3/4 contains no integer and zero violates x >= 1/4.
        let prob = Problem::from_dense(
            vec![1.0],
            vec![vec![-1.0], vec![1.0]],
            vec![-0.25, 0.75],
        )
        .unwrap();
        assert!(rounding_heuristic(&prob, &[0.75], 0).is_none());
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let prob =
            Problem::from_dense(vec![1.0, 1.0], vec![vec![2.0, 2.0]], vec![3.0]).unwrap();
        let a = rounding_heuristic(&prob, &[0.6, 0.9], 7);
        let b = rounding_heuristic(&prob, &[0.6, 0.9], 7);
        assert_eq!(a, b);
    }
}
