//! Dense two-phase primal simplex.
//!
//! The bundled reference oracle. A plain tableau implementation with
//! Bland's rule, sized for the small and medium instances the engine is
//! exercised with; production deployments can swap in any LP backend
//! through [`RelaxationOracle`].

use super::{LpOutcome, LpSolution, RelaxationOracle};
use crate::model::Problem;

const MAX_PIVOTS: usize = 50_000;
const PHASE1_FEAS_TOL: f64 = 1e-7;

/// Two-phase dense tableau simplex oracle.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseSimplex;

impl RelaxationOracle for DenseSimplex {
    fn solve_relaxation(
        &self,
        problem: &Problem,
        lower: &[f64],
        upper: &[f64],
        pivot_tol: f64,
    ) -> LpOutcome {
        let n = problem.num_vars();

        // Crossed variable bounds make the region trivially empty.
        for j in 0..n {
            if lower[j] > upper[j] + 1e-9 {
                return LpOutcome::Infeasible;
            }
        }

        // Assemble everything as `rows * x <= rhs` over x >= 0: the problem
        // rows, one row per finite upper bound, and one negated row per
        // strictly positive lower bound.
        let mut rows: Vec<Vec<f64>> = Vec::new();
        let mut rhs: Vec<f64> = Vec::new();

        for (i, row) in problem.a.outer_iterator().enumerate() {
            let mut dense = vec![0.0; n];
            for (j, &v) in row.iter() {
                dense[j] = v;
            }
            rows.push(dense);
            rhs.push(problem.b[i]);
        }
        for j in 0..n {
            if upper[j].is_finite() {
                let mut r = vec![0.0; n];
                r[j] = 1.0;
                rows.push(r);
                rhs.push(upper[j]);
            }
            if lower[j] > 0.0 {
                let mut r = vec![0.0; n];
                r[j] = -1.0;
                rows.push(r);
                rhs.push(-lower[j]);
            }
        }

        let tol = if pivot_tol > 0.0 { pivot_tol } else { 1e-9 };
        solve_standard(&problem.c, &rows, &rhs, tol)
    }
}

enum PivotResult {
    Optimal,
    Unbounded,
    IterationLimit,
}

/// Solve `maximize c*x  s.t.  rows * x <= rhs, x >= 0`.
fn solve_standard(c: &[f64], rows: &[Vec<f64>], rhs: &[f64], tol: f64) -> LpOutcome {
    let n = c.len();
    let m = rows.len();

    // Columns: n structurals, m slacks, one artificial per negative-rhs row,
    // then the rhs column.
    let num_art = rhs.iter().filter(|&&v| v < 0.0).count();
    let width = n + m + num_art + 1;

    let mut t = vec![vec![0.0; width]; m];
    let mut basis = vec![0usize; m];
    let mut next_art = n + m;
    for i in 0..m {
        let sign = if rhs[i] < 0.0 { -1.0 } else { 1.0 };
        for j in 0..n {
            t[i][j] = sign * rows[i][j];
        }
        t[i][n + i] = sign;
        t[i][width - 1] = sign * rhs[i];
        if sign < 0.0 {
            // Negated row leaves the slack at -1; an artificial restores a
            // feasible starting basis.
            t[i][next_art] = 1.0;
            basis[i] = next_art;
            next_art += 1;
        } else {
            basis[i] = n + i;
        }
    }

    if num_art > 0 {
        // Phase 1: maximize -(sum of artificials). Stored in the negated-cost
        // row convention, so artificial columns carry +1.
        let mut obj = vec![0.0; width];
        for k in 0..num_art {
            obj[n + m + k] = 1.0;
        }
        price_out(&t, &mut obj, &basis);

        match run_simplex(&mut t, &mut obj, &mut basis, n + m, tol) {
            PivotResult::Optimal => {}
            PivotResult::Unbounded => {
                return LpOutcome::SolverError("phase-1 relaxation unbounded".to_string())
            }
            PivotResult::IterationLimit => {
                return LpOutcome::SolverError("simplex iteration limit in phase 1".to_string())
            }
        }

        let infeasibility = -obj[width - 1];
        if infeasibility > PHASE1_FEAS_TOL {
            return LpOutcome::Infeasible;
        }

        // Drive leftover artificials out of the basis. A row with no
        // eligible pivot column is redundant and stays inert.
        for i in 0..m {
            if basis[i] >= n + m {
                if let Some(q) = (0..n + m).find(|&j| t[i][j].abs() > tol) {
                    pivot(&mut t, &mut basis, i, q);
                }
            }
        }
    }

    // Phase 2: maximize the real objective over the feasible basis.
    let mut obj = vec![0.0; width];
    for j in 0..n {
        obj[j] = -c[j];
    }
    price_out(&t, &mut obj, &basis);

    match run_simplex(&mut t, &mut obj, &mut basis, n + m, tol) {
        PivotResult::Optimal => {}
        PivotResult::Unbounded => return LpOutcome::Unbounded,
        PivotResult::IterationLimit => {
            return LpOutcome::SolverError("simplex iteration limit in phase 2".to_string())
        }
    }

    let mut x = vec![0.0; n];
    for i in 0..m {
        if basis[i] < n {
            x[basis[i]] = t[i][width - 1].max(0.0);
        }
    }
    let objective = c.iter().zip(x.iter()).map(|(c, x)| c * x).sum();

    LpOutcome::Optimal(LpSolution { objective, x })
}

/// Zero the reduced costs of basic columns. Basic columns are unit columns,
/// so one row subtraction per basic variable suffices; afterwards the last
/// entry of `obj` holds the current objective value.
fn price_out(t: &[Vec<f64>], obj: &mut [f64], basis: &[usize]) {
    for (i, &b) in basis.iter().enumerate() {
        let f = obj[b];
        if f != 0.0 {
            for j in 0..obj.len() {
                obj[j] -= f * t[i][j];
            }
        }
    }
}

/// Run simplex pivots until optimality, unboundedness, or the pivot cap.
/// Entering columns are restricted to `0..num_cols` (artificials never
/// re-enter). Bland's rule on both the entering and leaving choice prevents
/// cycling.
fn run_simplex(
    t: &mut [Vec<f64>],
    obj: &mut [f64],
    basis: &mut [usize],
    num_cols: usize,
    tol: f64,
) -> PivotResult {
    let width = obj.len();

    for _ in 0..MAX_PIVOTS {
        let entering = (0..num_cols).find(|&j| obj[j] < -tol);
        let Some(q) = entering else {
            return PivotResult::Optimal;
        };

        let mut leave: Option<usize> = None;
        let mut best = f64::INFINITY;
        for i in 0..t.len() {
            if t[i][q] > tol {
                let ratio = t[i][width - 1].max(0.0) / t[i][q];
                let better = ratio < best - 1e-12;
                let tie = (ratio - best).abs() <= 1e-12;
                if better || (tie && leave.map_or(true, |l| basis[i] < basis[l])) {
                    best = ratio;
                    leave = Some(i);
                }
            }
        }

        let Some(r) = leave else {
            return PivotResult::Unbounded;
        };

        pivot(t, basis, r, q);

        let f = obj[q];
        if f != 0.0 {
            for j in 0..width {
                obj[j] -= f * t[r][j];
            }
        }
    }

    PivotResult::IterationLimit
}

/// Pivot on `(r, q)`: normalize the pivot row and eliminate column `q` from
/// every other row.
fn pivot(t: &mut [Vec<f64>], basis: &mut [usize], r: usize, q: usize) {
    let p = t[r][q];
    for v in t[r].iter_mut() {
        *v /= p;
    }

    let prow = t[r].clone();
    for (i, row) in t.iter_mut().enumerate() {
        if i != r {
            let f = row[q];
            if f != 0.0 {
                for (v, pv) in row.iter_mut().zip(prow.iter()) {
                    *v -= f * pv;
                }
            }
        }
    }

    basis[r] = q;
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::model::Problem;

    const INF: f64 = f64::INFINITY;

    fn solve(prob: &Problem, lower: &[f64], upper: &[f64]) -> LpOutcome {
        DenseSimplex.solve_relaxation(prob, lower, upper, 1e-9)
    }

    fn expect_optimal(outcome: LpOutcome) -> LpSolution {
        match outcome {
            LpOutcome::Optimal(s) => s,
            other => panic!("expected optimal, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_lp() {
        // max 3x + 2y s.t. x + y <= 4: optimum 12 at (4, 0).
        let prob =
            Problem::from_dense(vec![3.0, 2.0], vec![vec![1.0, 1.0]], vec![4.0]).unwrap();
        let s = expect_optimal(solve(&prob, &[0.0, 0.0], &[INF, INF]));
        assert_abs_diff_eq!(s.objective, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.x[0], 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.x[1], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_upper_bounds_respected() {
        // max x + y s.t. 2x + y <= 3, x,y <= 1: optimum 2 at (1, 1).
        let prob =
            Problem::from_dense(vec![1.0, 1.0], vec![vec![2.0, 1.0]], vec![3.0]).unwrap();
        let s = expect_optimal(solve(&prob, &[0.0, 0.0], &[1.0, 1.0]));
        assert_abs_diff_eq!(s.objective, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.x[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.x[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lower_bounds_respected() {
        // max x + y s.t. 2x + y <= 3, x >= 1, y <= 1: optimum 2 at (1, 1).
        let prob =
            Problem::from_dense(vec![1.0, 1.0], vec![vec![2.0, 1.0]], vec![3.0]).unwrap();
        let s = expect_optimal(solve(&prob, &[1.0, 0.0], &[INF, 1.0]));
        assert_abs_diff_eq!(s.objective, 2.0, epsilon = 1e-9);
        assert!(s.x[0] >= 1.0 - 1e-9);
    }

    #[test]
    fn test_fractional_vertex() {
        // max x + y s.t. 2x + 2y <= 3, x,y <= 1: optimum 1.5.
        let prob =
            Problem::from_dense(vec![1.0, 1.0], vec![vec![2.0, 2.0]], vec![3.0]).unwrap();
        let s = expect_optimal(solve(&prob, &[0.0, 0.0], &[1.0, 1.0]));
        assert_abs_diff_eq!(s.objective, 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_infeasible() {
        // x <= 2 conflicting with the branching bound x >= 5.
        let prob = Problem::from_dense(vec![1.0], vec![vec![1.0]], vec![2.0]).unwrap();
        assert!(matches!(
            solve(&prob, &[5.0], &[INF]),
            LpOutcome::Infeasible
        ));
    }

    #[test]
    fn test_crossed_bounds_infeasible() {
        let prob = Problem::from_dense(vec![1.0], vec![vec![1.0]], vec![10.0]).unwrap();
        assert!(matches!(
            solve(&prob, &[3.0], &[2.0]),
            LpOutcome::Infeasible
        ));
    }

    #[test]
    fn test_unbounded() {
        // max x + y s.t. x - y <= 1: y grows without limit.
        let prob =
            Problem::from_dense(vec![1.0, 1.0], vec![vec![1.0, -1.0]], vec![1.0]).unwrap();
        assert!(matches!(
            solve(&prob, &[0.0, 0.0], &[INF, INF]),
            LpOutcome::Unbounded
        ));
    }

    #[test]
    fn test_negative_rhs_feasible() {
        // max x s.t. -x <= -2, x <= 5: phase 1 required, optimum 5.
        let prob =
            Problem::from_dense(vec![1.0], vec![vec![-1.0], vec![1.0]], vec![-2.0, 5.0])
                .unwrap();
        let s = expect_optimal(solve(&prob, &[0.0], &[INF]));
        assert_abs_diff_eq!(s.objective, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fractional_box() {
        // 1/4 <= x,y <= 3/4, max x + y: optimum 1.5 at (0.75, 0.75).
        let prob = Problem::from_dense(
            vec![1.0, 1.0],
            vec![
                vec![-1.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, -1.0],
                vec![0.0, 1.0],
            ],
            vec![-0.25, 0.75, -0.25, 0.75],
        )
        .unwrap();
        let s = expect_optimal(solve(&prob, &[0.0, 0.0], &[INF, INF]));
        assert_abs_diff_eq!(s.objective, 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(s.x[0], 0.75, epsilon = 1e-9);
        assert_abs_diff_eq!(s.x[1], 0.75, epsilon = 1e-9);
    }
}
