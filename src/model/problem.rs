//! Integer linear program representation.

use sprs::{CsMat, TriMat};

use crate::error::{Error, Result};

/// A pure integer linear program in the form
///
/// ```text
/// maximize    c * x
/// subject to  A x <= b
///             x >= 0
///             x integer
/// ```
///
/// The instance is immutable for the lifetime of a solve; the search engine
/// only ever tightens per-variable bounds on top of it.
#[derive(Debug, Clone)]
pub struct Problem {
    /// Objective coefficients (length n).
    pub c: Vec<f64>,

    /// Constraint matrix, m rows by n columns, CSR storage.
    pub a: CsMat<f64>,

    /// Right-hand side (length m).
    pub b: Vec<f64>,
}

/// A variable whose relaxation value is not integral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FracVar {
    /// Variable index.
    pub var: usize,

    /// Relaxation value of the variable.
    pub value: f64,

    /// Distance to the nearest integer, in (0, 0.5].
    pub fractionality: f64,
}

impl Problem {
    /// Create a problem from an already-assembled sparse matrix.
    ///
    /// Validates dimension agreement and that all data is finite.
    pub fn new(c: Vec<f64>, a: CsMat<f64>, b: Vec<f64>) -> Result<Self> {
        if c.is_empty() {
            return Err(Error::InvalidProblem(
                "problem has no variables".to_string(),
            ));
        }
        if a.cols() != c.len() {
            return Err(Error::InvalidProblem(format!(
                "matrix has {} columns but objective has {} entries",
                a.cols(),
                c.len()
            )));
        }
        if a.rows() != b.len() {
            return Err(Error::InvalidProblem(format!(
                "matrix has {} rows but rhs has {} entries",
                a.rows(),
                b.len()
            )));
        }
        if c.iter().any(|v| !v.is_finite())
            || b.iter().any(|v| !v.is_finite())
            || a.data().iter().any(|v| !v.is_finite())
        {
            return Err(Error::InvalidProblem(
                "problem data must be finite".to_string(),
            ));
        }

        let a = if a.is_csr() { a } else { a.to_csr() };
        Ok(Self { c, a, b })
    }

    /// Create a problem from dense row data. Convenient for small instances
    /// and tests; zero coefficients are dropped.
    pub fn from_dense(c: Vec<f64>, rows: Vec<Vec<f64>>, b: Vec<f64>) -> Result<Self> {
        let n = c.len();
        let m = rows.len();
        if rows.iter().any(|r| r.len() != n) {
            return Err(Error::InvalidProblem(
                "all constraint rows must have one coefficient per variable".to_string(),
            ));
        }

        let mut tri = TriMat::new((m, n));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    tri.add_triplet(i, j, v);
                }
            }
        }
        Self::new(c, tri.to_csr(), b)
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// Objective value of a point.
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.c.iter().zip(x.iter()).map(|(c, x)| c * x).sum()
    }

    /// Row activities `A x`.
    pub fn row_activity(&self, x: &[f64]) -> Vec<f64> {
        let mut act = vec![0.0; self.num_constraints()];
        for (i, row) in self.a.outer_iterator().enumerate() {
            act[i] = row.iter().map(|(j, &v)| v * x[j]).sum();
        }
        act
    }

    /// Check `A x <= b` and `x >= 0` within a tolerance.
    pub fn satisfies(&self, x: &[f64], tol: f64) -> bool {
        if x.iter().any(|&xi| xi < -tol) {
            return false;
        }
        self.row_activity(x)
            .iter()
            .zip(self.b.iter())
            .all(|(ax, b)| *ax <= b + tol)
    }

    /// Check whether every variable is within `eps` of an integer.
    pub fn is_integral(&self, x: &[f64], eps: f64) -> bool {
        x.iter().all(|&v| (v - v.round()).abs() <= eps)
    }

    /// Fractional variables of a relaxation solution, in index order.
    pub fn fractional_vars(&self, x: &[f64], eps: f64) -> Vec<FracVar> {
        let mut result = Vec::new();
        for (var, &value) in x.iter().enumerate() {
            let frac = (value - value.round()).abs();
            if frac > eps {
                result.push(FracVar {
                    var,
                    value,
                    fractionality: frac,
                });
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_problem() -> Problem {
        // max 3x + 2y s.t. x + y <= 4
        Problem::from_dense(vec![3.0, 2.0], vec![vec![1.0, 1.0]], vec![4.0]).unwrap()
    }

    #[test]
    fn test_creation() {
        let prob = small_problem();
        assert_eq!(prob.num_vars(), 2);
        assert_eq!(prob.num_constraints(), 1);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let bad = Problem::from_dense(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![1.0, 2.0]);
        assert!(bad.is_err());

        let bad = Problem::from_dense(vec![1.0], vec![vec![1.0, 1.0]], vec![1.0]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let bad = Problem::from_dense(vec![f64::NAN, 1.0], vec![vec![1.0, 1.0]], vec![1.0]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_objective_and_activity() {
        let prob = small_problem();
        assert_eq!(prob.objective(&[4.0, 0.0]), 12.0);
        assert_eq!(prob.row_activity(&[1.0, 2.0]), vec![3.0]);
    }

    #[test]
    fn test_satisfies() {
        let prob = small_problem();
        assert!(prob.satisfies(&[2.0, 2.0], 1e-9));
        assert!(!prob.satisfies(&[3.0, 2.0], 1e-9));
        assert!(!prob.satisfies(&[-1.0, 0.0], 1e-9));
    }

    #[test]
    fn test_integrality() {
        let prob = small_problem();
        assert!(prob.is_integral(&[1.0, 2.0], 1e-6));
        assert!(prob.is_integral(&[0.9999999, 2.0], 1e-6));
        assert!(!prob.is_integral(&[0.5, 2.0], 1e-6));
    }

    #[test]
    fn test_fractional_vars() {
        let prob = small_problem();
        let frac = prob.fractional_vars(&[0.5, 2.3], 1e-6);
        assert_eq!(frac.len(), 2);
        assert_eq!(frac[0].var, 0);
        assert!((frac[0].fractionality - 0.5).abs() < 1e-12);
        assert_eq!(frac[1].var, 1);
        assert!((frac[1].fractionality - 0.3).abs() < 1e-12);

        assert!(prob.fractional_vars(&[1.0, 2.0], 1e-6).is_empty());
    }
}
