//! The LP relaxation oracle interface.
//!
//! The search engine never solves linear programs itself; it hands each
//! node's constraint set (the root instance plus accumulated variable
//! bounds) to a [`RelaxationOracle`] and consumes the outcome. The crate
//! ships one implementation, [`DenseSimplex`], so solves work out of the
//! box; any LP backend can stand in through the same trait.

mod simplex;

pub use simplex::DenseSimplex;

use crate::model::Problem;

/// An optimal relaxation vertex.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Optimal objective value.
    pub objective: f64,

    /// Optimal assignment (length n).
    pub x: Vec<f64>,
}

/// Outcome of one relaxation solve.
#[derive(Debug, Clone)]
pub enum LpOutcome {
    /// The relaxation has an optimal vertex.
    Optimal(LpSolution),

    /// The relaxed feasible region is empty.
    Infeasible,

    /// The relaxed objective is unbounded above.
    Unbounded,

    /// The backend failed (numerical breakdown, iteration limit).
    SolverError(String),
}

/// A continuous LP solver, consulted once per node.
///
/// Implementations must be deterministic for a fixed input and must not
/// retain state across calls; the engine may retry a call with a larger
/// `pivot_tol` after a [`LpOutcome::SolverError`].
pub trait RelaxationOracle {
    /// Solve `maximize c*x  s.t.  A x <= b, lower <= x <= upper`.
    ///
    /// `lower` and `upper` are the node's accumulated variable bounds
    /// (`lower[j] >= 0`, `upper[j]` may be infinite).
    fn solve_relaxation(
        &self,
        problem: &Problem,
        lower: &[f64],
        upper: &[f64],
        pivot_tol: f64,
    ) -> LpOutcome;
}
