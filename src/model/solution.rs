//! Solve outcome types.

/// Final status of a branch-and-bound run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The search tree was exhausted; the incumbent is provably optimal.
    Optimal,

    /// The optimality gap closed within the configured tolerance.
    OptimalWithinTolerance,

    /// No integer-feasible point exists.
    Infeasible,

    /// A relaxation reported an unbounded objective.
    Unbounded,

    /// The iteration budget was exhausted; best solution so far returned.
    IterationLimit,

    /// The wall-clock budget was exhausted; best solution so far returned.
    TimeLimit,
}

impl Status {
    /// Returns true if an incumbent may accompany this status.
    pub fn has_solution(&self) -> bool {
        matches!(
            self,
            Status::Optimal
                | Status::OptimalWithinTolerance
                | Status::IterationLimit
                | Status::TimeLimit
        )
    }

    /// Returns true if optimality was proven (exactly or within tolerance).
    pub fn is_optimal(&self) -> bool {
        matches!(self, Status::Optimal | Status::OptimalWithinTolerance)
    }
}

/// One entry of the bound trajectory, recorded after each iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapRecord {
    /// Iteration number (0 for the root relaxation).
    pub iteration: u64,

    /// Best integer-feasible objective so far (-inf if none).
    pub lower: f64,

    /// Best relaxation bound across the live frontier.
    pub upper: f64,

    /// `upper - lower`.
    pub gap_abs: f64,

    /// `(upper - lower) / max(1, |lower|)`.
    pub gap_rel: f64,
}

/// Complete result of a solve, with search statistics and the bound
/// trajectory for external reporting.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Final status.
    pub status: Status,

    /// Incumbent assignment, if any integer-feasible point was found.
    pub x: Option<Vec<f64>>,

    /// Objective value of the incumbent (-inf if none).
    pub objective: f64,

    /// Final lower bound.
    pub lower_bound: f64,

    /// Final upper bound.
    pub upper_bound: f64,

    /// Final absolute gap.
    pub gap_abs: f64,

    /// Final relative gap.
    pub gap_rel: f64,

    /// Nodes popped from the frontier and relaxed.
    pub nodes_explored: u64,

    /// Nodes discarded by infeasibility, dominance, or failure.
    pub nodes_pruned: u64,

    /// Number of incumbent improvements.
    pub incumbent_updates: u64,

    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: u64,

    /// Per-iteration bound records, oldest first. Read-only reporting data;
    /// suitable for plotting bound trajectories.
    pub trace: Vec<GapRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_methods() {
        assert!(Status::Optimal.has_solution());
        assert!(Status::OptimalWithinTolerance.has_solution());
        assert!(Status::IterationLimit.has_solution());
        assert!(!Status::Infeasible.has_solution());
        assert!(!Status::Unbounded.has_solution());

        assert!(Status::Optimal.is_optimal());
        assert!(Status::OptimalWithinTolerance.is_optimal());
        assert!(!Status::TimeLimit.is_optimal());
    }
}
