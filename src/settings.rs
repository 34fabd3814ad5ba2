//! Configuration for the branch-and-bound engine.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::search::{BestFirst, MostFractional, NodeSelection, VariableSelection};

/// How to treat a node whose relaxation value exactly ties the incumbent.
///
/// The subtree of such a node cannot contain a *strictly* better integer
/// point, so pruning ties is sound; exploring them can still surface
/// alternative optima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Prune nodes whose bound ties the incumbent (the default).
    #[default]
    PruneEqual,

    /// Keep exploring tied nodes.
    ExploreEqual,
}

impl TieBreak {
    /// Whether ties are pruned under this rule.
    pub fn prunes_ties(&self) -> bool {
        matches!(self, TieBreak::PruneEqual)
    }
}

/// Solver settings.
#[derive(Debug, Clone)]
pub struct Settings {
    // === Termination criteria ===
    /// Absolute optimality gap tolerance: stop when
    /// `upper_bound - lower_bound <= gap_abs_tol`.
    pub gap_abs_tol: f64,

    /// Relative optimality gap tolerance: stop when
    /// `(upper_bound - lower_bound) / max(1, |lower_bound|) <= gap_rel_tol`.
    pub gap_rel_tol: f64,

    /// Maximum number of nodes to relax (None = unlimited).
    pub max_iterations: Option<u64>,

    /// Wall-clock budget in milliseconds (None = unlimited).
    pub time_limit_ms: Option<u64>,

    // === Numerics ===
    /// Integrality tolerance: a value within this distance of an integer is
    /// treated as integral.
    pub int_feas_tol: f64,

    /// Pruning behavior when a relaxation value ties the incumbent.
    pub tie_break: TieBreak,

    // === Search strategy ===
    /// Branching variable selection policy.
    pub branching: Arc<dyn VariableSelection>,

    /// Node selection policy.
    pub node_selection: Arc<dyn NodeSelection>,

    /// Run the rounding heuristic on the root relaxation to seed the
    /// incumbent.
    pub rounding_heuristic: bool,

    /// Seed for the heuristic's randomized rounding pass.
    pub heuristic_seed: u64,

    // === Output ===
    /// Emit progress through the `log` crate.
    pub verbose: bool,

    /// Log every N explored nodes.
    pub log_freq: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gap_abs_tol: 1e-6,
            gap_rel_tol: 1e-4,
            max_iterations: None,
            time_limit_ms: None,
            int_feas_tol: 1e-6,
            tie_break: TieBreak::default(),
            branching: Arc::new(MostFractional),
            node_selection: Arc::new(BestFirst),
            rounding_heuristic: true,
            heuristic_seed: 0,
            verbose: false,
            log_freq: 100,
        }
    }
}

impl Settings {
    /// Settings with progress logging on every node.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Set the gap tolerances.
    pub fn with_gap_tols(mut self, abs: f64, rel: f64) -> Self {
        self.gap_abs_tol = abs;
        self.gap_rel_tol = rel;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the wall-clock budget in seconds. Non-positive or non-finite
    /// budgets are rejected by [`Settings::validate`].
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit_ms = if seconds.is_finite() && seconds > 0.0 {
            Some(((seconds * 1000.0) as u64).max(1))
        } else {
            Some(0)
        };
        self
    }

    /// Set the branching variable policy.
    pub fn with_branching(mut self, policy: impl VariableSelection + 'static) -> Self {
        self.branching = Arc::new(policy);
        self
    }

    /// Set the node selection policy.
    pub fn with_node_selection(mut self, policy: impl NodeSelection + 'static) -> Self {
        self.node_selection = Arc::new(policy);
        self
    }

    /// Set the tie-break rule for bound-dominance pruning.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Reject invalid configurations before the search starts.
    pub fn validate(&self) -> Result<()> {
        if !self.gap_abs_tol.is_finite() || self.gap_abs_tol < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "gap_abs_tol must be non-negative, got {}",
                self.gap_abs_tol
            )));
        }
        if !self.gap_rel_tol.is_finite() || self.gap_rel_tol < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "gap_rel_tol must be non-negative, got {}",
                self.gap_rel_tol
            )));
        }
        if !(self.int_feas_tol > 0.0 && self.int_feas_tol < 0.5) {
            return Err(Error::InvalidSettings(format!(
                "int_feas_tol must lie in (0, 0.5), got {}",
                self.int_feas_tol
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(Error::InvalidSettings(
                "max_iterations must be positive".to_string(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(Error::InvalidSettings(
                "time limit must be positive and finite".to_string(),
            ));
        }
        if self.log_freq == 0 {
            return Err(Error::InvalidSettings(
                "log_freq must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{DepthFirst, FirstFractional};

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
        assert!(Settings::verbose().validate().is_ok());
    }

    #[test]
    fn test_negative_tolerances_rejected() {
        let s = Settings::default().with_gap_tols(-1.0, 1e-4);
        assert!(s.validate().is_err());

        let s = Settings::default().with_gap_tols(1e-6, -0.1);
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.int_feas_tol = 0.5;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_zero_iteration_budget_rejected() {
        let s = Settings::default().with_max_iterations(0);
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_invalid_time_limit_rejected() {
        assert!(Settings::default().with_time_limit(-1.0).validate().is_err());
        assert!(Settings::default().with_time_limit(0.0).validate().is_err());
        assert!(Settings::default()
            .with_time_limit(f64::NAN)
            .validate()
            .is_err());
        assert!(Settings::default().with_time_limit(1.5).validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let s = Settings::default()
            .with_branching(FirstFractional)
            .with_node_selection(DepthFirst)
            .with_time_limit(1.5)
            .with_tie_break(TieBreak::ExploreEqual);
        assert_eq!(s.time_limit_ms, Some(1500));
        assert_eq!(s.tie_break, TieBreak::ExploreEqual);
    }
}
