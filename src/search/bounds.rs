//! Global bound tracking.

use crate::model::GapRecord;

/// Tracks the global lower and upper bounds, the incumbent, and the bound
/// trajectory of one search run.
///
/// Invariants enforced here: the lower bound never decreases, the upper
/// bound never increases, and `lower <= upper` whenever both are finite.
/// All mutation goes through the update methods; external code only gets
/// read access.
#[derive(Debug, Clone)]
pub struct BoundTracker {
    lower: f64,
    upper: f64,
    incumbent: Option<Vec<f64>>,
    update_count: u64,
    trace: Vec<GapRecord>,
}

impl Default for BoundTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundTracker {
    /// Create a tracker with open bounds.
    pub fn new() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            incumbent: None,
            update_count: 0,
            trace: Vec::new(),
        }
    }

    /// Current lower bound (best integer-feasible objective).
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Current upper bound (best relaxation bound).
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// The incumbent assignment, if any.
    pub fn incumbent(&self) -> Option<&[f64]> {
        self.incumbent.as_deref()
    }

    /// Whether an integer-feasible point has been found.
    pub fn has_incumbent(&self) -> bool {
        self.incumbent.is_some()
    }

    /// Number of incumbent improvements.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Offer an integer-feasible point. The incumbent is replaced only on
    /// strict improvement, so the lower bound is monotone non-decreasing.
    ///
    /// Returns true if the incumbent improved.
    pub fn update_on_integral(&mut self, x: &[f64], obj: f64) -> bool {
        if obj > self.lower {
            self.lower = obj;
            self.incumbent = Some(x.to_vec());
            self.update_count += 1;
            true
        } else {
            false
        }
    }

    /// Offer a new upper bound candidate. The bound only ever moves down.
    pub fn tighten_upper(&mut self, candidate: f64) {
        if candidate < self.upper {
            self.upper = candidate;
        }
    }

    /// Current optimality gap as `(absolute, relative)`.
    ///
    /// Absolute gap is `upper - lower`; relative gap divides by
    /// `max(1, |lower|)`. Both are infinite while no incumbent exists.
    pub fn gap(&self) -> (f64, f64) {
        if self.lower == f64::NEG_INFINITY || self.upper == f64::INFINITY {
            return (f64::INFINITY, f64::INFINITY);
        }
        let abs = self.upper - self.lower;
        (abs, abs / self.lower.abs().max(1.0))
    }

    /// Whether either gap metric is within its tolerance.
    pub fn gap_closed(&self, abs_tol: f64, rel_tol: f64) -> bool {
        let (abs, rel) = self.gap();
        abs <= abs_tol || rel <= rel_tol
    }

    /// Append the current bounds to the trajectory.
    pub fn record(&mut self, iteration: u64) {
        let (gap_abs, gap_rel) = self.gap();
        self.trace.push(GapRecord {
            iteration,
            lower: self.lower,
            upper: self.upper,
            gap_abs,
            gap_rel,
        });
    }

    /// Read-only bound trajectory, oldest first.
    pub fn trace(&self) -> &[GapRecord] {
        &self.trace
    }
}
