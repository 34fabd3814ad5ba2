//! Error types for the branch-and-bound solver.

use thiserror::Error;

/// Errors that abort a solve before or during the search.
///
/// Infeasibility and unboundedness are *outcomes*, not errors; they are
/// reported through [`crate::Status`]. Only configuration problems and a
/// root relaxation that cannot be solved surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// Problem validation failed (dimension mismatch, non-finite data).
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Settings validation failed (negative tolerances and the like).
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// The root relaxation could not be solved, even after a retry with
    /// relaxed numerical tolerances.
    #[error("Root relaxation failed: {0}")]
    RootSolveFailed(String),
}

/// Result type for solver operations.
pub type Result<T> = std::result::Result<T, Error>;
