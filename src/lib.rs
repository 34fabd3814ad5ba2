//! Branch-and-bound solver for pure integer linear programs.
//!
//! Solves problems of the form
//!
//! ```text
//! maximize    c * x
//! subject to  A x <= b
//!             x >= 0
//!             x integer
//! ```
//!
//! by LP-relaxation branch-and-bound: the continuous relaxation of each
//! subproblem is solved by a pluggable [`RelaxationOracle`], fractional
//! vertices are split on a branching variable chosen by a pluggable
//! [`VariableSelection`] policy, and the frontier of open subproblems is
//! explored in the order a pluggable [`NodeSelection`] policy dictates.
//! Global lower/upper bounds are maintained throughout, dominated subtrees
//! are pruned, and the per-iteration bound trajectory is reported back for
//! inspection.
//!
//! # Example
//!
//! ```
//! use ilp_bnb::{solve, Problem, Settings, Status};
//!
//! // maximize 3x + 2y  s.t.  x + y <= 4, x, y >= 0 integer
//! let problem = Problem::from_dense(
//!     vec![3.0, 2.0],
//!     vec![vec![1.0, 1.0]],
//!     vec![4.0],
//! )
//! .unwrap();
//!
//! let solution = solve(&problem, &Settings::default()).unwrap();
//! assert_eq!(solution.status, Status::Optimal);
//! assert_eq!(solution.objective, 12.0);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod model;
pub mod oracle;
pub mod search;
pub mod settings;
mod solver;

pub use error::{Error, Result};
pub use model::{FracVar, GapRecord, Problem, Solution, Status};
pub use oracle::{DenseSimplex, LpOutcome, LpSolution, RelaxationOracle};
pub use search::{
    BestFirst, BreadthFirst, DepthFirst, FirstFractional, MostFractional, NodeSelection,
    NodeSummary, VariableSelection,
};
pub use settings::{Settings, TieBreak};
pub use solver::{solve, solve_with_oracle};
