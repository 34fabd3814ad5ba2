//! Problem and solution types.

mod problem;
mod solution;

pub use problem::{FracVar, Problem};
pub use solution::{GapRecord, Solution, Status};
