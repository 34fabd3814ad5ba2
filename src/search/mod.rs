//! Branch-and-bound search: nodes, frontier, bounds, heuristics, and the
//! tree controller.

mod bounds;
mod branching;
mod frontier;
mod node;
mod rounding;
mod select;
mod tree;

pub use bounds::BoundTracker;
pub use branching::{FirstFractional, MostFractional, VariableSelection};
pub use frontier::Frontier;
pub use node::{BoundChange, BranchDecision, Node, Relaxation};
pub use rounding::rounding_heuristic;
pub use select::{BestFirst, BreadthFirst, DepthFirst, NodeSelection, NodeSummary};
pub use tree::SearchTree;
