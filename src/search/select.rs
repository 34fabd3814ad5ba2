//! Node selection policies for frontier exploration.

use std::fmt;

/// Read-only view of one pending node, handed to [`NodeSelection`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSummary {
    /// Best known relaxation bound for the node's subtree.
    pub bound: f64,

    /// Depth of the node in the tree.
    pub depth: usize,
}

/// Policy for choosing which pending node to explore next.
///
/// Implementations are pure and only read the frontier summaries; the slice
/// is in insertion order and non-empty. The chosen index is removed by the
/// engine. Selection order affects performance, never correctness, as long
/// as every node is eventually selected.
pub trait NodeSelection: fmt::Debug {
    /// Index of the node to pop next.
    fn pick(&self, frontier: &[NodeSummary]) -> usize;
}

/// Explore the node with the best (largest) relaxation bound first. Ties go
/// to the earliest-inserted node.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFirst;

impl NodeSelection for BestFirst {
    fn pick(&self, frontier: &[NodeSummary]) -> usize {
        let mut best = 0;
        for (i, summary) in frontier.iter().enumerate().skip(1) {
            if summary.bound > frontier[best].bound {
                best = i;
            }
        }
        best
    }
}

/// Explore the deepest node first, preferring the most recently inserted on
/// ties. Dives quickly towards integer-feasible leaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl NodeSelection for DepthFirst {
    fn pick(&self, frontier: &[NodeSummary]) -> usize {
        let mut best = 0;
        for (i, summary) in frontier.iter().enumerate().skip(1) {
            if summary.depth >= frontier[best].depth {
                best = i;
            }
        }
        best
    }
}

/// Explore nodes in insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl NodeSelection for BreadthFirst {
    fn pick(&self, _frontier: &[NodeSummary]) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries() -> Vec<NodeSummary> {
        vec![
            NodeSummary {
                bound: 10.0,
                depth: 0,
            },
            NodeSummary {
                bound: 15.0,
                depth: 2,
            },
            NodeSummary {
                bound: 5.0,
                depth: 2,
            },
        ]
    }

    #[test]
    fn test_best_first() {
        assert_eq!(BestFirst.pick(&summaries()), 1);
    }

    #[test]
    fn test_depth_first_prefers_latest_deepest() {
        assert_eq!(DepthFirst.pick(&summaries()), 2);
    }

    #[test]
    fn test_breadth_first() {
        assert_eq!(BreadthFirst.pick(&summaries()), 0);
    }
}
