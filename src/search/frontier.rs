//! The frontier of unexplored subproblems.

use super::node::Node;
use super::select::{NodeSelection, NodeSummary};

/// Pending nodes awaiting relaxation, in insertion order.
///
/// Exclusively owned by the search driver. Selection policies only see
/// read-only [`NodeSummary`] views and return an index; all mutation happens
/// here.
#[derive(Debug, Default)]
pub struct Frontier {
    nodes: Vec<Node>,
    added: u64,
    popped: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
        self.added += 1;
    }

    /// Remove and return the node chosen by the selection policy.
    pub fn select(&mut self, policy: &dyn NodeSelection) -> Option<Node> {
        if self.nodes.is_empty() {
            return None;
        }

        let summaries: Vec<NodeSummary> = self
            .nodes
            .iter()
            .map(|n| NodeSummary {
                bound: n.bound,
                depth: n.depth,
            })
            .collect();

        let index = policy.pick(&summaries);
        debug_assert!(index < self.nodes.len(), "selection index out of range");
        let index = index.min(self.nodes.len() - 1);

        self.popped += 1;
        Some(self.nodes.remove(index))
    }

    /// Best relaxation bound across all pending nodes, `-inf` when empty.
    pub fn best_bound(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.bound)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Drop every node dominated by the incumbent objective. Returns the
    /// number of removed nodes.
    pub fn prune_dominated(&mut self, incumbent_obj: f64, prune_ties: bool) -> usize {
        let before = self.nodes.len();
        self.nodes
            .retain(|n| !n.is_dominated(incumbent_obj, prune_ties));
        before - self.nodes.len()
    }

    /// Whether the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of pending nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Total nodes ever added.
    pub fn total_added(&self) -> u64 {
        self.added
    }

    /// Total nodes ever popped.
    pub fn total_popped(&self) -> u64 {
        self.popped
    }
}
