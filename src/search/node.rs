//! Search tree node representation.

/// A variable bound tightening produced by branching.
#[derive(Debug, Clone, Copy)]
pub struct BoundChange {
    /// Variable index.
    pub var: usize,

    /// New lower bound for the variable.
    pub lower: f64,

    /// New upper bound for the variable.
    pub upper: f64,
}

impl BoundChange {
    /// "Down" branch: `x_var <= floor(value)`, keeping the current lower bound.
    pub fn down(var: usize, current_lower: f64, value: f64) -> Self {
        Self {
            var,
            lower: current_lower,
            upper: value.floor(),
        }
    }

    /// "Up" branch: `x_var >= ceil(value)`, keeping the current upper bound.
    pub fn up(var: usize, current_upper: f64, value: f64) -> Self {
        Self {
            var,
            lower: value.ceil(),
            upper: current_upper,
        }
    }

    /// True if the tightened domain is empty.
    pub fn is_empty_domain(&self) -> bool {
        self.lower > self.upper + 1e-9
    }
}

/// A branching decision: one fractional variable split into two disjoint
/// children. Their union covers every integer point of the parent, since no
/// integer lies strictly between `floor(value)` and `ceil(value)`.
#[derive(Debug, Clone, Copy)]
pub struct BranchDecision {
    /// Variable branched on.
    pub var: usize,

    /// Fractional relaxation value of the variable.
    pub value: f64,

    /// Bound change for the down child.
    pub down: BoundChange,

    /// Bound change for the up child.
    pub up: BoundChange,
}

impl BranchDecision {
    /// Build the floor/ceiling split of `var` at `value` relative to the
    /// parent's current variable bounds.
    pub fn split(var: usize, value: f64, parent_lower: f64, parent_upper: f64) -> Self {
        Self {
            var,
            value,
            down: BoundChange::down(var, parent_lower, value),
            up: BoundChange::up(var, parent_upper, value),
        }
    }
}

/// Cached result of a node's LP relaxation.
#[derive(Debug, Clone)]
pub struct Relaxation {
    /// Optimal objective value of the relaxation.
    pub objective: f64,

    /// Optimal vertex assignment.
    pub x: Vec<f64>,
}

/// One subproblem in the search tree.
///
/// A node is self-contained: it stores the full accumulated variable bounds
/// from its branching path rather than a link to its parent, so pruning is a
/// plain removal with no lifetime bookkeeping.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique node identifier (0 for the root).
    pub id: u64,

    /// Depth in the tree (0 for the root).
    pub depth: usize,

    /// Accumulated per-variable lower bounds.
    pub lower: Vec<f64>,

    /// Accumulated per-variable upper bounds.
    pub upper: Vec<f64>,

    /// Best known relaxation bound for this subtree. Inherited from the
    /// parent at creation; replaced by the node's own relaxation value once
    /// solved. Relaxations only tighten down a branch, so this never
    /// understates the subtree optimum.
    pub bound: f64,

    /// Cached relaxation, once solved.
    pub relaxation: Option<Relaxation>,
}

impl Node {
    /// Create the root node for a problem with `n` variables: `x >= 0` and
    /// no upper bounds.
    pub fn root(n: usize) -> Self {
        Self {
            id: 0,
            depth: 0,
            lower: vec![0.0; n],
            upper: vec![f64::INFINITY; n],
            bound: f64::INFINITY,
            relaxation: None,
        }
    }

    /// Create a child node by applying one bound change.
    pub fn child(&self, id: u64, change: BoundChange) -> Self {
        let mut lower = self.lower.clone();
        let mut upper = self.upper.clone();
        lower[change.var] = change.lower;
        upper[change.var] = change.upper;

        Self {
            id,
            depth: self.depth + 1,
            lower,
            upper,
            bound: self.bound,
            relaxation: None,
        }
    }

    /// True if the incumbent objective dominates this subtree.
    ///
    /// With [`TieBreak::PruneEqual`](crate::TieBreak) a node whose bound ties
    /// the incumbent is pruned as well.
    pub fn is_dominated(&self, incumbent_obj: f64, prune_ties: bool) -> bool {
        if prune_ties {
            self.bound <= incumbent_obj + 1e-9
        } else {
            self.bound < incumbent_obj - 1e-9
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node() {
        let root = Node::root(3);
        assert_eq!(root.id, 0);
        assert_eq!(root.depth, 0);
        assert_eq!(root.lower, vec![0.0; 3]);
        assert!(root.upper.iter().all(|u| u.is_infinite()));
        assert!(root.relaxation.is_none());
    }

    #[test]
    fn test_child_node() {
        let mut root = Node::root(2);
        root.bound = 7.5;

        let decision = BranchDecision::split(0, 2.7, root.lower[0], root.upper[0]);
        let down = root.child(1, decision.down);
        let up = root.child(2, decision.up);

        assert_eq!(down.depth, 1);
        assert_eq!(down.lower[0], 0.0);
        assert_eq!(down.upper[0], 2.0);
        assert_eq!(up.lower[0], 3.0);
        assert!(up.upper[0].is_infinite());

        // Children inherit the parent's bound until solved.
        assert_eq!(down.bound, 7.5);
        assert_eq!(up.bound, 7.5);
    }

    #[test]
    fn test_empty_domain() {
        // Down branch below the current lower bound crosses over.
        let bad = BoundChange::down(0, 3.0, 2.7);
        assert!(bad.is_empty_domain());

        let ok = BoundChange::down(0, 0.0, 2.7);
        assert!(!ok.is_empty_domain());
    }

    #[test]
    fn test_dominance() {
        let mut node = Node::root(1);
        node.bound = 10.0;

        // Maximization: bound below the incumbent cannot improve it.
        assert!(node.is_dominated(15.0, true));
        assert!(node.is_dominated(10.0, true));
        assert!(!node.is_dominated(10.0, false));
        assert!(!node.is_dominated(8.0, true));
    }
}
