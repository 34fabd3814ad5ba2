//! Branch-and-bound tree controller.

use std::time::Instant;

use super::bounds::BoundTracker;
use super::frontier::Frontier;
use super::node::{BranchDecision, Node};
use crate::model::{Solution, Status};
use crate::settings::Settings;

/// Owns the frontier, the global bounds, and the search statistics of one
/// branch-and-bound run. The main loop in [`crate::solve_with_oracle`] drives
/// it; heuristics only ever see read-only views.
#[derive(Debug)]
pub struct SearchTree {
    /// Pending subproblems.
    frontier: Frontier,

    /// Global bounds, incumbent, and gap trajectory.
    pub bounds: BoundTracker,

    /// Next node ID to assign (0 is reserved for the root).
    next_node_id: u64,

    /// Nodes popped and relaxed.
    nodes_explored: u64,

    /// Nodes discarded by infeasibility, dominance, or solver failure.
    nodes_pruned: u64,

    /// Start time of the run.
    start: Instant,

    /// Settings.
    settings: Settings,
}

impl SearchTree {
    /// Create a controller; the clock starts here.
    pub fn new(settings: Settings) -> Self {
        Self {
            frontier: Frontier::new(),
            bounds: BoundTracker::new(),
            next_node_id: 1,
            nodes_explored: 0,
            nodes_pruned: 0,
            start: Instant::now(),
            settings,
        }
    }

    /// Seed the frontier with the solved root node.
    pub fn initialize(&mut self, root: Node) {
        self.bounds.tighten_upper(root.bound);
        self.frontier.push(root);
    }

    /// Pop the next node according to the configured selection policy.
    pub fn next_node(&mut self) -> Option<Node> {
        self.frontier.select(self.settings.node_selection.as_ref())
    }

    /// Mark a node as explored.
    pub fn node_explored(&mut self) {
        self.nodes_explored += 1;
    }

    /// Record that a node was pruned.
    pub fn node_pruned(&mut self) {
        self.nodes_pruned += 1;
    }

    /// Create the two children of a branching decision, in (down, up) order.
    pub fn branch(&mut self, parent: &Node, decision: &BranchDecision) -> (Node, Node) {
        let down_id = self.next_node_id;
        let up_id = self.next_node_id + 1;
        self.next_node_id += 2;

        (
            parent.child(down_id, decision.down),
            parent.child(up_id, decision.up),
        )
    }

    /// Push a node onto the frontier.
    pub fn enqueue(&mut self, node: Node) {
        self.frontier.push(node);
    }

    /// Number of pending nodes.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Offer an integer-feasible point; on improvement, the frontier is
    /// re-pruned against the new lower bound.
    ///
    /// Returns true if the incumbent improved.
    pub fn update_incumbent(&mut self, x: &[f64], obj: f64) -> bool {
        let improved = self.bounds.update_on_integral(x, obj);

        if improved {
            let pruned = self
                .frontier
                .prune_dominated(obj, self.settings.tie_break.prunes_ties());
            self.nodes_pruned += pruned as u64;

            if self.settings.verbose {
                log::info!("New incumbent: obj={:.6e}, pruned {} nodes", obj, pruned);
            }
        }

        improved
    }

    /// Tighten the upper bound to the best relaxation value still live: the
    /// max over the frontier, or the incumbent objective once the frontier
    /// drains. Children inherit their parent's bound, so this only ever
    /// moves the upper bound downward.
    pub fn sync_upper(&mut self) {
        let candidate = self.frontier.best_bound().max(self.bounds.lower());
        if candidate > f64::NEG_INFINITY {
            self.bounds.tighten_upper(candidate);
        }
    }

    /// Append the current bounds to the trajectory.
    pub fn record(&mut self) {
        self.bounds.record(self.nodes_explored);
    }

    /// Elapsed wall-clock time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Check termination conditions, in order of precedence: frontier
    /// exhaustion, gap closure, iteration budget, time budget.
    ///
    /// Returns `Some(status)` if the search should stop.
    pub fn check_termination(&self) -> Option<Status> {
        if self.frontier.is_empty() {
            return Some(if self.bounds.has_incumbent() {
                Status::Optimal
            } else {
                Status::Infeasible
            });
        }

        if self.bounds.has_incumbent()
            && self
                .bounds
                .gap_closed(self.settings.gap_abs_tol, self.settings.gap_rel_tol)
        {
            return Some(Status::OptimalWithinTolerance);
        }

        if let Some(limit) = self.settings.max_iterations {
            if self.nodes_explored >= limit {
                return Some(Status::IterationLimit);
            }
        }

        if let Some(limit) = self.settings.time_limit_ms {
            if self.elapsed_ms() >= limit {
                return Some(Status::TimeLimit);
            }
        }

        None
    }

    /// Build the final solution record.
    ///
    /// On exhaustion with an incumbent the upper bound collapses onto the
    /// lower bound: no live node can beat it.
    pub fn finalize(&mut self, status: Status) -> Solution {
        if status == Status::Optimal && self.bounds.has_incumbent() {
            self.bounds.tighten_upper(self.bounds.lower());
        }

        let (gap_abs, gap_rel) = self.bounds.gap();
        Solution {
            status,
            x: self.bounds.incumbent().map(|x| x.to_vec()),
            objective: self.bounds.lower(),
            lower_bound: self.bounds.lower(),
            upper_bound: self.bounds.upper(),
            gap_abs,
            gap_rel,
            nodes_explored: self.nodes_explored,
            nodes_pruned: self.nodes_pruned,
            incumbent_updates: self.bounds.update_count(),
            solve_time_ms: self.elapsed_ms(),
            trace: self.bounds.trace().to_vec(),
        }
    }

    /// Log progress (if verbose).
    pub fn log_progress(&self) {
        if !self.settings.verbose {
            return;
        }

        if self.nodes_explored % self.settings.log_freq != 0 {
            return;
        }

        log::info!(
            "Nodes: {} ({} open) | Bound: {:.6e} | Incumbent: {:.6e} | Gap: {:.2}% | Time: {:.1}s",
            self.nodes_explored,
            self.frontier.len(),
            self.bounds.upper(),
            self.bounds.lower(),
            self.bounds.gap().1 * 100.0,
            self.elapsed_ms() as f64 / 1000.0,
        );
    }
}
