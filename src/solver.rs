//! The branch-and-bound main loop.

use crate::error::{Error, Result};
use crate::model::{Problem, Solution, Status};
use crate::oracle::{DenseSimplex, LpOutcome, RelaxationOracle};
use crate::search::{rounding_heuristic, BranchDecision, Node, Relaxation, SearchTree};
use crate::settings::Settings;

/// Base pivot tolerance handed to the oracle; a failed solve is retried once
/// at ten times this value before the node is given up on.
const PIVOT_TOL: f64 = 1e-9;

/// Solve an integer linear program with the bundled simplex oracle.
pub fn solve(problem: &Problem, settings: &Settings) -> Result<Solution> {
    solve_with_oracle(problem, settings, &DenseSimplex)
}

/// Solve an integer linear program against a caller-provided relaxation
/// oracle.
///
/// The search is sequential: one node is relaxed at a time and bounds update
/// synchronously before the next selection, so every pruning decision sees
/// the current global bounds.
pub fn solve_with_oracle<O: RelaxationOracle + ?Sized>(
    problem: &Problem,
    settings: &Settings,
    oracle: &O,
) -> Result<Solution> {
    settings.validate()?;

    let mut tree = SearchTree::new(settings.clone());
    let mut root = Node::root(problem.num_vars());

    // Root relaxation. A failure here is fatal; elsewhere it only costs the
    // offending subtree.
    let root_relax = match relax_with_retry(oracle, problem, &root) {
        LpOutcome::Optimal(s) => Relaxation {
            objective: s.objective,
            x: s.x,
        },
        LpOutcome::Infeasible => return Ok(tree.finalize(Status::Infeasible)),
        LpOutcome::Unbounded => return Ok(tree.finalize(Status::Unbounded)),
        LpOutcome::SolverError(msg) => return Err(Error::RootSolveFailed(msg)),
    };

    if problem.is_integral(&root_relax.x, settings.int_feas_tol) {
        // The relaxation already solved the integer program.
        let x = snap_to_integers(&root_relax.x);
        let obj = problem.objective(&x);
        tree.bounds.tighten_upper(obj);
        tree.update_incumbent(&x, obj);
        tree.record();
        return Ok(tree.finalize(Status::Optimal));
    }

    if settings.rounding_heuristic {
        if let Some(x) = rounding_heuristic(problem, &root_relax.x, settings.heuristic_seed) {
            let obj = problem.objective(&x);
            if settings.verbose {
                log::info!("Rounding heuristic found a feasible point: obj={:.6e}", obj);
            }
            tree.update_incumbent(&x, obj);
        }
    }

    root.bound = root_relax.objective;
    root.relaxation = Some(root_relax);
    tree.initialize(root);
    tree.record();

    let status = loop {
        // Budgets and gap are checked between node selections only, so no
        // partially-processed node is left behind.
        if let Some(status) = tree.check_termination() {
            break status;
        }

        let Some(mut node) = tree.next_node() else {
            // Unreachable given the exhaustion check above; treated as such.
            break if tree.bounds.has_incumbent() {
                Status::Optimal
            } else {
                Status::Infeasible
            };
        };
        tree.node_explored();

        // The root arrives with its relaxation cached; children are solved
        // here, on first visit.
        let relax = match node.relaxation.take() {
            Some(r) => r,
            None => match relax_with_retry(oracle, problem, &node) {
                LpOutcome::Optimal(s) => Relaxation {
                    objective: s.objective,
                    x: s.x,
                },
                LpOutcome::Infeasible => {
                    tree.node_pruned();
                    tree.sync_upper();
                    tree.record();
                    continue;
                }
                LpOutcome::Unbounded => {
                    // A bounded parent cannot spawn an unbounded child; if
                    // the oracle says otherwise the whole problem is open.
                    break Status::Unbounded;
                }
                LpOutcome::SolverError(msg) => {
                    log::warn!(
                        "Relaxation of node {} failed after retry, pruning: {}",
                        node.id,
                        msg
                    );
                    tree.node_pruned();
                    tree.sync_upper();
                    tree.record();
                    continue;
                }
            },
        };
        node.bound = relax.objective;

        // Bound dominance: the subtree cannot beat the incumbent.
        if node.is_dominated(tree.bounds.lower(), settings.tie_break.prunes_ties()) {
            tree.node_pruned();
            tree.sync_upper();
            tree.record();
            continue;
        }

        if problem.is_integral(&relax.x, settings.int_feas_tol) {
            let x = snap_to_integers(&relax.x);
            tree.update_incumbent(&x, problem.objective(&x));
        } else {
            let fractional = problem.fractional_vars(&relax.x, settings.int_feas_tol);
            let pick = settings.branching.pick(&relax.x, &fractional);
            let decision = BranchDecision::split(
                pick.var,
                pick.value,
                node.lower[pick.var],
                node.upper[pick.var],
            );

            let (down, up) = tree.branch(&node, &decision);
            for child in [down, up] {
                // A floor below the lower bound (or ceiling above the upper)
                // leaves an empty domain; drop the child on the spot.
                if child.lower[pick.var] > child.upper[pick.var] + 1e-9 {
                    tree.node_pruned();
                } else {
                    tree.enqueue(child);
                }
            }
        }

        tree.sync_upper();
        tree.record();
        tree.log_progress();
    };

    Ok(tree.finalize(status))
}

/// Snap a within-tolerance integral point onto exact integers, so incumbents
/// carry exact values and objectives instead of relaxation noise.
fn snap_to_integers(x: &[f64]) -> Vec<f64> {
    x.iter().map(|v| v.round()).collect()
}

/// Call the oracle with the node's accumulated bounds, retrying once with a
/// relaxed pivot tolerance on solver failure.
fn relax_with_retry<O: RelaxationOracle + ?Sized>(
    oracle: &O,
    problem: &Problem,
    node: &Node,
) -> LpOutcome {
    match oracle.solve_relaxation(problem, &node.lower, &node.upper, PIVOT_TOL) {
        LpOutcome::SolverError(msg) => {
            log::warn!(
                "Relaxation of node {} failed ({}), retrying with relaxed tolerance",
                node.id,
                msg
            );
            oracle.solve_relaxation(problem, &node.lower, &node.upper, PIVOT_TOL * 10.0)
        }
        outcome => outcome,
    }
}
