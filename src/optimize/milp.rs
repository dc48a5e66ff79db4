//! MILP backends for the conflict model.
//!
//! The exact optimizer talks to solvers through [`MilpBackend`]; the
//! conflict model itself knows nothing about solver technology.
//!
//! # Budget
//!
//! Every solve receives a [`SolveBudget`]: a wall-clock limit plus a stop
//! flag the caller can raise. Backends check it between units of work and
//! return their best feasible point once it is exhausted.
//!
//! # Reference
//! Land & Doig (1960), "An Automatic Method of Solving Discrete
//! Programming Problems"

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::conflict::ConflictModel;

/// Relaxations within this of the incumbent cannot improve it.
const BOUND_TOL: f64 = 1e-6;

/// Ordering values closer than this to 0 or 1 count as integral.
const INTEGRAL_TOL: f64 = 1e-6;

/// Terminal status of an exact solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// Time budget reached; best feasible schedule returned.
    TimeLimitFeasible,
    /// Solver failed for another reason; feasible fallback returned.
    Other,
}

impl SolveStatus {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::TimeLimitFeasible => "TimeLimitFeasible",
            SolveStatus::Other => "Other",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Wall-clock limit plus a shared stop flag.
///
/// Clones share the flag, so the side that waits can stop the side that
/// solves.
#[derive(Debug, Clone)]
pub struct SolveBudget {
    started: Instant,
    time_limit: Duration,
    stop: Arc<AtomicBool>,
}

impl SolveBudget {
    /// Starts a budget of `time_limit` from now.
    pub fn new(time_limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            time_limit,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The configured limit.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Raises the stop flag for every clone.
    pub fn interrupt(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Whether the stop flag is raised.
    pub fn is_interrupted(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Whether the solve must stop: interrupted or out of time.
    pub fn is_exhausted(&self) -> bool {
        self.is_interrupted() || self.started.elapsed() >= self.time_limit
    }
}

/// Start times read back from a backend.
#[derive(Debug, Clone, PartialEq)]
pub struct MilpSolution {
    /// Start per model index (minutes). `None` when the solver has no value.
    pub starts: Vec<Option<f64>>,
    /// Terminal status.
    pub status: SolveStatus,
}

/// Backend failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MilpError {
    #[error("model is infeasible")]
    Infeasible,
    #[error("model is unbounded")]
    Unbounded,
    #[error("solver failed: {0}")]
    Failed(String),
}

/// A mixed-integer solver able to solve a [`ConflictModel`].
///
/// Implementations must return promptly once `budget` is exhausted.
pub trait MilpBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Solves the model.
    fn solve(&self, model: &ConflictModel, budget: &SolveBudget) -> Result<MilpSolution, MilpError>;
}

/// Branch-and-bound over the ordering variables, with each node's linear
/// relaxation solved by `good_lp`'s pure-Rust `microlp` solver.
///
/// The search starts from the release-order dispatch, so it always holds
/// a feasible schedule. Every node also rounds its relaxation into an
/// order and dispatches it, which tightens the incumbent early. The
/// budget is checked before each node.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend;

impl GoodLpBackend {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl MilpBackend for GoodLpBackend {
    fn name(&self) -> &'static str {
        "good_lp/microlp"
    }

    fn solve(&self, model: &ConflictModel, budget: &SolveBudget) -> Result<MilpSolution, MilpError> {
        let mut release_order: Vec<usize> = (0..model.len()).collect();
        release_order.sort_by(|&a, &b| model.release[a].total_cmp(&model.release[b]).then(a.cmp(&b)));
        let mut best = model.sequence_starts(&release_order);
        let mut best_objective = model.objective(&best);

        let pairs: Vec<(usize, usize)> = model.pairs().collect();
        let mut open: Vec<Vec<Option<bool>>> = vec![vec![None; pairs.len()]];
        let mut nodes = 0usize;

        debug!(
            trains = model.len(),
            orderings = pairs.len(),
            big_m = model.big_m(),
            "branch and bound started"
        );

        while let Some(fixed) = open.pop() {
            if budget.is_exhausted() {
                debug!(nodes, open = open.len() + 1, best_objective, "search stopped by budget");
                return Ok(MilpSolution {
                    starts: best.into_iter().map(Some).collect(),
                    status: SolveStatus::TimeLimitFeasible,
                });
            }
            nodes += 1;

            let relaxation = match solve_relaxation(model, &pairs, &fixed) {
                Ok(r) => r,
                Err(MilpError::Infeasible) if nodes > 1 => continue,
                Err(e) => return Err(e),
            };
            if relaxation.objective >= best_objective - BOUND_TOL {
                continue;
            }

            // Dispatch in the order the relaxation suggests
            let rounded = model.sequence_starts(&relaxation.order());
            let rounded_objective = model.objective(&rounded);
            if rounded_objective < best_objective - BOUND_TOL {
                best = rounded;
                best_objective = rounded_objective;
            }

            if let Some(k) = relaxation.most_fractional() {
                let up_first = relaxation.ordering[k] >= 0.5;
                let mut up = fixed.clone();
                up[k] = Some(true);
                let mut down = fixed;
                down[k] = Some(false);
                // Nearer branch is explored first
                if up_first {
                    open.push(down);
                    open.push(up);
                } else {
                    open.push(up);
                    open.push(down);
                }
            }
        }

        debug!(nodes, best_objective, "branch and bound proved optimality");
        Ok(MilpSolution {
            starts: best.into_iter().map(Some).collect(),
            status: SolveStatus::Optimal,
        })
    }
}

struct Relaxation {
    starts: Vec<f64>,
    ordering: Vec<f64>,
    objective: f64,
}

impl Relaxation {
    /// Train indices by relaxed start time.
    fn order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.starts.len()).collect();
        order.sort_by(|&a, &b| self.starts[a].total_cmp(&self.starts[b]).then(a.cmp(&b)));
        order
    }

    fn most_fractional(&self) -> Option<usize> {
        self.ordering
            .iter()
            .enumerate()
            .map(|(k, &y)| (k, y.min(1.0 - y)))
            .filter(|&(_, distance)| distance > INTEGRAL_TOL)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k)
    }
}

/// Solves the linear relaxation with some ordering variables fixed.
fn solve_relaxation(
    model: &ConflictModel,
    pairs: &[(usize, usize)],
    fixed: &[Option<bool>],
) -> Result<Relaxation, MilpError> {
    let big_m = model.big_m();
    let horizon = model.horizon();
    let headway = model.headway;

    let mut vars = variables!();
    let starts: Vec<Variable> = model
        .release
        .iter()
        .map(|&r| vars.add(variable().min(r).max(horizon.max(r))))
        .collect();
    let orderings: Vec<Variable> = fixed
        .iter()
        .map(|f| match f {
            Some(true) => vars.add(variable().min(1.0).max(1.0)),
            Some(false) => vars.add(variable().min(0.0).max(0.0)),
            None => vars.add(variable().min(0.0).max(1.0)),
        })
        .collect();

    let completion: f64 = model
        .travel
        .iter()
        .zip(&model.weight)
        .map(|(p, w)| p * w)
        .sum();
    let objective = starts
        .iter()
        .zip(&model.weight)
        .fold(Expression::from(completion), |acc, (&s, &w)| acc + w * s);

    let mut problem = vars.minimise(objective).using(default_solver);
    for (&(i, j), &y) in pairs.iter().zip(&orderings) {
        // y = 1: i before j
        let j_after_i: Expression = starts[j] - starts[i] - big_m * y;
        let i_bound = model.travel[i] + headway - big_m;
        problem = problem.with(constraint!(j_after_i >= i_bound));

        // y = 0: j before i
        let i_after_j: Expression = starts[i] - starts[j] + big_m * y;
        let j_bound = model.travel[j] + headway;
        problem = problem.with(constraint!(i_after_j >= j_bound));
    }

    match problem.solve() {
        Ok(solution) => {
            let starts: Vec<f64> = starts.iter().map(|&s| solution.value(s)).collect();
            let ordering = orderings.iter().map(|&y| solution.value(y)).collect();
            let objective = model.objective(&starts);
            Ok(Relaxation {
                starts,
                ordering,
                objective,
            })
        }
        Err(ResolutionError::Infeasible) => Err(MilpError::Infeasible),
        Err(ResolutionError::Unbounded) => Err(MilpError::Unbounded),
        Err(other) => Err(MilpError::Failed(other.to_string())),
    }
}
