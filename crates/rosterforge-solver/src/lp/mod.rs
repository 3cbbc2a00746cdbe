//! LP-based branch-and-bound through `good_lp` and its `microlp` solver.
//!
//! Every node is bounded by its linear relaxation, so the proof of
//! optimality scales with the model far better than plain propagation.
//! The solve runs on a worker thread; the calling thread polls the limits
//! and gives up on the worker once any of them fires.

#[cfg(test)]
mod tests;

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
};
use tracing::{debug, info, warn};

use crate::backend::{MilpSolver, SolveLimits};
use crate::error::MilpError;
use crate::model::{Comparison, LinearExpr, MilpModel, VarKind};
use crate::outcome::{MilpOutcome, MilpSolution};
use crate::scope::SearchScope;
use crate::stats::SearchStatistics;
use crate::termination::Termination;

/// Slack used when checking the returned point against the original rows.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// What the worker thread hands back.
enum WorkerResult {
    Solved(Vec<f64>),
    Infeasible,
    Failed(String),
}

/// The default exact backend.
///
/// Reports [`SolveStatus::Optimal`] only when `microlp` finished its own
/// branch-and-bound and the returned point satisfies every constraint.
///
/// [`SolveStatus::Optimal`]: crate::SolveStatus::Optimal
#[derive(Debug, Clone)]
pub struct MicroLpSolver {
    poll_interval: Duration,
    last_statistics: Option<SearchStatistics>,
}

impl MicroLpSolver {
    pub fn new() -> Self {
        Self {
            poll_interval: Duration::from_millis(20),
            last_statistics: None,
        }
    }

    /// How often the limits are checked while the worker runs.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Statistics of the most recent solve.
    pub fn last_statistics(&self) -> Option<&SearchStatistics> {
        self.last_statistics.as_ref()
    }

    fn wait(
        &self,
        model: &MilpModel,
        termination: &dyn Termination,
        scope: &SearchScope,
    ) -> Result<Option<WorkerResult>, MilpError> {
        let owned = model.clone();
        let (sender, receiver) = mpsc::channel();
        thread::Builder::new()
            .name("rosterforge-microlp".to_string())
            .spawn(move || {
                // The receiver is gone once the caller gave up.
                let _ = sender.send(run_microlp(&owned));
            })
            .map_err(|err| MilpError::Backend(err.to_string()))?;

        loop {
            match receiver.recv_timeout(self.poll_interval) {
                Ok(result) => return Ok(Some(result)),
                Err(RecvTimeoutError::Timeout) => {
                    if termination.is_terminated(scope) {
                        return Ok(None);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(MilpError::Backend("solver thread exited without a result".into()))
                }
            }
        }
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MilpSolver for MicroLpSolver {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&mut self, model: &MilpModel, limits: &SolveLimits) -> Result<MilpOutcome, MilpError> {
        let started = Instant::now();
        let termination = limits.termination();
        let mut scope = SearchScope::new();
        scope.increment_node_count();

        info!(
            event = "search_start",
            model = model.name(),
            backend = self.name(),
            variables = model.variable_count(),
            rows = model.constraint_count(),
        );

        let mut stats = SearchStatistics {
            nodes: 1,
            ..SearchStatistics::default()
        };

        let result = if termination.is_terminated(&scope) {
            None
        } else if model.variable_count() == 0 {
            if model.is_feasible(&[], FEASIBILITY_TOLERANCE) {
                Some(WorkerResult::Solved(Vec::new()))
            } else {
                Some(WorkerResult::Infeasible)
            }
        } else {
            self.wait(model, &termination, &scope)?
        };

        let outcome = match result {
            None => {
                debug!(event = "search_aborted", elapsed_ms = scope.elapsed().as_millis() as u64);
                stats.elapsed = started.elapsed();
                MilpOutcome::aborted(None, stats)
            }
            Some(WorkerResult::Infeasible) => {
                stats.conflicts = 1;
                stats.elapsed = started.elapsed();
                MilpOutcome::infeasible(stats)
            }
            Some(WorkerResult::Failed(message)) => {
                warn!(event = "backend_failed", backend = self.name(), message = %message);
                return Err(MilpError::Backend(message));
            }
            Some(WorkerResult::Solved(values)) => {
                let values = snap_binaries(model, values);
                if !model.is_feasible(&values, FEASIBILITY_TOLERANCE) {
                    return Err(MilpError::Backend(
                        "returned point violates the model's constraints".into(),
                    ));
                }
                let objective = model.objective().evaluate(&values);
                stats.incumbents = 1;
                stats.elapsed = started.elapsed();
                MilpOutcome::optimal(MilpSolution::new(values, objective), stats)
            }
        };

        info!(
            event = "search_end",
            status = %outcome.status(),
            objective = outcome.solution().map(|s| s.objective()),
            duration_ms = stats.elapsed.as_millis() as u64,
        );
        self.last_statistics = Some(stats);
        Ok(outcome)
    }
}

fn run_microlp(model: &MilpModel) -> WorkerResult {
    let mut vars = ProblemVariables::new();
    let handles: Vec<good_lp::Variable> = model
        .variables()
        .iter()
        .map(|v| match v.kind() {
            VarKind::Binary => vars.add(variable().binary()),
            VarKind::Continuous { lower, upper } => vars.add(variable().min(lower).max(upper)),
        })
        .collect();

    let to_expression = |expr: &LinearExpr| {
        let mut out = Expression::with_capacity(expr.terms().len());
        for &(var, coefficient) in expr.terms() {
            out.add_mul(coefficient, handles[var.index()]);
        }
        out
    };

    let mut problem = vars.minimise(to_expression(model.objective())).using(microlp);
    for row in model.constraints() {
        let lhs = to_expression(row.expr());
        let rhs = row.rhs();
        problem = problem.with(match row.comparison() {
            Comparison::LessEq => constraint::leq(lhs, rhs),
            Comparison::GreaterEq => constraint::geq(lhs, rhs),
            Comparison::Equal => constraint::eq(lhs, rhs),
        });
    }

    match problem.solve() {
        Ok(solution) => WorkerResult::Solved(handles.iter().map(|&h| solution.value(h)).collect()),
        Err(ResolutionError::Infeasible) => WorkerResult::Infeasible,
        Err(err) => WorkerResult::Failed(err.to_string()),
    }
}

/// Rounds binaries to exactly 0 or 1; the LP returns them within tolerance.
fn snap_binaries(model: &MilpModel, mut values: Vec<f64>) -> Vec<f64> {
    for (value, var) in values.iter_mut().zip(model.variables()) {
        if var.kind().is_binary() {
            *value = if *value > 0.5 { 1.0 } else { 0.0 };
        }
    }
    values
}
