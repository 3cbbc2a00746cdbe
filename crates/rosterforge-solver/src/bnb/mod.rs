//! Exact depth-first branch-and-bound.
//!
//! Binaries are branched on in declaration order, rewarded ones first, and
//! every decision is followed by bound propagation over the model's rows.
//! Subtrees whose optimistic objective cannot beat the incumbent are cut.
//! Continuous variables are never branched on: each constraint may hold at
//! most one of them, so once all binaries are fixed their best values are
//! read directly from the propagated bounds.

mod bound;
mod domain;
mod rows;


use std::time::Instant;

use tracing::{debug, info};

use crate::backend::{MilpSolver, SolveLimits};
use crate::error::MilpError;
use crate::model::MilpModel;
use crate::outcome::{MilpOutcome, MilpSolution};
use crate::scope::SearchScope;
use crate::stats::SearchStatistics;
use crate::termination::Termination;

use bound::ObjectiveBound;
use domain::Domains;
use rows::RowSet;

/// Slack used when comparing bounds during propagation.
const EPSILON: f64 = 1e-9;

/// Slack used when checking a leaf against the original constraints.
const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Exact backend that bounds by propagation alone, without an LP.
///
/// Reports [`SolveStatus::Optimal`] only after the whole tree has been
/// explored or cut.
///
/// [`SolveStatus::Optimal`]: crate::SolveStatus::Optimal
#[derive(Debug, Clone, Default)]
pub struct BranchAndBoundSolver {
    last_statistics: Option<SearchStatistics>,
}

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of the most recent solve.
    pub fn last_statistics(&self) -> Option<&SearchStatistics> {
        self.last_statistics.as_ref()
    }
}

impl MilpSolver for BranchAndBoundSolver {
    fn name(&self) -> &str {
        "branch-and-bound"
    }

    fn solve(&mut self, model: &MilpModel, limits: &SolveLimits) -> Result<MilpOutcome, MilpError> {
        let termination = limits.termination();
        let search = Search::new(model)?;
        let outcome = search.run(&termination);
        self.last_statistics = Some(*outcome.statistics());
        Ok(outcome)
    }
}

/// One decision on the stack.
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Position of the decided variable in the branching order.
    position: usize,
    /// Trail length before the decision.
    mark: usize,
    /// Value still to try, if any.
    alternative: Option<f64>,
}

struct Search<'m> {
    model: &'m MilpModel,
    domains: Domains,
    rows: RowSet,
    bound: ObjectiveBound,
    order: Vec<usize>,
    incumbent: Option<MilpSolution>,
    stats: SearchStatistics,
    scope: SearchScope,
}

impl<'m> Search<'m> {
    fn new(model: &'m MilpModel) -> Result<Self, MilpError> {
        let domains = Domains::from_model(model);
        let rows = RowSet::compile(model, &domains)?;
        let bound = ObjectiveBound::new(model, &domains, &rows);

        let (mut order, rest): (Vec<usize>, Vec<usize>) = (0..domains.len())
            .filter(|&v| domains.is_binary(v))
            .partition(|&v| bound.cost(v) < 0.0);
        order.extend(rest);

        Ok(Self {
            model,
            domains,
            rows,
            bound,
            order,
            incumbent: None,
            stats: SearchStatistics::default(),
            scope: SearchScope::new(),
        })
    }

    fn run(mut self, termination: &dyn Termination) -> MilpOutcome {
        let started = Instant::now();
        info!(
            event = "search_start",
            model = self.model.name(),
            variables = self.domains.len(),
            branching = self.order.len(),
            rows = self.rows.len(),
            integral = self.bound.is_integral(),
        );

        self.rows.enqueue_all();
        let mut alive = self.rows.propagate(&mut self.domains);
        if !alive {
            self.stats.conflicts += 1;
        }

        let mut stack: Vec<Frame> = Vec::new();
        let completed = loop {
            self.scope.increment_node_count();
            self.scope.set_depth(stack.len());
            if termination.is_terminated(&self.scope) {
                break false;
            }

            if alive && self.cannot_improve() {
                self.stats.pruned += 1;
                alive = false;
            }

            if alive {
                let from = stack.last().map_or(0, |frame| frame.position + 1);
                if let Some(position) = self.next_free(from) {
                    let var = self.order[position];
                    let (first, second) = if self.bound.cost(var) < 0.0 {
                        (1.0, 0.0)
                    } else {
                        (0.0, 1.0)
                    };
                    stack.push(Frame {
                        position,
                        mark: self.domains.trail_len(),
                        alternative: Some(second),
                    });
                    self.stats.max_depth = self.stats.max_depth.max(stack.len());
                    alive = self.decide(var, first);
                    continue;
                }
                self.record_leaf();
            }

            alive = false;
            while let Some(frame) = stack.last_mut() {
                self.domains.undo_to(frame.mark);
                if let Some(value) = frame.alternative.take() {
                    let var = self.order[frame.position];
                    alive = self.decide(var, value);
                    break;
                }
                stack.pop();
            }
            if stack.is_empty() {
                break true;
            }
        };

        self.stats.nodes = self.scope.node_count();
        self.stats.elapsed = started.elapsed();

        let outcome = match (completed, self.incumbent) {
            (true, Some(solution)) => MilpOutcome::optimal(solution, self.stats),
            (true, None) => MilpOutcome::infeasible(self.stats),
            (false, incumbent) => MilpOutcome::aborted(incumbent, self.stats),
        };

        info!(
            event = "search_end",
            status = %outcome.status(),
            objective = outcome.solution().map(|s| s.objective()),
            nodes = self.stats.nodes,
            pruned = self.stats.pruned,
            conflicts = self.stats.conflicts,
            incumbents = self.stats.incumbents,
            duration_ms = self.stats.elapsed.as_millis() as u64,
            nodes_per_s = self.stats.node_speed(),
        );
        outcome
    }

    fn next_free(&self, from: usize) -> Option<usize> {
        (from..self.order.len()).find(|&position| !self.domains.is_fixed(self.order[position]))
    }

    fn decide(&mut self, var: usize, value: f64) -> bool {
        self.domains.set_bounds(var, value, value);
        self.rows.enqueue_var(var);
        let alive = self.rows.propagate(&mut self.domains);
        if !alive {
            self.stats.conflicts += 1;
        }
        alive
    }

    fn cannot_improve(&self) -> bool {
        match &self.incumbent {
            Some(incumbent) => self
                .bound
                .cannot_improve(self.bound.bound(&self.domains), incumbent.objective()),
            None => false,
        }
    }

    fn record_leaf(&mut self) {
        let values: Vec<f64> = (0..self.domains.len())
            .map(|v| {
                if self.domains.is_binary(v) {
                    self.domains.lower(v).round()
                } else if self.bound.cost(v) >= 0.0 {
                    self.domains.lower(v)
                } else {
                    self.domains.upper(v)
                }
            })
            .collect();

        if !self.model.is_feasible(&values, FEASIBILITY_TOLERANCE) {
            self.stats.conflicts += 1;
            return;
        }

        let objective = self.model.objective().evaluate(&values);
        let improves = self
            .incumbent
            .as_ref()
            .map_or(true, |incumbent| objective < incumbent.objective() - EPSILON);
        if improves {
            self.stats.incumbents += 1;
            debug!(
                event = "incumbent",
                objective,
                nodes = self.scope.node_count(),
                depth = self.scope.depth(),
            );
            self.incumbent = Some(MilpSolution::new(values, objective));
        }
    }
}
