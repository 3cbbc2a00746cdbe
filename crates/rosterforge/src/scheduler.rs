//! Build, solve and classify; the only caller of a [`MilpSolver`].

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use rosterforge_config::{FriendMode, SchedulerConfig};
use rosterforge_core::{Result, RosterError};
use rosterforge_solver::{MicroLpSolver, MilpSolver, SolveLimits, SolveStatus};
use tracing::{debug, info};

use crate::demand::DemandModel;
use crate::eligibility::Eligibility;
use crate::model_builder::ScheduleModel;
use crate::problem::EventProblem;
use crate::result::{Assignment, Missing, Schedule, ScheduleResult};

/// A solve kept together with the friend mode it was computed for.
#[derive(Debug, Clone)]
struct CachedSolve {
    friend_mode: FriendMode,
    result: ScheduleResult,
}

/// Schedules one event.
///
/// The first read of the result solves; later reads reuse the cached solve
/// until the friend mode changes. One instance is not meant to be shared
/// across threads while solving.
///
/// # Example
///
/// ```
/// use rosterforge::prelude::*;
///
/// let problem = EventProblem::default();
/// let mut scheduler = Scheduler::new(problem).with_config(
///     SchedulerConfig::default().with_friend_mode(FriendMode::AtBest),
/// );
/// assert_eq!(scheduler.friend_mode(), FriendMode::AtBest);
/// assert!(scheduler.is_valid().unwrap());
/// ```
#[derive(Debug)]
pub struct Scheduler {
    problem: EventProblem,
    demand: DemandModel,
    eligibility: Eligibility,
    config: SchedulerConfig,
    backend: Box<dyn MilpSolver>,
    terminate: Option<Arc<AtomicBool>>,
    last_solve: Option<CachedSolve>,
}

impl Scheduler {
    /// Creates a scheduler with the default configuration and the
    /// [`MicroLpSolver`] backend.
    pub fn new(problem: EventProblem) -> Self {
        let demand = DemandModel::build(&problem.roles, &problem.window);
        let eligibility = Eligibility::resolve(&problem.volunteers, &problem.window);
        Self {
            problem,
            demand,
            eligibility,
            config: SchedulerConfig::default(),
            backend: Box::new(MicroLpSolver::new()),
            terminate: None,
            last_solve: None,
        }
    }

    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self.last_solve = None;
        self
    }

    pub fn with_backend(mut self, backend: impl MilpSolver + 'static) -> Self {
        self.backend = Box::new(backend);
        self.last_solve = None;
        self
    }

    /// Lets another thread stop a running solve.
    ///
    /// A stopped solve has no proof of optimality and is therefore invalid.
    /// Like the other builders, this drops any cached result.
    pub fn with_terminate(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate = Some(flag);
        self.last_solve = None;
        self
    }

    pub fn problem(&self) -> &EventProblem {
        &self.problem
    }

    pub fn demand(&self) -> &DemandModel {
        &self.demand
    }

    pub fn eligibility(&self) -> &Eligibility {
        &self.eligibility
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn friend_mode(&self) -> FriendMode {
        self.config.friend_mode
    }

    /// Changes the friend mode; a cached solve for another mode is dropped
    /// on the next read.
    pub fn set_friend_mode(&mut self, mode: FriendMode) {
        if mode != self.config.friend_mode {
            debug!(event = "friend_mode_changed", from = %self.config.friend_mode, to = %mode);
            self.config.friend_mode = mode;
        }
    }

    /// The cached result, without solving.
    pub fn result(&self) -> Option<&ScheduleResult> {
        self.last_solve
            .as_ref()
            .filter(|cached| cached.friend_mode == self.config.friend_mode)
            .map(|cached| &cached.result)
    }

    /// Solves unless a result for the current friend mode is cached.
    pub fn solve(&mut self) -> Result<&ScheduleResult> {
        let stale = self
            .last_solve
            .as_ref()
            .map_or(true, |cached| cached.friend_mode != self.config.friend_mode);
        if stale {
            if self.last_solve.take().is_some() {
                debug!(event = "cache_invalidated", friend_mode = %self.config.friend_mode);
            }
            let result = self.run()?;
            self.last_solve = Some(CachedSolve {
                friend_mode: self.config.friend_mode,
                result,
            });
        }
        self.result()
            .ok_or_else(|| RosterError::Solver("no cached result after solving".to_string()))
    }

    pub fn is_valid(&mut self) -> Result<bool> {
        Ok(self.solve()?.is_valid())
    }

    pub fn status(&mut self) -> Result<SolveStatus> {
        Ok(self.solve()?.status())
    }

    /// The assignment of a valid result.
    ///
    /// Returns [`RosterError::NotOptimal`] when the solve was not proven
    /// optimal.
    pub fn schedule(&mut self) -> Result<&Assignment> {
        match self.solve()? {
            ScheduleResult::Valid(schedule) => Ok(schedule.assignment()),
            ScheduleResult::Invalid(status) => Err(not_optimal(*status)),
        }
    }

    /// The unfilled demand of a valid result.
    pub fn missing(&mut self) -> Result<&Missing> {
        match self.solve()? {
            ScheduleResult::Valid(schedule) => Ok(schedule.missing()),
            ScheduleResult::Invalid(status) => Err(not_optimal(*status)),
        }
    }

    fn limits(&self) -> SolveLimits {
        let mut limits = SolveLimits::new(self.config.time_limit());
        if let Some(nodes) = self.config.termination.node_count_limit {
            limits = limits.with_node_limit(nodes);
        }
        if let Some(flag) = &self.terminate {
            limits = limits.with_terminate(flag.clone());
        }
        limits
    }

    fn run(&mut self) -> Result<ScheduleResult> {
        let started = Instant::now();
        let model = ScheduleModel::build(&self.problem, &self.demand, &self.eligibility, &self.config)?;
        let limits = self.limits();

        info!(
            event = "solve_start",
            backend = self.backend.name(),
            friend_mode = %self.config.friend_mode,
            volunteer_count = self.problem.volunteers.len(),
            occurrence_count = self.demand.occurrences().len(),
            slot_count = self.problem.window.len(),
            variable_count = model.model().variable_count(),
            constraint_count = model.model().constraint_count(),
            time_limit_secs = limits.time_limit.as_secs(),
        );

        let outcome = self
            .backend
            .solve(model.model(), &limits)
            .map_err(|err| RosterError::Solver(err.to_string()))?;
        let statistics = *outcome.statistics();

        let result = match outcome.solution() {
            Some(solution) if outcome.status().is_optimal() => {
                ScheduleResult::Valid(Schedule::extract(&model, &self.demand, solution))
            }
            _ => ScheduleResult::Invalid(outcome.status()),
        };

        let (filled, missing) = result
            .schedule()
            .map_or((0, 0), |schedule| (schedule.filled_count(), schedule.missing_count()));
        info!(
            event = "solve_end",
            status = %outcome.status(),
            feasible = result.is_valid(),
            objective = outcome.solution().map(|solution| solution.objective()),
            filled = filled as u64,
            missing = missing as u64,
            nodes = statistics.nodes,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        Ok(result)
    }
}

fn not_optimal(status: SolveStatus) -> RosterError {
    RosterError::NotOptimal {
        status: status.to_string(),
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
