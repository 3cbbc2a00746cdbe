//! The solving capability the engine is written against.

use std::fmt::Debug;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::error::MilpError;
use crate::model::MilpModel;
use crate::outcome::MilpOutcome;
use crate::termination::{ExternalTermination, NodeCountTermination, OrTermination, TimeTermination};

/// A mixed-integer linear solver.
///
/// Implementations read the model, respect the limits and classify the
/// result. Any backend that reports [`SolveStatus::Optimal`] only with a
/// proof of optimality can be substituted for the built-in one.
///
/// [`SolveStatus::Optimal`]: crate::SolveStatus::Optimal
pub trait MilpSolver: Debug {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Minimizes the model's objective subject to its constraints.
    fn solve(&mut self, model: &MilpModel, limits: &SolveLimits) -> Result<MilpOutcome, MilpError>;
}

/// Budget of a single solve.
#[derive(Debug, Clone)]
pub struct SolveLimits {
    pub time_limit: Duration,
    pub node_limit: Option<u64>,
    pub terminate: Option<Arc<AtomicBool>>,
}

impl SolveLimits {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            node_limit: None,
            terminate: None,
        }
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    pub fn with_terminate(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate = Some(flag);
        self
    }

    /// Combines every configured limit into one termination.
    pub fn termination(&self) -> OrTermination {
        let mut termination = OrTermination::new().with(TimeTermination::new(self.time_limit));
        if let Some(nodes) = self.node_limit {
            termination = termination.with(NodeCountTermination::new(nodes));
        }
        if let Some(flag) = &self.terminate {
            termination = termination.with(ExternalTermination::new(flag.clone()));
        }
        termination
    }
}

impl Default for SolveLimits {
    fn default() -> Self {
        Self::new(Duration::from_secs(120))
    }
}
