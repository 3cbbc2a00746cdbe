//! Solve outcomes reported by backends.

use std::fmt;

use crate::model::VarId;
use crate::stats::SearchStatistics;

/// Final classification of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// A solution was found and proven optimal.
    Optimal,
    /// A limit stopped the search with an unproven solution in hand.
    Feasible,
    /// The search proved that no solution exists.
    Infeasible,
    /// A limit stopped the search before any solution was found.
    Unknown,
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Feasible => write!(f, "feasible"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Variable values of one solution, indexed by [`VarId`].
#[derive(Debug, Clone, PartialEq)]
pub struct MilpSolution {
    values: Vec<f64>,
    objective: f64,
}

impl MilpSolution {
    pub fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }

    /// Value of `var`; zero for variables outside the solution.
    #[inline]
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.index()).copied().unwrap_or(0.0)
    }

    /// Returns true if the binary `var` is set.
    #[inline]
    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var) > 0.5
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Result of a backend run.
#[derive(Debug, Clone)]
pub struct MilpOutcome {
    status: SolveStatus,
    solution: Option<MilpSolution>,
    statistics: SearchStatistics,
}

impl MilpOutcome {
    #[inline]
    pub fn optimal(solution: MilpSolution, statistics: SearchStatistics) -> Self {
        Self {
            status: SolveStatus::Optimal,
            solution: Some(solution),
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: SearchStatistics) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            solution: None,
            statistics,
        }
    }

    /// A run stopped by a limit, with or without an incumbent.
    #[inline]
    pub fn aborted(solution: Option<MilpSolution>, statistics: SearchStatistics) -> Self {
        let status = if solution.is_some() {
            SolveStatus::Feasible
        } else {
            SolveStatus::Unknown
        };
        Self {
            status,
            solution,
            statistics,
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn solution(&self) -> Option<&MilpSolution> {
        self.solution.as_ref()
    }

    pub fn into_solution(self) -> Option<MilpSolution> {
        self.solution
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
