//! RosterForge Solver
//!
//! This crate provides the solving capability the scheduling engine is
//! written against:
//! - A backend-neutral linear model (binary and bounded continuous
//!   variables, linear constraints, minimized linear objective)
//! - The [`MilpSolver`] trait any compliant backend implements
//! - Termination conditions (time, node count, external flag)
//! - [`MicroLpSolver`], the default exact backend (LP-relaxation bounds)
//! - [`BranchAndBoundSolver`], a dependency-free propagation-only backend

pub mod backend;
pub mod bnb;
pub mod error;
pub mod lp;
pub mod model;
pub mod outcome;
pub mod scope;
pub mod stats;
pub mod termination;

pub use backend::{MilpSolver, SolveLimits};
pub use bnb::BranchAndBoundSolver;
pub use error::MilpError;
pub use lp::MicroLpSolver;
pub use model::{Comparison, LinearConstraint, LinearExpr, MilpModel, VarId, VarKind, Variable};
pub use outcome::{MilpOutcome, MilpSolution, SolveStatus};
pub use scope::SearchScope;
pub use stats::SearchStatistics;
pub use termination::{
    ExternalTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};
