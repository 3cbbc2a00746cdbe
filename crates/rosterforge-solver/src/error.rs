//! Error types for model construction and solving.

use thiserror::Error;

use crate::model::VarId;

/// Errors raised while building or solving a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MilpError {
    /// A constraint or objective refers to a variable the model never declared.
    #[error("Unknown variable {0:?}")]
    UnknownVariable(VarId),

    /// A coefficient, constant or bound is NaN or infinite.
    #[error("Non-finite value in {0}")]
    NonFinite(String),

    /// Continuous variable with `lower > upper`.
    #[error("Invalid bounds [{lower}, {upper}] for variable {name}")]
    InvalidBounds { name: String, lower: f64, upper: f64 },

    /// The backend cannot handle this model shape.
    #[error("Unsupported model: {0}")]
    Unsupported(String),

    /// The backend itself failed to produce an answer.
    #[error("Backend failure: {0}")]
    Backend(String),
}
