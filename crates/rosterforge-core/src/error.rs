//! Error types for RosterForge

use thiserror::Error;

use crate::domain::{RoleId, VolunteerId};
use crate::interval::Interval;
use crate::Timestamp;

/// Main error type for RosterForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    /// Interval whose end does not come after its start
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval { start: Timestamp, end: Timestamp },

    /// Slot granularity that is zero or negative
    #[error("Invalid slot duration: {0} seconds")]
    InvalidDuration(i64),

    /// Textual interval that could not be parsed
    #[error("Invalid interval text: {0}")]
    ParseInterval(String),

    /// Reference to a volunteer that is not part of the problem
    #[error("Unknown volunteer: {0}")]
    UnknownVolunteer(VolunteerId),

    /// Reference to a role that is not part of the problem
    #[error("Unknown role: {0}")]
    UnknownRole(RoleId),

    /// Position outside `[0, occurrence)` for a role
    #[error("Invalid position {position} for role {role} with {occurrence} seat(s)")]
    InvalidPosition {
        role: RoleId,
        position: usize,
        occurrence: usize,
    },

    /// Two slots of a schedule window share some time
    #[error("Overlapping slots {first} and {second} in the schedule window")]
    OverlappingSlots { first: Interval, second: Interval },

    /// Two roles share the same id
    #[error("Duplicate role id: {0}")]
    DuplicateRole(RoleId),

    /// Two volunteers share the same id
    #[error("Duplicate volunteer id: {0}")]
    DuplicateVolunteer(VolunteerId),

    /// Slot that is not part of the schedule window
    #[error("Slot {0} is not part of the schedule window")]
    UnknownSlot(Interval),

    /// The solver did not prove optimality; no schedule is available
    #[error("No optimal schedule: solver finished with status {status}")]
    NotOptimal { status: String },

    /// The solver backend rejected the model
    #[error("Solver error: {0}")]
    Solver(String),
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterError>;
