//! RosterForge Core - value types and domain records for volunteer scheduling
//!
//! This crate provides the plain in-memory data the scheduling engine reads:
//! - Half-open time intervals and the global slot grid
//! - Roles, role occurrences and volunteer availability records
//! - Fixed placements and persistence rows of a prior schedule
//! - The shared error type

pub mod domain;
pub mod error;
pub mod interval;

pub use domain::{
    FixedPlacement, Role, RoleId, RoleOccurrence, ScheduleRow, Volunteer, VolunteerId,
};
pub use error::{Result, RosterError};
pub use interval::{Interval, ScheduleWindow};

/// Timestamp type used for every interval bound.
pub type Timestamp = chrono::NaiveDateTime;
