//! Domain records read by the scheduling engine.
//!
//! These records are owned by external collaborators (storage, forms) and
//! are read-only inputs to the engine, which never mutates them.

mod placement;
mod role;
mod volunteer;

pub use placement::{FixedPlacement, ScheduleRow};
pub use role::{Role, RoleId, RoleOccurrence};
pub use volunteer::{Volunteer, VolunteerId};
