//! Pinned assignments and persistence rows.

use super::{RoleId, RoleOccurrence, VolunteerId};
use crate::interval::Interval;

/// A previously decided assignment that must be preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedPlacement {
    pub volunteer: VolunteerId,
    pub occurrence: RoleOccurrence,
    pub slot: Interval,
}

impl FixedPlacement {
    pub fn new(volunteer: VolunteerId, occurrence: RoleOccurrence, slot: Interval) -> Self {
        Self {
            volunteer,
            occurrence,
            slot,
        }
    }
}

/// One persisted line of a schedule: a seat at a slot, staffed or not.
///
/// Rows without a volunteer record unfilled demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRow {
    pub role: RoleId,
    pub position: usize,
    pub slot: Interval,
    pub volunteer: Option<VolunteerId>,
}

impl ScheduleRow {
    pub fn occurrence(&self) -> RoleOccurrence {
        RoleOccurrence::new(self.role, self.position)
    }

    /// A staffed row becomes a fixed placement when extending the schedule.
    pub fn as_fixed_placement(&self) -> Option<FixedPlacement> {
        self.volunteer
            .map(|volunteer| FixedPlacement::new(volunteer, self.occurrence(), self.slot))
    }
}
