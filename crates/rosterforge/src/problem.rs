//! The in-memory input bundle of one scheduling run.

use std::collections::HashSet;

use rosterforge_core::{
    FixedPlacement, Result, Role, RoleId, RosterError, ScheduleRow, ScheduleWindow, Volunteer,
    VolunteerId,
};

/// Everything the engine reads about one event.
///
/// Built by the caller from its own storage; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventProblem {
    /// Global slot grid of the event.
    pub window: ScheduleWindow,
    pub roles: Vec<Role>,
    pub volunteers: Vec<Volunteer>,
    /// Assignments that must be reproduced verbatim.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_placements: Vec<FixedPlacement>,
}

impl EventProblem {
    pub fn new(window: ScheduleWindow, roles: Vec<Role>, volunteers: Vec<Volunteer>) -> Self {
        Self {
            window,
            roles,
            volunteers,
            fixed_placements: Vec::new(),
        }
    }

    pub fn with_fixed_placements(
        mut self,
        placements: impl IntoIterator<Item = FixedPlacement>,
    ) -> Self {
        self.fixed_placements.extend(placements);
        self
    }

    /// Pins every staffed row of a prior schedule.
    ///
    /// Rows without a volunteer only recorded missing demand and are ignored.
    pub fn with_prior_schedule(self, rows: impl IntoIterator<Item = ScheduleRow>) -> Self {
        let placements: Vec<FixedPlacement> = rows
            .into_iter()
            .filter_map(|row| row.as_fixed_placement())
            .collect();
        self.with_fixed_placements(placements)
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn volunteer(&self, id: VolunteerId) -> Option<&Volunteer> {
        self.volunteers.iter().find(|volunteer| volunteer.id == id)
    }

    /// Total number of role seats.
    pub fn occurrence_count(&self) -> usize {
        self.roles.iter().map(|role| role.occurrence.max(1)).sum()
    }

    /// Checks that role and volunteer ids are unique, and that every fixed
    /// placement names a known volunteer, an existing seat and a slot of the
    /// window.
    ///
    /// A placement that is merely impossible (outside demand or availability)
    /// is not rejected here; it makes the solve infeasible instead.
    pub fn validate(&self) -> Result<()> {
        let mut role_ids = HashSet::with_capacity(self.roles.len());
        if let Some(role) = self.roles.iter().find(|role| !role_ids.insert(role.id)) {
            return Err(RosterError::DuplicateRole(role.id));
        }
        let mut volunteer_ids = HashSet::with_capacity(self.volunteers.len());
        if let Some(volunteer) = self
            .volunteers
            .iter()
            .find(|volunteer| !volunteer_ids.insert(volunteer.id))
        {
            return Err(RosterError::DuplicateVolunteer(volunteer.id));
        }

        for placement in &self.fixed_placements {
            if self.volunteer(placement.volunteer).is_none() {
                return Err(RosterError::UnknownVolunteer(placement.volunteer));
            }
            let occurrence = placement.occurrence;
            let role = self
                .role(occurrence.role)
                .ok_or(RosterError::UnknownRole(occurrence.role))?;
            if occurrence.position >= role.occurrence.max(1) {
                return Err(RosterError::InvalidPosition {
                    role: occurrence.role,
                    position: occurrence.position,
                    occurrence: role.occurrence,
                });
            }
            if self.window.index_of(&placement.slot).is_none() {
                return Err(RosterError::UnknownSlot(placement.slot));
            }
        }
        Ok(())
    }
}
