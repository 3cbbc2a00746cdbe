//! Solved schedules and their reporting views.

use std::collections::BTreeMap;

use rosterforge_core::{Interval, RoleOccurrence, ScheduleRow, VolunteerId};
use rosterforge_solver::{MilpSolution, SolveStatus};
use tracing::trace;

use crate::demand::DemandModel;
use crate::model_builder::ScheduleModel;

/// Volunteer -> slot -> seat, holding only filled slots.
pub type Assignment = BTreeMap<VolunteerId, BTreeMap<Interval, RoleOccurrence>>;

/// Seat -> chronological unfilled demand slots.
pub type Missing = BTreeMap<RoleOccurrence, Vec<Interval>>;

/// Outcome of one solve.
///
/// Only a proven optimum is `Valid`; any other backend status leaves no
/// schedule to read.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleResult {
    Valid(Schedule),
    Invalid(SolveStatus),
}

impl ScheduleResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ScheduleResult::Valid(_))
    }

    pub fn status(&self) -> SolveStatus {
        match self {
            ScheduleResult::Valid(_) => SolveStatus::Optimal,
            ScheduleResult::Invalid(status) => *status,
        }
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            ScheduleResult::Valid(schedule) => Some(schedule),
            ScheduleResult::Invalid(_) => None,
        }
    }

    pub fn into_schedule(self) -> Option<Schedule> {
        match self {
            ScheduleResult::Valid(schedule) => Some(schedule),
            ScheduleResult::Invalid(_) => None,
        }
    }

    /// Persistence rows of a valid result; empty otherwise.
    pub fn rows(&self) -> Vec<ScheduleRow> {
        self.schedule().map(Schedule::rows).unwrap_or_default()
    }
}

/// A proven-optimal assignment and the demand it leaves open.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    assignment: Assignment,
    missing: Missing,
    objective: f64,
}

impl Schedule {
    /// Reads every set `choice` variable of `solution`.
    ///
    /// Each seat's missing list starts as its full demand and loses every
    /// slot that got a volunteer.
    pub fn extract(model: &ScheduleModel, demand: &DemandModel, solution: &MilpSolution) -> Self {
        let slots = model.slots();
        let mut missing: BTreeMap<RoleOccurrence, Vec<Interval>> = model
            .occurrences()
            .iter()
            .map(|occurrence| {
                let needed = demand.demand(occurrence).iter().map(|&s| slots[s]).collect();
                (*occurrence, needed)
            })
            .collect();

        let mut assignment = Assignment::new();
        for (v, &volunteer) in model.volunteers().iter().enumerate() {
            for (o, occurrence) in model.occurrences().iter().enumerate() {
                for (s, &slot) in slots.iter().enumerate() {
                    if !solution.is_set(model.choice(v, o, s)) {
                        continue;
                    }
                    trace!(event = "assigned", volunteer = %volunteer, seat = %occurrence, slot = %slot);
                    assignment
                        .entry(volunteer)
                        .or_default()
                        .insert(slot, *occurrence);
                    if let Some(open) = missing.get_mut(occurrence) {
                        open.retain(|needed| *needed != slot);
                    }
                }
            }
        }

        Self {
            assignment,
            missing,
            objective: solution.objective(),
        }
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn missing(&self) -> &Missing {
        &self.missing
    }

    /// Objective value reached by the solver.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Number of (volunteer, slot) duties.
    pub fn filled_count(&self) -> usize {
        self.assignment.values().map(BTreeMap::len).sum()
    }

    /// Number of (seat, slot) pairs left without a volunteer.
    pub fn missing_count(&self) -> usize {
        self.missing.values().map(Vec::len).sum()
    }

    /// One row per duty and one volunteer-less row per missing slot, sorted.
    pub fn rows(&self) -> Vec<ScheduleRow> {
        let staffed = self.assignment.iter().flat_map(|(&volunteer, duties)| {
            duties.iter().map(move |(&slot, occurrence)| ScheduleRow {
                role: occurrence.role,
                position: occurrence.position,
                slot,
                volunteer: Some(volunteer),
            })
        });
        let open = self.missing.iter().flat_map(|(occurrence, slots)| {
            slots.iter().map(move |&slot| ScheduleRow {
                role: occurrence.role,
                position: occurrence.position,
                slot,
                volunteer: None,
            })
        });
        let mut rows: Vec<ScheduleRow> = staffed.chain(open).collect();
        rows.sort_unstable();
        rows
    }

    /// Slot -> number of unfilled seats, chronological.
    pub fn missing_by_slot(&self) -> BTreeMap<Interval, usize> {
        let mut by_slot = BTreeMap::new();
        for slot in self.missing.values().flatten() {
            *by_slot.entry(*slot).or_insert(0) += 1;
        }
        by_slot
    }

    /// Chronological filled slots of one seat.
    pub fn filled_slots(&self, occurrence: &RoleOccurrence) -> Vec<Interval> {
        let mut slots: Vec<Interval> = self
            .assignment
            .values()
            .flat_map(|duties| {
                duties
                    .iter()
                    .filter(|(_, seat)| *seat == occurrence)
                    .map(|(&slot, _)| slot)
            })
            .collect();
        slots.sort_unstable();
        slots
    }

    /// A volunteer's duties merged into maximal consecutive runs per seat,
    /// ordered by start.
    pub fn volunteer_runs(&self, volunteer: VolunteerId) -> Vec<(RoleOccurrence, Interval)> {
        let Some(duties) = self.assignment.get(&volunteer) else {
            return Vec::new();
        };

        let mut by_seat: BTreeMap<RoleOccurrence, Vec<Interval>> = BTreeMap::new();
        for (&slot, &occurrence) in duties {
            by_seat.entry(occurrence).or_default().push(slot);
        }

        let mut runs: Vec<(RoleOccurrence, Interval)> = by_seat
            .into_iter()
            .flat_map(|(occurrence, slots)| {
                Interval::merge_runs(slots)
                    .into_iter()
                    .map(move |run| (occurrence, run))
            })
            .collect();
        runs.sort_by_key(|&(occurrence, run)| (run, occurrence));
        runs
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
