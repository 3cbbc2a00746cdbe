//! Per-role and per-seat demand over the slot grid.

use std::collections::BTreeMap;

use rosterforge_core::{Role, RoleId, RoleOccurrence, ScheduleWindow};
use tracing::debug;

/// Slots each role needs staffed, and the seats that inherit them.
///
/// Demand is stored once per role; every seat of a role shares it.
#[derive(Debug, Clone, Default)]
pub struct DemandModel {
    by_role: BTreeMap<RoleId, Vec<usize>>,
    occurrences: Vec<RoleOccurrence>,
}

impl DemandModel {
    /// Computes `{slot : role.window contains slot}` for every role.
    ///
    /// A role whose window holds no slot keeps its seats with empty demand.
    pub fn build(roles: &[Role], window: &ScheduleWindow) -> Self {
        let mut by_role = BTreeMap::new();
        let mut occurrences = Vec::new();
        for role in roles {
            let demand = window.contained_in(&role.window);
            debug!(
                event = "role_demand",
                role = %role.id,
                name = %role.name,
                occurrence = role.occurrence,
                slots = demand.len(),
            );
            by_role.insert(role.id, demand);
            occurrences.extend(role.occurrences());
        }
        Self {
            by_role,
            occurrences,
        }
    }

    /// All seats, grouped by role in input order.
    pub fn occurrences(&self) -> &[RoleOccurrence] {
        &self.occurrences
    }

    /// Sorted slot indices the role needs, empty for unknown roles.
    pub fn role_demand(&self, role: RoleId) -> &[usize] {
        self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Demand of one seat; identical to its role's.
    pub fn demand(&self, occurrence: &RoleOccurrence) -> &[usize] {
        self.role_demand(occurrence.role)
    }

    pub fn is_demanded(&self, role: RoleId, slot: usize) -> bool {
        self.role_demand(role).binary_search(&slot).is_ok()
    }

    pub fn occurrence_index(&self, occurrence: &RoleOccurrence) -> Option<usize> {
        self.occurrences.iter().position(|o| o == occurrence)
    }

    /// Number of (seat, slot) pairs that need a volunteer.
    pub fn total_demand(&self) -> usize {
        self.occurrences
            .iter()
            .map(|occurrence| self.demand(occurrence).len())
            .sum()
    }
}
