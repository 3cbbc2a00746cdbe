//! Checks shared by the end-to-end suites.

use std::collections::{BTreeMap, BTreeSet};

use rosterforge::prelude::*;
use rosterforge::DemandModel;

/// Exclusivity, availability and the exact demand partition.
pub fn assert_invariants(problem: &EventProblem, schedule: &Schedule) {
    let mut staffed: BTreeMap<(RoleOccurrence, Interval), VolunteerId> = BTreeMap::new();
    for (&id, duties) in schedule.assignment() {
        let volunteer = problem.volunteer(id).unwrap();
        for (slot, &occurrence) in duties {
            assert!(volunteer.is_available_for(slot), "{id} unavailable at {slot}");
            let previous = staffed.insert((occurrence, *slot), id);
            assert!(previous.is_none(), "{occurrence} at {slot} staffed twice");
        }
    }

    let demand = DemandModel::build(&problem.roles, &problem.window);
    for occurrence in demand.occurrences() {
        let needed: BTreeSet<Interval> = demand
            .demand(occurrence)
            .iter()
            .map(|&s| problem.window.slots()[s])
            .collect();
        let filled: BTreeSet<Interval> = schedule.filled_slots(occurrence).into_iter().collect();
        let missing = &schedule.missing()[occurrence];

        assert!(missing.windows(2).all(|pair| pair[0] < pair[1]));
        let missing: BTreeSet<Interval> = missing.iter().copied().collect();
        assert!(filled.is_disjoint(&missing));
        assert_eq!(&filled | &missing, needed, "{occurrence} does not partition its demand");
    }
}
