//! End-to-end scheduling scenarios.

mod common;

use rosterforge::prelude::*;
use rosterforge_test::{interval, on, role, span, volunteer, window};

use common::assert_invariants;

fn solve(problem: EventProblem) -> Schedule {
    let mut scheduler = Scheduler::new(problem.clone());
    let schedule = scheduler
        .solve()
        .unwrap()
        .schedule()
        .cloned()
        .expect("expected an optimal schedule");
    assert_invariants(&problem, &schedule);
    schedule
}

#[test]
fn test_available_volunteer_fills_every_slot() {
    let problem = EventProblem::new(
        window(8, 12, 60),
        vec![role(1, "Bar", 8, 12)],
        vec![volunteer(1, "Alice").with_availability(interval(8, 12))],
    );

    let schedule = solve(problem);
    let duties = &schedule.assignment()[&VolunteerId(1)];
    assert_eq!(duties.len(), 4);
    assert!(duties.values().all(|&seat| seat == RoleOccurrence::new(RoleId(1), 0)));
    assert_eq!(schedule.missing_count(), 0);
}

#[test]
fn test_partial_availability_leaves_chronological_gaps() {
    let problem = EventProblem::new(
        window(8, 12, 60),
        vec![role(1, "Bar", 8, 12)],
        vec![volunteer(1, "Alice").with_availability(interval(9, 11))],
    );

    let schedule = solve(problem);
    let duties = &schedule.assignment()[&VolunteerId(1)];
    assert_eq!(
        duties.keys().copied().collect::<Vec<_>>(),
        vec![interval(9, 10), interval(10, 11)]
    );
    assert_eq!(
        schedule.missing()[&RoleOccurrence::new(RoleId(1), 0)],
        vec![interval(8, 9), interval(11, 12)]
    );
}

#[test]
fn test_volunteer_holds_one_seat_per_slot() {
    let problem = EventProblem::new(
        window(8, 10, 60),
        vec![role(1, "Bar", 8, 10), role(2, "Gate", 8, 10)],
        vec![volunteer(1, "Alice").with_availability(interval(8, 10))],
    );

    let schedule = solve(problem);
    assert_eq!(schedule.filled_count(), 2);
    assert_eq!(schedule.missing_count(), 2);
}

#[test]
fn test_heavier_role_wins() {
    let problem = EventProblem::new(
        window(8, 10, 60),
        vec![
            role(1, "Bar", 8, 10),
            role(2, "First aid", 8, 10).with_weight(5),
        ],
        vec![volunteer(1, "Alice").with_availability(interval(8, 10))],
    );

    let schedule = solve(problem);
    let duties = &schedule.assignment()[&VolunteerId(1)];
    assert!(duties.values().all(|seat| seat.role == RoleId(2)));
    assert_eq!(
        schedule.missing()[&RoleOccurrence::new(RoleId(1), 0)],
        vec![interval(8, 9), interval(9, 10)]
    );
}

#[test]
fn test_volunteer_stays_on_one_seat() {
    let problem = EventProblem::new(
        window(8, 12, 60),
        vec![role(1, "Bar", 8, 12).with_occurrence(2)],
        vec![volunteer(1, "Alice").with_availability(interval(8, 12))],
    );

    let schedule = solve(problem);
    let runs = schedule.volunteer_runs(VolunteerId(1));
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].1, interval(8, 12));
    assert_eq!(schedule.missing_count(), 4);
}

#[test]
fn test_weightless_role_stays_empty() {
    let problem = EventProblem::new(
        window(8, 10, 60),
        vec![role(1, "Optional", 8, 10).with_weight(0)],
        vec![volunteer(1, "Alice").with_availability(interval(8, 10))],
    );

    let schedule = solve(problem);
    assert!(schedule.assignment().is_empty());
    assert_eq!(schedule.missing_count(), 2);
}

#[test]
fn test_role_outside_event_is_never_staffed() {
    let problem = EventProblem::new(
        window(8, 10, 60),
        vec![role(1, "Bar", 8, 10), role(2, "Night", 20, 22)],
        vec![
            volunteer(1, "Alice").with_availability(interval(8, 10)),
            volunteer(2, "Bob").with_availability(interval(8, 10)),
        ],
    );

    let schedule = solve(problem);
    assert!(schedule.missing()[&RoleOccurrence::new(RoleId(2), 0)].is_empty());
    assert!(schedule.filled_slots(&RoleOccurrence::new(RoleId(2), 0)).is_empty());
    assert_eq!(schedule.filled_count(), 2);
}

#[test]
fn test_two_day_event() {
    let slots = vec![
        span(on(0, 8, 0), on(0, 12, 0)),
        span(on(1, 8, 0), on(1, 12, 0)),
    ];
    let problem = EventProblem::new(
        ScheduleWindow::from_slots(slots.clone()).unwrap(),
        vec![Role::new(RoleId(1), "Bar", span(on(0, 0, 0), on(2, 0, 0))).with_weight(2)],
        vec![volunteer(1, "Alice").with_availability(span(on(1, 7, 0), on(1, 13, 0)))],
    );

    let schedule = solve(problem);
    assert_eq!(schedule.filled_slots(&RoleOccurrence::new(RoleId(1), 0)), vec![slots[1]]);
    assert_eq!(schedule.missing()[&RoleOccurrence::new(RoleId(1), 0)], vec![slots[0]]);
}

#[test]
fn test_several_volunteers_share_the_load() {
    let problem = EventProblem::new(
        window(8, 14, 120),
        vec![
            role(1, "Bar", 8, 14).with_occurrence(2).with_weight(2),
            role(2, "Gate", 10, 14).with_weight(2),
        ],
        vec![
            volunteer(1, "Alice").with_availability(interval(8, 12)),
            volunteer(2, "Bob").with_availability(interval(10, 14)),
            volunteer(3, "Carol").with_availability(interval(8, 10)),
        ],
    );

    let schedule = solve(problem);
    // Alice and Carol at 08-10, Alice and Bob at 10-12, Bob at 12-14.
    assert_eq!(schedule.filled_count(), 5);
    assert_eq!(schedule.missing_count(), 3);
}

#[test]
fn test_duplicate_role_ids_are_rejected() {
    let problem = EventProblem::new(
        window(8, 10, 60),
        vec![role(1, "Bar", 8, 10), role(1, "Gate", 8, 10)],
        vec![
            volunteer(1, "Alice").with_availability(interval(8, 10)),
            volunteer(2, "Bob").with_availability(interval(8, 10)),
        ],
    );

    let mut scheduler = Scheduler::new(problem);
    assert_eq!(scheduler.solve().unwrap_err(), RosterError::DuplicateRole(RoleId(1)));
    assert!(scheduler.result().is_none());
}

#[test]
fn test_duplicate_volunteer_ids_are_rejected() {
    let problem = EventProblem::new(
        window(8, 10, 60),
        vec![role(1, "Bar", 8, 10)],
        vec![
            volunteer(1, "Alice").with_availability(interval(8, 10)),
            volunteer(1, "Bob").with_availability(interval(8, 10)),
        ],
    );

    let mut scheduler = Scheduler::new(problem);
    assert!(matches!(
        scheduler.is_valid(),
        Err(RosterError::DuplicateVolunteer(VolunteerId(1)))
    ));
}
