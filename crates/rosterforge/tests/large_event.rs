//! A full festival day: ten volunteers, four two-seat roles, eight hours.

mod common;

use rosterforge::accepts_category;
use rosterforge::prelude::*;
use rosterforge_test::{friends, interval, role, volunteer, window};

use common::assert_invariants;

const ALICE: VolunteerId = VolunteerId(1);
const BOB: VolunteerId = VolunteerId(2);

fn festival() -> EventProblem {
    let (alice, bob) = friends(
        volunteer(1, "Alice").with_availability(interval(8, 12)),
        volunteer(2, "Bob").with_availability(interval(8, 14)),
    );
    EventProblem::new(
        window(8, 16, 60),
        vec![
            role(1, "Bar", 8, 16).with_occurrence(2).with_weight(2),
            role(2, "Gate", 8, 14).with_occurrence(2).with_weight(3),
            role(3, "Till", 10, 16)
                .with_occurrence(2)
                .with_weight(4)
                .with_category("cash"),
            role(4, "First aid", 8, 16)
                .with_occurrence(2)
                .with_weight(5)
                .with_category("medic"),
        ],
        vec![
            alice,
            bob,
            volunteer(3, "Carol")
                .with_availability(interval(8, 16))
                .with_category("cash"),
            volunteer(4, "Dave").with_availability(interval(12, 16)),
            volunteer(5, "Erin")
                .with_availability(interval(8, 10))
                .with_availability(interval(13, 16))
                .with_category("medic"),
            volunteer(6, "Frank").with_availability(interval(9, 15)),
            volunteer(7, "Grace")
                .with_availability(interval(8, 16))
                .with_category("medic")
                .with_category("cash"),
            volunteer(8, "Heidi").with_availability(interval(10, 12)),
            volunteer(9, "Ivan")
                .with_availability(interval(14, 16))
                .with_category("cash"),
            volunteer(10, "Judy").with_availability(interval(8, 13)),
        ],
    )
}

fn solve(mode: FriendMode) -> (EventProblem, Schedule) {
    let problem = festival();
    let config = SchedulerConfig::default().with_friend_mode(mode);
    let mut scheduler = Scheduler::new(problem.clone()).with_config(config);

    assert!(scheduler.is_valid().unwrap(), "{mode} solve not proven optimal");
    let schedule = scheduler
        .solve()
        .unwrap()
        .schedule()
        .cloned()
        .expect("expected an optimal schedule");
    assert_invariants(&problem, &schedule);
    assert_categories(&problem, &schedule);
    (problem, schedule)
}

fn assert_categories(problem: &EventProblem, schedule: &Schedule) {
    for (&id, duties) in schedule.assignment() {
        let volunteer = problem.volunteer(id).unwrap();
        for seat in duties.values() {
            let role = problem.role(seat.role).unwrap();
            assert!(accepts_category(volunteer, role), "{id} may not work {}", role.name);
        }
    }
}

fn seat_of(schedule: &Schedule, id: VolunteerId, slot: Interval) -> Option<RoleOccurrence> {
    schedule
        .assignment()
        .get(&id)
        .and_then(|duties| duties.get(&slot))
        .copied()
}

#[test]
fn test_strict_festival_is_optimal_and_keeps_the_pair_linked() {
    let (problem, schedule) = solve(FriendMode::Strict);
    assert!(schedule.filled_count() > 0);

    // Alice and Bob are both available 08-12.
    for hour in 8..12 {
        let slot = interval(hour, hour + 1);
        let alice = seat_of(&schedule, ALICE, slot);
        let bob = seat_of(&schedule, BOB, slot);
        for role in &problem.roles {
            if !role.window.contains(&slot) {
                continue;
            }
            let first = RoleOccurrence::new(role.id, 0);
            let second = RoleOccurrence::new(role.id, 1);
            assert_eq!(
                alice == Some(first),
                bob == Some(second),
                "pair split on {} at {slot}",
                role.name
            );
        }
    }
}

#[test]
fn test_at_best_festival_is_optimal() {
    let (_, schedule) = solve(FriendMode::AtBest);
    assert!(schedule.filled_count() > 0);
    assert_eq!(
        schedule.filled_count() + schedule.missing_count(),
        // Bar 8h, Gate 6h, Till 6h, First aid 8h; two seats each.
        2 * (8 + 6 + 6 + 8)
    );
}

#[test]
fn test_friend_modes_agree_on_the_demand() {
    let (_, none) = solve(FriendMode::None);
    let (_, strict) = solve(FriendMode::Strict);
    assert_eq!(
        none.filled_count() + none.missing_count(),
        strict.filled_count() + strict.missing_count()
    );
}
