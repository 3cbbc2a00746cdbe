//! Tests for intervals and the slot grid.

use super::*;
use chrono::NaiveDate;

fn at(hour: u32, minute: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn iv(from: (u32, u32), to: (u32, u32)) -> Interval {
    Interval::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
}

#[test]
fn test_new_rejects_empty_and_inverted() {
    assert_eq!(
        Interval::new(at(9, 0), at(9, 0)),
        Err(RosterError::InvalidInterval {
            start: at(9, 0),
            end: at(9, 0)
        })
    );
    assert!(Interval::new(at(10, 0), at(9, 0)).is_err());
}

#[test]
fn test_ordering_by_start_then_end() {
    let mut intervals = vec![iv((9, 0), (11, 0)), iv((8, 0), (12, 0)), iv((9, 0), (10, 0))];
    intervals.sort();
    assert_eq!(
        intervals,
        vec![iv((8, 0), (12, 0)), iv((9, 0), (10, 0)), iv((9, 0), (11, 0))]
    );
}

#[test]
fn test_contains() {
    let outer = iv((8, 0), (12, 0));
    assert!(outer.contains(&iv((8, 0), (8, 30))));
    assert!(outer.contains(&iv((11, 30), (12, 0))));
    assert!(outer.contains(&outer));
    assert!(!outer.contains(&iv((7, 30), (8, 30))));
    assert!(!outer.contains(&iv((11, 30), (12, 30))));
}

#[test]
fn test_intersection() {
    let a = iv((8, 0), (11, 0));
    let b = iv((10, 0), (12, 0));
    assert_eq!(a.intersection(&b), Some(iv((10, 0), (11, 0))));
    assert_eq!(a.intersection(&iv((11, 0), (12, 0))), None);
}

#[test]
fn test_merge_runs_fuses_adjacent() {
    let merged = Interval::merge_runs(vec![iv((8, 0), (9, 0)), iv((9, 0), (10, 0))]);
    assert_eq!(merged, vec![iv((8, 0), (10, 0))]);
}

#[test]
fn test_merge_runs_keeps_gaps_and_swallows_nested() {
    let merged = Interval::merge_runs(vec![
        iv((14, 0), (15, 0)),
        iv((8, 0), (10, 0)),
        iv((8, 30), (9, 0)),
        iv((9, 30), (11, 0)),
    ]);
    assert_eq!(merged, vec![iv((8, 0), (11, 0)), iv((14, 0), (15, 0))]);
}

#[test]
fn test_merge_runs_is_idempotent_and_order_independent() {
    let input = vec![
        iv((12, 0), (13, 0)),
        iv((8, 0), (9, 0)),
        iv((8, 30), (10, 0)),
        iv((13, 0), (13, 30)),
    ];
    let once = Interval::merge_runs(input.clone());
    let twice = Interval::merge_runs(once.clone());
    assert_eq!(once, twice);

    let mut reversed = input;
    reversed.reverse();
    assert_eq!(Interval::merge_runs(reversed), once);
}

#[test]
fn test_merge_runs_empty() {
    assert!(Interval::merge_runs(Vec::new()).is_empty());
}

#[test]
fn test_tile_two_hours_over_a_day() {
    let tiles = Interval::tile(Duration::hours(2), at(8, 0), at(18, 0)).unwrap();
    assert_eq!(tiles.len(), 5);
    assert_eq!(tiles[0], iv((8, 0), (10, 0)));
    assert_eq!(tiles[4], iv((16, 0), (18, 0)));
    for pair in tiles.windows(2) {
        assert!(pair[0].precedes(&pair[1]));
    }
}

#[test]
fn test_tile_truncates_last_tile() {
    let tiles = Interval::tile(Duration::minutes(45), at(8, 0), at(9, 0)).unwrap();
    assert_eq!(tiles, vec![iv((8, 0), (8, 45)), iv((8, 45), (9, 0))]);
}

#[test]
fn test_tile_empty_window_and_bad_duration() {
    assert!(Interval::tile(Duration::minutes(30), at(9, 0), at(9, 0))
        .unwrap()
        .is_empty());
    assert_eq!(
        Interval::tile(Duration::zero(), at(8, 0), at(9, 0)),
        Err(RosterError::InvalidDuration(0))
    );
}

#[test]
fn test_display_and_parse() {
    let slot = iv((8, 0), (8, 30));
    let text = slot.to_string();
    assert_eq!(text, "2025-06-01T08:00:00_2025-06-01T08:30:00");
    assert_eq!(text.parse::<Interval>(), Ok(slot));
    assert!("2025-06-01T08:00:00".parse::<Interval>().is_err());
    assert!("2025-06-01T09:00:00_2025-06-01T08:00:00"
        .parse::<Interval>()
        .is_err());
}

#[test]
fn test_window_lookup_and_coverage() {
    let window = ScheduleWindow::tile(Duration::minutes(30), at(8, 0), at(10, 0)).unwrap();
    assert_eq!(window.len(), 4);
    assert_eq!(window.index_of(&iv((9, 0), (9, 30))), Some(2));
    assert_eq!(window.index_of(&iv((9, 0), (10, 0))), None);
    assert_eq!(window.contained_in(&iv((8, 30), (9, 30))), vec![1, 2]);
    assert_eq!(
        window.covered_by(&[iv((8, 0), (8, 30)), iv((9, 30), (10, 0))]),
        vec![0, 3]
    );
    assert_eq!(window.span(), Some(iv((8, 0), (10, 0))));
}

#[test]
fn test_window_from_slots_sorts_and_dedups() {
    let window = ScheduleWindow::from_slots(vec![
        iv((9, 0), (9, 30)),
        iv((8, 0), (8, 30)),
        iv((9, 0), (9, 30)),
    ])
    .unwrap();
    assert_eq!(window.slots(), &[iv((8, 0), (8, 30)), iv((9, 0), (9, 30))]);
}

#[test]
fn test_window_rejects_overlapping_slots() {
    let result = ScheduleWindow::from_slots(vec![
        iv((9, 0), (10, 0)),
        iv((8, 0), (9, 0)),
        iv((9, 30), (10, 30)),
    ]);
    assert_eq!(
        result,
        Err(RosterError::OverlappingSlots {
            first: iv((9, 0), (10, 0)),
            second: iv((9, 30), (10, 30)),
        })
    );

    // A long slot swallowing later ones is caught at its neighbor.
    let nested = ScheduleWindow::from_slots(vec![
        iv((8, 0), (12, 0)),
        iv((10, 0), (11, 0)),
        iv((9, 0), (10, 0)),
    ]);
    assert!(matches!(nested, Err(RosterError::OverlappingSlots { .. })));

    // Touching slots share no instant.
    assert!(ScheduleWindow::from_slots(vec![iv((8, 0), (9, 0)), iv((9, 0), (10, 0))]).is_ok());
}

#[cfg(feature = "serde")]
#[test]
fn test_window_deserialization_rejects_overlaps() {
    let slots = vec![iv((8, 0), (9, 0)), iv((9, 0), (10, 0))];
    let json = serde_json::to_string(&slots).unwrap();
    let window: ScheduleWindow = serde_json::from_str(&json).unwrap();
    assert_eq!(window.slots(), slots.as_slice());

    let overlapping = serde_json::to_string(&vec![iv((8, 0), (9, 0)), iv((8, 30), (9, 30))]).unwrap();
    let err = serde_json::from_str::<ScheduleWindow>(&overlapping).unwrap_err();
    assert!(err.to_string().contains("Overlapping slots"));
}
