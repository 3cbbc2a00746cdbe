//! Timestamps on the fixture event day.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rosterforge_core::{Interval, ScheduleWindow};

/// `(year, month, day)` of the first event day.
pub const EVENT_DAY: (i32, u32, u32) = (2025, 6, 1);

/// `day` days after the first event day, at `hour:minute`.
pub fn on(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    let (year, month, first) = EVENT_DAY;
    NaiveDate::from_ymd_opt(year, month, first)
        .and_then(|date| date.checked_add_days(chrono::Days::new(u64::from(day))))
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_else(|| panic!("invalid fixture time: day {day} {hour}:{minute}"))
}

/// `hour:minute` on the first event day.
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    on(0, hour, minute)
}

/// `[start, end)` between two timestamps.
pub fn span(start: NaiveDateTime, end: NaiveDateTime) -> Interval {
    Interval::new(start, end).expect("fixture interval must not be empty")
}

/// Whole hours `[start_hour, end_hour)` on the first event day.
pub fn interval(start_hour: u32, end_hour: u32) -> Interval {
    span(at(start_hour, 0), at(end_hour, 0))
}

/// Slots of `minutes` between two hours of the first event day.
pub fn window(start_hour: u32, end_hour: u32, minutes: i64) -> ScheduleWindow {
    ScheduleWindow::tile(Duration::minutes(minutes), at(start_hour, 0), at(end_hour, 0))
        .expect("fixture granularity must be positive")
}
