//! Half-open time intervals and the global slot grid.
//!
//! An [`Interval`] is `[start, end)`. Intervals order by start, then by end,
//! which is also the chronological order of the slots of a
//! [`ScheduleWindow`].

mod window;

use std::fmt;
use std::str::FromStr;

use chrono::Duration;

use crate::error::{Result, RosterError};
use crate::Timestamp;

pub use window::ScheduleWindow;

/// Textual timestamp layout used by `Display`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Immutable half-open time range `[start, end)`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rosterforge_core::Interval;
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let morning = Interval::new(
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(12, 0, 0).unwrap(),
/// ).unwrap();
/// let slot = Interval::new(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(9, 30, 0).unwrap(),
/// ).unwrap();
///
/// assert!(morning.contains(&slot));
/// assert!(!slot.contains(&morning));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "IntervalRepr", into = "IntervalRepr")
)]
pub struct Interval {
    start: Timestamp,
    end: Timestamp,
}

impl Interval {
    /// Creates an interval, rejecting `end <= start`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self> {
        if end <= start {
            return Err(RosterError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if `other` lies entirely inside this interval.
    #[inline]
    pub fn contains(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Returns true if the two intervals share at least one instant.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `other` starts exactly where this interval ends.
    #[inline]
    pub fn precedes(&self, other: &Interval) -> bool {
        self.end == other.start
    }

    /// Returns the overlapping part of two intervals, if any.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Interval { start, end })
    }

    /// Sorts the intervals and fuses every interval starting at or before the
    /// end of the previous merged one.
    ///
    /// The output is a minimal, sorted, disjoint cover of the input and does
    /// not depend on input order.
    pub fn merge_runs<I>(intervals: I) -> Vec<Interval>
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut sorted: Vec<Interval> = intervals.into_iter().collect();
        sorted.sort_unstable();

        let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
        for interval in sorted {
            match merged.last_mut() {
                Some(last) if interval.start <= last.end => {
                    last.end = last.end.max(interval.end);
                }
                _ => merged.push(interval),
            }
        }
        merged
    }

    /// Cuts `[window_start, window_end)` into consecutive intervals of
    /// `duration`.
    ///
    /// The last interval is truncated to `window_end` when the grid does not
    /// divide the window evenly. An empty or inverted window yields no
    /// intervals.
    pub fn tile(
        duration: Duration,
        window_start: Timestamp,
        window_end: Timestamp,
    ) -> Result<Vec<Interval>> {
        if duration <= Duration::zero() {
            return Err(RosterError::InvalidDuration(duration.num_seconds()));
        }

        let mut tiles = Vec::new();
        let mut current = window_start;
        while current < window_end {
            let next = current.checked_add_signed(duration).unwrap_or(window_end);
            let end = next.min(window_end);
            tiles.push(Interval {
                start: current,
                end,
            });
            current = end;
        }
        Ok(tiles)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}",
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT)
        )
    }
}

impl FromStr for Interval {
    type Err = RosterError;

    /// Parses the `start_end` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('_')
            .ok_or_else(|| RosterError::ParseInterval(s.to_string()))?;
        let start: Timestamp = start
            .trim()
            .parse()
            .map_err(|_| RosterError::ParseInterval(s.to_string()))?;
        let end: Timestamp = end
            .trim()
            .parse()
            .map_err(|_| RosterError::ParseInterval(s.to_string()))?;
        Interval::new(start, end)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct IntervalRepr {
    start: Timestamp,
    end: Timestamp,
}

#[cfg(feature = "serde")]
impl TryFrom<IntervalRepr> for Interval {
    type Error = RosterError;

    fn try_from(repr: IntervalRepr) -> Result<Self> {
        Interval::new(repr.start, repr.end)
    }
}

#[cfg(feature = "serde")]
impl From<Interval> for IntervalRepr {
    fn from(interval: Interval) -> Self {
        Self {
            start: interval.start,
            end: interval.end,
        }
    }
}

#[cfg(test)]
mod tests;
