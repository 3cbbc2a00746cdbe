//! The global slot grid of an event.

use chrono::Duration;

use super::Interval;
use crate::error::{Result, RosterError};
use crate::Timestamp;

/// Sorted, disjoint slots covering the whole event at a fixed granularity.
///
/// Slot indices (`usize`) are positions in [`ScheduleWindow::slots`] and are
/// the way the engine refers to slots internally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Interval>", into = "Vec<Interval>")
)]
pub struct ScheduleWindow {
    slots: Vec<Interval>,
}

impl ScheduleWindow {
    /// Tiles `[start, end)` into slots of `granularity`.
    pub fn tile(granularity: Duration, start: Timestamp, end: Timestamp) -> Result<Self> {
        Ok(Self {
            slots: Interval::tile(granularity, start, end)?,
        })
    }

    /// Builds a window from explicit slots, keeping them sorted and unique.
    ///
    /// Repeated slots collapse into one; distinct slots that share time are
    /// rejected with [`RosterError::OverlappingSlots`].
    pub fn from_slots(mut slots: Vec<Interval>) -> Result<Self> {
        slots.sort_unstable();
        slots.dedup();
        if let Some(pair) = slots.windows(2).find(|pair| pair[0].overlaps(&pair[1])) {
            return Err(RosterError::OverlappingSlots {
                first: pair[0],
                second: pair[1],
            });
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[Interval] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.slots.iter()
    }

    /// Returns the index of `slot` in the grid.
    pub fn index_of(&self, slot: &Interval) -> Option<usize> {
        self.slots.binary_search(slot).ok()
    }

    /// Indices of the slots fully contained in `interval`.
    pub fn contained_in(&self, interval: &Interval) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| interval.contains(slot))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Indices of the slots contained in at least one of `intervals`.
    pub fn covered_by(&self, intervals: &[Interval]) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| intervals.iter().any(|interval| interval.contains(slot)))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// The interval from the first slot start to the last slot end.
    pub fn span(&self) -> Option<Interval> {
        let first = self.slots.first()?;
        let last = self.slots.last()?;
        Some(Interval {
            start: first.start,
            end: last.end,
        })
    }
}

impl TryFrom<Vec<Interval>> for ScheduleWindow {
    type Error = RosterError;

    fn try_from(slots: Vec<Interval>) -> Result<Self> {
        Self::from_slots(slots)
    }
}

impl From<ScheduleWindow> for Vec<Interval> {
    fn from(window: ScheduleWindow) -> Self {
        window.slots
    }
}

impl<'a> IntoIterator for &'a ScheduleWindow {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
