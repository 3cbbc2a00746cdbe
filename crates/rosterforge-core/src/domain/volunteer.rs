//! Volunteer availability records.

use std::collections::BTreeSet;
use std::fmt;

use crate::interval::Interval;

/// Stable identity of a volunteer, assigned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VolunteerId(pub u64);

impl fmt::Display for VolunteerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "volunteer#{}", self.0)
    }
}

/// A volunteer's declared availability for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Volunteer {
    pub id: VolunteerId,
    pub name: String,
    /// Declared availability, in any order; may overlap.
    #[cfg_attr(feature = "serde", serde(default))]
    pub availability: Vec<Interval>,
    /// Role categories this volunteer accepts; empty accepts every category.
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: BTreeSet<String>,
    /// The volunteer this one asked to be scheduled with.
    #[cfg_attr(feature = "serde", serde(default))]
    pub friend: Option<VolunteerId>,
}

impl Volunteer {
    pub fn new(id: VolunteerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            availability: Vec::new(),
            categories: BTreeSet::new(),
            friend: None,
        }
    }

    pub fn with_availability(mut self, interval: Interval) -> Self {
        self.availability.push(interval);
        self
    }

    pub fn with_availabilities(mut self, intervals: impl IntoIterator<Item = Interval>) -> Self {
        self.availability.extend(intervals);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_friend(mut self, friend: VolunteerId) -> Self {
        self.friend = Some(friend);
        self
    }

    /// Returns true if a single declared interval covers all of `interval`.
    pub fn is_available_for(&self, interval: &Interval) -> bool {
        self.availability
            .iter()
            .any(|declared| declared.contains(interval))
    }

    /// Availability as a minimal sorted run list.
    pub fn availability_runs(&self) -> Vec<Interval> {
        Interval::merge_runs(self.availability.iter().copied())
    }
}
