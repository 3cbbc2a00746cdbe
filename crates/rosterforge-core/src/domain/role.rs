//! Duty roles and their numbered seats.

use std::fmt;

use crate::interval::Interval;

/// Stable identity of a role, assigned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoleId(pub u64);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role#{}", self.0)
    }
}

/// A time-boxed duty with one or more identical parallel seats.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Time range during which the role needs staffing.
    pub window: Interval,
    /// Number of parallel seats, at least one.
    #[cfg_attr(feature = "serde", serde(default = "default_one"))]
    pub occurrence: usize,
    /// Objective priority of one covered slot of this role.
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: u32,
    /// Eligibility tag; `None` means any volunteer may take the role.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
}

#[cfg(feature = "serde")]
fn default_one() -> usize {
    1
}

#[cfg(feature = "serde")]
fn default_weight() -> u32 {
    1
}

impl Role {
    /// Creates a single-seat role of weight 1 with no category.
    pub fn new(id: RoleId, name: impl Into<String>, window: Interval) -> Self {
        Self {
            id,
            name: name.into(),
            window,
            occurrence: 1,
            weight: 1,
            category: None,
        }
    }

    /// Sets the number of parallel seats (clamped to at least one).
    pub fn with_occurrence(mut self, occurrence: usize) -> Self {
        self.occurrence = occurrence.max(1);
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Iterates the seats `(role, 0)..(role, occurrence - 1)`.
    pub fn occurrences(&self) -> impl Iterator<Item = RoleOccurrence> + '_ {
        (0..self.occurrence.max(1)).map(move |position| RoleOccurrence::new(self.id, position))
    }
}

/// One numbered seat of a role.
///
/// Seats of the same role are interchangeable except for strict friend
/// pairing, which pins the pair to positions 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleOccurrence {
    pub role: RoleId,
    pub position: usize,
}

impl RoleOccurrence {
    #[inline]
    pub fn new(role: RoleId, position: usize) -> Self {
        Self { role, position }
    }
}

impl fmt::Display for RoleOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.role, self.position)
    }
}
