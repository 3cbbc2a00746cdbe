//! Slot availability, category eligibility and friend pairing.

use std::collections::{BTreeSet, HashMap};

use rosterforge_core::{Interval, Role, ScheduleWindow, Volunteer, VolunteerId};
use tracing::debug;

/// Two volunteers whose friend links point at each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendPair {
    /// The member met first in volunteer order.
    pub first: VolunteerId,
    pub second: VolunteerId,
    /// Sorted slot indices covered by a declared interval both share.
    pub common_slots: Vec<usize>,
}

/// Returns true if `volunteer` may take `role`.
///
/// A volunteer without declared categories accepts every role; otherwise
/// the role must be uncategorized or carry one of the declared categories.
pub fn accepts_category(volunteer: &Volunteer, role: &Role) -> bool {
    if volunteer.categories.is_empty() {
        return true;
    }
    match &role.category {
        None => true,
        Some(category) => volunteer.categories.contains(category),
    }
}

/// Availability and friendship facts for every volunteer of a problem.
#[derive(Debug, Clone, Default)]
pub struct Eligibility {
    available: Vec<Vec<bool>>,
    pairs: Vec<FriendPair>,
}

impl Eligibility {
    pub fn resolve(volunteers: &[Volunteer], window: &ScheduleWindow) -> Self {
        let available = volunteers
            .iter()
            .map(|volunteer| {
                let mut mask = vec![false; window.len()];
                for slot in window.covered_by(&volunteer.availability) {
                    mask[slot] = true;
                }
                mask
            })
            .collect();

        Self {
            available,
            pairs: friend_pairs(volunteers, window),
        }
    }

    /// Returns true if the volunteer at `volunteer` (input index) can work
    /// slot `slot`.
    pub fn is_available(&self, volunteer: usize, slot: usize) -> bool {
        self.available
            .get(volunteer)
            .and_then(|mask| mask.get(slot))
            .copied()
            .unwrap_or(false)
    }

    /// Sorted slot indices the volunteer at `volunteer` can work.
    pub fn available_slots(&self, volunteer: usize) -> Vec<usize> {
        self.available
            .get(volunteer)
            .map(|mask| {
                mask.iter()
                    .enumerate()
                    .filter(|&(_, &free)| free)
                    .map(|(slot, _)| slot)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn friend_pairs(&self) -> &[FriendPair] {
        &self.pairs
    }
}

/// Collects mutual friend pairs in one pass, each volunteer in at most one.
///
/// One-sided links and links to unknown volunteers form no pair.
pub fn friend_pairs(volunteers: &[Volunteer], window: &ScheduleWindow) -> Vec<FriendPair> {
    let by_id: HashMap<VolunteerId, &Volunteer> =
        volunteers.iter().map(|volunteer| (volunteer.id, volunteer)).collect();

    let mut paired: BTreeSet<VolunteerId> = BTreeSet::new();
    let mut pairs = Vec::new();
    for volunteer in volunteers {
        if paired.contains(&volunteer.id) {
            continue;
        }
        let Some(friend_id) = volunteer.friend else {
            continue;
        };
        if friend_id == volunteer.id || paired.contains(&friend_id) {
            continue;
        }
        let Some(friend) = by_id.get(&friend_id) else {
            continue;
        };
        if friend.friend != Some(volunteer.id) {
            continue;
        }

        let common_slots = window.covered_by(&shared_intervals(volunteer, friend));
        debug!(
            event = "friend_pair",
            first = %volunteer.id,
            second = %friend.id,
            common_slots = common_slots.len(),
        );
        paired.insert(volunteer.id);
        paired.insert(friend.id);
        pairs.push(FriendPair {
            first: volunteer.id,
            second: friend.id,
            common_slots,
        });
    }
    pairs
}

/// Declared intervals present in both availability lists.
fn shared_intervals(a: &Volunteer, b: &Volunteer) -> Vec<Interval> {
    let theirs: BTreeSet<&Interval> = b.availability.iter().collect();
    a.availability
        .iter()
        .filter(|interval| theirs.contains(interval))
        .copied()
        .collect::<BTreeSet<Interval>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[path = "eligibility_tests.rs"]
mod tests;
