//! Role and volunteer builders.

use rosterforge_core::{Role, RoleId, Volunteer, VolunteerId};

use crate::time::interval;

/// A single-seat role of weight 1 over whole hours of the first day.
pub fn role(id: u64, name: &str, start_hour: u32, end_hour: u32) -> Role {
    Role::new(RoleId(id), name, interval(start_hour, end_hour))
}

/// A volunteer with no availability, categories or friend.
pub fn volunteer(id: u64, name: &str) -> Volunteer {
    Volunteer::new(VolunteerId(id), name)
}

/// Links two volunteers to each other.
pub fn friends(a: Volunteer, b: Volunteer) -> (Volunteer, Volunteer) {
    let (a_id, b_id) = (a.id, b.id);
    (a.with_friend(b_id), b.with_friend(a_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friends_are_mutual() {
        let (alice, bob) = friends(volunteer(1, "Alice"), volunteer(2, "Bob"));
        assert_eq!(alice.friend, Some(bob.id));
        assert_eq!(bob.friend, Some(alice.id));
    }

    #[test]
    fn test_role_defaults() {
        let bar = role(3, "Bar", 8, 10);
        assert_eq!(bar.id, RoleId(3));
        assert_eq!(bar.occurrence, 1);
        assert_eq!(bar.weight, 1);
        assert!(bar.category.is_none());
    }
}
