use super::*;
use rosterforge_core::RoleId;
use rosterforge_test::{friends, interval, role, volunteer, window};

#[test]
fn test_available_slots_need_a_covering_interval() {
    let window = window(8, 12, 60);
    let alice = volunteer(1, "Alice")
        .with_availability(interval(8, 9))
        .with_availability(interval(10, 12));
    let eligibility = Eligibility::resolve(&[alice], &window);

    assert_eq!(eligibility.available_slots(0), vec![0, 2, 3]);
    assert!(eligibility.is_available(0, 0));
    assert!(!eligibility.is_available(0, 1));
    assert!(!eligibility.is_available(1, 0));
}

#[test]
fn test_adjacent_intervals_do_not_cover_a_straddling_slot() {
    let window = window(8, 12, 120);
    let bob = volunteer(2, "Bob")
        .with_availability(interval(8, 9))
        .with_availability(interval(9, 10));
    let eligibility = Eligibility::resolve(&[bob], &window);

    assert!(eligibility.available_slots(0).is_empty());
}

#[test]
fn test_empty_categories_accept_everything() {
    let open = volunteer(1, "Alice");
    let cashier = volunteer(2, "Bob").with_category("cash");

    let plain = role(1, "Gate", 8, 10);
    let till = role(2, "Till", 8, 10).with_category("cash");
    let kitchen = role(3, "Kitchen", 8, 10).with_category("food");

    assert!(accepts_category(&open, &plain));
    assert!(accepts_category(&open, &till));
    assert!(accepts_category(&open, &kitchen));

    assert!(accepts_category(&cashier, &plain));
    assert!(accepts_category(&cashier, &till));
    assert!(!accepts_category(&cashier, &kitchen));
    assert_eq!(kitchen.id, RoleId(3));
}

#[test]
fn test_mutual_friends_pair_once() {
    let window = window(8, 12, 60);
    let (alice, bob) = friends(
        volunteer(1, "Alice").with_availability(interval(8, 12)),
        volunteer(2, "Bob").with_availability(interval(8, 12)),
    );
    let eligibility = Eligibility::resolve(&[alice, bob], &window);

    assert_eq!(
        eligibility.friend_pairs(),
        &[FriendPair {
            first: VolunteerId(1),
            second: VolunteerId(2),
            common_slots: vec![0, 1, 2, 3],
        }]
    );
}

#[test]
fn test_one_sided_link_forms_no_pair() {
    let window = window(8, 12, 60);
    let alice = volunteer(1, "Alice").with_friend(VolunteerId(2));
    let bob = volunteer(2, "Bob").with_friend(VolunteerId(3));
    let carol = volunteer(3, "Carol");
    let ghost = volunteer(4, "Dan").with_friend(VolunteerId(42));
    let selfish = volunteer(5, "Eve").with_friend(VolunteerId(5));

    let pairs = friend_pairs(&[alice, bob, carol, ghost, selfish], &window);
    assert!(pairs.is_empty());
}

#[test]
fn test_common_slots_use_identical_declared_intervals() {
    let window = window(8, 14, 60);
    let (alice, bob) = friends(
        volunteer(1, "Alice")
            .with_availability(interval(8, 10))
            .with_availability(interval(11, 14)),
        volunteer(2, "Bob")
            .with_availability(interval(8, 10))
            .with_availability(interval(11, 13)),
    );

    let pairs = friend_pairs(&[alice, bob], &window);
    assert_eq!(pairs.len(), 1);
    // Only 08-10 is declared by both.
    assert_eq!(pairs[0].common_slots, vec![0, 1]);
}
