use std::convert::Infallible;

use proptest::prelude::*;

use autokit::{CooldownStatus, CooldownTracker, Notice, UserId};

use super::common::{ALICE, Loadout, START, capture, service};

proptest! {
    #[test]
    fn test_remaining_strictly_decreases_within_window(
        cooldown in 2u64..120,
        steps in prop::collection::vec(1i64..10, 1..20),
    ) {
        let (mut service, clock) = service(cooldown, 5);
        service.save(ALICE, "a", capture(Loadout::of(&["axe"]))).unwrap();

        let mut previous = cooldown;
        let mut elapsed = 0i64;
        for step in steps {
            elapsed += step;
            clock.advance(step);
            let applied = service
                .apply(ALICE, "a", |_, _| Ok::<_, Infallible>(()))
                .unwrap();

            if u64::try_from(elapsed).unwrap() >= cooldown {
                prop_assert!(applied);
                break;
            }
            prop_assert!(!applied);
            match service.sink().last() {
                Some(Notice::CoolDown { remaining_seconds }) => {
                    prop_assert!(*remaining_seconds < previous);
                    prop_assert_eq!(*remaining_seconds, cooldown - u64::try_from(elapsed).unwrap());
                    previous = *remaining_seconds;
                }
                other => prop_assert!(false, "expected a cooldown notice, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_remaining_never_exceeds_cooldown(
        last in -1_000_000i64..1_000_000,
        now in -1_000_000i64..1_000_000,
        cooldown in 0u64..10_000,
    ) {
        let mut tracker = CooldownTracker::new();
        let user = UserId::new(9);
        tracker.record(user, last);

        let status = tracker.peek(user, now, cooldown);
        prop_assert!(status.remaining_seconds() <= cooldown);
        if now >= last && u64::try_from(now - last).unwrap() >= cooldown {
            prop_assert_eq!(status, CooldownStatus::Ready);
        }
        prop_assert_eq!(tracker.last_action(user), Some(last));
    }

    #[test]
    fn test_peek_agrees_with_check(offset in 0i64..30, cooldown in 0u64..30) {
        let mut tracker = CooldownTracker::new();
        tracker.record(ALICE, START);

        let peeked = tracker.peek(ALICE, START + offset, cooldown);
        let checked = tracker.check(ALICE, START + offset, cooldown);
        prop_assert_eq!(peeked, checked);

        let expected_stamp = if checked.is_active() { START } else { START + offset };
        prop_assert_eq!(tracker.last_action(ALICE), Some(expected_stamp));
    }
}
