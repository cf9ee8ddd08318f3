//! E2E Scenario: the shared per-user cooldown window.

use std::convert::Infallible;

use autokit::test_utils::{KitHarness, Step};
use autokit::{CooldownStatus, Notice};

use super::common::{ALICE, BOB, Loadout, START, capture, service};

#[test]
fn test_denied_attempts_count_down_and_do_not_extend_window() {
    let (mut service, clock) = service(10, 5);
    service
        .save(ALICE, "raid", capture(Loadout::of(&["rifle"])))
        .unwrap();

    let mut remaining = Vec::new();
    for _ in 0..4 {
        clock.advance(2);
        let applied = service.apply(ALICE, "raid", |_, _| Ok::<_, Infallible>(()));
        assert_eq!(applied, Ok(false));
        if let Some(Notice::CoolDown { remaining_seconds }) = service.sink().last() {
            remaining.push(*remaining_seconds);
        }
    }
    assert_eq!(remaining, vec![8, 6, 4, 2]);
    assert_eq!(service.cooldowns().last_action(ALICE), Some(START));

    clock.advance(2);
    assert_eq!(
        service.apply(ALICE, "raid", |_, _| Ok::<_, Infallible>(())),
        Ok(true)
    );
    assert_eq!(service.cooldowns().last_action(ALICE), Some(START + 10));
}

#[test]
fn test_cooldown_is_shared_between_save_and_apply() {
    let (mut service, clock) = service(5, 5);
    service
        .save(ALICE, "a", capture(Loadout::of(&["axe"])))
        .unwrap();
    clock.advance(1);

    assert_eq!(
        service.save(ALICE, "b", capture(Loadout::of(&["bow"]))),
        Ok(false)
    );
    assert_eq!(
        service.cool_down_status(ALICE),
        CooldownStatus::Active {
            remaining_seconds: 4
        }
    );
    // another user is unaffected
    assert_eq!(service.cool_down_status(BOB), CooldownStatus::Ready);
}

#[test]
fn test_rejected_name_does_not_start_window() {
    let (mut service, _clock) = service(5, 5);
    assert_eq!(
        service.save(ALICE, "", capture(Loadout::of(&[]))),
        Ok(false)
    );
    assert_eq!(service.cool_down_status(ALICE), CooldownStatus::Ready);
    assert_eq!(
        service.save(ALICE, "a", capture(Loadout::of(&["axe"]))),
        Ok(true)
    );
}

#[test]
fn test_clock_going_backwards_never_exceeds_cooldown() {
    let (mut service, clock) = service(5, 5);
    service
        .save(ALICE, "a", capture(Loadout::of(&["axe"])))
        .unwrap();
    clock.set(START - 3_600);

    assert_eq!(
        service.cool_down_status(ALICE),
        CooldownStatus::Active {
            remaining_seconds: 5
        }
    );
}

#[test]
fn test_check_cool_down_reports_once_per_call() {
    let mut harness = KitHarness::new(3, 5);
    let notices = harness.run_all(&[
        Step::CheckCoolDown { user: ALICE },
        Step::CheckCoolDown { user: ALICE },
        Step::Wait { seconds: 3 },
        Step::CheckCoolDown { user: ALICE },
    ]);

    assert_eq!(harness.cool_down_calls(), &[false, true, false]);
    assert_eq!(
        notices,
        vec![Notice::CoolDown {
            remaining_seconds: 3
        }]
    );
}

#[test]
fn test_zero_cooldown_never_blocks() {
    let mut harness = KitHarness::new(0, 5);
    let notices = harness.run_all(&[
        Step::Save {
            user: ALICE,
            name: "a",
            payload: "1",
        },
        Step::Apply {
            user: ALICE,
            name: "a",
        },
        Step::Save {
            user: ALICE,
            name: "a",
            payload: "2",
        },
    ]);

    assert!(
        notices
            .iter()
            .all(|notice| !matches!(notice, Notice::CoolDown { .. }))
    );
    assert_eq!(harness.payload(ALICE, "a"), Some("2"));
}
