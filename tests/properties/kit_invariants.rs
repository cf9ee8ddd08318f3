use std::collections::HashSet;
use std::convert::Infallible;

use proptest::prelude::*;

use super::common::{ALICE, BOB, Loadout, capture, kit_names, service};

const NAMES: [&str; 5] = ["a", "b", "c", "d", ""];

#[derive(Debug, Clone)]
enum Op {
    Save(usize, u8),
    Remove(usize),
    Apply(usize),
    List,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..NAMES.len(), any::<u8>()).prop_map(|(name, item)| Op::Save(name, item)),
        2 => (0..NAMES.len()).prop_map(Op::Remove),
        1 => (0..NAMES.len()).prop_map(Op::Apply),
        1 => Just(Op::List),
    ]
}

fn loadout(item: u8) -> Loadout {
    Loadout {
        items: vec![format!("item-{item}")],
    }
}

proptest! {
    // =========================================================================
    // Store Invariants
    // =========================================================================

    #[test]
    fn test_kits_follow_list_model(
        ops in prop::collection::vec(arb_op(), 0..60),
        limit in 0usize..5,
    ) {
        let (mut service, _clock) = service(0, limit);
        let mut model: Vec<&str> = Vec::new();

        for op in ops {
            match op {
                Op::Save(index, item) => {
                    let name = NAMES[index];
                    let saved = service.save(ALICE, name, capture(loadout(item))).unwrap();
                    if !name.is_empty() {
                        model.retain(|existing| *existing != name);
                        if model.len() < limit {
                            model.push(name);
                        }
                    }
                    prop_assert_eq!(saved, model.last() == Some(&name) && !name.is_empty());
                }
                Op::Remove(index) => {
                    let name = NAMES[index];
                    let existed = model.contains(&name);
                    model.retain(|existing| *existing != name);
                    prop_assert_eq!(service.remove(ALICE, name), existed);
                }
                Op::Apply(index) => {
                    let name = NAMES[index];
                    let applied = service
                        .apply(ALICE, name, |_, _| Ok::<_, Infallible>(()))
                        .unwrap();
                    prop_assert_eq!(applied, model.contains(&name));
                }
                Op::List => {
                    prop_assert_eq!(service.list(ALICE), model.len());
                }
            }

            let names = kit_names(&service, ALICE);
            prop_assert_eq!(&names, &model);
            prop_assert!(names.len() <= limit);
            let unique: HashSet<_> = names.iter().collect();
            prop_assert_eq!(unique.len(), names.len());
        }
    }

    #[test]
    fn test_new_name_at_limit_is_rejected(limit in 1usize..6) {
        let (mut service, _clock) = service(0, limit);
        for index in 0..limit {
            service.save(ALICE, &format!("kit-{index}"), capture(loadout(0))).unwrap();
        }
        let before = kit_names(&service, ALICE);

        prop_assert!(!service.save(ALICE, "fresh", capture(loadout(1))).unwrap());
        prop_assert_eq!(kit_names(&service, ALICE), before);
    }

    #[test]
    fn test_remove_is_idempotent(
        saved in prop::collection::hash_set("[a-z]{1,6}", 0..6),
        target in "[a-z]{1,6}",
    ) {
        let (mut service, _clock) = service(0, 10);
        for name in &saved {
            service.save(ALICE, name, capture(loadout(0))).unwrap();
        }

        let first = service.remove(ALICE, &target);
        let after_first = kit_names(&service, ALICE);
        prop_assert_eq!(first, saved.contains(&target));
        prop_assert!(!service.remove(ALICE, &target));
        prop_assert_eq!(kit_names(&service, ALICE), after_first);
    }

    #[test]
    fn test_saved_payload_is_applied(name in "[a-z]{1,12}", item in any::<u8>()) {
        let (mut service, _clock) = service(0, 5);
        service.save(BOB, &name, capture(loadout(item))).unwrap();

        let mut received = None;
        service
            .apply(BOB, &name, |_, kit| {
                received = Some(kit.payload().clone());
                Ok::<_, Infallible>(())
            })
            .unwrap();
        prop_assert_eq!(received, Some(loadout(item)));
    }
}
