//! Ordering and composition properties of the event bus.

mod common;

use common::OrderLog;
use hookwire::{EventBus, Scope, map};
use proptest::prelude::*;

proptest! {
    #[test]
    fn trigger_runs_in_ascending_priority(priorities in proptest::collection::vec(-50i32..50, 1..24)) {
        let bus = EventBus::<i32>::new();
        let log = OrderLog::new();
        for (index, priority) in priorities.iter().enumerate() {
            bus.on("e", log.listener(format!("{priority}:{index}")), *priority);
        }
        bus.trigger("e", 0).unwrap();

        let mut expected: Vec<(i32, usize)> = priorities.iter().copied().zip(0..).collect();
        expected.sort();
        let expected: Vec<String> = expected.iter().map(|(p, i)| format!("{p}:{i}")).collect();
        prop_assert_eq!(log.entries(), expected);
    }

    #[test]
    fn equal_priorities_keep_registration_order(count in 1usize..32) {
        let bus = EventBus::<()>::new();
        let log = OrderLog::new();
        for index in 0..count {
            bus.on_default("e", log.listener(index.to_string()));
        }
        bus.trigger("e", ()).unwrap();
        let expected: Vec<String> = (0..count).map(|i| i.to_string()).collect();
        prop_assert_eq!(log.entries(), expected);
    }

    #[test]
    fn filter_without_listeners_is_identity(value in any::<i64>()) {
        let bus = EventBus::<i64>::new();
        prop_assert_eq!(bus.filter("nothing", value, &[]).unwrap(), value);
    }

    #[test]
    fn filter_composes_in_priority_order(
        steps in proptest::collection::vec((0i32..5, -100i64..100), 1..12),
        seed in -1000i64..1000,
    ) {
        let bus = EventBus::<i64>::new();
        for (priority, delta) in &steps {
            let delta = *delta;
            // Non-commutative step so the order is observable.
            bus.on("e", map(move |v: i64| v.wrapping_mul(3).wrapping_add(delta)), *priority);
        }

        let mut ordered: Vec<(i32, usize, i64)> = steps
            .iter()
            .enumerate()
            .map(|(i, (p, d))| (*p, i, *d))
            .collect();
        ordered.sort();
        let expected = ordered
            .iter()
            .fold(seed, |v, (_, _, d)| v.wrapping_mul(3).wrapping_add(*d));

        prop_assert_eq!(bus.filter("e", seed, &[]).unwrap(), expected);
    }
}

#[test]
fn removed_listener_never_fires_again() {
    let bus = EventBus::<()>::new();
    let log = OrderLog::new();
    let id = bus.on_default("save_post", log.listener("removed"));
    bus.on_default("save_post", log.listener("kept"));

    bus.off("save_post", id);
    bus.trigger("save_post", ()).unwrap();
    bus.trigger("save_post", ()).unwrap();
    assert_eq!(log.entries(), vec!["kept", "kept"]);
}

#[test]
fn clear_is_scoped_to_one_event() {
    let bus = EventBus::<()>::new();
    let log = OrderLog::new();
    bus.on_default("a", log.listener("a"));
    bus.on_default("b", log.listener("b"));

    bus.clear(Some("a"));
    bus.trigger("a", ()).unwrap();
    bus.trigger("b", ()).unwrap();
    assert_eq!(log.entries(), vec!["b"]);

    bus.clear(None);
    assert!(!bus.has_listeners("b"));
}

#[test]
fn theme_head_hook_is_scoped_by_post_type() {
    let bus = EventBus::<String>::new();
    let log = OrderLog::new();
    bus.on_default("theme_head", log.listener("everywhere"));
    bus.on_scoped(
        "theme_head",
        log.listener("portfolio-only"),
        Scope::new().with("post_type", "portfolio"),
        5,
    );

    let page = Scope::new().with("post_type", "page");
    bus.trigger_scoped("theme_head", String::new(), &page).unwrap();
    assert_eq!(log.entries(), vec!["everywhere"]);

    log.clear();
    let portfolio: Scope = [("post_type", "portfolio"), ("id", "12")].into_iter().collect();
    bus.trigger_scoped("theme_head", String::new(), &portfolio).unwrap();
    assert_eq!(log.entries(), vec!["portfolio-only", "everywhere"]);
}
