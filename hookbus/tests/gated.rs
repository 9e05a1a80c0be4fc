//! Gated dispatch: sequential evaluation with short-circuit.

mod common;

use common::{Logout, Score};
use hookbus::listeners::TimeoutListener;
use hookbus::testing::{CallLog, FailingListener};
use hookbus::{EventBus, GateOutcome, ListenerError, ListenerExt, deferred};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_empty_chain_passes() {
    let bus = EventBus::new();
    assert!(bus.emit_with_check::<Score>(0, ()).await);
    assert!(bus.emit_with_check::<Score>(0, "anything").await);
}

#[tokio::test]
async fn test_all_truthy_passes() {
    let mut bus = EventBus::new();
    bus.on::<Score>(|n: u32| n > 0, ());
    bus.on::<Score>(|n: u32| (n % 2 == 0).then_some(true), ());
    bus.on::<Score>(deferred(|n: u32| async move { n < 100 }), ());
    bus.on::<Score>(|_: u32| Ok::<_, std::io::Error>(true), ());

    assert!(bus.emit_with_check::<Score>(42, ()).await);
}

#[tokio::test]
async fn test_first_falsy_listener_short_circuits() {
    for rejecting in 0..4 {
        let log = CallLog::new();
        let mut bus = EventBus::new();
        for i in 0..4 {
            bus.on::<Logout>(log.listener(&format!("l{i}"), i != rejecting), ());
        }

        let outcome = bus.check::<Logout>((), ()).await;
        assert!(matches!(outcome, GateOutcome::Rejected { index } if index == rejecting));

        let expected: Vec<String> = (0..=rejecting).map(|i| format!("l{i}")).collect();
        assert_eq!(log.entries(), expected);
    }
}

#[tokio::test]
async fn test_unit_and_none_are_falsy() {
    let mut bus = EventBus::new();
    bus.on::<Score>(|_: u32| (), "unit");
    bus.on::<Score>(|_: u32| None::<bool>, "none");
    bus.on::<Score>(|_: u32| Ok::<(), std::io::Error>(()), "ok-unit");

    assert!(!bus.emit_with_check::<Score>(1, "unit").await);
    assert!(!bus.emit_with_check::<Score>(1, "none").await);
    assert!(!bus.emit_with_check::<Score>(1, "ok-unit").await);
}

#[tokio::test]
async fn test_failures_collapse_to_false() {
    let failures = [
        FailingListener::error("invalid"),
        FailingListener::deferred_error("rejected remotely"),
        FailingListener::panicking("validator crashed"),
    ];

    for failing in failures {
        let log = CallLog::new();
        let mut bus = EventBus::new();
        bus.on::<Logout>(log.listener("first", true), ());
        bus.on::<Logout>(failing.clone(), ());
        bus.on::<Logout>(log.listener("never", true), ());

        assert!(!bus.emit_with_check::<Logout>((), ()).await, "{:?}", failing.mode());
        assert_eq!(log.entries(), vec!["first"]);
    }
}

#[tokio::test]
async fn test_failure_cause_is_reported() {
    let mut bus = EventBus::new();
    bus.on::<Logout>(FailingListener::panicking("validator crashed"), ());

    let outcome = bus.check::<Logout>((), ()).await;
    assert_eq!(outcome.halted_at(), Some(0));
    assert!(matches!(outcome.error(), Some(ListenerError::Panic(m)) if m == "validator crashed"));
}

#[tokio::test]
async fn test_deferred_listeners_run_sequentially() {
    let log = CallLog::new();
    let mut bus = EventBus::new();
    bus.on::<Logout>(
        log.deferred_listener("slow", true, || tokio::time::sleep(Duration::from_millis(30))),
        (),
    );
    bus.on::<Logout>(log.listener("fast", true), ());

    assert!(bus.emit_with_check::<Logout>((), ()).await);
    assert_eq!(log.entries(), vec!["slow", "fast"]);
}

#[tokio::test]
async fn test_timeout_listener_halts_chain() {
    let log = CallLog::new();
    let mut bus = EventBus::new();
    bus.on::<Logout>(
        TimeoutListener::millis(
            log.deferred_listener("hung", true, || tokio::time::sleep(Duration::from_secs(5))),
            10,
        ),
        (),
    );
    bus.on::<Logout>(log.listener("never", true), ());

    let outcome = bus.check::<Logout>((), ()).await;
    assert!(matches!(
        outcome.error(),
        Some(ListenerError::Timeout(d)) if *d == Duration::from_millis(10)
    ));
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn test_listener_ext_combinators() {
    let mut bus = EventBus::new();
    bus.on::<Score>((|n: u32| n % 2 == 0).when(|n: &u32| *n > 10), ());
    bus.on::<Score>(
        deferred(|n: u32| async move { n != 13 }).with_timeout(Duration::from_secs(1)),
        (),
    );

    // Below the threshold the parity check is skipped.
    assert!(bus.emit_with_check::<Score>(3, ()).await);
    assert!(bus.emit_with_check::<Score>(12, ()).await);
    assert!(!bus.emit_with_check::<Score>(11, ()).await);
    assert!(!bus.emit_with_check::<Score>(13, ()).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_gate_runs_from_spawned_task() {
    let mut bus = EventBus::new();
    bus.on::<Score>(
        deferred(|n: u32| async move {
            tokio::task::yield_now().await;
            n > 5
        }),
        (),
    );
    let bus = Arc::new(bus);

    let handles: Vec<_> = (0..8u32)
        .map(|n| {
            let bus = bus.clone();
            tokio::spawn(async move { bus.emit_with_check::<Score>(n, ()).await })
        })
        .collect();

    let mut passed = 0;
    for handle in handles {
        if handle.await.unwrap() {
            passed += 1;
        }
    }
    assert_eq!(passed, 2);
}
