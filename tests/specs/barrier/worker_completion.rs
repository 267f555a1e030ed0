//! Performers completing on runtime workers never land in the middle of a tick

use crate::prelude::*;
use serde_json::json;
use std::time::Duration;
use tollgate_barrier::{create_barrier, BarrierConfig, OutcomePredicates, Performer};
use tollgate_reactive::{batch, Effect};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn completion_waits_for_the_running_tick() {
    let backoff: Effect<(), (), ()> = Effect::new_async("backoff", |_| async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(())
    })
    .unwrap();
    let barrier = create_barrier(
        BarrierConfig::new()
            .named("rate-limit")
            .activate_on(OutcomePredicates::new().on_failure(|outcome| outcome.error["status"] == 429))
            .perform(Performer::effect(&backoff)),
    )
    .unwrap();
    let deactivated = counter(&barrier.deactivated());

    barrier.report_failure(json!("GET /items"), json!({ "status": 429 }));
    assert!(barrier.is_active());

    let (before, after) = batch(|| {
        let before = barrier.is_active();
        std::thread::sleep(Duration::from_millis(200));
        (before, barrier.is_active())
    });
    assert_eq!((before, after), (true, true));

    settle(&backoff).await;

    assert!(!barrier.is_active());
    assert_eq!(hits(&deactivated), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn match_during_a_slow_tick_still_starts_performers() {
    let refresh: Effect<(), (), ()> = Effect::new_async("refresh", |_| async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(())
    })
    .unwrap();
    let started = counter(&refresh.trigger().readonly());
    let barrier = create_barrier(
        BarrierConfig::new()
            .activate_on(OutcomePredicates::new().on_failure(|_| true))
            .perform(Performer::effect(&refresh)),
    )
    .unwrap();

    barrier.report_failure(json!(1), json!("expired"));
    batch(|| {
        std::thread::sleep(Duration::from_millis(50));
        barrier.report_failure(json!(2), json!("expired"));
    });
    settle(&refresh).await;

    // The second match ran before the first refresh could close the gate
    assert_eq!(hits(&started), 2);
    assert!(!barrier.is_active());
}
