//! A query failing with 401 holds the auth barrier open while the token is
//! refreshed into the cache; the retried query then succeeds.

use crate::prelude::*;
use serde_json::{json, Value};
use tollgate_barrier::{create_barrier, BarrierConfig, OutcomePredicates, RemoteOperation};
use tollgate_cache::{external_cache, CacheKey, CacheObservability, MemoryCache, SetParams};
use tollgate_reactive::Effect;

#[tokio::test]
async fn unauthorized_query_refreshes_token_then_closes_barrier() {
    let memory = MemoryCache::new();
    let cache = external_cache(memory.clone(), CacheObservability::new()).unwrap();

    let refresh_cache = cache.clone();
    let refresh: Effect<(), Value, Value> = Effect::new_async("auth.refresh", move |_| {
        let cache = refresh_cache.clone();
        async move {
            cache
                .set
                .run(SetParams::new("token", json!("fresh")))
                .await
                .map_err(|e| json!(e.to_string()))?;
            Ok(json!("fresh"))
        }
    })
    .unwrap();
    let refresh_op = RemoteOperation::from_effect("auth.refresh", &refresh);

    let barrier = create_barrier(
        BarrierConfig::new()
            .named("auth")
            .activate_on(OutcomePredicates::new().on_failure(|outcome| outcome.error["status"] == 401))
            .perform(&refresh_op),
    )
    .unwrap();
    let (activated, deactivated) = (counter(&barrier.activated()), counter(&barrier.deactivated()));

    let query_cache = cache.clone();
    let profile: Effect<(), Value, Value> = Effect::new_async("profile.fetch", move |_| {
        let cache = query_cache.clone();
        async move {
            match cache.get.run(CacheKey::from("token")).await {
                Ok(Some(entry)) if entry.value == "fresh" => Ok(json!({ "name": "ada" })),
                _ => Err(json!({ "status": 401 })),
            }
        }
    })
    .unwrap();
    let profile_op = RemoteOperation::from_effect("profile", &profile);
    let reporter = barrier.clone();
    profile_op.finished.failure.watch(move |failed| {
        reporter.report_failure(failed.params.clone(), failed.error.clone());
    });

    profile_op.start.emit(());
    settle(&profile).await;

    assert!(barrier.is_active());
    assert_eq!(refresh.in_flight(), 1);

    settle(&refresh).await;

    assert!(!barrier.is_active());
    assert_eq!((hits(&activated), hits(&deactivated)), (1, 1));
    assert!(memory.contains(&CacheKey::from("token")));

    let successes = counter(&profile_op.finished.success.to_void().readonly());
    profile_op.start.emit(());
    settle(&profile).await;

    assert_eq!(hits(&successes), 1);
    assert_eq!(hits(&activated), 1);
}
