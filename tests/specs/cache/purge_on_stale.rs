//! A stale response purges the cache; the barrier stays open until the purge settles.

use crate::prelude::*;
use serde_json::json;
use tollgate_barrier::{create_barrier, BarrierConfig, OutcomePredicates, Performer};
use tollgate_cache::{external_cache, CacheKey, CacheObservability, MemoryCache, SetParams};
use tollgate_reactive::Event;

#[tokio::test]
async fn stale_result_purges_cache_before_reopening() {
    let memory = MemoryCache::new();
    let miss: Event<CacheKey> = Event::named("cache.miss");
    let misses = counter(&miss.to_void().readonly());
    let cache = external_cache(memory.clone(), CacheObservability::new().with_miss(miss)).unwrap();
    for key in ["a", "b"] {
        cache.set.run(SetParams::new(key, json!(key))).await.unwrap();
    }

    let barrier = create_barrier(
        BarrierConfig::new()
            .named("staleness")
            .activate_on(OutcomePredicates::new().on_success(|outcome| outcome.result["stale"] == true))
            .perform(Performer::effect(&cache.purge_effect())),
    )
    .unwrap();

    barrier.report_done(json!({ "page": 1 }), json!({ "stale": false }));
    assert!(!barrier.is_active());

    barrier.report_done(json!({ "page": 1 }), json!({ "stale": true }));
    assert!(barrier.is_active());
    assert_eq!(cache.purge_effect().in_flight(), 1);

    settle(&cache.purge_effect()).await;

    assert!(!barrier.is_active());
    assert!(memory.is_empty());
    assert_eq!(cache.get.run(CacheKey::from("a")).await, Ok(None));
    assert_eq!(hits(&misses), 1);
}
