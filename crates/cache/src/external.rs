// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter over a caller-supplied cache backend

use crate::adapter::{CacheAdapter, CacheKey, CachedEntry, SetParams};
use crate::error::CacheError;
use crate::observability::{attach_observability, CacheObservability};
use crate::traced::TracedCache;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tollgate_reactive::{Effect, Event, ReactiveError};

/// Callbacks of an external cache
#[async_trait]
pub trait ExternalCache: Send + Sync + 'static {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedEntry>, CacheError>;

    async fn set(&self, key: &CacheKey, value: &Value) -> Result<(), CacheError>;

    /// Remove one key. Backends without single-key removal can keep the no-op.
    async fn unset(&self, _key: &CacheKey) -> Result<(), CacheError> {
        Ok(())
    }

    async fn purge(&self) -> Result<(), CacheError>;
}

/// Wrap `backend` into a [`CacheAdapter`].
///
/// Every callback becomes an async effect on the current tokio runtime, so
/// this must be called from within one.
pub fn external_cache<C: ExternalCache>(
    backend: C,
    observability: CacheObservability,
) -> Result<CacheAdapter, ReactiveError> {
    let backend = Arc::new(TracedCache::new(backend));

    let get = {
        let backend = Arc::clone(&backend);
        Effect::new_async("cache.get", move |key: CacheKey| {
            let backend = Arc::clone(&backend);
            async move { backend.get(&key).await }
        })?
    };

    let set = {
        let backend = Arc::clone(&backend);
        Effect::new_async("cache.set", move |params: SetParams| {
            let backend = Arc::clone(&backend);
            async move { backend.set(&params.key, &params.value).await }
        })?
    };

    let unset = {
        let backend = Arc::clone(&backend);
        Effect::new_async("cache.unset", move |key: CacheKey| {
            let backend = Arc::clone(&backend);
            async move { backend.unset(&key).await }
        })?
    };

    let purge_fx = {
        let backend = Arc::clone(&backend);
        Effect::new_async("cache.purge", move |_: ()| {
            let backend = Arc::clone(&backend);
            async move { backend.purge().await }
        })?
    };
    let purge = Event::named("cache.purgeRequested");
    purge.forward_to(&purge_fx.trigger());

    let adapter = CacheAdapter {
        get,
        set,
        unset,
        purge,
        purge_fx,
    };
    attach_observability(&adapter, observability);

    Ok(adapter)
}

#[cfg(test)]
#[path = "external_tests.rs"]
mod tests;
