// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced cache wrapper for consistent observability

use crate::adapter::{CacheKey, CachedEntry};
use crate::error::CacheError;
use crate::external::ExternalCache;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds tracing to any ExternalCache
#[derive(Clone)]
pub struct TracedCache<C> {
    inner: C,
}

impl<C> TracedCache<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: ExternalCache> ExternalCache for TracedCache<C> {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedEntry>, CacheError> {
        let span = tracing::info_span!("cache.get", key = %key);
        async {
            let start = Instant::now();
            let result = self.inner.get(key).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(Some(entry)) => {
                    tracing::debug!(cached_at = entry.cached_at, elapsed_ms, "entry found")
                }
                Ok(None) => tracing::debug!(elapsed_ms, "no entry"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "get failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn set(&self, key: &CacheKey, value: &Value) -> Result<(), CacheError> {
        let span = tracing::info_span!("cache.set", key = %key);
        async {
            let result = self.inner.set(key, value).await;
            match &result {
                Ok(()) => tracing::debug!("stored"),
                Err(e) => tracing::error!(error = %e, "set failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn unset(&self, key: &CacheKey) -> Result<(), CacheError> {
        let span = tracing::info_span!("cache.unset", key = %key);
        async {
            let result = self.inner.unset(key).await;
            match &result {
                Ok(()) => tracing::debug!("removed"),
                Err(e) => tracing::warn!(error = %e, "unset failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn purge(&self) -> Result<(), CacheError> {
        let span = tracing::info_span!("cache.purge");
        async {
            let result = self.inner.purge().await;
            match &result {
                Ok(()) => tracing::info!("purged"),
                Err(e) => tracing::error!(error = %e, "purge failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
