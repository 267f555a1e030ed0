// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hit/miss notifications for cache lookups

use crate::adapter::{CacheAdapter, CacheKey};
use tollgate_reactive::Event;

/// Events fired after cache lookups. Both are optional.
#[derive(Clone, Debug, Default)]
pub struct CacheObservability {
    /// Fires with the key when a lookup returned an entry
    pub hit: Option<Event<CacheKey>>,
    /// Fires with the key when a lookup returned nothing
    pub miss: Option<Event<CacheKey>>,
}

impl CacheObservability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit(mut self, hit: Event<CacheKey>) -> Self {
        self.hit = Some(hit);
        self
    }

    pub fn with_miss(mut self, miss: Event<CacheKey>) -> Self {
        self.miss = Some(miss);
        self
    }
}

/// Route successful lookups of `adapter` to the configured events.
///
/// Failed lookups are neither hits nor misses.
pub(crate) fn attach_observability(adapter: &CacheAdapter, observability: CacheObservability) {
    let CacheObservability { hit, miss } = observability;
    if hit.is_none() && miss.is_none() {
        return;
    }

    adapter.get.done().watch(move |done| {
        let target = if done.result.is_some() { &hit } else { &miss };
        if let Some(event) = target {
            event.emit(done.params.clone());
        }
    });
}
