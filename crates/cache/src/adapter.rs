// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The uniform cache adapter shape

use crate::error::CacheError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tollgate_reactive::{Effect, Event};

/// Key of a cached value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(pub String);

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CacheKey {
    fn from(s: String) -> Self {
        CacheKey(s)
    }
}

impl From<&str> for CacheKey {
    fn from(s: &str) -> Self {
        CacheKey(s.to_string())
    }
}

/// A value read back from a cache, with the time it was stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedEntry {
    pub value: Value,
    /// Milliseconds since the Unix epoch
    pub cached_at: u64,
}

impl CachedEntry {
    pub fn new(value: Value, cached_at: u64) -> Self {
        Self { value, cached_at }
    }
}

/// Parameters of a cache write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetParams {
    pub key: CacheKey,
    pub value: Value,
}

impl SetParams {
    pub fn new(key: impl Into<CacheKey>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Cache operations as effects, plus a purge trigger
#[derive(Clone, Debug)]
pub struct CacheAdapter {
    pub get: Effect<CacheKey, Option<CachedEntry>, CacheError>,
    pub set: Effect<SetParams, (), CacheError>,
    pub unset: Effect<CacheKey, (), CacheError>,
    /// Emitting purges the whole cache
    pub purge: Event<()>,
    pub(crate) purge_fx: Effect<(), (), CacheError>,
}

impl CacheAdapter {
    /// The effect behind `purge`, e.g. to use it as a barrier performer
    pub fn purge_effect(&self) -> Effect<(), (), CacheError> {
        self.purge_fx.clone()
    }
}
