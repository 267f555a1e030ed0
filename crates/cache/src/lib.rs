// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Cache adapters built from external callbacks

pub mod adapter;
pub mod error;
pub mod external;
pub mod memory;
pub mod observability;
pub mod traced;

pub use adapter::{CacheAdapter, CacheKey, CachedEntry, SetParams};
pub use error::CacheError;
pub use external::{external_cache, ExternalCache};
pub use memory::MemoryCache;
pub use observability::CacheObservability;
pub use traced::TracedCache;
