// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tollgate-reactive: push-based reactive dataflow
//!
//! This crate provides:
//! - `Event` - typed channels with synchronous, ordered fan-out
//! - `Store` - values with change notification
//! - `Effect` - sync or async work that settles into `done`/`fail`/`finally`
//! - Read-only projections and combinators (`combine_events`, `split_bool`)
//!
//! All propagation caused by one emission happens in a single tick before
//! `emit` returns; see [`batch`] to group several emissions into one tick.

pub mod combinators;
pub mod effect;
pub mod error;
pub mod event;
pub mod kernel;
pub mod readonly;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use combinators::{combine_events, split_bool};
pub use effect::{BoxFuture, Done, Effect, Fail, Settled};
pub use error::ReactiveError;
pub use event::Event;
pub use kernel::{batch, in_tick};
pub use readonly::{ReadonlyEvent, ReadonlyStore};
pub use store::Store;
