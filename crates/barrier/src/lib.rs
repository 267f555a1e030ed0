// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tollgate-barrier: a reactive gate tied to asynchronous work
//!
//! A barrier derives one boolean `active` signal from either:
//! - a store the caller already owns,
//! - an activate/deactivate trigger pair, or
//! - predicates over reported operation outcomes, in which case matching
//!   outcomes start the configured performers and the barrier deactivates
//!   once they have all ended.
//!
//! `activated`/`deactivated` fire on each change of the signal.

pub mod activation;
pub mod barrier;
pub mod config;
pub mod error;
pub mod performer;

pub use activation::{ActivationShape, ActivationSource};
pub use barrier::{create_barrier, Barrier, BarrierInternals};
pub use config::{
    ActivateOn, BarrierConfig, FailurePredicate, OperationDone, OperationFailed,
    OutcomePredicates, ResolvedConfig, SuccessPredicate,
};
pub use error::BarrierError;
pub use performer::{Finished, NormalizedPerformer, Performer, PerformerKind, RemoteOperation};
