// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for barrier construction

use thiserror::Error;

/// Errors raised by [`create_barrier`](crate::create_barrier)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BarrierError {
    /// None of the accepted activation shapes matched the configuration
    #[error("invalid configuration of create_barrier")]
    InvalidConfiguration,
}
