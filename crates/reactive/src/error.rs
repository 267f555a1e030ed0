// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for graph construction

use thiserror::Error;

/// Errors raised while building reactive nodes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReactiveError {
    #[error("effect {effect} requires a tokio runtime to be constructed")]
    NoRuntime { effect: String },
}
