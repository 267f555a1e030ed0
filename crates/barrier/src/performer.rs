// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Performers: work a barrier starts while it is active
//!
//! Whatever shape a performer arrives in, the barrier only ever needs a
//! `start` trigger and an `end` event firing once per start.

use crate::config::{OperationDone, OperationFailed};
use serde_json::Value;
use std::fmt;
use tollgate_reactive::{Effect, Event, ReadonlyStore, Store};

/// Which source variant a performer came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PerformerKind {
    Explicit,
    Effect,
    RemoteOperation,
}

impl fmt::Display for PerformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformerKind::Explicit => write!(f, "explicit"),
            PerformerKind::Effect => write!(f, "effect"),
            PerformerKind::RemoteOperation => write!(f, "remote-operation"),
        }
    }
}

/// A performer as supplied by the caller
#[derive(Clone, Debug)]
pub enum Performer {
    /// A start trigger and its completion event, used as-is
    Explicit { start: Event<()>, end: Event<()> },
    /// An effect: calling it starts the work, `done` ends it
    Effect { start: Event<()>, done: Event<()> },
    /// A remote operation: ends on `finished.success` or `finished.skip`
    RemoteOperation {
        start: Event<()>,
        success: Event<()>,
        skip: Event<()>,
    },
}

/// Canonical form the barrier wires against
#[derive(Clone, Debug)]
pub struct NormalizedPerformer {
    pub kind: PerformerKind,
    pub start: Event<()>,
    pub end: Event<()>,
}

impl Performer {
    pub fn explicit(start: Event<()>, end: Event<()>) -> Self {
        Performer::Explicit { start, end }
    }

    pub fn effect<D, E>(effect: &Effect<(), D, E>) -> Self
    where
        D: Clone + Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        Performer::Effect {
            start: effect.trigger(),
            done: effect.done().to_void(),
        }
    }

    pub fn remote_operation(operation: &RemoteOperation) -> Self {
        Performer::RemoteOperation {
            start: operation.start.clone(),
            success: operation.finished.success.to_void(),
            skip: operation.finished.skip.to_void(),
        }
    }

    pub fn kind(&self) -> PerformerKind {
        match self {
            Performer::Explicit { .. } => PerformerKind::Explicit,
            Performer::Effect { .. } => PerformerKind::Effect,
            Performer::RemoteOperation { .. } => PerformerKind::RemoteOperation,
        }
    }

    /// Convert to the canonical pair, wiring a fresh `end` for derived variants.
    ///
    /// The wiring is permanent.
    pub fn normalize(self) -> NormalizedPerformer {
        let kind = self.kind();
        match self {
            Performer::Explicit { start, end } => NormalizedPerformer { kind, start, end },
            Performer::Effect { start, done } => {
                let end = Event::named(format!("{}.end", start.name()));
                done.forward_to(&end);
                NormalizedPerformer { kind, start, end }
            }
            Performer::RemoteOperation {
                start,
                success,
                skip,
            } => {
                let end = Event::named(format!("{}.end", start.name()));
                success.forward_to(&end);
                skip.forward_to(&end);
                NormalizedPerformer { kind, start, end }
            }
        }
    }
}

impl<D, E> From<&Effect<(), D, E>> for Performer
where
    D: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn from(effect: &Effect<(), D, E>) -> Self {
        Performer::effect(effect)
    }
}

impl<D, E> From<Effect<(), D, E>> for Performer
where
    D: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn from(effect: Effect<(), D, E>) -> Self {
        Performer::effect(&effect)
    }
}

impl From<&RemoteOperation> for Performer {
    fn from(operation: &RemoteOperation) -> Self {
        Performer::remote_operation(operation)
    }
}

impl From<RemoteOperation> for Performer {
    fn from(operation: RemoteOperation) -> Self {
        Performer::remote_operation(&operation)
    }
}

/// Events fired when a remote operation finishes
#[derive(Clone, Debug)]
pub struct Finished {
    pub success: Event<OperationDone>,
    pub failure: Event<OperationFailed>,
    /// The operation was started while disabled and did nothing
    pub skip: Event<Value>,
}

/// A query- or mutation-like operation: a start trigger and finish events
#[derive(Clone, Debug)]
pub struct RemoteOperation {
    name: String,
    pub start: Event<()>,
    pub finished: Finished,
    enabled: Store<bool>,
}

impl RemoteOperation {
    /// Bare operation; the caller drives `finished` itself
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            start: Event::named(format!("{}.start", name)),
            finished: Finished {
                success: Event::named(format!("{}.finished.success", name)),
                failure: Event::named(format!("{}.finished.failure", name)),
                skip: Event::named(format!("{}.finished.skip", name)),
            },
            enabled: Store::named(format!("{}.$enabled", name), true),
            name,
        }
    }

    /// Operation whose work is `handler`.
    ///
    /// `start` calls the effect while enabled and fires `finished.skip`
    /// otherwise; settlements map onto `finished.success`/`finished.failure`.
    pub fn from_effect(name: impl Into<String>, handler: &Effect<(), Value, Value>) -> Self {
        let operation = Self::new(name);

        let (enabled, run, skip) = (
            operation.enabled.clone(),
            handler.trigger(),
            operation.finished.skip.clone(),
        );
        operation.start.watch(move |_| {
            if enabled.get() {
                run.emit(());
            } else {
                skip.emit(Value::Null);
            }
        });

        let success = operation.finished.success.clone();
        handler.done().watch(move |done| {
            success.emit(OperationDone {
                params: Value::Null,
                result: done.result.clone(),
            });
        });
        let failure = operation.finished.failure.clone();
        handler.fail().watch(move |fail| {
            failure.emit(OperationFailed {
                params: Value::Null,
                error: fail.error.clone(),
            });
        });

        operation
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self) -> ReadonlyStore<bool> {
        self.enabled.readonly()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }
}

#[cfg(test)]
#[path = "performer_tests.rs"]
mod tests;
