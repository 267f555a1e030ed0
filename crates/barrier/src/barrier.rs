// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Barrier construction and gate dispatch

use crate::activation::ActivationShape;
use crate::config::{BarrierConfig, OperationDone, OperationFailed, ResolvedConfig};
use crate::error::BarrierError;
use crate::performer::{NormalizedPerformer, Performer};
use serde_json::Value;
use tollgate_reactive::{split_bool, Event, ReadonlyEvent, ReadonlyStore};

/// Channels used to wire a barrier to operations.
///
/// Not covered by any stability promise.
#[derive(Clone, Debug)]
pub struct BarrierInternals {
    /// Pulse asking the barrier to start its performers
    pub touch: Event<()>,
    pub operation_failed: Event<OperationFailed>,
    pub operation_done: Event<OperationDone>,
}

impl BarrierInternals {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            touch: Event::named(format!("{}.touch", name)),
            operation_failed: Event::named(format!("{}.operationFailed", name)),
            operation_done: Event::named(format!("{}.operationDone", name)),
        }
    }
}

/// A derived boolean gate and the notifications around it
#[derive(Clone, Debug)]
pub struct Barrier {
    name: String,
    shape: ActivationShape,
    active: ReadonlyStore<bool>,
    activated: ReadonlyEvent<()>,
    deactivated: ReadonlyEvent<()>,
    performers: usize,
    internals: BarrierInternals,
}

impl Barrier {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> ActivationShape {
        self.shape
    }

    /// The gate state
    pub fn active(&self) -> ReadonlyStore<bool> {
        self.active.clone()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Fires on every transition to active
    pub fn activated(&self) -> ReadonlyEvent<()> {
        self.activated.clone()
    }

    /// Fires on every transition to inactive
    pub fn deactivated(&self) -> ReadonlyEvent<()> {
        self.deactivated.clone()
    }

    pub fn performer_count(&self) -> usize {
        self.performers
    }

    #[doc(hidden)]
    pub fn internals(&self) -> &BarrierInternals {
        &self.internals
    }

    /// Report a failed operation to the barrier
    pub fn report_failure(&self, params: Value, error: Value) {
        self.internals
            .operation_failed
            .emit(OperationFailed { params, error });
    }

    /// Report a successful operation to the barrier
    pub fn report_done(&self, params: Value, result: Value) {
        self.internals
            .operation_done
            .emit(OperationDone { params, result });
    }
}

/// Build a barrier from `config`.
///
/// Fails with [`BarrierError::InvalidConfiguration`] when no activation
/// shape matches; nothing is wired in that case.
pub fn create_barrier(config: BarrierConfig) -> Result<Barrier, BarrierError> {
    let ResolvedConfig {
        name,
        source,
        perform,
    } = config.resolve().map_err(|e| {
        tracing::warn!(error = %e, "rejecting barrier configuration");
        e
    })?;

    let shape = source.shape();
    let internals = BarrierInternals::new(&name);
    let activated = Event::named(format!("{}.activated", name));
    let deactivated = Event::named(format!("{}.deactivated", name));

    let performers: Vec<NormalizedPerformer> = perform.into_iter().map(Performer::normalize).collect();
    let ends: Vec<Event<()>> = performers.iter().map(|p| p.end.clone()).collect();

    let active = source.wire(&name, &internals, &ends);

    split_bool(&active, &activated, &deactivated);
    {
        let barrier = name.clone();
        active.watch(move |value| {
            if *value {
                tracing::debug!(barrier = %barrier, "activated");
            } else {
                tracing::debug!(barrier = %barrier, "deactivated");
            }
        });
    }

    let starts: Vec<Event<()>> = performers.iter().map(|p| p.start.clone()).collect();
    {
        let barrier = name.clone();
        internals.touch.guard(&active).watch(move |_| {
            tracing::trace!(barrier = %barrier, performers = starts.len(), "starting performers");
            for start in &starts {
                start.emit(());
            }
        });
    }

    tracing::debug!(barrier = %name, %shape, performers = performers.len(), "barrier created");

    Ok(Barrier {
        shape,
        active: active.readonly(),
        activated: activated.readonly(),
        deactivated: deactivated.readonly(),
        performers: performers.len(),
        internals,
        name,
    })
}

#[cfg(test)]
#[path = "barrier_tests.rs"]
mod tests;
