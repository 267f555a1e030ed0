// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Activation sources
//!
//! Each resolved configuration shape produces the one store that drives the
//! barrier. Only the outcome shape pulses `touch`.

use crate::barrier::BarrierInternals;
use crate::config::OutcomePredicates;
use std::fmt;
use tollgate_reactive::{combine_events, Event, Store};

/// The configuration shape a barrier was built from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationShape {
    /// Caller-owned active store
    External,
    /// Activate/deactivate trigger pair
    Triggers,
    /// Predicates over reported operation outcomes
    Outcome,
}

impl fmt::Display for ActivationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationShape::External => write!(f, "external"),
            ActivationShape::Triggers => write!(f, "triggers"),
            ActivationShape::Outcome => write!(f, "outcome"),
        }
    }
}

/// Exactly one writer for the active signal
#[derive(Clone, Debug)]
pub enum ActivationSource {
    External(Store<bool>),
    Triggers {
        activate_on: Event<()>,
        deactivate_on: Event<()>,
    },
    Outcome(OutcomePredicates),
}

impl ActivationSource {
    pub fn shape(&self) -> ActivationShape {
        match self {
            ActivationSource::External(_) => ActivationShape::External,
            ActivationSource::Triggers { .. } => ActivationShape::Triggers,
            ActivationSource::Outcome(_) => ActivationShape::Outcome,
        }
    }

    /// Build the active store and attach its writers.
    ///
    /// `ends` are the normalized performers' completion events, in
    /// configuration order.
    pub(crate) fn wire(
        self,
        name: &str,
        internals: &BarrierInternals,
        ends: &[Event<()>],
    ) -> Store<bool> {
        match self {
            ActivationSource::External(active) => active,
            // Deactivate is attached second so it wins when both fire in one tick
            ActivationSource::Triggers {
                activate_on,
                deactivate_on,
            } => Store::named(format!("{}.$active", name), false)
                .on(&activate_on, |_, _| true)
                .on(&deactivate_on, |_, _| false),
            ActivationSource::Outcome(predicates) => {
                let active = Store::named(format!("{}.$active", name), false);

                if let Some(matches) = predicates.failure {
                    let (target, touch) = (active.clone(), internals.touch.clone());
                    let barrier = name.to_string();
                    internals.operation_failed.watch(move |outcome| {
                        if matches(outcome) {
                            tracing::debug!(barrier = %barrier, params = %outcome.params, "failure matched");
                            target.set(true);
                            touch.emit(());
                        }
                    });
                    deactivate_when_settled(&active, ends, &internals.operation_failed);
                }

                if let Some(matches) = predicates.success {
                    let (target, touch) = (active.clone(), internals.touch.clone());
                    let barrier = name.to_string();
                    internals.operation_done.watch(move |outcome| {
                        if matches(outcome) {
                            tracing::debug!(barrier = %barrier, params = %outcome.params, "success matched");
                            target.set(true);
                            touch.emit(());
                        }
                    });
                    deactivate_when_settled(&active, ends, &internals.operation_done);
                }

                active
            }
        }
    }
}

/// Clear `active` once every performer has ended since the last `cycle` occurrence
fn deactivate_when_settled<R: Send + Sync + 'static>(
    active: &Store<bool>,
    ends: &[Event<()>],
    cycle: &Event<R>,
) {
    let target = active.clone();
    combine_events(ends, cycle).watch(move |_| {
        target.set(false);
    });
}

#[cfg(test)]
#[path = "activation_tests.rs"]
mod tests;
