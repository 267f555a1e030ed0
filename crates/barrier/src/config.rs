// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Barrier configuration
//!
//! `BarrierConfig` collects optional inputs the way callers naturally supply
//! them; [`BarrierConfig::resolve`] turns them into exactly one
//! [`ActivationSource`] or rejects the configuration.

use crate::activation::ActivationSource;
use crate::error::BarrierError;
use crate::performer::Performer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tollgate_reactive::{Event, Store};

pub(crate) const DEFAULT_NAME: &str = "barrier";

/// Outcome of a failed operation, as reported to a barrier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationFailed {
    pub params: Value,
    pub error: Value,
}

/// Outcome of a successful operation, as reported to a barrier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationDone {
    pub params: Value,
    pub result: Value,
}

pub type FailurePredicate = Arc<dyn Fn(&OperationFailed) -> bool + Send + Sync>;
pub type SuccessPredicate = Arc<dyn Fn(&OperationDone) -> bool + Send + Sync>;

/// Predicates deciding which operation outcomes activate the barrier
#[derive(Clone, Default)]
pub struct OutcomePredicates {
    pub(crate) failure: Option<FailurePredicate>,
    pub(crate) success: Option<SuccessPredicate>,
}

impl OutcomePredicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate when a reported failure satisfies `predicate`
    pub fn on_failure(
        mut self,
        predicate: impl Fn(&OperationFailed) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.failure = Some(Arc::new(predicate));
        self
    }

    /// Activate when a reported success satisfies `predicate`
    pub fn on_success(
        mut self,
        predicate: impl Fn(&OperationDone) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.success = Some(Arc::new(predicate));
        self
    }

    pub fn has_failure(&self) -> bool {
        self.failure.is_some()
    }

    pub fn has_success(&self) -> bool {
        self.success.is_some()
    }

    /// Neither predicate is present
    pub fn is_empty(&self) -> bool {
        self.failure.is_none() && self.success.is_none()
    }
}

impl fmt::Debug for OutcomePredicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutcomePredicates")
            .field("failure", &self.has_failure())
            .field("success", &self.has_success())
            .finish()
    }
}

/// What `activate_on` was given: a plain trigger or outcome predicates
#[derive(Clone, Debug)]
pub enum ActivateOn {
    Trigger(Event<()>),
    Outcome(OutcomePredicates),
}

impl ActivateOn {
    /// Trigger from an event of any payload
    pub fn trigger<T: Send + Sync + 'static>(event: &Event<T>) -> Self {
        ActivateOn::Trigger(event.to_void())
    }
}

impl From<Event<()>> for ActivateOn {
    fn from(event: Event<()>) -> Self {
        ActivateOn::Trigger(event)
    }
}

impl From<OutcomePredicates> for ActivateOn {
    fn from(predicates: OutcomePredicates) -> Self {
        ActivateOn::Outcome(predicates)
    }
}

/// Inputs for [`create_barrier`](crate::create_barrier)
#[derive(Clone, Debug, Default)]
pub struct BarrierConfig {
    name: Option<String>,
    active: Option<Store<bool>>,
    activate_on: Option<ActivateOn>,
    deactivate_on: Option<Event<()>>,
    perform: Vec<Performer>,
}

/// A configuration that matched one activation shape
#[derive(Debug)]
pub struct ResolvedConfig {
    pub name: String,
    pub source: ActivationSource,
    pub perform: Vec<Performer>,
}

impl BarrierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used for node names and log fields
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Use an existing store as the active signal
    pub fn active(mut self, active: Store<bool>) -> Self {
        self.active = Some(active);
        self
    }

    pub fn activate_on(mut self, activate_on: impl Into<ActivateOn>) -> Self {
        self.activate_on = Some(activate_on.into());
        self
    }

    pub fn deactivate_on(mut self, deactivate_on: Event<()>) -> Self {
        self.deactivate_on = Some(deactivate_on);
        self
    }

    /// Append one performer; performers start in the order they were added
    pub fn perform(mut self, performer: impl Into<Performer>) -> Self {
        self.perform.push(performer.into());
        self
    }

    pub fn perform_all<P: Into<Performer>>(mut self, performers: impl IntoIterator<Item = P>) -> Self {
        self.perform.extend(performers.into_iter().map(Into::into));
        self
    }

    pub fn performer_count(&self) -> usize {
        self.perform.len()
    }

    /// Pick the activation shape, first match wins:
    /// an external store, then an activate/deactivate trigger pair, then
    /// outcome predicates.
    pub fn resolve(self) -> Result<ResolvedConfig, BarrierError> {
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());

        let source = match (self.active, self.activate_on, self.deactivate_on) {
            (Some(active), _, _) => ActivationSource::External(active),
            (None, Some(ActivateOn::Trigger(activate_on)), Some(deactivate_on)) => {
                ActivationSource::Triggers {
                    activate_on,
                    deactivate_on,
                }
            }
            (None, Some(ActivateOn::Outcome(predicates)), _) if !predicates.is_empty() => {
                ActivationSource::Outcome(predicates)
            }
            _ => return Err(BarrierError::InvalidConfiguration),
        };

        Ok(ResolvedConfig {
            name,
            source,
            perform: self.perform,
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
