// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events: typed push channels with synchronous fan-out

use crate::kernel;
use crate::readonly::ReadonlyEvent;
use crate::store::Store;
use std::fmt;
use std::sync::{Arc, RwLock};

pub(crate) type Watcher<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct EventInner<T> {
    name: String,
    watchers: RwLock<Vec<Watcher<T>>>,
}

impl<T> EventInner<T> {
    fn deliver(&self, payload: &T) {
        // Snapshot so watchers may subscribe new watchers without deadlocking
        let watchers: Vec<Watcher<T>> = self
            .watchers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for watcher in &watchers {
            watcher(payload);
        }
    }
}

/// A typed event. Cloning yields another handle to the same channel.
pub struct Event<T> {
    inner: Arc<EventInner<T>>,
}

impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.inner.name)
            .field("watchers", &self.watcher_count())
            .finish()
    }
}

impl<T> Event<T> {
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Number of permanent watchers attached to this event
    pub fn watcher_count(&self) -> usize {
        self.inner
            .watchers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Whether both handles point at the same channel
    pub fn same_channel(&self, other: &Event<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Send + Sync + 'static> Event<T> {
    pub fn new() -> Self {
        Self::named("event")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(EventInner {
                name: name.into(),
                watchers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Emit a payload. Watchers run in registration order within the current tick.
    pub fn emit(&self, payload: T) {
        let inner = Arc::clone(&self.inner);
        kernel::schedule(Box::new(move || inner.deliver(&payload)));
    }

    /// Attach a permanent watcher
    pub fn watch(&self, f: impl Fn(&T) + Send + Sync + 'static) {
        self.inner
            .watchers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(f));
    }

    /// Derived event carrying `f(payload)`
    pub fn map<U: Send + Sync + 'static>(
        &self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> Event<U> {
        let target = Event::named(format!("{}.map", self.name()));
        let out = target.clone();
        self.watch(move |payload| out.emit(f(payload)));
        target
    }

    /// Derived event carrying `f(payload)` whenever it returns `Some`
    pub fn filter_map<U: Send + Sync + 'static>(
        &self,
        f: impl Fn(&T) -> Option<U> + Send + Sync + 'static,
    ) -> Event<U> {
        let target = Event::named(format!("{}.filterMap", self.name()));
        let out = target.clone();
        self.watch(move |payload| {
            if let Some(mapped) = f(payload) {
                out.emit(mapped);
            }
        });
        target
    }

    /// Derived event discarding the payload
    pub fn to_void(&self) -> Event<()> {
        self.map(|_| ())
    }

    /// Pipe every occurrence of this event into `target`
    pub fn forward_to(&self, target: &Event<T>)
    where
        T: Clone,
    {
        let target = target.clone();
        self.watch(move |payload| target.emit(payload.clone()));
    }

    /// Read-only view that cannot emit
    pub fn readonly(&self) -> ReadonlyEvent<T> {
        ReadonlyEvent::new(self.clone())
    }
}

impl<T: Clone + Send + Sync + 'static> Event<T> {
    /// Derived event carrying the payloads for which `predicate` holds
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Event<T> {
        let target = Event::named(format!("{}.filter", self.name()));
        let out = target.clone();
        self.watch(move |payload| {
            if predicate(payload) {
                out.emit(payload.clone());
            }
        });
        target
    }

    /// Derived event that forwards only while `gate` currently reads `true`.
    ///
    /// The store is read when the occurrence is dispatched, not when it was emitted.
    pub fn guard(&self, gate: &Store<bool>) -> Event<T> {
        let gate = gate.clone();
        let target = Event::named(format!("{}.guard", self.name()));
        let out = target.clone();
        self.watch(move |payload| {
            if gate.get() {
                out.emit(payload.clone());
            }
        });
        target
    }

    /// Event firing whenever any of `events` fires
    pub fn merge(events: &[Event<T>]) -> Event<T> {
        let target = Event::named("merge");
        for event in events {
            event.forward_to(&target);
        }
        target
    }
}

impl<T: Send + Sync + 'static> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
