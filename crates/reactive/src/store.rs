// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stores: values with change notification
//!
//! Writes are synchronous, so a store read later in the same tick sees the
//! latest value. The `updates` event fires only when a write changes the value.

use crate::event::Event;
use crate::readonly::ReadonlyStore;
use std::fmt;
use std::sync::{Arc, RwLock};

struct StoreInner<T> {
    name: String,
    value: RwLock<T>,
    updates: Event<T>,
}

/// A value cell. Cloning yields another handle to the same store.
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field(
                "value",
                &*self.inner.value.read().unwrap_or_else(|e| e.into_inner()),
            )
            .finish()
    }
}

impl<T> Store<T> {
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Whether both handles point at the same store
    pub fn same_store(&self, other: &Store<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        Self::named("store", initial)
    }

    pub fn named(name: impl Into<String>, initial: T) -> Self {
        let name = name.into();
        let updates = Event::named(format!("{}.updates", name));
        Self {
            inner: Arc::new(StoreInner {
                name,
                value: RwLock::new(initial),
                updates,
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner
            .value
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Write a value. Returns whether the value changed (and `updates` was emitted).
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.write().unwrap_or_else(|e| e.into_inner());
            if *current == value {
                return false;
            }
            *current = value.clone();
        }
        self.inner.updates.emit(value);
        true
    }

    /// Update the store from `trigger` through `reducer(current, payload)`.
    ///
    /// Reducers attached to triggers of the same tick run in registration
    /// order; the last one to write wins.
    pub fn on<P: Send + Sync + 'static>(
        self,
        trigger: &Event<P>,
        reducer: impl Fn(&T, &P) -> T + Send + Sync + 'static,
    ) -> Self {
        let store = self.clone();
        trigger.watch(move |payload| {
            let next = reducer(&store.get(), payload);
            store.set(next);
        });
        self
    }

    /// Restore `initial` whenever `trigger` fires
    pub fn reset<P: Send + Sync + 'static>(self, trigger: &Event<P>, initial: T) -> Self {
        self.on(trigger, move |_, _| initial.clone())
    }

    /// Event emitted with the new value after each change
    pub fn updates(&self) -> Event<T> {
        self.inner.updates.clone()
    }

    /// Attach a watcher to value changes
    pub fn watch(&self, f: impl Fn(&T) + Send + Sync + 'static) {
        self.inner.updates.watch(f);
    }

    /// Derived store kept equal to `f(value)`
    pub fn map<U: Clone + PartialEq + Send + Sync + 'static>(
        &self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> Store<U> {
        let derived = Store::named(format!("{}.map", self.name()), f(&self.get()));
        let target = derived.clone();
        self.watch(move |value| {
            target.set(f(value));
        });
        derived
    }

    /// Read-only view that cannot be written
    pub fn readonly(&self) -> ReadonlyStore<T> {
        ReadonlyStore::new(self.clone())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
