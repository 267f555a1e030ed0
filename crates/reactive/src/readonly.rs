// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only projections of stores and events

use crate::event::Event;
use crate::store::Store;

/// A store handle without write access
#[derive(Clone, Debug)]
pub struct ReadonlyStore<T> {
    store: Store<T>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ReadonlyStore<T> {
    pub(crate) fn new(store: Store<T>) -> Self {
        Self { store }
    }

    pub fn name(&self) -> &str {
        self.store.name()
    }

    pub fn get(&self) -> T {
        self.store.get()
    }

    pub fn updates(&self) -> ReadonlyEvent<T> {
        self.store.updates().readonly()
    }

    pub fn watch(&self, f: impl Fn(&T) + Send + Sync + 'static) {
        self.store.watch(f);
    }

    pub fn map<U: Clone + PartialEq + Send + Sync + 'static>(
        &self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> ReadonlyStore<U> {
        self.store.map(f).readonly()
    }

    /// Whether this view projects `store`
    pub fn projects(&self, store: &Store<T>) -> bool {
        self.store.same_store(store)
    }
}

/// An event handle without emit access
#[derive(Clone, Debug)]
pub struct ReadonlyEvent<T> {
    event: Event<T>,
}

impl<T: Send + Sync + 'static> ReadonlyEvent<T> {
    pub(crate) fn new(event: Event<T>) -> Self {
        Self { event }
    }

    pub fn name(&self) -> &str {
        self.event.name()
    }

    pub fn watch(&self, f: impl Fn(&T) + Send + Sync + 'static) {
        self.event.watch(f);
    }

    pub fn map<U: Send + Sync + 'static>(
        &self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> ReadonlyEvent<U> {
        self.event.map(f).readonly()
    }

    /// Plain event mirroring this one, usable as a trigger elsewhere in the graph
    pub fn to_void(&self) -> Event<()> {
        self.event.to_void()
    }
}

impl<T: Clone + Send + Sync + 'static> ReadonlyEvent<T> {
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> ReadonlyEvent<T> {
        self.event.filter(predicate).readonly()
    }
}
