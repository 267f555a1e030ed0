// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects: units of (possibly asynchronous) work wired into the graph
//!
//! Calling an effect starts its handler. Every call settles exactly once,
//! emitting `finally` and then either `done` or `fail`. `pending` and
//! `in_flight` count a call out only after those have been delivered.

use crate::error::ReactiveError;
use crate::event::Event;
use crate::kernel;
use crate::readonly::ReadonlyStore;
use crate::store::Store;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Boxed future returned by async handlers
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Successful settlement of one call
#[derive(Clone, Debug, PartialEq)]
pub struct Done<P, D> {
    pub params: P,
    pub result: D,
}

/// Failed settlement of one call
#[derive(Clone, Debug, PartialEq)]
pub struct Fail<P, E> {
    pub params: P,
    pub error: E,
}

/// Settlement of one call, whichever way it went
#[derive(Clone, Debug, PartialEq)]
pub enum Settled<P, D, E> {
    Done(Done<P, D>),
    Fail(Fail<P, E>),
}

impl<P, D, E> Settled<P, D, E> {
    pub fn params(&self) -> &P {
        match self {
            Settled::Done(done) => &done.params,
            Settled::Fail(fail) => &fail.params,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Settled::Done(_))
    }
}

type SyncHandler<P, D, E> = Arc<dyn Fn(&P) -> Result<D, E> + Send + Sync>;
type AsyncHandler<P, D, E> = Arc<dyn Fn(P) -> BoxFuture<Result<D, E>> + Send + Sync>;

enum Handler<P, D, E> {
    Sync(SyncHandler<P, D, E>),
    Async {
        handler: AsyncHandler<P, D, E>,
        runtime: tokio::runtime::Handle,
    },
}

struct EffectInner<P, D, E> {
    name: String,
    handler: Handler<P, D, E>,
    trigger: Event<P>,
    finally: Event<Settled<P, D, E>>,
    done: Event<Done<P, D>>,
    fail: Event<Fail<P, E>>,
    pending: Store<bool>,
    in_flight: AtomicUsize,
}

impl<P, D, E> EffectInner<P, D, E>
where
    P: Clone + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn begin(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.pending.set(true);
    }

    fn settle(&self, params: P, result: Result<D, E>) {
        tracing::debug!(effect = %self.name, ok = result.is_ok(), "effect settled");
        let settled = match result {
            Ok(result) => Settled::Done(Done { params, result }),
            Err(error) => Settled::Fail(Fail { params, error }),
        };
        self.finally.emit(settled);
    }

    /// Count one call out. Runs only after its `done`/`fail` was delivered.
    fn finish(&self) {
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        if remaining == 0 {
            self.pending.set(false);
        }
    }

    fn launch(self: &Arc<Self>, params: P) {
        self.begin();
        tracing::trace!(effect = %self.name, "effect started");
        match &self.handler {
            Handler::Sync(handler) => {
                let result = handler(&params);
                self.settle(params, result);
            }
            Handler::Async { handler, runtime } => {
                let work = handler(params.clone());
                let inner = Arc::clone(self);
                runtime.spawn(async move {
                    let result = work.await;
                    inner.settle(params, result);
                });
            }
        }
    }
}

/// An effect. Cloning yields another handle to the same unit.
pub struct Effect<P, D, E> {
    inner: Arc<EffectInner<P, D, E>>,
}

impl<P, D, E> Clone for Effect<P, D, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, D, E> fmt::Debug for Effect<P, D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("name", &self.inner.name)
            .field("in_flight", &self.inner.in_flight.load(Ordering::SeqCst))
            .finish()
    }
}

impl<P, D, E> Effect<P, D, E>
where
    P: Clone + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Effect whose handler settles synchronously, inside the calling tick
    pub fn new(
        name: impl Into<String>,
        handler: impl Fn(&P) -> Result<D, E> + Send + Sync + 'static,
    ) -> Self {
        Self::build(name.into(), Handler::Sync(Arc::new(handler)))
    }

    /// Effect whose handler runs on the current tokio runtime.
    ///
    /// Completions re-enter the graph from the runtime, in a tick of their own.
    pub fn new_async<F, Fut>(name: impl Into<String>, handler: F) -> Result<Self, ReactiveError>
    where
        F: Fn(P) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<D, E>> + Send + 'static,
    {
        let name = name.into();
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| ReactiveError::NoRuntime { effect: name.clone() })?;
        let handler: AsyncHandler<P, D, E> =
            Arc::new(move |params| -> BoxFuture<Result<D, E>> { Box::pin(handler(params)) });
        Ok(Self::build(name, Handler::Async { handler, runtime }))
    }

    fn build(name: String, handler: Handler<P, D, E>) -> Self {
        let finally: Event<Settled<P, D, E>> = Event::named(format!("{}.finally", name));
        let done = finally.filter_map(|settled| match settled {
            Settled::Done(done) => Some(done.clone()),
            Settled::Fail(_) => None,
        });
        let fail = finally.filter_map(|settled| match settled {
            Settled::Fail(fail) => Some(fail.clone()),
            Settled::Done(_) => None,
        });
        let inner = Arc::new(EffectInner {
            trigger: Event::named(name.clone()),
            pending: Store::named(format!("{}.pending", name), false),
            name,
            handler,
            finally,
            done,
            fail,
            in_flight: AtomicUsize::new(0),
        });
        let runner = Arc::clone(&inner);
        inner.trigger.watch(move |params| runner.launch(params.clone()));
        // One hop past `finally`, so the outcome events are delivered first
        let idle = Arc::clone(&inner);
        inner.finally.to_void().watch(move |_| idle.finish());
        Self { inner }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Start the effect from the graph, without waiting for it to settle
    pub fn call(&self, params: P) {
        self.inner.trigger.emit(params);
    }

    /// Run the handler directly and wait for it, emitting the usual settlement events
    pub async fn run(&self, params: P) -> Result<D, E> {
        self.inner.begin();
        let result = match &self.inner.handler {
            Handler::Sync(handler) => handler(&params),
            Handler::Async { handler, .. } => handler(params.clone()).await,
        };
        self.inner.settle(params, result.clone());
        result
    }

    /// The invocation channel: emitting on it calls the effect
    pub fn trigger(&self) -> Event<P> {
        self.inner.trigger.clone()
    }

    pub fn done(&self) -> Event<Done<P, D>> {
        self.inner.done.clone()
    }

    pub fn fail(&self) -> Event<Fail<P, E>> {
        self.inner.fail.clone()
    }

    pub fn finally(&self) -> Event<Settled<P, D, E>> {
        self.inner.finally.clone()
    }

    /// `true` while at least one call is in flight
    pub fn pending(&self) -> ReadonlyStore<bool> {
        self.inner.pending.readonly()
    }

    /// Calls not yet settled. Never observes a settlement that is still propagating.
    pub fn in_flight(&self) -> usize {
        kernel::between_ticks(|| self.inner.in_flight.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
