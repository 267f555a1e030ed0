//! Shared helpers for the behavioral specs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tollgate_reactive::{Effect, ReadonlyEvent};

/// Count occurrences of a notification
pub fn counter(event: &ReadonlyEvent<()>) -> Arc<AtomicUsize> {
    let hits = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&hits);
    event.watch(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });
    hits
}

pub fn hits(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

/// Yield to the runtime until `fx` has no call in flight
pub async fn settle<P, D, E>(fx: &Effect<P, D, E>)
where
    P: Clone + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    while fx.in_flight() > 0 {
        tokio::task::yield_now().await;
    }
}
