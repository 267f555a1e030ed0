// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Propagation kernel
//!
//! Every emission becomes a job on one process-wide FIFO queue. The first
//! emission into an idle kernel opens a tick and drains the queue before
//! returning; emissions made while a tick is draining are only queued, so
//! propagation is breadth-first and never re-entrant.
//!
//! A tick holds a reentrant lock from its first emission until the queue
//! is empty. Emissions from other threads (async effect completions on a
//! runtime worker) block until the running tick has settled, then open a
//! tick of their own.

use parking_lot::{const_reentrant_mutex, ReentrantMutex};
use std::cell::RefCell;
use std::collections::VecDeque;

type Job = Box<dyn FnOnce() + Send>;

struct Kernel {
    queue: VecDeque<Job>,
    draining: bool,
    ticks: u64,
}

static KERNEL: ReentrantMutex<RefCell<Kernel>> = const_reentrant_mutex(RefCell::new(Kernel {
    queue: VecDeque::new(),
    draining: false,
    ticks: 0,
}));

/// Resets the kernel when a tick ends, including by unwinding out of a watcher
struct TickGuard;

impl Drop for TickGuard {
    fn drop(&mut self) {
        let guard = KERNEL.lock();
        let mut kernel = guard.borrow_mut();
        kernel.draining = false;
        if !kernel.queue.is_empty() {
            tracing::warn!(dropped = kernel.queue.len(), "tick aborted, discarding queued jobs");
            kernel.queue.clear();
        }
    }
}

/// Try to become the drainer. Returns the tick number when this call opened the tick.
///
/// Must be called with the kernel lock held.
fn open_tick(kernel: &RefCell<Kernel>) -> Option<u64> {
    let mut kernel = kernel.borrow_mut();
    if kernel.draining {
        None
    } else {
        kernel.draining = true;
        kernel.ticks += 1;
        Some(kernel.ticks)
    }
}

fn drain(kernel: &RefCell<Kernel>, tick: u64) {
    let mut jobs = 0usize;
    loop {
        // The borrow must end before the job runs: jobs enqueue more jobs
        let next = kernel.borrow_mut().queue.pop_front();
        match next {
            Some(job) => {
                job();
                jobs += 1;
            }
            None => break,
        }
    }
    tracing::trace!(tick, jobs, "tick settled");
}

/// Queue a job and, if no tick is running, run one to completion
pub(crate) fn schedule(job: Job) {
    let kernel = KERNEL.lock();
    kernel.borrow_mut().queue.push_back(job);
    if let Some(tick) = open_tick(&kernel) {
        let _guard = TickGuard;
        drain(&kernel, tick);
    }
}

/// Run `f` while no other thread can be in the middle of a tick.
///
/// Called from inside a tick on this thread, `f` runs immediately.
pub(crate) fn between_ticks<R>(f: impl FnOnce() -> R) -> R {
    let _kernel = KERNEL.lock();
    f()
}

/// Run `f` inside a single tick.
///
/// Emissions made by `f` are queued in order and processed after `f`
/// returns, so they all belong to the same propagation tick. Nested calls
/// (from inside a watcher or another batch) simply run `f` in the current
/// tick. Other threads cannot emit until the tick has settled.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    let kernel = KERNEL.lock();
    match open_tick(&kernel) {
        Some(tick) => {
            let _guard = TickGuard;
            let result = f();
            drain(&kernel, tick);
            result
        }
        None => f(),
    }
}

/// Whether a tick is currently draining on this thread
pub fn in_tick() -> bool {
    // Held by another thread: whatever it is draining, it is not ours
    KERNEL
        .try_lock()
        .map(|kernel| kernel.borrow().draining)
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
