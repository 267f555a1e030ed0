// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Combinators over events and stores

use crate::event::Event;
use crate::store::Store;
use std::sync::{Arc, Mutex};

/// Fires once every channel in `events` has occurred since the last cycle.
///
/// Each channel owns one flag. An occurrence sets its flag; when all flags
/// are set the output fires and the flags clear. Every `reset` occurrence
/// also clears the flags. With no channels at all, each `reset` occurrence
/// fires the output immediately.
pub fn combine_events<R: Send + Sync + 'static>(events: &[Event<()>], reset: &Event<R>) -> Event<()> {
    let target = Event::named(format!("combineEvents({})", events.len()));

    if events.is_empty() {
        let out = target.clone();
        reset.watch(move |_| out.emit(()));
        return target;
    }

    let flags = Arc::new(Mutex::new(vec![false; events.len()]));

    {
        let flags = Arc::clone(&flags);
        reset.watch(move |_| {
            let mut flags = flags.lock().unwrap_or_else(|e| e.into_inner());
            flags.iter_mut().for_each(|flag| *flag = false);
        });
    }

    for (index, event) in events.iter().enumerate() {
        let flags = Arc::clone(&flags);
        let out = target.clone();
        event.watch(move |_| {
            let complete = {
                let mut flags = flags.lock().unwrap_or_else(|e| e.into_inner());
                flags[index] = true;
                let complete = flags.iter().all(|flag| *flag);
                if complete {
                    flags.iter_mut().for_each(|flag| *flag = false);
                }
                complete
            };
            if complete {
                out.emit(());
            }
        });
    }

    target
}

/// Route every update of `source`: `true` to `on_true`, anything else to `on_false`
pub fn split_bool(source: &Store<bool>, on_true: &Event<()>, on_false: &Event<()>) {
    let on_true = on_true.clone();
    let on_false = on_false.clone();
    source.watch(move |value| {
        if *value {
            on_true.emit(());
        } else {
            on_false.emit(());
        }
    });
}

#[cfg(test)]
#[path = "combinators_tests.rs"]
mod tests;
