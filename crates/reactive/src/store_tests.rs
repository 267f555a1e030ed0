// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::kernel::batch;
use std::sync::Mutex;

fn record_updates<T: Clone + PartialEq + Send + Sync + 'static>(
    store: &Store<T>,
) -> Arc<Mutex<Vec<T>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.watch(move |value: &T| sink.lock().unwrap().push(value.clone()));
    seen
}

#[test]
fn set_notifies_only_on_change() {
    let store = Store::named("counter", 0);
    let updates = record_updates(&store);

    assert!(store.set(1));
    assert!(!store.set(1));
    assert!(store.set(2));

    assert_eq!(store.get(), 2);
    assert_eq!(*updates.lock().unwrap(), vec![1, 2]);
}

#[test]
fn on_applies_reducers_with_last_writer_winning() {
    let activate: Event<()> = Event::named("activate");
    let deactivate: Event<()> = Event::named("deactivate");
    let store = Store::named("flag", false)
        .on(&activate, |_, _| true)
        .on(&deactivate, |_, _| false);

    batch(|| {
        activate.emit(());
        deactivate.emit(());
    });
    assert!(!store.get());

    batch(|| {
        deactivate.emit(());
        activate.emit(());
    });
    assert!(store.get());
}

#[test]
fn reducer_sees_current_value() {
    let add: Event<i32> = Event::named("add");
    let total = Store::named("total", 10).on(&add, |current, n| current + n);

    add.emit(5);
    add.emit(-3);

    assert_eq!(total.get(), 12);
}

#[test]
fn reset_restores_initial_value() {
    let bump: Event<()> = Event::new();
    let clear: Event<()> = Event::new();
    let store = Store::new(0)
        .on(&bump, |n, _| n + 1)
        .reset(&clear, 0);

    bump.emit(());
    bump.emit(());
    assert_eq!(store.get(), 2);

    clear.emit(());
    assert_eq!(store.get(), 0);
}

#[test]
fn write_is_visible_within_the_same_tick() {
    let store = Store::named("flag", false);
    let seen_inside = Arc::new(Mutex::new(None));
    let probe: Event<()> = Event::named("probe");
    let (reader, sink) = (store.clone(), Arc::clone(&seen_inside));
    probe.watch(move |_| *sink.lock().unwrap() = Some(reader.get()));

    batch(|| {
        probe.emit(());
        store.set(true);
    });

    assert_eq!(*seen_inside.lock().unwrap(), Some(true));
}

#[test]
fn map_tracks_source() {
    let source = Store::named("n", 3);
    let parity = source.map(|n| n % 2 == 0);
    let parity_updates = record_updates(&parity);

    assert!(!parity.get());
    source.set(4);
    source.set(6);
    source.set(7);

    assert!(!parity.get());
    assert_eq!(*parity_updates.lock().unwrap(), vec![true, false]);
}

#[test]
fn readonly_store_projects_reads() {
    let store = Store::named("source", "a".to_string());
    let view = store.readonly();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    view.updates().watch(move |s| sink.lock().unwrap().push(s.clone()));

    store.set("b".to_string());

    assert_eq!(view.get(), "b");
    assert_eq!(view.name(), "source");
    assert!(view.projects(&store));
    assert_eq!(*seen.lock().unwrap(), vec!["b".to_string()]);
}
