//! The non-predicate shapes, driven by application events

use crate::prelude::*;
use serde_json::json;
use tollgate_barrier::{
    create_barrier, ActivateOn, ActivationShape, BarrierConfig, BarrierError, OutcomePredicates,
    RemoteOperation,
};
use tollgate_reactive::{Event, Store};

#[test]
fn login_and_logout_events_drive_the_gate() {
    let login: Event<String> = Event::named("session.login");
    let logout: Event<()> = Event::named("session.logout");
    let barrier = create_barrier(
        BarrierConfig::new()
            .named("session")
            .activate_on(ActivateOn::trigger(&login))
            .deactivate_on(logout.clone()),
    )
    .unwrap();
    let activated = counter(&barrier.activated());

    login.emit("ada".to_string());
    login.emit("ada".to_string());
    assert!(barrier.is_active());
    assert_eq!(hits(&activated), 1);

    logout.emit(());
    assert!(!barrier.is_active());
    assert_eq!(barrier.shape(), ActivationShape::Triggers);
}

#[test]
fn application_store_is_mirrored() {
    let maintenance = Store::named("app.$maintenance", false);
    let barrier = create_barrier(BarrierConfig::new().active(maintenance.clone())).unwrap();
    let deactivated = counter(&barrier.deactivated());

    maintenance.set(true);
    assert!(barrier.active().get());
    maintenance.set(false);

    assert_eq!(hits(&deactivated), 1);
}

#[test]
fn skipped_operation_still_closes_the_gate() {
    let operation = RemoteOperation::new("feature-flags");
    let barrier = create_barrier(
        BarrierConfig::new()
            .activate_on(OutcomePredicates::new().on_success(|outcome| outcome.result == "reload"))
            .perform(&operation),
    )
    .unwrap();
    let skip = operation.finished.skip.clone();
    operation.start.watch(move |_| skip.emit(json!("disabled")));

    barrier.report_done(json!(null), json!("reload"));

    assert!(!barrier.is_active());
}

#[test]
fn misconfiguration_builds_nothing() {
    assert_eq!(
        create_barrier(BarrierConfig::new()).unwrap_err(),
        BarrierError::InvalidConfiguration
    );
}
