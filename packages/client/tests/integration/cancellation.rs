use std::time::Duration;

use client::RequestScope;
use common::role::Role;

use crate::support::{TestApp, routes};

#[tokio::test]
async fn cancelled_request_resolves_as_canceled_and_stays_silent() {
    let app = TestApp::spawn().await;
    app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
    app.api.set_delay(Duration::from_millis(300));
    let admin = app.as_role(Role::Admin);

    let pending = admin.awards().show("a1");
    let handle = pending.cancel_handle();
    let task = tokio::spawn(pending.into_future());
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.cancel();

    let err = task.await.unwrap().unwrap_err();
    assert!(err.is_canceled());
    assert!(err.notification().is_none());
}

#[tokio::test]
async fn dropping_the_scope_cancels_its_requests() {
    let app = TestApp::spawn().await;
    app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
    app.api.set_delay(Duration::from_millis(300));
    let admin = app.as_role(Role::Admin);

    let scope = RequestScope::new();
    let pending = scope.track(admin.awards().show("a1"));
    let task = tokio::spawn(pending.into_future());
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(scope);

    assert!(task.await.unwrap().unwrap_err().is_canceled());
    assert_eq!(app.api.hits("GET", &routes::award("a1")), 1);
}

#[tokio::test]
async fn only_the_latest_request_in_a_slot_resolves() {
    let app = TestApp::spawn().await;
    app.api.with_data(|data| {
        data.add_award("a1", "First", &[]);
        data.add_award("a2", "Second", &[]);
    });
    app.api.set_delay(Duration::from_millis(100));
    let admin = app.as_role(Role::Admin);
    let scope = RequestScope::new();

    let first = scope.latest("award", admin.awards().show("a1"));
    let second = scope.latest("award", admin.awards().show("a2"));

    let (first, second) = tokio::join!(first.into_future(), second.into_future());
    assert!(first.unwrap_err().is_canceled());
    assert_eq!(second.unwrap().title, "Second");
}
