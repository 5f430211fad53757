use std::time::Duration;

use common::role::Role;
use portal::{LoadState, Resource};

use crate::support::{TestApp, routes};

#[tokio::test]
async fn dropping_during_load_cancels_and_writes_nothing() {
    let app = TestApp::spawn().await;
    app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
    app.api.set_delay(Duration::from_millis(300));
    let admin = app.as_role(Role::Admin);

    let resource = Resource::new();
    resource.load(admin.awards().show("a1"));
    let mut states = resource.subscribe();
    assert!(states.borrow_and_update().is_loading());
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(resource);

    assert!(states.changed().await.is_err());
    assert!(states.borrow().is_loading());
    assert_eq!(app.api.hits("GET", "/awards/a1"), 1);
}

#[tokio::test]
async fn server_failure_becomes_a_failed_state() {
    let app = TestApp::spawn().await;
    app.api
        .fail_next("GET", routes::APPLICATIONS, 503, "Maintenance window");
    let admin = app.as_role(Role::Admin);

    let resource = Resource::new();
    resource.load(admin.applications().list(&Default::default(), &Default::default()));

    assert_eq!(
        resource.settled().await,
        LoadState::Failed("Maintenance window".into())
    );
}
