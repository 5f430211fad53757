use client::Session;
use common::models::LoginForm;
use common::role::Role;
use fake_api::PASSWORD;

use crate::support::{TestApp, routes};

#[tokio::test]
async fn login_token_decodes_into_a_session() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .auth()
        .login(&LoginForm {
            email: "judge@example.org".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();
    let session = Session::from_token(response.token).unwrap();

    assert_eq!(session.role(), Role::Judge);
    assert_eq!(session.subject(), "judge@example.org");
    assert_eq!(app.api.hits("POST", routes::LOGIN), 1);
}

#[tokio::test]
async fn wrong_password_is_reported_by_the_server() {
    let app = TestApp::spawn().await;

    let err = app
        .client
        .auth()
        .login(&LoginForm {
            email: "judge@example.org".into(),
            password: "guess".into(),
        })
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(
        err.notification().as_deref(),
        Some("Invalid email or password")
    );
}

#[tokio::test]
async fn malformed_email_is_caught_before_sending() {
    let app = TestApp::spawn().await;

    let err = app
        .client
        .auth()
        .login(&LoginForm {
            email: "judge".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap_err();

    assert!(err.field_errors().unwrap().contains("email"));
    assert_eq!(app.api.total_hits(), 0);
}
