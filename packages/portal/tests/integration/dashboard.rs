use common::role::Role;
use common::status::ApplicationStatus;
use portal::dashboard::{AdminSummary, JudgeSummary, admin_summary, judge_summary};

use crate::support::TestApp;

#[tokio::test]
async fn admin_summary_counts_from_list_totals() {
    let app = TestApp::spawn().await;
    app.seed_two_round_award();
    app.api.with_data(|data| {
        data.add_application("app-rejected", "a1", None, ApplicationStatus::Rejected)
    });

    let summary = admin_summary(&app.as_role(Role::Admin)).await.unwrap();

    assert_eq!(
        summary,
        AdminSummary {
            awards: 1,
            applications: 3,
            pending: 1,
            approved: 1,
            rejected: 1,
            categories: 1,
            judges: 1,
        }
    );
    assert_eq!(app.api.hits("GET", "/applications"), 4);
}

#[tokio::test]
async fn judge_summary_counts_screening() {
    let app = TestApp::spawn().await;
    app.seed_two_round_award();
    app.api.with_data(|data| {
        data.add_application("in-r1", "a1", Some("r1"), ApplicationStatus::Approved)
    });

    let summary = judge_summary(&app.as_role(Role::Judge)).await.unwrap();

    assert_eq!(
        summary,
        JudgeSummary {
            awards: 1,
            applications: 3,
            in_screening: 2,
        }
    );
}

#[tokio::test]
async fn one_failed_count_fails_the_summary() {
    let app = TestApp::spawn().await;
    app.api.fail_next("GET", "/judges", 500, "Judges unavailable");

    let err = admin_summary(&app.as_role(Role::Admin)).await.unwrap_err();

    assert_eq!(err.notification().as_deref(), Some("Judges unavailable"));
}
