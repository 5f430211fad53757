use common::models::AwardCriteriaForm;
use common::role::Role;
use portal::ScoreSheet;

use crate::support::TestApp;

async fn seed_criteria(app: &TestApp) {
    let admin = app.as_role(Role::Admin);
    for (criteria, max_score) in [("crit-accuracy", 10.0), ("crit-impact", 5.0)] {
        admin
            .award_parts()
            .add_criteria(&AwardCriteriaForm {
                award_uuid: "a1".into(),
                criteria_uuid: criteria.into(),
                max_score,
            })
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn judge_scores_every_criterion_and_sees_them_on_reload() {
    let app = TestApp::spawn().await;
    app.seed_two_round_award();
    seed_criteria(&app).await;
    let judge = app.as_role(Role::Judge);

    let mut sheet = ScoreSheet::load(&judge, "a1", "app-approved", Some("r1".into()), Some("user-judge"))
        .await
        .unwrap();
    assert_eq!(sheet.entries().len(), 2);
    assert_eq!(sheet.entries()[0].criteria.display_name(), "Accuracy");

    let uuids = sheet
        .entries()
        .iter()
        .map(|e| e.criteria.uuid.clone())
        .collect::<Vec<_>>();
    sheet.set_score(&uuids[0], 9.0, Some("Strong sourcing".into()));
    sheet.set_score(&uuids[1], 4.0, None);
    let recorded = sheet.submit(&judge).await.unwrap();
    assert_eq!(recorded.len(), 2);

    let reloaded = ScoreSheet::load(&judge, "a1", "app-approved", Some("r1".into()), Some("user-judge"))
        .await
        .unwrap();
    assert_eq!(reloaded.total(), 13.0);
    assert_eq!(
        reloaded.entries()[0].comments.as_deref(),
        Some("Strong sourcing")
    );
}

#[tokio::test]
async fn out_of_range_score_is_not_sent() {
    let app = TestApp::spawn().await;
    app.seed_two_round_award();
    seed_criteria(&app).await;
    let judge = app.as_role(Role::Judge);
    let mut sheet = ScoreSheet::load(&judge, "a1", "app-approved", Some("r1".into()), None)
        .await
        .unwrap();
    let first = sheet.entries()[0].criteria.uuid.clone();
    let second = sheet.entries()[1].criteria.uuid.clone();
    sheet.set_score(&first, 11.0, None);
    sheet.set_score(&second, 2.0, None);

    let err = sheet.submit(&judge).await.unwrap_err();

    assert_eq!(
        err.field_errors().and_then(|e| e.get("scores[0].score")),
        Some("Accuracy must be between 0 and 10")
    );
    assert_eq!(
        app.api.hits("POST", "/award-application-scores/criteria"),
        0
    );
}
