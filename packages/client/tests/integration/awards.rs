use chrono::NaiveDate;
use common::models::{AwardCriteriaForm, AwardForm, Category, ListParams, NamedForm, ProjectDetailsForm};
use common::role::Role;

use crate::support::{TestApp, routes};

fn award_form(title: &str) -> AwardForm {
    AwardForm {
        title: title.into(),
        description: "Annual fellowship".into(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 10),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 10),
        judge_start_date: NaiveDate::from_ymd_opt(2026, 3, 15),
        judge_end_date: NaiveDate::from_ymd_opt(2026, 4, 15),
        is_active: true,
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_and_fetch_an_award() {
        let app = TestApp::spawn().await;
        let admin = app.as_role(Role::Admin);

        let created = admin.awards().create(&award_form("Data Desk 2026")).await.unwrap();
        let fetched = admin.awards().show(&created.uuid).await.unwrap();

        assert_eq!(fetched.title, "Data Desk 2026");
        assert!(!fetched.is_published);
        assert_eq!(app.api.hits("POST", routes::AWARDS), 1);
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_without_a_request() {
        let app = TestApp::spawn().await;
        let admin = app.as_role(Role::Admin);

        let mut form = award_form("");
        form.end_date = NaiveDate::from_ymd_opt(2025, 12, 1);
        let err = admin.awards().create(&form).await.unwrap_err();

        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("title"), Some("Title is required"));
        assert_eq!(fields.get("endDate"), Some("End date must be after start date"));
        assert_eq!(app.api.total_hits(), 0);
    }

    #[tokio::test]
    async fn invalid_edits_are_rejected_without_a_request() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let admin = app.as_role(Role::Admin);

        let err = admin
            .awards()
            .update_from_form("a1", award_form(" "))
            .await
            .unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("title"), Some("Title is required"));

        let err = admin
            .reference::<Category>()
            .update("c1", &NamedForm::default())
            .await
            .unwrap_err();
        assert_eq!(err.field_errors().unwrap().get("name"), Some("Name is required"));

        let err = admin
            .projects()
            .update_details("p1", &ProjectDetailsForm::default())
            .await
            .unwrap_err();
        assert!(err.field_errors().unwrap().contains("summary"));

        assert_eq!(app.api.total_hits(), 0);
    }

    #[tokio::test]
    async fn judge_cannot_create_an_award() {
        let app = TestApp::spawn().await;
        let judge = app.as_role(Role::Judge);

        let err = judge.awards().create(&award_form("Nope")).await.unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert_eq!(err.notification().as_deref(), Some("Insufficient permissions"));
    }

    #[tokio::test]
    async fn request_without_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let err = app.client.awards().list(&ListParams::default()).await.unwrap_err();

        assert!(err.is_unauthorized());
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn list_pages_and_searches_by_title() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            for i in 1..=12 {
                data.add_award(&format!("a{i}"), &format!("Climate Grant {i}"), &[]);
            }
            data.add_award("b1", "Health Reporting", &[]);
        });
        let admin = app.as_role(Role::Admin);

        let page = admin.awards().list(&ListParams::new(2, 5)).await.unwrap();
        assert_eq!(page.total, 13);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 5);

        let found = admin
            .awards()
            .list(&ListParams::default().with_search("health"))
            .await
            .unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.data[0].uuid, "b1");
    }

    #[tokio::test]
    async fn rounds_come_back_in_ordinal_order() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[("r2", 2, true), ("r1", 1, false)]);
        });
        let admin = app.as_role(Role::Admin);

        let rounds = admin.awards().rounds("a1").await.unwrap();

        let numbers = rounds.iter().map(|r| r.number).collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2]);
    }
}

mod publishing {
    use super::*;

    #[tokio::test]
    async fn publishing_sets_the_publication_time() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let admin = app.as_role(Role::SuperAdmin);

        let award = admin.awards().set_published("a1", true).await.unwrap();

        assert!(award.is_published);
        assert!(award.published_at.is_some());
        assert_eq!(app.api.hits("PUT", routes::AWARDS), 1);
    }

    #[tokio::test]
    async fn deleting_an_award_removes_it() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let admin = app.as_role(Role::Admin);

        admin.awards().delete("a1").await.unwrap();
        let err = admin.awards().show("a1").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(app.api.hits("DELETE", &routes::award("a1")), 1);
    }
}

mod parts {
    use super::*;

    #[tokio::test]
    async fn attached_criteria_carry_their_reference_record() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let admin = app.as_role(Role::Admin);

        admin
            .award_parts()
            .add_criteria(&AwardCriteriaForm {
                award_uuid: "a1".into(),
                criteria_uuid: "crit-impact".into(),
                max_score: 20.0,
            })
            .await
            .unwrap();
        let criteria = admin.awards().criterias("a1").await.unwrap();

        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].max_score, 20.0);
        assert_eq!(criteria[0].display_name(), "Impact");
    }
}
