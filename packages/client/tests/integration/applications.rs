use std::io::Write;

use client::GENERIC_ERROR_MESSAGE;
use common::models::{
    ApplicationFilter, AttachmentsForm, BasicInfoForm, CollaboratorsForm, ListParams, MemberForm,
    ReviewForm,
};
use common::role::Role;
use common::status::ApplicationStatus;

use crate::support::{TestApp, routes};

fn basic_info(award_uuid: &str, group: bool) -> BasicInfoForm {
    BasicInfoForm {
        award_uuid: award_uuid.into(),
        category_uuid: "cat-investigative".into(),
        title: "Water for Kibera".into(),
        description: "A year following the water vendors".into(),
        is_group_application: group,
    }
}

mod basic_info {
    use super::*;

    #[tokio::test]
    async fn first_save_creates_and_later_saves_update() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let journalist = app.as_role(Role::Journalist);
        let service = journalist.applications();

        let created = service.save_basic_info(None, &basic_info("a1", false)).await.unwrap();
        assert_eq!(created.current_stage, Some(2));

        let mut form = basic_info("a1", true);
        form.title = "Water for Mathare".into();
        let updated = service
            .save_basic_info(Some(&created.uuid), &form)
            .await
            .unwrap();

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.title, "Water for Mathare");
        assert!(updated.is_group_application);
        assert_eq!(app.api.hits("POST", routes::BASIC_INFO), 1);
        assert_eq!(app.api.hits("PUT", routes::BASIC_INFO), 1);
    }
}

mod attachments {
    use super::*;

    #[tokio::test]
    async fn files_are_uploaded_as_multipart() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[]);
            data.add_application("app-1", "a1", None, ApplicationStatus::Pending);
        });
        let journalist = app.as_role(Role::Journalist);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.pdf");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.4 test")
            .unwrap();

        let updated = journalist
            .applications()
            .upload_attachments("app-1", &AttachmentsForm { files: vec![path] })
            .await
            .unwrap();

        assert_eq!(updated.attachments.len(), 1);
        assert_eq!(updated.attachments[0].file_name, "story.pdf");
        assert_eq!(app.api.hits("POST", &routes::attachments("app-1")), 1);
    }

    #[tokio::test]
    async fn unsupported_file_type_is_rejected_locally() {
        let app = TestApp::spawn().await;
        let journalist = app.as_role(Role::Journalist);

        let err = journalist
            .applications()
            .upload_attachments(
                "app-1",
                &AttachmentsForm {
                    files: vec!["setup.exe".into()],
                },
            )
            .await
            .unwrap_err();

        assert!(err.field_errors().unwrap().contains("files[0]"));
        assert_eq!(app.api.total_hits(), 0);
    }
}

mod collaborators {
    use super::*;

    #[tokio::test]
    async fn members_can_be_saved_and_removed() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[]);
            data.add_application("app-1", "a1", None, ApplicationStatus::Pending);
        });
        let service = app.as_role(Role::Journalist).applications();

        let saved = service
            .save_collaborators(
                "app-1",
                &CollaboratorsForm {
                    members: vec![
                        MemberForm {
                            full_name: "Kofi Mensah".into(),
                            email: "kofi@example.org".into(),
                            role: Some("Photographer".into()),
                        },
                        MemberForm {
                            full_name: "Achieng Odhiambo".into(),
                            email: "achieng@example.org".into(),
                            role: None,
                        },
                    ],
                },
            )
            .await
            .unwrap();
        assert_eq!(saved.members.len(), 2);

        service.remove_member(&saved.members[0].uuid).await.unwrap();
        let app_record = service.show("app-1").await.unwrap();

        assert_eq!(app_record.members.len(), 1);
        assert_eq!(app_record.members[0].full_name, "Achieng Odhiambo");
    }
}

mod submission {
    use super::*;

    #[tokio::test]
    async fn unconfirmed_declaration_never_reaches_the_server() {
        let app = TestApp::spawn().await;
        let service = app.as_role(Role::Journalist).applications();

        let err = service
            .submit("app-1", &ReviewForm { confirm: false })
            .await
            .unwrap_err();

        assert_eq!(
            err.field_errors().unwrap().get("confirm"),
            Some("You must confirm the declaration before submitting")
        );
        assert_eq!(app.api.hits("PUT", &routes::submit("app-1")), 0);
    }

    #[tokio::test]
    async fn server_failure_surfaces_its_message() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[]);
            data.add_application("app-1", "a1", None, ApplicationStatus::Pending);
        });
        app.api
            .fail_next("PUT", &routes::submit("app-1"), 422, "Applications are closed");
        let service = app.as_role(Role::Journalist).applications();

        let err = service
            .submit("app-1", &ReviewForm { confirm: true })
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(422));
        assert_eq!(err.notification().as_deref(), Some("Applications are closed"));
    }

    #[tokio::test]
    async fn server_failure_without_message_gets_the_generic_text() {
        let app = TestApp::spawn().await;
        app.api.fail_next("PUT", &routes::submit("app-1"), 500, "");
        let service = app.as_role(Role::Journalist).applications();

        let err = service
            .submit("app-1", &ReviewForm { confirm: true })
            .await
            .unwrap_err();

        assert_eq!(err.notification().as_deref(), Some(GENERIC_ERROR_MESSAGE));
    }
}

mod review {
    use super::*;

    #[tokio::test]
    async fn screening_filter_excludes_applications_already_in_a_round() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[("r1", 1, true)]);
            data.add_application("app-1", "a1", None, ApplicationStatus::Pending);
            data.add_application("app-2", "a1", Some("r1"), ApplicationStatus::Approved);
        });
        let service = app.as_role(Role::Admin).applications();

        let screening = service
            .list(
                &ListParams::default(),
                &ApplicationFilter {
                    award_uuid: Some("a1".into()),
                    stage: Some("screening".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let in_round = service
            .list(
                &ListParams::default(),
                &ApplicationFilter {
                    award_uuid: Some("a1".into()),
                    round_uuid: Some("r1".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(screening.data.len(), 1);
        assert_eq!(screening.data[0].uuid, "app-1");
        assert_eq!(in_round.data.len(), 1);
        assert_eq!(in_round.data[0].uuid, "app-2");
        assert_eq!(app.api.hits("GET", routes::APPLICATIONS), 2);
    }

    #[tokio::test]
    async fn admin_can_approve_an_application() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[]);
            data.add_application("app-1", "a1", None, ApplicationStatus::Pending);
        });
        let admin = app.as_role(Role::Admin);

        let updated = admin
            .applications()
            .set_status("app-1", ApplicationStatus::Approved)
            .await
            .unwrap();

        assert_eq!(updated.status, ApplicationStatus::Approved);
    }
}
