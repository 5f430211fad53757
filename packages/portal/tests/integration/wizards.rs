use std::io::Write;

use chrono::NaiveDate;
use common::models::{
    AttachmentsForm, BasicInfoForm, BiographyForm, CollaboratorsForm, MediaInfoForm, MemberForm,
    ProfessionalInfoForm, ProfileBasicInfoForm, ProjectDetailsForm, ProjectTeamForm,
    ProjectTimelineForm, ReviewForm,
};
use common::role::Role;
use common::status::ApplicationStatus;
use portal::flow::{FlowError, StepFlow};
use portal::wizards::{
    ApplicationInput, ApplicationStep, ApplicationWizard, ProfileInput, ProfileStep,
    ProfileWizard, ProjectInput, ProjectStep, ProjectWizard,
};

use crate::support::{TestApp, routes};

fn profile_basic(first_name: &str) -> ProfileBasicInfoForm {
    ProfileBasicInfoForm {
        first_name: first_name.into(),
        last_name: "Otieno".into(),
        phone_number: "+254 700 000000".into(),
        gender: Some("female".into()),
        region_uuid: "reg-coast".into(),
        avatar: None,
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn empty_first_name_blocks_basic_info_without_a_request() {
        let app = TestApp::spawn().await;
        let journalist = app.as_role(Role::Journalist);
        let mut flow = ProfileWizard::resume(journalist).await.unwrap();
        assert_eq!(flow.current_step(), Some(ProfileStep::BasicInfo));

        let err = flow
            .submit(ProfileInput::BasicInfo(profile_basic("")))
            .await
            .unwrap_err();

        assert_eq!(
            err.field_errors().and_then(|e| e.get("firstName")),
            Some("First Name is required")
        );
        assert_eq!(app.api.hits("PUT", routes::UPDATE_FILE), 0);
        assert_eq!(flow.current_step(), Some(ProfileStep::BasicInfo));
        assert!(!flow.is_saving());
    }

    #[tokio::test]
    async fn walks_all_steps_and_merges_the_saved_profile() {
        let app = TestApp::spawn().await;
        let mut flow = StepFlow::new(ProfileWizard::new(app.as_role(Role::Journalist)));
        assert_eq!(flow.current_number(), 1);

        flow.submit(ProfileInput::BasicInfo(profile_basic("Wanjiru")))
            .await
            .unwrap();
        assert_eq!(flow.current_step(), Some(ProfileStep::ProfessionalInfo));
        assert_eq!(flow.data().basic.first_name, "Wanjiru");
        assert_eq!(app.api.hits("PUT", routes::UPDATE_FILE), 1);

        flow.submit(ProfileInput::ProfessionalInfo(ProfessionalInfoForm {
            media_channel_uuid: "mc-radio".into(),
            position: "Reporter".into(),
            years_of_experience: 6,
        }))
        .await
        .unwrap();
        flow.submit(ProfileInput::Biography(BiographyForm {
            biography: "Covers water and land rights.".into(),
            website: Some("https://wanjiru.example.org".into()),
            twitter: None,
            linkedin: None,
        }))
        .await
        .unwrap();

        assert!(flow.is_complete());
        let saved = flow.data().profile.as_ref().unwrap();
        assert_eq!(saved.current_stage, Some(4));
        assert_eq!(saved.position.as_deref(), Some("Reporter"));
    }

    #[tokio::test]
    async fn failed_save_keeps_the_step_and_reports_the_server_message() {
        let app = TestApp::spawn().await;
        app.api
            .fail_next("PUT", routes::UPDATE_FILE, 500, "Storage unavailable");
        let mut flow = StepFlow::new(ProfileWizard::new(app.as_role(Role::Journalist)));

        let err = flow
            .submit(ProfileInput::BasicInfo(profile_basic("Wanjiru")))
            .await
            .unwrap_err();

        assert_eq!(err.notification().as_deref(), Some("Storage unavailable"));
        assert_eq!(flow.current_step(), Some(ProfileStep::BasicInfo));
        assert!(!flow.is_saving());

        flow.submit(ProfileInput::BasicInfo(profile_basic("Wanjiru")))
            .await
            .unwrap();
        assert_eq!(flow.current_step(), Some(ProfileStep::ProfessionalInfo));
    }

    #[tokio::test]
    async fn resumes_at_server_stage_with_prefilled_fields() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.journalist.first_name = "Wanjiru".into();
            data.journalist.position = Some("Editor".into());
            data.journalist.current_stage = Some(3);
        });

        let flow = ProfileWizard::resume(app.as_role(Role::Journalist))
            .await
            .unwrap();

        assert_eq!(flow.current_step(), Some(ProfileStep::Biography));
        assert_eq!(flow.data().basic.first_name, "Wanjiru");
        assert_eq!(flow.data().professional.position, "Editor");
        assert!(flow.is_unlocked(ProfileStep::BasicInfo));
    }

    #[tokio::test]
    async fn submitting_a_step_out_of_order_is_rejected() {
        let app = TestApp::spawn().await;
        let mut flow = StepFlow::new(ProfileWizard::new(app.as_role(Role::Journalist)));

        let err = flow
            .submit(ProfileInput::Biography(BiographyForm {
                biography: "Too early".into(),
                ..Default::default()
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::WrongStep { .. }));
        assert_eq!(app.api.total_hits(), 0);
    }
}

mod application {
    use super::*;

    fn basic(group: bool) -> BasicInfoForm {
        BasicInfoForm {
            award_uuid: "a1".into(),
            category_uuid: "cat-investigative".into(),
            title: "Water for Kibera".into(),
            description: "A year following the water vendors".into(),
            is_group_application: group,
        }
    }

    fn media() -> MediaInfoForm {
        MediaInfoForm {
            media_channel_uuid: "mc-radio".into(),
            publication_date: NaiveDate::from_ymd_opt(2026, 3, 14),
            story_link: "https://radio.example.org/water".into(),
        }
    }

    fn attachment(dir: &tempfile::TempDir) -> AttachmentsForm {
        let path = dir.path().join("story.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.4 story").unwrap();
        AttachmentsForm { files: vec![path] }
    }

    #[tokio::test]
    async fn group_application_adds_the_collaborators_step() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let dir = tempfile::tempdir().unwrap();
        let mut flow = ApplicationWizard::start(app.as_role(Role::Journalist), "a1");
        assert_eq!(flow.steps().len(), 4);

        flow.submit(ApplicationInput::BasicInfo(basic(true)))
            .await
            .unwrap();
        assert_eq!(
            flow.steps(),
            vec![
                ApplicationStep::BasicInfo,
                ApplicationStep::MediaInfo,
                ApplicationStep::Attachments,
                ApplicationStep::Collaborators,
                ApplicationStep::Review,
            ]
        );
        assert!(flow.data().uuid.is_some());

        flow.submit(ApplicationInput::MediaInfo(media())).await.unwrap();
        flow.submit(ApplicationInput::Attachments(attachment(&dir)))
            .await
            .unwrap();
        assert_eq!(flow.current_step(), Some(ApplicationStep::Collaborators));
        assert_eq!(flow.current_number(), 4);

        flow.submit(ApplicationInput::Collaborators(CollaboratorsForm {
            members: vec![MemberForm {
                full_name: "Kofi Mensah".into(),
                email: "kofi@example.org".into(),
                role: Some("Photographer".into()),
            }],
        }))
        .await
        .unwrap();
        flow.submit(ApplicationInput::Review(ReviewForm { confirm: true }))
            .await
            .unwrap();

        assert!(flow.is_complete());
        let record = flow.data().record.as_ref().unwrap();
        assert!(record.is_submitted);
        assert_eq!(record.members.len(), 1);
    }

    #[tokio::test]
    async fn revisiting_basic_info_updates_and_keeps_later_answers() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let mut flow = ApplicationWizard::start(app.as_role(Role::Journalist), "a1");

        flow.submit(ApplicationInput::BasicInfo(basic(true)))
            .await
            .unwrap();
        flow.submit(ApplicationInput::MediaInfo(media())).await.unwrap();

        flow.go_to(ApplicationStep::BasicInfo).unwrap();
        flow.submit(ApplicationInput::BasicInfo(basic(false)))
            .await
            .unwrap();

        assert_eq!(app.api.hits("POST", routes::BASIC_INFO), 1);
        assert_eq!(app.api.hits("PUT", routes::BASIC_INFO), 1);
        assert!(!flow.steps().contains(&ApplicationStep::Collaborators));
        assert_eq!(flow.data().media, media());
        assert!(flow.is_unlocked(ApplicationStep::Attachments));
    }

    #[tokio::test]
    async fn back_never_submits() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let mut flow = ApplicationWizard::start(app.as_role(Role::Journalist), "a1");
        flow.submit(ApplicationInput::BasicInfo(basic(false)))
            .await
            .unwrap();
        let before = app.api.total_hits();

        assert_eq!(flow.back(), Some(ApplicationStep::BasicInfo));
        assert_eq!(flow.back(), None);
        assert_eq!(app.api.total_hits(), before);
        assert!(flow.go_to(ApplicationStep::Review).is_err());
    }

    #[tokio::test]
    async fn resumes_an_existing_application_at_its_stage() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[]);
            data.add_application("app-1", "a1", None, ApplicationStatus::Pending);
            data.application_mut("app-1").unwrap().current_stage = Some(3);
        });

        let flow = ApplicationWizard::resume(app.as_role(Role::Journalist), "app-1")
            .await
            .unwrap();

        assert_eq!(flow.current_step(), Some(ApplicationStep::Attachments));
        assert_eq!(flow.data().uuid.as_deref(), Some("app-1"));
        assert_eq!(flow.data().basic.title, "Story app-1");
    }
}

mod project {
    use super::*;

    #[tokio::test]
    async fn counts_from_zero_and_creates_then_updates() {
        let app = TestApp::spawn().await;
        let journalist = app.as_role(Role::Journalist);
        let mut flow = StepFlow::new(ProjectWizard::new(journalist.clone()));
        assert_eq!(flow.current_number(), 0);

        flow.submit(ProjectInput::Details(ProjectDetailsForm {
            title: "Drought diaries".into(),
            summary: "Six months in Turkana".into(),
            award_uuid: None,
        }))
        .await
        .unwrap();
        assert_eq!(flow.current_step(), Some(ProjectStep::Timeline));
        assert_eq!(flow.current_number(), 1);
        assert_eq!(app.api.hits("POST", routes::PROJECTS), 1);

        flow.submit(ProjectInput::Timeline(ProjectTimelineForm {
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            budget: 4800.0,
        }))
        .await
        .unwrap();

        let uuid = flow.data().uuid.clone().unwrap();
        let resumed = ProjectWizard::resume(journalist, &uuid).await.unwrap();
        assert_eq!(resumed.current_step(), Some(ProjectStep::Team));
        assert_eq!(resumed.data().timeline.budget, 4800.0);

        flow.submit(ProjectInput::Team(ProjectTeamForm {
            members: vec![MemberForm {
                full_name: "Achieng Odhiambo".into(),
                email: "achieng@example.org".into(),
                role: None,
            }],
        }))
        .await
        .unwrap();
        assert!(flow.is_complete());
        assert_eq!(app.api.hits("PUT", routes::PROJECTS), 0);
    }

    #[tokio::test]
    async fn invalid_timeline_is_not_sent() {
        let app = TestApp::spawn().await;
        let mut flow = StepFlow::new(ProjectWizard::new(app.as_role(Role::Journalist)));
        flow.submit(ProjectInput::Details(ProjectDetailsForm {
            title: "Drought diaries".into(),
            summary: "Six months in Turkana".into(),
            award_uuid: None,
        }))
        .await
        .unwrap();

        let err = flow
            .submit(ProjectInput::Timeline(ProjectTimelineForm {
                start_date: NaiveDate::from_ymd_opt(2026, 11, 1),
                end_date: NaiveDate::from_ymd_opt(2026, 5, 1),
                budget: 100.0,
            }))
            .await
            .unwrap_err();

        assert_eq!(
            err.field_errors().and_then(|e| e.get("endDate")),
            Some("End date must be after start date")
        );
        assert_eq!(flow.current_step(), Some(ProjectStep::Timeline));
    }
}
