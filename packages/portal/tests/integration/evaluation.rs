use std::time::Duration;

use common::role::Role;
use common::stage::{EvaluationStage, TransitionError};
use common::status::ApplicationStatus;
use portal::evaluation::{EvaluationBoard, EvaluationError, Tab};

use crate::support::{TestApp, routes};

fn uuids(board_state: &portal::LoadState<portal::evaluation::ApplicationPage>) -> Vec<String> {
    let mut uuids = board_state
        .data()
        .map(|page| page.data.iter().map(|a| a.uuid.clone()).collect::<Vec<_>>())
        .unwrap_or_default();
    uuids.sort();
    uuids
}

mod tabs {
    use super::*;

    #[tokio::test]
    async fn current_round_is_selected_on_load() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| {
            data.add_award("a1", "Fellowship", &[("r1created", 1, false), ("r2", 2, true)]);
            data.set_current_round("a1", Some("r2"));
            data.add_application("in-r2", "a1", Some("r2"), ApplicationStatus::Approved);
            data.add_application("in-screening", "a1", None, ApplicationStatus::Pending);
        });

        let board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();

        assert_eq!(board.current_tab(), &Tab::Round("r2".into()));
        assert_eq!(board.current_tab().key(), "r2");
        assert_eq!(board.stage(), EvaluationStage::Final(2));
        assert_eq!(uuids(&board.settled().await), vec!["in-r2".to_string()]);
    }

    #[tokio::test]
    async fn screening_is_selected_without_a_current_round() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();

        let board = EvaluationBoard::open(app.as_role(Role::Judge), "a1")
            .await
            .unwrap();

        assert_eq!(board.current_tab(), &Tab::Screening);
        assert_eq!(
            board.tabs(),
            vec![
                Tab::All,
                Tab::Screening,
                Tab::Round("r1".into()),
                Tab::Round("r2".into())
            ]
        );
        assert_eq!(board.tab_label(&Tab::Round("r1".into())), "Round 1");
        assert_eq!(uuids(&board.settled().await).len(), 2);
    }

    #[tokio::test]
    async fn new_search_resets_the_page_and_tabs_keep_their_own_paging() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        let mut board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();

        board.set_page(3);
        assert_eq!(board.list().page(), 3);
        board.search("approved");
        assert_eq!(board.list().page(), 1);
        assert_eq!(board.list().search(), "approved");

        board.set_page(2);
        board.select_tab(Tab::All).unwrap();
        assert_eq!(board.list().page(), 1);
        board.select_tab(Tab::Screening).unwrap();
        assert_eq!(board.list().page(), 2);
        assert_eq!(board.list().search(), "approved");
    }

    #[tokio::test]
    async fn every_tab_uses_the_configured_page_size() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        app.api.with_data(|data| {
            for i in 0..10 {
                data.add_application(&format!("extra-{i}"), "a1", None, ApplicationStatus::Pending);
            }
        });
        let mut board = EvaluationBoard::open_with_page_size(app.as_role(Role::Admin), "a1", 25)
            .await
            .unwrap();

        assert_eq!(board.list().per_page(), 25);
        assert_eq!(uuids(&board.settled().await).len(), 12);

        board.select_tab(Tab::All).unwrap();
        board.set_page(1);
        assert_eq!(board.list().per_page(), 25);
        assert_eq!(board.list_for(&Tab::Round("r2".into())).per_page(), 25);
    }

    #[tokio::test]
    async fn rapid_tab_changes_apply_only_the_last_response() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        app.api.with_data(|data| {
            data.add_application("in-r1", "a1", Some("r1"), ApplicationStatus::Approved)
        });
        let mut board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();
        board.settled().await;
        app.api.set_delay(Duration::from_millis(100));

        board.select_tab(Tab::All).unwrap();
        board.select_tab(Tab::Round("r1".into())).unwrap();

        assert_eq!(uuids(&board.settled().await), vec!["in-r1".to_string()]);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(uuids(&board.applications().state()), vec!["in-r1".to_string()]);
    }

    #[tokio::test]
    async fn unknown_round_tab_is_rejected() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        let mut board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();

        let err = board.select_tab(Tab::Round("r9".into())).unwrap_err();
        assert!(matches!(err, EvaluationError::UnknownTab(_)));
        assert_eq!(board.current_tab(), &Tab::Screening);
    }
}

mod completion {
    use super::*;

    #[tokio::test]
    async fn completing_screening_opens_the_first_round() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        let mut board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();

        let transition = board.complete_screening().await.unwrap();

        assert_eq!(transition.opens_round, "r1");
        assert_eq!(board.stage(), EvaluationStage::Round(1));
        assert_eq!(board.current_tab(), &Tab::Round("r1".into()));
        assert_eq!(app.api.hits("POST", routes::INITIALIZE_ROUND), 1);
        assert_eq!(
            uuids(&board.settled().await),
            vec!["app-approved".to_string()]
        );
    }

    #[tokio::test]
    async fn completing_the_last_scored_round_reaches_final() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        let mut board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();

        board.complete_screening().await.unwrap();
        let transition = board.complete_round().await.unwrap();

        assert_eq!(transition.to, EvaluationStage::Final(2));
        assert_eq!(board.stage(), EvaluationStage::Final(2));
        assert_eq!(board.award().current_round().map(|r| r.uuid.as_str()), Some("r2"));
    }

    #[tokio::test]
    async fn failed_re_read_does_not_reopen_the_same_round() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        let mut board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();
        app.api.fail_next("GET", "/awards/a1", 503, "Maintenance window");

        let err = board.complete_screening().await.unwrap_err();

        assert_eq!(err.notification().as_deref(), Some("Maintenance window"));
        assert_eq!(board.stage(), EvaluationStage::Round(1));
        assert_eq!(board.current_tab(), &Tab::Round("r1".into()));

        let transition = board.complete_round().await.unwrap();

        assert_eq!(transition.opens_round, "r2");
        assert_eq!(board.stage(), EvaluationStage::Final(2));
        assert_eq!(app.api.hits("POST", routes::INITIALIZE_ROUND), 2);
    }

    #[tokio::test]
    async fn final_round_cannot_be_completed() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        app.api.with_data(|data| data.set_current_round("a1", Some("r2")));
        let mut board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();

        let err = board.complete_round().await.unwrap_err();

        assert!(matches!(
            err,
            EvaluationError::Transition(TransitionError::FinalRound)
        ));
        assert_eq!(app.api.hits("POST", routes::INITIALIZE_ROUND), 0);
    }

    #[tokio::test]
    async fn award_without_rounds_cannot_leave_screening() {
        let app = TestApp::spawn().await;
        app.api.with_data(|data| data.add_award("a1", "Fellowship", &[]));
        let mut board = EvaluationBoard::open(app.as_role(Role::Admin), "a1")
            .await
            .unwrap();

        let err = board.complete_screening().await.unwrap_err();

        assert_eq!(
            err.notification().as_deref(),
            Some("This award has no rounds to move into")
        );
        assert_eq!(app.api.hits("POST", routes::INITIALIZE_ROUND), 0);
    }

    #[tokio::test]
    async fn judges_are_refused_by_the_server() {
        let app = TestApp::spawn().await;
        app.seed_two_round_award();
        let mut board = EvaluationBoard::open(app.as_role(Role::Judge), "a1")
            .await
            .unwrap();

        let err = board.complete_screening().await.unwrap_err();

        assert_eq!(err.notification().as_deref(), Some("Insufficient permissions"));
        assert_eq!(board.stage(), EvaluationStage::Screening);
    }
}
