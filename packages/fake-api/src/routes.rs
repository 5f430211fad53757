use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::FakeError;
use crate::handlers::{self, PageQuery, awards, reference};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .merge(award_routes())
        .merge(application_routes())
        .merge(score_routes())
        .merge(journalist_routes())
        .merge(project_routes());

    let router = [
        ("/award-categories", "award-categories"),
        ("/award-criterias", "award-criterias"),
        ("/award-judges", "award-judges"),
        ("/award-instructions", "award-instructions"),
    ]
    .into_iter()
    .fold(router, |router, (path, collection)| {
        router.merge(award_part_routes(path, collection))
    });

    let router = [
        ("/categories", "categories"),
        ("/criterias", "criterias"),
        ("/regions", "regions"),
        ("/media-channels", "media-channels"),
        ("/judges", "judges"),
    ]
    .into_iter()
    .fold(router, |router, (path, collection)| {
        router.merge(reference_routes(path, collection))
    });

    router
        .layer(middleware::from_fn_with_state(state.clone(), track))
        .with_state(state)
}

/// Count the hit, apply the configured delay, then serve or fail as queued.
async fn track(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let key = format!("{} {}", request.method(), request.uri().path());
    state.record_hit(&key);

    let delay = state.delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if let Some((status, message)) = state.take_failure(&key) {
        tracing::debug!(%key, status, "serving injected failure");
        return FakeError::Injected { status, message }.into_response();
    }
    next.run(request).await
}

fn award_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/awards",
            get(awards::list_awards)
                .post(awards::create_award)
                .put(awards::update_award),
        )
        .route(
            "/awards/{uuid}",
            get(awards::get_award).delete(awards::delete_award),
        )
        .route("/awards/{sub}/{uuid}", get(awards::award_collection))
        .route("/award-rounds", post(awards::add_round).put(awards::update_round))
        .route("/award-rounds/{uuid}", delete(awards::remove_round))
}

fn award_part_routes(path: &str, collection: &'static str) -> Router<AppState> {
    Router::new()
        .route(
            path,
            post(
                move |user: AuthUser, State(state): State<AppState>, Json(body): Json<Value>| {
                    awards::add_award_part(collection, user, state, body)
                },
            ),
        )
        .route(
            &format!("{path}/{{uuid}}"),
            delete(
                move |user: AuthUser, State(state): State<AppState>, Path(uuid): Path<String>| {
                    awards::remove_award_part(collection, user, state, uuid)
                },
            ),
        )
}

fn application_routes() -> Router<AppState> {
    use handlers::applications::*;

    Router::new()
        .route("/applications", get(list_applications))
        .route(
            "/applications/basic-info",
            post(create_basic_info).put(update_basic_info),
        )
        .route("/applications/media-info/{uuid}", put(update_media_info))
        .route("/applications/attachments/{uuid}", post(upload_attachments))
        .route("/applications/collaborators", post(save_collaborators))
        .route("/applications/member/{uuid}", delete(remove_member))
        .route("/applications/submit/{uuid}", put(submit_application))
        .route("/applications/status/{uuid}", put(set_status))
        .route(
            "/applications/{uuid}",
            get(get_application).delete(delete_application),
        )
}

fn score_routes() -> Router<AppState> {
    use handlers::scores::*;

    Router::new()
        .route("/award-application-scores/criteria", post(submit_criteria))
        .route(
            "/award-application-scores/initialize-round",
            post(initialize_round),
        )
        .route(
            "/award-application-scores/application/{uuid}",
            get(application_scores),
        )
}

fn journalist_routes() -> Router<AppState> {
    use handlers::journalists::*;

    Router::new()
        .route("/journalists/me", get(me))
        .route("/journalists/update-file", put(update_file))
        .route(
            "/journalists/professional-info",
            put(update_professional_info),
        )
        .route("/journalists/biography", put(update_biography))
}

fn project_routes() -> Router<AppState> {
    use handlers::projects::*;

    Router::new()
        .route("/projects", post(create_project).put(update_details))
        .route("/projects/{uuid}", get(get_project))
        .route("/projects/timeline/{uuid}", put(update_timeline))
        .route("/projects/team/{uuid}", put(update_team))
}

fn reference_routes(path: &str, collection: &'static str) -> Router<AppState> {
    Router::new()
        .route(
            path,
            get(
                move |_user: AuthUser,
                      State(state): State<AppState>,
                      Query(query): Query<PageQuery>| {
                    reference::list(collection, state, query)
                },
            )
            .post(
                move |user: AuthUser, State(state): State<AppState>, Json(body): Json<Value>| {
                    reference::create(collection, user, state, body)
                },
            )
            .put(
                move |user: AuthUser, State(state): State<AppState>, Json(body): Json<Value>| {
                    reference::update(collection, user, state, body)
                },
            ),
        )
        .route(
            &format!("{path}/{{uuid}}"),
            get(
                move |_user: AuthUser, State(state): State<AppState>, Path(uuid): Path<String>| {
                    reference::show(collection, state, uuid)
                },
            )
            .delete(
                move |user: AuthUser, State(state): State<AppState>, Path(uuid): Path<String>| {
                    reference::delete(collection, user, state, uuid)
                },
            ),
        )
}
