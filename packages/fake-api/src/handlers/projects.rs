use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use common::models::{Project, ProjectDetailsForm, ProjectTeamForm, ProjectTimelineForm};
use common::validation::Validate;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::error::FakeError;
use crate::state::{AppState, body_uuid, new_uuid};

/// Project steps are counted from 0; `current_stage` is the next step to show.
fn advance(project: &mut Project, stage: u32) {
    project.current_stage = Some(project.current_stage.unwrap_or(0).max(stage));
}

pub async fn get_project(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<Project>, FakeError> {
    Ok(Json(state.data().project_mut(&uuid)?.clone()))
}

pub async fn create_project(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<ProjectDetailsForm>,
) -> Result<(StatusCode, Json<Project>), FakeError> {
    form.validate()?;
    let project = Project {
        uuid: new_uuid(),
        title: form.title,
        summary: form.summary,
        award_uuid: form.award_uuid,
        current_stage: Some(1),
        ..Default::default()
    };
    state.data().projects.push(project.clone());
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_details(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Project>, FakeError> {
    let uuid = body_uuid(&body)?;
    let form: ProjectDetailsForm = serde_json::from_value(body)?;
    form.validate()?;
    let mut data = state.data();
    let project = data.project_mut(&uuid)?;
    project.title = form.title;
    project.summary = form.summary;
    project.award_uuid = form.award_uuid;
    advance(project, 1);
    Ok(Json(project.clone()))
}

pub async fn update_timeline(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(form): Json<ProjectTimelineForm>,
) -> Result<Json<Project>, FakeError> {
    form.validate()?;
    let mut data = state.data();
    let project = data.project_mut(&uuid)?;
    project.start_date = form.start_date;
    project.end_date = form.end_date;
    project.budget = Some(form.budget);
    advance(project, 2);
    Ok(Json(project.clone()))
}

pub async fn update_team(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(form): Json<ProjectTeamForm>,
) -> Result<Json<Project>, FakeError> {
    form.validate()?;
    let mut data = state.data();
    let project = data.project_mut(&uuid)?;
    project.members = form.members;
    advance(project, 3);
    Ok(Json(project.clone()))
}
