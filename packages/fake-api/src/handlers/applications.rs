use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use common::models::{
    ApplicationAward, ApplicationMember, Attachment, BasicInfoForm, MediaInfoForm, MemberForm,
    Paginated, ReviewForm,
};
use common::status::ApplicationStatus;
use common::validation::Validate;
use serde::Deserialize;
use serde_json::Value;

use super::PageQuery;
use crate::auth::AuthUser;
use crate::error::FakeError;
use crate::state::{AppState, body_uuid, new_uuid};

fn advance(app: &mut ApplicationAward, stage: u32) {
    app.current_stage = Some(app.current_stage.unwrap_or(1).max(stage));
}

pub async fn list_applications(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<ApplicationAward>>, FakeError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<ApplicationStatus>)
        .transpose()
        .map_err(|e| FakeError::Validation(e.to_string()))?;
    let data = state.data();
    let items = data
        .applications
        .iter()
        .filter(|a| query.award_uuid.as_ref().is_none_or(|u| &a.award_uuid == u))
        .filter(|a| query.round_uuid.is_none() || a.round_uuid == query.round_uuid)
        .filter(|a| query.stage.as_deref() != Some("screening") || a.round_uuid.is_none())
        .filter(|a| status.is_none_or(|s| a.status == s))
        .filter(|a| query.matches_search(&a.title))
        .map(|a| data.application_view(a))
        .collect();
    Ok(Json(query.paginate(items)))
}

pub async fn get_application(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<ApplicationAward>, FakeError> {
    let mut data = state.data();
    let app = data.application_mut(&uuid)?.clone();
    Ok(Json(data.application_view(&app)))
}

pub async fn create_basic_info(
    user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<BasicInfoForm>,
) -> Result<(StatusCode, Json<ApplicationAward>), FakeError> {
    form.validate()?;
    let mut data = state.data();
    data.award_mut(&form.award_uuid)?;
    let app = ApplicationAward {
        uuid: new_uuid(),
        award_uuid: form.award_uuid,
        category_uuid: Some(form.category_uuid),
        media_channel_uuid: None,
        title: form.title,
        description: Some(form.description),
        is_group_application: form.is_group_application,
        status: ApplicationStatus::Pending,
        current_stage: Some(2),
        round_uuid: None,
        story_link: None,
        publication_date: None,
        applicant_name: Some(user.email),
        is_submitted: false,
        members: Vec::new(),
        attachments: Vec::new(),
        scores: Vec::new(),
        total_score: None,
    };
    data.applications.push(app.clone());
    Ok((StatusCode::CREATED, Json(app)))
}

pub async fn update_basic_info(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ApplicationAward>, FakeError> {
    let uuid = body_uuid(&body)?;
    let form: BasicInfoForm = serde_json::from_value(body)?;
    form.validate()?;
    let mut data = state.data();
    let app = data.application_mut(&uuid)?;
    app.award_uuid = form.award_uuid;
    app.category_uuid = Some(form.category_uuid);
    app.title = form.title;
    app.description = Some(form.description);
    app.is_group_application = form.is_group_application;
    advance(app, 2);
    Ok(Json(app.clone()))
}

pub async fn update_media_info(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(form): Json<MediaInfoForm>,
) -> Result<Json<ApplicationAward>, FakeError> {
    form.validate()?;
    let mut data = state.data();
    let app = data.application_mut(&uuid)?;
    app.media_channel_uuid = Some(form.media_channel_uuid);
    app.publication_date = form.publication_date;
    app.story_link = Some(form.story_link);
    advance(app, 3);
    Ok(Json(app.clone()))
}

pub async fn upload_attachments(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApplicationAward>, FakeError> {
    let mut attachments = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FakeError::Validation(e.to_string()))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| FakeError::Validation(e.to_string()))?;
        tracing::debug!(file_name, size = bytes.len(), "attachment received");
        attachments.push(Attachment {
            uuid: new_uuid(),
            url: Some(format!("/uploads/{file_name}")),
            file_name,
        });
    }
    if attachments.is_empty() {
        return Err(FakeError::Validation("At least one file is required".into()));
    }

    let mut data = state.data();
    let app = data.application_mut(&uuid)?;
    app.attachments.extend(attachments);
    advance(app, 4);
    Ok(Json(app.clone()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorsBody {
    application_uuid: String,
    members: Vec<MemberForm>,
}

pub async fn save_collaborators(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CollaboratorsBody>,
) -> Result<Json<ApplicationAward>, FakeError> {
    for member in &body.members {
        member.validate()?;
    }
    let mut data = state.data();
    let app = data.application_mut(&body.application_uuid)?;
    app.members = body
        .members
        .into_iter()
        .map(|m| ApplicationMember {
            uuid: new_uuid(),
            full_name: m.full_name,
            email: m.email,
            role: m.role,
        })
        .collect();
    advance(app, 5);
    Ok(Json(app.clone()))
}

pub async fn remove_member(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<StatusCode, FakeError> {
    let mut data = state.data();
    let app = data
        .applications
        .iter_mut()
        .find(|a| a.members.iter().any(|m| m.uuid == uuid))
        .ok_or_else(|| FakeError::NotFound(format!("Member {uuid} not found")))?;
    app.members.retain(|m| m.uuid != uuid);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn submit_application(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(form): Json<ReviewForm>,
) -> Result<Json<ApplicationAward>, FakeError> {
    form.validate()?;
    let mut data = state.data();
    let app = data.application_mut(&uuid)?;
    app.is_submitted = true;
    let done = if app.is_group_application { 6 } else { 5 };
    advance(app, done);
    Ok(Json(app.clone()))
}

#[derive(Deserialize)]
pub struct StatusBody {
    status: ApplicationStatus,
}

pub async fn set_status(
    user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<ApplicationAward>, FakeError> {
    user.require_staff()?;
    let mut data = state.data();
    let app = data.application_mut(&uuid)?;
    app.status = body.status;
    Ok(Json(app.clone()))
}

pub async fn delete_application(
    user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<StatusCode, FakeError> {
    user.require_staff()?;
    let mut data = state.data();
    data.application_mut(&uuid)?;
    data.applications.retain(|a| a.uuid != uuid);
    data.scores.retain(|s| s.application_uuid != uuid);
    Ok(StatusCode::NO_CONTENT)
}
