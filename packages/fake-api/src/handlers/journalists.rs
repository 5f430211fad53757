use axum::{
    Json,
    extract::{Multipart, State},
};
use common::models::{BiographyForm, JournalistProfile, ProfessionalInfoForm};
use common::validation::Validate;

use crate::auth::AuthUser;
use crate::error::FakeError;
use crate::state::AppState;

fn advance(profile: &mut JournalistProfile, stage: u32) {
    profile.current_stage = Some(profile.current_stage.unwrap_or(1).max(stage));
}

pub async fn me(user: AuthUser, State(state): State<AppState>) -> Json<JournalistProfile> {
    let mut profile = state.data().journalist.clone();
    if profile.email.is_empty() {
        profile.email = user.email;
    }
    Json(profile)
}

/// Multipart basic info with an optional `avatar` file.
pub async fn update_file(
    _user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<JournalistProfile>, FakeError> {
    let mut fields = Vec::new();
    let mut avatar = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FakeError::Validation(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "avatar" {
            avatar = field.file_name().map(str::to_string);
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| FakeError::Validation(e.to_string()))?;
        fields.push((name, value));
    }

    let get = |key: &str| {
        fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
    };
    let first_name = get("firstName").unwrap_or_default();
    if first_name.trim().is_empty() {
        return Err(FakeError::Validation("First Name is required".into()));
    }

    let mut data = state.data();
    let profile = &mut data.journalist;
    profile.first_name = first_name;
    profile.last_name = get("lastName").unwrap_or_default();
    profile.phone_number = get("phoneNumber").unwrap_or_default();
    profile.gender = get("gender");
    profile.region_uuid = get("regionUuid");
    if let Some(file_name) = avatar {
        profile.avatar_url = Some(format!("/uploads/{file_name}"));
    }
    advance(profile, 2);
    Ok(Json(profile.clone()))
}

pub async fn update_professional_info(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<ProfessionalInfoForm>,
) -> Result<Json<JournalistProfile>, FakeError> {
    form.validate()?;
    let mut data = state.data();
    let profile = &mut data.journalist;
    profile.media_channel_uuid = Some(form.media_channel_uuid);
    profile.position = Some(form.position);
    profile.years_of_experience = Some(form.years_of_experience);
    advance(profile, 3);
    Ok(Json(profile.clone()))
}

pub async fn update_biography(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<BiographyForm>,
) -> Result<Json<JournalistProfile>, FakeError> {
    form.validate()?;
    let mut data = state.data();
    let profile = &mut data.journalist;
    profile.biography = Some(form.biography);
    profile.website = form.website;
    profile.twitter = form.twitter;
    profile.linkedin = form.linkedin;
    advance(profile, 4);
    Ok(Json(profile.clone()))
}
