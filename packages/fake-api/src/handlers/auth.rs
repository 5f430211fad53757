use axum::{Json, extract::State};
use common::models::LoginForm;
use serde_json::{Value, json};

use crate::auth::sign;
use crate::error::FakeError;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<Value>, FakeError> {
    let user = state
        .data()
        .users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(form.email.trim()) && u.password == form.password)
        .cloned()
        .ok_or(FakeError::InvalidCredentials)?;

    let token = sign(&user)?;
    Ok(Json(json!({
        "token": token,
        "user": {
            "uuid": user.uuid,
            "email": user.email,
            "role": user.role,
            "firstName": user.first_name,
        }
    })))
}
