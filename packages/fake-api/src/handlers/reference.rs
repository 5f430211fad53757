use axum::{Json, http::StatusCode};
use common::models::Paginated;
use serde_json::Value;

use super::PageQuery;
use crate::auth::AuthUser;
use crate::error::FakeError;
use crate::state::{AppState, body_uuid, new_uuid};

fn display_text(record: &Value) -> String {
    ["name", "firstName", "lastName", "email"]
        .iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn uuid_of(record: &Value) -> Option<&str> {
    record.get("uuid").and_then(Value::as_str)
}

fn require_label(collection: &str, body: &Value) -> Result<(), FakeError> {
    let key = if collection == "judges" { "firstName" } else { "name" };
    match body.get(key).and_then(Value::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(FakeError::Validation(format!("{key} is required"))),
    }
}

pub async fn list(
    collection: &'static str,
    state: AppState,
    query: PageQuery,
) -> Json<Paginated<Value>> {
    let items = state
        .data()
        .reference
        .get(collection)
        .map(|items| {
            items
                .iter()
                .filter(|r| query.matches_search(&display_text(r)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(query.paginate(items))
}

pub async fn show(
    collection: &'static str,
    state: AppState,
    uuid: String,
) -> Result<Json<Value>, FakeError> {
    state
        .data()
        .reference
        .get(collection)
        .and_then(|items| items.iter().find(|r| uuid_of(r) == Some(uuid.as_str())))
        .cloned()
        .map(Json)
        .ok_or_else(|| FakeError::NotFound(format!("Record {uuid} not found")))
}

pub async fn create(
    collection: &'static str,
    user: AuthUser,
    state: AppState,
    mut body: Value,
) -> Result<(StatusCode, Json<Value>), FakeError> {
    user.require_staff()?;
    require_label(collection, &body)?;
    if let Some(object) = body.as_object_mut() {
        object.insert("uuid".into(), Value::String(new_uuid()));
    }
    state
        .data()
        .reference
        .entry(collection)
        .or_default()
        .push(body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn update(
    collection: &'static str,
    user: AuthUser,
    state: AppState,
    body: Value,
) -> Result<Json<Value>, FakeError> {
    user.require_staff()?;
    let uuid = body_uuid(&body)?;
    require_label(collection, &body)?;
    let mut data = state.data();
    let record = data
        .reference
        .entry(collection)
        .or_default()
        .iter_mut()
        .find(|r| uuid_of(r) == Some(uuid.as_str()))
        .ok_or_else(|| FakeError::NotFound(format!("Record {uuid} not found")))?;
    if let (Some(target), Some(patch)) = (record.as_object_mut(), body.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(record.clone()))
}

pub async fn delete(
    collection: &'static str,
    user: AuthUser,
    state: AppState,
    uuid: String,
) -> Result<StatusCode, FakeError> {
    user.require_staff()?;
    let mut data = state.data();
    let items = data.reference.entry(collection).or_default();
    let before = items.len();
    items.retain(|r| uuid_of(r) != Some(uuid.as_str()));
    if items.len() == before {
        return Err(FakeError::NotFound(format!("Record {uuid} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
