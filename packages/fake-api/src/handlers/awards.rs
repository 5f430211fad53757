use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use common::models::{Award, AwardForm, AwardRound, Paginated, RoundForm};
use common::validation::Validate;
use serde_json::Value;

use super::PageQuery;
use crate::auth::AuthUser;
use crate::error::FakeError;
use crate::state::{AppState, body_uuid, merge, new_uuid};

pub async fn list_awards(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Paginated<Award>> {
    let items = state
        .data()
        .awards
        .iter()
        .filter(|a| query.matches_search(&a.title))
        .cloned()
        .collect();
    Json(query.paginate(items))
}

pub async fn get_award(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<Json<Award>, FakeError> {
    let mut data = state.data();
    let award = data.award_mut(&uuid)?;
    award.rounds.sort_by_key(|r| r.number);
    Ok(Json(award.clone()))
}

pub async fn create_award(
    user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<AwardForm>,
) -> Result<(StatusCode, Json<Award>), FakeError> {
    user.require_staff()?;
    form.validate()?;
    let award = Award {
        uuid: new_uuid(),
        title: form.title.trim().to_string(),
        description: Some(form.description),
        start_date: form.start_date,
        end_date: form.end_date,
        judge_start_date: form.judge_start_date,
        judge_end_date: form.judge_end_date,
        is_published: false,
        is_active: form.is_active,
        published_at: None,
        rounds: Vec::new(),
    };
    state.data().awards.push(award.clone());
    Ok((StatusCode::CREATED, Json(award)))
}

pub async fn update_award(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Award>, FakeError> {
    user.require_staff()?;
    let uuid = body_uuid(&body)?;
    let mut data = state.data();
    let award = data.award_mut(&uuid)?;
    let mut updated = merge(&*award, &body)?;
    if updated.is_published && !award.is_published {
        updated.published_at = Some(chrono::Utc::now());
    }
    *award = updated;
    Ok(Json(award.clone()))
}

pub async fn delete_award(
    user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<StatusCode, FakeError> {
    user.require_staff()?;
    let mut data = state.data();
    data.award_mut(&uuid)?;
    data.awards.retain(|a| a.uuid != uuid);
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /awards/{sub}/{uuid}` for the per-award collections.
pub async fn award_collection(
    _user: AuthUser,
    State(state): State<AppState>,
    Path((sub, uuid)): Path<(String, String)>,
) -> Result<Json<Value>, FakeError> {
    let mut data = state.data();
    if sub == "rounds" {
        let mut rounds = data.award_mut(&uuid)?.rounds.clone();
        rounds.sort_by_key(|r| r.number);
        return Ok(Json(serde_json::to_value(rounds)?));
    }
    let collection = match sub.as_str() {
        "categories" => "award-categories",
        "criterias" => "award-criterias",
        "judges" => "award-judges",
        "instructions" => "award-instructions",
        _ => return Err(FakeError::NotFound(format!("Unknown award collection {sub}"))),
    };
    data.award_mut(&uuid)?;
    let items = data
        .award_parts
        .get(collection)
        .map(|items| {
            items
                .iter()
                .filter(|v| v.get("awardUuid").and_then(Value::as_str) == Some(uuid.as_str()))
                .cloned()
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    Ok(Json(Value::Array(items)))
}

/// Reference collection whose record a join entity points at.
fn linked_reference(collection: &str) -> Option<(&'static str, &'static str, &'static str)> {
    match collection {
        "award-categories" => Some(("categories", "categoryUuid", "category")),
        "award-criterias" => Some(("criterias", "criteriaUuid", "criteria")),
        "award-judges" => Some(("judges", "judgeUuid", "judge")),
        _ => None,
    }
}

pub async fn add_award_part(
    collection: &'static str,
    user: AuthUser,
    state: AppState,
    mut body: Value,
) -> Result<(StatusCode, Json<Value>), FakeError> {
    user.require_staff()?;
    let award_uuid = body
        .get("awardUuid")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| FakeError::Validation("awardUuid is required".into()))?;

    let mut data = state.data();
    data.award_mut(&award_uuid)?;
    let linked = linked_reference(collection).and_then(|(reference, key, field)| {
        let target = body.get(key).and_then(Value::as_str)?.to_string();
        let record = data
            .reference
            .get(reference)?
            .iter()
            .find(|r| r.get("uuid").and_then(Value::as_str) == Some(target.as_str()))?
            .clone();
        Some((field, record))
    });
    if let Some(object) = body.as_object_mut() {
        object.insert("uuid".into(), Value::String(new_uuid()));
        if let Some((field, record)) = linked {
            object.insert(field.into(), record);
        }
    }
    data.award_parts
        .entry(collection)
        .or_default()
        .push(body.clone());
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn remove_award_part(
    collection: &'static str,
    user: AuthUser,
    state: AppState,
    uuid: String,
) -> Result<StatusCode, FakeError> {
    user.require_staff()?;
    let mut data = state.data();
    let items = data.award_parts.entry(collection).or_default();
    let before = items.len();
    items.retain(|v| v.get("uuid").and_then(Value::as_str) != Some(uuid.as_str()));
    if items.len() == before {
        return Err(FakeError::NotFound(format!("Record {uuid} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_round(
    user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<RoundForm>,
) -> Result<(StatusCode, Json<AwardRound>), FakeError> {
    user.require_staff()?;
    form.validate()?;
    let round = AwardRound {
        uuid: new_uuid(),
        award_uuid: Some(form.award_uuid.clone()),
        number: form.number,
        name: form.name,
        minimum_score: form.minimum_score,
        is_final: form.is_final,
        is_current: false,
    };
    state
        .data()
        .award_mut(&form.award_uuid)?
        .rounds
        .push(round.clone());
    Ok((StatusCode::CREATED, Json(round)))
}

pub async fn update_round(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<AwardRound>, FakeError> {
    user.require_staff()?;
    let uuid = body_uuid(&body)?;
    let mut data = state.data();
    let round = data
        .awards
        .iter_mut()
        .flat_map(|a| a.rounds.iter_mut())
        .find(|r| r.uuid == uuid)
        .ok_or_else(|| FakeError::NotFound(format!("Round {uuid} not found")))?;
    *round = merge(&*round, &body)?;
    Ok(Json(round.clone()))
}

pub async fn remove_round(
    user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Result<StatusCode, FakeError> {
    user.require_staff()?;
    let mut data = state.data();
    let mut found = false;
    for award in &mut data.awards {
        let before = award.rounds.len();
        award.rounds.retain(|r| r.uuid != uuid);
        found |= award.rounds.len() != before;
    }
    if !found {
        return Err(FakeError::NotFound(format!("Round {uuid} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}
