use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use common::models::{CriteriaScoreInput, JudgeScore};
use common::status::ApplicationStatus;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::FakeError;
use crate::state::{AppState, new_uuid};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaScoreBody {
    application_uuid: String,
    #[serde(default)]
    round_uuid: Option<String>,
    scores: Vec<CriteriaScoreInput>,
}

/// Record the caller's scores, replacing any earlier score for the same criterion.
pub async fn submit_criteria(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CriteriaScoreBody>,
) -> Result<Json<Vec<JudgeScore>>, FakeError> {
    if body.scores.is_empty() {
        return Err(FakeError::Validation("At least one score is required".into()));
    }
    let mut data = state.data();
    data.application_mut(&body.application_uuid)?;

    let judge = Some(user.uuid.clone());
    for input in body.scores {
        data.scores.retain(|s| {
            !(s.application_uuid == body.application_uuid
                && s.round_uuid == body.round_uuid
                && s.judge_uuid == judge
                && s.award_criteria_uuid == input.award_criteria_uuid)
        });
        data.scores.push(JudgeScore {
            uuid: new_uuid(),
            application_uuid: body.application_uuid.clone(),
            award_criteria_uuid: input.award_criteria_uuid,
            judge_uuid: judge.clone(),
            round_uuid: body.round_uuid.clone(),
            score: input.score,
            comments: input.comments,
        });
    }
    let recorded = data
        .scores
        .iter()
        .filter(|s| s.application_uuid == body.application_uuid && s.judge_uuid == judge)
        .cloned()
        .collect();
    Ok(Json(recorded))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRoundBody {
    award_uuid: String,
    #[serde(default)]
    round_uuid: Option<String>,
}

/// Open a round. Approved applications leave screening; from a scored round,
/// applications that reached its minimum score move on.
pub async fn initialize_round(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<InitializeRoundBody>,
) -> Result<StatusCode, FakeError> {
    user.require_staff()?;
    let mut data = state.data();
    let award = data.award_mut(&body.award_uuid)?;
    let mut rounds = award.rounds.clone();
    rounds.sort_by_key(|r| r.number);

    let previous = award.current_round().cloned();
    let target = match &body.round_uuid {
        Some(uuid) => rounds.iter().find(|r| &r.uuid == uuid),
        None => rounds.first(),
    }
    .cloned()
    .ok_or_else(|| FakeError::NotFound("No round to open".into()))?;

    for round in &mut award.rounds {
        round.is_current = round.uuid == target.uuid;
    }

    let award_uuid = body.award_uuid.clone();
    let moving = data
        .applications
        .iter()
        .filter(|a| a.award_uuid == award_uuid)
        .filter(|a| match &previous {
            None => a.round_uuid.is_none() && a.status == ApplicationStatus::Approved,
            Some(round) => {
                a.round_uuid.as_deref() == Some(round.uuid.as_str())
                    && round.qualifies(data.application_view(a).round_total(Some(&round.uuid)))
            }
        })
        .map(|a| a.uuid.clone())
        .collect::<Vec<_>>();
    for app in data.applications.iter_mut() {
        if moving.contains(&app.uuid) {
            app.round_uuid = Some(target.uuid.clone());
        }
    }

    tracing::info!(award = %award_uuid, round = %target.uuid, moved = moving.len(), "round initialized");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn application_scores(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> Json<Vec<JudgeScore>> {
    let scores = state
        .data()
        .scores
        .iter()
        .filter(|s| s.application_uuid == uuid)
        .cloned()
        .collect();
    Json(scores)
}
