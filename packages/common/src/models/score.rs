use serde::{Deserialize, Serialize};

/// One judge's score for one application against one award criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeScore {
    pub uuid: String,
    #[serde(default)]
    pub application_uuid: String,
    #[serde(default)]
    pub award_criteria_uuid: String,
    #[serde(default)]
    pub judge_uuid: Option<String>,
    #[serde(default)]
    pub round_uuid: Option<String>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaScoreInput {
    pub award_criteria_uuid: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Body of `POST /award-application-scores/criteria`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaScoreRequest {
    pub application_uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_uuid: Option<String>,
    pub scores: Vec<CriteriaScoreInput>,
}

/// Body of `POST /award-application-scores/initialize-round`.
///
/// `round_uuid` names the round being opened; `None` closes screening into
/// the award's first round as decided by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRoundRequest {
    pub award_uuid: String,
    pub round_uuid: Option<String>,
}
