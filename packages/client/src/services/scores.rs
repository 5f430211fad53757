use common::models::{CriteriaScoreRequest, InitializeRoundRequest, JudgeScore};
use reqwest::Method;

use crate::http::ApiClient;
use crate::request::PendingRequest;

/// `/award-application-scores`: judge scoring and round progression.
pub struct ScoreService {
    client: ApiClient,
}

impl ScoreService {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn submit_criteria(&self, request: &CriteriaScoreRequest) -> PendingRequest<Vec<JudgeScore>> {
        tracing::info!(
            application = %request.application_uuid,
            criteria = request.scores.len(),
            "Submitting scores"
        );
        self.client
            .send_json(Method::POST, "/award-application-scores/criteria", request)
    }

    /// Close the current stage and open `request.round_uuid`.
    pub fn initialize_round(&self, request: &InitializeRoundRequest) -> PendingRequest<()> {
        tracing::info!(
            award = %request.award_uuid,
            round = request.round_uuid.as_deref().unwrap_or("-"),
            "Initializing round"
        );
        self.client
            .post_empty("/award-application-scores/initialize-round", request)
    }

    pub fn for_application(&self, application_uuid: &str) -> PendingRequest<Vec<JudgeScore>> {
        self.client.get(&format!(
            "/award-application-scores/application/{application_uuid}"
        ))
    }
}
