use client::{ApiClient, ClientError};
use common::models::{AwardCriteria, CriteriaScoreInput, CriteriaScoreRequest, JudgeScore};
use common::validation::{FieldErrors, Validate, Validator};
use futures::future::try_join;

/// One criterion on a judge's score sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub criteria: AwardCriteria,
    pub score: Option<f64>,
    pub comments: Option<String>,
}

/// A judge's scores for one application, one entry per award criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSheet {
    application_uuid: String,
    round_uuid: Option<String>,
    entries: Vec<ScoreEntry>,
}

impl ScoreSheet {
    pub fn new(
        application_uuid: impl Into<String>,
        round_uuid: Option<String>,
        criterias: Vec<AwardCriteria>,
    ) -> Self {
        Self {
            application_uuid: application_uuid.into(),
            round_uuid,
            entries: criterias
                .into_iter()
                .map(|criteria| ScoreEntry {
                    criteria,
                    score: None,
                    comments: None,
                })
                .collect(),
        }
    }

    /// Fetch the award's criteria and the judge's earlier scores together.
    pub async fn load(
        client: &ApiClient,
        award_uuid: &str,
        application_uuid: &str,
        round_uuid: Option<String>,
        judge_uuid: Option<&str>,
    ) -> Result<Self, ClientError> {
        let (criterias, scores) = try_join(
            client.awards().criterias(award_uuid).into_future(),
            client.scores().for_application(application_uuid).into_future(),
        )
        .await?;
        let mut sheet = Self::new(application_uuid, round_uuid, criterias);
        sheet.prefill(&scores, judge_uuid);
        Ok(sheet)
    }

    pub fn application_uuid(&self) -> &str {
        &self.application_uuid
    }

    pub fn round_uuid(&self) -> Option<&str> {
        self.round_uuid.as_deref()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Copy in scores this judge already recorded for the same round.
    pub fn prefill(&mut self, scores: &[JudgeScore], judge_uuid: Option<&str>) {
        let round = self.round_uuid.clone();
        for score in scores.iter().filter(|s| {
            s.application_uuid == self.application_uuid
                && s.round_uuid == round
                && (judge_uuid.is_none() || s.judge_uuid.as_deref() == judge_uuid)
        }) {
            if let Some(entry) = self
                .entries
                .iter_mut()
                .find(|e| e.criteria.uuid == score.award_criteria_uuid)
            {
                entry.score = Some(score.score);
                entry.comments = score.comments.clone();
            }
        }
    }

    /// Returns false when the criterion is not on this sheet.
    pub fn set_score(&mut self, criteria_uuid: &str, score: f64, comments: Option<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.criteria.uuid == criteria_uuid) {
            Some(entry) => {
                entry.score = Some(score);
                entry.comments = comments.filter(|c| !c.trim().is_empty());
                true
            }
            None => false,
        }
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().filter_map(|e| e.score).sum()
    }

    pub fn max_total(&self) -> f64 {
        self.entries.iter().map(|e| e.criteria.max_score).sum()
    }

    pub fn to_request(&self) -> CriteriaScoreRequest {
        CriteriaScoreRequest {
            application_uuid: self.application_uuid.clone(),
            round_uuid: self.round_uuid.clone(),
            scores: self
                .entries
                .iter()
                .filter_map(|e| {
                    e.score.map(|score| CriteriaScoreInput {
                        award_criteria_uuid: e.criteria.uuid.clone(),
                        score,
                        comments: e.comments.clone(),
                    })
                })
                .collect(),
        }
    }

    pub async fn submit(&self, client: &ApiClient) -> Result<Vec<JudgeScore>, ClientError> {
        self.validate()?;
        client.scores().submit_criteria(&self.to_request()).await
    }
}

impl Validate for ScoreSheet {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Validator::new();
        v.non_empty("scores", "criterion", &self.entries);
        for (i, entry) in self.entries.iter().enumerate() {
            let field = format!("scores[{i}].score");
            let label = entry.criteria.display_name();
            v.required_opt(&field, &label, &entry.score);
            if let Some(score) = entry.score {
                v.range(&field, &label, score, 0.0, entry.criteria.max_score);
            }
            if let Some(comments) = &entry.comments {
                v.max_chars(&format!("scores[{i}].comments"), "Comments", comments, 2000);
            }
        }
        v.finish()
    }
}
