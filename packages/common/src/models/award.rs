use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::reference::{Category, Criteria, Judge};
use crate::validation::{FieldErrors, Validate, Validator};

/// A fellowship cohort: one application window plus one judging window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub uuid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub judge_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub judge_end_date: Option<NaiveDate>,
    /// Published awards are visible to applicants.
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rounds: Vec<AwardRound>,
}

impl Award {
    /// The round the server flags as current, if judging has left screening.
    pub fn current_round(&self) -> Option<&AwardRound> {
        self.rounds.iter().find(|r| r.is_current)
    }

    pub fn round(&self, uuid: &str) -> Option<&AwardRound> {
        self.rounds.iter().find(|r| r.uuid == uuid)
    }

    /// Rounds ordered by their ordinal number.
    pub fn rounds_in_order(&self) -> Vec<&AwardRound> {
        let mut rounds = self.rounds.iter().collect::<Vec<_>>();
        rounds.sort_by_key(|r| r.number);
        rounds
    }

    pub fn accepts_applications_on(&self, day: NaiveDate) -> bool {
        self.is_published && within(day, self.start_date, self.end_date)
    }

    pub fn judging_open_on(&self, day: NaiveDate) -> bool {
        within(day, self.judge_start_date, self.judge_end_date)
    }
}

fn within(day: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start <= day && day <= end,
        _ => false,
    }
}

/// An ordered evaluation stage within an award's judging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardRound {
    pub uuid: String,
    #[serde(default)]
    pub award_uuid: Option<String>,
    /// 1-based ordinal.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub name: String,
    /// Score an application needs to qualify out of this round.
    #[serde(default)]
    pub minimum_score: f64,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_current: bool,
}

impl AwardRound {
    pub fn display_name(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Round {}", self.number)
        } else {
            self.name.clone()
        }
    }

    pub fn qualifies(&self, total_score: f64) -> bool {
        total_score >= self.minimum_score
    }
}

/// Award create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardForm {
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub judge_start_date: Option<NaiveDate>,
    pub judge_end_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl Validate for AwardForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("title", "Title", &self.title)
            .max_chars("title", "Title", &self.title, 256)
            .required("description", "Description", &self.description)
            .required_opt("startDate", "Start date", &self.start_date)
            .required_opt("endDate", "End date", &self.end_date)
            .date_order(
                "endDate",
                "End date",
                "start date",
                self.start_date,
                self.end_date,
            )
            .required_opt("judgeStartDate", "Judging start date", &self.judge_start_date)
            .required_opt("judgeEndDate", "Judging end date", &self.judge_end_date)
            .date_order(
                "judgeEndDate",
                "Judging end date",
                "judging start date",
                self.judge_start_date,
                self.judge_end_date,
            )
            .finish()
    }
}

impl From<&Award> for AwardForm {
    fn from(award: &Award) -> Self {
        Self {
            title: award.title.clone(),
            description: award.description.clone().unwrap_or_default(),
            start_date: award.start_date,
            end_date: award.end_date,
            judge_start_date: award.judge_start_date,
            judge_end_date: award.judge_end_date,
            is_active: award.is_active,
        }
    }
}

/// Body of `PUT /awards`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAwardRequest {
    pub uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl UpdateAwardRequest {
    pub fn from_form(uuid: impl Into<String>, form: AwardForm) -> Self {
        Self {
            uuid: uuid.into(),
            title: Some(form.title.trim().to_string()),
            description: Some(form.description),
            start_date: form.start_date,
            end_date: form.end_date,
            judge_start_date: form.judge_start_date,
            judge_end_date: form.judge_end_date,
            is_active: Some(form.is_active),
            is_published: None,
        }
    }

    pub fn publish(uuid: impl Into<String>, published: bool) -> Self {
        Self {
            uuid: uuid.into(),
            is_published: Some(published),
            ..Default::default()
        }
    }
}

/// Round create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundForm {
    pub award_uuid: String,
    pub number: u32,
    pub name: String,
    pub minimum_score: f64,
    pub is_final: bool,
}

impl Validate for RoundForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("awardUuid", "Award", &self.award_uuid)
            .required("name", "Round name", &self.name)
            .check("number", "Round number must be at least 1", self.number >= 1)
            .range("minimumScore", "Minimum score", self.minimum_score, 0.0, 100.0)
            .finish()
    }
}

/// Category offered within an award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardCategory {
    pub uuid: String,
    #[serde(default)]
    pub award_uuid: Option<String>,
    #[serde(default)]
    pub category_uuid: String,
    #[serde(default)]
    pub category: Option<Category>,
}

impl AwardCategory {
    pub fn display_name(&self) -> String {
        self.category
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| self.category_uuid.clone())
    }
}

/// Default ceiling for a single criterion score.
pub const DEFAULT_MAX_SCORE: f64 = 10.0;

fn default_max_score() -> f64 {
    DEFAULT_MAX_SCORE
}

/// Criterion judges score within an award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardCriteria {
    pub uuid: String,
    #[serde(default)]
    pub award_uuid: Option<String>,
    #[serde(default)]
    pub criteria_uuid: String,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    #[serde(default)]
    pub criteria: Option<Criteria>,
}

impl AwardCriteria {
    pub fn display_name(&self) -> String {
        self.criteria
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| self.criteria_uuid.clone())
    }
}

/// Judge assigned to an award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardJudge {
    pub uuid: String,
    #[serde(default)]
    pub award_uuid: Option<String>,
    #[serde(default)]
    pub judge_uuid: String,
    #[serde(default)]
    pub judge: Option<Judge>,
}

/// Free-text guidance shown to applicants or judges of an award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardInstruction {
    pub uuid: String,
    #[serde(default)]
    pub award_uuid: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardCategoryForm {
    pub award_uuid: String,
    pub category_uuid: String,
}

impl Validate for AwardCategoryForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("awardUuid", "Award", &self.award_uuid)
            .required("categoryUuid", "Category", &self.category_uuid)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardCriteriaForm {
    pub award_uuid: String,
    pub criteria_uuid: String,
    pub max_score: f64,
}

impl Default for AwardCriteriaForm {
    fn default() -> Self {
        Self {
            award_uuid: String::new(),
            criteria_uuid: String::new(),
            max_score: DEFAULT_MAX_SCORE,
        }
    }
}

impl Validate for AwardCriteriaForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("awardUuid", "Award", &self.award_uuid)
            .required("criteriaUuid", "Criteria", &self.criteria_uuid)
            .range("maxScore", "Maximum score", self.max_score, 1.0, 100.0)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardJudgeForm {
    pub award_uuid: String,
    pub judge_uuid: String,
}

impl Validate for AwardJudgeForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("awardUuid", "Award", &self.award_uuid)
            .required("judgeUuid", "Judge", &self.judge_uuid)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardInstructionForm {
    pub award_uuid: String,
    pub title: String,
    pub content: String,
}

impl Validate for AwardInstructionForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("awardUuid", "Award", &self.award_uuid)
            .required("title", "Title", &self.title)
            .max_chars("title", "Title", &self.title, 256)
            .required("content", "Instruction", &self.content)
            .finish()
    }
}
