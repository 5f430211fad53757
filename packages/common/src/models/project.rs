use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::application::{MemberForm, validate_members};
use crate::validation::{FieldErrors, Validate, Validator};

/// A fellowship project proposal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub uuid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub award_uuid: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub members: Vec<MemberForm>,
    /// 0-based step of the project wizard to resume at.
    #[serde(default)]
    pub current_stage: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailsForm {
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award_uuid: Option<String>,
}

impl Validate for ProjectDetailsForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("title", "Project title", &self.title)
            .max_chars("title", "Project title", &self.title, 256)
            .required("summary", "Summary", &self.summary)
            .max_chars("summary", "Summary", &self.summary, 5000)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTimelineForm {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: f64,
}

impl Validate for ProjectTimelineForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required_opt("startDate", "Start date", &self.start_date)
            .required_opt("endDate", "End date", &self.end_date)
            .date_order(
                "endDate",
                "End date",
                "start date",
                self.start_date,
                self.end_date,
            )
            .min("budget", "Budget", self.budget, 0.0)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTeamForm {
    pub members: Vec<MemberForm>,
}

impl Validate for ProjectTeamForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        validate_members(&self.members, "team member")
    }
}
