use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::score::JudgeScore;
use crate::status::ApplicationStatus;
use crate::validation::{FieldErrors, Validate, Validator};

/// A journalist's (or a group's) submission to an award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAward {
    pub uuid: String,
    #[serde(default)]
    pub award_uuid: String,
    #[serde(default)]
    pub category_uuid: Option<String>,
    #[serde(default)]
    pub media_channel_uuid: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_group_application: bool,
    #[serde(default)]
    pub status: ApplicationStatus,
    /// Wizard step the applicant should see next (1-based).
    #[serde(default)]
    pub current_stage: Option<u32>,
    #[serde(default)]
    pub round_uuid: Option<String>,
    #[serde(default)]
    pub story_link: Option<String>,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub is_submitted: bool,
    #[serde(default)]
    pub members: Vec<ApplicationMember>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub scores: Vec<JudgeScore>,
    #[serde(default)]
    pub total_score: Option<f64>,
}

impl ApplicationAward {
    /// Scores recorded for one round (all rounds when `round_uuid` is `None`).
    pub fn scores_in_round<'a>(
        &'a self,
        round_uuid: Option<&'a str>,
    ) -> impl Iterator<Item = &'a JudgeScore> + 'a {
        self.scores
            .iter()
            .filter(move |s| round_uuid.is_none() || s.round_uuid.as_deref() == round_uuid)
    }

    /// Sum of scores for a round, preferring the server's total when present.
    pub fn round_total(&self, round_uuid: Option<&str>) -> f64 {
        if round_uuid.is_none()
            && let Some(total) = self.total_score
        {
            return total;
        }
        self.scores_in_round(round_uuid).map(|s| s.score).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationMember {
    pub uuid: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub uuid: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Filters accepted by the application list endpoint, next to `ListParams`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,
    /// `screening` restricts the list to applications not yet in a round.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

// ---------------------------------------------------------------------------
// Application wizard forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoForm {
    pub award_uuid: String,
    pub category_uuid: String,
    pub title: String,
    pub description: String,
    pub is_group_application: bool,
}

impl Validate for BasicInfoForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("awardUuid", "Award", &self.award_uuid)
            .required("categoryUuid", "Category", &self.category_uuid)
            .required("title", "Title", &self.title)
            .max_chars("title", "Title", &self.title, 256)
            .required("description", "Description", &self.description)
            .max_chars("description", "Description", &self.description, 5000)
            .finish()
    }
}

impl From<&ApplicationAward> for BasicInfoForm {
    fn from(app: &ApplicationAward) -> Self {
        Self {
            award_uuid: app.award_uuid.clone(),
            category_uuid: app.category_uuid.clone().unwrap_or_default(),
            title: app.title.clone(),
            description: app.description.clone().unwrap_or_default(),
            is_group_application: app.is_group_application,
        }
    }
}

/// Body of `POST/PUT /applications/basic-info`; `uuid` is present on update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<&'a str>,
    #[serde(flatten)]
    pub form: &'a BasicInfoForm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfoForm {
    pub media_channel_uuid: String,
    pub publication_date: Option<NaiveDate>,
    pub story_link: String,
}

impl Validate for MediaInfoForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("mediaChannelUuid", "Media Channel", &self.media_channel_uuid)
            .required_opt("publicationDate", "Publication date", &self.publication_date)
            .required("storyLink", "Story link", &self.story_link)
            .url("storyLink", "Story link", &self.story_link)
            .finish()
    }
}

/// File extensions accepted as application attachments.
pub const ATTACHMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "jpg", "jpeg", "png", "mp3", "mp4", "wav",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentsForm {
    pub files: Vec<PathBuf>,
}

impl Validate for AttachmentsForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Validator::new();
        v.non_empty("files", "attachment", &self.files);
        for (i, file) in self.files.iter().enumerate() {
            v.check(
                &format!("files[{i}]"),
                "File type is not supported",
                has_extension(file, ATTACHMENT_EXTENSIONS),
            );
        }
        v.finish()
    }
}

/// Case-insensitive extension check.
pub fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| allowed.contains(&e.as_str()))
}

/// A person listed on a group application or project team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberForm {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Validate for MemberForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("fullName", "Full Name", &self.full_name)
            .required("email", "Email", &self.email)
            .email("email", "Email", &self.email)
            .finish()
    }
}

impl From<&ApplicationMember> for MemberForm {
    fn from(m: &ApplicationMember) -> Self {
        Self {
            full_name: m.full_name.clone(),
            email: m.email.clone(),
            role: m.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorsForm {
    pub members: Vec<MemberForm>,
}

impl Validate for CollaboratorsForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        validate_members(&self.members, "collaborator")
    }
}

pub(crate) fn validate_members(members: &[MemberForm], label: &str) -> Result<(), FieldErrors> {
    let mut v = Validator::new();
    v.non_empty("members", label, members);
    for (i, member) in members.iter().enumerate() {
        v.nested(&format!("members[{i}]"), member.validate());
    }
    let mut seen = std::collections::HashSet::new();
    for (i, member) in members.iter().enumerate() {
        let email = member.email.trim().to_ascii_lowercase();
        if !email.is_empty() && !seen.insert(email) {
            v.check(
                &format!("members[{i}].email"),
                "Email is listed more than once",
                false,
            );
        }
    }
    v.finish()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorsRequest<'a> {
    pub application_uuid: &'a str,
    pub members: &'a [MemberForm],
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    /// Applicant confirms the work is their own and the details are accurate.
    pub confirm: bool,
}

impl Validate for ReviewForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .check(
                "confirm",
                "You must confirm the declaration before submitting",
                self.confirm,
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_extension_check() {
        let form = AttachmentsForm {
            files: vec![PathBuf::from("story.PDF"), PathBuf::from("notes.exe")],
        };
        let err = form.validate().unwrap_err();
        assert!(!err.contains("files[0]"));
        assert_eq!(err.get("files[1]"), Some("File type is not supported"));

        let empty = AttachmentsForm::default().validate().unwrap_err();
        assert_eq!(empty.get("files"), Some("At least one attachment is required"));
    }

    #[test]
    fn test_collaborators_reject_duplicate_emails() {
        let member = MemberForm {
            full_name: "Kofi Mensah".into(),
            email: "kofi@example.org".into(),
            role: None,
        };
        let form = CollaboratorsForm {
            members: vec![member.clone(), member],
        };
        let err = form.validate().unwrap_err();
        assert_eq!(
            err.get("members[1].email"),
            Some("Email is listed more than once")
        );
    }

    #[test]
    fn test_basic_info_request_flattens_form() {
        let form = BasicInfoForm {
            award_uuid: "a1".into(),
            category_uuid: "c1".into(),
            title: "Water".into(),
            description: "A story".into(),
            is_group_application: true,
        };
        let json = serde_json::to_value(BasicInfoRequest {
            uuid: Some("app-1"),
            form: &form,
        })
        .unwrap();
        assert_eq!(json["uuid"], "app-1");
        assert_eq!(json["isGroupApplication"], true);
        assert_eq!(json["awardUuid"], "a1");
    }

    #[test]
    fn test_round_total_filters_by_round() {
        let app: ApplicationAward = serde_json::from_str(
            r#"{"uuid":"x","scores":[
                {"uuid":"s1","applicationUuid":"x","awardCriteriaUuid":"c1","roundUuid":"r1","score":4},
                {"uuid":"s2","applicationUuid":"x","awardCriteriaUuid":"c2","roundUuid":"r1","score":5},
                {"uuid":"s3","applicationUuid":"x","awardCriteriaUuid":"c1","roundUuid":"r2","score":7}
            ]}"#,
        )
        .unwrap();
        assert_eq!(app.round_total(Some("r1")), 9.0);
        assert_eq!(app.round_total(None), 16.0);
    }
}
