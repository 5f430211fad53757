use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::validation::{FieldErrors, Validate, Validator};

/// A reference-data record managed from its own admin section.
///
/// Each kind lives under one collection path and is edited through one form type.
pub trait ReferenceRecord: DeserializeOwned + Send + 'static {
    type Form: Serialize + Validate + Send + Sync;

    /// Collection path, e.g. `/categories`.
    const PATH: &'static str;
    /// Singular label used in messages and prompts.
    const LABEL: &'static str;

    fn uuid(&self) -> &str;
    fn display_name(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaChannel {
    pub uuid: String,
    #[serde(default)]
    pub name: String,
    /// Print, radio, television, online...
    #[serde(default)]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judge {
    pub uuid: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub organization: Option<String>,
}

impl Judge {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Form shared by the name + description records (categories, criteria).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for NamedForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("name", "Name", &self.name)
            .max_chars("name", "Name", &self.name, 256)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Validate for RegionForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Validator::new();
        v.required("name", "Name", &self.name);
        if let Some(code) = &self.code {
            v.max_chars("code", "Code", code, 10);
        }
        v.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaChannelForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl Validate for MediaChannelForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("name", "Name", &self.name)
            .max_chars("name", "Name", &self.name, 256)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Validate for JudgeForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("firstName", "First Name", &self.first_name)
            .required("lastName", "Last Name", &self.last_name)
            .required("email", "Email", &self.email)
            .email("email", "Email", &self.email)
            .finish()
    }
}

impl ReferenceRecord for Category {
    type Form = NamedForm;
    const PATH: &'static str = "/categories";
    const LABEL: &'static str = "Category";

    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl ReferenceRecord for Criteria {
    type Form = NamedForm;
    const PATH: &'static str = "/criterias";
    const LABEL: &'static str = "Criteria";

    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl ReferenceRecord for Region {
    type Form = RegionForm;
    const PATH: &'static str = "/regions";
    const LABEL: &'static str = "Region";

    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn display_name(&self) -> String {
        match &self.code {
            Some(code) => format!("{} ({code})", self.name),
            None => self.name.clone(),
        }
    }
}

impl ReferenceRecord for MediaChannel {
    type Form = MediaChannelForm;
    const PATH: &'static str = "/media-channels";
    const LABEL: &'static str = "Media channel";

    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl ReferenceRecord for Judge {
    type Form = JudgeForm;
    const PATH: &'static str = "/judges";
    const LABEL: &'static str = "Judge";

    fn uuid(&self) -> &str {
        &self.uuid
    }
    fn display_name(&self) -> String {
        self.full_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_form_requires_valid_email() {
        let form = JudgeForm {
            first_name: "Amina".into(),
            last_name: "Njoroge".into(),
            email: "amina.example.org".into(),
            organization: None,
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.get("email"), Some("Email must be a valid email address"));
    }

    #[test]
    fn test_region_display_includes_code() {
        let region = Region {
            uuid: "r".into(),
            name: "Coast".into(),
            code: Some("CST".into()),
        };
        assert_eq!(region.display_name(), "Coast (CST)");
    }
}
