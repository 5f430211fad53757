use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::application::has_extension;
use crate::validation::{FieldErrors, Validate, Validator};

/// The signed-in journalist's onboarding record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalistProfile {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub region_uuid: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub media_channel_uuid: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    /// Onboarding step the journalist should see next (1-based).
    #[serde(default)]
    pub current_stage: Option<u32>,
}

pub const AVATAR_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileBasicInfoForm {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub gender: Option<String>,
    pub region_uuid: String,
    /// New profile photo to upload with the form.
    pub avatar: Option<PathBuf>,
}

impl Validate for ProfileBasicInfoForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Validator::new();
        v.required("firstName", "First Name", &self.first_name)
            .max_chars("firstName", "First Name", &self.first_name, 100)
            .required("lastName", "Last Name", &self.last_name)
            .max_chars("lastName", "Last Name", &self.last_name, 100)
            .required("phoneNumber", "Phone Number", &self.phone_number)
            .check(
                "phoneNumber",
                "Phone Number must contain only digits, spaces and a leading +",
                is_phone_number(&self.phone_number),
            )
            .required("regionUuid", "Region", &self.region_uuid);
        if let Some(avatar) = &self.avatar {
            v.check(
                "avatar",
                "Profile photo must be a JPG or PNG image",
                has_extension(avatar, AVATAR_EXTENSIONS),
            );
        }
        v.finish()
    }
}

impl From<&JournalistProfile> for ProfileBasicInfoForm {
    fn from(p: &JournalistProfile) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            phone_number: p.phone_number.clone(),
            gender: p.gender.clone(),
            region_uuid: p.region_uuid.clone().unwrap_or_default(),
            avatar: None,
        }
    }
}

fn is_phone_number(value: &str) -> bool {
    let value = value.trim();
    let digits = value.strip_prefix('+').unwrap_or(value);
    digits.is_empty() || digits.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalInfoForm {
    pub media_channel_uuid: String,
    pub position: String,
    pub years_of_experience: u32,
}

impl Validate for ProfessionalInfoForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("mediaChannelUuid", "Media Channel", &self.media_channel_uuid)
            .required("position", "Position", &self.position)
            .range(
                "yearsOfExperience",
                "Years of experience",
                f64::from(self.years_of_experience),
                0.0,
                60.0,
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiographyForm {
    pub biography: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

impl Validate for BiographyForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        Validator::new()
            .required("biography", "Biography", &self.biography)
            .max_chars("biography", "Biography", &self.biography, 2000)
            .url("website", "Website", self.website.as_deref().unwrap_or(""))
            .url("linkedin", "LinkedIn", self.linkedin.as_deref().unwrap_or(""))
            .finish()
    }
}
