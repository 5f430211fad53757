use std::fmt;

use async_trait::async_trait;
use client::{ApiClient, ClientError};
use common::models::{BiographyForm, JournalistProfile, ProfessionalInfoForm, ProfileBasicInfoForm};
use common::validation::{FieldErrors, Validate};

use crate::flow::{FlowError, StepFlow, Wizard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileStep {
    BasicInfo,
    ProfessionalInfo,
    Biography,
}

impl ProfileStep {
    pub const ALL: [ProfileStep; 3] = [Self::BasicInfo, Self::ProfessionalInfo, Self::Biography];
}

impl fmt::Display for ProfileStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BasicInfo => "Basic Info",
            Self::ProfessionalInfo => "Professional Info",
            Self::Biography => "Biography",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileData {
    pub basic: ProfileBasicInfoForm,
    pub professional: ProfessionalInfoForm,
    pub biography: BiographyForm,
    /// Latest copy of the record as returned by the server.
    pub profile: Option<JournalistProfile>,
}

impl From<&JournalistProfile> for ProfileData {
    fn from(profile: &JournalistProfile) -> Self {
        Self {
            basic: ProfileBasicInfoForm::from(profile),
            professional: ProfessionalInfoForm {
                media_channel_uuid: profile.media_channel_uuid.clone().unwrap_or_default(),
                position: profile.position.clone().unwrap_or_default(),
                years_of_experience: profile.years_of_experience.unwrap_or_default(),
            },
            biography: BiographyForm {
                biography: profile.biography.clone().unwrap_or_default(),
                website: profile.website.clone(),
                twitter: profile.twitter.clone(),
                linkedin: profile.linkedin.clone(),
            },
            profile: Some(profile.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileInput {
    BasicInfo(ProfileBasicInfoForm),
    ProfessionalInfo(ProfessionalInfoForm),
    Biography(BiographyForm),
}

impl Validate for ProfileInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        match self {
            Self::BasicInfo(form) => form.validate(),
            Self::ProfessionalInfo(form) => form.validate(),
            Self::Biography(form) => form.validate(),
        }
    }
}

/// Journalist onboarding, numbered from 1.
pub struct ProfileWizard {
    client: ApiClient,
}

impl ProfileWizard {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the signed-in journalist's record and continue where they left off.
    pub async fn resume(client: ApiClient) -> Result<StepFlow<Self>, ClientError> {
        let profile = client.journalists().me().await?;
        let stage = profile.current_stage;
        Ok(StepFlow::resume(
            Self::new(client),
            ProfileData::from(&profile),
            stage,
        ))
    }
}

#[async_trait]
impl Wizard for ProfileWizard {
    type Step = ProfileStep;
    type Data = ProfileData;
    type Input = ProfileInput;

    const FIRST_STEP_NUMBER: u32 = 1;

    fn steps(&self, _data: &ProfileData) -> Vec<ProfileStep> {
        ProfileStep::ALL.to_vec()
    }

    fn step_of(input: &ProfileInput) -> ProfileStep {
        match input {
            ProfileInput::BasicInfo(_) => ProfileStep::BasicInfo,
            ProfileInput::ProfessionalInfo(_) => ProfileStep::ProfessionalInfo,
            ProfileInput::Biography(_) => ProfileStep::Biography,
        }
    }

    async fn submit(&self, input: &ProfileInput, data: &ProfileData) -> Result<ProfileData, FlowError> {
        let service = self.client.journalists();
        let mut data = data.clone();
        let profile = match input {
            ProfileInput::BasicInfo(form) => {
                let profile = service.update_file(form).await?;
                data.basic = form.clone();
                data.basic.avatar = None;
                profile
            }
            ProfileInput::ProfessionalInfo(form) => {
                let profile = service.update_professional_info(form).await?;
                data.professional = form.clone();
                profile
            }
            ProfileInput::Biography(form) => {
                let profile = service.update_biography(form).await?;
                data.biography = form.clone();
                profile
            }
        };
        data.profile = Some(profile);
        Ok(data)
    }
}
