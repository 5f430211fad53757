use std::fmt;

use async_trait::async_trait;
use client::{ApiClient, ClientError};
use common::models::{
    ApplicationAward, AttachmentsForm, BasicInfoForm, CollaboratorsForm, MediaInfoForm,
    MemberForm, ReviewForm,
};
use common::validation::{FieldErrors, Validate};

use crate::flow::{FlowError, StepFlow, Wizard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplicationStep {
    BasicInfo,
    MediaInfo,
    Attachments,
    /// Only for group applications.
    Collaborators,
    Review,
}

impl fmt::Display for ApplicationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BasicInfo => "Basic Info",
            Self::MediaInfo => "Media Info",
            Self::Attachments => "Attachments",
            Self::Collaborators => "Collaborators",
            Self::Review => "Review",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationData {
    /// Set once Basic Info is first saved; later saves update instead of create.
    pub uuid: Option<String>,
    pub basic: BasicInfoForm,
    pub media: MediaInfoForm,
    pub attachments: AttachmentsForm,
    /// Kept even while the Collaborators step is hidden.
    pub collaborators: CollaboratorsForm,
    pub review: ReviewForm,
    pub record: Option<ApplicationAward>,
}

impl ApplicationData {
    /// Blank form data with the award preselected.
    pub fn for_award(award_uuid: &str) -> Self {
        Self {
            basic: BasicInfoForm {
                award_uuid: award_uuid.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn started(&self) -> Result<&str, FlowError> {
        self.uuid.as_deref().ok_or(FlowError::NotStarted)
    }

    fn adopt(&mut self, record: ApplicationAward) {
        self.uuid = Some(record.uuid.clone());
        self.record = Some(record);
    }
}

impl From<&ApplicationAward> for ApplicationData {
    fn from(app: &ApplicationAward) -> Self {
        Self {
            uuid: Some(app.uuid.clone()),
            basic: BasicInfoForm::from(app),
            media: MediaInfoForm {
                media_channel_uuid: app.media_channel_uuid.clone().unwrap_or_default(),
                publication_date: app.publication_date,
                story_link: app.story_link.clone().unwrap_or_default(),
            },
            attachments: AttachmentsForm::default(),
            collaborators: CollaboratorsForm {
                members: app.members.iter().map(MemberForm::from).collect(),
            },
            review: ReviewForm::default(),
            record: Some(app.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationInput {
    BasicInfo(BasicInfoForm),
    MediaInfo(MediaInfoForm),
    Attachments(AttachmentsForm),
    Collaborators(CollaboratorsForm),
    Review(ReviewForm),
}

impl Validate for ApplicationInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        match self {
            Self::BasicInfo(form) => form.validate(),
            Self::MediaInfo(form) => form.validate(),
            Self::Attachments(form) => form.validate(),
            Self::Collaborators(form) => form.validate(),
            Self::Review(form) => form.validate(),
        }
    }
}

/// Award application, numbered from 1.
pub struct ApplicationWizard {
    client: ApiClient,
}

impl ApplicationWizard {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn start(client: ApiClient, award_uuid: &str) -> StepFlow<Self> {
        StepFlow::with_data(Self::new(client), ApplicationData::for_award(award_uuid))
    }

    /// Fetch an existing application and continue at its `currentStage`.
    pub async fn resume(client: ApiClient, uuid: &str) -> Result<StepFlow<Self>, ClientError> {
        let app = client.applications().show(uuid).await?;
        let stage = app.current_stage;
        Ok(StepFlow::resume(Self::new(client), ApplicationData::from(&app), stage))
    }
}

#[async_trait]
impl Wizard for ApplicationWizard {
    type Step = ApplicationStep;
    type Data = ApplicationData;
    type Input = ApplicationInput;

    const FIRST_STEP_NUMBER: u32 = 1;

    fn steps(&self, data: &ApplicationData) -> Vec<ApplicationStep> {
        let mut steps = vec![
            ApplicationStep::BasicInfo,
            ApplicationStep::MediaInfo,
            ApplicationStep::Attachments,
        ];
        if data.basic.is_group_application {
            steps.push(ApplicationStep::Collaborators);
        }
        steps.push(ApplicationStep::Review);
        steps
    }

    fn step_of(input: &ApplicationInput) -> ApplicationStep {
        match input {
            ApplicationInput::BasicInfo(_) => ApplicationStep::BasicInfo,
            ApplicationInput::MediaInfo(_) => ApplicationStep::MediaInfo,
            ApplicationInput::Attachments(_) => ApplicationStep::Attachments,
            ApplicationInput::Collaborators(_) => ApplicationStep::Collaborators,
            ApplicationInput::Review(_) => ApplicationStep::Review,
        }
    }

    async fn submit(
        &self,
        input: &ApplicationInput,
        data: &ApplicationData,
    ) -> Result<ApplicationData, FlowError> {
        let service = self.client.applications();
        let mut data = data.clone();

        let record = match input {
            ApplicationInput::BasicInfo(form) => {
                let record = service.save_basic_info(data.uuid.as_deref(), form).await?;
                data.basic = form.clone();
                record
            }
            ApplicationInput::MediaInfo(form) => {
                let record = service.update_media_info(data.started()?, form).await?;
                data.media = form.clone();
                record
            }
            ApplicationInput::Attachments(form) => {
                let record = service.upload_attachments(data.started()?, form).await?;
                data.attachments = form.clone();
                record
            }
            ApplicationInput::Collaborators(form) => {
                let record = service.save_collaborators(data.started()?, form).await?;
                data.collaborators = form.clone();
                record
            }
            ApplicationInput::Review(form) => {
                let record = service.submit(data.started()?, form).await?;
                data.review = form.clone();
                record
            }
        };
        data.adopt(record);
        Ok(data)
    }
}
