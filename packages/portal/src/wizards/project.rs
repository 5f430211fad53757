use std::fmt;

use async_trait::async_trait;
use client::{ApiClient, ClientError};
use common::models::{Project, ProjectDetailsForm, ProjectTeamForm, ProjectTimelineForm};
use common::validation::{FieldErrors, Validate};

use crate::flow::{FlowError, StepFlow, Wizard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectStep {
    Details,
    Timeline,
    Team,
}

impl fmt::Display for ProjectStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Details => "Project Details",
            Self::Timeline => "Timeline & Budget",
            Self::Team => "Team",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectData {
    pub uuid: Option<String>,
    pub details: ProjectDetailsForm,
    pub timeline: ProjectTimelineForm,
    pub team: ProjectTeamForm,
    pub record: Option<Project>,
}

impl From<&Project> for ProjectData {
    fn from(project: &Project) -> Self {
        Self {
            uuid: Some(project.uuid.clone()),
            details: ProjectDetailsForm {
                title: project.title.clone(),
                summary: project.summary.clone(),
                award_uuid: project.award_uuid.clone(),
            },
            timeline: ProjectTimelineForm {
                start_date: project.start_date,
                end_date: project.end_date,
                budget: project.budget.unwrap_or_default(),
            },
            team: ProjectTeamForm {
                members: project.members.clone(),
            },
            record: Some(project.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectInput {
    Details(ProjectDetailsForm),
    Timeline(ProjectTimelineForm),
    Team(ProjectTeamForm),
}

impl Validate for ProjectInput {
    fn validate(&self) -> Result<(), FieldErrors> {
        match self {
            Self::Details(form) => form.validate(),
            Self::Timeline(form) => form.validate(),
            Self::Team(form) => form.validate(),
        }
    }
}

/// Project creation, numbered from 0.
pub struct ProjectWizard {
    client: ApiClient,
}

impl ProjectWizard {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn resume(client: ApiClient, uuid: &str) -> Result<StepFlow<Self>, ClientError> {
        let project = client.projects().show(uuid).await?;
        let stage = project.current_stage;
        Ok(StepFlow::resume(Self::new(client), ProjectData::from(&project), stage))
    }
}

#[async_trait]
impl Wizard for ProjectWizard {
    type Step = ProjectStep;
    type Data = ProjectData;
    type Input = ProjectInput;

    const FIRST_STEP_NUMBER: u32 = 0;

    fn steps(&self, _data: &ProjectData) -> Vec<ProjectStep> {
        vec![ProjectStep::Details, ProjectStep::Timeline, ProjectStep::Team]
    }

    fn step_of(input: &ProjectInput) -> ProjectStep {
        match input {
            ProjectInput::Details(_) => ProjectStep::Details,
            ProjectInput::Timeline(_) => ProjectStep::Timeline,
            ProjectInput::Team(_) => ProjectStep::Team,
        }
    }

    async fn submit(&self, input: &ProjectInput, data: &ProjectData) -> Result<ProjectData, FlowError> {
        let service = self.client.projects();
        let mut data = data.clone();
        let record = match (input, data.uuid.clone()) {
            (ProjectInput::Details(form), None) => {
                let record = service.create(form).await?;
                data.details = form.clone();
                record
            }
            (ProjectInput::Details(form), Some(uuid)) => {
                let record = service.update_details(&uuid, form).await?;
                data.details = form.clone();
                record
            }
            (ProjectInput::Timeline(form), Some(uuid)) => {
                let record = service.update_timeline(&uuid, form).await?;
                data.timeline = form.clone();
                record
            }
            (ProjectInput::Team(form), Some(uuid)) => {
                let record = service.update_team(&uuid, form).await?;
                data.team = form.clone();
                record
            }
            (_, None) => return Err(FlowError::NotStarted),
        };
        data.uuid = Some(record.uuid.clone());
        data.record = Some(record);
        Ok(data)
    }
}
