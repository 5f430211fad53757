use anyhow::Result;
use clap::Subcommand;
use common::models::{ProjectDetailsForm, ProjectTeamForm, ProjectTimelineForm};
use portal::StepFlow;
use portal::wizards::{ProjectData, ProjectInput, ProjectStep, ProjectWizard};

use crate::commands::apply::members;
use crate::commands::drive;
use crate::context::Context;
use crate::{output, prompt};

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Start a new project
    New {
        /// Award the project belongs to
        #[arg(long)]
        award: Option<String>,
    },
    /// Continue a saved project
    Resume { uuid: String },
}

pub async fn run(ctx: &Context, command: ProjectCommand) -> Result<()> {
    let mut flow = match command {
        ProjectCommand::New { award } => {
            let client = ctx.guard("/projects/new")?;
            let data = ProjectData {
                details: ProjectDetailsForm {
                    award_uuid: award,
                    ..Default::default()
                },
                ..Default::default()
            };
            StepFlow::with_data(ProjectWizard::new(client), data)
        }
        ProjectCommand::Resume { uuid } => {
            let client = ctx.guard(&format!("/projects/{uuid}"))?;
            ProjectWizard::resume(client, &uuid).await?
        }
    };

    let done = drive(&mut flow, ask).await?;
    match flow.data().uuid.as_deref() {
        Some(uuid) if done => output::success(format!("Project {uuid} saved")),
        Some(uuid) => output::info(format!(
            "Saved so far. Continue with `fellowship project resume {uuid}`"
        )),
        None => {}
    }
    Ok(())
}

fn ask(step: ProjectStep, data: &ProjectData) -> Result<ProjectInput> {
    Ok(match step {
        ProjectStep::Details => ProjectInput::Details(ProjectDetailsForm {
            title: prompt::text("Project title", &data.details.title)?,
            summary: prompt::text("Summary", &data.details.summary)?,
            award_uuid: data.details.award_uuid.clone(),
        }),
        ProjectStep::Timeline => {
            let timeline = &data.timeline;
            ProjectInput::Timeline(ProjectTimelineForm {
                start_date: prompt::date("Start date", timeline.start_date)?,
                end_date: prompt::date("End date", timeline.end_date)?,
                budget: prompt::number("Budget", timeline.budget)?,
            })
        }
        ProjectStep::Team => ProjectInput::Team(ProjectTeamForm {
            members: members(&data.team.members)?,
        }),
    })
}
