use anyhow::{Result, bail};
use clap::Args;
use client::ApiClient;
use common::models::{
    AttachmentsForm, BasicInfoForm, CollaboratorsForm, ListParams, MediaChannel, MediaInfoForm,
    MemberForm, ReferenceRecord, ReviewForm,
};
use portal::wizards::{ApplicationData, ApplicationInput, ApplicationStep, ApplicationWizard};

use crate::commands::drive;
use crate::context::Context;
use crate::{output, prompt};

#[derive(Args)]
pub struct ApplyArgs {
    /// Start a new application to this award
    #[arg(long, conflicts_with = "resume")]
    award: Option<String>,
    /// Continue a saved application
    #[arg(long)]
    resume: Option<String>,
}

pub async fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let mut flow = match (args.award, args.resume) {
        (Some(award), None) => {
            let client = ctx.guard(&format!("/awards/{award}/apply"))?;
            ApplicationWizard::start(client, &award)
        }
        (None, Some(uuid)) => {
            let client = ctx.guard(&format!("/my-applications/{uuid}"))?;
            ApplicationWizard::resume(client, &uuid).await?
        }
        _ => bail!("Pass --award to start an application or --resume to continue one"),
    };

    let client = ctx.authenticated()?;
    let categories = award_categories(&client, &flow.data().basic.award_uuid).await?;
    let channels = options::<MediaChannel>(&client).await?;

    let done = drive(&mut flow, |step, data| ask(step, data, &categories, &channels)).await?;
    match flow.data().uuid.as_deref() {
        Some(uuid) if done => output::success(format!("Application {uuid} submitted")),
        Some(uuid) => output::info(format!(
            "Saved so far. Continue with `fellowship apply --resume {uuid}`"
        )),
        None => {}
    }
    Ok(())
}

async fn award_categories(client: &ApiClient, award_uuid: &str) -> Result<Vec<(String, String)>> {
    let categories = client.awards().categories(award_uuid).await?;
    Ok(categories
        .iter()
        .map(|c| (c.category_uuid.clone(), c.display_name()))
        .collect())
}

/// First page of a reference list as `(uuid, label)` choices.
pub async fn options<R: ReferenceRecord>(client: &ApiClient) -> Result<Vec<(String, String)>> {
    let page = client.reference::<R>().list(&ListParams::new(1, 100)).await?;
    Ok(page
        .data
        .iter()
        .map(|r| (r.uuid().to_string(), r.display_name()))
        .collect())
}

fn ask(
    step: ApplicationStep,
    data: &ApplicationData,
    categories: &[(String, String)],
    channels: &[(String, String)],
) -> Result<ApplicationInput> {
    Ok(match step {
        ApplicationStep::BasicInfo => {
            let basic = &data.basic;
            ApplicationInput::BasicInfo(BasicInfoForm {
                award_uuid: basic.award_uuid.clone(),
                category_uuid: prompt::choose("Category", categories, &basic.category_uuid)?,
                title: prompt::text("Title", &basic.title)?,
                description: prompt::text("Description", &basic.description)?,
                is_group_application: prompt::confirm(
                    "Is this a group application?",
                    basic.is_group_application,
                )?,
            })
        }
        ApplicationStep::MediaInfo => {
            let media = &data.media;
            ApplicationInput::MediaInfo(MediaInfoForm {
                media_channel_uuid: prompt::choose(
                    "Media channel",
                    channels,
                    &media.media_channel_uuid,
                )?,
                publication_date: prompt::date("Publication date", media.publication_date)?,
                story_link: prompt::text("Story link", &media.story_link)?,
            })
        }
        ApplicationStep::Attachments => ApplicationInput::Attachments(AttachmentsForm {
            files: prompt::files("Files (comma-separated)")?,
        }),
        ApplicationStep::Collaborators => ApplicationInput::Collaborators(CollaboratorsForm {
            members: members(&data.collaborators.members)?,
        }),
        ApplicationStep::Review => {
            if let Some(record) = &data.record {
                output::info(format!("{}: {}", record.title, record.status.label()));
            }
            ApplicationInput::Review(ReviewForm {
                confirm: prompt::confirm(
                    "I confirm this work is my own and the details are accurate",
                    false,
                )?,
            })
        }
    })
}

/// Edit a member list, starting from what was saved before.
pub fn members(saved: &[MemberForm]) -> Result<Vec<MemberForm>> {
    let mut members = Vec::new();
    for member in saved {
        if prompt::confirm(&format!("Keep {} <{}>?", member.full_name, member.email), true)? {
            members.push(member.clone());
        }
    }
    while members.is_empty() || prompt::confirm("Add another member?", false)? {
        members.push(MemberForm {
            full_name: prompt::text("Full name", "")?,
            email: prompt::text("Email", "")?,
            role: prompt::optional("Role", None)?,
        });
    }
    Ok(members)
}
