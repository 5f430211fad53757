use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use client::ApiClient;
use common::models::{
    Category, Criteria, Judge, JudgeForm, MediaChannel, MediaChannelForm, NamedForm, Paginated,
    ReferenceRecord, Region, RegionForm,
};
use portal::ListState;
use serde::Serialize;

use crate::context::Context;
use crate::{output, prompt};

#[derive(Args)]
pub struct ReferenceArgs {
    kind: Kind,
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Categories,
    Criterias,
    Regions,
    MediaChannels,
    Judges,
}

#[derive(Subcommand)]
enum Action {
    List {
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    Create,
    Edit { uuid: String },
    Delete {
        uuid: String,
        #[arg(long, short)]
        yes: bool,
    },
}

/// Filling in a reference form from prompts.
trait PromptForm: Sized {
    fn prompt(initial: Option<&Self>) -> Result<Self>;
}

impl PromptForm for NamedForm {
    fn prompt(initial: Option<&Self>) -> Result<Self> {
        let initial = initial.cloned().unwrap_or_default();
        Ok(Self {
            name: prompt::text("Name", &initial.name)?,
            description: prompt::optional("Description", initial.description.as_deref())?,
        })
    }
}

impl PromptForm for RegionForm {
    fn prompt(initial: Option<&Self>) -> Result<Self> {
        let initial = initial.cloned().unwrap_or_default();
        Ok(Self {
            name: prompt::text("Name", &initial.name)?,
            code: prompt::optional("Code", initial.code.as_deref())?,
        })
    }
}

impl PromptForm for MediaChannelForm {
    fn prompt(initial: Option<&Self>) -> Result<Self> {
        let initial = initial.cloned().unwrap_or_default();
        Ok(Self {
            name: prompt::text("Name", &initial.name)?,
            media_type: prompt::optional("Media type", initial.media_type.as_deref())?,
        })
    }
}

impl PromptForm for JudgeForm {
    fn prompt(initial: Option<&Self>) -> Result<Self> {
        let initial = initial.cloned().unwrap_or_default();
        Ok(Self {
            first_name: prompt::text("First name", &initial.first_name)?,
            last_name: prompt::text("Last name", &initial.last_name)?,
            email: prompt::text("Email", &initial.email)?,
            organization: prompt::optional("Organization", initial.organization.as_deref())?,
        })
    }
}

/// The record as an editable form.
trait Editable: ReferenceRecord + Serialize {
    fn to_form(&self) -> Self::Form;
}

impl Editable for Category {
    fn to_form(&self) -> NamedForm {
        NamedForm {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

impl Editable for Criteria {
    fn to_form(&self) -> NamedForm {
        NamedForm {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

impl Editable for Region {
    fn to_form(&self) -> RegionForm {
        RegionForm {
            name: self.name.clone(),
            code: self.code.clone(),
        }
    }
}

impl Editable for MediaChannel {
    fn to_form(&self) -> MediaChannelForm {
        MediaChannelForm {
            name: self.name.clone(),
            media_type: self.media_type.clone(),
        }
    }
}

impl Editable for Judge {
    fn to_form(&self) -> JudgeForm {
        JudgeForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            organization: self.organization.clone(),
        }
    }
}

pub async fn run(ctx: &Context, args: ReferenceArgs) -> Result<()> {
    match args.kind {
        Kind::Categories => handle::<Category>(ctx, args.action).await,
        Kind::Criterias => handle::<Criteria>(ctx, args.action).await,
        Kind::Regions => handle::<Region>(ctx, args.action).await,
        Kind::MediaChannels => handle::<MediaChannel>(ctx, args.action).await,
        Kind::Judges => handle::<Judge>(ctx, args.action).await,
    }
}

async fn handle<R>(ctx: &Context, action: Action) -> Result<()>
where
    R: Editable,
    R::Form: PromptForm,
{
    let client = ctx.guard(R::PATH)?;
    match action {
        Action::List { search, page } => list::<R>(ctx, &client, search, page).await,
        Action::Create => {
            let mut form = R::Form::prompt(None)?;
            loop {
                match client.reference::<R>().create(&form).await {
                    Ok(record) => {
                        output::success(format!("{} {} created", R::LABEL, record.display_name()));
                        return Ok(());
                    }
                    Err(err) if err.field_errors().is_some() => {
                        output::client_error(&err);
                        if !prompt::confirm("Fix and try again?", true)? {
                            return Ok(());
                        }
                        form = R::Form::prompt(Some(&form))?;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        Action::Edit { uuid } => {
            let record = client.reference::<R>().show(&uuid).await?;
            let form = R::Form::prompt(Some(&record.to_form()))?;
            let record = client.reference::<R>().update(&uuid, &form).await?;
            output::success(format!("{} {} saved", R::LABEL, record.display_name()));
            Ok(())
        }
        Action::Delete { uuid, yes } => {
            if !yes && !prompt::confirm(&format!("Delete {} {uuid}?", R::LABEL), false)? {
                return Ok(());
            }
            client.reference::<R>().delete(&uuid).await?;
            output::success(format!("{} deleted", R::LABEL));
            Ok(())
        }
    }
}

async fn list<R: Editable>(
    ctx: &Context,
    client: &ApiClient,
    search: Option<String>,
    page: u64,
) -> Result<()> {
    let mut state = ListState::new(ctx.per_page());
    if let Some(search) = search {
        state.set_search(search);
    }
    state.set_page(page);

    let records: Paginated<R> = client.reference::<R>().list(&state.params()).await?;
    if ctx.json {
        return output::json(&records);
    }
    let rows = records
        .data
        .iter()
        .map(|r| vec![r.uuid().to_string(), r.display_name()])
        .collect::<Vec<_>>();
    output::table(&["UUID", R::LABEL], &rows);
    output::page_footer(&records, state.page());
    Ok(())
}
