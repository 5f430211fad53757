use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use common::models::{
    Award, AwardCategoryForm, AwardCriteriaForm, AwardForm, AwardInstructionForm, AwardJudgeForm,
    DEFAULT_MAX_SCORE,
};
use futures::try_join;
use portal::ListState;

use crate::context::Context;
use crate::{output, prompt};

#[derive(Subcommand)]
pub enum AwardsCommand {
    /// List awards
    List {
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Show one award with its rounds
    Show { uuid: String },
    /// Create an award
    Create,
    /// Edit an award's details
    Edit { uuid: String },
    /// Publish an award so journalists can apply
    Publish {
        uuid: String,
        /// Unpublish instead
        #[arg(long)]
        undo: bool,
    },
    /// Delete an award
    Delete {
        uuid: String,
        #[arg(long, short)]
        yes: bool,
    },
    /// Categories, criteria, judges and instructions attached to an award
    Parts { uuid: String },
    /// Attach a category, criterion, judge or instruction to an award
    Link {
        award: String,
        kind: PartKind,
        /// Category, criteria or judge uuid (instructions are prompted for)
        target: Option<String>,
        #[arg(long, default_value_t = DEFAULT_MAX_SCORE)]
        max_score: f64,
    },
    /// Detach a part from its award
    Unlink { kind: PartKind, uuid: String },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PartKind {
    Category,
    Criteria,
    Judge,
    Instruction,
}

pub async fn run(ctx: &Context, command: AwardsCommand) -> Result<()> {
    match command {
        AwardsCommand::List { search, page } => list(ctx, search, page).await,
        AwardsCommand::Show { uuid } => show(ctx, &uuid).await,
        AwardsCommand::Create => create(ctx).await,
        AwardsCommand::Edit { uuid } => edit(ctx, &uuid).await,
        AwardsCommand::Publish { uuid, undo } => {
            let client = ctx.guard(&format!("/awards/{uuid}"))?;
            let award = client.awards().set_published(&uuid, !undo).await?;
            let verb = if award.is_published { "published" } else { "unpublished" };
            output::success(format!("{} {verb}", award.title));
            Ok(())
        }
        AwardsCommand::Delete { uuid, yes } => {
            let client = ctx.guard(&format!("/awards/{uuid}"))?;
            if !yes && !prompt::confirm(&format!("Delete award {uuid}?"), false)? {
                return Ok(());
            }
            client.awards().delete(&uuid).await?;
            output::success("Award deleted");
            Ok(())
        }
        AwardsCommand::Parts { uuid } => parts(ctx, &uuid).await,
        AwardsCommand::Link {
            award,
            kind,
            target,
            max_score,
        } => link(ctx, &award, kind, target, max_score).await,
        AwardsCommand::Unlink { kind, uuid } => {
            let client = ctx.guard("/awards")?;
            let parts = client.award_parts();
            match kind {
                PartKind::Category => parts.remove_category(&uuid).await?,
                PartKind::Criteria => parts.remove_criteria(&uuid).await?,
                PartKind::Judge => parts.remove_judge(&uuid).await?,
                PartKind::Instruction => parts.remove_instruction(&uuid).await?,
            }
            output::success("Removed");
            Ok(())
        }
    }
}

async fn list(ctx: &Context, search: Option<String>, page: u64) -> Result<()> {
    let client = ctx.guard("/awards")?;
    let mut state = ListState::new(ctx.per_page());
    if let Some(search) = search {
        state.set_search(search);
    }
    state.set_page(page);

    let awards = client.awards().list(&state.params()).await?;
    if ctx.json {
        return output::json(&awards);
    }
    let rows = awards
        .data
        .iter()
        .map(|a| {
            vec![
                a.uuid.clone(),
                a.title.clone(),
                window(a),
                if a.is_published { "yes" } else { "no" }.to_string(),
                a.current_round()
                    .map(|r| r.display_name())
                    .unwrap_or_else(|| "Screening".to_string()),
            ]
        })
        .collect::<Vec<_>>();
    output::table(&["UUID", "Title", "Applications", "Published", "Stage"], &rows);
    output::page_footer(&awards, state.page());
    Ok(())
}

fn window(award: &Award) -> String {
    format!(
        "{} → {}",
        output::or_dash(award.start_date),
        output::or_dash(award.end_date)
    )
}

async fn show(ctx: &Context, uuid: &str) -> Result<()> {
    let client = ctx.guard(&format!("/awards/{uuid}"))?;
    let award = client.awards().show(uuid).await?;
    if ctx.json {
        return output::json(&award);
    }
    output::heading(&award.title);
    if let Some(description) = &award.description {
        println!("{description}");
    }
    output::info(format!("Applications: {}", window(&award)));
    output::info(format!(
        "Judging: {} → {}",
        output::or_dash(award.judge_start_date),
        output::or_dash(award.judge_end_date)
    ));
    output::info(format!(
        "Stage: {}",
        common::EvaluationStage::from_award(&award)
    ));

    let rows = award
        .rounds_in_order()
        .into_iter()
        .map(|r| {
            vec![
                r.number.to_string(),
                r.display_name(),
                r.minimum_score.to_string(),
                if r.is_final { "final" } else { "" }.to_string(),
                if r.is_current { "current" } else { "" }.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    output::heading("Rounds");
    output::table(&["#", "Name", "Minimum", "", ""], &rows);
    Ok(())
}

fn ask_award(initial: &AwardForm) -> Result<AwardForm> {
    Ok(AwardForm {
        title: prompt::text("Title", &initial.title)?,
        description: prompt::text("Description", &initial.description)?,
        start_date: prompt::date("Applications open", initial.start_date)?,
        end_date: prompt::date("Applications close", initial.end_date)?,
        judge_start_date: prompt::date("Judging opens", initial.judge_start_date)?,
        judge_end_date: prompt::date("Judging closes", initial.judge_end_date)?,
        is_active: prompt::confirm("Active?", initial.is_active || initial.title.is_empty())?,
    })
}

async fn create(ctx: &Context) -> Result<()> {
    let client = ctx.guard("/awards")?;
    let mut form = AwardForm::default();
    loop {
        form = ask_award(&form)?;
        match client.awards().create(&form).await {
            Ok(award) => {
                output::success(format!("Created {} ({})", award.title, award.uuid));
                return Ok(());
            }
            Err(e) if e.field_errors().is_some() => {
                output::client_error(&e);
                if !prompt::confirm("Fix and try again?", true)? {
                    return Ok(());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

async fn edit(ctx: &Context, uuid: &str) -> Result<()> {
    let client = ctx.guard(&format!("/awards/{uuid}"))?;
    let award = client.awards().show(uuid).await?;
    let form = ask_award(&AwardForm::from(&award))?;
    let award = client.awards().update_from_form(uuid, form).await?;
    output::success(format!("Saved {}", award.title));
    Ok(())
}

async fn parts(ctx: &Context, uuid: &str) -> Result<()> {
    let client = ctx.guard(&format!("/awards/{uuid}"))?;
    let awards = client.awards();
    let (categories, criterias, judges, instructions) = try_join!(
        awards.categories(uuid).into_future(),
        awards.criterias(uuid).into_future(),
        awards.judges(uuid).into_future(),
        awards.instructions(uuid).into_future(),
    )?;

    output::heading("Categories");
    let rows = categories
        .iter()
        .map(|c| vec![c.uuid.clone(), c.display_name()])
        .collect::<Vec<_>>();
    output::table(&["UUID", "Category"], &rows);

    output::heading("Criteria");
    let rows = criterias
        .iter()
        .map(|c| vec![c.uuid.clone(), c.display_name(), c.max_score.to_string()])
        .collect::<Vec<_>>();
    output::table(&["UUID", "Criteria", "Max score"], &rows);

    output::heading("Judges");
    let rows = judges
        .iter()
        .map(|j| {
            vec![
                j.uuid.clone(),
                j.judge
                    .as_ref()
                    .map(|judge| judge.full_name())
                    .unwrap_or_else(|| j.judge_uuid.clone()),
            ]
        })
        .collect::<Vec<_>>();
    output::table(&["UUID", "Judge"], &rows);

    output::heading("Instructions");
    let rows = instructions
        .iter()
        .map(|i| vec![i.uuid.clone(), i.title.clone()])
        .collect::<Vec<_>>();
    output::table(&["UUID", "Title"], &rows);
    Ok(())
}

async fn link(
    ctx: &Context,
    award: &str,
    kind: PartKind,
    target: Option<String>,
    max_score: f64,
) -> Result<()> {
    let client = ctx.guard(&format!("/awards/{award}"))?;
    let parts = client.award_parts();
    let award_uuid = award.to_string();
    let pick = || match &target {
        Some(target) => Ok(target.clone()),
        None => prompt::text("UUID", ""),
    };
    let uuid = match kind {
        PartKind::Category => {
            let form = AwardCategoryForm {
                award_uuid,
                category_uuid: pick()?,
            };
            parts.add_category(&form).await?.uuid
        }
        PartKind::Criteria => {
            let form = AwardCriteriaForm {
                award_uuid,
                criteria_uuid: pick()?,
                max_score,
            };
            parts.add_criteria(&form).await?.uuid
        }
        PartKind::Judge => {
            let form = AwardJudgeForm {
                award_uuid,
                judge_uuid: pick()?,
            };
            parts.add_judge(&form).await?.uuid
        }
        PartKind::Instruction => {
            let form = AwardInstructionForm {
                award_uuid,
                title: prompt::text("Title", "")?,
                content: prompt::text("Instruction", "")?,
            };
            parts.add_instruction(&form).await?.uuid
        }
    };
    output::success(format!("Linked ({uuid})"));
    Ok(())
}
