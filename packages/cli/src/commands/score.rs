use anyhow::Result;
use clap::Args;
use portal::ScoreSheet;

use crate::context::Context;
use crate::{output, prompt};

#[derive(Args)]
pub struct ScoreArgs {
    /// Application to score
    application: String,
    /// Round being scored (default: the application's round)
    #[arg(long)]
    round: Option<String>,
}

pub async fn run(ctx: &Context, args: ScoreArgs) -> Result<()> {
    let client = ctx.guard(&format!("/applications/{}/score", args.application))?;
    let judge_uuid = ctx.session().and_then(|s| s.claims().uuid.clone());

    let application = client.applications().show(&args.application).await?;
    let round_uuid = args.round.or(application.round_uuid.clone());
    let mut sheet = ScoreSheet::load(
        &client,
        &application.award_uuid,
        &application.uuid,
        round_uuid,
        judge_uuid.as_deref(),
    )
    .await?;

    output::heading(format!("Scoring: {}", application.title));
    if sheet.entries().is_empty() {
        output::warn("This award has no criteria to score against");
        return Ok(());
    }

    loop {
        let entries = sheet.entries().to_vec();
        for entry in &entries {
            let label = format!(
                "{} (0-{})",
                entry.criteria.display_name(),
                entry.criteria.max_score
            );
            let score = prompt::number(&label, entry.score.unwrap_or_default())?;
            let comments = prompt::optional("  Comments", entry.comments.as_deref())?;
            sheet.set_score(&entry.criteria.uuid, score, comments);
        }
        output::info(format!("Total: {} / {}", sheet.total(), sheet.max_total()));
        if !prompt::confirm("Submit these scores?", true)? {
            return Ok(());
        }

        match sheet.submit(&client).await {
            Ok(saved) => {
                output::success(format!("{} scores saved", saved.len()));
                return Ok(());
            }
            Err(err) if err.field_errors().is_some() => {
                output::client_error(&err);
                if !prompt::confirm("Correct the scores?", true)? {
                    return Ok(());
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}
