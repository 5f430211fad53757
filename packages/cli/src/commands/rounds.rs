use anyhow::{Result, bail};
use clap::Subcommand;
use common::models::RoundForm;

use crate::context::Context;
use crate::{output, prompt};

#[derive(Subcommand)]
pub enum RoundsCommand {
    /// List an award's rounds in order
    List { award: String },
    /// Add a round to an award
    Add {
        award: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        number: Option<u32>,
        #[arg(long, default_value_t = 0.0)]
        minimum_score: f64,
        #[arg(long = "final")]
        is_final: bool,
    },
    /// Rename a round or change its minimum score
    Edit { award: String, uuid: String },
    /// Remove a round
    Remove { uuid: String },
}

pub async fn run(ctx: &Context, command: RoundsCommand) -> Result<()> {
    match command {
        RoundsCommand::List { award } => {
            let client = ctx.guard(&format!("/awards/{award}"))?;
            let mut rounds = client.awards().rounds(&award).await?;
            rounds.sort_by_key(|r| r.number);
            if ctx.json {
                return output::json(&rounds);
            }
            let rows = rounds
                .iter()
                .map(|r| {
                    vec![
                        r.uuid.clone(),
                        r.number.to_string(),
                        r.display_name(),
                        r.minimum_score.to_string(),
                        flags(r.is_final, r.is_current),
                    ]
                })
                .collect::<Vec<_>>();
            output::table(&["UUID", "#", "Name", "Minimum", "Flags"], &rows);
            Ok(())
        }
        RoundsCommand::Add {
            award,
            name,
            number,
            minimum_score,
            is_final,
        } => {
            let client = ctx.guard(&format!("/awards/{award}"))?;
            let number = match number {
                Some(number) => number,
                None => {
                    let existing = client.awards().rounds(&award).await?;
                    existing.iter().map(|r| r.number).max().unwrap_or(0) + 1
                }
            };
            let name = match name {
                Some(name) => name,
                None => prompt::text("Round name", &format!("Round {number}"))?,
            };
            let form = RoundForm {
                award_uuid: award,
                number,
                name,
                minimum_score,
                is_final,
            };
            let round = client.award_parts().add_round(&form).await?;
            output::success(format!("Added {} ({})", round.display_name(), round.uuid));
            Ok(())
        }
        RoundsCommand::Edit { award, uuid } => {
            let client = ctx.guard(&format!("/awards/{award}"))?;
            let rounds = client.awards().rounds(&award).await?;
            let Some(round) = rounds.into_iter().find(|r| r.uuid == uuid) else {
                bail!("Round {uuid} is not part of award {award}");
            };
            let form = RoundForm {
                award_uuid: award,
                number: prompt::count("Number", round.number)?,
                name: prompt::text("Round name", &round.name)?,
                minimum_score: prompt::number("Minimum score", round.minimum_score)?,
                is_final: prompt::confirm("Final round?", round.is_final)?,
            };
            let round = client.award_parts().update_round(&uuid, &form).await?;
            output::success(format!("Saved {}", round.display_name()));
            Ok(())
        }
        RoundsCommand::Remove { uuid } => {
            let client = ctx.guard("/awards")?;
            client.award_parts().remove_round(&uuid).await?;
            output::success("Round removed");
            Ok(())
        }
    }
}

fn flags(is_final: bool, is_current: bool) -> String {
    let mut flags = Vec::new();
    if is_final {
        flags.push("final");
    }
    if is_current {
        flags.push("current");
    }
    flags.join(", ")
}
