use anyhow::Result;
use clap::Subcommand;
use common::models::{ApplicationAward, ApplicationFilter};
use common::status::ApplicationStatus;
use portal::ListState;

use crate::context::Context;
use crate::{output, prompt};

#[derive(Subcommand)]
pub enum ApplicationsCommand {
    /// List applications
    List {
        #[arg(long)]
        award: Option<String>,
        #[arg(long)]
        round: Option<String>,
        /// pending, approved or rejected
        #[arg(long)]
        status: Option<ApplicationStatus>,
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    /// Show an application with its members, attachments and scores
    Show { uuid: String },
    /// Approve an application after screening
    Approve { uuid: String },
    /// Reject an application after screening
    Reject { uuid: String },
    /// Delete an application
    Delete {
        uuid: String,
        #[arg(long, short)]
        yes: bool,
    },
}

pub async fn run(ctx: &Context, command: ApplicationsCommand) -> Result<()> {
    match command {
        ApplicationsCommand::List {
            award,
            round,
            status,
            search,
            page,
        } => {
            let filter = ApplicationFilter {
                award_uuid: award,
                round_uuid: round,
                status,
                stage: None,
            };
            list(ctx, &filter, search, page).await
        }
        ApplicationsCommand::Show { uuid } => show(ctx, &uuid).await,
        ApplicationsCommand::Approve { uuid } => {
            set_status(ctx, &uuid, ApplicationStatus::Approved).await
        }
        ApplicationsCommand::Reject { uuid } => {
            set_status(ctx, &uuid, ApplicationStatus::Rejected).await
        }
        ApplicationsCommand::Delete { uuid, yes } => {
            let client = ctx.guard(&format!("/applications/{uuid}"))?;
            if !yes && !prompt::confirm(&format!("Delete application {uuid}?"), false)? {
                return Ok(());
            }
            client.applications().delete(&uuid).await?;
            output::success("Application deleted");
            Ok(())
        }
    }
}

pub fn rows(applications: &[ApplicationAward], round_uuid: Option<&str>) -> Vec<Vec<String>> {
    applications
        .iter()
        .map(|a| {
            vec![
                a.uuid.clone(),
                a.title.clone(),
                output::or_dash(a.applicant_name.as_deref()),
                a.status.label().to_string(),
                format!("{:.1}", a.round_total(round_uuid)),
            ]
        })
        .collect()
}

pub const HEADERS: &[&str] = &["UUID", "Title", "Applicant", "Status", "Score"];

async fn list(
    ctx: &Context,
    filter: &ApplicationFilter,
    search: Option<String>,
    page: u64,
) -> Result<()> {
    let client = ctx.guard("/applications")?;
    let mut state = ListState::new(ctx.per_page());
    if let Some(search) = search {
        state.set_search(search);
    }
    state.set_page(page);

    let applications = client.applications().list(&state.params(), filter).await?;
    if ctx.json {
        return output::json(&applications);
    }
    output::table(
        HEADERS,
        &rows(&applications.data, filter.round_uuid.as_deref()),
    );
    output::page_footer(&applications, state.page());
    Ok(())
}

async fn show(ctx: &Context, uuid: &str) -> Result<()> {
    let client = ctx.guard(&format!("/applications/{uuid}"))?;
    let app = client.applications().show(uuid).await?;
    if ctx.json {
        return output::json(&app);
    }
    output::heading(&app.title);
    output::info(format!("Status: {}", app.status.label()));
    output::info(format!(
        "Applicant: {}",
        output::or_dash(app.applicant_name.as_deref())
    ));
    if let Some(description) = &app.description {
        println!("{description}");
    }
    if let Some(link) = &app.story_link {
        output::info(format!("Story: {link}"));
    }

    if !app.members.is_empty() {
        output::heading("Members");
        let rows = app
            .members
            .iter()
            .map(|m| vec![m.full_name.clone(), m.email.clone(), output::or_dash(m.role.as_deref())])
            .collect::<Vec<_>>();
        output::table(&["Name", "Email", "Role"], &rows);
    }
    if !app.attachments.is_empty() {
        output::heading("Attachments");
        let rows = app
            .attachments
            .iter()
            .map(|a| vec![a.file_name.clone(), output::or_dash(a.url.as_deref())])
            .collect::<Vec<_>>();
        output::table(&["File", "URL"], &rows);
    }
    if !app.scores.is_empty() {
        output::heading("Scores");
        let rows = app
            .scores
            .iter()
            .map(|s| {
                vec![
                    output::or_dash(s.round_uuid.as_deref()),
                    s.award_criteria_uuid.clone(),
                    s.score.to_string(),
                    output::or_dash(s.comments.as_deref()),
                ]
            })
            .collect::<Vec<_>>();
        output::table(&["Round", "Criteria", "Score", "Comments"], &rows);
        output::info(format!("Total: {:.1}", app.round_total(None)));
    }
    Ok(())
}

async fn set_status(ctx: &Context, uuid: &str, status: ApplicationStatus) -> Result<()> {
    let client = ctx.guard(&format!("/applications/{uuid}"))?;
    let app = client.applications().set_status(uuid, status).await?;
    output::success(format!("{} is now {}", app.title, app.status.label()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_use_round_total() {
        let app: ApplicationAward = serde_json::from_str(
            r#"{"uuid":"x","title":"Water","status":"approved","scores":[
                {"uuid":"s1","awardCriteriaUuid":"c1","roundUuid":"r1","score":4},
                {"uuid":"s2","awardCriteriaUuid":"c1","roundUuid":"r2","score":6}
            ]}"#,
        )
        .unwrap();
        let rows = rows(&[app], Some("r2"));
        assert_eq!(rows[0][1], "Water");
        assert_eq!(rows[0][2], "-");
        assert_eq!(rows[0][3], "Approved");
        assert_eq!(rows[0][4], "6.0");
    }
}
