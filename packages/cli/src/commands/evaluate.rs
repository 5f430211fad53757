use anyhow::{Result, bail};
use clap::Subcommand;
use common::EvaluationStage;
use portal::{EvaluationBoard, LoadState, Tab};

use crate::commands::applications;
use crate::context::Context;
use crate::{output, prompt};

#[derive(Subcommand)]
pub enum EvaluateCommand {
    /// Show one tab of an award's evaluation board
    Show {
        award: String,
        /// all, screening or a round uuid (default: the current round)
        #[arg(long)]
        tab: Option<String>,
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u64>,
    },
    /// Complete screening or the current round
    Complete {
        award: String,
        #[arg(long, short)]
        yes: bool,
    },
    /// Page through the board interactively
    Browse { award: String },
}

pub async fn run(ctx: &Context, command: EvaluateCommand) -> Result<()> {
    match command {
        EvaluateCommand::Show {
            award,
            tab,
            search,
            page,
        } => {
            let mut board = open(ctx, &award).await?;
            if let Some(key) = tab {
                board.select_tab(find_tab(&board, &key)?)?;
            }
            if let Some(search) = search {
                board.search(&search);
            }
            if let Some(page) = page {
                board.set_page(page);
            }
            render(ctx, &board).await
        }
        EvaluateCommand::Complete { award, yes } => {
            let mut board = open(ctx, &award).await?;
            complete(&mut board, yes).await
        }
        EvaluateCommand::Browse { award } => {
            let mut board = open(ctx, &award).await?;
            browse(ctx, &mut board).await
        }
    }
}

async fn open(ctx: &Context, award: &str) -> Result<EvaluationBoard> {
    let client = ctx.guard(&format!("/awards/{award}/evaluation"))?;
    Ok(EvaluationBoard::open_with_page_size(client, award, ctx.per_page()).await?)
}

fn find_tab(board: &EvaluationBoard, key: &str) -> Result<Tab> {
    match board.tabs().into_iter().find(|t| t.key() == key) {
        Some(tab) => Ok(tab),
        None => bail!(
            "Unknown tab '{key}'. Tabs: {}",
            board
                .tabs()
                .iter()
                .map(|t| t.key().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

async fn render(ctx: &Context, board: &EvaluationBoard) -> Result<()> {
    let state = board.settled().await;
    if ctx.json {
        return match state {
            LoadState::Ready(page) => output::json(&page),
            LoadState::Failed(message) => bail!(message),
            LoadState::Idle | LoadState::Loading => Ok(()),
        };
    }

    let tab = board.current_tab();
    output::heading(format!(
        "{} · {} · {}",
        board.award().title,
        board.stage(),
        board.tab_label(tab)
    ));
    match state {
        LoadState::Ready(page) => {
            let round = match tab {
                Tab::Round(uuid) => Some(uuid.as_str()),
                _ => None,
            };
            output::table(applications::HEADERS, &applications::rows(&page.data, round));
            output::page_footer(&page, board.list().page());
        }
        LoadState::Failed(message) => output::warn(message),
        LoadState::Idle | LoadState::Loading => {}
    }
    Ok(())
}

async fn complete(board: &mut EvaluationBoard, yes: bool) -> Result<()> {
    let stage = board.stage();
    if !stage.can_complete(board.plan()) {
        bail!(
            "{} is not available during {}",
            stage.complete_label(),
            stage
        );
    }
    let question = format!("{} for {}?", stage.complete_label(), board.award().title);
    if !yes && !prompt::confirm(&question, false)? {
        return Ok(());
    }

    let result = match stage {
        EvaluationStage::Screening => board.complete_screening().await,
        EvaluationStage::Round(_) | EvaluationStage::Final(_) => board.complete_round().await,
    };
    match result {
        Ok(transition) => {
            output::success(format!("{} → {}", transition.from, transition.to));
            Ok(())
        }
        Err(err) => {
            if let Some(message) = err.notification() {
                bail!(message);
            }
            Ok(())
        }
    }
}

async fn browse(ctx: &Context, board: &mut EvaluationBoard) -> Result<()> {
    const NEXT: &str = "Next page";
    const PREVIOUS: &str = "Previous page";
    const SEARCH: &str = "Search";
    const COMPLETE: &str = "Complete stage";
    const QUIT: &str = "Quit";

    loop {
        render(ctx, board).await?;

        let tabs = board.tabs();
        let mut items = tabs
            .iter()
            .map(|t| format!("Tab: {}", board.tab_label(t)))
            .collect::<Vec<_>>();
        items.extend([NEXT, PREVIOUS, SEARCH, COMPLETE, QUIT].map(String::from));

        let choice = prompt::select("Action", &items, tabs.len())?;
        if let Some(tab) = tabs.get(choice) {
            board.select_tab(tab.clone())?;
            continue;
        }
        match items[choice].as_str() {
            NEXT => {
                let total_pages = board.applications().data().map(|p| p.total_pages).unwrap_or(0);
                let mut list = board.list();
                if list.next_page(total_pages) {
                    board.set_page(list.page());
                }
            }
            PREVIOUS => {
                let mut list = board.list();
                if list.previous_page() {
                    board.set_page(list.page());
                }
            }
            SEARCH => {
                let current = board.list().search().to_string();
                let text = prompt::text("Search", &current)?;
                board.search(&text);
            }
            COMPLETE => {
                if let Err(err) = complete(board, false).await {
                    output::warn(err.to_string());
                }
            }
            _ => return Ok(()),
        }
    }
}
