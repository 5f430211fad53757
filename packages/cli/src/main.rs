mod commands;
mod config;
mod context;
mod output;
mod prompt;
mod session_store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::ClientError;
use tracing::Level;

use crate::commands::{
    applications, auth, awards, dashboard, evaluate, profile, project, reference, rounds, score,
};
use crate::config::AppConfig;
use crate::context::Context;

#[derive(Parser)]
#[command(name = "fellowship")]
#[command(version, about = "Console for the journalism fellowship and award program", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file, with or without extension (default: config/fellowship)
    #[arg(long, global = true)]
    config: Option<String>,

    /// API base URL, overriding the config file
    #[arg(long, global = true, env = "FELLOWSHIP_API_URL")]
    api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Awards (cohorts) and their categories, criteria, judges and instructions
    #[command(subcommand)]
    Awards(awards::AwardsCommand),
    /// Judging rounds of an award
    #[command(subcommand)]
    Rounds(rounds::RoundsCommand),
    /// Applications submitted to awards
    #[command(subcommand)]
    Applications(applications::ApplicationsCommand),
    /// Evaluation board: tabs per round, screening and round completion
    #[command(subcommand)]
    Evaluate(evaluate::EvaluateCommand),
    /// Score an application against the award's criteria
    Score(score::ScoreArgs),
    /// Start or continue an award application
    Apply(commands::apply::ApplyArgs),
    /// Complete your journalist profile
    Profile,
    /// Create or continue a project
    #[command(subcommand)]
    Project(project::ProjectCommand),
    /// Categories, criteria, regions, media channels and judges
    Reference(reference::ReferenceArgs),
    /// Summary figures for your role
    Dashboard,
    /// Check which page a path opens for the signed-in role
    Open { path: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    let ctx = Context::new(config, cli.json)?;

    // Ctrl-C drops the running command, which cancels its in-flight requests.
    let result = tokio::select! {
        result = run(&ctx, cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            output::warn("Interrupted");
            return Ok(());
        }
    };

    match result {
        Err(err) => match err.downcast_ref::<ClientError>() {
            Some(client_err) if client_err.is_canceled() => Ok(()),
            Some(client_err) => {
                output::client_error(client_err);
                std::process::exit(1);
            }
            None => Err(err),
        },
        Ok(()) => Ok(()),
    }
}

async fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Login { email } => auth::login(ctx, email).await,
        Command::Logout => auth::logout(ctx),
        Command::Whoami => auth::whoami(ctx),
        Command::Awards(cmd) => awards::run(ctx, cmd).await,
        Command::Rounds(cmd) => rounds::run(ctx, cmd).await,
        Command::Applications(cmd) => applications::run(ctx, cmd).await,
        Command::Evaluate(cmd) => evaluate::run(ctx, cmd).await,
        Command::Score(args) => score::run(ctx, args).await,
        Command::Apply(args) => commands::apply::run(ctx, args).await,
        Command::Profile => profile::run(ctx).await,
        Command::Project(cmd) => project::run(ctx, cmd).await,
        Command::Reference(args) => reference::run(ctx, args).await,
        Command::Dashboard => dashboard::run(ctx).await,
        Command::Open { path } => commands::open::run(ctx, &path),
    }
}
