//! Command-line interface.
//!
//! Each subcommand is a thin root view: it builds a [`TaskStore`] on top of
//! the HTTP client, loads the collection, turns its arguments into one or
//! more intents and renders the resulting store.

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod init;
pub mod list;
pub mod optimize;

use crate::api::TaskApi;
use crate::libs::config::{Config, API_URL_ENV};
use crate::libs::messages::Message;
use crate::libs::store::{Outcome, TaskStore};
use crate::libs::view_state::{Theme, ViewState};
use crate::{msg_bail_anyhow, msg_debug, msg_error, msg_success};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::env;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the task service URL and display settings")]
    Init(init::InitArgs),
    #[command(about = "Show tasks")]
    List(list::ListArgs),
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "Change fields of a task")]
    Edit(edit::EditArgs),
    #[command(about = "Toggle the completed flag of a task")]
    Done(done::DoneArgs),
    #[command(about = "Delete tasks")]
    Delete(delete::DeleteArgs),
    #[command(about = "Run server-side importance optimization over all tasks")]
    Optimize,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Color theme for tables, overriding the configured one
    #[arg(long, global = true, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Log requests and store transitions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let _ = dotenv::dotenv();
        let cli = Self::parse();
        init_tracing(cli.verbose)?;

        let theme = cli.theme;
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::List(args) => list::cmd(&connect(theme)?, args).await,
            Commands::Add(args) => add::cmd(&connect(theme)?, args).await,
            Commands::Edit(args) => edit::cmd(&connect(theme)?, args).await,
            Commands::Done(args) => done::cmd(&connect(theme)?, args).await,
            Commands::Delete(args) => delete::cmd(&connect(theme)?, args).await,
            Commands::Optimize => optimize::cmd(&connect(theme)?).await,
        }
    }
}

fn connect(theme: Option<Theme>) -> Result<TaskStore<TaskApi>> {
    let config = Config::read()?;
    let theme = theme.unwrap_or_else(|| config.theme());
    Ok(open_store(&config, theme))
}

/// The store every task command works on.
pub fn open_store(config: &Config, theme: Theme) -> TaskStore<TaskApi> {
    let server = config.server();
    if env::var(API_URL_ENV).is_ok() {
        msg_debug!(Message::ApiUrlOverridden(server.api_url.clone()));
    }
    TaskStore::with_view(TaskApi::new(&server), ViewState::with_theme(theme))
}

/// Turns an intent outcome into the command result, printing the notification.
pub fn report(store: &TaskStore<TaskApi>, outcome: Outcome) -> Result<()> {
    let notification = store.view().notification;
    match outcome {
        Outcome::Failed(error) => msg_bail_anyhow!(Message::CommandFailed(error.to_string())),
        _ => {
            if let Some(notification) = notification {
                msg_success!(notification.message);
            }
            Ok(())
        }
    }
}

/// Initial fetch; a failure is reported but the command may continue.
pub async fn load(store: &TaskStore<TaskApi>) -> Outcome {
    let outcome = store.refresh().await;
    if let Some(error) = outcome.error() {
        msg_error!(error);
    }
    outcome
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    value.parse().map_err(|e: String| Message::InvalidTheme(e).to_string())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("TASKLION_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}
