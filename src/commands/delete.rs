use super::{load, report};
use crate::api::TaskApi;
use crate::libs::{
    list::TaskList,
    messages::Message,
    store::{Outcome, TaskStore},
    view::View,
};
use crate::{msg_error, msg_info};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use futures::future::join_all;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Ids of the tasks to delete
    #[arg(required = true, num_args = 1..)]
    ids: Vec<i64>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(store: &TaskStore<TaskApi>, args: DeleteArgs) -> Result<()> {
    load(store).await;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTasks(args.ids.len()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::DeleteCancelled);
            return Ok(());
        }
    }

    // Each delete runs its own full cycle; the store keeps the newest list.
    let outcomes = join_all(args.ids.iter().map(|id| store.delete(*id))).await;

    let mut result = Outcome::Synced;
    for outcome in outcomes {
        if let Outcome::Failed(error) = outcome {
            msg_error!(error);
            if result.is_ok() {
                result = Outcome::Failed(error);
            }
        }
    }
    report(store, result)?;

    View::render(&store.tasks(), &TaskList::new(), &store.view());
    Ok(())
}
