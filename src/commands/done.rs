use super::{load, report};
use crate::api::TaskApi;
use crate::libs::{
    messages::Message,
    store::{Outcome, TaskStore},
};
use crate::{msg_bail_anyhow, msg_info};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Id of the task to toggle
    id: i64,
}

pub async fn cmd(store: &TaskStore<TaskApi>, args: DoneArgs) -> Result<()> {
    if let Outcome::Failed(error) = load(store).await {
        msg_bail_anyhow!(Message::CommandFailed(error.to_string()));
    }
    let outcome = store.toggle_completed(args.id).await;
    report(store, outcome)?;

    if let Some(task) = store.task(args.id) {
        msg_info!(Message::TaskCompletedState {
            title: task.title,
            completed: task.completed,
        });
    }
    Ok(())
}
