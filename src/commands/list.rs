use super::load;
use crate::api::TaskApi;
use crate::libs::{
    list::TaskList,
    messages::Message,
    store::{Outcome, TaskStore},
    view::View,
    view_state::ViewAction,
};
use crate::{msg_bail_anyhow, msg_warning};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show the detail panel of this task
    #[arg(short, long)]
    expand: Option<i64>,

    /// Show totals below the table
    #[arg(short, long)]
    summary: bool,

    /// Print the store snapshot as JSON
    #[arg(long)]
    json: bool,
}

pub async fn cmd(store: &TaskStore<TaskApi>, args: ListArgs) -> Result<()> {
    if let Outcome::Failed(error) = load(store).await {
        msg_bail_anyhow!(Message::CommandFailed(error.to_string()));
    }
    let tasks = store.tasks();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        return Ok(());
    }

    let mut list = TaskList::new();
    if let Some(id) = args.expand {
        list.toggle_expanded(id);
        list.sync(&tasks);
        if list.expanded().is_none() {
            msg_warning!(Message::TaskNotInList(id));
        }
    }
    if args.summary {
        store.dispatch(ViewAction::OpenDrawer);
    }

    View::render(&tasks, &list, &store.view());
    Ok(())
}
