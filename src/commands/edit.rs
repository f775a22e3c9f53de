use super::{add::parse_priority, load, report};
use crate::api::TaskApi;
use crate::libs::{
    list::TaskList,
    messages::Message,
    store::TaskStore,
    task::{timestamp, Priority, TaskPatch},
    view::View,
};
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Id of the task to change
    id: i64,

    #[arg(long)]
    title: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    #[arg(short, long, value_parser = parse_priority)]
    priority: Option<Priority>,

    /// New deadline as RFC 3339, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD`
    #[arg(long, conflicts_with = "clear_deadline")]
    deadline: Option<String>,

    /// Remove the deadline
    #[arg(long)]
    clear_deadline: bool,

    /// Set the completed flag explicitly
    #[arg(long)]
    completed: Option<bool>,
}

impl EditArgs {
    fn patch(&self) -> Result<TaskPatch> {
        let deadline = match (&self.deadline, self.clear_deadline) {
            (_, true) => Some(None),
            (Some(raw), false) => match timestamp::parse(raw) {
                Some(ts) => Some(Some(ts)),
                None => msg_bail_anyhow!(Message::InvalidDeadline(raw.clone())),
            },
            (None, false) => None,
        };
        Ok(TaskPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            deadline,
            completed: self.completed,
        })
    }
}

pub async fn cmd(store: &TaskStore<TaskApi>, args: EditArgs) -> Result<()> {
    let patch = args.patch()?;
    if patch.is_empty() {
        msg_bail_anyhow!(Message::NothingToUpdate);
    }

    load(store).await;
    let outcome = store.update(args.id, patch).await;
    report(store, outcome)?;

    let mut list = TaskList::new();
    list.toggle_expanded(args.id);
    list.sync(&store.tasks());
    View::render(&store.tasks(), &list, &store.view());
    Ok(())
}
