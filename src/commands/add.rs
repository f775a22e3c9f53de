use super::{load, report};
use crate::api::TaskApi;
use crate::libs::{
    form::TaskForm,
    list::TaskList,
    messages::Message,
    store::TaskStore,
    task::Priority,
    view::View,
};
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    #[arg(required = true)]
    title: String,

    /// Longer description
    #[arg(short, long, default_value = "")]
    description: String,

    /// low, medium or high
    #[arg(short, long, default_value = "medium", value_parser = parse_priority)]
    priority: Priority,

    /// Deadline as RFC 3339, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD`
    #[arg(long)]
    deadline: Option<String>,
}

pub async fn cmd(store: &TaskStore<TaskApi>, args: AddArgs) -> Result<()> {
    let mut form = TaskForm {
        title: args.title,
        description: args.description,
        priority: args.priority,
        deadline: args.deadline.unwrap_or_default(),
    };
    let task = match form.submit(Utc::now()) {
        Ok(task) => task,
        Err(reason) => msg_bail_anyhow!(Message::CommandFailed(reason)),
    };

    load(store).await;
    let outcome = store.create(task).await;
    report(store, outcome)?;

    View::render(&store.tasks(), &TaskList::new(), &store.view());
    Ok(())
}

pub(crate) fn parse_priority(value: &str) -> Result<Priority, String> {
    value.parse().map_err(|e: String| Message::InvalidPriority(e).to_string())
}
