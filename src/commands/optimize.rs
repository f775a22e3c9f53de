use super::{load, report};
use crate::api::TaskApi;
use crate::libs::{list::TaskList, store::TaskStore, view::View};
use anyhow::Result;

pub async fn cmd(store: &TaskStore<TaskApi>) -> Result<()> {
    load(store).await;
    let outcome = store.optimize().await;
    report(store, outcome)?;

    View::render(&store.tasks(), &TaskList::new(), &store.view());
    Ok(())
}
