//! Task store: the client's authoritative copy of the task collection.
//!
//! The store holds the last fetched collection together with the status
//! flags the views read (loading, error, [`ViewState`]). It never patches the
//! collection locally. Every mutating intent follows the same cycle:
//!
//! ```text
//! Idle ──▶ Pending ──ok──▶ Refetching ──▶ Idle
//!             │
//!             └──err──▶ Failed ──▶ Idle
//! ```
//!
//! 1. Register the intent, clear the error flag.
//! 2. Call the service.
//! 3. On success reload the whole collection with `list` and replace it.
//! 4. On failure record a [`TaskError`] and notify; the collection is kept as is.
//!
//! ## Concurrency
//!
//! Intents take `&self`, so several of them may be suspended at once on the
//! same task (two quick deletes, a create racing an optimize). Each `list`
//! call draws a sequence number when it is issued; a response is applied only
//! when its number is above the last applied one. Late answers to older
//! fetches are dropped instead of overwriting newer data.
//!
//! The lock is never held across an `.await`.

use super::error::{Operation, TaskError};
use super::messages::Message;
use super::task::{NewTask, Task, TaskPatch};
use super::view_state::{Notification, ViewAction, ViewState};
use crate::api::{ApiError, TaskService};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use tracing::{debug, warn};

/// Where an in-flight intent currently is.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IntentPhase {
    /// Waiting for the service operation itself.
    Pending,
    /// The operation succeeded; waiting for the collection reload.
    Refetching,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PendingIntent {
    pub id: u64,
    pub operation: Operation,
    pub phase: IntentPhase,
}

/// Result of running an intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The store now shows the collection fetched by this intent.
    Synced,
    /// The work went through, but a newer fetch had already been applied.
    Superseded,
    /// Nothing changed locally; the error flag is set.
    Failed(TaskError),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }

    pub fn error(&self) -> Option<&TaskError> {
        match self {
            Outcome::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Serializable picture of everything the views read.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
    pub view: ViewState,
    pub pending: Vec<PendingIntent>,
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: Vec<Task>,
    error: Option<TaskError>,
    view: ViewState,
    intents: BTreeMap<u64, PendingIntent>,
    next_intent: u64,
    issued_fetch: u64,
    applied_fetch: u64,
}

pub struct TaskStore<S> {
    service: S,
    state: Mutex<StoreState>,
}

impl<S: TaskService> TaskStore<S> {
    pub fn new(service: S) -> Self {
        Self::with_view(service, ViewState::default())
    }

    pub fn with_view(service: S, view: ViewState) -> Self {
        Self {
            service,
            state: Mutex::new(StoreState {
                view,
                ..StoreState::default()
            }),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().tasks.clone()
    }

    pub fn task(&self, id: i64) -> Option<Task> {
        self.state.lock().tasks.iter().find(|task| task.id == id).cloned()
    }

    /// True while at least one intent is in flight.
    pub fn loading(&self) -> bool {
        !self.state.lock().intents.is_empty()
    }

    pub fn error(&self) -> Option<TaskError> {
        self.state.lock().error.clone()
    }

    pub fn view(&self) -> ViewState {
        self.state.lock().view.clone()
    }

    pub fn pending_intents(&self) -> Vec<PendingIntent> {
        self.state.lock().intents.values().cloned().collect()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.lock();
        StoreSnapshot {
            tasks: state.tasks.clone(),
            loading: !state.intents.is_empty(),
            error: state.error.as_ref().map(ToString::to_string),
            view: state.view.clone(),
            pending: state.intents.values().cloned().collect(),
        }
    }

    /// Applies a UI action to the view state.
    pub fn dispatch(&self, action: ViewAction) {
        let mut state = self.state.lock();
        state.view = std::mem::take(&mut state.view).reduce(action);
    }

    /// Loads the collection; the initial fetch of a fresh store.
    /// True once a task list has been applied.
    pub fn synced(&self) -> bool {
        self.state.lock().applied_fetch > 0
    }

    pub async fn refresh(&self) -> Outcome {
        let intent = self.begin(Operation::List);
        let outcome = self.fetch(Operation::List).await;
        self.finish(intent);
        outcome
    }

    pub async fn create(&self, task: NewTask) -> Outcome {
        if let Err(reason) = task.validate() {
            return self.reject(TaskError::InvalidTask(reason));
        }
        self.mutate(Operation::Create, self.service.create(&task)).await
    }

    pub async fn update(&self, id: i64, patch: TaskPatch) -> Outcome {
        if let Err(reason) = patch.validate() {
            return self.reject(TaskError::InvalidTask(reason));
        }
        self.mutate(Operation::Update, self.service.update(id, &patch)).await
    }

    /// Flips `completed` of a task from the current snapshot.
    ///
    /// A store that never loaded a snapshot fetches one first; if that fails
    /// the fetch error is returned instead of a misleading `NotFound`.
    pub async fn toggle_completed(&self, id: i64) -> Outcome {
        if !self.synced() {
            if let Outcome::Failed(error) = self.refresh().await {
                return Outcome::Failed(error);
            }
        }
        match self.task(id) {
            Some(task) => self.update(id, TaskPatch::completed(!task.completed)).await,
            None => self.reject(TaskError::NotFound { id }),
        }
    }

    pub async fn delete(&self, id: i64) -> Outcome {
        self.mutate(Operation::Delete, self.service.delete(id)).await
    }

    pub async fn optimize(&self) -> Outcome {
        self.mutate(Operation::Optimize, self.service.optimize()).await
    }

    async fn mutate<T>(&self, operation: Operation, call: impl Future<Output = Result<T, ApiError>>) -> Outcome {
        let intent = self.begin(operation);
        let outcome = match call.await {
            Ok(_) => {
                self.set_phase(intent, IntentPhase::Refetching);
                let outcome = self.fetch(operation).await;
                if outcome.is_ok() {
                    self.notify(Notification::success(success_message(operation).to_string()));
                }
                outcome
            }
            Err(error) => {
                let error = TaskError::from_api(operation, error);
                self.fail(error.clone());
                Outcome::Failed(error)
            }
        };
        self.finish(intent);
        outcome
    }

    /// Issues a `list` and applies it unless a newer one got there first.
    async fn fetch(&self, operation: Operation) -> Outcome {
        let seq = {
            let mut state = self.state.lock();
            state.issued_fetch += 1;
            state.issued_fetch
        };

        match self.service.list().await {
            Ok(tasks) => {
                let mut state = self.state.lock();
                if seq <= state.applied_fetch {
                    warn!(seq, applied = state.applied_fetch, %operation, "discarding superseded task list");
                    return Outcome::Superseded;
                }
                debug!(seq, count = tasks.len(), %operation, "applying task list");
                state.applied_fetch = seq;
                state.tasks = tasks.into_iter().map(Task::normalized).collect();
                Outcome::Synced
            }
            Err(error) => {
                let error = TaskError::refetch(operation, error);
                self.fail(error.clone());
                Outcome::Failed(error)
            }
        }
    }

    fn begin(&self, operation: Operation) -> u64 {
        let mut state = self.state.lock();
        state.next_intent += 1;
        let id = state.next_intent;
        state.intents.insert(
            id,
            PendingIntent {
                id,
                operation,
                phase: IntentPhase::Pending,
            },
        );
        state.error = None;
        debug!(intent = id, %operation, "intent started");
        id
    }

    fn set_phase(&self, intent: u64, phase: IntentPhase) {
        if let Some(pending) = self.state.lock().intents.get_mut(&intent) {
            pending.phase = phase;
        }
    }

    fn finish(&self, intent: u64) {
        self.state.lock().intents.remove(&intent);
        debug!(intent, "intent settled");
    }

    fn fail(&self, error: TaskError) {
        warn!(%error, "intent failed");
        let mut state = self.state.lock();
        state.view = std::mem::take(&mut state.view).reduce(ViewAction::Notify(Notification::error(error.to_string())));
        state.error = Some(error);
    }

    /// Fails an intent that never reached the service.
    fn reject(&self, error: TaskError) -> Outcome {
        self.fail(error.clone());
        Outcome::Failed(error)
    }

    fn notify(&self, notification: Notification) {
        self.dispatch(ViewAction::Notify(notification));
    }
}

fn success_message(operation: Operation) -> Message {
    match operation {
        Operation::List => Message::TasksLoaded,
        Operation::Create => Message::TaskCreated,
        Operation::Update => Message::TaskUpdated,
        Operation::Delete => Message::TaskDeleted,
        Operation::Optimize => Message::TasksOptimized,
    }
}
