//! In-memory task service used by the store tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use tasklion::api::{ApiError, TaskService};
use tasklion::libs::error::Operation;
use tasklion::libs::task::{NewTask, Priority, Task, TaskPatch};
use tokio::sync::oneshot;

pub fn server_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
}

/// A stored task with no scoring fields.
pub fn task(id: i64, title: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: String::new(),
        priority: Priority::Medium,
        deadline: None,
        completed: false,
        created_at: server_time(),
        importance_score: None,
        importance_explanation: None,
        importance_category: None,
        insights: None,
        analysis_time: None,
    }
}

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
    failures: HashMap<Operation, usize>,
    calls: Vec<Operation>,
    gates: VecDeque<oneshot::Receiver<()>>,
}

#[derive(Default)]
pub struct MockTaskService {
    inner: Mutex<Inner>,
}

impl MockTaskService {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner {
                tasks,
                next_id,
                ..Inner::default()
            }),
        }
    }

    /// Makes the next call of `operation` fail with a 500.
    pub fn fail_next(&self, operation: Operation) {
        *self.inner.lock().failures.entry(operation).or_default() += 1;
    }

    /// Holds the next `list` response until the returned sender fires.
    ///
    /// The collection is captured when the call starts, not when it is released.
    pub fn gate_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().gates.push_back(rx);
        tx
    }

    pub fn server_tasks(&self) -> Vec<Task> {
        self.inner.lock().tasks.clone()
    }

    /// Changes the server side directly, bypassing the client.
    pub fn edit_server(&self, edit: impl FnOnce(&mut Vec<Task>)) {
        edit(&mut self.inner.lock().tasks);
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.inner.lock().calls.clone()
    }

    fn enter(&self, operation: Operation) -> Result<(), ApiError> {
        let mut inner = self.inner.lock();
        inner.calls.push(operation);
        match inner.failures.get_mut(&operation) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Err(ApiError::Status {
                    status: 500,
                    message: "injected failure".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl TaskService for MockTaskService {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        self.enter(Operation::List)?;
        let (tasks, gate) = {
            let mut inner = self.inner.lock();
            (inner.tasks.clone(), inner.gates.pop_front())
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(tasks)
    }

    async fn create(&self, new_task: &NewTask) -> Result<Task, ApiError> {
        self.enter(Operation::Create)?;
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        let created = Task {
            title: new_task.title.clone(),
            description: new_task.description.clone(),
            priority: new_task.priority,
            deadline: new_task.deadline,
            completed: new_task.completed,
            ..task(id, "")
        };
        inner.tasks.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.enter(Operation::Update)?;
        let mut inner = self.inner.lock();
        let task = inner
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(ApiError::NotFound { id })?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(deadline) = patch.deadline {
            task.deadline = deadline;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        Ok(task.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.enter(Operation::Delete)?;
        let mut inner = self.inner.lock();
        let before = inner.tasks.len();
        inner.tasks.retain(|task| task.id != id);
        if inner.tasks.len() == before {
            return Err(ApiError::NotFound { id });
        }
        Ok(())
    }

    /// Scores pending tasks by position and sorts them by score.
    async fn optimize(&self) -> Result<Vec<Task>, ApiError> {
        self.enter(Operation::Optimize)?;
        let mut inner = self.inner.lock();
        let pending = inner.tasks.iter().filter(|task| !task.completed).count().max(1) as f64;
        let mut rank = 0.0;
        for task in inner.tasks.iter_mut().filter(|task| !task.completed) {
            let score = 1.0 - rank / pending;
            rank += 1.0;
            task.importance_score = Some(score);
            task.importance_explanation = Some(format!("'{}' scored {:.2}", task.title, score));
            task.insights = Some(vec!["Due soon".to_string()]);
            task.analysis_time = Some(server_time());
        }
        inner.tasks.sort_by(|a, b| {
            b.importance_score
                .unwrap_or(-1.0)
                .partial_cmp(&a.importance_score.unwrap_or(-1.0))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(inner.tasks.iter().filter(|task| !task.completed).cloned().collect())
    }
}
