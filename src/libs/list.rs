//! Ephemeral state of the task list and the intents it emits.

use super::task::{Task, TaskPatch};

/// The only state the list keeps is which task's detail panel is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    expanded: Option<i64>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded(&self) -> Option<i64> {
        self.expanded
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded == Some(id)
    }

    /// Opens the panel of `id`, or closes it when it is already open.
    pub fn toggle_expanded(&mut self, id: i64) {
        self.expanded = match self.expanded {
            Some(current) if current == id => None,
            _ => Some(id),
        };
    }

    /// Forgets the expansion once the task is gone from the collection.
    pub fn sync(&mut self, tasks: &[Task]) {
        if let Some(id) = self.expanded {
            if !tasks.iter().any(|task| task.id == id) {
                self.expanded = None;
            }
        }
    }

    /// Update intent that flips `completed` and nothing else.
    pub fn toggle_complete(task: &Task) -> (i64, TaskPatch) {
        (task.id, TaskPatch::completed(!task.completed))
    }
}
