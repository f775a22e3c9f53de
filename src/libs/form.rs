//! Draft state of the "new task" form.

use super::task::{timestamp, NewTask, Priority};
use chrono::{DateTime, Utc};

/// Local input fields; nothing here is part of the domain model until submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Raw deadline input; empty means no deadline.
    pub deadline: String,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the create payload and resets the draft.
    ///
    /// The draft is kept untouched when validation fails, so the user can fix it.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<NewTask, String> {
        let deadline = self.parse_deadline()?;
        let mut task = NewTask::new(&self.title)
            .with_description(&self.description)
            .with_priority(self.priority)
            .with_deadline(deadline);
        task.created_at = Some(now);
        task.validate()?;

        *self = Self::default();
        Ok(task)
    }

    fn parse_deadline(&self) -> Result<Option<DateTime<Utc>>, String> {
        let raw = self.deadline.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        timestamp::parse(raw)
            .map(Some)
            .ok_or_else(|| format!("Invalid deadline format '{}'", raw))
    }
}
