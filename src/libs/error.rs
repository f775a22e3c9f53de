//! Store-level error taxonomy.
//!
//! Every failure of the task service is collapsed into one variant per
//! operation kind, except `NotFound` which is kept for by-id operations. The
//! store keeps the last `TaskError` as its error flag and shows its text in a
//! notification, so the type is `Clone` and carries only strings.

use crate::api::ApiError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Kind of operation an intent performs against the service.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    Optimize,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Optimize => "optimize",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskError {
    #[error("Failed to fetch tasks: {detail}")]
    FetchFailed { detail: String },

    #[error("Failed to create task: {detail}")]
    CreateFailed { detail: String },

    #[error("Failed to update task: {detail}")]
    UpdateFailed { detail: String },

    #[error("Failed to delete task: {detail}")]
    DeleteFailed { detail: String },

    #[error("Failed to optimize tasks: {detail}")]
    OptimizeFailed { detail: String },

    #[error("Task {id} not found")]
    NotFound { id: i64 },

    /// The mutation went through but reloading the collection did not.
    #[error("The {operation} succeeded, but reloading tasks failed: {detail}")]
    RefetchFailed { operation: Operation, detail: String },

    #[error("Invalid task: {0}")]
    InvalidTask(String),
}

impl TaskError {
    /// Collapses a service error into the variant for `operation`.
    pub fn from_api(operation: Operation, error: ApiError) -> Self {
        if let ApiError::NotFound { id } = error {
            if matches!(operation, Operation::Update | Operation::Delete) {
                return TaskError::NotFound { id };
            }
        }
        let detail = error.to_string();
        match operation {
            Operation::List => TaskError::FetchFailed { detail },
            Operation::Create => TaskError::CreateFailed { detail },
            Operation::Update => TaskError::UpdateFailed { detail },
            Operation::Delete => TaskError::DeleteFailed { detail },
            Operation::Optimize => TaskError::OptimizeFailed { detail },
        }
    }

    /// Error for a `list` that followed a successful `operation`.
    pub fn refetch(operation: Operation, error: ApiError) -> Self {
        match operation {
            Operation::List => Self::from_api(Operation::List, error),
            operation => TaskError::RefetchFailed {
                operation,
                detail: error.to_string(),
            },
        }
    }

    /// Operation the error is attributed to, when there is one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            TaskError::FetchFailed { .. } => Some(Operation::List),
            TaskError::CreateFailed { .. } => Some(Operation::Create),
            TaskError::UpdateFailed { .. } => Some(Operation::Update),
            TaskError::DeleteFailed { .. } => Some(Operation::Delete),
            TaskError::OptimizeFailed { .. } => Some(Operation::Optimize),
            TaskError::RefetchFailed { operation, .. } => Some(*operation),
            TaskError::NotFound { .. } | TaskError::InvalidTask(_) => None,
        }
    }
}
