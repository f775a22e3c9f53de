//! Client side of the task service.
//!
//! The service exposes one collection resource with four CRUD routes and an
//! `optimize` action. [`TaskService`] is the seam the store depends on;
//! [`TaskApi`] is the HTTP implementation used by the binary.
//!
//! ## Contract
//!
//! - Every operation is exactly one request: no retries, no timeout override,
//!   no idempotency key. Duplicate submissions are not deduplicated.
//! - The client never caches. Consistency is the store's job.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklion::api::{TaskApi, TaskService};
//! use tasklion::libs::config::ServerConfig;
//!
//! # async fn run() -> Result<(), tasklion::api::ApiError> {
//! let api = TaskApi::new(&ServerConfig::default());
//! let tasks = api.list().await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::task::{NewTask, Task, TaskPatch};

pub mod error;
pub mod tasks;

pub use error::ApiError;
pub use tasks::TaskApi;

/// Remote task collection.
#[allow(async_fn_in_trait)]
pub trait TaskService {
    /// Fetches the whole collection in server order.
    async fn list(&self) -> Result<Vec<Task>, ApiError>;

    /// Creates a task; the server assigns `id` and `created_at`.
    async fn create(&self, task: &NewTask) -> Result<Task, ApiError>;

    /// Applies a partial update. Fails with [`ApiError::NotFound`] for unknown ids.
    async fn update(&self, id: i64, patch: &TaskPatch) -> Result<Task, ApiError>;

    /// Deletes a task. Fails with [`ApiError::NotFound`] for unknown ids.
    async fn delete(&self, id: i64) -> Result<(), ApiError>;

    /// Runs the server-side optimization over the whole collection.
    ///
    /// What it optimizes for is opaque to the client; the returned tasks are
    /// only informative, the store reloads the collection afterwards anyway.
    async fn optimize(&self) -> Result<Vec<Task>, ApiError>;
}
