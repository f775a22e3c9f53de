//! Core library modules of tasklion.
//!
//! ## Layout
//!
//! - **Domain**: [`task`] (model and wire format), [`error`] (failure taxonomy)
//! - **State**: [`store`] (authoritative collection and intents), [`view_state`]
//!   (UI flags), [`form`] and [`list`] (ephemeral component state)
//! - **Presentation**: [`view`], [`formatter`], [`messages`]
//! - **Infrastructure**: [`config`], [`data_storage`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklion::api::TaskApi;
//! use tasklion::libs::config::Config;
//! use tasklion::libs::store::TaskStore;
//! use tasklion::libs::task::{NewTask, Priority};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let store = TaskStore::new(TaskApi::new(&config.server()));
//! store.refresh().await;
//! store.create(NewTask::new("Write report").with_priority(Priority::High)).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod form;
pub mod formatter;
pub mod list;
pub mod messages;
pub mod store;
pub mod task;
pub mod view;
pub mod view_state;
