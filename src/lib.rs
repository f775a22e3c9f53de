//! # TaskLion - task service client
//!
//! A command-line client for the TaskLion task service: list, create, update
//! and delete tasks, and run the server's importance optimization.
//!
//! ## Features
//!
//! - **Task Service Client**: typed HTTP client for the `/tasks` resource
//! - **Task Store**: write-then-refetch synchronization with stale-response protection
//! - **View State**: reducer-driven theme, drawer and notification flags
//! - **Terminal Views**: task tables, detail panels and summaries
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklion::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
