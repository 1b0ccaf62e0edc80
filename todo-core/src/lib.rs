//! Storage and domain types for the todo tracker.
//!
//! Workspaces hold projects, projects hold tasks, and tasks without a
//! project sit in the workspace's default list.

pub mod color;
pub mod config;
mod db;
mod due;
mod error;
mod models;

pub use config::Config;
pub use db::Database;
pub use due::parse_due;
pub use error::{Error, Result};
pub use models::{Priority, Project, Status, Task, TaskFields, Workspace};
