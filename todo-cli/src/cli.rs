use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use todo_core::{Priority, Status};

#[derive(Debug, Parser)]
#[command(name = "todo", version)]
#[command(about = "Todo tracker with workspaces and projects")]
#[command(
    long_about = "Track tasks in workspaces (personal, work, daily, ...) and optional projects/lists. \
                  Data is stored locally in SQLite. Run without arguments for the interactive interface."
)]
pub struct Cli {
    /// Path to the SQLite database (default: platform data dir/todo/data/todo.db)
    #[arg(long, global = true, value_name = "PATH", env = "TODO_DB")]
    pub db: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage workspaces
    #[command(subcommand)]
    Workspace(WorkspaceCommand),
    /// Manage projects/lists within a workspace
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),
}

#[derive(Debug, Args)]
pub struct WorkspaceScope {
    /// Workspace name
    #[arg(short, long, value_name = "NAME")]
    pub workspace: String,
}

#[derive(Debug, Args)]
pub struct ListScope {
    /// Workspace name
    #[arg(short, long, value_name = "NAME")]
    pub workspace: String,

    /// Project/list name (default list if omitted)
    #[arg(short, long, value_name = "NAME")]
    pub project: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum WorkspaceCommand {
    /// Create a workspace
    Create { name: String },
    /// List all workspaces
    List,
    /// Delete a workspace and all its projects and tasks
    Delete { name: String },
    /// Rename a workspace
    Rename { name: String, new_name: String },
    /// Set a workspace color (name or #rrggbb); omit to clear
    Color { name: String, color: Option<String> },
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a project in a workspace
    Create {
        name: String,
        #[command(flatten)]
        scope: WorkspaceScope,
    },
    /// List projects in a workspace
    List {
        #[command(flatten)]
        scope: WorkspaceScope,
    },
    /// Delete a project (its tasks move to the default list)
    Delete {
        name: String,
        #[command(flatten)]
        scope: WorkspaceScope,
    },
    /// Rename a project
    Rename {
        name: String,
        new_name: String,
        #[command(flatten)]
        scope: WorkspaceScope,
    },
    /// Set a project color (name or #rrggbb); omit to clear
    Color {
        name: String,
        color: Option<String>,
        #[command(flatten)]
        scope: WorkspaceScope,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Create a task in the default list or in --project
    Create {
        title: String,
        #[command(flatten)]
        scope: ListScope,
        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Status: todo, in_progress, done
        #[arg(short, long, default_value = "todo")]
        status: Status,
        /// Priority: low, medium, high
        #[arg(long)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due: Option<String>,
    },
    /// List tasks of the default list or of --project
    List {
        #[command(flatten)]
        scope: ListScope,
        /// List every task in the workspace, grouped by list
        #[arg(long, conflicts_with = "project")]
        all: bool,
    },
    /// Edit a task; only the given fields change
    Edit {
        id: i64,
        #[command(flatten)]
        scope: WorkspaceScope,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New status: todo, in_progress, done
        #[arg(long)]
        status: Option<Status>,
        /// New priority: low, medium, high
        #[arg(long, conflicts_with = "clear_priority")]
        priority: Option<Priority>,
        /// Remove the priority
        #[arg(long)]
        clear_priority: bool,
        /// New due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE", conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Delete a task
    Delete {
        id: i64,
        #[command(flatten)]
        scope: WorkspaceScope,
    },
    /// Move a task to --to, or to the default list
    Move {
        id: i64,
        #[command(flatten)]
        scope: WorkspaceScope,
        /// Destination project/list name
        #[arg(long, value_name = "NAME")]
        to: Option<String>,
    },
}
