//! One-shot subcommands over the storage layer.

use std::io::Write;

use anyhow::{Context, Result};
use todo_core::{Database, Error, Project, Task, Workspace};

use crate::cli::Command;

mod project;
mod task;
mod workspace;

pub async fn run<W: Write>(command: Command, db: &Database, out: &mut W) -> Result<()> {
    match command {
        Command::Workspace(cmd) => workspace::run(cmd, db, out).await,
        Command::Project(cmd) => project::run(cmd, db, out).await,
        Command::Task(cmd) => task::run(cmd, db, out).await,
    }
}

async fn find_workspace(db: &Database, name: &str) -> Result<Workspace> {
    db.get_workspace_by_name(name)
        .await
        .with_context(|| format!("workspace {name:?}"))
}

async fn find_project(db: &Database, workspace: &Workspace, name: &str) -> Result<Project> {
    db.get_project_by_name(workspace.id, name)
        .await
        .with_context(|| format!("project {name:?} in workspace {:?}", workspace.name))
}

async fn find_optional_project(
    db: &Database,
    workspace: &Workspace,
    name: Option<&str>,
) -> Result<Option<Project>> {
    match name {
        Some(name) => find_project(db, workspace, name).await.map(Some),
        None => Ok(None),
    }
}

/// Loads a task and checks that it belongs to the workspace.
async fn find_task(db: &Database, workspace: &Workspace, id: i64) -> Result<Task> {
    let not_found = || Error::NotFound {
        entity: "task",
        key: id.to_string(),
    };
    let task = match db.get_task(id).await {
        Ok(task) if task.workspace_id == workspace.id => task,
        Ok(_) => Err(not_found())?,
        Err(err) if err.is_not_found() => Err(not_found())?,
        Err(err) => Err(err)?,
    };
    Ok(task)
}
