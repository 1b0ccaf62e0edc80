use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use todo_core::{Database, Task, TaskFields, parse_due};

use super::{find_optional_project, find_task, find_workspace};
use crate::cli::TaskCommand;

pub async fn run<W: Write>(command: TaskCommand, db: &Database, out: &mut W) -> Result<()> {
    match command {
        TaskCommand::Create {
            title,
            scope,
            description,
            status,
            priority,
            due,
        } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let project = find_optional_project(db, &workspace, scope.project.as_deref()).await?;
            let fields = TaskFields {
                title,
                description,
                status,
                priority,
                due_date: match due {
                    Some(due) => parse_due(&due)?,
                    None => None,
                },
            };
            let task = db
                .create_task(workspace.id, project.map(|p| p.id), &fields)
                .await?;
            writeln!(out, "Created task {:?} (id {})", task.title, task.id)?;
        }
        TaskCommand::List { scope, all } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            if all {
                let tasks = db.list_all_tasks(workspace.id).await?;
                if tasks.is_empty() {
                    writeln!(out, "No tasks.")?;
                    return Ok(());
                }
                let names: BTreeMap<i64, String> = db
                    .list_projects(workspace.id)
                    .await?
                    .into_iter()
                    .map(|p| (p.id, p.name))
                    .collect();

                let mut current = None;
                for task in &tasks {
                    if current != Some(task.project_id) {
                        current = Some(task.project_id);
                        let list = task
                            .project_id
                            .and_then(|id| names.get(&id))
                            .map_or("Default", String::as_str);
                        writeln!(out, "{list}:")?;
                    }
                    write_task(out, task)?;
                }
            } else {
                let project =
                    find_optional_project(db, &workspace, scope.project.as_deref()).await?;
                let tasks = db
                    .list_tasks(workspace.id, project.map(|p| p.id))
                    .await?;
                if tasks.is_empty() {
                    writeln!(out, "No tasks.")?;
                }
                for task in &tasks {
                    write_task(out, task)?;
                }
            }
        }
        TaskCommand::Edit {
            id,
            scope,
            title,
            description,
            status,
            priority,
            clear_priority,
            due,
            clear_due,
        } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let task = find_task(db, &workspace, id).await?;

            let mut fields = TaskFields::from(&task);
            if let Some(title) = title {
                fields.title = title;
            }
            if let Some(description) = description {
                fields.description = description;
            }
            if let Some(status) = status {
                fields.status = status;
            }
            if clear_priority {
                fields.priority = None;
            } else if priority.is_some() {
                fields.priority = priority;
            }
            if clear_due {
                fields.due_date = None;
            } else if let Some(due) = due {
                fields.due_date = parse_due(&due)?;
            }

            let task = db.update_task(task.id, &fields).await?;
            writeln!(out, "Updated task {}", task.id)?;
        }
        TaskCommand::Delete { id, scope } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let task = find_task(db, &workspace, id).await?;
            db.delete_task(task.id).await?;
            writeln!(out, "Deleted task {}", task.id)?;
        }
        TaskCommand::Move { id, scope, to } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let task = find_task(db, &workspace, id).await?;
            let project = find_optional_project(db, &workspace, to.as_deref()).await?;
            let list = project.as_ref().map_or("Default", |p| p.name.as_str());
            db.set_task_project(task.id, project.as_ref().map(|p| p.id))
                .await?;
            writeln!(out, "Moved task {} to {list}", task.id)?;
        }
    }
    Ok(())
}

fn write_task<W: Write>(out: &mut W, task: &Task) -> std::io::Result<()> {
    write!(out, "  {}  [{}]", task.id, task.status)?;
    if let Some(priority) = task.priority {
        write!(out, " [{priority}]")?;
    }
    write!(out, "  {}", task.title)?;
    if let Some(due) = task.due_date {
        write!(out, " due:{}", due.format("%Y-%m-%d"))?;
    }
    writeln!(out)
}
