use std::io::Write;

use anyhow::Result;
use todo_core::Database;

use super::{find_project, find_workspace};
use crate::cli::ProjectCommand;

pub async fn run<W: Write>(command: ProjectCommand, db: &Database, out: &mut W) -> Result<()> {
    match command {
        ProjectCommand::Create { name, scope } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let project = db.create_project(workspace.id, &name).await?;
            writeln!(
                out,
                "Created project {:?} in {} (id {})",
                project.name, workspace.name, project.id
            )?;
        }
        ProjectCommand::List { scope } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let projects = db.list_projects(workspace.id).await?;
            if projects.is_empty() {
                writeln!(
                    out,
                    "No projects in {:?}. Tasks without a project go to the default list.",
                    workspace.name
                )?;
            }
            for project in projects {
                match project.color {
                    Some(color) => {
                        writeln!(out, "  {}  {}  ({color})", project.id, project.name)?
                    }
                    None => writeln!(out, "  {}  {}", project.id, project.name)?,
                }
            }
        }
        ProjectCommand::Delete { name, scope } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let project = find_project(db, &workspace, &name).await?;
            db.delete_project(project.id).await?;
            writeln!(out, "Deleted project {:?}", project.name)?;
        }
        ProjectCommand::Rename {
            name,
            new_name,
            scope,
        } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let project = find_project(db, &workspace, &name).await?;
            let project = db.update_project(project.id, &new_name).await?;
            writeln!(out, "Renamed project {name:?} to {:?}", project.name)?;
        }
        ProjectCommand::Color { name, color, scope } => {
            let workspace = find_workspace(db, &scope.workspace).await?;
            let project = find_project(db, &workspace, &name).await?;
            let project = db
                .set_project_color(project.id, color.as_deref().unwrap_or_default())
                .await?;
            match project.color {
                Some(color) => writeln!(out, "Project {name:?} color set to {color}")?,
                None => writeln!(out, "Project {name:?} color cleared")?,
            }
        }
    }
    Ok(())
}
