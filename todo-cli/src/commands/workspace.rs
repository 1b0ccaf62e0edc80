use std::io::Write;

use anyhow::Result;
use todo_core::Database;

use super::find_workspace;
use crate::cli::WorkspaceCommand;

pub async fn run<W: Write>(command: WorkspaceCommand, db: &Database, out: &mut W) -> Result<()> {
    match command {
        WorkspaceCommand::Create { name } => {
            let workspace = db.create_workspace(&name).await?;
            writeln!(
                out,
                "Created workspace {:?} (id {})",
                workspace.name, workspace.id
            )?;
        }
        WorkspaceCommand::List => {
            let workspaces = db.list_workspaces().await?;
            if workspaces.is_empty() {
                writeln!(
                    out,
                    "No workspaces. Create one with: todo workspace create <name>"
                )?;
            }
            for workspace in workspaces {
                match workspace.color {
                    Some(color) => {
                        writeln!(out, "  {}  {}  ({color})", workspace.id, workspace.name)?
                    }
                    None => writeln!(out, "  {}  {}", workspace.id, workspace.name)?,
                }
            }
        }
        WorkspaceCommand::Delete { name } => {
            let workspace = find_workspace(db, &name).await?;
            db.delete_workspace(workspace.id).await?;
            writeln!(out, "Deleted workspace {:?}", workspace.name)?;
        }
        WorkspaceCommand::Rename { name, new_name } => {
            let workspace = find_workspace(db, &name).await?;
            let workspace = db.update_workspace(workspace.id, &new_name).await?;
            writeln!(out, "Renamed workspace {name:?} to {:?}", workspace.name)?;
        }
        WorkspaceCommand::Color { name, color } => {
            let workspace = find_workspace(db, &name).await?;
            let workspace = db
                .set_workspace_color(workspace.id, color.as_deref().unwrap_or_default())
                .await?;
            match workspace.color {
                Some(color) => writeln!(out, "Workspace {name:?} color set to {color}")?,
                None => writeln!(out, "Workspace {name:?} color cleared")?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::exec;
    use todo_core::Database;

    #[tokio::test]
    async fn create_list_delete() {
        let db = Database::open_in_memory().await.unwrap();
        assert_eq!(
            exec(&db, &["workspace", "list"]).await.unwrap(),
            "No workspaces. Create one with: todo workspace create <name>\n"
        );

        let created = exec(&db, &["workspace", "create", "Work"]).await.unwrap();
        assert_eq!(created, "Created workspace \"Work\" (id 1)\n");
        assert_eq!(
            exec(&db, &["workspace", "list"]).await.unwrap(),
            "  1  Work\n"
        );

        exec(&db, &["workspace", "delete", "Work"]).await.unwrap();
        assert!(db.list_workspaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn color_set_and_clear() {
        let db = Database::open_in_memory().await.unwrap();
        exec(&db, &["workspace", "create", "Work"]).await.unwrap();

        let out = exec(&db, &["workspace", "color", "Work", "blue"])
            .await
            .unwrap();
        assert_eq!(out, "Workspace \"Work\" color set to #0000ff\n");

        exec(&db, &["workspace", "color", "Work"]).await.unwrap();
        let ws = db.get_workspace_by_name("Work").await.unwrap();
        assert_eq!(ws.color, None);
    }

    #[tokio::test]
    async fn rename() {
        let db = Database::open_in_memory().await.unwrap();
        exec(&db, &["workspace", "create", "Wrok"]).await.unwrap();
        exec(&db, &["workspace", "rename", "Wrok", "Work"])
            .await
            .unwrap();
        assert!(db.get_workspace_by_name("Work").await.is_ok());
    }
}
