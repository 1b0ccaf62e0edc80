use tracing::debug;

use super::Database;
use super::workspaces::stored_color;
use crate::error::{Error, Result};
use crate::models::Project;

impl Database {
    pub async fn create_project(&self, workspace_id: i64, name: &str) -> Result<Project> {
        let result = sqlx::query("INSERT INTO projects (workspace_id, name) VALUES (?, ?)")
            .bind(workspace_id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, workspace_id, name, "created project");
        self.get_project(id).await
    }

    pub async fn get_project(&self, id: i64) -> Result<Project> {
        sqlx::query_as::<_, Project>(
            "SELECT id, workspace_id, name, color, created_at FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("project", id))
    }

    /// First project in the workspace with exactly this name.
    pub async fn get_project_by_name(&self, workspace_id: i64, name: &str) -> Result<Project> {
        sqlx::query_as::<_, Project>(
            "SELECT id, workspace_id, name, color, created_at FROM projects
             WHERE workspace_id = ? AND name = ? ORDER BY id LIMIT 1",
        )
        .bind(workspace_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("project", format!("{name:?}")))
    }

    pub async fn list_projects(&self, workspace_id: i64) -> Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, Project>(
            "SELECT id, workspace_id, name, color, created_at FROM projects
             WHERE workspace_id = ? ORDER BY name, id",
        )
        .bind(workspace_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_project(&self, id: i64, name: &str) -> Result<Project> {
        let result = sqlx::query("UPDATE projects SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("project", id));
        }
        debug!(id, name, "renamed project");
        self.get_project(id).await
    }

    /// Sets the display color; empty input clears it.
    pub async fn set_project_color(&self, id: i64, color: &str) -> Result<Project> {
        let value = stored_color(color);
        let result = sqlx::query("UPDATE projects SET color = ? WHERE id = ?")
            .bind(&value)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("project", id));
        }
        debug!(id, color = ?value, "set project color");
        self.get_project(id).await
    }

    /// Moves the project's tasks to the default list, then deletes the
    /// project. The two statements are not wrapped in a transaction.
    pub async fn delete_project(&self, id: i64) -> Result<()> {
        let moved = sqlx::query("UPDATE tasks SET project_id = NULL WHERE project_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("project", id));
        }
        debug!(id, moved, "deleted project");
        Ok(())
    }
}
