use tracing::debug;

use super::Database;
use crate::color;
use crate::error::{Error, Result};
use crate::models::Workspace;

impl Database {
    pub async fn create_workspace(&self, name: &str) -> Result<Workspace> {
        let result = sqlx::query("INSERT INTO workspaces (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, name, "created workspace");
        self.get_workspace(id).await
    }

    pub async fn get_workspace(&self, id: i64) -> Result<Workspace> {
        sqlx::query_as::<_, Workspace>(
            "SELECT id, name, color, created_at FROM workspaces WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("workspace", id))
    }

    /// First workspace with exactly this name.
    pub async fn get_workspace_by_name(&self, name: &str) -> Result<Workspace> {
        sqlx::query_as::<_, Workspace>(
            "SELECT id, name, color, created_at FROM workspaces WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("workspace", format!("{name:?}")))
    }

    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let rows = sqlx::query_as::<_, Workspace>(
            "SELECT id, name, color, created_at FROM workspaces ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_workspace(&self, id: i64, name: &str) -> Result<Workspace> {
        let result = sqlx::query("UPDATE workspaces SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("workspace", id));
        }
        debug!(id, name, "renamed workspace");
        self.get_workspace(id).await
    }

    /// Sets the display color; empty input clears it.
    pub async fn set_workspace_color(&self, id: i64, color: &str) -> Result<Workspace> {
        let value = stored_color(color);
        let result = sqlx::query("UPDATE workspaces SET color = ? WHERE id = ?")
            .bind(&value)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("workspace", id));
        }
        debug!(id, color = ?value, "set workspace color");
        self.get_workspace(id).await
    }

    /// Deletes the workspace; its projects and tasks go with it.
    pub async fn delete_workspace(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM workspaces WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("workspace", id));
        }
        debug!(id, "deleted workspace");
        Ok(())
    }
}

pub(super) fn stored_color(input: &str) -> Option<String> {
    let normalized = color::normalize(input);
    (!normalized.is_empty()).then_some(normalized)
}
