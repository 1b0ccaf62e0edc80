use tracing::debug;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{Task, TaskFields};

const TASK_COLUMNS: &str = "id, workspace_id, project_id, title, description, status, priority, due_date, created_at, updated_at";

impl Database {
    /// Creates a task in `workspace_id`, in `project_id` or the default list.
    pub async fn create_task(
        &self,
        workspace_id: i64,
        project_id: Option<i64>,
        fields: &TaskFields,
    ) -> Result<Task> {
        if let Some(project_id) = project_id {
            self.check_project_scope(workspace_id, project_id).await?;
        }

        let result = sqlx::query(
            "INSERT INTO tasks (workspace_id, project_id, title, description, status, priority, due_date)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(workspace_id)
        .bind(project_id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.status)
        .bind(fields.priority)
        .bind(fields.due_date)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, workspace_id, ?project_id, title = %fields.title, "created task");
        self.get_task(id).await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?");
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::not_found("task", id))
    }

    /// Tasks of exactly one list: the given project, or the default list
    /// when `project_id` is `None`. Oldest first.
    pub async fn list_tasks(
        &self,
        workspace_id: i64,
        project_id: Option<i64>,
    ) -> Result<Vec<Task>> {
        // `IS` compares NULL to NULL as equal
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE workspace_id = ? AND project_id IS ?
             ORDER BY created_at, id"
        );
        let rows = sqlx::query_as::<_, Task>(&sql)
            .bind(workspace_id)
            .bind(project_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Every task in the workspace, default list first, then by project.
    pub async fn list_all_tasks(&self, workspace_id: i64) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE workspace_id = ?
             ORDER BY project_id, created_at, id"
        );
        let rows = sqlx::query_as::<_, Task>(&sql)
            .bind(workspace_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Overwrites every mutable field and refreshes `updated_at`.
    pub async fn update_task(&self, id: i64, fields: &TaskFields) -> Result<Task> {
        let result = sqlx::query(
            "UPDATE tasks
             SET title = ?, description = ?, status = ?, priority = ?, due_date = ?,
                 updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
             WHERE id = ?",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.status)
        .bind(fields.priority)
        .bind(fields.due_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("task", id));
        }
        debug!(id, status = %fields.status, "updated task");
        self.get_task(id).await
    }

    /// Moves a task to another list of its workspace.
    pub async fn set_task_project(&self, id: i64, project_id: Option<i64>) -> Result<Task> {
        let task = self.get_task(id).await?;
        if let Some(project_id) = project_id {
            self.check_project_scope(task.workspace_id, project_id)
                .await?;
        }

        sqlx::query(
            "UPDATE tasks SET project_id = ?, updated_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
             WHERE id = ?",
        )
        .bind(project_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        debug!(id, ?project_id, "moved task");
        self.get_task(id).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("task", id));
        }
        debug!(id, "deleted task");
        Ok(())
    }

    async fn check_project_scope(&self, workspace_id: i64, project_id: i64) -> Result<()> {
        let project = self.get_project(project_id).await?;
        if project.workspace_id != workspace_id {
            return Err(Error::invalid("project", &project.name));
        }
        Ok(())
    }
}
