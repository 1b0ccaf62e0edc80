//! SQLite persistence for workspaces, projects and tasks.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{Error, Result};

mod projects;
mod tasks;
mod workspaces;

const SCHEMA: &str = include_str!("../../migrations/schema.sql");

/// Columns added after the first release. Re-running them on an upgraded
/// database fails with "duplicate column", which is expected.
const UPGRADES: &[&str] = &[
    "ALTER TABLE workspaces ADD COLUMN color TEXT",
    "ALTER TABLE projects ADD COLUMN color TEXT",
];

const MEMORY: &str = ":memory:";

pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Opens (creating if needed) the database file at `path` and migrates it.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|err| Error::io(&path, err))?;

        let db = Database { pool, path };
        db.migrate().await.map_err(|err| match err {
            Error::Storage(source) => Error::io(&db.path, source),
            other => other,
        })?;

        info!(path = %db.path.display(), "database ready");
        Ok(db)
    }

    /// A private in-memory database, mostly for tests.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // every pooled connection would get its own empty database, so keep
        // exactly one alive for the lifetime of the pool
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Database {
            pool,
            path: PathBuf::from(MEMORY),
        };
        db.migrate().await?;
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies the base schema and the additive column upgrades. Safe to run
    /// any number of times.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;

        for statement in UPGRADES {
            match sqlx::query(statement).execute(&self.pool).await {
                Ok(_) => debug!(statement, "schema upgrade applied"),
                Err(err) if is_duplicate_column(&err) => {
                    debug!(statement, "schema upgrade already applied")
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}

fn is_duplicate_column(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.message().contains("duplicate column"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let db = Database::open_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();

        let ws = db.create_workspace("Home").await.unwrap();
        db.set_workspace_color(ws.id, "red").await.unwrap();
        assert_eq!(
            db.get_workspace(ws.id).await.unwrap().color.as_deref(),
            Some("#ff0000")
        );
    }

    #[tokio::test]
    async fn open_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("todo.db");

        let db = Database::open(&path).await.unwrap();
        assert_eq!(db.path(), path.as_path());
        db.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn open_fails_with_io_error_for_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = Database::open(blocker.join("todo.db")).await.err().unwrap();
        assert!(matches!(err, Error::Io { .. }), "{err:?}");
    }
}
