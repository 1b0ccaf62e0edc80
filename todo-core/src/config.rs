//! Optional user configuration and database location.
//!
//! The config file lives at `<config dir>/todo/config.json`:
//!
//! ```json
//! { "db_path": "/home/me/notes/todo.db", "log": "todo_core=debug" }
//! ```

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const APP_DIR: &str = "todo";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "todo.db";
pub const DB_ENV: &str = "TODO_DB";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl Config {
    /// Reads the config from its default location; a missing file is the
    /// default config.
    pub fn read() -> Result<Self> {
        match dirs::config_dir() {
            Some(dir) => Self::read_from(&dir.join(APP_DIR).join(CONFIG_FILE_NAME)),
            None => Ok(Self::default()),
        }
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(Error::io(path, err)),
        };
        serde_json::from_str(&text).map_err(|err| Error::io(path, err))
    }

    /// Resolves the database file: explicit override, then `TODO_DB`, then
    /// the config file, then the platform data directory.
    pub fn database_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path);
        }
        if let Some(path) = env::var_os(DB_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }
        default_database_path()
    }
}

pub fn default_database_path() -> Result<PathBuf> {
    let base = dirs::state_dir()
        .or_else(dirs::config_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/state")))
        .ok_or_else(|| {
            Error::io(
                DB_FILE_NAME,
                io::Error::new(io::ErrorKind::NotFound, "could not find a data directory"),
            )
        })?;

    Ok(base.join(APP_DIR).join("data").join(DB_FILE_NAME))
}
