use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use todo_core::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "TODO_LOG";
const LOG_FILE_NAME: &str = "todo.log";

fn filter(config: &Config, verbose: bool, fallback: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::try_new(config.log.as_deref().unwrap_or(fallback))
            .unwrap_or_else(|_| EnvFilter::new(fallback))
    })
}

/// Command mode: everything goes to stderr so stdout stays scriptable.
pub fn init_stderr(config: &Config, verbose: bool) {
    tracing_subscriber::registry()
        .with(filter(config, verbose, "warn"))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Interactive mode owns the terminal, so logs go to a file beside the
/// database. Logging stays off if that file cannot be opened.
pub fn init_file(config: &Config, db_path: &Path) {
    let Some(dir) = db_path.parent() else {
        return;
    };
    if std::fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
    else {
        return;
    };

    tracing_subscriber::registry()
        .with(filter(config, false, "info"))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .init();
}
