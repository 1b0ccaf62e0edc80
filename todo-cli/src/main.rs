use std::env;
use std::io;

use anyhow::Context;
use clap::Parser;
use todo_core::{Config, Database};

use crate::cli::Cli;

mod cli;
mod commands;
mod logging;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if env::args_os().len() <= 1 {
        let config = Config::read()?;
        let path = config.database_path(None)?;
        logging::init_file(&config, &path);

        let db = Database::open(&path).await?;
        ui::run_app(db).await?;
        return Ok(());
    }

    let cli = Cli::parse();
    let config = Config::read()?;
    logging::init_stderr(&config, cli.verbose);

    let path = config.database_path(cli.db)?;
    let db = Database::open(&path).await.context("database")?;

    let result = commands::run(cli.command, &db, &mut io::stdout().lock()).await;
    db.close().await;
    result
}
