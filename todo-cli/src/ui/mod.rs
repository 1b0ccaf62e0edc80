//! Interactive three-screen interface: workspaces, their lists, and tasks.

use anyhow::Result;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::io;
use todo_core::Database;
use tracing::{info, warn};

mod app;
mod input;
mod view;

use app::{App, Flow};

pub async fn run_app(db: Database) -> Result<()> {
    let mut app = App::new(db);
    if let Err(err) = app.refresh().await {
        warn!(error = %err, "initial load failed");
        app.report(err);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("interactive session started");
    let res = run_app_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.db.close().await;
    res
}

async fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| view::ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.handle_key(key).await == Flow::Quit {
                info!("interactive session ended");
                return Ok(());
            }
        }
    }
}
