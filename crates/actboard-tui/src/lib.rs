//! actboard-tui - TUI frontend for actboard using Ratatui

pub mod app;
pub mod components;
pub mod ui;

pub use app::App;

use actboard_core::{DashboardStore, DataProvider};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Run the TUI application
///
/// The initial month is fetched in the background; the UI shows a loading
/// screen until it arrives.
pub async fn run<P: DataProvider + 'static>(store: Arc<DashboardStore<P>>) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store.clone());
    let mut ui = ui::Ui::new();

    // Spawn background loading task
    let ticket = store.select_month(store.selected_month());
    let store_clone = store.clone();
    tokio::spawn(async move {
        store_clone.load(ticket).await;
    });

    let result = run_loop(&mut terminal, &mut app, &mut ui);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend, P: DataProvider + 'static>(
    terminal: &mut Terminal<B>,
    app: &mut App<P>,
    ui: &mut ui::Ui,
) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        app.poll_events();

        terminal.draw(|f| ui.render(f, app))?;

        // Handle input with timeout so the spinner keeps moving
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
