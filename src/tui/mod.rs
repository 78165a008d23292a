use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tokio::sync::mpsc;

pub mod app;
pub mod events;
pub mod theme;
pub mod tracing_layer;
pub mod ui;
pub mod widgets;

pub use app::{App, UILogEntry};
use events::run_app_loop;

use crate::api::OffersClient;
use crate::config::Config;

/// Main function to run the TUI.
///
/// This function initializes the terminal, creates the `App` state,
/// and enters the main event loop. It's responsible for restoring
/// the terminal state when the application exits.
pub async fn run_tui(
    config: Arc<Config>,
    client: OffersClient,
    log_receiver: mpsc::UnboundedReceiver<UILogEntry>,
) -> Result<()> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app
    let app = App::new(config, client, log_receiver);

    // run app loop
    let res = run_app_loop(&mut terminal, app).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        // Use tracing::error for consistency, as this will also be captured by the TUI log collector
        tracing::error!("TUI event loop failed: {:?}", err);
    }

    Ok(())
}
