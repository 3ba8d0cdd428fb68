//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::time::Duration;

use crate::api::BudgetClient;
use crate::config::Settings;
use crate::session::Session;

use super::app::App;
use super::event::EventHandler;
use super::fetch::FetchWorker;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Run the TUI application
pub fn run_tui(settings: Settings, session: Session) -> Result<()> {
    // Fail on a bad endpoint before the screen is taken over
    let client = BudgetClient::from_settings(&settings, session.token())
        .context("Failed to create API client")?;
    let tick_rate = Duration::from_millis(settings.tick_rate_ms.max(10));

    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, client, settings, session, tick_rate);
    let restored = restore_terminal();

    result?;
    restored
}

fn run_loop(
    terminal: &mut Tui,
    client: BudgetClient,
    settings: Settings,
    session: Session,
    tick_rate: Duration,
) -> Result<()> {
    let events = EventHandler::new(tick_rate);
    let worker = FetchWorker::spawn(client, events.sender());
    let mut app = App::new(settings, session);

    log::info!("TUI started");

    loop {
        for request in app.take_requests() {
            let name = request.name();
            if !worker.send(request) {
                anyhow::bail!("Fetch worker stopped unexpectedly (while sending {})", name);
            }
        }

        terminal.draw(|frame| {
            super::views::render(frame, &mut app);
        })?;

        let event = events.next().context("Event channel closed")?;
        handle_event(&mut app, event)?;

        if app.should_quit {
            break;
        }
    }

    log::info!("TUI stopped");
    Ok(())
}
