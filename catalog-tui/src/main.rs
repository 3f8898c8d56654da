//! Catalog TUI entry point.

use catalog_tui::api_client::RestClient;
use catalog_tui::config::TuiConfig;
use catalog_tui::error::TuiError;
use catalog_tui::events::TuiEvent;
use catalog_tui::fetcher::PageFetcher;
use catalog_tui::logging;
use catalog_tui::state::App;
use catalog_tui::views::{render_view, table_viewport_rows};
use chrono::Utc;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = TuiConfig::load()?;
    logging::init(&config.log_path)?;
    let rest = RestClient::new(&config)?;
    info!(base_url = %rest.base_url(), "starting catalog tui");

    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let mut fetcher = PageFetcher::new(Arc::new(rest), event_tx.clone());
    if let Some(ticket) = app.start() {
        fetcher.spawn(ticket);
    }

    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        app.set_viewport_rows(table_viewport_rows(terminal.size()?));
        if let Some(ticket) = app.poll_sentinel() {
            fetcher.spawn(ticket);
        }

        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                app.prune_notifications(Utc::now());
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, &mut fetcher, event) {
                    break;
                }
            }
        }
    }

    app.teardown();
    fetcher.abort();
    info!(loaded = app.products().len(), "catalog tui exiting");

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

/// Returns true when the app should exit.
fn handle_event(app: &mut App, fetcher: &mut PageFetcher, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Input(key) => return app.handle_key(key),
        TuiEvent::PageLoaded { ticket, result } => {
            fetcher.finished();
            app.apply_page(ticket, result);
        }
        TuiEvent::Resize { .. } => {}
    }
    false
}
