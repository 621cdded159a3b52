// ABOUTME: Main entry point for evory-admin with TUI and CLI support
//
// Binary: evory-admin
// Usage: evory-admin [COMMAND]
// - No command: launches TUI
// - companies: list/search companies
// - clients: list a company's clients
// - toggle-client: activate/deactivate a client
// - report: export a report to .xlsx

#![allow(missing_docs)]

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, IsTerminal},
    time::{Duration, Instant},
};

mod api;
mod app;
mod cli;
mod components;
mod config;
mod models;
mod validation;

use app::{App, EventHandler};
use components::LayoutComponent;
use config::AppConfig;

/// Terminal cleanup utility to ensure proper restoration
fn cleanup_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Companies(companies_args)) => {
            cli::companies::execute(companies_args, args.format).await
        }
        Some(cli::Commands::Clients(clients_args)) => {
            cli::clients::execute(clients_args, args.format).await
        }
        Some(cli::Commands::ToggleClient(toggle_args)) => {
            cli::clients::toggle(toggle_args, args.format).await
        }
        Some(cli::Commands::Report(report_args)) => {
            cli::report::execute(report_args, args.format).await
        }

        // TUI mode (explicit or default)
        Some(cli::Commands::Tui) | None => {
            let config = AppConfig::load()?;
            let mut app = App::new(config)?;
            app.init().await;
            let layout = LayoutComponent::new();
            run_tui(&mut app, &layout).await
        }
    };

    if result.is_err() {
        cleanup_terminal();
    }

    result
}

async fn run_tui(app: &mut App, layout: &LayoutComponent) -> Result<()> {
    if !IsTerminal::is_terminal(&io::stdout()) {
        return Err(anyhow::anyhow!(
            "No TTY detected. This application requires a terminal.\n\
             Try running directly in a terminal instead of redirecting output."
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(app, layout, &mut terminal).await;

    cleanup_terminal();
    result
}

async fn run_tui_loop(
    app: &mut App,
    layout: &LayoutComponent,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                    EventHandler::process_event(app_event, &mut app.state);

                    // Run queued work immediately so dialogs and
                    // submissions feel responsive
                    if app.state.pending_async_action.is_some() {
                        if let Err(e) = app.tick().await {
                            tracing::error!("Error during immediate tick: {}", e);
                        }
                        last_tick = Instant::now();
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            match app.tick().await {
                Ok(()) => {
                    last_tick = Instant::now();
                    if app.needs_ui_refresh() {
                        terminal.draw(|frame| {
                            layout.render(frame, &app.state);
                        })?;
                    }
                }
                Err(e) => {
                    tracing::error!("Error during app tick: {}", e);
                    last_tick = Instant::now();
                }
            }
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = config::app_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "evory-admin-{}.jsonl",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .expect("Failed to create log file");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evory_admin=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    use tracing::error;

    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before logging the panic
        cleanup_terminal();

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
