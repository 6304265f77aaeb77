// outly - structure outline panel for terminal code editors
//
// Hosts the outline panel inside a small TUI workspace and drives it with
// a scripted editing session, so the panel's behavior (fresh renders,
// dropped stale deliveries, malformed-model recovery, click-to-navigate)
// can be watched live.
//
// Architecture:
// - Outline core: snapshot model, formatting, controller (src/outline)
// - TUI (ratatui): workspace hosting the panel, logs, status bar
// - Demo session: scripted collaborator emitting lifecycle events and
//   structure snapshots
// - Event system: mpsc channels connect all components

mod cli;
mod config;
mod demo;
mod events;
mod logging;
mod outline;
mod theme;
mod tui;

use anyhow::Result;
use config::{Config, LogRotation};
use logging::{LogBuffer, PanelLogLayer};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --path).
    // If a command was handled, exit early.
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Log buffer shared between the tracing layer and the logs panel
    let log_buffer = LogBuffer::new();

    // Initialize tracing with conditional output.
    // In TUI mode: capture logs to the buffer (prevents garbling the
    // alternate screen). In headless mode: log to stdout.
    // File logging: optionally also write JSON logs to rotating files.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("outly={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must stay alive for the duration of the program so file
    // logs flush on exit.
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> = if config
        .logging
        .file_enabled
    {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                init_without_file_layer(&config, filter, &log_buffer);
                None
            }
            Ok(()) => {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                if config.enable_tui {
                    let file_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(PanelLogLayer::new(log_buffer.clone()))
                        .with(file_layer)
                        .init();
                } else {
                    let file_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer())
                        .with(file_layer)
                        .init();
                }
                Some(guard)
            }
        }
    } else {
        init_without_file_layer(&config, filter, &log_buffer);
        None
    };

    tracing::info!("outly {} starting", config::VERSION);
    tracing::debug!(
        "indent_width={} theme={} cadence={}ms",
        config.indent_width,
        config.theme,
        config.demo_cadence_ms
    );

    // Editor events: demo session -> workspace. Bounded so a stuck UI
    // applies backpressure instead of ballooning memory.
    let (event_tx, mut event_rx) = mpsc::channel(1000);

    // Shutdown signal for the demo task (oneshot: fires exactly once)
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    // The analysis hand-off handle and the demo task answering it
    let (analyst, requests_rx) = demo::DemoAnalyst::channel();
    let cadence = Duration::from_millis(config.demo_cadence_ms);
    let demo_handle = tokio::spawn(demo::run_demo(event_tx, requests_rx, shutdown_rx, cadence));

    if config.enable_tui {
        tracing::info!("Starting TUI");
        let app = App::new(&config, log_buffer, Box::new(analyst));
        if let Err(e) = tui::run_tui(app, event_rx).await {
            tracing::error!("TUI error: {:?}", e);
        }
    } else {
        tracing::info!("TUI disabled, running headless until Ctrl+C");
        let mut app = App::new(&config, log_buffer, Box::new(analyst));
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                maybe_event = event_rx.recv() => {
                    match maybe_event {
                        Some(event) => {
                            app.on_editor_event(event);
                            app.drain_requests();
                        }
                        None => break,
                    }
                }
            }
        }
        app.shutdown();
    }

    tracing::info!("Shutting down...");

    // Signal the demo task; if the send fails it already finished.
    let _ = shutdown_tx.send(());
    let _ = demo_handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Subscriber assembly for the no-file-logging paths.
fn init_without_file_layer(config: &Config, filter: EnvFilter, log_buffer: &LogBuffer) {
    if config.enable_tui {
        tracing_subscriber::registry()
            .with(filter)
            .with(PanelLogLayer::new(log_buffer.clone()))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
