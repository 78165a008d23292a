// src/main.rs

mod api;
mod cli;
mod config;
mod errors;
mod format;
mod offer;
mod store;
mod tui;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use api::OffersClient;
use cli::{Cli, LogLevelCli};
use config::Config;
use tui::run_tui;
use tui::tracing_layer::TuiLogCollectorLayer;

use tracing::{debug, info, warn};
use tracing_subscriber::{
    filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, FmtSubscriber,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli_args = Cli::parse();

    // The configuration participates in the log filter, so it has to load
    // before the subscriber exists. Any problem found here is reported
    // once logging is up.
    let (config, config_load_error) = match Config::load(cli_args.config.as_deref()) {
        Ok(cfg) => (Arc::new(cfg), None),
        Err(e) => {
            if cli_args.config.is_some() {
                // An explicitly requested config file that fails to load is fatal.
                eprintln!("Failed to load configuration: {}", e);
                return Err(e);
            }
            (Arc::new(Config::default()), Some(e.to_string()))
        }
    };

    // RUST_LOG=bolsatui=trace,warn (sets bolsatui to trace, others to warn)
    let env_filter = build_env_filter(cli_args.log_level, &config.logging.level);

    // Dispatch based on CLI arguments
    if let Some(command) = cli_args.command {
        // Headless command: ordinary stdout logging.
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(env_filter)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Setting default tracing subscriber failed");

        report_config_status(config_load_error.as_deref());
        return cli::handle_command(command, &config, cli_args.endpoint.as_deref()).await;
    }

    // TUI session: stdout belongs to the terminal UI, so log lines go to a
    // rotating file and to the in-app Logs view instead.
    let log_dir = PathBuf::from(shellexpand::tilde(&config.logging.log_dir).into_owned());
    std::fs::create_dir_all(&log_dir)?;
    prune_old_logs(&log_dir, config.logging.retain_days);

    let file_appender = if config.logging.rotate_daily {
        tracing_appender::rolling::daily(&log_dir, "bolsatui.log")
    } else {
        tracing_appender::rolling::never(&log_dir, "bolsatui.log")
    };
    // The guard flushes buffered log lines when main returns.
    let (non_blocking_writer, _appender_guard) = tracing_appender::non_blocking(file_appender);

    let (log_sender, log_receiver) = mpsc::unbounded_channel();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_writer)
                .with_ansi(false),
        )
        .with(TuiLogCollectorLayer::new(log_sender))
        .init();

    info!("Starting bolsatui...");
    report_config_status(config_load_error.as_deref());
    debug!("Loaded app config: {:?}", config);

    let client = OffersClient::new(&config, cli_args.endpoint.as_deref());
    run_tui(Arc::clone(&config), client, log_receiver).await?;

    info!("bolsatui shutting down.");
    Ok(())
}

/// Resolves the effective log filter. `RUST_LOG` wins when set, then the
/// `--log-level` flag, then the configuration file.
fn build_env_filter(cli_level: Option<LogLevelCli>, config_level: &str) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match cli_level {
            Some(level) => EnvFilter::new(level.as_filter_str()),
            None => EnvFilter::new(config_level.to_string()),
        },
    }
}

fn report_config_status(load_error: Option<&str>) {
    match load_error {
        Some(e) => warn!("Proceeding with default configuration due to error: {}", e),
        None => info!("Configuration loaded."),
    }
}

/// Removes rotated log files older than `retain_days` days. A value of 0
/// disables pruning. Failures only get a debug line; refusing to start
/// over stale logs would be worse than keeping them.
fn prune_old_logs(log_dir: &Path, retain_days: u32) {
    if retain_days == 0 {
        return;
    }
    let Ok(entries) = std::fs::read_dir(log_dir) else {
        return;
    };
    let max_age = Duration::from_secs(u64::from(retain_days) * 24 * 60 * 60);
    for entry in entries.flatten() {
        if !entry
            .file_name()
            .to_string_lossy()
            .starts_with("bolsatui.log")
        {
            continue;
        }
        let Ok(metadata) = entry.metadata() else {
            continue;
        };
        let Ok(modified) = metadata.modified() else {
            continue;
        };
        if matches!(modified.elapsed(), Ok(age) if age > max_age) {
            if let Err(e) = std::fs::remove_file(entry.path()) {
                debug!("Could not remove old log file {:?}: {}", entry.path(), e);
            }
        }
    }
}
