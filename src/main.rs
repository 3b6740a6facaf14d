//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ip_intel` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting and the local lookup history
//!
//! All core functionality is implemented in the library crate.

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use clap::Parser;

use ip_intel::config::{Cli, Command};
use ip_intel::initialization::init_logger_with;
use ip_intel::server::{start_server, AppState};
use ip_intel::{render_card, AggregatedResult, History, HistoryItem, IntelLookup, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting ABUSEIPDB_API_KEY in .env without exporting it manually
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    let config = cli.global.to_config();
    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    if config.abuse_api_key.is_none() {
        log::debug!("No abuse API key configured; abuse reputation will be absent");
    }
    let lookup = IntelLookup::from_config(&config).context("Failed to initialize HTTP client")?;
    let history_path = cli.global.history_file.as_path();

    match cli.command {
        Command::Lookup {
            query,
            format,
            no_history,
        } => match lookup.lookup(&query).await {
            Ok(result) => {
                print_result(&result, format)?;
                if !no_history {
                    record_history(history_path, &result);
                }
                lookup.stats().log_summary();
                Ok(())
            }
            Err(e) => {
                eprintln!("ip_intel error: {}", e);
                process::exit(1);
            }
        },
        Command::Asn { asn } => match lookup.geo().fetch_asn(&asn).await {
            Ok(document) => {
                println!("{}", serde_json::to_string_pretty(&document)?);
                Ok(())
            }
            Err(e) => {
                eprintln!("ip_intel error: {}", e);
                process::exit(1);
            }
        },
        Command::History { clear } => {
            let mut history = History::load(history_path);
            if clear {
                history.clear();
                history
                    .save(history_path)
                    .with_context(|| format!("Failed to write {}", history_path.display()))?;
                println!("History cleared");
            } else {
                print_history(&history);
            }
            Ok(())
        }
        Command::Serve { port, bind } => start_server(&bind, port, AppState::new(lookup)).await,
    }
}

fn print_result(result: &AggregatedResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => print!("{}", render_card(result)),
    }
    Ok(())
}

/// History is a convenience; failing to write it never fails the lookup.
fn record_history(path: &Path, result: &AggregatedResult) {
    let mut history = History::load(path);
    history.add(HistoryItem::from(result));
    if let Err(e) = history.save(path) {
        log::warn!("Failed to save history to {}: {:#}", path.display(), e);
    }
}

fn print_history(history: &History) {
    if history.is_empty() {
        println!("No lookups recorded yet");
        return;
    }
    for item in history.items() {
        let when = Local
            .timestamp_millis_opt(item.timestamp)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let place = match (item.city.is_empty(), item.country.is_empty()) {
            (false, false) => format!("{}, {}", item.city, item.country),
            (false, true) => item.city.clone(),
            (true, false) => item.country.clone(),
            (true, true) => "-".to_string(),
        };
        println!(
            "{:<16} {:<40} {:<6} {}",
            when,
            item.query,
            item.kind.as_ref(),
            place
        );
    }
}
