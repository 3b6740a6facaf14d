//! Logger setup for the CLI and the server.
//!
//! `RUST_LOG` is honoured, but `--log-level` wins for this crate. HTTP stack
//! modules are clamped so a `debug` run shows lookups and degradations, not
//! connection pool chatter.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Modules whose output is capped regardless of the requested level.
const CLAMPED_MODULES: &[(&str, LevelFilter)] = &[
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("h2", LevelFilter::Info),
    ("axum", LevelFilter::Info),
    ("rustls", LevelFilter::Warn),
    ("httptest", LevelFilter::Warn),
];

/// Installs the global logger.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Show every upstream call and its latency
/// ip_intel --log-level debug lookup example.com
///
/// # Machine-readable server logs
/// ip_intel --log-format json serve --port 8080
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);
    build_logger(level, format).try_init()?;
    Ok(())
}

/// The configured builder, not yet installed.
pub(crate) fn build_logger(level: LevelFilter, format: LogFormat) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in CLAMPED_MODULES {
        builder.filter_module(module, level.min(*cap));
    }
    builder.filter_module(env!("CARGO_CRATE_NAME"), level);

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            let line = format_json_line(
                chrono::Utc::now().timestamp_millis(),
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
            writeln!(buf, "{}", line)
        }),
        LogFormat::Plain => builder.format(|buf, record| {
            let line = format_plain_line(record.level(), record.target(), &record.args().to_string());
            writeln!(buf, "{}", line)
        }),
    };
    builder
}

fn level_marker(level: Level) -> (&'static str, ColoredString) {
    let name = level.as_str();
    match level {
        Level::Error => ("❌", name.red()),
        Level::Warn => ("⚠️", name.yellow()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}

/// `<emoji> <target> [<LEVEL>] <msg>`, coloured when colours are enabled.
pub fn format_plain_line(level: Level, target: &str, msg: &str) -> String {
    let (emoji, name) = level_marker(level);
    format!("{} {} [{}] {}", emoji, target.cyan(), name, msg)
}

/// One structured log line with `ts`, `level`, `target` and `msg` keys.
pub fn format_json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Log, Metadata};

    fn enabled(logger: &env_logger::Logger, target: &str, level: Level) -> bool {
        logger.enabled(&Metadata::builder().target(target).level(level).build())
    }

    #[test]
    fn test_second_install_is_logger_error() {
        // Whichever test installs first wins; the next attempt must fail cleanly
        let _ = init_logger_with(LevelFilter::Warn, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_crate_level_follows_request() {
        let logger = build_logger(LevelFilter::Debug, LogFormat::Plain).build();
        assert!(enabled(&logger, "ip_intel::dns::resolver", Level::Debug));
        assert!(!enabled(&logger, "ip_intel::dns::resolver", Level::Trace));

        let quiet = build_logger(LevelFilter::Warn, LogFormat::Plain).build();
        assert!(!enabled(&quiet, "ip_intel::lookup", Level::Info));
        assert!(enabled(&quiet, "ip_intel::lookup", Level::Warn));
    }

    #[test]
    fn test_http_stack_is_clamped() {
        let logger = build_logger(LevelFilter::Trace, LogFormat::Plain).build();
        assert!(!enabled(&logger, "hyper::proto::h1", Level::Debug));
        assert!(enabled(&logger, "reqwest::connect", Level::Info));
        assert!(!enabled(&logger, "rustls::client", Level::Info));

        // A stricter request is never loosened by a clamp
        let errors_only = build_logger(LevelFilter::Error, LogFormat::Plain).build();
        assert!(!enabled(&errors_only, "reqwest::connect", Level::Info));
    }

    #[test]
    fn test_plain_line_has_target_and_level() {
        let line = format_plain_line(Level::Warn, "ip_intel::intel::geo", "geo lookup degraded");
        assert!(line.contains("ip_intel::intel::geo"), "{}", line);
        assert!(line.contains("WARN"), "{}", line);
        assert!(line.starts_with("⚠️ "), "{}", line);
        assert!(line.ends_with("] geo lookup degraded"), "{}", line);
    }

    #[test]
    fn test_json_line_escapes_message() {
        let line = format_json_line(
            1_700_000_000_000,
            Level::Warn,
            "ip_intel::dns",
            "dns lookup degraded for \"MX example.com\"\nnext",
        );
        assert!(!line.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["ts"], 1_700_000_000_000i64);
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["target"], "ip_intel::dns");
        assert_eq!(parsed["msg"], "dns lookup degraded for \"MX example.com\"\nnext");
    }
}
