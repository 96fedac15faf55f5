//! Shared logging setup for the invoice push binary.
//!
//! Console output always goes to stderr. When a log directory can be created,
//! a daily-rolling file layer is added next to it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "invoice_push=info,invoice_push_api=info,invoice_push_db=info";
const VERBOSE_LOG_FILTER: &str = "invoice_push=debug,invoice_push_api=debug,invoice_push_db=debug";
const HOME_ENV: &str = "INVOICE_PUSH_HOME";

/// Logging configuration for a single run.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
    /// Overrides the default `<home>/logs` directory.
    pub log_dir: Option<PathBuf>,
}

/// Keeps the non-blocking file writer alive. Drop it last.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize tracing with stderr output and, when possible, a rolling log file.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let log_dir = config.log_dir.clone().unwrap_or_else(logs_dir);
    let mut guard = None;
    let file_layer = match ensure_dir(&log_dir) {
        Ok(dir) => {
            let file_name = format!("{}.log", sanitize_name(config.app_name));
            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, worker) = tracing_appender::non_blocking(appender);
            guard = Some(worker);
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_filter(env_filter(config.verbose)),
            )
        }
        Err(err) => {
            eprintln!("Warning: file logging disabled: {:#}", err);
            None
        }
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter(config.verbose)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { _file: guard })
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        })
    })
}

/// Home directory for runtime files: `$INVOICE_PUSH_HOME` or `~/.invoice_push`.
pub fn app_home() -> PathBuf {
    if let Ok(override_path) = std::env::var(HOME_ENV) {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".invoice_push")
}

/// Default logs directory: `<home>/logs`.
pub fn logs_dir() -> PathBuf {
    app_home().join("logs")
}

fn ensure_dir(dir: &Path) -> Result<&Path> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
    Ok(dir)
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}
