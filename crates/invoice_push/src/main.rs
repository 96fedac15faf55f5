//! invoice-push
//!
//! Single sequential run: load settings, log in, fetch pending invoices,
//! push each one. Exits 1 if any stage before the push loop fails.

use clap::Parser;
use invoice_push::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use invoice_push_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "invoice-push",
    version,
    about = "Push pending invoices to the invoice API"
)]
struct Cli {
    /// Settings file (YAML)
    #[arg(short, long, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Directory for rolling log files (default: ~/.invoice_push/logs)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "invoice-push",
        verbose: cli.verbose,
        log_dir: cli.log_dir.clone(),
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{:?}", err);
            return ExitCode::from(1);
        }
    };

    info!("Starting invoice-push v{}", env!("CARGO_PKG_VERSION"));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            error!(error = %err, "Failed to start async runtime");
            return ExitCode::from(1);
        }
    };

    match runtime.block_on(invoice_push::run(&cli.config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::from(1)
        }
    }
}
