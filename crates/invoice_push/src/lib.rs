//! Invoice push
//!
//! Reads invoices in pending status from PostgreSQL and pushes each one to
//! the invoice API, authenticating once per run.
//!
//! Stages run strictly in sequence:
//! 1. [`config::Settings::load`]
//! 2. [`invoice_push_api::ApiClient::login`]
//! 3. [`invoice_push_db::fetch_pending_invoices`]
//! 4. [`dispatch::Dispatcher::dispatch`]
//!
//! Stages 1-3 are fatal on failure; stage 4 logs and skips.

pub mod config;
pub mod dispatch;
pub mod run;

pub use config::{ConfigError, Settings};
pub use dispatch::Dispatcher;
pub use run::{run, run_with_settings, RunError};
