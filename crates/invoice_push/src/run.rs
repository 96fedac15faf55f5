//! The whole run: load settings, log in, fetch, push.

use invoice_push_api::{ApiClient, AuthError};
use invoice_push_db::{fetch_pending_invoices, DbError};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, Settings};
use crate::dispatch::Dispatcher;

/// Failures that end the run before or instead of dispatching.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to login and get session token: {0}")]
    Auth(#[from] AuthError),

    #[error("Failed to get invoices from the database: {0}")]
    Db(#[from] DbError),
}

/// Load settings from `config_path`, then [`run_with_settings`].
pub async fn run(config_path: &Path) -> Result<(), RunError> {
    let settings = Settings::load(config_path)?;
    info!(
        path = %config_path.display(),
        database = %settings.database,
        push_url = %settings.api.push_url,
        "Configuration loaded"
    );
    run_with_settings(settings).await
}

/// Log in, fetch pending invoices and push each one.
///
/// Returns `Ok` once every invoice had its attempt, whatever the outcomes.
pub async fn run_with_settings(settings: Settings) -> Result<(), RunError> {
    let Settings { api, database } = settings;

    let client = ApiClient::new(api)?;
    let token = client.login().await?;

    let invoices = fetch_pending_invoices(&database).await?;
    if invoices.is_empty() {
        info!("No pending invoices");
    }

    Dispatcher::new(&client, token).dispatch(&invoices).await;

    info!(attempted = invoices.len(), "Dispatch finished");
    Ok(())
}
