//! Settings file loading
//!
//! One YAML file with an `api:` and a `database:` section. Each section type
//! is owned by the crate that consumes it.

use invoice_push_api::ApiSettings;
use invoice_push_db::DatabaseSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Used when neither `--config` nor [`CONFIG_PATH_ENV`] is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "INVOICE_PUSH_CONFIG";

/// Error type for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Everything a run needs. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub database: DatabaseSettings,
}

impl Settings {
    /// Read, parse and validate the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse and validate YAML. `origin` is only used in error messages.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self> {
        let settings: Settings =
            serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would only fail later, mid-run.
    pub fn validate(&self) -> Result<()> {
        check_http_url("api.login_url", &self.api.login_url)?;
        check_http_url("api.push_url", &self.api.push_url)?;

        if self.database.port == 0 {
            return Err(ConfigError::Invalid("database.port must be non-zero".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid("api.timeout_secs must be non-zero".to_string()));
        }
        if self.database.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "database.connect_timeout_secs must be non-zero".to_string(),
            ));
        }

        self.database
            .ssl_mode()
            .map_err(|e| ConfigError::Invalid(format!("database.sslmode: {}", e)))?;

        Ok(())
    }
}

fn check_http_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::Invalid(format!("{} '{}': {}", field, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid(format!(
            "{} must be http or https, got '{}'",
            field, other
        ))),
    }
}
