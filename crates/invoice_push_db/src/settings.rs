//! `database:` section of the settings file.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{DbError, Result};

/// PostgreSQL connection parameters.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    /// libpq sslmode, e.g. `disable` or `require`
    pub sslmode: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Optional `search_path` for the session
    #[serde(default)]
    pub schema: Option<String>,
}

fn default_connect_timeout() -> u64 {
    10
}

impl DatabaseSettings {
    /// Parse `sslmode` into the driver's enum.
    pub fn ssl_mode(&self) -> Result<PgSslMode> {
        PgSslMode::from_str(&self.sslmode).map_err(|_| DbError::InvalidSslMode(self.sslmode.clone()))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Build driver connect options from the settings.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.dbname)
            .ssl_mode(self.ssl_mode()?)
            .application_name("invoice_push");

        if let Some(schema) = &self.schema {
            options = options.options([("search_path", schema.as_str())]);
        }

        Ok(options)
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .field("sslmode", &self.sslmode)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("schema", &self.schema)
            .finish()
    }
}

impl fmt::Display for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.dbname)
    }
}
