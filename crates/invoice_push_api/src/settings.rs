//! `api:` section of the settings file.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Endpoints and credentials for the invoice API.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ApiSettings {
    pub login_url: String,
    pub push_url: String,
    pub username: String,
    pub password: String,

    /// Per-request timeout applied to both login and push calls
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("login_url", &self.login_url)
            .field("push_url", &self.push_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
