//! Invoice API client
//!
//! Two calls, both plain HTTP POSTs:
//! - login with JSON credentials, answered by an `access_token`
//! - push one invoice by number, authorized with that token

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::{ApiSettings, AuthError, PushError, SessionToken};

/// Query parameter carrying the invoice number on push calls.
const INVOICE_NUMBER_PARAM: &str = "invoice_number";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// HTTP client bound to one [`ApiSettings`].
pub struct ApiClient {
    settings: ApiSettings,
    http_client: reqwest::Client,
}

impl ApiClient {
    /// Create a client with the configured request timeout.
    pub fn new(settings: ApiSettings) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;
        Ok(Self {
            settings,
            http_client,
        })
    }

    /// Exchange the configured credentials for a session token.
    pub async fn login(&self) -> Result<SessionToken, AuthError> {
        let body = LoginRequest {
            email: &self.settings.username,
            password: &self.settings.password,
        };

        info!(url = %self.settings.login_url, user = %self.settings.username, "Logging in");

        let response = self
            .http_client
            .post(&self.settings.login_url)
            .json(&body)
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = response.status();
        let payload = response.bytes().await.map_err(AuthError::Transport)?;

        if status != StatusCode::OK {
            return Err(AuthError::Status(status));
        }

        let login: LoginResponse = serde_json::from_slice(&payload).map_err(AuthError::Decode)?;
        let token = SessionToken::new(login.access_token);

        info!(token_len = token.expose().len(), "Successfully acquired session token");
        Ok(token)
    }

    /// `<push_url>?invoice_number=<invoice_id>`, keeping any query already present.
    pub fn push_url(&self, invoice_id: &str) -> Result<Url, PushError> {
        let mut url = Url::parse(&self.settings.push_url).map_err(PushError::InvalidUrl)?;
        url.query_pairs_mut()
            .append_pair(INVOICE_NUMBER_PARAM, invoice_id);
        Ok(url)
    }

    /// Push one invoice. Only `200 OK` counts as delivered.
    pub async fn push_invoice(
        &self,
        token: &SessionToken,
        invoice_id: &str,
    ) -> Result<(), PushError> {
        let url = self.push_url(invoice_id)?;
        debug!(url = %url, "Pushing invoice");

        let response = self
            .http_client
            .post(url)
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(PushError::Transport)?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(PushError::Status(status)),
        }
    }
}
