//! Invoice API client
//!
//! Provides:
//! - **ApiClient**: login and per-invoice push over `reqwest`
//! - **SessionToken**: the bearer credential, redacted when formatted
//! - **ApiSettings**: the `api:` settings section

mod client;
mod error;
mod session;
mod settings;

pub use client::ApiClient;
pub use error::{AuthError, PushError};
pub use session::SessionToken;
pub use settings::ApiSettings;
