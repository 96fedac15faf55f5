//! Test utilities for the invoice push workspace.
//!
//! - [`StubServer`]: a real HTTP listener on an ephemeral port with scripted
//!   responses, standing in for the login and push endpoints.
//! - [`TestPgPool`] / [`PostgresTestGuard`]: PostgreSQL from
//!   `docker/docker-compose.yml`, one isolated schema per test.
//!
//! # Features
//!
//! - `docker-tests`: enable tests that need the PostgreSQL container
//!
//! # Usage
//!
//! ```rust,ignore
//! use invoice_push_test_utils::{StubResponse, StubServer};
//!
//! let server = StubServer::start(|req| {
//!     if req.path() == "/login" {
//!         StubResponse::json(200, r#"{"access_token":"abc123"}"#)
//!     } else {
//!         StubResponse::empty(404)
//!     }
//! });
//! let login_url = server.url("/login");
//! ```

pub mod cleanup;
pub mod config;
pub mod postgres;
pub mod stub_server;

pub use cleanup::PostgresTestGuard;
pub use config::TestDbConfig;
pub use postgres::{wait_for_healthy, TestPgPool};
pub use stub_server::{RecordedRequest, StubResponse, StubServer};
