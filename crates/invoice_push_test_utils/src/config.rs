//! Connection parameters for the test PostgreSQL container.

/// Host port published by `docker/docker-compose.yml`.
pub const POSTGRES_TEST_PORT: u16 = 15432;

/// Configuration for test database connections.
#[derive(Debug, Clone)]
pub struct TestDbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for TestDbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: POSTGRES_TEST_PORT,
            database: "invoice_push_test".to_string(),
            username: "invoice_push".to_string(),
            password: "invoice_push_test".to_string(),
        }
    }
}

impl TestDbConfig {
    /// Defaults, with `INVOICE_PUSH_TEST_PG_HOST` / `INVOICE_PUSH_TEST_PG_PORT`
    /// overriding where the container is reachable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("INVOICE_PUSH_TEST_PG_HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("INVOICE_PUSH_TEST_PG_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.port = port;
        }
        config
    }

    /// Build a PostgreSQL connection string.
    pub fn postgres_connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }
}
