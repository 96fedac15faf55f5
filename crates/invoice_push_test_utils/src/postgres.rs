//! PostgreSQL test pool factory.

use crate::config::TestDbConfig;
use anyhow::{bail, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

/// How long to wait for the container to accept queries.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(60);

const HEALTH_CHECK_INTERVAL: Duration = Duration::from_millis(500);

/// A PostgreSQL connection pool for seeding test data.
///
/// The code under test opens its own connection; this pool only prepares and
/// inspects state.
#[derive(Debug, Clone)]
pub struct TestPgPool {
    pub pool: PgPool,
    pub config: TestDbConfig,
}

impl TestPgPool {
    /// Connect to the test container, waiting for it to become healthy.
    ///
    /// ```rust,ignore
    /// #[tokio::test]
    /// #[cfg(feature = "docker-tests")]
    /// async fn test_postgres() {
    ///     let pool = TestPgPool::new().await.unwrap();
    ///     sqlx::query("SELECT 1").execute(&pool.pool).await.unwrap();
    /// }
    /// ```
    pub async fn new() -> Result<Self> {
        let config = TestDbConfig::from_env();
        wait_for_healthy(&config).await?;

        info!("Creating PostgreSQL pool on {}:{}", config.host, config.port);

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(&config.postgres_connection_string())
            .await?;

        Ok(Self { pool, config })
    }
}

/// Wait until PostgreSQL answers `SELECT 1`, or fail after [`STARTUP_TIMEOUT`].
pub async fn wait_for_healthy(config: &TestDbConfig) -> Result<()> {
    let start = std::time::Instant::now();
    let conn_str = config.postgres_connection_string();

    loop {
        if check_postgres_ready(&conn_str).await {
            debug!("PostgreSQL healthy after {:?}", start.elapsed());
            return Ok(());
        }

        if start.elapsed() > STARTUP_TIMEOUT {
            bail!(
                "Timeout waiting for PostgreSQL on {}:{} after {:?}. Start it with: \
                 docker compose -f crates/invoice_push_test_utils/docker/docker-compose.yml up -d",
                config.host,
                config.port,
                STARTUP_TIMEOUT
            );
        }

        sleep(HEALTH_CHECK_INTERVAL).await;
    }
}

async fn check_postgres_ready(conn_str: &str) -> bool {
    let result = timeout(
        Duration::from_secs(2),
        PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(1))
            .connect(conn_str),
    )
    .await;

    match result {
        Ok(Ok(pool)) => {
            let ok = sqlx::query("SELECT 1").fetch_one(&pool).await.is_ok();
            pool.close().await;
            ok
        }
        _ => false,
    }
}
