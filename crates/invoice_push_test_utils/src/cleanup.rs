//! Schema-per-test isolation for PostgreSQL.

use anyhow::Result;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

/// RAII guard that owns a unique schema and drops it on Drop.
///
/// Point the code under test at [`schema_name`](Self::schema_name) (for
/// example through `database.schema`) so unqualified table names resolve here.
pub struct PostgresTestGuard {
    pool: PgPool,
    schema_name: String,
    cleaned_up: bool,
}

impl PostgresTestGuard {
    /// Create a new test guard with a unique schema.
    pub async fn new(pool: PgPool) -> Result<Self> {
        let schema_name = format!("test_{}", Uuid::new_v4().simple());

        debug!("Creating test schema: {}", schema_name);

        sqlx::query(&format!("CREATE SCHEMA {}", schema_name))
            .execute(&pool)
            .await?;

        Ok(Self {
            pool,
            schema_name,
            cleaned_up: false,
        })
    }

    /// Execute statements inside the isolated schema.
    ///
    /// Uses a transaction so `search_path` and the statement share a connection.
    pub async fn execute(&self, query: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!("SET LOCAL search_path TO {}", self.schema_name))
            .execute(&mut *tx)
            .await?;
        sqlx::query(query).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// Drop the schema now instead of waiting for Drop.
    pub async fn cleanup(mut self) -> Result<()> {
        self.drop_schema().await?;
        self.cleaned_up = true;
        Ok(())
    }

    async fn drop_schema(&self) -> Result<()> {
        debug!("Dropping test schema: {}", self.schema_name);
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema_name))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl Drop for PostgresTestGuard {
    fn drop(&mut self) {
        if self.cleaned_up {
            return;
        }

        // Drop cannot await; hand the cleanup to the runtime if one is running.
        let pool = self.pool.clone();
        let schema = self.schema_name.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let sql = format!("DROP SCHEMA IF EXISTS {} CASCADE", schema);
                    if let Err(e) = sqlx::query(&sql).execute(&pool).await {
                        warn!("Failed to drop test schema {}: {}", schema, e);
                    }
                });
            }
            Err(_) => warn!("No runtime to drop test schema {}", schema),
        }
    }
}
