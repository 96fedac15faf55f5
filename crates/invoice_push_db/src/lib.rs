//! PostgreSQL access for the invoice push run.
//!
//! There is exactly one read: the invoice numbers currently in
//! [`InvoiceStatus::Pending`]. Each call opens its own connection and closes
//! it before returning; nothing is pooled.
//!
//! # Usage
//!
//! ```rust,ignore
//! use invoice_push_db::fetch_pending_invoices;
//!
//! let invoices = fetch_pending_invoices(&settings.database).await?;
//! ```

mod error;
mod settings;
mod types;

pub use error::{DbError, Result};
pub use settings::DatabaseSettings;
pub use types::{Invoice, InvoiceStatus};

use sqlx::{Connection, PgConnection, Row};
use tracing::{debug, info, warn};

/// Invoice numbers in a given status. Bound with [`InvoiceStatus::code`].
const PENDING_INVOICES_SQL: &str = "SELECT number FROM invoice WHERE status = $1";

/// Fetch every pending invoice, in the order the database returns them.
pub async fn fetch_pending_invoices(settings: &DatabaseSettings) -> Result<Vec<Invoice>> {
    let mut conn = connect(settings).await?;

    let result = select_by_status(&mut conn, InvoiceStatus::Pending).await;

    // Runs on both the success and the error path of the query.
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Failed to close database connection cleanly");
    }

    let invoices = result?;
    info!(count = invoices.len(), database = %settings, "Fetched pending invoices");
    Ok(invoices)
}

async fn connect(settings: &DatabaseSettings) -> Result<PgConnection> {
    let options = settings.connect_options()?;
    let timeout = settings.connect_timeout();

    debug!(database = %settings, sslmode = %settings.sslmode, "Connecting to database");

    match tokio::time::timeout(timeout, PgConnection::connect_with(&options)).await {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(e)) => Err(DbError::Connect(e)),
        Err(_) => Err(DbError::ConnectTimeout(timeout)),
    }
}

async fn select_by_status(conn: &mut PgConnection, status: InvoiceStatus) -> Result<Vec<Invoice>> {
    let rows = sqlx::query(PENDING_INVOICES_SQL)
        .bind(status.code())
        .fetch_all(&mut *conn)
        .await
        .map_err(DbError::Query)?;

    rows.iter()
        .map(|row| {
            row.try_get::<String, _>("number")
                .map(Invoice::new)
                .map_err(DbError::Scan)
        })
        .collect()
}
