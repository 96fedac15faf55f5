//! Row types and status codes for the `invoice` table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Values of the `invoice.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum InvoiceStatus {
    /// Waiting to be pushed to the remote API.
    Pending = 1,
}

impl InvoiceStatus {
    /// Integer stored in the database.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
        }
    }
}

/// One fetched invoice, identified by its invoice number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
}

impl Invoice {
    pub fn new(invoice_id: impl Into<String>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
        }
    }
}
