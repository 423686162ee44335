//! Food orders placed by customers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Summary DTO for list views. Amounts are stored in minor units.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderSummary {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub total_amount_minor: i64,
    /// `pending`, `preparing`, `out_for_delivery`, `delivered` or `cancelled`.
    pub status: String,
    /// `unpaid`, `paid` or `refunded`.
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}
