//! Catering enquiries submitted from the public site.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Summary DTO for list views.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CateringRequestSummary {
    pub id: Uuid,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub guest_count: i32,
    /// `pending`, `quoted`, `confirmed`, `completed` or `cancelled`.
    pub status: String,
    pub created_at: DateTime<Utc>,
}
