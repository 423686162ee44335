use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Menu item review awaiting or past moderation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewSummary {
    pub id: Uuid,
    pub customer_name: String,
    pub menu_item: String,
    pub rating: i32,
    pub comment: String,
    /// `pending`, `approved` or `rejected`.
    pub status: String,
    pub created_at: DateTime<Utc>,
}
