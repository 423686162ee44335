use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FeedbackSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub rating: i32,
    pub message: String,
    /// `new`, `read` or `responded`.
    pub status: String,
    pub created_at: DateTime<Utc>,
}
