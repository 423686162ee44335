//! Blog post rows shown on the blog admin page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Summary DTO for list views.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BlogPostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: Option<String>,
    pub author: String,
    /// `draft`, `published` or `archived`.
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
