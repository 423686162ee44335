//! Feedback inbox: messages filtered by status, star rating, text and date.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::listing::{
    FilterOperator, FilterSet, ListQueryExecutor, ListSchema, OrderBy, PageRequest, PageResult,
    PgSource, QueryFilterBuilder,
};
use crate::models::feedback::FeedbackSummary;

pub static SCHEMA: ListSchema = ListSchema {
    table: "feedback",
    columns: "id, name, email, rating, message, status, created_at",
    filterable: &["status", "rating", "name", "email", "message", "created_at"],
    sortable: &["created_at", "rating"],
    numeric: &["rating"],
    tiebreaker: "id",
};

const SEARCH_COLUMNS: &[&str] = &["name", "email", "message"];

#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct FeedbackFilters {
    #[validate(length(max = 20))]
    pub status: Option<String>,
    #[validate(length(max = 3))]
    pub rating: Option<String>,
    #[validate(length(max = 100))]
    pub search: Option<String>,
    #[validate(length(max = 10))]
    pub date_from: Option<String>,
    #[validate(length(max = 10))]
    pub date_to: Option<String>,
}

impl FeedbackFilters {
    pub fn filter_set(&self) -> FilterSet {
        let mut builder = QueryFilterBuilder::new(&SCHEMA);
        builder
            .add_if_present("status", FilterOperator::Equals, self.status.as_deref())
            .add_if_present("rating", FilterOperator::Equals, self.rating.as_deref())
            .add_any_of_if_present(SEARCH_COLUMNS, self.search.as_deref())
            .add_if_present("created_at", FilterOperator::DateOnOrAfter, self.date_from.as_deref())
            .add_if_present("created_at", FilterOperator::DateOnOrBefore, self.date_to.as_deref());
        builder.into_filter_set()
    }
}

pub async fn list(
    pool: &PgPool,
    filters: &FeedbackFilters,
    page: PageRequest,
) -> Result<PageResult<FeedbackSummary>, AppError> {
    filters.validate()?;
    let source = PgSource::<FeedbackSummary>::new(pool.clone(), SCHEMA);
    Ok(ListQueryExecutor::execute(
        &source,
        &filters.filter_set(),
        page,
        &OrderBy::desc("created_at"),
    )
    .await?)
}
