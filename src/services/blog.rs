//! Blog admin page: list posts by status, category, text and creation date.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::listing::{
    FilterOperator, FilterSet, ListQueryExecutor, ListSchema, OrderBy, PageRequest, PageResult,
    PgSource, QueryFilterBuilder,
};
use crate::models::blog_post::BlogPostSummary;

pub static SCHEMA: ListSchema = ListSchema {
    table: "blog_posts",
    columns: "id, title, slug, category, author, status, published_at, created_at",
    filterable: &["status", "category", "title", "content", "author", "created_at"],
    sortable: &["created_at", "published_at", "title"],
    numeric: &[],
    tiebreaker: "id",
};

const SEARCH_COLUMNS: &[&str] = &["title", "content", "author"];

/// Filters for listing blog posts.
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct BlogFilters {
    #[validate(length(max = 20))]
    pub status: Option<String>,
    #[validate(length(max = 50))]
    pub category: Option<String>,
    #[validate(length(max = 100))]
    pub search: Option<String>,
    #[validate(length(max = 10))]
    pub date_from: Option<String>,
    #[validate(length(max = 10))]
    pub date_to: Option<String>,
}

impl BlogFilters {
    pub fn filter_set(&self) -> FilterSet {
        let mut builder = QueryFilterBuilder::new(&SCHEMA);
        builder
            .add_if_present("status", FilterOperator::Equals, self.status.as_deref())
            .add_if_present("category", FilterOperator::Equals, self.category.as_deref())
            .add_any_of_if_present(SEARCH_COLUMNS, self.search.as_deref())
            .add_if_present("created_at", FilterOperator::DateOnOrAfter, self.date_from.as_deref())
            .add_if_present("created_at", FilterOperator::DateOnOrBefore, self.date_to.as_deref());
        builder.into_filter_set()
    }
}

/// List blog posts, newest first.
pub async fn list(
    pool: &PgPool,
    filters: &BlogFilters,
    page: PageRequest,
) -> Result<PageResult<BlogPostSummary>, AppError> {
    filters.validate()?;
    let source = PgSource::<BlogPostSummary>::new(pool.clone(), SCHEMA);
    let result = ListQueryExecutor::execute(
        &source,
        &filters.filter_set(),
        page,
        &OrderBy::desc("created_at"),
    )
    .await?;
    Ok(result)
}
