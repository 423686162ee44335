//! Reviews moderation page.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::listing::{
    FilterOperator, FilterSet, ListQueryExecutor, ListSchema, OrderBy, PageRequest, PageResult,
    PgSource, QueryFilterBuilder,
};
use crate::models::review::ReviewSummary;

pub static SCHEMA: ListSchema = ListSchema {
    table: "reviews",
    columns: "id, customer_name, menu_item, rating, comment, status, created_at",
    filterable: &["status", "rating", "customer_name", "comment", "menu_item"],
    sortable: &["created_at", "rating"],
    numeric: &["rating"],
    tiebreaker: "id",
};

const SEARCH_COLUMNS: &[&str] = &["customer_name", "comment", "menu_item"];

#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct ReviewFilters {
    #[validate(length(max = 20))]
    pub status: Option<String>,
    #[validate(length(max = 3))]
    pub rating: Option<String>,
    #[validate(length(max = 100))]
    pub search: Option<String>,
}

impl ReviewFilters {
    pub fn filter_set(&self) -> FilterSet {
        let mut builder = QueryFilterBuilder::new(&SCHEMA);
        builder
            .add_if_present("status", FilterOperator::Equals, self.status.as_deref())
            .add_if_present("rating", FilterOperator::Equals, self.rating.as_deref())
            .add_any_of_if_present(SEARCH_COLUMNS, self.search.as_deref());
        builder.into_filter_set()
    }
}

pub async fn list(
    pool: &PgPool,
    filters: &ReviewFilters,
    page: PageRequest,
) -> Result<PageResult<ReviewSummary>, AppError> {
    filters.validate()?;
    let source = PgSource::<ReviewSummary>::new(pool.clone(), SCHEMA);
    Ok(ListQueryExecutor::execute(
        &source,
        &filters.filter_set(),
        page,
        &OrderBy::desc("created_at"),
    )
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::filter::render;

    #[test]
    fn pending_low_ratings() {
        let filters = ReviewFilters {
            status: Some("pending".into()),
            rating: Some("1".into()),
            search: Some("suya".into()),
        };
        let built = render(&filters.filter_set(), &SCHEMA).unwrap();
        assert_eq!(
            built.where_clause,
            "status = $1 AND rating = $2 \
             AND (customer_name ILIKE $3 OR comment ILIKE $3 OR menu_item ILIKE $3)"
        );
        assert_eq!(built.parameters.len(), 3);
    }

    #[test]
    fn no_filters() {
        let built = render(&ReviewFilters::default().filter_set(), &SCHEMA).unwrap();
        assert_eq!(built.where_sql(), "");
    }
}
