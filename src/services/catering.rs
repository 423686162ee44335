//! Catering requests page: enquiries filtered by status, event type, contact
//! details and event date.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::listing::{
    FilterOperator, FilterSet, ListQueryExecutor, ListSchema, OrderBy, PageRequest, PageResult,
    PgSource, QueryFilterBuilder,
};
use crate::models::catering_request::CateringRequestSummary;

pub static SCHEMA: ListSchema = ListSchema {
    table: "catering_requests",
    columns: "id, contact_name, email, phone, event_type, event_date, guest_count, status, created_at",
    filterable: &["status", "event_type", "contact_name", "email", "phone", "event_date"],
    sortable: &["created_at", "event_date", "guest_count"],
    numeric: &[],
    tiebreaker: "id",
};

const SEARCH_COLUMNS: &[&str] = &["contact_name", "email", "phone"];

/// Filters for listing catering requests. The date range applies to the event
/// date, not the submission date.
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct CateringFilters {
    #[validate(length(max = 20))]
    pub status: Option<String>,
    #[validate(length(max = 50))]
    pub event_type: Option<String>,
    #[validate(length(max = 100))]
    pub search: Option<String>,
    #[validate(length(max = 10))]
    pub date_from: Option<String>,
    #[validate(length(max = 10))]
    pub date_to: Option<String>,
}

impl CateringFilters {
    pub fn filter_set(&self) -> FilterSet {
        let mut builder = QueryFilterBuilder::new(&SCHEMA);
        builder
            .add_if_present("status", FilterOperator::Equals, self.status.as_deref())
            .add_if_present("event_type", FilterOperator::Equals, self.event_type.as_deref())
            .add_any_of_if_present(SEARCH_COLUMNS, self.search.as_deref())
            .add_if_present("event_date", FilterOperator::DateOnOrAfter, self.date_from.as_deref())
            .add_if_present("event_date", FilterOperator::DateOnOrBefore, self.date_to.as_deref());
        builder.into_filter_set()
    }
}

/// List catering requests, most recently submitted first.
pub async fn list(
    pool: &PgPool,
    filters: &CateringFilters,
    page: PageRequest,
) -> Result<PageResult<CateringRequestSummary>, AppError> {
    filters.validate()?;
    let source = PgSource::<CateringRequestSummary>::new(pool.clone(), SCHEMA);
    Ok(ListQueryExecutor::execute(
        &source,
        &filters.filter_set(),
        page,
        &OrderBy::desc("created_at"),
    )
    .await?)
}
