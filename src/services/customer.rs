//! Customers page: accounts filtered by status, contact details and signup date.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::listing::{
    FilterOperator, FilterSet, ListQueryExecutor, ListSchema, OrderBy, PageRequest, PageResult,
    PgSource, QueryFilterBuilder,
};
use crate::models::customer::CustomerSummary;

pub static SCHEMA: ListSchema = ListSchema {
    table: "customers",
    columns: "id, full_name, email, phone, status, order_count, created_at",
    filterable: &["status", "full_name", "email", "phone", "created_at"],
    sortable: &["created_at", "full_name", "order_count"],
    numeric: &[],
    tiebreaker: "id",
};

const SEARCH_COLUMNS: &[&str] = &["full_name", "email", "phone"];

/// Filters and sort keys for listing customers.
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct CustomerFilters {
    #[validate(length(max = 20))]
    pub status: Option<String>,
    #[validate(length(max = 100))]
    pub search: Option<String>,
    #[validate(length(max = 10))]
    pub date_from: Option<String>,
    #[validate(length(max = 10))]
    pub date_to: Option<String>,
    #[validate(length(max = 30))]
    pub sort: Option<String>,
    #[validate(length(max = 4))]
    pub dir: Option<String>,
}

impl CustomerFilters {
    pub fn filter_set(&self) -> FilterSet {
        let mut builder = QueryFilterBuilder::new(&SCHEMA);
        builder
            .add_if_present("status", FilterOperator::Equals, self.status.as_deref())
            .add_any_of_if_present(SEARCH_COLUMNS, self.search.as_deref())
            .add_if_present("created_at", FilterOperator::DateOnOrAfter, self.date_from.as_deref())
            .add_if_present("created_at", FilterOperator::DateOnOrBefore, self.date_to.as_deref());
        builder.into_filter_set()
    }

    /// Newest signups first unless the client picked an allow-listed column.
    pub fn order(&self) -> OrderBy {
        OrderBy::from_query(
            self.sort.as_deref(),
            self.dir.as_deref(),
            &SCHEMA,
            OrderBy::desc("created_at"),
        )
    }
}

pub async fn list(
    pool: &PgPool,
    filters: &CustomerFilters,
    page: PageRequest,
) -> Result<PageResult<CustomerSummary>, AppError> {
    filters.validate()?;
    let source = PgSource::<CustomerSummary>::new(pool.clone(), SCHEMA);
    Ok(ListQueryExecutor::execute(&source, &filters.filter_set(), page, &filters.order()).await?)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::listing::{Direction, FieldAccess, MemorySource};

    impl FieldAccess for CustomerSummary {
        fn field(&self, column: &str) -> Option<String> {
            match column {
                "id" => Some(self.id.to_string()),
                "full_name" => Some(self.full_name.clone()),
                "email" => Some(self.email.clone()),
                "phone" => self.phone.clone(),
                "status" => Some(self.status.clone()),
                "order_count" => Some(format!("{:08}", self.order_count)),
                "created_at" => Some(self.created_at.to_rfc3339()),
                _ => None,
            }
        }
    }

    fn customer(name: &str, orders: i32, status: &str) -> CustomerSummary {
        CustomerSummary {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: Some("+234 800 000 0000".to_string()),
            status: status.to_string(),
            order_count: orders,
            created_at: Utc.with_ymd_and_hms(2023, 11, 2, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn order_defaults_and_overrides() {
        let default = CustomerFilters::default().order();
        assert_eq!(default, OrderBy::desc("created_at"));

        let by_orders = CustomerFilters {
            sort: Some("order_count".into()),
            dir: Some("asc".into()),
            ..Default::default()
        }
        .order();
        assert_eq!(by_orders.column(), "order_count");
        assert_eq!(by_orders.direction(), Direction::Asc);

        let injected = CustomerFilters {
            sort: Some("password_hash".into()),
            ..Default::default()
        }
        .order();
        assert_eq!(injected, OrderBy::desc("created_at"));
    }

    #[tokio::test]
    async fn sorted_by_order_count() {
        let source = MemorySource::new(
            SCHEMA,
            vec![
                customer("Amaka Obi", 3, "active"),
                customer("Bayo Ade", 12, "active"),
                customer("Chinwe Eze", 7, "suspended"),
            ],
        );
        let filters = CustomerFilters {
            status: Some("active".into()),
            sort: Some("order_count".into()),
            dir: Some("desc".into()),
            ..Default::default()
        };
        let result =
            ListQueryExecutor::execute(&source, &filters.filter_set(), PageRequest::new(1, 10).unwrap(), &filters.order())
                .await
                .unwrap();
        let names: Vec<&str> = result.items.iter().map(|c| c.full_name.as_str()).collect();
        assert_eq!(names, vec!["Bayo Ade", "Amaka Obi"]);
    }
}
