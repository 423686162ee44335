//! Orders page: orders filtered by fulfilment and payment status, customer
//! details and order date.

use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::errors::AppError;
use crate::listing::{
    FilterOperator, FilterSet, ListQueryExecutor, ListSchema, OrderBy, PageRequest, PageResult,
    PgSource, QueryFilterBuilder,
};
use crate::models::order::OrderSummary;

pub static SCHEMA: ListSchema = ListSchema {
    table: "orders",
    columns: "id, order_number, customer_name, customer_email, total_amount_minor, status, \
              payment_status, created_at",
    filterable: &[
        "status",
        "payment_status",
        "order_number",
        "customer_name",
        "customer_email",
        "created_at",
    ],
    sortable: &["created_at", "total_amount_minor", "order_number"],
    numeric: &[],
    tiebreaker: "id",
};

const SEARCH_COLUMNS: &[&str] = &["order_number", "customer_name", "customer_email"];

/// Filters and sort keys for listing orders.
#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct OrderFilters {
    #[validate(length(max = 20))]
    pub status: Option<String>,
    #[validate(length(max = 20))]
    pub payment_status: Option<String>,
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

impl OrderFilters {
    pub fn filter_set(&self) -> FilterSet {
        let mut builder = QueryFilterBuilder::new(&SCHEMA);
        builder
            .add_if_present("status", FilterOperator::Equals, self.status.as_deref())
            .add_if_present(
                "payment_status",
                FilterOperator::Equals,
                self.payment_status.as_deref(),
            )
            .add_any_of_if_present(SEARCH_COLUMNS, self.search.as_deref())
            .add_if_present("created_at", FilterOperator::DateOnOrAfter, self.date_from.as_deref())
            .add_if_present("created_at", FilterOperator::DateOnOrBefore, self.date_to.as_deref());
        builder.into_filter_set()
    }

    pub fn order(&self) -> OrderBy {
        OrderBy::from_query(
            self.sort.as_deref(),
            self.dir.as_deref(),
            &SCHEMA,
            OrderBy::desc("created_at"),
        )
    }
}

/// List orders, newest first by default.
pub async fn list(
    pool: &PgPool,
    filters: &OrderFilters,
    page: PageRequest,
) -> Result<PageResult<OrderSummary>, AppError> {
    filters.validate()?;
    let source = PgSource::<OrderSummary>::new(pool.clone(), SCHEMA);
    Ok(ListQueryExecutor::execute(&source, &filters.filter_set(), page, &filters.order()).await?)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::listing::filter::render;
    use crate::listing::{FieldAccess, MemorySource};

    impl FieldAccess for OrderSummary {
        fn field(&self, column: &str) -> Option<String> {
            match column {
                "id" => Some(self.id.to_string()),
                "order_number" => Some(self.order_number.clone()),
                "customer_name" => Some(self.customer_name.clone()),
                "customer_email" => Some(self.customer_email.clone()),
                "total_amount_minor" => Some(format!("{:012}", self.total_amount_minor)),
                "status" => Some(self.status.clone()),
                "payment_status" => Some(self.payment_status.clone()),
                "created_at" => Some(self.created_at.to_rfc3339()),
                _ => None,
            }
        }
    }

    fn order(number: u32, status: &str, payment: &str, day: u32) -> OrderSummary {
        OrderSummary {
            id: Uuid::new_v4(),
            order_number: format!("ORD-{number:05}"),
            customer_name: "Kemi Lawal".to_string(),
            customer_email: "kemi@example.com".to_string(),
            total_amount_minor: 1_250_000,
            status: status.to_string(),
            payment_status: payment.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 7, day, 13, 30, 0).unwrap(),
        }
    }

    #[test]
    fn status_all_is_ignored_but_payment_kept() {
        let filters = OrderFilters {
            status: Some("all".into()),
            payment_status: Some("unpaid".into()),
            ..Default::default()
        };
        let built = render(&filters.filter_set(), &SCHEMA).unwrap();
        assert_eq!(built.where_clause, "payment_status = $1");
    }

    #[tokio::test]
    async fn unpaid_orders_in_july_window() {
        let source = MemorySource::new(
            SCHEMA,
            vec![
                order(1, "pending", "unpaid", 1),
                order(2, "delivered", "paid", 2),
                order(3, "preparing", "unpaid", 9),
                order(4, "cancelled", "unpaid", 20),
            ],
        );
        let filters = OrderFilters {
            payment_status: Some("unpaid".into()),
            date_from: Some("2024-07-01".into()),
            date_to: Some("2024-07-10".into()),
            ..Default::default()
        };
        let result = ListQueryExecutor::execute(
            &source,
            &filters.filter_set(),
            PageRequest::new(1, 10).unwrap(),
            &filters.order(),
        )
        .await
        .unwrap();
        let numbers: Vec<&str> = result.items.iter().map(|o| o.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["ORD-00003", "ORD-00001"]);
    }

    #[tokio::test]
    async fn search_by_order_number() {
        let source = MemorySource::new(SCHEMA, (1..=30).map(|n| order(n, "pending", "paid", 5)).collect());
        let filters = OrderFilters {
            search: Some("ord-0001".into()),
            ..Default::default()
        };
        let result = ListQueryExecutor::execute(
            &source,
            &filters.filter_set(),
            PageRequest::new(1, 10).unwrap(),
            &filters.order(),
        )
        .await
        .unwrap();
        // ORD-00010 .. ORD-00019
        assert_eq!(result.total_items, 10);
        assert_eq!(result.total_pages, 1);
    }
}
