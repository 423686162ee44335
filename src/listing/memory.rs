//! In-process [`DataSource`] over a vector of rows.
//!
//! Predicates are evaluated structurally from the [`BuiltFilter`]'s filter
//! set, with the same semantics the PostgreSQL rendering has: case-insensitive
//! literal substring matching, integer equality on numeric columns and date
//! comparison on the first ten characters of a column value.

use chrono::NaiveDate;

use super::executor::{DataSource, Direction, OrderBy};
use super::filter::{parse_date, BuiltFilter};
use super::{DataSourceError, FilterPredicate, ListSchema};

/// Column lookup for in-memory rows. Values are compared as text, so dates
/// should be ISO formatted and numeric ids zero-padded.
pub trait FieldAccess {
    fn field(&self, column: &str) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    schema: ListSchema,
    rows: Vec<T>,
}

impl<T> MemorySource<T>
where
    T: FieldAccess + Clone + Send + Sync,
{
    pub fn new(schema: ListSchema, rows: Vec<T>) -> Self {
        Self { schema, rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    fn matching(&self, filter: &BuiltFilter) -> Result<Vec<&T>, DataSourceError> {
        let mut out = Vec::new();
        for row in &self.rows {
            let mut keep = true;
            for predicate in filter.filters.predicates() {
                if !matches(&self.schema, row, predicate)? {
                    keep = false;
                    break;
                }
            }
            if keep {
                out.push(row);
            }
        }
        Ok(out)
    }
}

fn contains_ci(haystack: Option<String>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

fn row_date<T: FieldAccess>(row: &T, field: &str) -> Option<NaiveDate> {
    let value = row.field(field)?;
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn matches<T: FieldAccess>(
    schema: &ListSchema,
    row: &T,
    predicate: &FilterPredicate,
) -> Result<bool, DataSourceError> {
    let keep = match predicate {
        FilterPredicate::Equals { field, value } if schema.is_numeric(field) => {
            let wanted: i64 = value.trim().parse().map_err(DataSourceError::new)?;
            row.field(field)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .is_some_and(|v| v == wanted)
        }
        FilterPredicate::Equals { field, value } => row.field(field).as_deref() == Some(value.as_str()),
        FilterPredicate::Contains { field, value } => contains_ci(row.field(field), value),
        FilterPredicate::ContainsAnyOf { fields, value } => fields
            .iter()
            .any(|field| contains_ci(row.field(field), value)),
        FilterPredicate::DateOnOrAfter { field, value } => {
            let bound = parse_date(field, value).map_err(DataSourceError::new)?;
            row_date(row, field).is_some_and(|d| d >= bound)
        }
        FilterPredicate::DateOnOrBefore { field, value } => {
            let bound = parse_date(field, value).map_err(DataSourceError::new)?;
            row_date(row, field).is_some_and(|d| d <= bound)
        }
    };
    Ok(keep)
}

impl<T> DataSource for MemorySource<T>
where
    T: FieldAccess + Clone + Send + Sync,
{
    type Row = T;

    fn schema(&self) -> &ListSchema {
        &self.schema
    }

    async fn count_matching(&self, filter: &BuiltFilter) -> Result<i64, DataSourceError> {
        let count = self.matching(filter)?.len();
        i64::try_from(count).map_err(DataSourceError::new)
    }

    async fn select_matching(
        &self,
        filter: &BuiltFilter,
        order: &OrderBy,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<T>, DataSourceError> {
        let mut rows = self.matching(filter)?;
        let tiebreaker = self.schema.tiebreaker;
        rows.sort_by(|a, b| {
            let primary = a.field(order.column()).cmp(&b.field(order.column()));
            let ordering = primary.then_with(|| a.field(tiebreaker).cmp(&b.field(tiebreaker)));
            match order.direction() {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });

        let offset = usize::try_from(offset).map_err(DataSourceError::new)?;
        let limit = usize::try_from(limit).map_err(DataSourceError::new)?;
        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{FilterOperator, QueryFilterBuilder};

    static SCHEMA: ListSchema = ListSchema {
        table: "feedback",
        columns: "*",
        filterable: &["name", "email", "message", "status", "rating", "created_at"],
        sortable: &["created_at", "name"],
        numeric: &["rating"],
        tiebreaker: "id",
    };

    #[derive(Debug, Clone)]
    struct Row {
        id: u32,
        name: &'static str,
        message: &'static str,
        status: &'static str,
        rating: i32,
        created_at: &'static str,
    }

    impl FieldAccess for Row {
        fn field(&self, column: &str) -> Option<String> {
            match column {
                "id" => Some(format!("{:06}", self.id)),
                "name" => Some(self.name.to_string()),
                "email" => None,
                "message" => Some(self.message.to_string()),
                "status" => Some(self.status.to_string()),
                "rating" => Some(self.rating.to_string()),
                "created_at" => Some(self.created_at.to_string()),
                _ => None,
            }
        }
    }

    fn source() -> MemorySource<Row> {
        MemorySource::new(
            SCHEMA,
            vec![
                Row { id: 1, name: "Ada", message: "Loved the CAKE", status: "new", rating: 5, created_at: "2024-05-01 09:00:00" },
                Row { id: 2, name: "Bola", message: "Cold rice", status: "read", rating: 2, created_at: "2024-05-03 18:30:00" },
                Row { id: 3, name: "Chidi", message: "Great cupcake tower", status: "new", rating: 5, created_at: "2024-05-07 11:15:00" },
                Row { id: 4, name: "Dayo", message: "Late delivery", status: "new", rating: 1, created_at: "2024-05-07 20:00:00" },
            ],
        )
    }

    fn build(f: impl FnOnce(&mut QueryFilterBuilder<'_>)) -> BuiltFilter {
        let mut b = QueryFilterBuilder::new(&SCHEMA);
        f(&mut b);
        b.build().unwrap()
    }

    #[tokio::test]
    async fn any_of_matches_any_column_case_insensitively() {
        let src = source();
        let filter = build(|b| {
            b.add_any_of_if_present(&["name", "email", "message"], Some("cake"));
        });
        let rows = src
            .select_matching(&filter, &OrderBy::asc("name"), 10, 0)
            .await
            .unwrap();
        let ids: Vec<u32> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn like_wildcards_in_search_are_literal() {
        let src = source();
        let filter = build(|b| {
            b.add_any_of_if_present(&["name", "message"], Some("c_ke"));
        });
        assert_eq!(src.count_matching(&filter).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn numeric_equality_compares_integers() {
        let src = source();
        let filter = build(|b| {
            b.add_if_present("rating", FilterOperator::Equals, Some("05"));
        });
        let rows = src
            .select_matching(&filter, &OrderBy::asc("name"), 10, 0)
            .await
            .unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn date_range_is_inclusive_by_day() {
        let src = source();
        let filter = build(|b| {
            b.add_if_present("created_at", FilterOperator::DateOnOrAfter, Some("2024-05-03"))
                .add_if_present("created_at", FilterOperator::DateOnOrBefore, Some("2024-05-07"));
        });
        assert_eq!(src.count_matching(&filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn sorts_with_tiebreaker_and_pages() {
        let src = source();
        let filter = build(|b| {
            b.add_if_present("status", FilterOperator::Equals, Some("new"));
        });
        let order = OrderBy::desc("created_at");
        let first = src.select_matching(&filter, &order, 2, 0).await.unwrap();
        let second = src.select_matching(&filter, &order, 2, 2).await.unwrap();
        assert_eq!(first.iter().map(|r| r.id).collect::<Vec<_>>(), vec![4, 3]);
        assert_eq!(second.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    }

    #[tokio::test]
    async fn offset_past_end_is_empty() {
        let src = source();
        let filter = build(|_| {});
        let rows = src
            .select_matching(&filter, &OrderBy::asc("name"), 10, 40)
            .await
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(src.rows().len(), 4);
    }
}
