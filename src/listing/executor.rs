//! Count-then-fetch orchestration over a [`DataSource`].

use std::future::Future;

use serde::Serialize;

use super::filter::{render, BuiltFilter};
use super::paginator::{PageRequest, PageResult, Paginator};
use super::{is_identifier, DataSourceError, FilterSet, ListQueryError, ListSchema};

/// Anything that can count and fetch rows of one table under a rendered filter.
pub trait DataSource: Sync {
    type Row: Send;

    fn schema(&self) -> &ListSchema;

    fn count_matching(
        &self,
        filter: &BuiltFilter,
    ) -> impl Future<Output = Result<i64, DataSourceError>> + Send;

    fn select_matching(
        &self,
        filter: &BuiltFilter,
        order: &OrderBy,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<Vec<Self::Row>, DataSourceError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse a query-string direction; anything other than asc/desc is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Sort column and direction. The column is checked against the source's
/// sortable allow-list before any query runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    column: String,
    direction: Direction,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Desc)
    }

    /// Ordering picked from query-string input. A sort key outside the
    /// schema's allow-list falls back to `default`; a bad direction keeps the
    /// default's direction.
    pub fn from_query(
        sort: Option<&str>,
        dir: Option<&str>,
        schema: &ListSchema,
        default: OrderBy,
    ) -> OrderBy {
        let column = match sort.map(str::trim) {
            Some(s) if schema.is_sortable(s) => s.to_string(),
            _ => default.column,
        };
        let direction = dir
            .and_then(Direction::parse)
            .unwrap_or(default.direction);
        OrderBy { column, direction }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn validate(&self, schema: &ListSchema) -> Result<(), ListQueryError> {
        if schema.is_sortable(&self.column) {
            Ok(())
        } else {
            Err(ListQueryError::Configuration(format!(
                "column '{}' is not sortable on table '{}'",
                self.column, schema.table
            )))
        }
    }

    /// ORDER BY body (without the keywords), with the schema's tiebreaker appended.
    pub fn to_sql(&self, schema: &ListSchema) -> String {
        let dir = self.direction.as_sql();
        if self.column == schema.tiebreaker || !is_identifier(schema.tiebreaker) {
            format!("{} {dir}", self.column)
        } else {
            format!("{} {dir}, {} {dir}", self.column, schema.tiebreaker)
        }
    }
}

pub struct ListQueryExecutor;

impl ListQueryExecutor {
    /// Count and fetch one page under the same rendered predicates.
    ///
    /// The two queries run sequentially without a transaction; any failure
    /// fails the whole call.
    pub async fn execute<S: DataSource>(
        source: &S,
        filters: &FilterSet,
        page: PageRequest,
        order: &OrderBy,
    ) -> Result<PageResult<S::Row>, ListQueryError> {
        let schema = source.schema();
        order.validate(schema)?;
        let built = render(filters, schema)?;

        let total = source.count_matching(&built).await?;
        let meta = Paginator::paginate(total, &page)?;

        let items = source
            .select_matching(&built, order, meta.limit(), meta.offset)
            .await?;

        tracing::debug!(
            table = schema.table,
            predicates = built.parameters.len(),
            page = meta.current_page,
            total_items = meta.total_items,
            returned = items.len(),
            "List query executed"
        );

        Ok(PageResult::new(items, &meta))
    }
}
