//! PostgreSQL [`DataSource`] backed by an `sqlx` pool.

use std::marker::PhantomData;

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use super::executor::{DataSource, OrderBy};
use super::filter::{BuiltFilter, FilterValue};
use super::{DataSourceError, ListSchema};

/// Lists rows of `schema.table` as `T`.
#[derive(Debug, Clone)]
pub struct PgSource<T> {
    pool: PgPool,
    schema: ListSchema,
    _row: PhantomData<fn() -> T>,
}

impl<T> PgSource<T> {
    pub fn new(pool: PgPool, schema: ListSchema) -> Self {
        Self {
            pool,
            schema,
            _row: PhantomData,
        }
    }

    pub fn count_sql(&self, filter: &BuiltFilter) -> String {
        format!(
            "SELECT COUNT(*) FROM {} {}",
            self.schema.table,
            filter.where_sql()
        )
        .trim_end()
        .to_string()
    }

    /// `limit` and `offset` come from `Paginator` arithmetic, never from raw
    /// input, so they are written as literals.
    pub fn select_sql(&self, filter: &BuiltFilter, order: &OrderBy, limit: i64, offset: i64) -> String {
        let where_sql = filter.where_sql();
        let where_part = if where_sql.is_empty() {
            String::new()
        } else {
            format!(" {where_sql}")
        };
        format!(
            "SELECT {} FROM {}{where_part} ORDER BY {} LIMIT {limit} OFFSET {offset}",
            self.schema.columns,
            self.schema.table,
            order.to_sql(&self.schema),
        )
    }
}

// Binds every parameter in placeholder order; the same sequence serves the
// count and the data query.
macro_rules! bind_parameters {
    ($query:expr, $filter:expr) => {{
        let mut query = $query;
        for parameter in &$filter.parameters {
            query = match &parameter.value {
                FilterValue::Text(text) => query.bind(text.as_str()),
                FilterValue::Integer(number) => query.bind(*number),
                FilterValue::Date(date) => query.bind(*date),
            };
        }
        query
    }};
}

impl<T> DataSource for PgSource<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    type Row = T;

    fn schema(&self) -> &ListSchema {
        &self.schema
    }

    async fn count_matching(&self, filter: &BuiltFilter) -> Result<i64, DataSourceError> {
        let sql = self.count_sql(filter);
        let query = bind_parameters!(sqlx::query_scalar::<_, i64>(&sql), filter);
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn select_matching(
        &self,
        filter: &BuiltFilter,
        order: &OrderBy,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<T>, DataSourceError> {
        let sql = self.select_sql(filter, order, limit, offset);
        let query = bind_parameters!(sqlx::query_as::<_, T>(&sql), filter);
        Ok(query.fetch_all(&self.pool).await?)
    }
}
