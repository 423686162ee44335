//! Filtered, paginated list queries shared by every admin list page.
//!
//! A page turns its raw query-string filters into a [`FilterSet`] with
//! [`QueryFilterBuilder`], then hands it to [`ListQueryExecutor`] together
//! with a [`PageRequest`] and an allow-listed [`OrderBy`]. The executor counts
//! and fetches against the same rendered predicates and returns a
//! [`PageResult`].

pub mod executor;
pub mod filter;
pub mod memory;
pub mod paginator;
pub mod pg;

use std::sync::OnceLock;

use regex::Regex;

pub use executor::{DataSource, Direction, ListQueryExecutor, OrderBy};
pub use filter::{BoundParameter, BuiltFilter, FilterValue, QueryFilterBuilder};
pub use memory::{FieldAccess, MemorySource};
pub use paginator::{PageMeta, PageRequest, PageResult, Paginator};
pub use pg::PgSource;

/// Static description of a listable table, owned by the page that lists it.
///
/// Only columns named here can be filtered or sorted on.
#[derive(Debug, Clone, Copy)]
pub struct ListSchema {
    pub table: &'static str,
    /// Column list used by the data query's SELECT.
    pub columns: &'static str,
    pub filterable: &'static [&'static str],
    pub sortable: &'static [&'static str],
    /// Filterable columns holding integers; equality values must parse as one.
    pub numeric: &'static [&'static str],
    /// Unique column appended to every ORDER BY so paging is deterministic.
    pub tiebreaker: &'static str,
}

impl ListSchema {
    pub fn is_filterable(&self, column: &str) -> bool {
        self.filterable.contains(&column) && is_identifier(column)
    }

    pub fn is_sortable(&self, column: &str) -> bool {
        self.sortable.contains(&column) && is_identifier(column)
    }

    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric.contains(&column)
    }
}

/// Comparison applied by a single-column predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equals,
    Contains,
    DateOnOrAfter,
    DateOnOrBefore,
}

/// One active filter condition.
///
/// Values are stored trimmed and non-empty; wildcard wrapping and date
/// parsing happen when the set is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPredicate {
    Equals { field: String, value: String },
    Contains { field: String, value: String },
    /// Substring match against any of several columns, sharing one parameter.
    ContainsAnyOf { fields: Vec<String>, value: String },
    DateOnOrAfter { field: String, value: String },
    DateOnOrBefore { field: String, value: String },
}

impl FilterPredicate {
    /// Columns this predicate touches.
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::Equals { field, .. }
            | Self::Contains { field, .. }
            | Self::DateOnOrAfter { field, .. }
            | Self::DateOnOrBefore { field, .. } => vec![field.as_str()],
            Self::ContainsAnyOf { fields, .. } => fields.iter().map(String::as_str).collect(),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Equals { value, .. }
            | Self::Contains { value, .. }
            | Self::ContainsAnyOf { value, .. }
            | Self::DateOnOrAfter { value, .. }
            | Self::DateOnOrBefore { value, .. } => value,
        }
    }
}

/// AND-joined predicates for one request, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    predicates: Vec<FilterPredicate>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: FilterPredicate) {
        self.predicates.push(predicate);
    }

    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Failure raised by a data source's count or select call.
#[derive(Debug, thiserror::Error)]
#[error("Data source error: {source}")]
pub struct DataSourceError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl DataSourceError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl From<sqlx::Error> for DataSourceError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(err)
    }
}

/// Errors produced while building or running a list query.
#[derive(Debug, thiserror::Error)]
pub enum ListQueryError {
    /// Caller misuse: unregistered column, bad page size, unlisted ordering.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A filter value supplied by the client could not be interpreted.
    #[error("Invalid value for filter '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}

impl ListQueryError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Plain SQL identifier: letters, digits and underscores, not starting with a digit.
pub(crate) fn is_identifier(name: &str) -> bool {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"))
        .is_match(name)
}
