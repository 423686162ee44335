//! Predicate composition and WHERE-clause rendering.

use chrono::NaiveDate;
use serde::Serialize;

use super::{FilterOperator, FilterPredicate, FilterSet, ListQueryError, ListSchema};

/// Equality filters carrying this value (any case) are treated as absent.
const ALL_SENTINEL: &str = "all";

/// Typed value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
}

/// A bound parameter with its synthetic, set-unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundParameter {
    pub name: String,
    pub value: FilterValue,
}

/// Rendered form of a [`FilterSet`].
///
/// `where_clause` holds only placeholder tokens (`$1`, `$2`, ...); the values
/// live in `parameters`, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFilter {
    pub where_clause: String,
    pub parameters: Vec<BoundParameter>,
    pub filters: FilterSet,
}

impl BuiltFilter {
    /// `WHERE ...` ready to splice after a FROM, or empty when nothing is active.
    pub fn where_sql(&self) -> String {
        if self.where_clause.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.where_clause)
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&FilterValue> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    pub fn is_empty(&self) -> bool {
        self.where_clause.is_empty()
    }
}

/// Collects optional raw filter inputs into a [`FilterSet`].
///
/// Adding never fails; column names are checked against the schema when the
/// set is rendered, so a misspelt column surfaces as a
/// [`ListQueryError::Configuration`] instead of an unfiltered query.
#[derive(Debug, Clone)]
pub struct QueryFilterBuilder<'s> {
    schema: &'s ListSchema,
    filters: FilterSet,
}

impl<'s> QueryFilterBuilder<'s> {
    pub fn new(schema: &'s ListSchema) -> Self {
        Self {
            schema,
            filters: FilterSet::new(),
        }
    }

    /// Append a single-column predicate unless `raw` is missing or blank.
    pub fn add_if_present(
        &mut self,
        field: &str,
        operator: FilterOperator,
        raw: Option<&str>,
    ) -> &mut Self {
        let Some(value) = present(raw) else {
            return self;
        };
        if operator == FilterOperator::Equals && value.eq_ignore_ascii_case(ALL_SENTINEL) {
            return self;
        }

        let field = field.to_string();
        let predicate = match operator {
            FilterOperator::Equals => FilterPredicate::Equals { field, value },
            FilterOperator::Contains => FilterPredicate::Contains { field, value },
            FilterOperator::DateOnOrAfter => FilterPredicate::DateOnOrAfter { field, value },
            FilterOperator::DateOnOrBefore => FilterPredicate::DateOnOrBefore { field, value },
        };
        self.filters.push(predicate);
        self
    }

    /// Append a multi-column substring search unless `raw` is missing or blank.
    pub fn add_any_of_if_present(&mut self, fields: &[&str], raw: Option<&str>) -> &mut Self {
        if let Some(value) = present(raw) {
            self.filters.push(FilterPredicate::ContainsAnyOf {
                fields: fields.iter().map(|f| f.to_string()).collect(),
                value,
            });
        }
        self
    }

    pub fn filter_set(&self) -> &FilterSet {
        &self.filters
    }

    pub fn into_filter_set(self) -> FilterSet {
        self.filters
    }

    pub fn build(&self) -> Result<BuiltFilter, ListQueryError> {
        render(&self.filters, self.schema)
    }
}

fn present(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Render a filter set against a schema's allow-list.
pub fn render(filters: &FilterSet, schema: &ListSchema) -> Result<BuiltFilter, ListQueryError> {
    let mut conditions: Vec<String> = Vec::with_capacity(filters.len());
    let mut parameters: Vec<BoundParameter> = Vec::with_capacity(filters.len());

    for predicate in filters.predicates() {
        let fields = predicate.fields();
        if fields.is_empty() {
            return Err(ListQueryError::Configuration(format!(
                "filter on table '{}' names no columns",
                schema.table
            )));
        }
        if let Some(unknown) = fields.iter().find(|f| !schema.is_filterable(f)) {
            return Err(ListQueryError::Configuration(format!(
                "column '{unknown}' is not filterable on table '{}'",
                schema.table
            )));
        }
        if predicate.value().trim().is_empty() {
            return Err(ListQueryError::Configuration(format!(
                "blank filter value on '{}' of table '{}'",
                fields.join(", "),
                schema.table
            )));
        }

        let index = parameters.len() + 1;
        let placeholder = format!("${index}");

        let (condition, value) = match predicate {
            FilterPredicate::Equals { field, value } if schema.is_numeric(field) => (
                format!("{field} = {placeholder}"),
                FilterValue::Integer(parse_integer(field, value)?),
            ),
            FilterPredicate::Equals { field, value } => {
                (format!("{field} = {placeholder}"), FilterValue::Text(value.clone()))
            }
            FilterPredicate::Contains { field, value } => (
                format!("{field} ILIKE {placeholder}"),
                FilterValue::Text(like_pattern(value)),
            ),
            FilterPredicate::ContainsAnyOf { fields, value } => {
                let alternatives: Vec<String> = fields
                    .iter()
                    .map(|f| format!("{f} ILIKE {placeholder}"))
                    .collect();
                (
                    format!("({})", alternatives.join(" OR ")),
                    FilterValue::Text(like_pattern(value)),
                )
            }
            FilterPredicate::DateOnOrAfter { field, value } => (
                format!("{field}::date >= {placeholder}"),
                FilterValue::Date(parse_date(field, value)?),
            ),
            FilterPredicate::DateOnOrBefore { field, value } => (
                format!("{field}::date <= {placeholder}"),
                FilterValue::Date(parse_date(field, value)?),
            ),
        };

        conditions.push(condition);
        parameters.push(BoundParameter {
            name: format!("p{index}"),
            value,
        });
    }

    Ok(BuiltFilter {
        where_clause: conditions.join(" AND "),
        parameters,
        filters: filters.clone(),
    })
}

/// Substring pattern for ILIKE. Backslash is PostgreSQL's default LIKE
/// escape, so `%`, `_` and `\` in user text match literally.
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ListQueryError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ListQueryError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_integer(field: &str, value: &str) -> Result<i64, ListQueryError> {
    value.parse().map_err(|_| ListQueryError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}
