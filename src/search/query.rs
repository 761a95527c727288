// src/search/query.rs

use std::fmt;

use crate::domain::fields::{field_by_column, FIELDS, PROPERTY_TABLE};
use crate::domain::filter::{Condition, FilterError, FilterValue};

/// A non-blank prompt answer, still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFilter {
    pub column: &'static str,
    pub expression: String,
}

impl RawFilter {
    pub fn new(column: &'static str, expression: impl Into<String>) -> Self {
        Self {
            column,
            expression: expression.into(),
        }
    }
}

/// A search over the `Property` table: the fixed projection plus an AND of
/// conditions in prompt order.
///
/// `sql()` is what gets executed, with one `?N` placeholder per condition.
/// `Display` renders the same query with values written out as literals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyQuery {
    conditions: Vec<Condition>,
}

impl PropertyQuery {
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Values to bind, in placeholder order.
    pub fn params(&self) -> Vec<&FilterValue> {
        self.conditions.iter().map(|c| &c.value).collect()
    }

    /// Statement text with placeholders.
    pub fn sql(&self) -> String {
        let terms: Vec<String> = self
            .conditions
            .iter()
            .enumerate()
            .map(|(i, c)| c.to_placeholder_sql(i + 1))
            .collect();
        with_where(&terms)
    }
}

impl fmt::Display for PropertyQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self.conditions.iter().map(Condition::to_display_sql).collect();
        f.write_str(&with_where(&terms))
    }
}

/// Comma-separated column list shared by every search.
pub fn projection() -> String {
    FIELDS.iter().map(|f| f.column).collect::<Vec<_>>().join(", ")
}

fn with_where(terms: &[String]) -> String {
    let mut sql = format!("SELECT {} FROM {PROPERTY_TABLE}", projection());
    if !terms.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&terms.join(" AND "));
    }
    sql
}

/// Parses every raw filter and combines them into one query.
pub fn build_query(filters: &[RawFilter]) -> Result<PropertyQuery, FilterError> {
    let conditions = filters
        .iter()
        .map(|raw| {
            let field = field_by_column(raw.column)
                .ok_or_else(|| FilterError::UnknownColumn(raw.column.to_string()))?;
            Condition::parse(field, &raw.expression)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(conditions = conditions.len(), "built property query");
    Ok(PropertyQuery { conditions })
}
