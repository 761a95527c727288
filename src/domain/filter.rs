// src/domain/filter.rs

use std::fmt;

use thiserror::Error;

use crate::domain::fields::{FieldDescriptor, FieldKind};

/// Comparison operators a user may put in front of a filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
}

impl Operator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::Like => "LIKE",
        }
    }

    fn allowed_for(self, kind: FieldKind) -> bool {
        match (self, kind) {
            (Operator::Like, FieldKind::Text) => true,
            (Operator::Like, _) => false,
            (Operator::Eq | Operator::NotEq, FieldKind::Boolean) => true,
            (_, FieldKind::Boolean) => false,
            _ => true,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "a whole number",
            FieldKind::Decimal => "a number",
            FieldKind::Text => "text",
            FieldKind::Boolean => "true or false",
        };
        f.write_str(name)
    }
}

/// A typed value taken from user input. Always bound as a statement
/// parameter, never spliced into the statement text.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Boolean(bool),
}

impl FilterValue {
    /// Renders the value as a SQL literal for display.
    pub fn to_sql_literal(&self) -> String {
        match self {
            FilterValue::Integer(v) => v.to_string(),
            FilterValue::Decimal(v) => v.to_string(),
            FilterValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            FilterValue::Boolean(b) => String::from(if *b { "1" } else { "0" }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("a value is required after the operator")]
    EmptyValue,

    #[error("unknown operator '{0}' (use =, !=, <, <=, >, >= or LIKE)")]
    UnknownOperator(String),

    #[error("unexpected '{found}' after '{operator}'")]
    UnexpectedAfterOperator { operator: String, found: String },

    #[error("'{value}' is not {kind}")]
    InvalidValue { kind: FieldKind, value: String },

    #[error("operator {operator} cannot be used with {kind}")]
    OperatorNotAllowed { operator: Operator, kind: FieldKind },

    #[error("'{0}' is not a searchable column")]
    UnknownColumn(String),
}

/// One parsed `<column> <operator> <value>` term of a WHERE clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: &'static str,
    pub operator: Operator,
    pub value: FilterValue,
}

impl Condition {
    /// Parses `[operator] value` for the given field. A missing operator
    /// means equality.
    pub fn parse(field: &FieldDescriptor, expression: &str) -> Result<Self, FilterError> {
        let (operator, rest) = split_operator(expression.trim());
        let rest = rest.trim();

        if let Some(junk) = leading_operator_chars(rest) {
            let trimmed = expression.trim();
            let op_text = trimmed[..trimmed.len() - rest.len()].trim();
            return Err(if op_text.is_empty() {
                FilterError::UnknownOperator(junk.to_string())
            } else {
                FilterError::UnexpectedAfterOperator {
                    operator: op_text.to_string(),
                    found: junk.to_string(),
                }
            });
        }
        if rest.is_empty() {
            return Err(FilterError::EmptyValue);
        }
        if !operator.allowed_for(field.kind) {
            return Err(FilterError::OperatorNotAllowed {
                operator,
                kind: field.kind,
            });
        }

        Ok(Self {
            column: field.column,
            operator,
            value: parse_value(field.kind, rest)?,
        })
    }

    /// `<column> <op> ?<index>`, the form sent to the database.
    pub fn to_placeholder_sql(&self, index: usize) -> String {
        format!("{} {} ?{index}", self.column, self.operator.as_sql())
    }

    /// `<column> <op> <literal>`, the form shown to the user.
    pub fn to_display_sql(&self) -> String {
        format!(
            "{} {} {}",
            self.column,
            self.operator.as_sql(),
            self.value.to_sql_literal()
        )
    }
}

/// Longest operators first so `>=` is not read as `>`.
const SYMBOL_OPERATORS: [(&str, Operator); 8] = [
    (">=", Operator::GtEq),
    ("<=", Operator::LtEq),
    ("<>", Operator::NotEq),
    ("!=", Operator::NotEq),
    ("==", Operator::Eq),
    ("=", Operator::Eq),
    (">", Operator::Gt),
    ("<", Operator::Lt),
];

fn split_operator(input: &str) -> (Operator, &str) {
    for (symbol, op) in SYMBOL_OPERATORS {
        if let Some(rest) = input.strip_prefix(symbol) {
            return (op, rest);
        }
    }

    if input.get(..4).is_some_and(|head| head.eq_ignore_ascii_case("like")) {
        let rest = &input[4..];
        if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '\'' || c == '"') {
            return (Operator::Like, rest);
        }
    }

    (Operator::Eq, input)
}

fn leading_operator_chars(rest: &str) -> Option<&str> {
    let end = rest
        .find(|c: char| !matches!(c, '<' | '>' | '=' | '!' | '~'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

fn parse_value(kind: FieldKind, raw: &str) -> Result<FilterValue, FilterError> {
    let invalid = || FilterError::InvalidValue {
        kind,
        value: raw.to_string(),
    };

    match kind {
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(FilterValue::Integer)
            .map_err(|_| invalid()),
        FieldKind::Decimal => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FilterValue::Decimal)
            .ok_or_else(invalid),
        FieldKind::Text => Ok(FilterValue::Text(unquote(raw))),
        FieldKind::Boolean => match unquote(raw).to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(FilterValue::Boolean(true)),
            "false" | "no" | "n" | "0" => Ok(FilterValue::Boolean(false)),
            _ => Err(invalid()),
        },
    }
}

/// Strips one pair of surrounding quotes. Doubled single quotes inside a
/// single-quoted literal collapse to one.
fn unquote(raw: &str) -> String {
    if raw.len() >= 2 {
        if let Some(inner) = raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
            return inner.replace("''", "'");
        }
        if let Some(inner) = raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            return inner.to_string();
        }
    }
    raw.to_string()
}
