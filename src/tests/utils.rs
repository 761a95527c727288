use std::cell::RefCell;
use std::cmp::Ordering;
use std::io::Cursor;

use crate::db::connection::{init_db, Database};
use crate::db::PropertyStore;
use crate::domain::fields::FIELDS;
use crate::domain::filter::{Condition, FilterValue, Operator};
use crate::domain::property::PropertyRecord;
use crate::errors::{AppError, AppResult};
use crate::search::query::PropertyQuery;
use crate::search::session::{Session, SessionOptions};

/// In-memory SQLite loaded with `sql/sample_properties.sql`.
pub fn sample_db() -> Database {
    let db = Database::open_in_memory().expect("in-memory DB");
    init_db(&db, "sql/sample_properties.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

/// Fake store that evaluates filters in memory and remembers what it ran.
pub struct MemoryStore {
    records: Vec<PropertyRecord>,
    pub executed: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self {
            records,
            executed: RefCell::new(Vec::new()),
        }
    }
}

impl PropertyStore for MemoryStore {
    fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn for_each_property(
        &self,
        query: &PropertyQuery,
        visit: &mut dyn FnMut(PropertyRecord) -> AppResult<()>,
    ) -> AppResult<usize> {
        self.executed.borrow_mut().push(query.to_string());

        let mut count = 0;
        for record in &self.records {
            if query.conditions().iter().all(|c| condition_matches(c, record)) {
                visit(record.clone())?;
                count += 1;
            }
        }
        Ok(count)
    }
}

/// The value stored under a `Property` column name.
pub fn column_value(record: &PropertyRecord, column: &str) -> Option<FilterValue> {
    let value = match column {
        "SquareFootage" => FilterValue::Integer(record.square_footage),
        "Lighting" => FilterValue::Text(record.lighting.clone()),
        "Price" => FilterValue::Decimal(record.price),
        "Rooms" => FilterValue::Integer(record.rooms),
        "Bathrooms" => FilterValue::Integer(record.bathrooms),
        "Latitude" => FilterValue::Decimal(record.latitude),
        "Longitude" => FilterValue::Decimal(record.longitude),
        "Description" => FilterValue::Text(record.description.clone()),
        "Yard" => FilterValue::Boolean(record.yard),
        "Garage" => FilterValue::Boolean(record.garage),
        "Pool" => FilterValue::Boolean(record.pool),
        _ => return None,
    };
    Some(value)
}

/// Evaluates a condition against a record the way SQLite would.
pub fn condition_matches(condition: &Condition, record: &PropertyRecord) -> bool {
    let Some(actual) = column_value(record, condition.column) else {
        return false;
    };

    if condition.operator == Operator::Like {
        return match (&actual, &condition.value) {
            (FilterValue::Text(text), FilterValue::Text(pattern)) => like_match(pattern, text),
            _ => false,
        };
    }

    let Some(ordering) = compare(&actual, &condition.value) else {
        return false;
    };
    match condition.operator {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::NotEq => ordering != Ordering::Equal,
        Operator::Lt => ordering == Ordering::Less,
        Operator::LtEq => ordering != Ordering::Greater,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::GtEq => ordering != Ordering::Less,
        Operator::Like => false,
    }
}

fn compare(left: &FilterValue, right: &FilterValue) -> Option<Ordering> {
    match (left, right) {
        (FilterValue::Integer(a), FilterValue::Integer(b)) => Some(a.cmp(b)),
        (FilterValue::Integer(a), FilterValue::Decimal(b)) => (*a as f64).partial_cmp(b),
        (FilterValue::Decimal(a), FilterValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (FilterValue::Decimal(a), FilterValue::Decimal(b)) => a.partial_cmp(b),
        (FilterValue::Text(a), FilterValue::Text(b)) => Some(a.cmp(b)),
        (FilterValue::Boolean(a), FilterValue::Boolean(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// SQLite `LIKE`: `%` matches any run, `_` one character, ASCII letters
/// compare case-insensitively. Backtracks only to the last `%`, so it runs
/// in linear time per `%` rather than exponentially.
pub fn like_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();
    let text: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();

    let (mut p, mut t) = (0, 0);
    let mut resume: Option<(usize, usize)> = None;
    while t < text.len() {
        if p < pattern.len() && pattern[p] == '%' {
            resume = Some((p, t));
            p += 1;
        } else if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if let Some((star, start)) = resume {
            resume = Some((star, start + 1));
            p = star + 1;
            t = start + 1;
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|&c| c == '%')
}

/// Store that yields some rows and then fails.
pub struct BrokenStore {
    pub rows_before_failure: Vec<PropertyRecord>,
    pub fatal: bool,
}

impl PropertyStore for BrokenStore {
    fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn for_each_property(
        &self,
        _query: &PropertyQuery,
        visit: &mut dyn FnMut(PropertyRecord) -> AppResult<()>,
    ) -> AppResult<usize> {
        for record in &self.rows_before_failure {
            visit(record.clone())?;
        }
        if self.fatal {
            Err(AppError::Connect("connection reset".to_string()))
        } else {
            Err(AppError::Decode("Invalid column type Null at index: 7".to_string()))
        }
    }
}

pub fn property(
    square_footage: i64,
    lighting: &str,
    price: f64,
    rooms: i64,
    description: &str,
    (yard, garage, pool): (bool, bool, bool),
) -> PropertyRecord {
    PropertyRecord {
        square_footage,
        lighting: lighting.to_string(),
        price,
        rooms,
        bathrooms: 1,
        latitude: 40.7,
        longitude: -73.9,
        description: description.to_string(),
        yard,
        garage,
        pool,
    }
}

pub fn sample_records() -> Vec<PropertyRecord> {
    vec![
        property(850, "low", 325000.0, 2, "Walk-up apartment", (false, false, false)),
        property(1450, "medium", 489900.0, 3, "Brownstone with a garden", (true, false, false)),
        property(3100, "high", 1250000.0, 5, "Family home", (true, true, true)),
    ]
}

/// Answers that leave every field blank.
pub fn blank_search() -> String {
    "\n".repeat(FIELDS.len())
}

/// Answers for one search: the given `(column, expression)` pairs, blanks elsewhere.
pub fn search_with(answers: &[(&str, &str)]) -> String {
    FIELDS
        .iter()
        .map(|field| {
            let answer = answers
                .iter()
                .find(|(column, _)| *column == field.column)
                .map(|(_, expr)| *expr)
                .unwrap_or("");
            format!("{answer}\n")
        })
        .collect()
}

/// Runs a whole session against `store` with the scripted input.
pub fn run_session(
    store: &dyn PropertyStore,
    script: &str,
    options: SessionOptions,
) -> (AppResult<usize>, String) {
    let mut output = Vec::new();
    let result = Session::new(store, Cursor::new(script.as_bytes().to_vec()), &mut output, options).run();
    (result, String::from_utf8(output).expect("utf-8 output"))
}
