// src/domain/property.rs

use serde::Serialize;

/// One row of the `Property` table, as returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRecord {
    pub square_footage: i64,
    pub lighting: String,
    pub price: f64,
    pub rooms: i64,
    pub bathrooms: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub yard: bool,
    pub garage: bool,
    pub pool: bool,
}
