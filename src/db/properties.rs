use rusqlite::types::ToSqlOutput;
use rusqlite::{params_from_iter, Row, ToSql};

use crate::db::connection::Database;
use crate::db::PropertyStore;
use crate::domain::filter::FilterValue;
use crate::domain::property::PropertyRecord;
use crate::errors::{AppError, AppResult};
use crate::search::query::PropertyQuery;

impl ToSql for FilterValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            FilterValue::Integer(v) => ToSqlOutput::from(*v),
            FilterValue::Decimal(v) => ToSqlOutput::from(*v),
            FilterValue::Text(s) => ToSqlOutput::from(s.as_str()),
            FilterValue::Boolean(b) => ToSqlOutput::from(*b),
        })
    }
}

impl PropertyStore for Database {
    fn ping(&self) -> AppResult<()> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(|e| AppError::Connect(format!("Ping failed: {e}")))?;
            Ok(())
        })
    }

    fn for_each_property(
        &self,
        query: &PropertyQuery,
        visit: &mut dyn FnMut(PropertyRecord) -> AppResult<()>,
    ) -> AppResult<usize> {
        let sql = query.sql();
        tracing::debug!(%sql, params = query.conditions().len(), "executing property search");

        // Statement and cursor live only inside this closure.
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| AppError::Query(e.to_string()))?;
            let mut rows = stmt
                .query(params_from_iter(query.params()))
                .map_err(|e| AppError::Query(e.to_string()))?;

            let mut count = 0;
            while let Some(row) = rows.next().map_err(|e| AppError::Query(e.to_string()))? {
                let record = decode_property(row).map_err(|e| AppError::Decode(e.to_string()))?;
                visit(record)?;
                count += 1;
            }
            Ok(count)
        })
    }
}

/// Maps one projected row onto a `PropertyRecord`.
fn decode_property(row: &Row<'_>) -> rusqlite::Result<PropertyRecord> {
    Ok(PropertyRecord {
        square_footage: row.get("SquareFootage")?,
        lighting: row.get("Lighting")?,
        price: row.get("Price")?,
        rooms: row.get("Rooms")?,
        bathrooms: row.get("Bathrooms")?,
        latitude: row.get("Latitude")?,
        longitude: row.get("Longitude")?,
        description: row.get("Description")?,
        yard: row.get("Yard")?,
        garage: row.get("Garage")?,
        pool: row.get("Pool")?,
    })
}
