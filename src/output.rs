//! Rendering of search results.
//!
//! Rows are buffered until the search finishes, so a query that fails halfway
//! prints nothing rather than a truncated table.

use std::io::Write;

use clap::ValueEnum;
use comfy_table::presets::ASCII_FULL;
use comfy_table::Table;

use crate::domain::property::PropertyRecord;
use crate::errors::AppResult;

/// Column headers, in projection order.
pub const HEADERS: [&str; 11] = [
    "SquareFt",
    "Lighting",
    "Price",
    "Rooms",
    "Bathrooms",
    "Lat",
    "Lng",
    "Description",
    "Yard",
    "Garage",
    "Pool",
];

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered text table (default)
    Table,
    /// JSON Lines (one JSON object per property)
    Json,
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

pub fn format_coordinate(degrees: f64) -> String {
    format!("{degrees:.4}")
}

/// The display cells of one record, aligned with [`HEADERS`].
pub fn table_row(record: &PropertyRecord) -> [String; 11] {
    [
        record.square_footage.to_string(),
        record.lighting.clone(),
        format_price(record.price),
        record.rooms.to_string(),
        record.bathrooms.to_string(),
        format_coordinate(record.latitude),
        format_coordinate(record.longitude),
        record.description.clone(),
        yes_no(record.yard).to_string(),
        yes_no(record.garage).to_string(),
        yes_no(record.pool).to_string(),
    ]
}

/// Collects the records of one search and writes them out at the end.
pub struct ResultRenderer {
    format: OutputFormat,
    table: Table,
    json_lines: Vec<String>,
}

impl ResultRenderer {
    pub fn new(format: OutputFormat) -> Self {
        let mut table = Table::new();
        table.load_preset(ASCII_FULL).set_header(HEADERS);

        Self {
            format,
            table,
            json_lines: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &PropertyRecord) -> AppResult<()> {
        match self.format {
            OutputFormat::Table => {
                self.table.add_row(table_row(record));
            }
            OutputFormat::Json => {
                let line = serde_json::to_string(record).map_err(std::io::Error::from)?;
                self.json_lines.push(line);
            }
        }
        Ok(())
    }

    pub fn finish<W: Write>(self, writer: &mut W) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Table => writeln!(writer, "{}", self.table),
            OutputFormat::Json => {
                for line in &self.json_lines {
                    writeln!(writer, "{line}")?;
                }
                Ok(())
            }
        }
    }
}
