// src/search/collector.rs

use std::io::{BufRead, Write};

use crate::domain::fields::{FieldDescriptor, FIELDS};
use crate::domain::filter::Condition;
use crate::errors::AppResult;
use crate::search::query::RawFilter;
use crate::search::{prompt, read_line};

/// Asks for a filter on every field, in order, and keeps the non-blank ones.
///
/// An answer that does not parse is reported and the same field is asked
/// again. Returns `None` when the input ends before every field was asked.
pub fn collect_filters<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> AppResult<Option<Vec<RawFilter>>> {
    let mut filters = Vec::new();

    for field in &FIELDS {
        match ask_field(field, input, output)? {
            Answer::Blank => {}
            Answer::Filter(expression) => filters.push(RawFilter::new(field.column, expression)),
            Answer::EndOfInput => return Ok(None),
        }
    }

    Ok(Some(filters))
}

enum Answer {
    Blank,
    Filter(String),
    EndOfInput,
}

fn ask_field<R: BufRead, W: Write>(
    field: &FieldDescriptor,
    input: &mut R,
    output: &mut W,
) -> AppResult<Answer> {
    loop {
        prompt(output, &field.prompt())?;
        let Some(line) = read_line(input)? else {
            return Ok(Answer::EndOfInput);
        };
        if line.is_empty() {
            return Ok(Answer::Blank);
        }

        match Condition::parse(field, &line) {
            Ok(_) => return Ok(Answer::Filter(line)),
            Err(e) => {
                tracing::debug!(column = field.column, error = %e, "rejected filter input");
                writeln!(output, "Invalid filter for {}: {e}. Try again or leave blank.", field.label)?;
            }
        }
    }
}
