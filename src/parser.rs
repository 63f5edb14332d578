//! Line parser for the cleaned auto-mpg dataset.
//!
//! Each data line holds nine columns:
//!
//! ```text
//! mpg cylinders displacement horsepower weight acceleration model_year origin "car name"
//! ```
//!
//! The first eight are single tokens. The car name is everything after the
//! eighth column and may be wrapped in double quotes.

use tracing::debug;

use crate::corrections::CorrectionTable;
use crate::error::{Error, Result};
use crate::record::Record;

pub const FIELD_COUNT: usize = 9;

/// The nine raw columns of one dataset line, borrowed from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow<'a> {
    pub mpg: &'a str,
    pub cylinders: &'a str,
    pub displacement: &'a str,
    pub horsepower: &'a str,
    pub weight: &'a str,
    pub acceleration: &'a str,
    pub model_year: &'a str,
    pub origin: &'a str,
    pub car_name: &'a str,
}

/// Splits a cleaned line into its nine columns.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the line has fewer than nine columns.
pub fn split_fields(line: &str) -> Result<RawRow<'_>> {
    let mut columns = [""; FIELD_COUNT - 1];
    let mut rest = line;

    for (found, slot) in columns.iter_mut().enumerate() {
        let trimmed = rest.trim_start();
        let end = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        if end == 0 {
            return Err(field_count_error(found));
        }
        *slot = &trimmed[..end];
        rest = &trimmed[end..];
    }

    let rest = rest.trim();
    if rest.is_empty() {
        return Err(field_count_error(FIELD_COUNT - 1));
    }
    let car_name = strip_quotes(rest)?;

    let [mpg, cylinders, displacement, horsepower, weight, acceleration, model_year, origin] =
        columns;
    Ok(RawRow {
        mpg,
        cylinders,
        displacement,
        horsepower,
        weight,
        acceleration,
        model_year,
        origin,
        car_name,
    })
}

fn field_count_error(found: usize) -> Error {
    Error::parse(format!("expected {FIELD_COUNT} fields, found {found}"))
}

/// Removes one pair of surrounding double quotes. A quote on only one side
/// is an error.
fn strip_quotes(s: &str) -> Result<&str> {
    let unbalanced = || Error::parse(format!("unbalanced quote in car name: {s}"));
    match s.strip_prefix('"') {
        Some(inner) => inner.strip_suffix('"').ok_or_else(unbalanced),
        None if s.ends_with('"') => Err(unbalanced()),
        None => Ok(s),
    }
}

/// Turns cleaned dataset lines into [`Record`]s, canonicalizing manufacturer names.
#[derive(Debug, Clone, Default)]
pub struct FieldParser {
    corrections: CorrectionTable,
}

impl FieldParser {
    pub fn new(corrections: CorrectionTable) -> Self {
        Self { corrections }
    }

    /// Parses one cleaned line.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] for a short line or an empty car name,
    /// [`Error::Value`] when the year or mpg column is not numeric.
    pub fn parse(&self, line: &str) -> Result<Record> {
        let row = split_fields(line)?;

        let mut tokens = row.car_name.split_whitespace();
        let raw_make = tokens
            .next()
            .ok_or_else(|| Error::parse("empty car name"))?;
        let model = tokens.collect::<Vec<_>>().join(" ");

        let make = match self.corrections.correction(raw_make) {
            Some(canonical) => {
                debug!(typo = raw_make, corrected = canonical, "Corrected manufacturer name");
                canonical
            }
            None => raw_make,
        };

        Record::coerce(make, &model, row.model_year, row.mpg)
    }
}
