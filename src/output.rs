//! Output formatting for records and grouped averages.
//!
//! Supports CSV, pretty JSON and a plain-text bar chart. Charts are written
//! to their own writer so they never mix with machine-readable data.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::GroupAverage;
use crate::corpus::Corpus;
use crate::error::{Error, Result};

pub const AVERAGE_HEADER: &str = "Average MPG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Opens `path` for writing, or stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Writing output to file");
            let file = File::create(path)
                .map_err(|e| Error::io(format!("creating {}", path.display()), e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Writes every record as a CSV row under a `Make,Model,Year,MPG` header.
pub fn write_records<W: Write>(writer: W, corpus: &Corpus) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for record in corpus {
        writer
            .serialize(record)
            .map_err(|e| Error::output("writing record row", e))?;
    }

    writer
        .flush()
        .map_err(|e| Error::io("flushing record output", e))?;
    debug!(rows = corpus.len(), "Record CSV written");
    Ok(())
}

/// Writes `(key, average)` rows as CSV under `key_header,Average MPG`.
pub fn write_averages<W, K>(writer: W, key_header: &str, rows: &[GroupAverage<K>]) -> Result<()>
where
    W: Write,
    K: Serialize,
{
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer
        .write_record([key_header, AVERAGE_HEADER])
        .map_err(|e| Error::output("writing header", e))?;
    for row in rows {
        writer
            .serialize((&row.key, row.average_mpg))
            .map_err(|e| Error::output("writing average row", e))?;
    }

    writer
        .flush()
        .map_err(|e| Error::io("flushing average output", e))?;
    debug!(rows = rows.len(), key_header, "Average CSV written");
    Ok(())
}

/// Writes all records as a pretty-printed JSON array.
pub fn write_records_json<W: Write>(writer: W, corpus: &Corpus) -> Result<()> {
    write_json(writer, corpus.records())
}

/// Writes averages as a JSON array of `{key_header: key, "Average MPG": avg}` objects.
pub fn write_averages_json<W, K>(writer: W, key_header: &str, rows: &[GroupAverage<K>]) -> Result<()>
where
    W: Write,
    K: Serialize,
{
    let values = rows
        .iter()
        .map(|row| -> std::result::Result<serde_json::Value, serde_json::Error> {
            let mut object = serde_json::Map::new();
            object.insert(key_header.to_string(), serde_json::to_value(&row.key)?);
            object.insert(AVERAGE_HEADER.to_string(), serde_json::to_value(row.average_mpg)?);
            Ok(serde_json::Value::Object(object))
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::io("encoding averages", e.into()))?;

    write_json(writer, &values)
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| Error::io("writing JSON output", e.into()))?;
    writeln!(writer).map_err(|e| Error::io("writing JSON output", e))?;
    writer
        .flush()
        .map_err(|e| Error::io("flushing JSON output", e))
}

/// Writes grouped averages in `format` to `data` and, when a chart writer is
/// given, a bar chart titled `title` to `chart`.
pub fn write_average_report<D, C, K>(
    data: D,
    chart: Option<C>,
    format: OutputFormat,
    title: &str,
    key_header: &str,
    rows: &[GroupAverage<K>],
    width: usize,
) -> Result<()>
where
    D: Write,
    C: Write,
    K: Serialize + Display,
{
    match format {
        OutputFormat::Csv => write_averages(data, key_header, rows)?,
        OutputFormat::Json => write_averages_json(data, key_header, rows)?,
    }

    if let Some(mut chart) = chart {
        chart
            .write_all(render_bar_chart(title, key_header, rows, width).as_bytes())
            .map_err(|e| Error::io("writing chart", e))?;
        chart.flush().map_err(|e| Error::io("flushing chart", e))?;
    }
    Ok(())
}

/// Renders averages as a horizontal text bar chart.
///
/// The longest bar is `width` characters and corresponds to the largest
/// average; other bars are scaled proportionally.
pub fn render_bar_chart<K: Display>(
    title: &str,
    key_label: &str,
    rows: &[GroupAverage<K>],
    width: usize,
) -> String {
    let labels: Vec<String> = rows.iter().map(|r| r.key.to_string()).collect();
    let label_width = labels
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(key_label.chars().count()))
        .max()
        .unwrap_or(0);
    let max = rows
        .iter()
        .map(|r| r.average_mpg)
        .fold(0.0_f64, f64::max);

    let mut chart = format!("{title}\n{key_label:>label_width$} | {AVERAGE_HEADER}\n");
    chart.push_str(&format!("{}-+-{}\n", "-".repeat(label_width), "-".repeat(width)));

    for (label, row) in labels.iter().zip(rows) {
        let bar_len = if max > 0.0 {
            ((row.average_mpg / max) * width as f64).round() as usize
        } else {
            0
        };
        chart.push_str(&format!(
            "{label:>label_width$} | {} {:.2}\n",
            "#".repeat(bar_len),
            row.average_mpg
        ));
    }

    chart
}
