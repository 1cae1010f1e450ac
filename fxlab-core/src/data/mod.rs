//! EUR/USD CSV ingestion.
//!
//! Reads daily history exported with French locale formatting: columns
//! `Date, Close, Open, High, Low, Change %`, dates as `DD/MM/YYYY`, decimal
//! commas, optionally quoted fields and a UTF-8 BOM. Output is sorted by
//! date and duplicate-free. Malformed input is rejected outright — there is
//! no row-skipping or repair here; the engine trusts what this layer emits.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::Bar;

/// Errors from the ingestion layer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: expected at least 5 columns, got {got}")]
    TooFewColumns { row: usize, got: usize },

    #[error("row {row}: unparsable date '{value}' (expected DD/MM/YYYY)")]
    BadDate { row: usize, value: String },

    #[error("row {row}: unparsable {column} value '{value}'")]
    BadNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("duplicate bar for {0}")]
    DuplicateDate(NaiveDate),

    #[error("inconsistent OHLC on {0}")]
    InsaneBar(NaiveDate),

    #[error("no data rows")]
    Empty,
}

/// Load and validate bars from a CSV file.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>, DataError> {
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_bars(&raw)
}

/// Parse bars from CSV text.
pub fn parse_bars(raw: &str) -> Result<Vec<Bar>, DataError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut bars = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // Header is row 0; data rows are reported 1-based past it.
        let row = i + 1;
        if record.len() < 5 {
            return Err(DataError::TooFewColumns {
                row,
                got: record.len(),
            });
        }

        let date = parse_date(&record[0], row)?;
        // Export column order is Date, Close, Open, High, Low.
        let close = parse_french_number(&record[1], "close", row)?;
        let open = parse_french_number(&record[2], "open", row)?;
        let high = parse_french_number(&record[3], "high", row)?;
        let low = parse_french_number(&record[4], "low", row)?;

        let bar = Bar {
            date,
            open,
            high,
            low,
            close,
        };
        if !bar.is_sane() {
            return Err(DataError::InsaneBar(date));
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(DataError::Empty);
    }

    bars.sort_by_key(|b| b.date);
    for pair in bars.windows(2) {
        if pair[0].date == pair[1].date {
            return Err(DataError::DuplicateDate(pair[0].date));
        }
    }

    Ok(bars)
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y").map_err(|_| DataError::BadDate {
        row,
        value: value.to_string(),
    })
}

/// Parse a price with a French decimal comma, e.g. `"1,0835"`.
fn parse_french_number(
    value: &str,
    column: &'static str,
    row: usize,
) -> Result<f64, DataError> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| DataError::BadNumber {
            row,
            column,
            value: value.to_string(),
        })
}
