//! CSV price source adapter.
//!
//! Tries an ordered list of candidate paths and parses the first file
//! that exists. The file is a generic two-dimensional table whose date
//! axis may be either the rows or the columns; orientation is detected
//! by parsing both axes as dates and taking whichever clears a 90%
//! success threshold, transposing when it is the column headers.

use crate::domain::dates;
use crate::domain::error::TradesimError;
use crate::domain::price_table::PriceTable;
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Minimum share of an axis that must parse as dates to classify it.
const DATE_AXIS_THRESHOLD: f64 = 0.9;

pub struct CsvPriceAdapter {
    candidates: Vec<PathBuf>,
}

impl CsvPriceAdapter {
    /// The candidate list comes from the caller (CLI flag or config),
    /// never from implicit path construction.
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }
}

impl PricePort for CsvPriceAdapter {
    fn load_prices(&self) -> Result<PriceTable, TradesimError> {
        for path in &self.candidates {
            if path.exists() {
                return parse_price_csv(path);
            }
        }
        Err(TradesimError::SourceNotFound {
            attempted: self
                .candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        })
    }
}

/// Parse one price CSV, auto-detecting the date axis.
pub fn parse_price_csv(path: &Path) -> Result<PriceTable, TradesimError> {
    let content = fs::read_to_string(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TradesimError::Format {
            path: path.display().to_string(),
            reason: format!("CSV parse error: {e}"),
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.len() < 2 {
        return Err(TradesimError::Format {
            path: path.display().to_string(),
            reason: "table needs a header row and at least one data row".into(),
        });
    }

    let header = &rows[0];
    let body = &rows[1..];

    let row_labels: Vec<&str> = body.iter().map(|r| r[0].as_str()).collect();
    let col_labels: Vec<&str> = header.iter().skip(1).map(String::as_str).collect();

    if date_ratio(&row_labels) >= DATE_AXIS_THRESHOLD {
        return Ok(build_dates_as_rows(header, body));
    }
    if date_ratio(&col_labels) >= DATE_AXIS_THRESHOLD {
        return Ok(build_dates_as_columns(header, body));
    }

    Err(TradesimError::Format {
        path: path.display().to_string(),
        reason: "neither axis parses as dates".into(),
    })
}

/// Share of labels that normalize to a date. Empty axes score zero.
fn date_ratio(labels: &[&str]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let parsed = labels
        .iter()
        .filter(|l| dates::normalize(l).is_ok())
        .count();
    parsed as f64 / labels.len() as f64
}

/// First column is the date index, remaining headers are tickers.
fn build_dates_as_rows(header: &[String], body: &[Vec<String>]) -> PriceTable {
    let mut cells: Vec<(NaiveDate, String, f64)> = Vec::new();
    for row in body {
        let Ok(date) = dates::normalize(&row[0]) else {
            continue;
        };
        for (column, cell) in header.iter().zip(row.iter()).skip(1) {
            if column.is_empty() {
                continue;
            }
            if let Ok(price) = cell.trim().parse::<f64>() {
                cells.push((date, column.clone(), price));
            }
        }
    }
    PriceTable::from_cells(cells)
}

/// Headers are dates, first column holds the tickers; transpose.
fn build_dates_as_columns(header: &[String], body: &[Vec<String>]) -> PriceTable {
    let dates_by_field: Vec<Option<NaiveDate>> = header
        .iter()
        .skip(1)
        .map(|h| dates::normalize(h).ok())
        .collect();

    let mut cells: Vec<(NaiveDate, String, f64)> = Vec::new();
    for row in body {
        let ticker = row[0].trim();
        if ticker.is_empty() {
            continue;
        }
        for (slot, cell) in dates_by_field.iter().zip(row.iter().skip(1)) {
            let Some(date) = slot else { continue };
            if let Ok(price) = cell.trim().parse::<f64>() {
                cells.push((*date, ticker.to_string(), price));
            }
        }
    }
    PriceTable::from_cells(cells)
}
