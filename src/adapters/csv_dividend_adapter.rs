//! CSV dividend source adapter.
//!
//! Probes local dividend files for a ticker: the ten-year export names
//! (`{base}_dividends_last10y.csv` with the separator-normalized
//! ticker, then the raw ticker form), the plain `_dividends.csv`
//! variants, then a shared `dividends.csv`, across an ordered list of
//! search directories. Nothing found is `Ok(None)`; callers simulate
//! without dividend awareness in that case.

use crate::domain::dates;
use crate::domain::dividend::DividendRecord;
use crate::domain::error::TradesimError;
use crate::ports::dividend_port::DividendPort;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvDividendAdapter {
    /// Exact file to read, bypassing the per-ticker probe.
    explicit: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

impl CsvDividendAdapter {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            explicit: None,
            search_dirs,
        }
    }

    pub fn with_explicit_path(path: PathBuf) -> Self {
        Self {
            explicit: Some(path),
            search_dirs: Vec::new(),
        }
    }

    fn candidate_names(ticker: &str) -> Vec<String> {
        let underscored = ticker.replace('.', "_");
        // The ten-year export names come first: that is what the
        // dividend fetch script writes next to the price table.
        let mut names = vec![
            format!("{underscored}_dividends_last10y.csv"),
            format!("{underscored}_dividends.csv"),
        ];
        if ticker != underscored {
            names.insert(1, format!("{ticker}_dividends_last10y.csv"));
            names.push(format!("{ticker}_dividends.csv"));
        }
        names.push("dividends.csv".to_string());
        names
    }
}

impl DividendPort for CsvDividendAdapter {
    fn fetch_dividends(&self, ticker: &str) -> Result<Option<Vec<DividendRecord>>, TradesimError> {
        if let Some(path) = &self.explicit {
            if !path.exists() {
                return Err(TradesimError::SourceNotFound {
                    attempted: vec![path.display().to_string()],
                });
            }
            return parse_dividend_csv(path).map(Some);
        }

        for dir in &self.search_dirs {
            for name in Self::candidate_names(ticker) {
                let path = dir.join(&name);
                if path.exists() {
                    return parse_dividend_csv(&path).map(Some);
                }
            }
        }
        Ok(None)
    }
}

/// Parse a dividend CSV into records.
///
/// Accepts a headed `date`/`dividend` table (optional `ticker` column,
/// `amount` also recognized) or a headerless date-indexed two-column
/// form. Rows whose date does not normalize are skipped.
pub fn parse_dividend_csv(path: &Path) -> Result<Vec<DividendRecord>, TradesimError> {
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

    let Some(header) = rows.first() else {
        return Ok(Vec::new());
    };

    let find = |name: &str| {
        header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let date_col = find("date");
    let ticker_col = find("ticker");
    let amount_col = find("dividend").or_else(|| find("amount"));

    // Without a named date column, assume a date-indexed form: first
    // field is the date, second the amount, no header row to skip.
    let (date_col, body_start) = match date_col {
        Some(i) => (i, 1),
        None => (0, usize::from(dates::normalize(&header[0]).is_err())),
    };
    let amount_col = amount_col.unwrap_or(date_col + 1);

    let mut records = Vec::new();
    for row in rows.iter().skip(body_start) {
        let Some(raw_date) = row.get(date_col) else {
            continue;
        };
        let Ok(date) = dates::normalize(raw_date) else {
            continue;
        };
        let ticker = ticker_col
            .and_then(|i| row.get(i))
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(String::from);
        let amount = row
            .get(amount_col)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        records.push(DividendRecord {
            date,
            ticker,
            amount,
        });
    }
    Ok(records)
}
