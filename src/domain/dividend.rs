//! Dividend records and the holding-period window check.

use chrono::NaiveDate;

/// One dividend event. The ticker label is optional: single-ticker
/// dividend files usually carry only a date and an amount.
#[derive(Debug, Clone, PartialEq)]
pub struct DividendRecord {
    pub date: NaiveDate,
    pub ticker: Option<String>,
    pub amount: f64,
}

/// Did any dividend fall inside the inclusive window [start, end]?
///
/// `None` means dividend data was not supplied, which is defined as
/// "no dividend occurred", never an error. If any record carries a
/// ticker label the whole table is treated as ticker-labelled and is
/// filtered to the requested ticker first.
pub fn occurred(
    dividends: Option<&[DividendRecord]>,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    let Some(records) = dividends else {
        return false;
    };

    let labelled = records.iter().any(|r| r.ticker.is_some());
    records.iter().any(|r| {
        if labelled && r.ticker.as_deref() != Some(ticker) {
            return false;
        }
        r.date >= start && r.date <= end
    })
}
