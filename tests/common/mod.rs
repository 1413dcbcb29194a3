#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use tradesim::domain::dividend::DividendRecord;
use tradesim::domain::error::TradesimError;
use tradesim::domain::price_table::PriceTable;
use tradesim::domain::simulate::TradeRequest;
use tradesim::ports::dividend_port::DividendPort;
use tradesim::ports::price_port::PricePort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build a table from `(date-string, ticker, price)` triples.
pub fn make_table(cells: &[(&str, &str, f64)]) -> PriceTable {
    PriceTable::from_cells(cells.iter().map(|&(d, t, p)| {
        (
            NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
            t.to_string(),
            p,
        )
    }))
}

pub fn make_request(
    ticker: &str,
    buy: &str,
    sell: Option<&str>,
    hold: Option<u32>,
) -> TradeRequest {
    TradeRequest {
        ticker: ticker.to_string(),
        buy_date: buy.to_string(),
        sell_date: sell.map(String::from),
        hold_days: hold,
    }
}

pub fn dividend(d: &str, ticker: Option<&str>, amount: f64) -> DividendRecord {
    DividendRecord {
        date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
        ticker: ticker.map(String::from),
        amount,
    }
}

/// In-memory price port for pipeline tests without a filesystem.
pub struct MockPricePort {
    pub table: PriceTable,
}

impl PricePort for MockPricePort {
    fn load_prices(&self) -> Result<PriceTable, TradesimError> {
        Ok(self.table.clone())
    }
}

/// In-memory dividend port keyed by ticker.
pub struct MockDividendPort {
    pub data: HashMap<String, Vec<DividendRecord>>,
}

impl MockDividendPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_records(mut self, ticker: &str, records: Vec<DividendRecord>) -> Self {
        self.data.insert(ticker.to_string(), records);
        self
    }
}

impl DividendPort for MockDividendPort {
    fn fetch_dividends(&self, ticker: &str) -> Result<Option<Vec<DividendRecord>>, TradesimError> {
        Ok(self.data.get(ticker).cloned())
    }
}
