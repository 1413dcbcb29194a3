//! Single buy/sell trade simulation.
//!
//! A linear pipeline over the other domain components: normalize the
//! requested dates, snap them to real trading days, resolve the ticker
//! to a column once, look up both prices, compute the percentage
//! profit, check the dividend window. Any step failing aborts the run;
//! there are no retries and no partial results.

use crate::domain::calendar::{self, Direction, HoldPolicy};
use crate::domain::dates;
use crate::domain::dividend::{self, DividendRecord};
use crate::domain::error::TradesimError;
use crate::domain::price_table::PriceTable;
use crate::domain::ticker;
use chrono::NaiveDate;

/// What the caller asked for. Exactly one of `sell_date` / `hold_days`
/// must be supplied; [`simulate`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    pub ticker: String,
    pub buy_date: String,
    pub sell_date: Option<String>,
    pub hold_days: Option<u32>,
}

/// A completed simulation. Both dates are actual trading days present
/// in the price table.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeResult {
    pub buy_date: NaiveDate,
    pub sell_date: NaiveDate,
    pub buy_price: f64,
    pub sell_price: f64,
    pub profit_pct: f64,
    pub dividend_occurred: bool,
}

/// Run one trade simulation against an in-memory snapshot.
pub fn simulate(
    request: &TradeRequest,
    prices: &PriceTable,
    dividends: Option<&[DividendRecord]>,
    policy: HoldPolicy,
) -> Result<TradeResult, TradesimError> {
    let days = prices.trading_days();

    let buy_target = dates::normalize(&request.buy_date)?;
    let buy_index = calendar::locate(days, buy_target, Direction::Forward)?;

    let sell_index = match (&request.sell_date, request.hold_days) {
        (Some(sell_request), None) => {
            let sell_target = dates::normalize(sell_request)?;
            calendar::locate(days, sell_target, Direction::Backward)?
        }
        (None, Some(hold)) => calendar::sell_index_for_hold(days, buy_index, hold as usize, policy)?,
        (Some(_), Some(_)) => {
            return Err(TradesimError::InvalidRequest {
                reason: "supply either a sell date or a hold length, not both".into(),
            });
        }
        (None, None) => {
            return Err(TradesimError::InvalidRequest {
                reason: "supply a sell date or a hold length".into(),
            });
        }
    };

    let buy_date = days[buy_index];
    let sell_date = days[sell_index];

    // One resolution, reused for both lookups.
    let column = ticker::resolve(prices.columns(), &request.ticker)?;

    let buy_price = lookup(prices, &request.ticker, &column, buy_date)?;
    let sell_price = lookup(prices, &request.ticker, &column, sell_date)?;

    if buy_price == 0.0 {
        return Err(TradesimError::PriceLookup {
            ticker: request.ticker.clone(),
            column,
            date: buy_date,
            reason: "buy price is zero, profit is undefined".into(),
        });
    }

    let profit_pct = (sell_price - buy_price) / buy_price * 100.0;

    let dividend_occurred = dividend::occurred(dividends, &request.ticker, buy_date, sell_date);

    Ok(TradeResult {
        buy_date,
        sell_date,
        buy_price,
        sell_price,
        profit_pct,
        dividend_occurred,
    })
}

fn lookup(
    prices: &PriceTable,
    ticker: &str,
    column: &str,
    date: NaiveDate,
) -> Result<f64, TradesimError> {
    prices
        .price(date, column)
        .ok_or_else(|| TradesimError::PriceLookup {
            ticker: ticker.to_string(),
            column: column.to_string(),
            date,
            reason: "no price recorded for this date".into(),
        })
}
