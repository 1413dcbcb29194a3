//! Dividend source port trait.

use crate::domain::dividend::DividendRecord;
use crate::domain::error::TradesimError;

pub trait DividendPort {
    /// Fetch dividend records for one ticker. `Ok(None)` means no
    /// dividend data exists for it, which is not an error.
    fn fetch_dividends(&self, ticker: &str) -> Result<Option<Vec<DividendRecord>>, TradesimError>;
}
