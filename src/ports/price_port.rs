//! Price source port trait.

use crate::domain::error::TradesimError;
use crate::domain::price_table::PriceTable;

pub trait PricePort {
    fn load_prices(&self) -> Result<PriceTable, TradesimError>;
}
