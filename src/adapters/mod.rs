//! Concrete adapter implementations for ports.

pub mod csv_dividend_adapter;
pub mod csv_price_adapter;
pub mod file_config_adapter;
