//! Core domain types and logic.

pub mod calendar;
pub mod dates;
pub mod dividend;
pub mod error;
pub mod price_table;
pub mod simulate;
pub mod ticker;
