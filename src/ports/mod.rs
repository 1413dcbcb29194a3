//! Port traits at the domain boundary.

pub mod config_port;
pub mod dividend_port;
pub mod price_port;
