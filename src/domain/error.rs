//! Domain error taxonomy.

use chrono::NaiveDate;

/// Top-level error type for tradesim.
///
/// Each variant maps to a distinct process exit code so that callers
/// (and shell scripts) can tell which stage of a simulation failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TradesimError {
    #[error("I/O error: {reason}")]
    Io { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error(
        "cannot parse date from {input:?} (expected YYYY-MM-DD; \
         check the argument order: TICKER BUY_DATE [SELL_DATE|HOLD_DAYS])"
    )]
    DateParse { input: String },

    #[error("no trading day {direction} {target} in the available data")]
    NoTradingDay {
        target: NaiveDate,
        /// "on or after" for forward search, "on or before" for backward.
        direction: &'static str,
    },

    #[error("no column matches ticker {ticker:?}; sample columns: {samples:?}")]
    TickerNotFound {
        ticker: String,
        samples: Vec<String>,
    },

    #[error("unrecognized table format in {path}: {reason}")]
    Format { path: String, reason: String },

    #[error("no price source found; tried: {attempted:?}")]
    SourceNotFound { attempted: Vec<String> },

    #[error("price lookup failed for ticker {ticker:?} (column {column:?}) on {date}: {reason}")]
    PriceLookup {
        ticker: String,
        column: String,
        date: NaiveDate,
        reason: String,
    },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl From<std::io::Error> for TradesimError {
    fn from(err: std::io::Error) -> Self {
        TradesimError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<&TradesimError> for std::process::ExitCode {
    fn from(err: &TradesimError) -> Self {
        let code: u8 = match err {
            TradesimError::Io { .. } => 1,
            TradesimError::ConfigParse { .. } => 2,
            TradesimError::DateParse { .. } => 3,
            TradesimError::NoTradingDay { .. } => 4,
            TradesimError::TickerNotFound { .. } => 5,
            TradesimError::Format { .. } => 6,
            TradesimError::SourceNotFound { .. } => 7,
            TradesimError::PriceLookup { .. } => 8,
            TradesimError::InvalidRequest { .. } => 9,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parse_message_echoes_input_and_hints_order() {
        let err = TradesimError::DateParse {
            input: "3382_T".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"3382_T\""));
        assert!(msg.contains("argument order"));
    }

    #[test]
    fn ticker_not_found_lists_samples() {
        let err = TradesimError::TickerNotFound {
            ticker: "9999".into(),
            samples: vec!["1332.T".into(), "3382.T".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("1332.T"));
        assert!(msg.contains("3382.T"));
    }

    #[test]
    fn each_variant_has_a_distinct_exit_code() {
        use std::process::ExitCode;

        let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        let errors = [
            TradesimError::Io { reason: "x".into() },
            TradesimError::ConfigParse {
                file: "c.ini".into(),
                reason: "x".into(),
            },
            TradesimError::DateParse { input: "x".into() },
            TradesimError::NoTradingDay {
                target: date,
                direction: "on or after",
            },
            TradesimError::TickerNotFound {
                ticker: "x".into(),
                samples: vec![],
            },
            TradesimError::Format {
                path: "p.csv".into(),
                reason: "x".into(),
            },
            TradesimError::SourceNotFound { attempted: vec![] },
            TradesimError::PriceLookup {
                ticker: "x".into(),
                column: "x".into(),
                date,
                reason: "x".into(),
            },
            TradesimError::InvalidRequest { reason: "x".into() },
        ];

        let codes: Vec<ExitCode> = errors.iter().map(ExitCode::from).collect();
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(format!("{a:?}"), format!("{b:?}"));
            }
        }
    }
}
