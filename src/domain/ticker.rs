//! Fuzzy ticker-to-column resolution.
//!
//! Ticker formatting varies across the data sources feeding the same
//! table (`3382_T` vs `3382.T`, suffix present or not), so resolution
//! runs an explicit ordered list of match rules and the first hit wins.

use crate::domain::error::TradesimError;

/// How many column labels to quote in a [`TradesimError::TickerNotFound`].
const SAMPLE_LIMIT: usize = 20;

/// A single column-matching strategy. Evaluated in the fixed order of
/// [`MATCH_RULES`]; precedence is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Exact string equality.
    Exact,
    /// Equality after swapping the `_`/`.` separator, both directions.
    SeparatorSwap,
    /// First column whose label starts with the leading numeric code.
    NumericPrefix,
    /// First column whose label contains the numeric code anywhere.
    NumericSubstring,
}

pub const MATCH_RULES: [MatchRule; 4] = [
    MatchRule::Exact,
    MatchRule::SeparatorSwap,
    MatchRule::NumericPrefix,
    MatchRule::NumericSubstring,
];

impl MatchRule {
    /// Apply this rule against the columns, returning the matched label.
    pub fn apply(&self, columns: &[String], ticker: &str) -> Option<String> {
        match self {
            MatchRule::Exact => columns.iter().find(|c| c.as_str() == ticker).cloned(),
            MatchRule::SeparatorSwap => {
                let dotted = ticker.replace('_', ".");
                let underscored = ticker.replace('.', "_");
                columns
                    .iter()
                    .find(|c| c.as_str() == dotted || c.as_str() == underscored)
                    .cloned()
            }
            MatchRule::NumericPrefix => {
                let code = numeric_code(ticker)?;
                columns.iter().find(|c| c.starts_with(&code)).cloned()
            }
            MatchRule::NumericSubstring => {
                let code = numeric_code(ticker)?;
                columns.iter().find(|c| c.contains(&code)).cloned()
            }
        }
    }
}

/// Leading run of 3-6 digits (the numeric security code), if any.
fn numeric_code(ticker: &str) -> Option<String> {
    let digits: String = ticker
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .take(6)
        .collect();
    if digits.len() >= 3 { Some(digits) } else { None }
}

/// Resolve a user-supplied ticker token to a column label.
pub fn resolve(columns: &[String], ticker: &str) -> Result<String, TradesimError> {
    for rule in MATCH_RULES {
        if let Some(label) = rule.apply(columns, ticker) {
            return Ok(label);
        }
    }
    Err(TradesimError::TickerNotFound {
        ticker: ticker.to_string(),
        samples: columns.iter().take(SAMPLE_LIMIT).cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match() {
        let columns = cols(&["1332.T", "3382.T"]);
        assert_eq!(resolve(&columns, "3382.T").unwrap(), "3382.T");
    }

    #[test]
    fn underscore_resolves_to_dotted_column() {
        let columns = cols(&["1332.T", "3382.T"]);
        assert_eq!(resolve(&columns, "3382_T").unwrap(), "3382.T");
    }

    #[test]
    fn dot_resolves_to_underscored_column() {
        let columns = cols(&["3382_T"]);
        assert_eq!(resolve(&columns, "3382.T").unwrap(), "3382_T");
    }

    #[test]
    fn bare_code_matches_prefixed_column() {
        let columns = cols(&["1332.T", "3382.T"]);
        assert_eq!(resolve(&columns, "3382").unwrap(), "3382.T");
    }

    #[test]
    fn code_matches_as_substring_last() {
        let columns = cols(&["TSE_3382_CLOSE"]);
        assert_eq!(resolve(&columns, "3382").unwrap(), "TSE_3382_CLOSE");
    }

    #[test]
    fn exact_beats_separator_swap() {
        // Both forms present; the literal token must win.
        let columns = cols(&["3382.T", "3382_T"]);
        assert_eq!(resolve(&columns, "3382_T").unwrap(), "3382_T");
    }

    #[test]
    fn prefix_beats_substring() {
        let columns = cols(&["X3382.T", "3382.T"]);
        assert_eq!(resolve(&columns, "3382_Q").unwrap(), "3382.T");
    }

    #[test]
    fn code_shorter_than_three_digits_is_ignored() {
        let columns = cols(&["12TREE"]);
        let err = resolve(&columns, "12").unwrap_err();
        assert!(matches!(err, TradesimError::TickerNotFound { .. }));
    }

    #[test]
    fn code_is_capped_at_six_digits() {
        assert_eq!(numeric_code("12345678.T"), Some("123456".into()));
        assert_eq!(numeric_code("3382.T"), Some("3382".into()));
        assert_eq!(numeric_code("AAPL"), None);
    }

    #[test]
    fn no_match_reports_sample_columns() {
        let columns: Vec<String> = (0..30).map(|i| format!("C{i:04}.T")).collect();
        let err = resolve(&columns, "ZZZZ").unwrap_err();
        match err {
            TradesimError::TickerNotFound { ticker, samples } => {
                assert_eq!(ticker, "ZZZZ");
                assert_eq!(samples.len(), SAMPLE_LIMIT);
                assert_eq!(samples[0], "C0000.T");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let columns = cols(&["1332.T", "3382.T", "9984.T"]);
        let first = resolve(&columns, "3382_T").unwrap();
        let second = resolve(&columns, "3382_T").unwrap();
        assert_eq!(first, second);
    }
}
