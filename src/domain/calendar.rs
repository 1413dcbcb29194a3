//! Trading-day location on a sorted calendar.

use crate::domain::error::TradesimError;
use chrono::NaiveDate;

/// Search direction for [`locate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// First trading day on or after the target (buy side).
    Forward,
    /// Last trading day on or before the target (sell side).
    Backward,
}

/// What to do when a hold length runs past the end of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldPolicy {
    /// Clamp the sell index to the last available trading day.
    #[default]
    Clamp,
    /// Fail with [`TradesimError::NoTradingDay`] instead.
    Strict,
}

/// Find the nearest trading day to `target` in the given direction.
///
/// `days` must be strictly ascending. Binary search via the
/// insertion-point rule: forward takes the left insertion point,
/// backward takes the right insertion point minus one. A target that
/// is itself a trading day resolves to its own index either way.
pub fn locate(
    days: &[NaiveDate],
    target: NaiveDate,
    direction: Direction,
) -> Result<usize, TradesimError> {
    match direction {
        Direction::Forward => {
            let i = days.partition_point(|d| *d < target);
            if i == days.len() {
                return Err(TradesimError::NoTradingDay {
                    target,
                    direction: "on or after",
                });
            }
            Ok(i)
        }
        Direction::Backward => {
            let i = days.partition_point(|d| *d <= target);
            if i == 0 {
                return Err(TradesimError::NoTradingDay {
                    target,
                    direction: "on or before",
                });
            }
            Ok(i - 1)
        }
    }
}

/// Resolve the sell index for a hold length counted in trading days.
/// `days` must be non-empty and `buy_index` must come from [`locate`].
pub fn sell_index_for_hold(
    days: &[NaiveDate],
    buy_index: usize,
    hold_days: usize,
    policy: HoldPolicy,
) -> Result<usize, TradesimError> {
    let last = days.len() - 1;
    let wanted = buy_index.saturating_add(hold_days);
    if wanted > last && policy == HoldPolicy::Strict {
        return Err(TradesimError::NoTradingDay {
            target: days[last],
            direction: "on or after",
        });
    }
    Ok(wanted.min(last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(specs: &[(i32, u32, u32)]) -> Vec<NaiveDate> {
        specs
            .iter()
            .map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
            .collect()
    }

    fn sample() -> Vec<NaiveDate> {
        days(&[(2020, 1, 2), (2020, 1, 3), (2020, 1, 10)])
    }

    #[test]
    fn forward_skips_to_next_trading_day() {
        let cal = sample();
        let target = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        assert_eq!(locate(&cal, target, Direction::Forward).unwrap(), 2);
    }

    #[test]
    fn backward_falls_back_to_previous_trading_day() {
        let cal = sample();
        let target = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        assert_eq!(locate(&cal, target, Direction::Backward).unwrap(), 1);
    }

    #[test]
    fn exact_trading_day_resolves_to_itself_both_ways() {
        let cal = sample();
        let target = NaiveDate::from_ymd_opt(2020, 1, 3).unwrap();
        assert_eq!(locate(&cal, target, Direction::Forward).unwrap(), 1);
        assert_eq!(locate(&cal, target, Direction::Backward).unwrap(), 1);
    }

    #[test]
    fn forward_fails_past_end_of_data() {
        let cal = sample();
        let target = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        let err = locate(&cal, target, Direction::Forward).unwrap_err();
        assert!(matches!(err, TradesimError::NoTradingDay { .. }));
    }

    #[test]
    fn backward_fails_before_start_of_data() {
        let cal = sample();
        let target = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
        let err = locate(&cal, target, Direction::Backward).unwrap_err();
        assert!(matches!(err, TradesimError::NoTradingDay { .. }));
    }

    #[test]
    fn boundary_days_resolve_in_their_own_direction() {
        let cal = sample();
        let first = cal[0];
        let last = cal[2];
        assert_eq!(locate(&cal, first, Direction::Backward).unwrap(), 0);
        assert_eq!(locate(&cal, last, Direction::Forward).unwrap(), 2);
    }

    #[test]
    fn hold_clamps_to_last_index() {
        let cal = sample();
        assert_eq!(
            sell_index_for_hold(&cal, 0, 100, HoldPolicy::Clamp).unwrap(),
            2
        );
    }

    #[test]
    fn hold_within_range_is_exact() {
        let cal = sample();
        assert_eq!(
            sell_index_for_hold(&cal, 0, 1, HoldPolicy::Clamp).unwrap(),
            1
        );
        assert_eq!(
            sell_index_for_hold(&cal, 0, 1, HoldPolicy::Strict).unwrap(),
            1
        );
    }

    #[test]
    fn strict_hold_fails_past_end_of_data() {
        let cal = sample();
        let err = sell_index_for_hold(&cal, 0, 100, HoldPolicy::Strict).unwrap_err();
        assert!(matches!(err, TradesimError::NoTradingDay { .. }));
    }

    #[test]
    fn zero_hold_sells_on_buy_day() {
        let cal = sample();
        assert_eq!(
            sell_index_for_hold(&cal, 1, 0, HoldPolicy::Strict).unwrap(),
            1
        );
    }
}
