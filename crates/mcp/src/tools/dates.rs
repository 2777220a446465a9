// Default date windows for tools invoked without an explicit range

use crate::protocol::CallToolResult;
use chrono::{Datelike, Days, Months, NaiveDate};

fn month_start(day: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(day.year(), day.month(), 1).unwrap_or(day)
}

/// First and last day of the month containing `today`.
pub(crate) fn current_month(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = month_start(today);
    let end = start + Months::new(1) - Days::new(1);
    (start, end)
}

/// Budget window: first day of last month through last day of next month.
pub(crate) fn budget_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let current = month_start(today);
    let start = current - Months::new(1);
    let end = current + Months::new(2) - Days::new(1);
    (start, end)
}

/// Outcome of resolving an optional caller-supplied date range.
pub(crate) enum DateRange {
    /// Both bounds present (given or defaulted), as `YYYY-MM-DD` strings.
    Range(String, String),
    /// Exactly one bound was supplied; carries the error result to return.
    Invalid(CallToolResult),
}

/// Resolve an optional date range: both bounds pass through unchanged,
/// neither falls back to `default_window(today)`, and a single bound is
/// rejected the way the upstream expects pairs.
pub(crate) fn resolve_range(
    start_date: Option<String>,
    end_date: Option<String>,
    default_window: fn(NaiveDate) -> (NaiveDate, NaiveDate),
) -> DateRange {
    match (start_date, end_date) {
        (Some(start), Some(end)) => DateRange::Range(start, end),
        (None, None) => {
            // Local time, so the default month matches the caller's calendar
            // around month boundaries.
            let today = chrono::Local::now().date_naive();
            let (start, end) = default_window(today);
            DateRange::Range(start.to_string(), end.to_string())
        }
        _ => DateRange::Invalid(CallToolResult::error(
            "Invalid date parameters: provide both start_date and end_date, or neither",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_month_mid_month() {
        assert_eq!(
            current_month(date(2024, 6, 17)),
            (date(2024, 6, 1), date(2024, 6, 30))
        );
    }

    #[test]
    fn current_month_handles_leap_february() {
        assert_eq!(
            current_month(date(2024, 2, 10)),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            current_month(date(2023, 2, 10)),
            (date(2023, 2, 1), date(2023, 2, 28))
        );
    }

    #[test]
    fn current_month_december() {
        assert_eq!(
            current_month(date(2024, 12, 31)),
            (date(2024, 12, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn budget_window_spans_three_months() {
        assert_eq!(
            budget_window(date(2024, 6, 17)),
            (date(2024, 5, 1), date(2024, 7, 31))
        );
    }

    #[test]
    fn budget_window_rolls_over_year_boundaries() {
        // January looks back into the previous year.
        assert_eq!(
            budget_window(date(2024, 1, 5)),
            (date(2023, 12, 1), date(2024, 2, 29))
        );
        // December looks forward into the next year.
        assert_eq!(
            budget_window(date(2024, 12, 5)),
            (date(2024, 11, 1), date(2025, 1, 31))
        );
    }

    #[test]
    fn resolve_range_passes_explicit_bounds_through() {
        match resolve_range(
            Some("2024-01-01".into()),
            Some("2024-01-31".into()),
            current_month,
        ) {
            DateRange::Range(start, end) => {
                assert_eq!(start, "2024-01-01");
                assert_eq!(end, "2024-01-31");
            }
            DateRange::Invalid(_) => panic!("range should be accepted"),
        }
    }

    #[test]
    fn resolve_range_rejects_one_sided_bounds() {
        for (start, end) in [
            (Some("2024-01-01".to_string()), None),
            (None, Some("2024-01-31".to_string())),
        ] {
            match resolve_range(start, end, current_month) {
                DateRange::Invalid(result) => assert!(result.failed()),
                DateRange::Range(..) => panic!("one-sided range should be rejected"),
            }
        }
    }

    #[test]
    fn resolve_range_defaults_when_unset() {
        match resolve_range(None, None, current_month) {
            DateRange::Range(start, end) => {
                // Both bounds come from the default window, so they parse
                // and are ordered.
                let start: NaiveDate = start.parse().unwrap();
                let end: NaiveDate = end.parse().unwrap();
                assert!(start <= end);
                assert_eq!(start.day(), 1);
            }
            DateRange::Invalid(_) => panic!("empty range should default"),
        }
    }

    #[test]
    fn default_window_is_anchored_to_local_today() {
        let today = chrono::Local::now().date_naive();
        match resolve_range(None, None, current_month) {
            DateRange::Range(start, end) => {
                let start: NaiveDate = start.parse().unwrap();
                let end: NaiveDate = end.parse().unwrap();
                assert!(start <= today && today <= end);
            }
            DateRange::Invalid(_) => panic!("empty range should default"),
        }
    }
}
