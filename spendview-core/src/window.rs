//! Date windows: the two interval shapes the reports aggregate over.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A bounded date interval. Inclusivity is decided by the consumer: the
/// category report filters `(start, end]`, the month-to-date view filters
/// `[start, end]`. `start <= end` is a caller obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Window ending at `end` and starting exactly `months` calendar months
/// earlier. Day-of-month is preserved where the target month has it,
/// otherwise clamped to the month's last day (Mar 31 minus 3 months is
/// Dec 31; May 31 minus 3 months is Feb 28/29).
pub fn trailing_window(end: NaiveDateTime, months: u32) -> Window {
    Window {
        start: end - Months::new(months),
        end,
    }
}

/// Window from the first instant of `instant`'s month up to `instant`.
pub fn month_to_date(instant: NaiveDateTime) -> Window {
    let first = NaiveDate::from_ymd_opt(instant.year(), instant.month(), 1)
        .unwrap_or_else(|| instant.date());
    Window {
        start: first.and_time(NaiveTime::MIN),
        end: instant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_trailing_window_three_months() {
        let w = trailing_window(dt(2022, 1, 1, 0, 0, 0), 3);
        assert_eq!(w.start, dt(2021, 10, 1, 0, 0, 0));
        assert_eq!(w.end, dt(2022, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_trailing_window_end_of_month() {
        let w = trailing_window(dt(2022, 3, 31, 0, 0, 0), 3);
        assert_eq!(w.start, dt(2021, 12, 31, 0, 0, 0));
    }

    #[test]
    fn test_trailing_window_clamps_short_months() {
        // May 31 minus 3 months: February has no day 31
        let w = trailing_window(dt(2022, 5, 31, 0, 0, 0), 3);
        assert_eq!(w.start, dt(2022, 2, 28, 0, 0, 0));
    }

    #[test]
    fn test_month_to_date() {
        let w = month_to_date(dt(2023, 3, 15, 12, 34, 56));
        assert_eq!(w.start, dt(2023, 3, 1, 0, 0, 0));
        assert_eq!(w.end, dt(2023, 3, 15, 12, 34, 56));
    }

    #[test]
    fn test_month_to_date_on_first_instant() {
        let w = month_to_date(dt(2023, 3, 1, 0, 0, 0));
        assert_eq!(w.start, w.end);
    }
}
