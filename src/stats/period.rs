//! Period to date range resolution

use chrono::{Days, Months, NaiveDate};

use crate::models::{DateRange, Period};

/// Resolve a period to the date range ending on `reference`
///
/// Month arithmetic clamps to the last day of the target month
/// (2025-03-31 minus one month is 2025-02-28).
pub fn resolve(period: Period, reference: NaiveDate) -> DateRange {
    let start = match period {
        Period::Week => reference.checked_sub_days(Days::new(7)),
        Period::Month => reference.checked_sub_months(Months::new(1)),
        Period::ThreeMonths => reference.checked_sub_months(Months::new(3)),
    }
    .unwrap_or(NaiveDate::MIN);

    DateRange {
        start,
        end: reference,
    }
}

/// Range of the same period immediately preceding `range`
pub fn preceding(period: Period, range: &DateRange) -> DateRange {
    resolve(period, range.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week() {
        let range = resolve(Period::Week, date(2025, 1, 9));
        assert_eq!(range.start, date(2025, 1, 2));
        assert_eq!(range.end, date(2025, 1, 9));
    }

    #[test]
    fn test_week_crosses_year() {
        let range = resolve(Period::Week, date(2025, 1, 3));
        assert_eq!(range.start_str(), "2024-12-27");
        assert_eq!(range.end_str(), "2025-01-03");
    }

    #[test]
    fn test_month() {
        let range = resolve(Period::Month, date(2025, 6, 15));
        assert_eq!(range.start, date(2025, 5, 15));
    }

    #[test]
    fn test_month_clamps_to_month_end() {
        assert_eq!(resolve(Period::Month, date(2025, 3, 31)).start, date(2025, 2, 28));
        assert_eq!(resolve(Period::Month, date(2024, 3, 31)).start, date(2024, 2, 29));
    }

    #[test]
    fn test_three_months() {
        assert_eq!(resolve(Period::ThreeMonths, date(2025, 2, 10)).start, date(2024, 11, 10));
        assert_eq!(resolve(Period::ThreeMonths, date(2025, 5, 31)).start, date(2025, 2, 28));
    }

    #[test]
    fn test_end_is_reference_and_start_not_after_end() {
        let mut day = date(2023, 12, 1);
        let last = date(2025, 3, 1);
        while day <= last {
            for period in Period::ALL {
                let range = resolve(period, day);
                assert_eq!(range.end, day);
                assert!(range.start <= range.end, "{} {}", period, range);
            }
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_minimum_date_does_not_underflow() {
        let range = resolve(Period::ThreeMonths, NaiveDate::MIN);
        assert_eq!(range.start, NaiveDate::MIN);
        assert_eq!(range.end, NaiveDate::MIN);
    }

    #[test]
    fn test_preceding() {
        let current = resolve(Period::Week, date(2025, 1, 9));
        let prior = preceding(Period::Week, &current);
        assert_eq!(prior.start, date(2024, 12, 26));
        assert_eq!(prior.end, date(2025, 1, 2));
    }
}
