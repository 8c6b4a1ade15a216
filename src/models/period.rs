//! Statistics period selection
//!
//! The user picks one of three windows; the window is turned into a concrete
//! date range by `stats::period::resolve`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Selectable statistics window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[default]
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
}

impl Period {
    /// All periods in selector order
    pub const ALL: [Period; 3] = [Period::Week, Period::Month, Period::ThreeMonths];

    /// Wire key ("week", "month", "3months")
    pub fn key(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::ThreeMonths => "3months",
        }
    }

    /// Human-readable selector label
    pub fn label(&self) -> &'static str {
        match self {
            Period::Week => "Week",
            Period::Month => "Month",
            Period::ThreeMonths => "3 Months",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for an unrecognized period string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown period '{0}' (expected week, month or 3months)")]
pub struct ParsePeriodError(pub String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect();

        match normalized.as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "3months" | "threemonths" | "quarter" => Ok(Period::ThreeMonths),
            _ => Err(ParsePeriodError(s.to_string())),
        }
    }
}

/// Inclusive calendar-day range, serialized as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Start date as `YYYY-MM-DD`
    pub fn start_str(&self) -> String {
        format_date(self.start)
    }

    /// End date as `YYYY-MM-DD`
    pub fn end_str(&self) -> String {
        format_date(self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_str(), self.end_str())
    }
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("week".parse::<Period>(), Ok(Period::Week));
        assert_eq!("month".parse::<Period>(), Ok(Period::Month));
        assert_eq!("3months".parse::<Period>(), Ok(Period::ThreeMonths));
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Week".parse::<Period>(), Ok(Period::Week));
        assert_eq!("3 Months".parse::<Period>(), Ok(Period::ThreeMonths));
        assert_eq!(" three_months ".parse::<Period>(), Ok(Period::ThreeMonths));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "year".parse::<Period>().unwrap_err();
        assert_eq!(err, ParsePeriodError("year".to_string()));
    }

    #[test]
    fn test_serde_keys() {
        assert_eq!(serde_json::to_string(&Period::ThreeMonths).unwrap(), "\"3months\"");
        let parsed: Period = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(parsed, Period::Month);
    }

    #[test]
    fn test_date_range_serializes_iso_dates() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
        };
        let json = serde_json::to_value(range).unwrap();
        assert_eq!(json["start"], "2025-01-02");
        assert_eq!(json["end"], "2025-01-09");
        assert_eq!(range.to_string(), "2025-01-02 to 2025-01-09");
    }
}
