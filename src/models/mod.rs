//! Data models
//!
//! Rust structs for periods, nutrition snapshots, remote payloads and
//! display metrics.

mod metric;
mod nutrition;
mod period;
mod remote;

pub use metric::{DerivedMetric, MetricStyle, TrendDirection};
pub use nutrition::{Nutrient, NutritionSnapshot, StatsData};
pub use period::{format_date, DateRange, ParsePeriodError, Period};
pub use remote::{CalendarInsights, RangeStatistics, UsageStats, WaterIntake};
