//! Data source seam
//!
//! The statistics fetcher only depends on this trait, so the HTTP client can
//! be swapped for an in-memory source in tests.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::ClientResult;
use crate::models::{CalendarInsights, RangeStatistics, UsageStats, WaterIntake};

/// Remote services backing the statistics screen
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Period averages for `[start, end]`; `Ok(None)` when the service has no data
    async fn get_range_statistics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Option<RangeStatistics>>;

    /// Goal calendar summary for a month (1-based)
    async fn get_calendar_statistics(&self, year: i32, month: u32) -> ClientResult<CalendarInsights>;

    /// Plan usage counters
    async fn get_usage_stats(&self) -> ClientResult<UsageStats>;

    /// Water intake for one day
    async fn get_water_intake(&self, date: NaiveDate) -> ClientResult<WaterIntake>;
}
