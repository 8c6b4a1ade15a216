//! Concurrent fetch of the four statistics sources
//!
//! All four requests are started together and awaited together. A failed
//! request never surfaces as an error: it is logged and replaced with its
//! fallback value, and the remaining requests run to completion unaffected.

use std::fmt;
use std::future::Future;

use chrono::NaiveDate;

use crate::client::{calendar_month, ClientResult, StatsSource};
use crate::models::{CalendarInsights, DateRange, RangeStatistics, UsageStats, WaterIntake};

/// The independent requests issued per cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceBranch {
    RangeStatistics,
    Calendar,
    Usage,
    Water,
}

impl fmt::Display for SourceBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceBranch::RangeStatistics => "range_statistics",
            SourceBranch::Calendar => "calendar",
            SourceBranch::Usage => "usage",
            SourceBranch::Water => "water",
        })
    }
}

/// Settled outcome of one branch
#[derive(Debug, Clone, PartialEq)]
pub enum Branch<T> {
    /// The request succeeded
    Fresh(T),
    /// The request failed; holds the branch's fallback value
    Fallback(T),
}

impl<T> Branch<T> {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Branch::Fresh(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Branch::Fresh(v) | Branch::Fallback(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Branch::Fresh(v) | Branch::Fallback(v) => v,
        }
    }
}

/// Outcomes of all four branches of one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResults {
    pub range_statistics: Branch<Option<RangeStatistics>>,
    pub calendar: Branch<Option<CalendarInsights>>,
    pub usage: Branch<Option<UsageStats>>,
    pub water: Branch<WaterIntake>,
}

impl FetchResults {
    /// Every branch at its fallback value
    pub fn all_fallback() -> Self {
        Self {
            range_statistics: Branch::Fallback(None),
            calendar: Branch::Fallback(None),
            usage: Branch::Fallback(None),
            water: Branch::Fallback(WaterIntake::none()),
        }
    }

    /// Number of branches that failed
    pub fn fallback_count(&self) -> usize {
        [
            self.range_statistics.is_fresh(),
            self.calendar.is_fresh(),
            self.usage.is_fresh(),
            self.water.is_fresh(),
        ]
        .iter()
        .filter(|fresh| !**fresh)
        .count()
    }
}

/// Await one request, substituting `fallback` on failure
async fn isolate<T, F>(branch: SourceBranch, request: F, fallback: T) -> Branch<T>
where
    F: Future<Output = ClientResult<T>>,
{
    match request.await {
        Ok(value) => {
            tracing::debug!(%branch, "source responded");
            Branch::Fresh(value)
        }
        Err(e) => {
            tracing::warn!(%branch, error = %e, "source unavailable, using fallback");
            Branch::Fallback(fallback)
        }
    }
}

/// Fetch all sources for `range`; returns once every branch has settled
///
/// Calendar statistics are requested for the month of `reference`; water
/// intake for `range.end`.
pub async fn fetch_all(
    source: &dyn StatsSource,
    range: &DateRange,
    reference: NaiveDate,
) -> FetchResults {
    let (year, month) = calendar_month(reference);

    let (range_statistics, calendar, usage, water) = tokio::join!(
        isolate(
            SourceBranch::RangeStatistics,
            source.get_range_statistics(range.start, range.end),
            None,
        ),
        isolate(
            SourceBranch::Calendar,
            async { source.get_calendar_statistics(year, month).await.map(Some) },
            None,
        ),
        isolate(
            SourceBranch::Usage,
            async { source.get_usage_stats().await.map(Some) },
            None,
        ),
        isolate(
            SourceBranch::Water,
            source.get_water_intake(range.end),
            WaterIntake::none(),
        ),
    );

    FetchResults {
        range_statistics,
        calendar,
        usage,
        water,
    }
}
