//! Statistics aggregation
//!
//! Period resolution, concurrent source fetching, aggregation into
//! `StatsData` and expansion into display metrics, driven by `StatsSession`.

pub mod aggregator;
pub mod derived;
pub mod fetcher;
pub mod period;
pub mod presentation;
pub mod session;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{aggregate, Aggregation};
pub use derived::build;
pub use fetcher::{fetch_all, Branch, FetchResults, SourceBranch};
pub use period::resolve;
pub use presentation::PresentationTable;
pub use session::{CycleCounters, CycleOutcome, CycleReport, CycleTrigger, StatsSession};
pub use view::{period_options, CalendarPanel, PeriodOption, StatisticsView, UsagePanel};
