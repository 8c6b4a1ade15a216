//! Statistics session
//!
//! Owns the selected period and the last accepted statistics, and runs fetch
//! cycles. Each cycle gets an increasing id when dispatched; when it settles
//! it is applied only if no newer cycle was dispatched in the meantime, so a
//! slow earlier cycle can never overwrite a later one. The state lock is
//! never held across the fetch.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::client::StatsSource;
use crate::models::{
    CalendarInsights, DateRange, NutritionSnapshot, Period, StatsData, UsageStats,
};

use super::aggregator::aggregate;
use super::derived::build;
use super::fetcher::fetch_all;
use super::period::{preceding, resolve};
use super::presentation::PresentationTable;
use super::view::{CalendarPanel, StatisticsView, UsagePanel};

/// Accepted snapshots kept as trend baselines
const HISTORY_LIMIT: usize = 64;

/// What started a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleTrigger {
    Initial,
    PeriodChange,
    Refresh,
}

/// How a settled cycle was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Results replaced the session state
    Applied,
    /// A newer cycle was dispatched first; results were dropped
    Superseded { latest: u64 },
}

/// Summary of one settled cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub cycle: u64,
    pub trigger: CycleTrigger,
    pub period: Period,
    pub range: DateRange,
    pub outcome: CycleOutcome,
    /// Range statistics arrived with data
    pub primary_fresh: bool,
    /// Branches that fell back this cycle
    pub fallbacks: usize,
}

/// Cycle bookkeeping, exposed through the status tool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CycleCounters {
    pub dispatched: u64,
    pub applied: u64,
    pub discarded: u64,
}

struct SessionState {
    period: Period,
    stats: StatsData,
    calendar: Option<CalendarInsights>,
    usage: Option<UsageStats>,
    /// Range the current averages were computed over
    range: Option<DateRange>,
    latest_dispatched: u64,
    latest_applied: u64,
    initial_load: bool,
    refreshing: bool,
    history: BTreeMap<DateRange, NutritionSnapshot>,
    counters: CycleCounters,
}

impl SessionState {
    fn new(period: Period) -> Self {
        Self {
            period,
            stats: StatsData::default(),
            calendar: None,
            usage: None,
            range: None,
            latest_dispatched: 0,
            latest_applied: 0,
            initial_load: true,
            refreshing: false,
            history: BTreeMap::new(),
            counters: CycleCounters::default(),
        }
    }

    fn remember(&mut self, range: DateRange, current: NutritionSnapshot) {
        self.history.insert(range, current);
        while self.history.len() > HISTORY_LIMIT {
            let Some(oldest) = self.history.keys().next().copied() else {
                break;
            };
            self.history.remove(&oldest);
        }
    }
}

/// Statistics screen state and its fetch cycles
pub struct StatsSession {
    source: Arc<dyn StatsSource>,
    table: PresentationTable,
    state: Mutex<SessionState>,
}

impl StatsSession {
    /// Create a session with `period` selected and nothing loaded yet
    pub fn new(source: Arc<dyn StatsSource>, period: Period) -> Self {
        Self {
            source,
            table: PresentationTable::standard(),
            state: Mutex::new(SessionState::new(period)),
        }
    }

    /// Use a custom presentation table for metric styles
    pub fn with_presentation(mut self, table: PresentationTable) -> Self {
        self.table = table;
        self
    }

    /// First load of the selected period
    pub async fn load(&self, today: NaiveDate) -> CycleReport {
        self.run_cycle(CycleTrigger::Initial, None, today).await
    }

    /// Select a period and load it
    pub async fn select_period(&self, period: Period, today: NaiveDate) -> CycleReport {
        self.run_cycle(CycleTrigger::PeriodChange, Some(period), today)
            .await
    }

    /// User-triggered reload of the selected period
    pub async fn refresh(&self, today: NaiveDate) -> CycleReport {
        self.run_cycle(CycleTrigger::Refresh, None, today).await
    }

    /// Currently selected period
    pub async fn period(&self) -> Period {
        self.state.lock().await.period
    }

    /// Whether any cycle has been applied
    pub async fn has_loaded(&self) -> bool {
        self.state.lock().await.latest_applied > 0
    }

    /// Last accepted statistics
    pub async fn stats(&self) -> StatsData {
        self.state.lock().await.stats.clone()
    }

    pub async fn counters(&self) -> CycleCounters {
        self.state.lock().await.counters
    }

    /// Build the view model from the last accepted cycle
    pub async fn view(&self) -> StatisticsView {
        let state = self.state.lock().await;
        StatisticsView {
            period: state.period,
            period_label: state.period.label(),
            date_range: state.range,
            metrics: build(&state.stats, &self.table),
            calendar: state.calendar.as_ref().map(CalendarPanel::from),
            usage: state.usage.as_ref().map(UsagePanel::from),
            initial_load: state.initial_load,
            refreshing: state.refreshing,
            cycle: state.latest_applied,
        }
    }

    async fn run_cycle(
        &self,
        trigger: CycleTrigger,
        period: Option<Period>,
        today: NaiveDate,
    ) -> CycleReport {
        let (cycle, period, range) = {
            let mut state = self.state.lock().await;
            if let Some(period) = period {
                state.period = period;
            }
            if trigger == CycleTrigger::Refresh {
                state.refreshing = true;
            }
            state.latest_dispatched += 1;
            state.counters.dispatched += 1;
            (state.latest_dispatched, state.period, resolve(state.period, today))
        };

        tracing::info!(cycle, %period, %range, ?trigger, "Dispatching statistics cycle");

        let results = fetch_all(self.source.as_ref(), &range, today).await;
        let fallbacks = results.fallback_count();

        let mut state = self.state.lock().await;

        if cycle != state.latest_dispatched {
            state.counters.discarded += 1;
            tracing::warn!(
                cycle,
                latest = state.latest_dispatched,
                "Discarding results of superseded statistics cycle"
            );
            return CycleReport {
                cycle,
                trigger,
                period,
                range,
                outcome: CycleOutcome::Superseded {
                    latest: state.latest_dispatched,
                },
                primary_fresh: results.range_statistics.is_fresh()
                    && results.range_statistics.value().is_some(),
                fallbacks,
            };
        }

        let baseline = state.history.get(&preceding(period, &range)).copied();
        let aggregation = aggregate(&state.stats, results, baseline.as_ref());

        if aggregation.primary_fresh {
            state.remember(range, aggregation.stats.current);
            state.range = Some(range);
        }
        state.stats = aggregation.stats;
        state.calendar = aggregation.calendar;
        state.usage = aggregation.usage;
        state.latest_applied = cycle;
        state.initial_load = false;
        state.refreshing = false;
        state.counters.applied += 1;

        tracing::info!(
            cycle,
            primary_fresh = aggregation.primary_fresh,
            fallbacks,
            "Applied statistics cycle"
        );

        CycleReport {
            cycle,
            trigger,
            period,
            range,
            outcome: CycleOutcome::Applied,
            primary_fresh: aggregation.primary_fresh,
            fallbacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Notify;

    use crate::models::{Nutrient, RangeStatistics};
    use crate::stats::fetcher::SourceBranch;
    use crate::stats::testing::ScriptedSource;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month_stats() -> RangeStatistics {
        RangeStatistics {
            average_calories: Some(2100.0),
            average_protein_g: Some(140.0),
            average_carbs_g: Some(260.0),
            average_fats_g: Some(70.0),
        }
    }

    #[tokio::test]
    async fn test_initial_state_before_any_cycle() {
        let session = StatsSession::new(Arc::new(ScriptedSource::new()), Period::Week);

        let view = session.view().await;

        assert!(view.initial_load);
        assert!(!view.refreshing);
        assert_eq!(view.cycle, 0);
        assert_eq!(view.date_range, None);
        assert_eq!(view.metrics.len(), 5);
        assert!(!session.has_loaded().await);
    }

    #[tokio::test]
    async fn test_load_applies_fresh_statistics() {
        let today = date(2025, 1, 9);
        let session = StatsSession::new(Arc::new(ScriptedSource::new()), Period::Week);

        let report = session.load(today).await;

        assert_eq!(report.outcome, CycleOutcome::Applied);
        assert_eq!(report.cycle, 1);
        assert!(report.primary_fresh);
        assert_eq!(report.fallbacks, 0);

        let view = session.view().await;
        assert!(!view.initial_load);
        assert_eq!(view.date_range, Some(resolve(Period::Week, today)));
        assert_eq!(view.metrics[0].value, 1848.0);
        assert_eq!(view.metrics[4].value, 1500.0);
        assert_eq!(view.calendar.as_ref().map(|c| c.total_goal_days), Some(12));
        assert_eq!(view.usage.as_ref().map(|u| u.meal_scans.limit), Some(100));
    }

    #[tokio::test]
    async fn test_primary_failure_keeps_previous_current() {
        let first_day = date(2025, 1, 9);
        let second_day = date(2025, 1, 10);
        let failing_start = resolve(Period::Week, second_day).start;
        let source = ScriptedSource::new().failing_range(failing_start);
        let session = StatsSession::new(Arc::new(source), Period::Week);

        session.load(first_day).await;
        let before = session.stats().await;
        let report = session.refresh(second_day).await;

        assert_eq!(report.outcome, CycleOutcome::Applied);
        assert!(!report.primary_fresh);
        assert_eq!(report.fallbacks, 1);
        assert_eq!(session.stats().await, before);

        let view = session.view().await;
        assert!(view.calendar.is_some());
        assert!(view.usage.is_some());
        assert_eq!(view.date_range, Some(resolve(Period::Week, first_day)));
    }

    #[tokio::test]
    async fn test_total_failure_yields_defaults() {
        let source = ScriptedSource::new()
            .failing(SourceBranch::RangeStatistics)
            .failing(SourceBranch::Calendar)
            .failing(SourceBranch::Usage)
            .failing(SourceBranch::Water);
        let session = StatsSession::new(Arc::new(source), Period::Month);

        let report = session.load(date(2025, 1, 9)).await;

        assert_eq!(report.fallbacks, 4);
        assert_eq!(session.stats().await, StatsData::default());
        let view = session.view().await;
        assert!(!view.initial_load);
        assert_eq!(view.calendar, None);
        assert_eq!(view.usage, None);
        assert_eq!(view.metrics.len(), 5);
        assert!(view.metrics.iter().all(|m| m.percentage == 0));
    }

    #[tokio::test]
    async fn test_late_earlier_cycle_is_discarded() {
        let today = date(2025, 1, 9);
        let week_start = resolve(Period::Week, today).start;
        let month_start = resolve(Period::Month, today).start;
        let gate = Arc::new(Notify::new());
        let source = ScriptedSource::new()
            .gated(week_start, gate.clone())
            .with_range(month_start, month_stats());
        let session = StatsSession::new(Arc::new(source), Period::Week);

        let first = session.load(today);
        let second = async {
            let report = session.select_period(Period::Month, today).await;
            // Let the week cycle settle only after the month cycle was applied
            gate.notify_one();
            report
        };
        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.cycle, 1);
        assert_eq!(first.outcome, CycleOutcome::Superseded { latest: 2 });
        assert_eq!(second.cycle, 2);
        assert_eq!(second.outcome, CycleOutcome::Applied);

        let view = session.view().await;
        assert_eq!(view.period, Period::Month);
        assert_eq!(view.cycle, 2);
        assert_eq!(view.metrics[0].value, 2100.0);
        assert_eq!(view.date_range, Some(resolve(Period::Month, today)));

        let counters = session.counters().await;
        assert_eq!(counters, CycleCounters { dispatched: 2, applied: 1, discarded: 1 });
    }

    #[tokio::test]
    async fn test_refreshing_flag_while_in_flight() {
        let today = date(2025, 1, 9);
        let gate = Arc::new(Notify::new());
        let source = Arc::new(
            ScriptedSource::new().gated(resolve(Period::Week, today).start, gate.clone()),
        );
        let session = StatsSession::new(source.clone(), Period::Week);

        let observe = async {
            while source.calls().len() < 4 {
                tokio::task::yield_now().await;
            }
            let view = session.view().await;
            gate.notify_one();
            view
        };
        let (report, during) = tokio::join!(session.refresh(today), observe);

        assert!(during.refreshing);
        assert!(during.initial_load);
        assert_eq!(report.trigger, CycleTrigger::Refresh);

        let after = session.view().await;
        assert!(!after.refreshing);
        assert!(!after.initial_load);
    }

    #[tokio::test]
    async fn test_trend_against_preceding_period() {
        let first_day = date(2025, 1, 9);
        let second_day = date(2025, 1, 16);
        let second_start = resolve(Period::Week, second_day).start;
        let source = ScriptedSource::new().with_range(
            second_start,
            RangeStatistics {
                average_calories: Some(2032.8),
                average_protein_g: Some(132.0),
                average_carbs_g: Some(181.8),
                average_fats_g: Some(58.0),
            },
        );
        let session = StatsSession::new(Arc::new(source), Period::Week);

        session.load(first_day).await;
        assert_eq!(session.stats().await.trends, NutritionSnapshot::zero());

        session.refresh(second_day).await;
        let stats = session.stats().await;

        assert_eq!(stats.trends.get(Nutrient::Calories), 10.0);
        assert_eq!(stats.trends.get(Nutrient::Protein), 0.0);
        assert_eq!(stats.trends.get(Nutrient::Carbs), -9.9);
        assert_eq!(stats.trends.get(Nutrient::Water), 0.0);
    }

    #[tokio::test]
    async fn test_select_period_updates_selection() {
        let session = StatsSession::new(Arc::new(ScriptedSource::new()), Period::Week);

        let report = session.select_period(Period::ThreeMonths, date(2025, 5, 31)).await;

        assert_eq!(report.trigger, CycleTrigger::PeriodChange);
        assert_eq!(report.range.start, date(2025, 2, 28));
        assert_eq!(session.period().await, Period::ThreeMonths);
        assert_eq!(session.view().await.period_label, "3 Months");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut state = SessionState::new(Period::Week);
        let mut day = date(2024, 1, 1);
        for _ in 0..(HISTORY_LIMIT + 10) {
            state.remember(resolve(Period::Week, day), NutritionSnapshot::zero());
            day = day.succ_opt().unwrap();
        }
        assert_eq!(state.history.len(), HISTORY_LIMIT);
        assert!(!state.history.contains_key(&resolve(Period::Week, date(2024, 1, 1))));
    }
}
