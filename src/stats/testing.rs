//! Scripted in-memory source for statistics tests

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Map;
use tokio::sync::Notify;

use super::fetcher::SourceBranch;
use crate::client::{ClientError, ClientResult, StatsSource};
use crate::models::{format_date, CalendarInsights, RangeStatistics, UsageStats, WaterIntake};

pub(crate) fn sample_range_statistics() -> RangeStatistics {
    RangeStatistics {
        average_calories: Some(1847.6),
        average_protein_g: Some(132.2),
        average_carbs_g: Some(201.5),
        average_fats_g: Some(58.4),
    }
}

pub(crate) fn sample_calendar() -> CalendarInsights {
    CalendarInsights {
        monthly_progress: Some(64.0),
        total_goal_days: Some(12),
        motivational_message: Some("Keep going!".to_string()),
        extra: Map::new(),
    }
}

pub(crate) fn sample_usage() -> UsageStats {
    UsageStats {
        meal_scans_used: Some(12),
        meal_scans_limit: None,
        ai_requests_used: Some(40),
        ai_requests_limit: Some(500),
        extra: Map::new(),
    }
}

/// Source whose responses, failures and timing are set up per test
pub(crate) struct ScriptedSource {
    failing: HashSet<SourceBranch>,
    failing_range_starts: HashSet<NaiveDate>,
    range_default: Option<RangeStatistics>,
    range_by_start: HashMap<NaiveDate, Option<RangeStatistics>>,
    gates: HashMap<NaiveDate, Arc<Notify>>,
    cups: f64,
    calls: Mutex<Vec<String>>,
    completed: Mutex<Vec<SourceBranch>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            failing_range_starts: HashSet::new(),
            range_default: Some(sample_range_statistics()),
            range_by_start: HashMap::new(),
            gates: HashMap::new(),
            cups: 6.0,
            calls: Mutex::new(Vec::new()),
            completed: Mutex::new(Vec::new()),
        }
    }

    /// Make every request of `branch` fail
    pub fn failing(mut self, branch: SourceBranch) -> Self {
        self.failing.insert(branch);
        self
    }

    /// Make range statistics fail only for ranges starting on `start`
    pub fn failing_range(mut self, start: NaiveDate) -> Self {
        self.failing_range_starts.insert(start);
        self
    }

    /// Range statistics succeed with a null payload
    pub fn with_empty_range_statistics(mut self) -> Self {
        self.range_default = None;
        self
    }

    /// Answer range statistics for ranges starting on `start` with `stats`
    pub fn with_range(mut self, start: NaiveDate, stats: RangeStatistics) -> Self {
        self.range_by_start.insert(start, Some(stats));
        self
    }

    /// Hold range statistics for `start` until `gate` is notified
    pub fn gated(mut self, start: NaiveDate, gate: Arc<Notify>) -> Self {
        self.gates.insert(start, gate);
        self
    }

    /// Requests issued so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Branches in the order their requests returned
    pub fn completed(&self) -> Vec<SourceBranch> {
        self.completed.lock().unwrap().clone()
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn finish<T>(&self, branch: SourceBranch, value: T) -> ClientResult<T> {
        self.completed.lock().unwrap().push(branch);
        if self.failing.contains(&branch) {
            return Err(ClientError::Unavailable(format!("scripted {} failure", branch)));
        }
        Ok(value)
    }
}

#[async_trait]
impl StatsSource for ScriptedSource {
    async fn get_range_statistics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Option<RangeStatistics>> {
        self.record_call(format!("range:{}..{}", format_date(start), format_date(end)));

        if let Some(gate) = self.gates.get(&start) {
            gate.notified().await;
        }

        if self.failing_range_starts.contains(&start) {
            self.completed.lock().unwrap().push(SourceBranch::RangeStatistics);
            return Err(ClientError::Unavailable("scripted range failure".to_string()));
        }

        let stats = self
            .range_by_start
            .get(&start)
            .cloned()
            .unwrap_or_else(|| self.range_default.clone());
        self.finish(SourceBranch::RangeStatistics, stats)
    }

    async fn get_calendar_statistics(&self, year: i32, month: u32) -> ClientResult<CalendarInsights> {
        self.record_call(format!("calendar:{}-{}", year, month));
        self.finish(SourceBranch::Calendar, sample_calendar())
    }

    async fn get_usage_stats(&self) -> ClientResult<UsageStats> {
        self.record_call("usage".to_string());
        self.finish(SourceBranch::Usage, sample_usage())
    }

    async fn get_water_intake(&self, date: NaiveDate) -> ClientResult<WaterIntake> {
        self.record_call(format!("water:{}", format_date(date)));
        self.finish(SourceBranch::Water, WaterIntake { cups_consumed: self.cups })
    }
}
