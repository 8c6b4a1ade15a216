//! View model handed to the rendering side
//!
//! Panels are only present when their source produced data this cycle.

use serde::Serialize;

use crate::models::{CalendarInsights, DateRange, DerivedMetric, Period, UsageStats};

/// Meal scan limit shown when the service does not report one
pub const DEFAULT_MEAL_SCANS_LIMIT: u32 = 100;
/// AI request limit shown when the service does not report one
pub const DEFAULT_AI_REQUESTS_LIMIT: u32 = 1000;

/// Monthly goal progress panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarPanel {
    pub monthly_progress: f64,
    pub total_goal_days: u32,
    pub motivational_message: Option<String>,
}

impl From<&CalendarInsights> for CalendarPanel {
    fn from(insights: &CalendarInsights) -> Self {
        Self {
            monthly_progress: insights.monthly_progress.unwrap_or(0.0),
            total_goal_days: insights.total_goal_days.unwrap_or(0),
            motivational_message: insights
                .motivational_message
                .clone()
                .filter(|m| !m.trim().is_empty()),
        }
    }
}

/// Used / limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageCounter {
    pub used: u32,
    pub limit: u32,
}

/// Plan usage panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsagePanel {
    pub meal_scans: UsageCounter,
    pub ai_requests: UsageCounter,
}

impl From<&UsageStats> for UsagePanel {
    fn from(usage: &UsageStats) -> Self {
        Self {
            meal_scans: UsageCounter {
                used: usage.meal_scans_used.unwrap_or(0),
                limit: usage.meal_scans_limit.unwrap_or(DEFAULT_MEAL_SCANS_LIMIT),
            },
            ai_requests: UsageCounter {
                used: usage.ai_requests_used.unwrap_or(0),
                limit: usage.ai_requests_limit.unwrap_or(DEFAULT_AI_REQUESTS_LIMIT),
            },
        }
    }
}

/// Everything the statistics screen renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsView {
    pub period: Period,
    pub period_label: &'static str,
    /// Range of the last accepted cycle; `None` before the first one
    pub date_range: Option<DateRange>,
    pub metrics: Vec<DerivedMetric>,
    pub calendar: Option<CalendarPanel>,
    pub usage: Option<UsagePanel>,
    pub initial_load: bool,
    pub refreshing: bool,
    /// Id of the last accepted cycle (0 before the first one)
    pub cycle: u64,
}

/// Entry in the period selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodOption {
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Selector entries with `selected` marked
pub fn period_options(selected: Period) -> Vec<PeriodOption> {
    Period::ALL
        .iter()
        .map(|p| PeriodOption {
            key: p.key(),
            label: p.label(),
            selected: *p == selected,
        })
        .collect()
}
