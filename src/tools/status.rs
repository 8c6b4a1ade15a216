//! Nutristats Status Tool
//!
//! Provides runtime status information about the statistics service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::stats::{CycleCounters, StatsSession};

/// Usage instructions for AI assistants
pub const STATISTICS_INSTRUCTIONS: &str = r#"
# Nutrition Statistics Instructions

## Periods

- `week`: the last 7 days up to today
- `month`: one calendar month back from today
- `3months`: three calendar months back from today

## Tools

- `nutrition_statistics` - returns the statistics view. Pass `period` to switch windows.
- `refresh_statistics` - re-fetches the selected period.
- `list_periods` - selector options with the current selection marked.
- `stats_status` - build, uptime and cycle counters.

## Reading the view

- `metrics` always has five entries in this order: calories, protein, carbs, fats, water.
- `percentage` is progress toward the goal, capped at 100.
- `trend` compares against the preceding period of the same length. 0 means no earlier data.
- `calendar` and `usage` are null when their service did not answer.
- If the statistics service is down, the previous numbers are kept. Nothing is reported as an error.
"#;

/// Runtime status of the statistics service
#[derive(Debug, Clone, Serialize)]
pub struct NutristatsStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Remote service
    pub api_base_url: String,

    /// Fetch cycles
    pub selected_period: String,
    pub cycles: CycleCounters,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    api_base_url: String,
}

impl StatusTracker {
    pub fn new(api_base_url: String) -> Self {
        Self {
            start_time: Instant::now(),
            api_base_url,
        }
    }

    /// Get the current status
    pub async fn get_status(&self, session: &StatsSession) -> NutristatsStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NutristatsStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            api_base_url: self.api_base_url.clone(),
            selected_period: session.period().await.key().to_string(),
            cycles: session.counters().await,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::Period;
    use crate::stats::testing::ScriptedSource;

    #[tokio::test]
    async fn test_status_reports_cycles() {
        let session = StatsSession::new(Arc::new(ScriptedSource::new()), Period::Month);
        session.load(chrono::NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()).await;
        let tracker = StatusTracker::new("http://localhost:5000/api".to_string());

        let status = tracker.get_status(&session).await;

        assert_eq!(status.api_base_url, "http://localhost:5000/api");
        assert_eq!(status.selected_period, "month");
        assert_eq!(status.cycles.dispatched, 1);
        assert_eq!(status.cycles.applied, 1);
        assert_eq!(status.process_id, std::process::id());
    }
}
