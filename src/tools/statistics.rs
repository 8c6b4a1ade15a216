//! Statistics MCP Tools
//!
//! Period selection, refresh and the statistics view.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::Period;
use crate::stats::{period_options, CycleReport, PeriodOption, StatisticsView, StatsSession};

/// Response for nutrition_statistics and refresh_statistics
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    #[serde(flatten)]
    pub view: StatisticsView,
    /// Cycle run by this call, if one was needed
    pub last_cycle: Option<CycleReport>,
}

/// Response for list_periods
#[derive(Debug, Serialize)]
pub struct ListPeriodsResponse {
    pub periods: Vec<PeriodOption>,
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Get the statistics view, switching to `period` if given
///
/// A cycle runs when the period changes or nothing has been loaded yet;
/// otherwise the last accepted view is returned as-is.
pub async fn get_statistics(
    session: &StatsSession,
    period: Option<&str>,
    today: NaiveDate,
) -> Result<StatisticsResponse, String> {
    let requested = period
        .map(str::parse::<Period>)
        .transpose()
        .map_err(|e| e.to_string())?;

    let selected = session.period().await;
    let loaded = session.has_loaded().await;

    let report = match requested {
        Some(p) if p != selected => Some(session.select_period(p, today).await),
        _ if !loaded => Some(session.load(today).await),
        _ => None,
    };

    Ok(StatisticsResponse {
        view: session.view().await,
        last_cycle: report,
    })
}

/// Re-fetch the selected period
pub async fn refresh_statistics(session: &StatsSession, today: NaiveDate) -> StatisticsResponse {
    let report = session.refresh(today).await;
    StatisticsResponse {
        view: session.view().await,
        last_cycle: Some(report),
    }
}

/// Period selector options
pub async fn list_periods(session: &StatsSession) -> ListPeriodsResponse {
    ListPeriodsResponse {
        periods: period_options(session.period().await),
    }
}
