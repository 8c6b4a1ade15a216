//! Payloads returned by the nutrition and calendar services
//!
//! Field names follow the services' JSON. Every field is optional so a
//! partially populated response still decodes; unknown fields on the
//! pass-through types are kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Period averages from the range statistics endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeStatistics {
    #[serde(default)]
    pub average_calories: Option<f64>,
    #[serde(default)]
    pub average_protein_g: Option<f64>,
    #[serde(default)]
    pub average_carbs_g: Option<f64>,
    #[serde(default)]
    pub average_fats_g: Option<f64>,
}

/// Water intake for a single day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterIntake {
    #[serde(default, alias = "cupsConsumed")]
    pub cups_consumed: f64,
}

impl WaterIntake {
    /// Fallback used when the water branch fails
    pub fn none() -> Self {
        Self { cups_consumed: 0.0 }
    }
}

/// Monthly goal calendar summary, passed through to the view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarInsights {
    #[serde(default, alias = "monthly_progress")]
    pub monthly_progress: Option<f64>,
    #[serde(default, alias = "total_goal_days")]
    pub total_goal_days: Option<u32>,
    #[serde(default, alias = "motivational_message")]
    pub motivational_message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Plan usage counters, passed through to the view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub meal_scans_used: Option<u32>,
    #[serde(default)]
    pub meal_scans_limit: Option<u32>,
    #[serde(default)]
    pub ai_requests_used: Option<u32>,
    #[serde(default)]
    pub ai_requests_limit: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
