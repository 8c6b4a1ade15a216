//! Display-ready metric records

use serde::Serialize;

use super::Nutrient;

/// Direction of a period-over-period change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    /// Classify a signed percentage change
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            TrendDirection::Up
        } else if change < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Neutral
        }
    }
}

/// Visual identity of a nutrient (static per nutrient)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricStyle {
    pub title: &'static str,
    pub color: &'static str,
    pub gradient: [&'static str; 2],
    pub icon: &'static str,
}

/// One nutrient's value, goal and comparison values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetric {
    pub id: Nutrient,
    pub title: &'static str,
    pub value: f64,
    pub goal: f64,
    pub unit: &'static str,
    pub trend: f64,
    pub trend_direction: TrendDirection,
    pub trend_label: String,
    /// Progress toward the goal, 0..=100
    pub percentage: u8,
    pub color: &'static str,
    pub gradient: [&'static str; 2],
    pub icon: &'static str,
}
