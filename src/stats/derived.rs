//! Expand `StatsData` into display metrics

use crate::models::{DerivedMetric, Nutrient, StatsData, TrendDirection};

use super::presentation::PresentationTable;

/// One metric per nutrient, in display order (calories, protein, carbs, fats, water)
pub fn build(stats: &StatsData, table: &PresentationTable) -> Vec<DerivedMetric> {
    Nutrient::ALL
        .iter()
        .map(|&nutrient| {
            let value = stats.current.get(nutrient);
            let goal = stats.goals.get(nutrient);
            let trend = stats.trends.get(nutrient);
            let style = table.style(nutrient);

            DerivedMetric {
                id: nutrient,
                title: style.title,
                value,
                goal,
                unit: nutrient.unit(),
                trend,
                trend_direction: TrendDirection::from_change(trend),
                trend_label: trend_label(trend),
                percentage: percent_of_goal(value, goal),
                color: style.color,
                gradient: style.gradient,
                icon: style.icon,
            }
        })
        .collect()
}

/// `round(value / goal * 100)` clamped to 0..=100
pub fn percent_of_goal(value: f64, goal: f64) -> u8 {
    if goal <= 0.0 || !goal.is_finite() || !value.is_finite() {
        return 0;
    }
    (value / goal * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Trend formatted with one decimal and an explicit sign for gains
pub fn trend_label(trend: f64) -> String {
    if trend == 0.0 {
        "0.0%".to_string()
    } else if trend > 0.0 {
        format!("+{:.1}%", trend)
    } else {
        format!("{:.1}%", trend)
    }
}
