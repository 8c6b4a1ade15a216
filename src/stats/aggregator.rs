//! Merge fetched sources into `StatsData`
//!
//! Range statistics are the primary source. Without them the previous
//! `StatsData` is kept as-is; a cycle never half-updates the snapshot.

use crate::models::{
    CalendarInsights, Nutrient, NutritionSnapshot, RangeStatistics, StatsData, UsageStats,
    WaterIntake,
};
use crate::nutrition::{cups_to_ml, round_amount};

use super::fetcher::{Branch, FetchResults};

/// Result of aggregating one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub stats: StatsData,
    pub calendar: Option<CalendarInsights>,
    pub usage: Option<UsageStats>,
    /// True when `stats` was rebuilt from fresh range statistics
    pub primary_fresh: bool,
}

/// Aggregate fetch results on top of the previous statistics
///
/// `baseline` is the preceding period's observed averages, if known; it only
/// feeds the trend values.
pub fn aggregate(
    previous: &StatsData,
    results: FetchResults,
    baseline: Option<&NutritionSnapshot>,
) -> Aggregation {
    let water_fresh = results.water.is_fresh();
    let water = results.water.into_value();

    let (stats, primary_fresh) = match results.range_statistics {
        Branch::Fresh(Some(range)) => {
            let current = current_from(&range, &water);
            let trends = compute_trends(
                &current,
                |n: Nutrient| is_observed(&range, water_fresh, n),
                baseline,
            );
            let stats = StatsData {
                current,
                goals: NutritionSnapshot::default_goals(),
                trends,
            };
            (stats, true)
        }
        Branch::Fresh(None) | Branch::Fallback(_) => (previous.clone(), false),
    };

    Aggregation {
        stats,
        calendar: results.calendar.into_value(),
        usage: results.usage.into_value(),
        primary_fresh,
    }
}

/// Observed averages, rounded to whole units; water converted from cups
pub fn current_from(range: &RangeStatistics, water: &WaterIntake) -> NutritionSnapshot {
    let amount = |value: Option<f64>| round_amount(value.unwrap_or(0.0));

    NutritionSnapshot {
        calories: amount(range.average_calories),
        protein: amount(range.average_protein_g),
        carbs: amount(range.average_carbs_g),
        fats: amount(range.average_fats_g),
        water: cups_to_ml(water.cups_consumed),
    }
}

/// Whether `nutrient` has a value reported this cycle
///
/// Macros come from range statistics; water counts only when its request
/// succeeded.
pub fn is_observed(range: &RangeStatistics, water_fresh: bool, nutrient: Nutrient) -> bool {
    match nutrient {
        Nutrient::Calories => range.average_calories.is_some(),
        Nutrient::Protein => range.average_protein_g.is_some(),
        Nutrient::Carbs => range.average_carbs_g.is_some(),
        Nutrient::Fats => range.average_fats_g.is_some(),
        Nutrient::Water => water_fresh,
    }
}

/// Per-nutrient percentage change against `baseline`
///
/// Zero without a baseline, and for nutrients not observed this cycle.
pub fn compute_trends(
    current: &NutritionSnapshot,
    observed: impl Fn(Nutrient) -> bool,
    baseline: Option<&NutritionSnapshot>,
) -> NutritionSnapshot {
    match baseline {
        Some(prior) => NutritionSnapshot::from_fn(|n: Nutrient| {
            if observed(n) {
                percent_change(current.get(n), prior.get(n))
            } else {
                0.0
            }
        }),
        None => NutritionSnapshot::zero(),
    }
}

/// Signed change from `previous` to `current` as a percentage of `previous`,
/// rounded to one decimal
///
/// A non-positive previous value means there is nothing to compare against.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous <= 0.0 || !previous.is_finite() || !current.is_finite() {
        return 0.0;
    }
    let change = (current - previous) / previous * 100.0;
    // + 0.0 folds -0.0 into 0.0
    (change * 10.0).round() / 10.0 + 0.0
}
