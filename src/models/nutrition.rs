//! Shared nutrition data structures
//!
//! A snapshot holds one value per tracked nutrient. `StatsData` groups the
//! three facets (observed, goal, trend) shown on the statistics screen.

use serde::{Deserialize, Serialize};

/// Nutrients tracked on the statistics screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fats,
    Water,
}

impl Nutrient {
    /// All nutrients in display order
    pub const ALL: [Nutrient; 5] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fats,
        Nutrient::Water,
    ];

    /// Stable identifier used in serialized metrics
    pub fn id(&self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Fats => "fats",
            Nutrient::Water => "water",
        }
    }

    /// Display unit for amounts of this nutrient
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein | Nutrient::Carbs | Nutrient::Fats => "g",
            Nutrient::Water => "ml",
        }
    }
}

/// One value per nutrient
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionSnapshot {
    pub calories: f64, // kcal
    pub protein: f64,  // grams
    pub carbs: f64,    // grams
    pub fats: f64,     // grams
    pub water: f64,    // milliliters
}

impl NutritionSnapshot {
    /// Snapshot with every nutrient at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Fixed daily targets
    pub const fn default_goals() -> Self {
        Self {
            calories: 2000.0,
            protein: 150.0,
            carbs: 250.0,
            fats: 67.0,
            water: 2000.0,
        }
    }

    /// Value for a single nutrient
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fats => self.fats,
            Nutrient::Water => self.water,
        }
    }

    /// Build a snapshot by evaluating `f` for each nutrient
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Nutrient) -> f64,
    {
        Self {
            calories: f(Nutrient::Calories),
            protein: f(Nutrient::Protein),
            carbs: f(Nutrient::Carbs),
            fats: f(Nutrient::Fats),
            water: f(Nutrient::Water),
        }
    }
}

/// Aggregated statistics for one fetch cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsData {
    /// Observed period averages
    pub current: NutritionSnapshot,
    /// Targets
    pub goals: NutritionSnapshot,
    /// Signed percentage change against the preceding period
    pub trends: NutritionSnapshot,
}

impl Default for StatsData {
    fn default() -> Self {
        Self {
            current: NutritionSnapshot::zero(),
            goals: NutritionSnapshot::default_goals(),
            trends: NutritionSnapshot::zero(),
        }
    }
}
