//! Static visual identity per nutrient
//!
//! Kept apart from the aggregation logic and handed to the metric builder.

use crate::models::{MetricStyle, Nutrient};

// ============================================================================
// Color Constants
// ============================================================================

const RED: &str = "#EF4444";
const RED_DARK: &str = "#DC2626";
const GREEN: &str = "#10B981";
const GREEN_DARK: &str = "#059669";
const AMBER: &str = "#F59E0B";
const AMBER_DARK: &str = "#D97706";
const VIOLET: &str = "#8B5CF6";
const VIOLET_DARK: &str = "#7C3AED";
const BLUE: &str = "#3B82F6";
const BLUE_DARK: &str = "#2563EB";

/// Lookup table from nutrient to display style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationTable {
    styles: [(Nutrient, MetricStyle); 5],
}

impl PresentationTable {
    /// The app's standard styles
    pub fn standard() -> Self {
        Self {
            styles: [
                (
                    Nutrient::Calories,
                    MetricStyle { title: "Calories", color: RED, gradient: [RED, RED_DARK], icon: "flame" },
                ),
                (
                    Nutrient::Protein,
                    MetricStyle { title: "Protein", color: GREEN, gradient: [GREEN, GREEN_DARK], icon: "apple" },
                ),
                (
                    Nutrient::Carbs,
                    MetricStyle { title: "Carbs", color: AMBER, gradient: [AMBER, AMBER_DARK], icon: "activity" },
                ),
                (
                    Nutrient::Fats,
                    MetricStyle { title: "Fats", color: VIOLET, gradient: [VIOLET, VIOLET_DARK], icon: "droplets" },
                ),
                (
                    Nutrient::Water,
                    MetricStyle { title: "Hydration", color: BLUE, gradient: [BLUE, BLUE_DARK], icon: "droplets" },
                ),
            ],
        }
    }

    /// Replace the style of one nutrient
    pub fn with_style(mut self, nutrient: Nutrient, style: MetricStyle) -> Self {
        for entry in self.styles.iter_mut() {
            if entry.0 == nutrient {
                entry.1 = style;
            }
        }
        self
    }

    /// Style for a nutrient
    pub fn style(&self, nutrient: Nutrient) -> MetricStyle {
        self.styles
            .iter()
            .find(|(n, _)| *n == nutrient)
            .map(|(_, style)| *style)
            .unwrap_or(MetricStyle {
                title: nutrient.id(),
                color: GREEN,
                gradient: [GREEN, GREEN_DARK],
                icon: "activity",
            })
    }
}

impl Default for PresentationTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_titles() {
        let table = PresentationTable::standard();
        let titles: Vec<&str> = Nutrient::ALL.iter().map(|n| table.style(*n).title).collect();
        assert_eq!(titles, vec!["Calories", "Protein", "Carbs", "Fats", "Hydration"]);
    }

    #[test]
    fn test_gradient_starts_with_color() {
        let table = PresentationTable::standard();
        for nutrient in Nutrient::ALL {
            let style = table.style(nutrient);
            assert_eq!(style.gradient[0], style.color);
        }
    }

    #[test]
    fn test_with_style_overrides_one_entry() {
        let custom = MetricStyle { title: "Water", color: "#000000", gradient: ["#000000", "#111111"], icon: "cup" };
        let table = PresentationTable::standard().with_style(Nutrient::Water, custom);
        assert_eq!(table.style(Nutrient::Water), custom);
        assert_eq!(table.style(Nutrient::Calories).title, "Calories");
    }
}
