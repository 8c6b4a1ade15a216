//! Unit conversion constants and amount normalization
//!
//! Water intake is reported by the service in cups; the statistics screen
//! shows milliliters.

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per tracked water cup (the app's cup, not the US cup)
pub const ML_PER_WATER_CUP: f64 = 250.0;

// ============================================================================
// Conversions
// ============================================================================

/// Convert water cups to whole milliliters
pub fn cups_to_ml(cups: f64) -> f64 {
    round_amount(cups * ML_PER_WATER_CUP)
}

/// Round an amount to the nearest whole unit, never below zero
///
/// Non-finite input (NaN, infinity) is treated as "no data" and yields 0.
pub fn round_amount(amount: f64) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }
    amount.round().max(0.0)
}
