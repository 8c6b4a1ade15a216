//! Nutrition unit handling
//!
//! Conversions applied to remote amounts before they reach the statistics view.

pub mod units;

pub use units::{cups_to_ml, round_amount, ML_PER_WATER_CUP};
