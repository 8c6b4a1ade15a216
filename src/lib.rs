//! Nutrition Statistics (nutristats) Library
//!
//! Aggregates period nutrition statistics from several remote sources into a
//! single view model.

pub mod build_info;
pub mod client;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod stats;
pub mod tools;
