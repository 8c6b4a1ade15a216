//! Nutristats Tools module
//!
//! MCP tool implementations for the statistics service.

pub mod statistics;
pub mod status;
