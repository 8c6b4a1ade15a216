//! Nutristats MCP Server Implementation
//!
//! Exposes the statistics session as MCP tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::stats::StatsSession;
use crate::tools::statistics;
use crate::tools::status::StatusTracker;

/// Nutristats MCP Service
#[derive(Clone)]
pub struct NutristatsService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    session: Arc<StatsSession>,
    tool_router: ToolRouter<NutristatsService>,
}

impl NutristatsService {
    pub fn new(api_base_url: String, session: Arc<StatsSession>) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(api_base_url))),
            session,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutritionStatisticsParams {
    /// Period to show: "week", "month" or "3months". Omit to keep the current selection.
    pub period: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutristatsService {
    // --- Status ---

    #[tool(description = "Get the current status of the nutristats service including build info, remote service URL, fetch cycle counters and process information")]
    async fn stats_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.session).await;
        to_json(&status)
    }

    #[tool(description = "Get instructions for reading nutrition statistics. Call this when unsure what the statistics fields mean.")]
    fn statistics_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::STATISTICS_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(STATISTICS_INSTRUCTIONS)]))
    }

    // --- Statistics ---

    #[tool(description = "Get nutrition statistics (calories, protein, carbs, fats, water) with goal progress and trends for a period, plus monthly goal and usage panels")]
    async fn nutrition_statistics(&self, Parameters(p): Parameters<NutritionStatisticsParams>) -> Result<CallToolResult, McpError> {
        let result = statistics::get_statistics(&self.session, p.period.as_deref(), statistics::today())
            .await
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Re-fetch nutrition statistics for the selected period")]
    async fn refresh_statistics(&self) -> Result<CallToolResult, McpError> {
        let result = statistics::refresh_statistics(&self.session, statistics::today()).await;
        to_json(&result)
    }

    #[tool(description = "List the selectable statistics periods with the current selection marked")]
    async fn list_periods(&self) -> Result<CallToolResult, McpError> {
        let result = statistics::list_periods(&self.session).await;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutristatsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutristats".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Nutrition Statistics".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Nutrition Statistics - period averages of calories, macros and water against daily goals. \
                 Call statistics_instructions first if unsure how to read the results. \
                 Statistics: nutrition_statistics (optional period: week/month/3months), refresh_statistics, list_periods. \
                 Status: stats_status."
                    .into(),
            ),
        }
    }
}
