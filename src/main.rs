//! Nutrition Statistics (nutristats)
//!
//! An MCP server presenting period nutrition statistics.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutristats::build_info;
use nutristats::client::HttpStatsClient;
use nutristats::config::Config;
use nutristats::mcp::NutristatsService;
use nutristats::stats::StatsSession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutristats=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    build_info::print_startup_banner(&config.api_base_url);
    eprintln!("Default period: {}", config.default_period.label());
    eprintln!("Starting MCP server on stdio...");

    let client = HttpStatsClient::from_config(&config)?;
    let session = Arc::new(StatsSession::new(Arc::new(client), config.default_period));

    let service = NutristatsService::new(config.api_base_url.clone(), session);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
