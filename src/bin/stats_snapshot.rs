//! Print the statistics view for one period as JSON
//!
//! Usage: stats_snapshot [week|month|3months]

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use nutristats::client::HttpStatsClient;
use nutristats::config::Config;
use nutristats::models::Period;
use nutristats::stats::StatsSession;
use nutristats::tools::statistics;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutristats=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let period: Period = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => config.default_period,
    };

    let client = HttpStatsClient::from_config(&config)?;
    let session = StatsSession::new(Arc::new(client), period);

    let response = statistics::get_statistics(&session, None, statistics::today()).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
