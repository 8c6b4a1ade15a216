//! HTTP client for the nutrition and calendar services
//!
//! Thin reqwest wrapper: one GET per source, JSON decoding, and unwrapping of
//! the `{ "data": ... }` envelope. Range statistics only count when they come
//! inside the envelope; the other endpoints also accept a bare payload.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ClientError, ClientResult, StatsSource};
use crate::config::Config;
use crate::models::{format_date, CalendarInsights, RangeStatistics, UsageStats, WaterIntake};

/// Statistics source backed by the remote REST API
pub struct HttpStatsClient {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl HttpStatsClient {
    /// Create a client for `base_url`
    pub fn new(base_url: &str, api_token: Option<String>, timeout: Duration) -> ClientResult<Self> {
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client,
        })
    }

    /// Create a client from the loaded configuration
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::new(&config.api_base_url, config.api_token.clone(), config.request_timeout)
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> ClientResult<String> {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, "GET");

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let text = self.get_body(path, query).await?;
        decode_payload(&text)
    }
}

/// Reject a 2xx body that reports `"success": false`
fn check_success(value: &Value) -> ClientResult<()> {
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let reason = value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("request was not successful");
        return Err(ClientError::Unavailable(reason.to_string()));
    }
    Ok(())
}

/// Decode a response body, unwrapping a top-level `data` envelope if present
pub fn decode_payload<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    let value: Value = serde_json::from_str(body)?;
    check_success(&value)?;
    let payload = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    Ok(serde_json::from_value(payload)?)
}

/// Decode a body whose payload must sit under a top-level `data` key
///
/// A body without the key carries no data and decodes to `None`.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> ClientResult<Option<T>> {
    let value: Value = serde_json::from_str(body)?;
    check_success(&value)?;
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => Ok(serde_json::from_value(data)?),
            None => {
                tracing::warn!("Response has no data envelope, treating as empty");
                Ok(None)
            }
        },
        _ => Ok(None),
    }
}

#[async_trait]
impl StatsSource for HttpStatsClient {
    async fn get_range_statistics(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Option<RangeStatistics>> {
        let text = self
            .get_body(
                "nutrition/stats/range",
                &[("startDate", format_date(start)), ("endDate", format_date(end))],
            )
            .await?;
        decode_envelope(&text)
    }

    async fn get_calendar_statistics(&self, year: i32, month: u32) -> ClientResult<CalendarInsights> {
        self.get_json(&format!("calendar/statistics/{}/{}", year, month), &[])
            .await
    }

    async fn get_usage_stats(&self) -> ClientResult<UsageStats> {
        self.get_json("nutrition/usage-stats", &[]).await
    }

    async fn get_water_intake(&self, date: NaiveDate) -> ClientResult<WaterIntake> {
        self.get_json(&format!("nutrition/water-intake/{}", format_date(date)), &[])
            .await
    }
}

/// Calendar month (year, 1-based month) containing `date`
pub fn calendar_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
