use crate::config::Config;
use crate::constants::{LOGS_PATH, REQUEST_COUNT_PATH, RESPONSE_TIME_PATH};
use crate::error::{DashboardError, Result};
use crate::types::{EndpointCount, LatencySample, LogRecord, SourceId, TelemetrySource};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info, instrument};

/// HTTP client for one telemetry source. Base URL is injected at
/// construction; nothing is read from ambient process state per call.
pub struct SourceClient {
    id: SourceId,
    base_url: String,
    client: reqwest::Client,
}

impl SourceClient {
    pub fn new(id: SourceId, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            id,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Builds the client pair (source A, source B) from deployment config.
    pub fn pair(config: &Config) -> (SourceClient, SourceClient) {
        (
            SourceClient::new(SourceId::A, config.base_url(SourceId::A)),
            SourceClient::new(SourceId::B, config.base_url(SourceId::B)),
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
    ) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        info!("HTTP GET request to: {}", url);
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(DashboardError::Api {
                source_id: self.id,
                resource,
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }
}

#[async_trait::async_trait]
impl TelemetrySource for SourceClient {
    fn source_id(&self) -> SourceId {
        self.id
    }

    #[instrument(skip(self), fields(source = %self.id))]
    async fn fetch_logs(&self) -> Result<Vec<LogRecord>> {
        let rows: Vec<LogRow> = self.get_json(LOGS_PATH, "logs").await?;
        let total = rows.len();
        let records: Vec<LogRecord> = rows.into_iter().filter_map(log_row_to_record).collect();
        if records.len() < total {
            debug!("Dropped {} malformed log rows", total - records.len());
        }
        info!("Fetched {} log records from {}", records.len(), self.id);
        Ok(records)
    }

    #[instrument(skip(self), fields(source = %self.id))]
    async fn fetch_endpoint_counts(&self) -> Result<Vec<EndpointCount>> {
        let rows: Vec<EndpointRow> = self.get_json(REQUEST_COUNT_PATH, "endpoint counts").await?;
        let counts: Vec<EndpointCount> = rows
            .into_iter()
            .map(|row| EndpointCount {
                endpoint: row.endpoint,
                count_a: row.server1_count,
                count_b: row.server2_count,
            })
            .collect();
        info!("Fetched {} endpoint counters from {}", counts.len(), self.id);
        Ok(counts)
    }

    #[instrument(skip(self), fields(source = %self.id))]
    async fn fetch_latency(&self) -> Result<Vec<LatencySample>> {
        let rows: Vec<LatencyRow> = self.get_json(RESPONSE_TIME_PATH, "latency").await?;
        let total = rows.len();
        let samples: Vec<LatencySample> =
            rows.into_iter().filter_map(latency_row_to_sample).collect();
        if samples.len() < total {
            debug!("Dropped {} malformed latency rows", total - samples.len());
        }
        info!("Fetched {} latency samples from {}", samples.len(), self.id);
        Ok(samples)
    }
}

/// Raw log row as served by the collaborators.
#[derive(Debug, Deserialize)]
struct LogRow {
    server: String,
    level: String,
    timestamp: String,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatencyRow {
    server: String,
    timestamp: String,
    response_time: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndpointRow {
    endpoint: String,
    server1_count: u64,
    server2_count: u64,
}

fn log_row_to_record(row: LogRow) -> Option<LogRecord> {
    let source = SourceId::from_wire(&row.server)?;
    let timestamp = parse_timestamp(&row.timestamp)?;
    Some(LogRecord {
        source,
        level: row.level,
        timestamp,
        message: row.message,
    })
}

fn latency_row_to_sample(row: LatencyRow) -> Option<LatencySample> {
    if !row.response_time.is_finite() || row.response_time < 0.0 {
        return None;
    }
    let source = SourceId::from_wire(&row.server)?;
    let timestamp = parse_timestamp(&row.timestamp)?;
    Some(LatencySample {
        source,
        timestamp,
        latency_ms: row.response_time,
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
