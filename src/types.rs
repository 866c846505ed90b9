use crate::constants::{SOURCE_A_WIRE, SOURCE_B_WIRE};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two backend services whose telemetry is combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    A,
    B,
}

impl SourceId {
    /// Name used in remote payloads and deployment config.
    pub fn wire_name(&self) -> &'static str {
        match self {
            SourceId::A => SOURCE_A_WIRE,
            SourceId::B => SOURCE_B_WIRE,
        }
    }

    pub fn from_wire(name: &str) -> Option<SourceId> {
        match name {
            SOURCE_A_WIRE => Some(SourceId::A),
            SOURCE_B_WIRE => Some(SourceId::B),
            _ => None,
        }
    }

    /// Human-readable series label for chart legends.
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceId::A => "Source A",
            SourceId::B => "Source B",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceId::A => "source A",
            SourceId::B => "source B",
        })
    }
}

/// Fixed ordered severity taxonomy. Declaration order is the chart
/// category order and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Parses the upper-case wire spelling. Unknown levels return `None`
    /// and are excluded from bucketed counts downstream.
    pub fn from_wire(level: &str) -> Option<Severity> {
        match level {
            "DEBUG" => Some(Severity::Debug),
            "INFO" => Some(Severity::Info),
            "WARNING" => Some(Severity::Warning),
            "ERROR" => Some(Severity::Error),
            "CRITICAL" => Some(Severity::Critical),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

/// A structured log event as validated at the client boundary. The level
/// stays raw so unknown-severity noise reaches the aggregator, where it is
/// excluded from bucketed counts without being treated as an error.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub source: SourceId,
    pub level: String,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
}

/// A single response-latency measurement. `latency_ms` is never negative;
/// samples violating that are dropped before construction.
#[derive(Debug, Clone, Serialize)]
pub struct LatencySample {
    pub source: SourceId,
    pub timestamp: DateTime<Utc>,
    pub latency_ms: f64,
}

/// Per-endpoint request totals reported by the collaborators.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointCount {
    pub endpoint: String,
    pub count_a: u64,
    pub count_b: u64,
}

/// The three fetches the pipeline drives against a source. Implemented by
/// `SourceClient` for real HTTP collaborators and by stubs in tests.
#[async_trait::async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Which source this client talks to.
    fn source_id(&self) -> SourceId;

    /// Fetch structured log events (`GET /api/logs`).
    async fn fetch_logs(&self) -> Result<Vec<LogRecord>>;

    /// Fetch per-endpoint request counters (`GET /api/logs/request-count`).
    async fn fetch_endpoint_counts(&self) -> Result<Vec<EndpointCount>>;

    /// Fetch response-latency samples (`GET /api/logs/response-time`).
    async fn fetch_latency(&self) -> Result<Vec<LatencySample>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_taxonomy_order_is_fixed() {
        let labels: Vec<&str> = Severity::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]);
    }

    #[test]
    fn severity_parsing_is_case_sensitive() {
        assert_eq!(Severity::from_wire("ERROR"), Some(Severity::Error));
        assert_eq!(Severity::from_wire("error"), None);
        assert_eq!(Severity::from_wire("TRACE"), None);
    }

    #[test]
    fn source_id_round_trips_through_wire_name() {
        for id in [SourceId::A, SourceId::B] {
            assert_eq!(SourceId::from_wire(id.wire_name()), Some(id));
        }
        assert_eq!(SourceId::from_wire("server3"), None);
    }
}
