use crate::types::SourceId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{source_id} returned HTTP {status} for {resource}")]
    Api {
        source_id: SourceId,
        resource: &'static str,
        status: u16,
    },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
