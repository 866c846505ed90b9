use crate::constants::{DEFAULT_SOURCE_A_URL, DEFAULT_SOURCE_B_URL};
use crate::error::{DashboardError, Result};
use crate::types::SourceId;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub source_a_url: String,
    pub source_b_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            source_a_url: DEFAULT_SOURCE_A_URL.to_string(),
            source_b_url: DEFAULT_SOURCE_B_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory, then applies
    /// `DASH_SOURCE_{A,B}_URL` environment overrides. A missing file is
    /// not an error; the built-in defaults apply.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from_path("config.toml")?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DASH_SOURCE_A_URL").filter(|v| !v.trim().is_empty()) {
            self.sources.source_a_url = url;
        }
        if let Some(url) = lookup("DASH_SOURCE_B_URL").filter(|v| !v.trim().is_empty()) {
            self.sources.source_b_url = url;
        }
    }

    pub fn base_url(&self, source: SourceId) -> &str {
        match source {
            SourceId::A => &self.sources.source_a_url,
            SourceId::B => &self.sources.source_b_url,
        }
    }
}
