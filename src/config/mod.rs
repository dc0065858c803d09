pub mod log_level;

use std::path::Path;

use figment::providers::{Format, Yaml};
use figment::{Figment, providers::Env};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::log_level::LogLevel;
use crate::telemetry::compression::DEFAULT_COMPRESSION_LEVEL;
use crate::{EXTENSION_NAME, user_agent};

pub const TELEMETRY_ENDPOINT_US: &str = "https://cloud-collector.newrelic.com/aws/lambda/v1";
pub const TELEMETRY_ENDPOINT_EU: &str = "https://cloud-collector.eu01.nr-data.net/aws/lambda/v1";

const CONFIG_FILE_NAME: &str = "newrelic.yaml";

#[derive(Debug, PartialEq, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_string_or_int")]
    pub license_key: String,
    /// Overrides the region-derived ingestion endpoint
    pub telemetry_endpoint: Option<String>,
    pub log_level: LogLevel,
    pub compression_level: u32,
    pub extension_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            license_key: String::default(),
            telemetry_endpoint: None,
            log_level: LogLevel::default(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            extension_name: EXTENSION_NAME.to_string(),
        }
    }
}

impl Config {
    /// Explicit endpoint if set, otherwise EU accounts (license keys starting
    /// with `eu`) go to the EU collector and everything else to the US one.
    #[must_use]
    pub fn telemetry_endpoint_url(&self) -> String {
        match self.telemetry_endpoint.as_deref() {
            Some(endpoint) if !endpoint.trim().is_empty() => endpoint.to_string(),
            _ if self.license_key.starts_with("eu") => TELEMETRY_ENDPOINT_EU.to_string(),
            _ => TELEMETRY_ENDPOINT_US.to_string(),
        }
    }

    #[must_use]
    pub fn user_agent(&self) -> String {
        user_agent(&self.extension_name)
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    ParseError(String),
    #[error("license key is not set")]
    MissingLicenseKey,
}

/// Reads `newrelic.yaml` from `config_directory`, then `NEW_RELIC_*`
/// environment variables on top of it.
pub fn get_config(config_directory: &Path) -> Result<Config, ConfigError> {
    let path = config_directory.join(CONFIG_FILE_NAME);

    let figment = Figment::new()
        .merge(Yaml::file(&path))
        .merge(Env::prefixed("NEW_RELIC_"));

    let mut config: Config = figment
        .extract()
        .map_err(|err| ConfigError::ParseError(err.to_string()))?;

    config.license_key = config.license_key.trim().to_string();
    if config.license_key.is_empty() {
        return Err(ConfigError::MissingLicenseKey);
    }

    Ok(config)
}

// Environment values that look numeric reach us as numbers
fn deserialize_string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("expected a string or an integer")),
    }
}
