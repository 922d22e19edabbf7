use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{HttpMethod, OutputFormat, parse_duration_value};
use crate::error::ValidationError;

/// Settings accepted by `loadstorm.toml` / `loadstorm.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub site: Option<String>,
    pub requests: Option<u64>,
    pub concurrency: Option<u64>,
    pub method: Option<HttpMethod>,
    pub headers: Option<BTreeMap<String, String>>,
    pub payload: Option<serde_json::Value>,
    pub data: Option<String>,
    pub detailed_log: Option<bool>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub speed_test: Option<bool>,
    pub speed_test_url: Option<String>,
    pub speed_test_timeout: Option<DurationValue>,
    pub output_format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
