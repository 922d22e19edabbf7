use std::collections::BTreeMap;
use std::time::Duration;

use clap::Parser;

use crate::args::parsers::{parse_duration_arg, parse_duration_value, parse_header};
use crate::args::{LoadArgs, PositiveU64, PositiveUsize};
use crate::config::types::ConfigFile;
use crate::config::{LoadTestConfig, load_config_file, parse_headers_json, parse_target_url};
use crate::error::{AppError, AppResult};
use crate::metrics::{Percentiles, percentiles};

/// Parses a header string in `Key: Value` format.
///
/// # Errors
///
/// Returns an error when the header is malformed.
pub fn parse_header_input(input: &str) -> AppResult<(String, String)> {
    parse_header(input).map_err(AppError::from)
}

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Parses a duration value from config.
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_value_input(input: &str) -> AppResult<Duration> {
    parse_duration_value(input).map_err(AppError::from)
}

/// Parses a positive u64 string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_u64_input(input: &str) -> AppResult<u64> {
    let value: PositiveU64 = input.parse()?;
    Ok(value.get())
}

/// Parses a positive usize string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_usize_input(input: &str) -> AppResult<usize> {
    let value: PositiveUsize = input.parse()?;
    Ok(value.get())
}

/// Parses the `--headers` JSON object.
///
/// # Errors
///
/// Returns an error when the input is not a JSON object.
pub fn parse_headers_json_input(input: &str) -> AppResult<BTreeMap<String, String>> {
    parse_headers_json(input).map_err(AppError::from)
}

/// Parses a target URL.
///
/// # Errors
///
/// Returns an error when the URL is invalid or not http(s).
pub fn parse_target_url_input(input: &str) -> AppResult<String> {
    parse_target_url(input)
        .map(|url| url.to_string())
        .map_err(AppError::from)
}

/// Parses TOML config and resolves it against default arguments.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn resolve_config_from_toml(input: &str) -> AppResult<LoadTestConfig> {
    let config: ConfigFile = toml::from_str(input).map_err(|err| {
        AppError::config(crate::error::ConfigError::ParseToml {
            path: "fuzz.toml".into(),
            source: err,
        })
    })?;
    resolve_with_defaults(config)
}

/// Parses JSON config and resolves it against default arguments.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn resolve_config_from_json(input: &[u8]) -> AppResult<LoadTestConfig> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    resolve_with_defaults(config)
}

/// Loads a config file from disk to exercise extension handling.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config_file_input(path: &std::path::Path) -> AppResult<()> {
    load_config_file(path).map(|_| ())
}

#[must_use]
pub fn percentiles_input(latencies: &[u64], ranks: &[u64]) -> Percentiles {
    percentiles(latencies, ranks)
}

fn resolve_with_defaults(config: ConfigFile) -> AppResult<LoadTestConfig> {
    let args = LoadArgs::try_parse_from(["loadstorm"])?;
    LoadTestConfig::resolve(&args, Some(config))
}
