use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::args::{
    DEFAULT_SPEED_TEST_TIMEOUT, DEFAULT_SPEED_TEST_URL, HttpMethod, LoadArgs, OutputFormat,
    PositiveU64, PositiveUsize,
};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::{ConfigFile, DurationValue};

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Raw(String),
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_SPEED_TEST_URL.to_owned(),
            timeout: DEFAULT_SPEED_TEST_TIMEOUT,
        }
    }
}

/// Everything a run needs, resolved once from CLI flags and the optional
/// config file. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct LoadTestConfig {
    pub url: Url,
    pub requests: PositiveU64,
    pub concurrency: PositiveUsize,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
    pub detailed_log: bool,
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub probe: ProbeConfig,
    pub output_format: OutputFormat,
}

impl LoadTestConfig {
    /// A GET run with no headers, no body and the default probe settings.
    #[must_use]
    pub fn new(url: Url, requests: PositiveU64, concurrency: PositiveUsize) -> Self {
        Self {
            url,
            requests,
            concurrency,
            method: HttpMethod::Get,
            headers: BTreeMap::new(),
            body: None,
            detailed_log: false,
            request_timeout: None,
            connect_timeout: None,
            probe: ProbeConfig::default(),
            output_format: OutputFormat::Text,
        }
    }

    /// Merges CLI flags over config-file values. CLI always wins.
    ///
    /// # Errors
    ///
    /// Returns an error when a required option is missing from both sources,
    /// or when a URL, header set, body, count or duration is invalid.
    pub fn resolve(args: &LoadArgs, file: Option<ConfigFile>) -> AppResult<Self> {
        let file = file.unwrap_or_default();

        let site = args
            .site
            .clone()
            .or(file.site)
            .ok_or(ValidationError::MissingRequired { option: "--site" })?;
        let url = parse_target_url(&site)?;

        let requests = match args.requests {
            Some(requests) => requests,
            None => file
                .requests
                .map(|value| {
                    PositiveU64::try_from(value).map_err(|err| {
                        ConfigError::FieldMustBePositive {
                            field: "requests",
                            source: err,
                        }
                    })
                })
                .transpose()?
                .ok_or(ValidationError::MissingRequired {
                    option: "--requests",
                })?,
        };

        let concurrency = match args.concurrency {
            Some(concurrency) => concurrency,
            None => file
                .concurrency
                .map(|value| {
                    PositiveUsize::try_from(value).map_err(|err| {
                        ConfigError::FieldMustBePositive {
                            field: "concurrency",
                            source: err,
                        }
                    })
                })
                .transpose()?
                .ok_or(ValidationError::MissingRequired {
                    option: "--concurrency",
                })?,
        };

        let mut headers = BTreeMap::new();
        merge_headers(&mut headers, file.headers.unwrap_or_default());
        if let Some(raw) = args.headers_json.as_deref() {
            merge_headers(&mut headers, parse_headers_json(raw)?);
        }
        merge_headers(&mut headers, args.headers.iter().cloned());

        let body = resolve_body(args, file.payload, file.data)?;

        let request_timeout = match args.request_timeout {
            Some(timeout) => Some(timeout),
            None => file_duration("timeout", file.timeout.as_ref())?,
        };
        let connect_timeout = match args.connect_timeout {
            Some(timeout) => Some(timeout),
            None => file_duration("connect_timeout", file.connect_timeout.as_ref())?,
        };

        let probe_timeout = match args.speed_test_timeout {
            Some(timeout) => timeout,
            None => file_duration("speed_test_timeout", file.speed_test_timeout.as_ref())?
                .unwrap_or(DEFAULT_SPEED_TEST_TIMEOUT),
        };
        let probe = ProbeConfig {
            enabled: !args.no_speed_test && file.speed_test.unwrap_or(true),
            url: args
                .speed_test_url
                .clone()
                .or(file.speed_test_url)
                .unwrap_or_else(|| DEFAULT_SPEED_TEST_URL.to_owned()),
            timeout: probe_timeout,
        };

        Ok(Self {
            url,
            requests,
            concurrency,
            method: args.method.or(file.method).unwrap_or(HttpMethod::Get),
            headers,
            body,
            detailed_log: args.detailed_log.or(file.detailed_log).unwrap_or(false),
            request_timeout,
            connect_timeout,
            probe,
            output_format: args.output_format.or(file.output_format).unwrap_or_default(),
        })
    }
}

pub(crate) fn parse_target_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|err| ConfigError::InvalidUrl {
        url: raw.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            url: raw.to_owned(),
            scheme: other.to_owned(),
        }),
    }
}

/// Accepts a JSON object; non-string values are sent in their JSON text form.
pub(crate) fn parse_headers_json(raw: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let parsed: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(raw).map_err(|err| ConfigError::InvalidHeaders { source: err })?;
    Ok(parsed
        .into_iter()
        .map(|(name, value)| match value {
            serde_json::Value::String(text) => (name, text),
            other => (name, other.to_string()),
        })
        .collect())
}

/// Header names are case-insensitive: a later source replaces an earlier
/// entry however either one is spelled.
fn merge_headers<I>(headers: &mut BTreeMap<String, String>, incoming: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (name, value) in incoming {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        headers.insert(name, value);
    }
}

fn resolve_body(
    args: &LoadArgs,
    file_payload: Option<serde_json::Value>,
    file_data: Option<String>,
) -> AppResult<Option<RequestBody>> {
    if let Some(raw) = args.payload.as_deref() {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|err| AppError::config(ConfigError::InvalidPayload { source: err }))?;
        return Ok(json_body(value));
    }
    if let Some(data) = args.data.as_ref() {
        return Ok(Some(RequestBody::Raw(data.clone())));
    }
    match (file_payload, file_data) {
        (Some(_), Some(_)) => Err(AppError::config(ConfigError::Conflict {
            left: "payload",
            right: "data",
        })),
        (Some(value), None) => Ok(json_body(value)),
        (None, Some(data)) => Ok(Some(RequestBody::Raw(data))),
        (None, None) => Ok(None),
    }
}

fn json_body(value: serde_json::Value) -> Option<RequestBody> {
    if value.is_null() {
        None
    } else {
        Some(RequestBody::Json(value))
    }
}

fn file_duration(
    field: &'static str,
    value: Option<&DurationValue>,
) -> Result<Option<Duration>, ConfigError> {
    value
        .map(|value| {
            value
                .to_duration()
                .map_err(|err| ConfigError::InvalidDuration { field, source: err })
        })
        .transpose()
}
