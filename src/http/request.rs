use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};

use crate::args::HttpMethod;
use crate::config::{LoadTestConfig, RequestBody};
use crate::error::{AppError, AppResult, HttpError};

/// Method, URL, headers and body shared by every request of a run.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestSpec {
    /// Validates the configured headers up front so a bad header is a
    /// configuration error rather than N failed requests.
    ///
    /// # Errors
    ///
    /// Returns an error when a header name or value is not valid HTTP.
    pub fn from_config(config: &LoadTestConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::with_capacity(config.headers.len());
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderName {
                    name: name.clone(),
                    source: err,
                })
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|err| {
                AppError::http(HttpError::InvalidHeaderValue {
                    name: name.clone(),
                    source: err,
                })
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(Self {
            method: to_reqwest_method(config.method),
            url: config.url.clone(),
            headers,
            body: config.body.clone(),
        })
    }
}

pub(crate) fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    }
}
