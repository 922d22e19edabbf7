use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_header, parse_positive_u64, parse_positive_usize,
};
use super::types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP load generator - sends a fixed number of requests in concurrent batches and reports latency percentiles."
)]
pub struct LoadArgs {
    /// Target URL for the load test
    #[arg(long = "site", short = 'u', visible_alias = "url")]
    pub site: Option<String>,

    /// Total number of requests to send
    #[arg(long = "requests", short = 'n', value_parser = parse_positive_u64)]
    pub requests: Option<PositiveU64>,

    /// Maximum number of requests in flight at once (batch size)
    #[arg(long = "concurrency", short = 'c', value_parser = parse_positive_usize)]
    pub concurrency: Option<PositiveUsize>,

    /// HTTP method to use [default: get]
    #[arg(long, short = 'X', ignore_case = true)]
    pub method: Option<HttpMethod>,

    /// Request headers as a JSON object, e.g. '{"Authorization":"Bearer abc"}'
    #[arg(long = "headers")]
    pub headers_json: Option<String>,

    /// Extra HTTP header in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// JSON request body, sent with Content-Type: application/json
    #[arg(long = "payload", conflicts_with = "data")]
    pub payload: Option<String>,

    /// Raw request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Print the duration of every request
    #[arg(
        long = "detailed-log",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_bool_env
    )]
    pub detailed_log: Option<bool>,

    /// Per-request timeout (supports ms/s/m/h); no timeout when unset
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Skip the link-speed probe
    #[arg(long = "no-speed-test")]
    pub no_speed_test: bool,

    /// Resource downloaded by the link-speed probe
    #[arg(long = "speed-test-url")]
    pub speed_test_url: Option<String>,

    /// Timeout for the link-speed probe (supports ms/s/m/h) [default: 30s]
    #[arg(long = "speed-test-timeout", value_parser = parse_duration_arg)]
    pub speed_test_timeout: Option<Duration>,

    /// Report format [default: text]
    #[arg(long = "output-format", ignore_case = true)]
    pub output_format: Option<OutputFormat>,

    /// Path to config file (TOML/JSON). Defaults to ./loadstorm.toml or ./loadstorm.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Do not print the start-up banner
    #[arg(long = "no-banner")]
    pub no_banner: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by LOADSTORM_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
