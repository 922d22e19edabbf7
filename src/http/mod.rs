//! HTTP request execution and the link-speed probe.
mod client;
mod executor;
mod probe;
mod request;


pub use client::build_client;
pub use executor::{HttpExecutor, RequestExecutor};
pub use probe::{LinkSpeed, ProbeReport, measure_download_speed, run_speed_test};
pub use request::RequestSpec;
