//! Configuration loading and resolution into a [`LoadTestConfig`].
mod load_test;
mod loader;
pub mod types;


pub use load_test::{LoadTestConfig, ProbeConfig, RequestBody};
pub use loader::load_config;

#[cfg(any(test, feature = "fuzzing"))]
pub(crate) use load_test::{parse_headers_json, parse_target_url};
#[cfg(any(test, feature = "fuzzing"))]
pub(crate) use loader::load_config_file;
