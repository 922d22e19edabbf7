//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;

pub use cli::LoadArgs;
pub use types::{HttpMethod, OutputFormat, PositiveU64, PositiveUsize};

pub(crate) use defaults::{DEFAULT_SPEED_TEST_TIMEOUT, DEFAULT_SPEED_TEST_URL, DEFAULT_USER_AGENT};
pub(crate) use parsers::parse_duration_value;
