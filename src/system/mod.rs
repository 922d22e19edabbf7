pub(crate) mod banner;
pub mod environment;
pub(crate) mod logger;

pub use environment::EnvironmentDetails;
