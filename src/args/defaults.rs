use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("loadstorm/", env!("CARGO_PKG_VERSION"));

/// Reference download used by the link-speed probe.
pub(crate) const DEFAULT_SPEED_TEST_URL: &str =
    "https://download.support.xerox.com/pub/docs/FlowPort2/userdocs/any-os/en/fp_dc_setup_guide.pdf";

pub(crate) const DEFAULT_SPEED_TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Config filenames checked in the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["loadstorm.toml", "loadstorm.json"];
