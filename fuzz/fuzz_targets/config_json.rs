#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = loadstorm::fuzzing::resolve_config_from_json(data) {
        debug_assert!(config.requests.get() >= 1);
        debug_assert!(config.concurrency.get() >= 1);
        debug_assert!(matches!(config.url.scheme(), "http" | "https"));
    }
});
