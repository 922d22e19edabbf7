#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(headers) = loadstorm::fuzzing::parse_headers_json_input(input) {
            debug_assert!(headers.len() <= input.len());
        }
        let _ = loadstorm::fuzzing::parse_target_url_input(input);
    }
});
