#![no_main]

use clap::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut args = Vec::new();
        args.push("loadstorm".to_owned());
        for token in input.split_whitespace().take(64) {
            args.push(token.to_owned());
        }
        let arg_refs: Vec<&str> = args.iter().map(|value| value.as_str()).collect();
        if let Ok(parsed) = loadstorm::args::LoadArgs::try_parse_from(arg_refs) {
            if let Some(requests) = parsed.requests {
                debug_assert!(requests.get() >= 1);
            }
            if let Some(concurrency) = parsed.concurrency {
                debug_assert!(concurrency.get() >= 1);
            }
        }
    }
});
