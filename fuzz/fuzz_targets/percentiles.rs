#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&rank_byte, rest)) = data.split_first() else {
        return;
    };
    let rank = u64::from(rank_byte % 101);
    let latencies: Vec<u64> = rest
        .chunks(2)
        .map(|chunk| chunk.iter().fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
        .collect();

    let result = loadstorm::fuzzing::percentiles_input(&latencies, &[rank]);
    match result.get(&rank) {
        Some(value) => {
            debug_assert!(latencies.contains(value));
            let mut reversed = latencies.clone();
            reversed.reverse();
            let again = loadstorm::fuzzing::percentiles_input(&reversed, &[rank]);
            debug_assert_eq!(again.get(&rank), Some(value));
        }
        None => debug_assert!(latencies.is_empty()),
    }
});
