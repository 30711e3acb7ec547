#![no_main]

use libfuzzer_sys::fuzz_target;
use simcheck::ingest::parse_csv;
use simcheck::stats::{histogram, summarize_statistics};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic, and anything it accepts must be finite
        if let Ok(samples) = parse_csv(input) {
            let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
            if !values.is_empty() {
                assert!(summarize_statistics(&values).is_ok());
                assert!(histogram(&values, 10).is_ok());
            }
        }
    }
});
