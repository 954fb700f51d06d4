#![no_main]

use libfuzzer_sys::fuzz_target;
use shiguredo_negotiate::accept::{parse_header, parse_quality};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let entries = parse_header(s);
        assert!(!entries.is_empty());
        for entry in &entries {
            let _ = entry.value();
            let _ = entry.params();
            let _ = entry.wildcard_count();
            assert!((0.0..=1.0).contains(&entry.quality()));
            let _ = entry.to_string();
        }

        let q = parse_quality(s);
        assert!((0.0..=1.0).contains(&q));
    }
});
