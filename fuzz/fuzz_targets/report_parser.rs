#![no_main]

use libfuzzer_sys::fuzz_target;
use tasar::report::extract_records;

fuzz_target!(|data: &[u8]| {
    // Convert arbitrary bytes to UTF-8 string (lossy conversion)
    if let Ok(input) = std::str::from_utf8(data) {
        // Extraction must never panic regardless of input; malformed
        // blocks are skipped, not errors
        let _ = extract_records(input);
    }
});
