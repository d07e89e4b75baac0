#![no_main]

use chainlog::TraceParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, including invalid UTF-8 and partial records, must
    // never make reconstruction panic
    let parsed = TraceParser::new().add_reader(data).parse();
    assert!(parsed.entries.len() + parsed.frame_count() <= data.len());
});
