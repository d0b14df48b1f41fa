#![no_main]

use libfuzzer_sys::fuzz_target;
use mib_core::header::parse_header;

fuzz_target!(|data: &[u8]| {
    if let Ok(descriptor) = parse_header(data) {
        let _ = descriptor.record_size();
    }
});
