#![no_main]

use libfuzzer_sys::fuzz_target;
use mib_core::{LoadOptions, ScanShape};

fuzz_target!(|input: (u8, u8, &[u8])| {
    let (rows, cols, data) = input;
    let shape = ScanShape::Grid(usize::from(rows % 8) + 1, usize::from(cols % 8) + 1);
    if let Ok(mib) = mib_io::load_buffer(data, &LoadOptions::new(shape)) {
        if let Ok(frames) = mib.frames() {
            let _ = frames.frame(0);
        }
    }
});
