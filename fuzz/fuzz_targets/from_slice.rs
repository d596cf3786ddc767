#![no_main]

use libfuzzer_sys::fuzz_target;
use serde::de::IgnoredAny;
use serde_sdsf::Document;

fuzz_target!(|data: &[u8]| {
    let _ = Document::parse(data);
    let _ = serde_sdsf::from_slice::<IgnoredAny>(data);
});
