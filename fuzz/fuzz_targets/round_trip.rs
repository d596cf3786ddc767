#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_sdsf::Document;

fuzz_target!(|data: &[u8]| {
    let doc = match Document::parse(data) {
        Ok(doc) => doc,
        Err(_) => return,
    };

    // names with bytes the writer refuses are fine to skip
    let bytes = match serde_sdsf::to_vec(&doc) {
        Ok(bytes) => bytes,
        Err(_) => return,
    };

    let reparsed = Document::parse(&bytes).unwrap();
    assert_eq!(doc.len(), reparsed.len());
});
