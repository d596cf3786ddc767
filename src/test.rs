use crate::Document;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

mod enums;
mod maps;
mod roundtrip;

#[test]
fn documents() {
    for r in fs::read_dir("tests/documents").unwrap() {
        let path = r.unwrap().path();
        if path.extension() != Some(OsStr::new("sdsf")) {
            continue;
        }

        run_test(&path);
    }
}

fn run_test(path: &Path) {
    println!("testing {}", path.display());

    let input = fs::read(path).unwrap();
    let doc = Document::parse(&input).unwrap();
    let actual = serde_json::to_value(&doc).unwrap();

    let expected = fs::read(path.with_extension("json")).unwrap();
    let expected = serde_json::from_slice::<serde_json::Value>(&expected).unwrap();

    assert_eq!(expected, actual);

    // writing the tree back out must produce an equivalent document
    let written = crate::to_vec(&expected).unwrap();
    let reparsed = Document::parse(&written).unwrap();
    assert_eq!(expected, serde_json::to_value(&reparsed).unwrap());
}
