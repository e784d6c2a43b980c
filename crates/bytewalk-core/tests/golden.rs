use std::fs;
use std::path::{Path, PathBuf};

use bytewalk_core::layouts::Layout;
use serde_json::Value;

fn golden_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join(name)
}

fn load_expected_record(dir: &Path) -> Value {
    let expected_path = dir.join("expected_record.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_record.json");
    serde_json::from_str(&expected_json).expect("parse expected record")
}

fn run_golden(layout: Layout) {
    let dir = golden_dir(layout.name());
    let input = fs::read(dir.join("input.bin")).expect("read input.bin");
    let expected = load_expected_record(&dir);

    let decoded = layout.decode(&input).expect("decode input");
    let actual = serde_json::to_value(decoded).expect("serialize actual");

    assert_eq!(actual, expected, "golden mismatch in {}", layout.name());
}

#[test]
fn golden_mbr() {
    run_golden(Layout::Mbr);
}

#[test]
fn golden_zip_local_header() {
    run_golden(Layout::ZipLocalHeader);
}

#[test]
fn golden_license_text() {
    run_golden(Layout::LicenseText);
}

#[test]
fn golden_mbr_has_linux_partition() {
    let dir = golden_dir(Layout::Mbr.name());
    let expected = load_expected_record(&dir);
    assert_eq!(expected["partitions"][0]["partition_type"], "linux");
    assert_eq!(expected["partitions"][2]["partition_type"]["unknown"], 0x42);
    assert_eq!(expected["boot_signature"], 0xAA55);
}

#[test]
fn golden_inputs_reject_truncation() {
    for layout in Layout::ALL {
        let dir = golden_dir(layout.name());
        let input = fs::read(dir.join("input.bin")).expect("read input.bin");
        let err = layout
            .decode(&input[..input.len() - 1])
            .expect_err("truncated input must fail");
        assert!(
            err.to_string().contains("buffer underflow"),
            "unexpected error for {}: {err}",
            layout.name()
        );
    }
}
