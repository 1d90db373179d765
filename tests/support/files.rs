use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a temp file with a `.toml` suffix.
pub fn temp_toml(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("squidbet-test-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
