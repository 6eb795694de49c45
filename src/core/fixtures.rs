//! Recording helpers for persisting HTTP fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn fixture_dir() -> PathBuf {
    env::var("EVDS_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Codes such as `TP.DK.USD.A` become `TP_DK_USD_A`, matching the API's column names.
fn file_stem(endpoint: &str, label: &str) -> String {
    let label: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{endpoint}_{label}")
}

pub(crate) fn record_fixture(
    endpoint: &str,
    label: &str,
    ext: &str,
    body: &str,
) -> Result<(), std::io::Error> {
    let dir = fixture_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{}.{ext}", file_stem(endpoint, label)));
    fs::write(&path, body)?;

    if env::var("EVDS_DEBUG").ok().as_deref() == Some("1") {
        eprintln!("EVDS_RECORD: wrote fixture to {}", path.display());
    }
    Ok(())
}
