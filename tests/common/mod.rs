#![allow(dead_code)]

use evds_rs::{EvdsClient, FixedDates, MemoryCredentialStore};
use httpmock::MockServer;
use std::{fs, path::Path};
use url::Url;

pub const KEY: &str = "TESTKEY123";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// Fixture names follow the recorder: `{endpoint}_{codes}` with non-alphanumerics as `_`.
pub fn fixture(endpoint: &str, codes: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let label: String = codes
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let path = dir.join(format!("{endpoint}_{label}.json"));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/service/evds/", server.base_url())).unwrap()
}

/// Path the service sees for an `&`-joined parameter list.
pub fn series_path(params: &str) -> String {
    format!("/service/evds/{params}")
}

/// Client against the mock server with a configured key and an empty in-memory store.
pub fn client(server: &MockServer) -> EvdsClient {
    EvdsClient::builder()
        .base_url(base_url(server))
        .api_key(KEY)
        .credential_store(MemoryCredentialStore::new())
        .build()
        .unwrap()
}

pub fn fixed_dates(start: (i32, u32, u32), end: (i32, u32, u32)) -> FixedDates {
    FixedDates {
        start: chrono::NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        end: chrono::NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
    }
}

/// `EVDS_LIVE=1` or `EVDS_RECORD=1` opts the ignored live tests in.
pub fn live_or_record_enabled() -> bool {
    std::env::var("EVDS_LIVE").ok().as_deref() == Some("1") || is_recording()
}

pub fn is_recording() -> bool {
    std::env::var("EVDS_RECORD").ok().as_deref() == Some("1")
}
