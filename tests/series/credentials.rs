use crate::common;
use evds_rs::{CredentialStore, EvdsClient, EvdsError, FileCredentialStore, MemoryCredentialStore};
use httpmock::Method::GET;
use httpmock::MockServer;

const PATH: &str =
    "series=TP.ODEMGZS.BDTTOPLAM&startDate=01-01-2020&endDate=01-01-2021&type=json";

fn keyless_client(server: &MockServer, store: impl CredentialStore + 'static) -> EvdsClient {
    EvdsClient::builder()
        .base_url(common::base_url(server))
        .credential_store(store)
        .build()
        .unwrap()
}

fn ok_mock<'a>(server: &'a MockServer, key: &str) -> httpmock::Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(common::series_path(PATH))
            .header("key", key);
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    })
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("{}");
    });

    let client = keyless_client(&server, MemoryCredentialStore::new());
    let err = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(err, EvdsError::MissingApiKey), "{err:?}");
    mock.assert_calls(0);
}

#[tokio::test]
async fn request_key_is_saved_and_reused() {
    let server = common::setup_server();
    let mock = ok_mock(&server, "FIRSTKEY01");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("evds").join("apikey");

    let client = keyless_client(&server, FileCredentialStore::new(&path));
    client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .api_key("FIRSTKEY01")
        .fetch()
        .await
        .unwrap();

    assert_eq!(
        FileCredentialStore::new(&path).load().unwrap().as_deref(),
        Some("FIRSTKEY01")
    );

    // A fresh client over the same file needs no key.
    let later = keyless_client(&server, FileCredentialStore::new(&path));
    later
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .fetch()
        .await
        .unwrap();
    mock.assert_calls(2);
}

#[tokio::test]
async fn stored_key_is_not_overwritten() {
    let server = common::setup_server();
    let other = ok_mock(&server, "OTHERKEY02");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apikey");
    FileCredentialStore::new(&path).save("STOREDKEY1").unwrap();

    let client = keyless_client(&server, FileCredentialStore::new(&path));
    client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .api_key("OTHERKEY02")
        .fetch()
        .await
        .unwrap();

    other.assert();
    assert_eq!(
        FileCredentialStore::new(&path).load().unwrap().as_deref(),
        Some("STOREDKEY1")
    );
}

#[tokio::test]
async fn client_key_wins_over_store() {
    let server = common::setup_server();
    let mock = ok_mock(&server, common::KEY);

    let client = EvdsClient::builder()
        .base_url(common::base_url(&server))
        .api_key(common::KEY)
        .credential_store(MemoryCredentialStore::with_key("STOREDKEY1"))
        .build()
        .unwrap();
    client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .fetch()
        .await
        .unwrap();
    mock.assert();
}
