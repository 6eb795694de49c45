use crate::common;
use evds_rs::{EvdsClient, MemoryCache, MemoryCredentialStore};
use httpmock::Method::GET;
use std::time::Duration;

const PATH: &str =
    "series=TP.ODEMGZS.BDTTOPLAM&startDate=01-01-2020&endDate=01-01-2021&type=json&frequency=5";

fn cached_client(server: &httpmock::MockServer, cache: MemoryCache) -> EvdsClient {
    EvdsClient::builder()
        .base_url(common::base_url(server))
        .api_key(common::KEY)
        .credential_store(MemoryCredentialStore::new())
        .cache(cache)
        .build()
        .unwrap()
}

#[tokio::test]
async fn identical_cached_requests_hit_the_network_once() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::series_path(PATH));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    });

    let client = cached_client(&server, MemoryCache::new());
    assert!(client.cache_enabled());

    let request = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency("monthly")
        .cache(true);

    let first = request.clone().fetch().await.unwrap();
    let second = request.fetch().await.unwrap();
    mock.assert_calls(1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn requests_without_cache_flag_always_go_out() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::series_path(PATH));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    });

    let client = cached_client(&server, MemoryCache::new());
    for _ in 0..2 {
        client
            .series("TP.ODEMGZS.BDTTOPLAM")
            .start_date("01-01-2020")
            .end_date("01-01-2021")
            .frequency(5u8)
            .fetch()
            .await
            .unwrap();
    }
    mock.assert_calls(2);
}

#[tokio::test]
async fn cache_flag_without_a_cache_falls_through() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::series_path(PATH));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    });

    let client = common::client(&server);
    assert!(!client.cache_enabled());
    for _ in 0..2 {
        client
            .series("TP.ODEMGZS.BDTTOPLAM")
            .start_date("01-01-2020")
            .end_date("01-01-2021")
            .frequency(5u8)
            .cache(true)
            .fetch()
            .await
            .unwrap();
    }
    mock.assert_calls(2);
}

#[tokio::test]
async fn different_parameters_are_cached_separately() {
    let server = common::setup_server();
    let monthly = server.mock(|when, then| {
        when.method(GET).path(common::series_path(PATH));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    });
    let quarterly = server.mock(|when, then| {
        when.method(GET).path(common::series_path(
            "series=TP.ODEMGZS.BDTTOPLAM&startDate=01-01-2020&endDate=01-01-2021&type=json&frequency=6",
        ));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"totalCount":1,"items":[{"Tarih":"2020-Q1","TP_ODEMGZS_BDTTOPLAM":"5992.30"}]}"#);
    });

    let client = cached_client(&server, MemoryCache::new());
    let m = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency("monthly")
        .cache(true)
        .fetch()
        .await
        .unwrap();
    let q = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency("quarterly")
        .cache(true)
        .fetch()
        .await
        .unwrap();

    monthly.assert_calls(1);
    quarterly.assert_calls(1);
    assert_eq!((m.height(), q.height()), (13, 1));
}

#[tokio::test]
async fn error_answers_are_not_cached() {
    let server = common::setup_server();
    let mut failing = server.mock(|when, then| {
        when.method(GET).path(common::series_path(PATH));
        then.status(503).body("busy");
    });

    let client = cached_client(&server, MemoryCache::new());
    let request = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency(5u8)
        .cache(true);

    assert!(request.clone().fetch().await.is_err());
    failing.assert_calls(1);
    failing.delete();

    let ok = server.mock(|when, then| {
        when.method(GET).path(common::series_path(PATH));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    });
    let table = request.fetch().await.unwrap();
    ok.assert_calls(1);
    assert_eq!(table.height(), 13);
}

#[tokio::test]
async fn expired_entries_are_refetched() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::series_path(PATH));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    });

    let client = cached_client(&server, MemoryCache::new().with_ttl(Duration::from_millis(50)));
    let request = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency(5u8)
        .cache(true);

    request.clone().fetch().await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    request.fetch().await.unwrap();
    mock.assert_calls(2);
}
