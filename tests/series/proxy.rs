use crate::common;
use evds_rs::{EvdsError, ProxySettings};
use httpmock::Method::GET;

#[tokio::test]
async fn single_proxy_shows_up_in_the_description() {
    let server = common::setup_server();
    let client = common::client(&server);

    let desc = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .proxy("http://proxy.local:3128")
        .dry_run()
        .unwrap();

    assert_eq!(desc.proxies, ProxySettings::All("http://proxy.local:3128".into()));
}

#[tokio::test]
async fn per_scheme_proxies_are_normalized() {
    let server = common::setup_server();
    let client = common::client(&server);

    let desc = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .proxies([("HTTPS", "http://secure.proxy:8443"), ("http", "http://plain.proxy:8080")])
        .dry_run()
        .unwrap();

    let ProxySettings::PerScheme(map) = &desc.proxies else {
        panic!("expected per-scheme proxies, got {:?}", desc.proxies);
    };
    assert_eq!(map.get("https").map(String::as_str), Some("http://secure.proxy:8443"));
    assert_eq!(map.get("http").map(String::as_str), Some("http://plain.proxy:8080"));
}

#[tokio::test]
async fn both_proxy_forms_conflict() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("{}");
    });
    let client = common::client(&server);

    let err = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .proxy("http://proxy.local:3128")
        .proxies([("https", "http://proxy.local:3128")])
        .fetch()
        .await
        .unwrap_err();

    assert!(matches!(err, EvdsError::ConflictingProxyConfig), "{err:?}");
    mock.assert_calls(0);
}

#[tokio::test]
async fn unparsable_proxy_is_rejected() {
    let server = common::setup_server();
    let client = common::client(&server);

    let err = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .proxy("not a url")
        .dry_run()
        .unwrap_err();
    assert!(matches!(err, EvdsError::InvalidProxy { .. }), "{err:?}");
}

#[tokio::test]
async fn traffic_goes_through_the_proxy() {
    let server = common::setup_server();
    let direct = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("{}");
    });
    let client = common::client(&server);

    // Nothing listens on port 1, so routing through it must fail at the transport.
    let err = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .proxy("http://127.0.0.1:1")
        .fetch()
        .await
        .unwrap_err();

    assert!(
        matches!(err, EvdsError::ApiRequest { status: None, .. }),
        "{err:?}"
    );
    direct.assert_calls(0);
}
