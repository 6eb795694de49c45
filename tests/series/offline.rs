use crate::common;
use chrono::{Datelike, NaiveDate};
use evds_rs::{Cell, ColumnType, EvdsClient, EvdsError, Frequency, MemoryCredentialStore};
use httpmock::Method::GET;

const MONTHLY_PATH: &str = "series=TP.ODEMGZS.BDTTOPLAM&startDate=01-01-2020&endDate=01-01-2021&type=json&frequency=5";

#[tokio::test]
async fn monthly_series_has_one_row_per_month_in_order() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(common::series_path(MONTHLY_PATH))
            .header("key", common::KEY);
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    });

    let client = common::client(&server);
    let table = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency("monthly")
        .fetch()
        .await
        .unwrap();
    mock.assert();

    assert_eq!(table.height(), 13);
    let dates: Vec<NaiveDate> = table
        .date_column()
        .expect("date column")
        .date_values()
        .into_iter()
        .map(Option::unwrap)
        .collect();
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!(dates[12], NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert!(dates.iter().all(|d| d.day() == 1));

    let values = table.column("TP_ODEMGZS_BDTTOPLAM").expect("value column");
    assert_eq!(values.kind(), ColumnType::Number);
    assert_eq!(values.cells()[0], Cell::Number(2587.67));
    assert_eq!(values.cells()[3], Cell::Number(0.0));
    assert_eq!(values.cells()[4], Cell::Missing, "null must not be coerced to a number");
    assert_eq!(values.missing_count(), 1);
}

#[tokio::test]
async fn multiple_series_share_one_request() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::series_path(
            "series=TP.DK.USD.A-TP.DK.EUR.A&startDate=02-01-2024&endDate=04-01-2024&type=json\
             &formulas=0-1&frequency=1&aggregationTypes=last-last",
        ));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.DK.USD.A-TP.DK.EUR.A"));
    });

    let client = common::client(&server);
    let table = client
        .series(vec!["TP.DK.USD.A".to_string(), "TP.DK.EUR.A".to_string()])
        .start_date("2024-01-02")
        .end_date("04.01.2024")
        .frequency(Frequency::Daily)
        .formulas(["level", "percentage_change"])
        .aggregation("last")
        .fetch()
        .await
        .unwrap();
    mock.assert();

    assert_eq!(table.height(), 3);
    assert_eq!(
        table.column_names(),
        ["Tarih", "TP_DK_USD_A", "TP_DK_EUR_A", "UNIXTIME"]
    );
    assert_eq!(
        table.get(0, "Tarih").and_then(Cell::as_date),
        NaiveDate::from_ymd_opt(2024, 1, 2)
    );
    assert_eq!(table.get(2, "TP_DK_USD_A"), Some(&Cell::Missing));
    assert_eq!(table.get(2, "TP_DK_EUR_A").and_then(Cell::as_f64), Some(32.5378));
    assert_eq!(table.column("UNIXTIME").unwrap().kind(), ColumnType::Integer);
}

#[tokio::test]
async fn default_dates_come_from_the_client() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::series_path(
            "series=TP.ODEMGZS.BDTTOPLAM&startDate=01-01-2020&endDate=01-01-2021&type=json",
        ));
        then.status(200)
            .header("content-type", "application/json")
            .body(common::fixture("series", "TP.ODEMGZS.BDTTOPLAM"));
    });

    let client = EvdsClient::builder()
        .base_url(common::base_url(&server))
        .api_key(common::KEY)
        .credential_store(MemoryCredentialStore::new())
        .date_defaults(common::fixed_dates((2020, 1, 1), (2021, 1, 1)))
        .build()
        .unwrap();

    let table = client.fetch_series("TP.ODEMGZS.BDTTOPLAM").await.unwrap();
    mock.assert();
    assert_eq!(table.height(), 13);
}

#[tokio::test]
async fn answer_without_records_is_malformed() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path(common::series_path(MONTHLY_PATH));
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"totalCount":0}"#);
    });

    let client = common::client(&server);
    let err = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency(5u8)
        .fetch()
        .await
        .unwrap_err();
    mock.assert();
    assert!(matches!(err, EvdsError::MalformedResponse(_)), "{err:?}");
}
