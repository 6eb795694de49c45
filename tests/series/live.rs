#[tokio::test]
#[ignore]
async fn live_monthly_series() {
    if !crate::common::live_or_record_enabled() {
        return;
    }

    // Key comes from EVDS_API_KEY.
    let client = evds_rs::EvdsClient::builder().build().unwrap();
    let table = client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency("monthly")
        .fetch()
        .await
        .unwrap();

    if !crate::common::is_recording() {
        assert_eq!(table.height(), 13);
        assert!(table.date_column().is_some());
    }
}

#[tokio::test]
#[ignore]
async fn live_series_for_record() {
    if !crate::common::is_recording() {
        return;
    }

    let client = evds_rs::EvdsClient::builder().build().unwrap();
    let _ = client
        .series(["TP.DK.USD.A", "TP.DK.EUR.A"])
        .start_date("02-01-2024")
        .end_date("04-01-2024")
        .frequency("daily")
        .formulas(["level", "percentage_change"])
        .aggregation("last")
        .fetch()
        .await;
}
