use evds_rs::{EvdsClient, Frequency, SeriesOutput};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // The key is read from EVDS_API_KEY unless one is passed explicitly.
    let client = EvdsClient::builder().build()?;

    println!("=== Monthly tourism revenue ===");
    match client
        .series("TP.ODEMGZS.BDTTOPLAM")
        .start_date("01-01-2020")
        .end_date("01-01-2021")
        .frequency(Frequency::Monthly)
        .fetch()
        .await
    {
        Ok(table) => println!("{}\n", table.head(5)),
        Err(e) => println!("request failed: {e}\n"),
    }

    println!("=== Dry run for two exchange rates ===");
    let out = client
        .series(["TP.DK.USD.A", "TP.DK.EUR.A"])
        .start_date("01-01-2024")
        .end_date("31-01-2024")
        .frequency("daily")
        .aggregation("last")
        .debug(true)
        .send()
        .await?;
    if let SeriesOutput::DryRun(desc) = out {
        println!("{desc}");
    }

    Ok(())
}
