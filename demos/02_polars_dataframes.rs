use evds_rs::{EvdsClient, MemoryCache, ToDataFrame};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = EvdsClient::builder()
        .cache(MemoryCache::new().with_ttl(Duration::from_secs(600)))
        .build()?;

    let table = client
        .series("TP.DK.USD.A\nTP.DK.EUR.A")
        .start_date("01-01-2024")
        .end_date("31-03-2024")
        .frequency("monthly")
        .aggregation("avg")
        .cache(true)
        .fetch()
        .await?;

    let df = table.to_dataframe()?;
    println!("{df}");
    Ok(())
}
