//! evds-rs: ergonomic client for the EVDS statistics API of the Central Bank of the
//! Republic of Türkiye.
//!
//! Build an [`EvdsClient`], start a request with [`EvdsClient::series`], and receive a
//! [`ResultTable`] of typed columns:
//!
//! ```no_run
//! # async fn run() -> Result<(), evds_rs::EvdsError> {
//! use evds_rs::{EvdsClient, Frequency};
//!
//! let client = EvdsClient::builder().api_key("XXXXXXXXXX").build()?;
//! let table = client
//!     .series(["TP.ODEMGZS.BDTTOPLAM", "TP.ODEMGZS.ABD"])
//!     .start_date("01-01-2020")
//!     .end_date("01-01-2021")
//!     .frequency(Frequency::Monthly)
//!     .aggregation("avg")
//!     .fetch()
//!     .await?;
//! println!("{}", table.head(5));
//! # Ok(())
//! # }
//! ```
//!
//! Setting `.debug(true)` and calling [`SeriesBuilder::send`] returns the request that
//! would have been sent instead of calling the API.

pub mod core;
pub mod series;

pub use crate::core::{
    CredentialStore, DateDefaults, EnvCredentialStore, EvdsClient, EvdsClientBuilder, EvdsError,
    FileCredentialStore, FixedDates, MemoryCache, MemoryCredentialStore, ResponseCache,
    SystemDates,
};
pub use series::{
    Aggregation, Cell, Column, ColumnType, Formula, Frequency, ProxySettings, RequestConfig,
    RequestDescription, ResultTable, SeriesBuilder, SeriesIndex, SeriesOutput,
};

#[cfg(feature = "dataframe")]
pub use crate::core::dataframe::ToDataFrame;
