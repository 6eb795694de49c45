//! Series observations: request configuration, URL assembly, execution and parsing.
//!
//! [`SeriesBuilder`] drives the whole pipeline:
//! `RequestConfig` → `UrlBuilder` → `ApiRequester` → `DataProcessor` → [`ResultTable`].

mod address;
mod config;
mod params;
mod process;
mod proxy;
mod requester;
mod table;
mod wire;

use std::collections::BTreeMap;

use chrono::NaiveDate;

pub use address::{API_KEY_HEADER, BuiltRequest, SeriesKind, UrlBuilder, UrlKind};
pub use config::{RequestConfig, SeriesIndex};
pub use params::{Aggregation, Formula, Frequency, FrequencyInput, PerSeries};
pub use process::DataProcessor;
pub use proxy::{ProxyManager, ProxySettings};
pub use requester::{ApiRequester, RawResponse, RequestDescription};
pub use table::{Cell, Column, ColumnType, ResultTable};

use crate::core::dates::{format_date, parse_date};
use crate::core::{EvdsClient, EvdsError};

/// What [`SeriesBuilder::send`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesOutput {
    Table(ResultTable),
    /// Returned instead of a table when `debug` is set; nothing was sent.
    DryRun(RequestDescription),
}

/// Builder for a series request. Obtain one with [`EvdsClient::series`].
///
/// ```no_run
/// # async fn run() -> Result<(), evds_rs::EvdsError> {
/// let client = evds_rs::EvdsClient::builder().api_key("XXXXXXXXXX").build()?;
/// let table = client
///     .series("TP.ODEMGZS.BDTTOPLAM")
///     .start_date("01-01-2020")
///     .end_date("01-01-2021")
///     .frequency("monthly")
///     .fetch()
///     .await?;
/// println!("{}", table.head(5));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SeriesBuilder<'a> {
    client: &'a EvdsClient,
    kind: &'a dyn UrlKind,
    index: SeriesIndex,
    start_date: Option<String>,
    end_date: Option<String>,
    frequency: Option<FrequencyInput>,
    formulas: Option<PerSeries<Formula>>,
    aggregation: Option<PerSeries<Aggregation>>,
    cache: bool,
    proxy: Option<String>,
    proxies: Option<BTreeMap<String, String>>,
    debug: bool,
    api_key: Option<String>,
}

impl<'a> SeriesBuilder<'a> {
    pub fn new(client: &'a EvdsClient, index: impl Into<SeriesIndex>) -> Self {
        Self {
            client,
            kind: &SeriesKind,
            index: index.into(),
            start_date: None,
            end_date: None,
            frequency: None,
            formulas: None,
            aggregation: None,
            cache: false,
            proxy: None,
            proxies: None,
            debug: false,
            api_key: None,
        }
    }

    /// First observation date, e.g. `"01-01-2020"`. Defaults to the client's
    /// [`DateDefaults`](crate::core::DateDefaults).
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    /// Last observation date. Defaults to today.
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Set both dates from typed values.
    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(format_date(start));
        self.end_date = Some(format_date(end));
        self
    }

    pub fn frequency(mut self, frequency: impl Into<FrequencyInput>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    /// One formula for every series, or one per series.
    pub fn formulas(mut self, formulas: impl Into<PerSeries<Formula>>) -> Self {
        self.formulas = Some(formulas.into());
        self
    }

    /// One aggregation for every series, or one per series.
    pub fn aggregation(mut self, aggregation: impl Into<PerSeries<Aggregation>>) -> Self {
        self.aggregation = Some(aggregation.into());
        self
    }

    /// Serve repeated identical requests from the client's cache.
    pub fn cache(mut self, yes: bool) -> Self {
        self.cache = yes;
        self
    }

    /// Route every scheme through one proxy. Conflicts with [`proxies`](Self::proxies).
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Route per scheme (`http`, `https`, `all`). Conflicts with [`proxy`](Self::proxy).
    pub fn proxies<K, V>(mut self, proxies: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.proxies = Some(
            proxies
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Return the request description from [`send`](Self::send) instead of calling the API.
    pub fn debug(mut self, yes: bool) -> Self {
        self.debug = yes;
        self
    }

    /// Key for this request. Saved to the client's credential store when it holds none.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Use a different request layout.
    pub fn url_kind(mut self, kind: &'a dyn UrlKind) -> Self {
        self.kind = kind;
        self
    }

    /// Run the request, or describe it when `debug` is set.
    pub async fn send(self) -> Result<SeriesOutput, EvdsError> {
        if self.debug {
            self.dry_run().map(SeriesOutput::DryRun)
        } else {
            self.fetch().await.map(SeriesOutput::Table)
        }
    }

    /// Describe the request without any network I/O.
    pub fn dry_run(self) -> Result<RequestDescription, EvdsError> {
        let (requester, _) = self.prepare()?;
        Ok(requester.describe())
    }

    /// Call the API and parse the answer, ignoring `debug`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(series = ?self.index.codes()))
    )]
    pub async fn fetch(self) -> Result<ResultTable, EvdsError> {
        let (requester, config) = self.prepare()?;
        let raw = requester.execute(config.cache()).await?;
        DataProcessor::new(raw).process()
    }

    fn prepare(&self) -> Result<(ApiRequester<'a>, RequestConfig), EvdsError> {
        let api_key = self.resolve_api_key()?;

        let dates = self.client.dates();
        let start = match &self.start_date {
            Some(s) => parse_date(s)?,
            None => dates.default_start(),
        };
        let end = match &self.end_date {
            Some(s) => parse_date(s)?,
            None => dates.default_end(),
        };

        let config = RequestConfig::new(
            self.index.clone(),
            start,
            end,
            self.frequency.clone(),
            self.formulas.clone(),
            self.aggregation.clone(),
            self.cache,
        )?;
        let proxies = ProxyManager::new(self.proxy.clone(), self.proxies.clone()).resolve()?;
        let built = UrlBuilder::new(&config, self.kind)
            .build(self.client.base_url(), api_key.as_deref())?;

        Ok((ApiRequester::new(self.client, built, proxies), config))
    }

    /// Explicit key, then the client's configured key, then the credential store.
    fn resolve_api_key(&self) -> Result<Option<String>, EvdsError> {
        let store = self.client.credentials();
        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            if store.load()?.is_none() {
                store.save(key)?;
            }
            return Ok(Some(key.to_string()));
        }
        if let Some(key) = self.client.configured_api_key() {
            return Ok(Some(key.to_string()));
        }
        store.load()
    }
}
