//! Public client surface + builder.
//! Defaults (endpoint, UA, timeout) live in `constants`.

mod constants;

pub(crate) use constants::DEFAULT_LOOKBACK_MONTHS;

use crate::core::cache::{MemoryCache, ResponseCache};
use crate::core::credentials::{CredentialStore, EnvCredentialStore};
use crate::core::dates::{DateDefaults, SystemDates};
use crate::core::EvdsError;
use crate::series::{ProxySettings, ResultTable, SeriesBuilder, SeriesIndex};
use constants::{DEFAULT_BASE_URL, DEFAULT_CACHE_CAPACITY, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use reqwest::Client;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Entry point to the EVDS API.
///
/// Cheap to clone; clones share the HTTP connection pool, the response cache and the
/// credential store.
#[derive(Clone)]
pub struct EvdsClient {
    http: Client,
    base_url: Url,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Option<Duration>,

    api_key: Option<String>,
    credentials: Arc<dyn CredentialStore>,
    cache: Option<Arc<dyn ResponseCache>>,
    dates: Arc<dyn DateDefaults>,
}

impl fmt::Debug for EvdsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvdsClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("cache_enabled", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl EvdsClient {
    /// Create a new builder.
    pub fn builder() -> EvdsClientBuilder {
        EvdsClientBuilder::default()
    }

    /// Start a series request for one or more codes.
    pub fn series(&self, index: impl Into<SeriesIndex>) -> SeriesBuilder<'_> {
        SeriesBuilder::new(self, index)
    }

    /// Fetch `index` over the default date window with no other options.
    pub async fn fetch_series(
        &self,
        index: impl Into<SeriesIndex>,
    ) -> Result<ResultTable, EvdsError> {
        self.series(index).fetch().await
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn cache(&self) -> Option<&dyn ResponseCache> {
        self.cache.as_deref()
    }

    pub(crate) fn credentials(&self) -> &dyn CredentialStore {
        self.credentials.as_ref()
    }

    pub(crate) fn dates(&self) -> &dyn DateDefaults {
        self.dates.as_ref()
    }

    /// Key configured on the builder, if any. Takes precedence over the store.
    pub(crate) fn configured_api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// HTTP client routed through `proxies`.
    ///
    /// Without proxy settings the shared client is reused; otherwise a client with the
    /// same UA and timeouts is built for the call.
    pub(crate) fn http_for(&self, proxies: &ProxySettings) -> Result<Client, EvdsError> {
        if proxies.is_none() {
            return Ok(self.http.clone());
        }
        let builder = http_builder(&self.user_agent, self.timeout, self.connect_timeout);
        Ok(proxies.apply(builder)?.build()?)
    }
}

fn http_builder(
    user_agent: &str,
    timeout: Duration,
    connect_timeout: Option<Duration>,
) -> reqwest::ClientBuilder {
    let mut httpb = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout);
    if let Some(ct) = connect_timeout {
        httpb = httpb.connect_timeout(ct);
    }
    httpb
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct EvdsClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    api_key: Option<String>,
    credentials: Option<Arc<dyn CredentialStore>>,
    cache: Option<Arc<dyn ResponseCache>>,
    dates: Option<Arc<dyn DateDefaults>>,
}

impl EvdsClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the service root (e.g., `https://evds2.tcmb.gov.tr/service/evds/`).
    ///
    /// A trailing `/` is added when missing so request paths append to it.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the overall request timeout. Default: 30 seconds.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Use this key for every request that does not pass its own.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Where keys are loaded from and saved to. Default: [`EnvCredentialStore`].
    pub fn credential_store(mut self, store: impl CredentialStore + 'static) -> Self {
        self.credentials = Some(Arc::new(store));
        self
    }

    /// Plug in a response cache. Requests only consult it when they ask for caching.
    pub fn cache(mut self, cache: impl ResponseCache + 'static) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Enable an in-memory cache whose entries expire after `ttl`, holding at most
    /// 512 responses. Use [`cache`](Self::cache) for other limits.
    pub fn memory_cache(self, ttl: Duration) -> Self {
        self.cache(
            MemoryCache::new()
                .with_ttl(ttl)
                .with_capacity_limit(DEFAULT_CACHE_CAPACITY),
        )
    }

    /// Source of default start/end dates. Default: [`SystemDates`].
    pub fn date_defaults(mut self, dates: impl DateDefaults + 'static) -> Self {
        self.dates = Some(Arc::new(dates));
        self
    }

    pub fn build(self) -> Result<EvdsClient, EvdsError> {
        let mut base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_string());
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let http = http_builder(&user_agent, timeout, self.connect_timeout).build()?;

        Ok(EvdsClient {
            http,
            base_url,
            user_agent,
            timeout,
            connect_timeout: self.connect_timeout,
            api_key: self.api_key.filter(|k| !k.trim().is_empty()),
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(EnvCredentialStore::default())),
            cache: self.cache,
            dates: self
                .dates
                .unwrap_or_else(|| Arc::new(SystemDates::default())),
        })
    }
}
