//! Centralized constants for default endpoints and UA.

/// Identifies the crate to the service.
pub(crate) const USER_AGENT: &str = concat!("evds-rs/", env!("CARGO_PKG_VERSION"));

/// EVDS service root; request paths such as `series=...` are appended.
pub(crate) const DEFAULT_BASE_URL: &str = "https://evds2.tcmb.gov.tr/service/evds/";

/// Overall request timeout applied when the builder does not set one.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How far back the default start date reaches from today.
pub(crate) const DEFAULT_LOOKBACK_MONTHS: u32 = 60;

/// Entry limit of the cache enabled by `EvdsClientBuilder::memory_cache`.
pub(crate) const DEFAULT_CACHE_CAPACITY: usize = 512;
