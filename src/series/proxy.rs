use std::collections::BTreeMap;
use std::fmt;

use reqwest::Proxy;

use crate::core::EvdsError;

/// Resolved proxy routing for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProxySettings {
    /// Direct connection (the HTTP stack's own environment defaults still apply).
    #[default]
    None,
    /// One proxy for every scheme.
    All(String),
    /// Proxy per scheme; keys are `http`, `https` or `all`.
    PerScheme(BTreeMap<String, String>),
}

impl ProxySettings {
    pub fn is_none(&self) -> bool {
        matches!(self, ProxySettings::None)
    }

    /// Register the proxies on an HTTP client builder.
    pub(crate) fn apply(
        &self,
        mut builder: reqwest::ClientBuilder,
    ) -> Result<reqwest::ClientBuilder, EvdsError> {
        match self {
            ProxySettings::None => {}
            ProxySettings::All(url) => {
                builder = builder.proxy(Proxy::all(url).map_err(|e| invalid(url, e))?);
            }
            ProxySettings::PerScheme(map) => {
                for (scheme, url) in map {
                    let proxy = match scheme.as_str() {
                        "http" => Proxy::http(url),
                        "https" => Proxy::https(url),
                        _ => Proxy::all(url),
                    }
                    .map_err(|e| invalid(url, e))?;
                    builder = builder.proxy(proxy);
                }
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(proxies = %self, "routing request through proxy");
        Ok(builder)
    }
}

impl fmt::Display for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxySettings::None => f.write_str("direct"),
            ProxySettings::All(url) => write!(f, "all={url}"),
            ProxySettings::PerScheme(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}={v}")).collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

fn invalid(target: &str, err: impl fmt::Display) -> EvdsError {
    EvdsError::InvalidProxy {
        target: target.to_string(),
        reason: err.to_string(),
    }
}

/// Turns the caller's `proxy` / `proxies` arguments into [`ProxySettings`].
#[derive(Debug, Clone, Default)]
pub struct ProxyManager {
    proxy: Option<String>,
    proxies: Option<BTreeMap<String, String>>,
}

impl ProxyManager {
    pub fn new(proxy: Option<String>, proxies: Option<BTreeMap<String, String>>) -> Self {
        Self { proxy, proxies }
    }

    /// Validate and normalize. Both forms at once is an error; neither means direct.
    pub fn resolve(&self) -> Result<ProxySettings, EvdsError> {
        match (&self.proxy, &self.proxies) {
            (Some(_), Some(_)) => Err(EvdsError::ConflictingProxyConfig),
            (None, None) => Ok(ProxySettings::None),
            (Some(url), None) => Ok(ProxySettings::All(checked_url(url)?)),
            (None, Some(map)) => {
                let mut out = BTreeMap::new();
                for (scheme, url) in map {
                    let scheme = normalize_scheme(scheme)?;
                    out.insert(scheme, checked_url(url)?);
                }
                if out.is_empty() {
                    Ok(ProxySettings::None)
                } else {
                    Ok(ProxySettings::PerScheme(out))
                }
            }
        }
    }
}

fn normalize_scheme(scheme: &str) -> Result<String, EvdsError> {
    let s = scheme.trim().trim_end_matches("://").to_ascii_lowercase();
    match s.as_str() {
        "http" | "https" | "all" => Ok(s),
        _ => Err(EvdsError::InvalidProxy {
            target: scheme.to_string(),
            reason: "scheme must be http, https or all".into(),
        }),
    }
}

fn checked_url(raw: &str) -> Result<String, EvdsError> {
    let trimmed = raw.trim();
    url::Url::parse(trimmed).map_err(|e| invalid(raw, e))?;
    Ok(trimmed.to_string())
}
