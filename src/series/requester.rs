use std::collections::BTreeMap;
use std::fmt;

use super::proxy::ProxySettings;
use super::address::{BuiltRequest, masked_headers};
use crate::core::{EvdsClient, EvdsError};

/// Body of one answered request. Lives only for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub url: String,
    pub body: String,
    /// Served from the response cache rather than the network.
    pub from_cache: bool,
}

/// What a request would send, returned by dry runs instead of performing I/O.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestDescription {
    pub method: &'static str,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub proxies: ProxySettings,
}

impl fmt::Debug for RequestDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDescription")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &masked_headers(&self.headers))
            .field("proxies", &self.proxies)
            .finish()
    }
}

impl fmt::Display for RequestDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.method, self.url)?;
        for (k, v) in masked_headers(&self.headers) {
            writeln!(f, "{k}: {v}")?;
        }
        write!(f, "proxy: {}", self.proxies)
    }
}

/// Sends a [`BuiltRequest`], or describes it without sending.
pub struct ApiRequester<'a> {
    client: &'a EvdsClient,
    request: BuiltRequest,
    proxies: ProxySettings,
}

impl<'a> ApiRequester<'a> {
    pub fn new(client: &'a EvdsClient, request: BuiltRequest, proxies: ProxySettings) -> Self {
        Self {
            client,
            request,
            proxies,
        }
    }

    pub fn request(&self) -> &BuiltRequest {
        &self.request
    }

    /// Dry run: no network access.
    pub fn describe(&self) -> RequestDescription {
        RequestDescription {
            method: "GET",
            url: self.request.url().to_string(),
            headers: self.request.headers().clone(),
            proxies: self.proxies.clone(),
        }
    }

    /// Perform the GET. With `use_cache`, the client's cache is consulted first and
    /// filled on a successful miss.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(url = %self.request.url()))
    )]
    pub async fn execute(&self, use_cache: bool) -> Result<RawResponse, EvdsError> {
        let url = self.request.url().to_string();
        let key = self.request.cache_key();

        let cache = if use_cache { self.client.cache() } else { None };
        #[cfg(feature = "tracing")]
        {
            if use_cache && cache.is_none() {
                tracing::debug!("caching requested but the client has no cache configured");
            }
        }

        if let Some(cache) = cache
            && let Some(body) = cache.get(key)
        {
            #[cfg(feature = "tracing")]
            tracing::debug!("cache hit");
            return Ok(RawResponse {
                url,
                body,
                from_cache: true,
            });
        }

        let http = self.client.http_for(&self.proxies)?;
        let mut req = http.get(self.request.url().clone());
        for (name, value) in self.request.headers() {
            req = req.header(name.as_str(), value.as_str());
        }

        let resp = req.send().await.map_err(|e| transport_error(&url, e))?;
        let status = resp.status();
        let body = crate::core::net::get_text(resp, self.request.kind(), self.request.label())
            .await
            .map_err(|e| transport_error(&url, e))?;

        if !status.is_success() {
            return Err(EvdsError::ApiRequest {
                status: Some(status.as_u16()),
                url,
                body,
            });
        }

        if let Some(cache) = cache {
            cache.put(key, &body);
        }

        Ok(RawResponse {
            url,
            body,
            from_cache: false,
        })
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> EvdsError {
    if err.is_timeout() {
        EvdsError::Timeout {
            url: url.to_string(),
        }
    } else {
        EvdsError::ApiRequest {
            status: err.status().map(|s| s.as_u16()),
            url: url.to_string(),
            body: err.to_string(),
        }
    }
}
