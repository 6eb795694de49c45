//! Request address assembly.
//!
//! The EVDS service takes its parameters as an `&`-joined path segment rather than a
//! query string: `.../service/evds/series=A-B&startDate=01-01-2020&...`.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;
use url::form_urlencoded::byte_serialize;

use super::config::RequestConfig;
use crate::core::EvdsError;
use crate::core::dates::format_date;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "key";

/// Separator the API uses between series codes and between per-series values.
const LIST_SEPARATOR: &str = "-";

/// Shape of a request address: which path it produces and which parameters it needs.
///
/// Encoding and per-series alignment are handled by [`UrlBuilder`]; a kind only
/// decides the layout.
pub trait UrlKind: Send + Sync {
    fn name(&self) -> &'static str;

    /// Parameters that must be present before [`build_path`](UrlKind::build_path) is called.
    fn required_params(&self) -> &'static [&'static str];

    /// Lay out already-encoded `(name, value)` pairs as the path appended to the base URL.
    fn build_path(&self, params: &[(&'static str, String)]) -> String;
}

/// Observations for one or more series codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesKind;

impl UrlKind for SeriesKind {
    fn name(&self) -> &'static str {
        "series"
    }

    fn required_params(&self) -> &'static [&'static str] {
        &["series", "startDate", "endDate", "type"]
    }

    fn build_path(&self, params: &[(&'static str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A finished request: URL plus headers. Never mutated after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct BuiltRequest {
    kind: &'static str,
    label: String,
    url: Url,
    headers: BTreeMap<String, String>,
}

impl BuiltRequest {
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The requested codes joined by `-`, for logs and fixture names.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Identity of the request for caching. The key header is not part of it.
    pub fn cache_key(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Debug for BuiltRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltRequest")
            .field("kind", &self.kind)
            .field("url", &self.url.as_str())
            .field("headers", &masked_headers(&self.headers))
            .finish()
    }
}

pub(crate) fn masked_headers(headers: &BTreeMap<String, String>) -> BTreeMap<&str, &str> {
    headers
        .iter()
        .map(|(k, v)| {
            let shown = if k == API_KEY_HEADER { "***" } else { v.as_str() };
            (k.as_str(), shown)
        })
        .collect()
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

fn encode_list<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values
        .into_iter()
        .map(encode)
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR)
}

/// Combines a [`RequestConfig`] with a [`UrlKind`] into a [`BuiltRequest`]. No I/O.
pub struct UrlBuilder<'a> {
    config: &'a RequestConfig,
    kind: &'a dyn UrlKind,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(config: &'a RequestConfig, kind: &'a dyn UrlKind) -> Self {
        Self { config, kind }
    }

    /// Encoded wire parameters in the order the service documents them.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let c = self.config;
        let mut params = vec![
            ("series", encode_list(c.index().iter().map(String::as_str))),
            ("startDate", encode(&format_date(c.start()))),
            ("endDate", encode(&format_date(c.end()))),
            ("type", "json".to_string()),
        ];
        if let Some(formulas) = c.formulas() {
            let codes: Vec<String> = formulas.iter().map(|f| f.as_param()).collect();
            params.push(("formulas", encode_list(codes.iter().map(String::as_str))));
        }
        if let Some(freq) = c.frequency() {
            params.push(("frequency", freq.code().to_string()));
        }
        if let Some(aggs) = c.aggregations() {
            params.push((
                "aggregationTypes",
                encode_list(aggs.iter().map(|a| a.as_param())),
            ));
        }
        params
    }

    pub fn build(&self, base: &Url, api_key: Option<&str>) -> Result<BuiltRequest, EvdsError> {
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(EvdsError::MissingApiKey)?;

        let params = self.params();
        if let Some(missing) = self
            .kind
            .required_params()
            .iter()
            .copied()
            .find(|name| !params.iter().any(|(k, v)| k == name && !v.is_empty()))
        {
            return Err(EvdsError::MissingParameter(missing));
        }

        let url = base.join(&self.kind.build_path(&params))?;
        let mut headers = BTreeMap::new();
        headers.insert(API_KEY_HEADER.to_string(), key.to_string());

        Ok(BuiltRequest {
            kind: self.kind.name(),
            label: self.config.index().join(LIST_SEPARATOR),
            url,
            headers,
        })
    }
}
