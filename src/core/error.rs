use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum EvdsError {
    /// A date string could not be parsed in any of the accepted formats.
    #[error("invalid date {value:?}: expected DD-MM-YYYY")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// The start date falls after the end date.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Requested start, rendered in wire format.
        start: String,
        /// Requested end, rendered in wire format.
        end: String,
    },

    /// No series code was supplied.
    #[error("at least one series code is required")]
    EmptyIndex,

    /// A per-series parameter list does not line up with the series list.
    #[error("{param} has {got} entries but {expected} series were requested (use 1 to apply to all)")]
    ParameterArity {
        /// Name of the offending parameter (`formulas` or `aggregation`).
        param: &'static str,
        /// Number of series in the request.
        expected: usize,
        /// Number of entries supplied.
        got: usize,
    },

    /// A series code or token contains `-`, which the API uses to separate list entries.
    #[error("{param} value {value:?} contains the list separator '-'")]
    SeparatorInValue {
        /// `series`, `formulas` or `aggregation`.
        param: &'static str,
        /// The offending value.
        value: String,
    },

    /// The frequency name or code is not one the API understands.
    #[error("unknown frequency: {0}")]
    UnknownFrequency(String),

    /// Both a single proxy and a proxy mapping were supplied.
    #[error("supply either `proxy` or `proxies`, not both")]
    ConflictingProxyConfig,

    /// A proxy entry could not be turned into an HTTP proxy.
    #[error("invalid proxy {target:?}: {reason}")]
    InvalidProxy {
        /// The scheme or URL that was rejected.
        target: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A request kind requires a parameter the configuration did not produce.
    #[error("request is missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// No API key was given and none is stored.
    #[error("no API key given and none stored; pass one with `api_key`")]
    MissingApiKey,

    /// The request failed in transport or the server answered with a non-2xx status.
    #[error("request to {url} failed{}: {body}", status_suffix(.status))]
    ApiRequest {
        /// The HTTP status, when the server answered.
        status: Option<u16>,
        /// The URL that was requested.
        url: String,
        /// Response body, or the transport error message.
        body: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// The URL that was requested.
        url: String,
    },

    /// The server answered but the payload does not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The credential store refused a load or save.
    #[error("credential store error: {0}")]
    Credential(String),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}
