use serde::Deserialize;
use serde_json::{Map, Value};

/* --- Internal response mapping (only fields we need) --- */

#[derive(Deserialize)]
pub(crate) struct SeriesEnvelope {
    #[serde(rename = "totalCount")]
    pub(crate) total_count: Option<Value>,
    pub(crate) items: Option<Vec<Map<String, Value>>>,
}

/// Column holding the observation period.
pub(crate) const DATE_COLUMN: &str = "Tarih";

/// Column holding the period start as epoch seconds, wrapped as `{"$numberLong": "..."}`.
pub(crate) const UNIXTIME_COLUMN: &str = "UNIXTIME";
