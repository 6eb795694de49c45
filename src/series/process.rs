use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::requester::RawResponse;
use super::table::{Cell, Column, ColumnType, ResultTable};
use super::wire::{DATE_COLUMN, SeriesEnvelope, UNIXTIME_COLUMN};
use crate::core::EvdsError;

/// Values the service uses for "no observation".
const MISSING_MARKERS: [&str; 4] = ["", "ND", "-", "null"];

/// Turns a raw series payload into a [`ResultTable`].
pub struct DataProcessor {
    raw: RawResponse,
}

impl DataProcessor {
    pub fn new(raw: RawResponse) -> Self {
        Self { raw }
    }

    pub fn process(self) -> Result<ResultTable, EvdsError> {
        let envelope: SeriesEnvelope = serde_json::from_str(&self.raw.body)
            .map_err(|e| EvdsError::MalformedResponse(format!("json parse error: {e}")))?;
        let items = envelope
            .items
            .ok_or_else(|| EvdsError::MalformedResponse("missing `items` record list".into()))?;

        if let Some(total) = envelope.total_count.as_ref().and_then(as_count)
            && total != items.len() as u64
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(total, records = items.len(), "totalCount differs from record count");
        }

        let table = build_table(&items);

        #[cfg(feature = "tracing")]
        tracing::debug!(url = %self.raw.url, head = %table.head(5), "parsed series table");

        Ok(table)
    }
}

fn as_count(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn build_table(items: &[Map<String, Value>]) -> ResultTable {
    let mut names: Vec<&str> = Vec::new();
    for record in items {
        for key in record.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let raw: Vec<Option<&Value>> = items
                .iter()
                .map(|r| r.get(name).filter(|v| !is_missing(v)))
                .collect();
            infer_column(name, &raw)
        })
        .collect();

    ResultTable::new(columns, items.len())
}

fn is_missing(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => MISSING_MARKERS.contains(&s.trim()),
        _ => false,
    }
}

/// Apply `parse` to every present value; `None` if any value fails.
fn all_parse<F>(raw: &[Option<&Value>], parse: F) -> Option<Vec<Cell>>
where
    F: Fn(&Value) -> Option<Cell>,
{
    raw.iter()
        .map(|v| match v {
            Some(v) => parse(v),
            None => Some(Cell::Missing),
        })
        .collect()
}

fn infer_column(name: &str, raw: &[Option<&Value>]) -> Column {
    let typed = match name {
        DATE_COLUMN => all_parse(raw, |v| v.as_str().and_then(parse_period).map(Cell::Date))
            .map(|cells| (ColumnType::Date, cells)),
        UNIXTIME_COLUMN => {
            all_parse(raw, |v| parse_epoch(v).map(Cell::Integer)).map(|c| (ColumnType::Integer, c))
        }
        _ => all_parse(raw, |v| parse_number(v).map(Cell::Number)).map(|c| (ColumnType::Number, c)),
    };

    let (kind, cells) = typed.unwrap_or_else(|| {
        let cells = raw
            .iter()
            .map(|v| v.map_or(Cell::Missing, |v| Cell::Text(text_of(v))))
            .collect();
        (ColumnType::Text, cells)
    });
    Column::new(name, kind, cells)
}

fn text_of(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn parse_epoch(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => map.get("$numberLong").and_then(parse_epoch),
        _ => None,
    }
}

/// Period labels as the service writes them, mapped to the first day of the period:
/// `DD-MM-YYYY`, `YYYY-M`, `YYYY-Qn`, `YYYY-Sn`, `YYYY`.
pub(crate) fn parse_period(label: &str) -> Option<NaiveDate> {
    let s = label.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d-%m-%Y") {
        return Some(d);
    }
    let (year, rest) = match s.split_once('-') {
        Some((y, r)) => (y, Some(r)),
        None => (s, None),
    };
    if year.len() != 4 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month = match rest {
        None => 1,
        Some(r) => {
            let upper = r.to_ascii_uppercase();
            if let Some(q) = upper.strip_prefix('Q') {
                let q: u32 = q.parse().ok().filter(|q| (1..=4).contains(q))?;
                3 * (q - 1) + 1
            } else if let Some(h) = upper.strip_prefix('S') {
                let h: u32 = h.parse().ok().filter(|h| (1..=2).contains(h))?;
                6 * (h - 1) + 1
            } else {
                r.parse().ok()?
            }
        }
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}
