use chrono::NaiveDate;

use super::params::{Aggregation, Formula, Frequency, FrequencyInput, PerSeries};
use crate::core::EvdsError;
use crate::core::dates::format_date;

/// One or more series codes, in request order.
///
/// A string may hold several codes separated by whitespace or newlines, so a
/// multi-line template can be pasted as is; anything after `#` on a line is a comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeriesIndex(Vec<String>);

impl SeriesIndex {
    pub fn codes(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn from_parts<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        let codes = parts
            .into_iter()
            .flat_map(str::lines)
            .map(|line| line.split_once('#').map_or(line, |(codes, _)| codes))
            .flat_map(str::split_whitespace)
            .map(str::to_string)
            .collect();
        SeriesIndex(codes)
    }
}

impl From<&str> for SeriesIndex {
    fn from(s: &str) -> Self {
        SeriesIndex::from_parts([s])
    }
}

impl From<String> for SeriesIndex {
    fn from(s: String) -> Self {
        SeriesIndex::from_parts([s.as_str()])
    }
}

impl From<&[&str]> for SeriesIndex {
    fn from(items: &[&str]) -> Self {
        SeriesIndex::from_parts(items.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for SeriesIndex {
    fn from(items: [&str; N]) -> Self {
        SeriesIndex::from_parts(items)
    }
}

impl From<Vec<&str>> for SeriesIndex {
    fn from(items: Vec<&str>) -> Self {
        SeriesIndex::from_parts(items)
    }
}

impl From<Vec<String>> for SeriesIndex {
    fn from(items: Vec<String>) -> Self {
        SeriesIndex::from_parts(items.iter().map(String::as_str))
    }
}

/// A validated, normalized series request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    index: Vec<String>,
    start: NaiveDate,
    end: NaiveDate,
    frequency: Option<Frequency>,
    formulas: Option<Vec<Formula>>,
    aggregations: Option<Vec<Aggregation>>,
    cache: bool,
}

impl RequestConfig {
    /// Validate and normalize request parameters. Performs no I/O.
    ///
    /// `formulas` and `aggregation` take either one entry, applied to every series,
    /// or exactly one entry per series.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: impl Into<SeriesIndex>,
        start: NaiveDate,
        end: NaiveDate,
        frequency: Option<FrequencyInput>,
        formulas: Option<PerSeries<Formula>>,
        aggregation: Option<PerSeries<Aggregation>>,
        cache: bool,
    ) -> Result<Self, EvdsError> {
        let index = index.into().0;
        if index.is_empty() {
            return Err(EvdsError::EmptyIndex);
        }
        no_separator("series", index.iter().map(String::as_str))?;
        if start > end {
            return Err(EvdsError::InvalidDateRange {
                start: format_date(start),
                end: format_date(end),
            });
        }
        let frequency = frequency.as_ref().map(FrequencyInput::resolve).transpose()?;
        let formulas = formulas
            .map(|f| align("formulas", f, index.len()))
            .transpose()?;
        let aggregations = aggregation
            .map(|a| align("aggregation", a, index.len()))
            .transpose()?;
        if let Some(f) = &formulas {
            let params: Vec<String> = f.iter().map(Formula::as_param).collect();
            no_separator("formulas", params.iter().map(String::as_str))?;
        }
        if let Some(a) = &aggregations {
            no_separator("aggregation", a.iter().map(Aggregation::as_param))?;
        }

        Ok(Self {
            index,
            start,
            end,
            frequency,
            formulas,
            aggregations,
            cache,
        })
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }

    /// One formula per series, when formulas were requested.
    pub fn formulas(&self) -> Option<&[Formula]> {
        self.formulas.as_deref()
    }

    /// One aggregation per series, when aggregation was requested.
    pub fn aggregations(&self) -> Option<&[Aggregation]> {
        self.aggregations.as_deref()
    }

    pub fn cache(&self) -> bool {
        self.cache
    }
}

/// Entries are joined with `-` on the wire, so they must not contain it.
fn no_separator<'v>(
    param: &'static str,
    mut values: impl Iterator<Item = &'v str>,
) -> Result<(), EvdsError> {
    match values.find(|v| v.contains('-')) {
        Some(value) => Err(EvdsError::SeparatorInValue {
            param,
            value: value.to_string(),
        }),
        None => Ok(()),
    }
}

fn align<T: Clone>(
    param: &'static str,
    values: PerSeries<T>,
    series: usize,
) -> Result<Vec<T>, EvdsError> {
    let mut values = values.0;
    match values.len() {
        n if n == series => Ok(values),
        1 => {
            let only = values.remove(0);
            Ok(vec![only; series])
        }
        got => Err(EvdsError::ParameterArity {
            param,
            expected: series,
            got,
        }),
    }
}
