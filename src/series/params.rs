use std::fmt;
use std::str::FromStr;

use crate::core::EvdsError;

/// Sampling interval of the requested observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    /// Working days only.
    Business,
    /// Weekly, observed on Fridays.
    Weekly,
    /// Twice a month.
    Semimonthly,
    Monthly,
    Quarterly,
    Semiannual,
    Annual,
}

impl Frequency {
    /// Numeric code the API expects in the `frequency` parameter.
    pub fn code(self) -> u8 {
        match self {
            Frequency::Daily => 1,
            Frequency::Business => 2,
            Frequency::Weekly => 3,
            Frequency::Semimonthly => 4,
            Frequency::Monthly => 5,
            Frequency::Quarterly => 6,
            Frequency::Semiannual => 7,
            Frequency::Annual => 8,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, EvdsError> {
        Ok(match code {
            1 => Frequency::Daily,
            2 => Frequency::Business,
            3 => Frequency::Weekly,
            4 => Frequency::Semimonthly,
            5 => Frequency::Monthly,
            6 => Frequency::Quarterly,
            7 => Frequency::Semiannual,
            8 => Frequency::Annual,
            other => return Err(EvdsError::UnknownFrequency(other.to_string())),
        })
    }
}

impl FromStr for Frequency {
    type Err = EvdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if let Ok(code) = key.parse::<u8>() {
            return Frequency::from_code(code);
        }
        Ok(match key.as_str() {
            "daily" | "day" => Frequency::Daily,
            "business" | "workday" | "weekday" | "business_day" => Frequency::Business,
            "weekly" | "week" => Frequency::Weekly,
            "semimonthly" | "biweekly" | "twice_a_month" | "weekly2" => Frequency::Semimonthly,
            "monthly" | "month" => Frequency::Monthly,
            "quarterly" | "quarter" => Frequency::Quarterly,
            "semiannual" | "semiannually" | "semi_annual" => Frequency::Semiannual,
            "annual" | "annually" | "yearly" | "year" => Frequency::Annual,
            _ => return Err(EvdsError::UnknownFrequency(s.to_string())),
        })
    }
}

/// A frequency as the caller supplied it, resolved when the request is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrequencyInput {
    Known(Frequency),
    Name(String),
    Code(u8),
}

impl FrequencyInput {
    pub(crate) fn resolve(&self) -> Result<Frequency, EvdsError> {
        match self {
            FrequencyInput::Known(f) => Ok(*f),
            FrequencyInput::Name(n) => n.parse(),
            FrequencyInput::Code(c) => Frequency::from_code(*c),
        }
    }
}

impl From<Frequency> for FrequencyInput {
    fn from(f: Frequency) -> Self {
        FrequencyInput::Known(f)
    }
}

impl From<&str> for FrequencyInput {
    fn from(s: &str) -> Self {
        FrequencyInput::Name(s.to_string())
    }
}

impl From<String> for FrequencyInput {
    fn from(s: String) -> Self {
        FrequencyInput::Name(s)
    }
}

impl From<u8> for FrequencyInput {
    fn from(c: u8) -> Self {
        FrequencyInput::Code(c)
    }
}

/// Per-series transformation computed server-side.
///
/// Names and codes the API documents map onto their numeric code; anything else is
/// forwarded untouched so newer server-side formulas keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Level,
    PercentChange,
    Difference,
    YearOverYearPercentChange,
    YearOverYearDifference,
    PercentChangeFromEndOfPreviousYear,
    DifferenceFromEndOfPreviousYear,
    MovingAverage,
    MovingSum,
    Custom(String),
}

impl Formula {
    pub(crate) fn as_param(&self) -> String {
        let code = match self {
            Formula::Level => 0,
            Formula::PercentChange => 1,
            Formula::Difference => 2,
            Formula::YearOverYearPercentChange => 3,
            Formula::YearOverYearDifference => 4,
            Formula::PercentChangeFromEndOfPreviousYear => 5,
            Formula::DifferenceFromEndOfPreviousYear => 6,
            Formula::MovingAverage => 7,
            Formula::MovingSum => 8,
            Formula::Custom(raw) => return raw.clone(),
        };
        code.to_string()
    }

    fn parse_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "0" | "level" => Formula::Level,
            "1" | "percentage_change" | "percent_change" => Formula::PercentChange,
            "2" | "difference" => Formula::Difference,
            "3" | "year_to_year_percent_change" | "yoy_percent_change" => {
                Formula::YearOverYearPercentChange
            }
            "4" | "year_to_year_differences" | "yoy_difference" => Formula::YearOverYearDifference,
            "5" | "percentage_change_in_comparison_with_end_of_previous_year" => {
                Formula::PercentChangeFromEndOfPreviousYear
            }
            "6" | "difference_in_comparison_with_end_of_previous_year" => {
                Formula::DifferenceFromEndOfPreviousYear
            }
            "7" | "moving_average" => Formula::MovingAverage,
            "8" | "moving_sum" => Formula::MovingSum,
            _ => Formula::Custom(token.trim().to_string()),
        }
    }
}

impl From<&str> for Formula {
    fn from(s: &str) -> Self {
        Formula::parse_token(s)
    }
}

impl From<u8> for Formula {
    fn from(code: u8) -> Self {
        Formula::parse_token(&code.to_string())
    }
}

/// How observations are combined when the requested frequency is coarser than the
/// native one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Aggregation {
    Avg,
    Min,
    Max,
    First,
    Last,
    Sum,
    Custom(String),
}

impl Aggregation {
    pub(crate) fn as_param(&self) -> &str {
        match self {
            Aggregation::Avg => "avg",
            Aggregation::Min => "min",
            Aggregation::Max => "max",
            Aggregation::First => "first",
            Aggregation::Last => "last",
            Aggregation::Sum => "sum",
            Aggregation::Custom(raw) => raw,
        }
    }
}

impl From<&str> for Aggregation {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "avg" | "average" | "mean" => Aggregation::Avg,
            "min" => Aggregation::Min,
            "max" => Aggregation::Max,
            "first" => Aggregation::First,
            "last" => Aggregation::Last,
            "sum" | "total" => Aggregation::Sum,
            _ => Aggregation::Custom(s.trim().to_string()),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// One value, or one value per series, for a per-series parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerSeries<T>(pub(crate) Vec<T>);

impl<T> PerSeries<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: for<'a> From<&'a str>> From<&str> for PerSeries<T> {
    fn from(s: &str) -> Self {
        PerSeries(vec![T::from(s)])
    }
}

impl<T: for<'a> From<&'a str>> From<String> for PerSeries<T> {
    fn from(s: String) -> Self {
        PerSeries(vec![T::from(s.as_str())])
    }
}

impl<T: for<'a> From<&'a str>, const N: usize> From<[&str; N]> for PerSeries<T> {
    fn from(items: [&str; N]) -> Self {
        PerSeries(items.into_iter().map(T::from).collect())
    }
}

impl<T: for<'a> From<&'a str>> From<Vec<&str>> for PerSeries<T> {
    fn from(items: Vec<&str>) -> Self {
        PerSeries(items.into_iter().map(T::from).collect())
    }
}

impl<T: for<'a> From<&'a str>> From<Vec<String>> for PerSeries<T> {
    fn from(items: Vec<String>) -> Self {
        PerSeries(items.iter().map(|s| T::from(s.as_str())).collect())
    }
}

impl From<Formula> for PerSeries<Formula> {
    fn from(f: Formula) -> Self {
        PerSeries(vec![f])
    }
}

impl From<Vec<Formula>> for PerSeries<Formula> {
    fn from(items: Vec<Formula>) -> Self {
        PerSeries(items)
    }
}

impl From<u8> for PerSeries<Formula> {
    fn from(code: u8) -> Self {
        PerSeries(vec![Formula::from(code)])
    }
}

impl From<Aggregation> for PerSeries<Aggregation> {
    fn from(a: Aggregation) -> Self {
        PerSeries(vec![a])
    }
}

impl From<Vec<Aggregation>> for PerSeries<Aggregation> {
    fn from(items: Vec<Aggregation>) -> Self {
        PerSeries(items)
    }
}
