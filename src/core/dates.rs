//! Wire date format and the injectable source of default start/end dates.

use chrono::{Datelike, Months, NaiveDate, Utc};
use chrono_tz::Europe::Istanbul;

use crate::core::EvdsError;

/// Date format the API expects for `startDate` / `endDate`.
pub const WIRE_DATE_FORMAT: &str = "%d-%m-%Y";

const ACCEPTED_FORMATS: [&str; 4] = [WIRE_DATE_FORMAT, "%d.%m.%Y", "%d/%m/%Y", "%Y-%m-%d"];

/// Parse a user-supplied date in any accepted format.
pub fn parse_date(value: &str) -> Result<NaiveDate, EvdsError> {
    let trimmed = value.trim();
    ACCEPTED_FORMATS
        .iter()
        // `%Y` takes short years too; "01-01-20" must not become year 20
        .find_map(|fmt| {
            NaiveDate::parse_from_str(trimmed, fmt)
                .ok()
                .filter(|d| d.year() >= 1000)
        })
        .ok_or_else(|| EvdsError::InvalidDate {
            value: value.to_string(),
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

/// Supplies the dates used when a request leaves `start_date` or `end_date` unset.
pub trait DateDefaults: Send + Sync {
    fn default_start(&self) -> NaiveDate;
    fn default_end(&self) -> NaiveDate;
}

/// Ends today (Istanbul local date) and starts `lookback` months earlier.
#[derive(Debug, Clone, Copy)]
pub struct SystemDates {
    lookback: Months,
}

impl SystemDates {
    pub fn with_lookback_months(months: u32) -> Self {
        Self {
            lookback: Months::new(months),
        }
    }

    fn today() -> NaiveDate {
        Utc::now().with_timezone(&Istanbul).date_naive()
    }
}

impl Default for SystemDates {
    fn default() -> Self {
        Self::with_lookback_months(crate::core::client::DEFAULT_LOOKBACK_MONTHS)
    }
}

impl DateDefaults for SystemDates {
    fn default_start(&self) -> NaiveDate {
        let today = Self::today();
        today.checked_sub_months(self.lookback).unwrap_or(today)
    }

    fn default_end(&self) -> NaiveDate {
        Self::today()
    }
}

/// Fixed dates, for reproducible requests and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDates {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateDefaults for FixedDates {
    fn default_start(&self) -> NaiveDate {
        self.start
    }

    fn default_end(&self) -> NaiveDate {
        self.end
    }
}
