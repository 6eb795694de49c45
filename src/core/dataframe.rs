use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

use crate::series::{ColumnType, ResultTable};

/// Conversion of result tables into Polars DataFrames for further analysis.
pub trait ToDataFrame {
    /// Converts the object into a Polars DataFrame.
    fn to_dataframe(&self) -> PolarsResult<DataFrame>;
}

/// `1970-01-01` counted from `0001-01-01`.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn days_since_epoch(d: NaiveDate) -> i32 {
    d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

impl ToDataFrame for ResultTable {
    /// Dates become `Date`, numbers `Float64`, epoch values `Int64`, the rest `String`.
    /// Missing cells are nulls.
    fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.width());
        for col in self.columns() {
            let name = col.name();
            let series = match col.kind() {
                ColumnType::Date => {
                    let days: Vec<Option<i32>> = col
                        .date_values()
                        .into_iter()
                        .map(|d| d.map(days_since_epoch))
                        .collect();
                    Series::new(name.into(), days).cast(&DataType::Date)?
                }
                ColumnType::Number => Series::new(name.into(), col.f64_values()),
                ColumnType::Integer => {
                    let values: Vec<Option<i64>> = col.cells().iter().map(|c| c.as_i64()).collect();
                    Series::new(name.into(), values)
                }
                ColumnType::Text => {
                    let values: Vec<Option<&str>> = col.cells().iter().map(|c| c.as_str()).collect();
                    Series::new(name.into(), values)
                }
            };
            columns.push(series.into_column());
        }
        DataFrame::new(columns)
    }
}
