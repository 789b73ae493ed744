//! Conversions between the rankwise tables and Polars DataFrames.
//!
//! Date columns may be stored either as a Polars `Date` or as `YYYY-MM-DD`
//! strings. Numeric columns of any width are read as `f64`, with nulls and
//! `NaN` treated as missing.

use polars::prelude::*;

use crate::{
    CompositeTable, Date, FactorTable, LongFactorRecord, LongFactorTable, RankedTable,
    RankwiseError, Result, types::parse_date,
};

/// Days from 0001-01-01 (CE) to the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| RankwiseError::MissingColumn(name.to_string()))
}

/// Reads a date column stored as `Date` or as `YYYY-MM-DD` strings.
pub fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Date>> {
    let series = column(df, name)?.as_materialized_series();
    match series.dtype() {
        DataType::Date => {
            let days = series.cast(&DataType::Int32)?;
            days.i32()?
                .into_iter()
                .map(|d| {
                    d.and_then(|days| {
                        Date::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
                    })
                    .ok_or_else(|| RankwiseError::InvalidDate(format!("null date in '{name}'")))
                })
                .collect()
        }
        DataType::String => series
            .str()?
            .into_iter()
            .map(|s| {
                s.ok_or_else(|| RankwiseError::InvalidDate(format!("null date in '{name}'")))
                    .and_then(parse_date)
            })
            .collect(),
        other => Err(RankwiseError::InvalidData(format!(
            "column '{name}' has type {other}, expected a date or string"
        ))),
    }
}

/// Reads a numeric column as optional `f64`s.
pub fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let values = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Reads a column as strings.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let values = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    values
        .str()?
        .into_iter()
        .map(|s| {
            s.map(str::to_string)
                .ok_or_else(|| RankwiseError::InvalidData(format!("null value in '{name}'")))
        })
        .collect()
}

impl FactorTable {
    /// Builds a wide table from a DataFrame with one date column and one
    /// numeric column per asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the date column is missing or unparsable, an asset
    /// column is not numeric, or the dates are not strictly increasing.
    pub fn from_dataframe(df: &DataFrame, date_column: &str) -> Result<Self> {
        let dates = date_values(df, date_column)?;

        let mut assets = Vec::new();
        let mut columns = Vec::new();
        for col in df.get_columns() {
            let name = col.name().as_str();
            if name == date_column {
                continue;
            }
            assets.push(name.to_string());
            columns.push(float_values(df, name)?);
        }

        let values = (0..dates.len())
            .map(|row| columns.iter().map(|c| c[row]).collect())
            .collect();

        Self::new(dates, assets, values)
    }

    /// Converts the table to a DataFrame with a `date` column followed by
    /// one column per asset.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.width() + 1);
        columns.push(Column::new("date".into(), self.dates()));
        for (i, asset) in self.assets().iter().enumerate() {
            let values: Vec<Option<f64>> = self.rows().iter().map(|row| row[i]).collect();
            columns.push(Column::new(asset.as_str().into(), values));
        }
        Ok(DataFrame::new(columns)?)
    }
}

impl LongFactorTable {
    /// Builds a long table from named date, asset, and value columns.
    ///
    /// # Errors
    ///
    /// Returns an error if a column is missing or malformed, or a
    /// `(date, asset)` key repeats.
    pub fn from_dataframe(
        df: &DataFrame,
        date_column: &str,
        asset_column: &str,
        value_column: &str,
    ) -> Result<Self> {
        let dates = date_values(df, date_column)?;
        let assets = string_values(df, asset_column)?;
        let values = float_values(df, value_column)?;

        let records = dates
            .into_iter()
            .zip(assets)
            .zip(values)
            .map(|((date, asset), value)| LongFactorRecord {
                date,
                asset,
                factor: None,
                value,
            })
            .collect();

        Self::new(records)
    }
}

impl RankedTable {
    /// Converts the table to a DataFrame with columns `date`, `asset`,
    /// `factor`, the value column, and the rank column.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let records = self.records();
        let dates: Vec<Date> = records.iter().map(|r| r.date).collect();
        let assets: Vec<&str> = records.iter().map(|r| r.asset.as_str()).collect();
        let factors: Vec<Option<&str>> = records.iter().map(|r| r.factor.as_deref()).collect();
        let values: Vec<Option<f64>> = records.iter().map(|r| r.value).collect();
        let ranks: Vec<f64> = records.iter().map(|r| r.rank).collect();

        Ok(DataFrame::new(vec![
            Column::new("date".into(), dates),
            Column::new("asset".into(), assets),
            Column::new("factor".into(), factors),
            Column::new(self.value_column().into(), values),
            Column::new(self.rank_column().into(), ranks),
        ])?)
    }
}

impl CompositeTable {
    /// Converts the table to a DataFrame with columns `date`, `asset`, and
    /// `weighted_rank`.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let records = self.records();
        let dates: Vec<Date> = records.iter().map(|r| r.date).collect();
        let assets: Vec<&str> = records.iter().map(|r| r.asset.as_str()).collect();
        let ranks: Vec<f64> = records.iter().map(|r| r.weighted_rank).collect();

        Ok(DataFrame::new(vec![
            Column::new("date".into(), dates),
            Column::new("asset".into(), assets),
            Column::new("weighted_rank".into(), ranks),
        ])?)
    }
}
