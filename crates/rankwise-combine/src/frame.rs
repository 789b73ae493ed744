//! Ranking long-format Polars DataFrames.

use std::collections::BTreeMap;

use polars::prelude::*;
use rankwise_traits::{
    Date, Result, UNRANKED,
    frame::{date_values, float_values},
};

use crate::rank::average_ranks;

/// Ranks `value_column` within each `date_column` group of a long DataFrame.
///
/// Returns a copy of `df` with every original column plus `rank_column`
/// (replacing a column of that name if present). Null or `NaN` values get
/// the unranked sentinel `0.0`.
///
/// # Errors
///
/// Returns [`rankwise_traits::RankwiseError::MissingColumn`] if either input
/// column is absent, or an error if the date column cannot be read as dates.
pub fn rank_dataframe(
    df: &DataFrame,
    date_column: &str,
    value_column: &str,
    rank_column: &str,
    positive_correlation: bool,
) -> Result<DataFrame> {
    let dates = date_values(df, date_column)?;
    let values = float_values(df, value_column)?;

    let mut groups: BTreeMap<Date, Vec<usize>> = BTreeMap::new();
    for (i, (date, value)) in dates.iter().zip(&values).enumerate() {
        if value.is_some() {
            groups.entry(*date).or_default().push(i);
        }
    }

    let mut ranks = vec![UNRANKED; df.height()];
    for members in groups.values() {
        let day: Vec<f64> = members.iter().filter_map(|&i| values[i]).collect();
        for (&i, rank) in members.iter().zip(average_ranks(&day, positive_correlation)) {
            ranks[i] = rank;
        }
    }

    let mut out = df.clone();
    out.with_column(Column::new(rank_column.into(), ranks))?;
    Ok(out)
}
