//! Weighted aggregation of several ranked factors.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use rankwise_traits::{
    Asset, CompositeRecord, CompositeTable, Date, RankedTable, RankwiseError, Result,
};
use tracing::{debug, warn};

use crate::rank::average_ranks;

/// Combines ranked factor tables into one composite rank.
///
/// Each table's ranks are scaled by its weight and the tables are aligned on
/// `(date, asset)`. Only keys that every table actually ranked survive: a
/// key absent from some table, or carrying the unranked sentinel there, is
/// dropped. The weighted sums are then ranked again within each date using
/// `positive_correlation` as the direction.
///
/// The output is sorted by `(date, asset)`. An empty intersection is not an
/// error: a warning is logged and an empty table returned.
///
/// # Errors
///
/// Returns [`RankwiseError::Configuration`] before any computation when the
/// number of weights differs from the number of tables, no tables are given,
/// or a weight is not finite.
pub fn combine_weighted_ranks(
    tables: &[RankedTable],
    weights: &[f64],
    positive_correlation: bool,
) -> Result<CompositeTable> {
    if tables.len() != weights.len() {
        return Err(RankwiseError::Configuration(format!(
            "{} ranked tables but {} weights",
            tables.len(),
            weights.len()
        )));
    }
    if tables.is_empty() {
        return Err(RankwiseError::Configuration(
            "at least one ranked table is required".to_string(),
        ));
    }
    if let Some((i, w)) = weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
        return Err(RankwiseError::Configuration(format!(
            "weight {i} is not finite: {w}"
        )));
    }

    let n_factors = tables.len();

    // Outer join on (date, asset)
    let mut joined: BTreeMap<(Date, &str), Vec<Option<f64>>> = BTreeMap::new();
    for (i, table) in tables.iter().enumerate() {
        for record in table.records().iter().filter(|r| r.is_ranked()) {
            joined
                .entry((record.date, record.asset.as_str()))
                .or_insert_with(|| vec![None; n_factors])[i] = Some(record.rank);
        }
    }
    let joined_rows = joined.len();

    // Strict intersection
    let complete: Vec<((Date, &str), Vec<f64>)> = joined
        .into_iter()
        .filter_map(|(key, ranks)| ranks.into_iter().collect::<Option<Vec<f64>>>().map(|r| (key, r)))
        .collect();

    debug!(
        factors = n_factors,
        joined = joined_rows,
        complete = complete.len(),
        "aligned ranked tables"
    );

    if complete.is_empty() {
        warn!(
            factors = n_factors,
            "no (date, asset) pair is ranked by every factor; composite is empty"
        );
        return Ok(CompositeTable::default());
    }

    let flat: Vec<f64> = complete.iter().flat_map(|(_, r)| r.iter().copied()).collect();
    let rank_matrix = Array2::from_shape_vec((complete.len(), n_factors), flat)
        .map_err(|e| RankwiseError::Other(format!("rank matrix shape: {e}")))?;
    let weights = Array1::from_vec(weights.to_vec());
    let scores = rank_matrix.dot(&weights);

    // Rows are sorted by date, so each date is one contiguous run
    let mut records = Vec::with_capacity(complete.len());
    let mut start = 0;
    while start < complete.len() {
        let date = complete[start].0.0;
        let end = start
            + complete[start..]
                .iter()
                .take_while(|((d, _), _)| *d == date)
                .count();

        let day_scores = scores.slice(ndarray::s![start..end]).to_vec();
        let ranks = average_ranks(&day_scores, positive_correlation);
        records.extend(complete[start..end].iter().zip(ranks).map(
            |(((date, asset), _), weighted_rank)| CompositeRecord {
                date: *date,
                asset: Asset::from(*asset),
                weighted_rank,
            },
        ));

        start = end;
    }

    CompositeTable::new(records)
}
