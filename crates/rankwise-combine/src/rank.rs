//! Cross-sectional ranking within each date.

use std::collections::BTreeMap;

use rankwise_traits::{Date, LongFactorTable, RankedRecord, RankedTable, Result, UNRANKED};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options for the cross-sectional ranker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// `true` ranks ascending (lowest value gets rank 1), `false` ranks
    /// descending (highest value gets rank 1).
    pub positive_correlation: bool,
    /// Name of the ranked value column in DataFrame output.
    pub value_column: String,
    /// Name of the rank column in DataFrame output.
    pub rank_column: String,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            positive_correlation: true,
            value_column: "value".to_string(),
            rank_column: "rank".to_string(),
        }
    }
}

impl RankOptions {
    /// Default options with the given direction.
    pub fn with_direction(positive_correlation: bool) -> Self {
        Self {
            positive_correlation,
            ..Self::default()
        }
    }
}

/// Ranks asset values within each date group.
///
/// Ties share the average of the positions they occupy, so on a date with
/// `K` non-missing values the ranks always sum to `K(K+1)/2`. Records with a
/// missing or `NaN` value are kept and receive [`UNRANKED`].
///
/// # Examples
///
/// ```rust
/// use rankwise_combine::{CrossSectionalRanker, RankOptions};
/// use rankwise_traits::{Date, LongFactorRecord, LongFactorTable};
///
/// let date = Date::from_ymd_opt(2021, 1, 4).unwrap();
/// let record = |asset: &str, value| LongFactorRecord {
///     date,
///     asset: asset.to_string(),
///     factor: None,
///     value: Some(value),
/// };
/// let table = LongFactorTable::new(vec![record("A", 5.0), record("B", 5.0), record("C", 1.0)])
///     .unwrap();
///
/// let ranked = CrossSectionalRanker::new(RankOptions::default()).rank(&table).unwrap();
/// assert_eq!(ranked.rank_of(date, "A"), Some(2.5));
/// assert_eq!(ranked.rank_of(date, "C"), Some(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrossSectionalRanker {
    options: RankOptions,
}

impl CrossSectionalRanker {
    /// Create a ranker with the given options.
    pub const fn new(options: RankOptions) -> Self {
        Self { options }
    }

    /// The ranker's options.
    pub const fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Rank every record of `table` against the others on its date.
    ///
    /// # Errors
    ///
    /// Only propagates table construction errors, which cannot occur for a
    /// well-formed input table.
    pub fn rank(&self, table: &LongFactorTable) -> Result<RankedTable> {
        rank_long_table(table, &self.options)
    }
}

/// Function form of [`CrossSectionalRanker::rank`].
///
/// Output records keep the input order. The input table is not modified.
///
/// # Errors
///
/// Only propagates table construction errors, which cannot occur for a
/// well-formed input table.
pub fn rank_long_table(table: &LongFactorTable, options: &RankOptions) -> Result<RankedTable> {
    let records = table.records();
    let mut ranks = vec![UNRANKED; records.len()];

    let mut groups: BTreeMap<Date, Vec<usize>> = BTreeMap::new();
    for (i, record) in records.iter().enumerate() {
        if record.value.is_some_and(|v| !v.is_nan()) {
            groups.entry(record.date).or_default().push(i);
        }
    }

    for members in groups.values() {
        let values: Vec<f64> = members
            .iter()
            .filter_map(|&i| records[i].value)
            .collect();
        for (&i, rank) in members
            .iter()
            .zip(average_ranks(&values, options.positive_correlation))
        {
            ranks[i] = rank;
        }
    }

    debug!(
        records = records.len(),
        dates = groups.len(),
        unranked = ranks.iter().filter(|&&r| r == UNRANKED).count(),
        "ranked factor table"
    );

    let ranked = records
        .iter()
        .zip(ranks)
        .map(|(record, rank)| RankedRecord {
            date: record.date,
            asset: record.asset.clone(),
            factor: record.factor.clone(),
            value: record.value,
            rank,
        })
        .collect();

    RankedTable::new(ranked, &options.value_column, &options.rank_column)
}

/// 1-based ranks of `values`, with ties sharing their average rank.
///
/// `ascending = true` gives the smallest value rank 1; `false` gives the
/// largest value rank 1. Values are compared exactly.
pub fn average_ranks(values: &[f64], ascending: bool) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    if ascending {
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    } else {
        order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    }

    let mut ranks = vec![UNRANKED; n];
    let mut i = 0;

    while i < n {
        let mut j = i;
        // Find ties
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }

        // Positions i+1..=j share their mean
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg_rank;
        }

        i = j;
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rankwise_traits::LongFactorRecord;

    fn d(day: u32) -> Date {
        Date::from_ymd_opt(2021, 1, day).unwrap()
    }

    fn long(rows: &[(u32, &str, Option<f64>)]) -> LongFactorTable {
        LongFactorTable::new(
            rows.iter()
                .map(|&(day, asset, value)| LongFactorRecord {
                    date: d(day),
                    asset: asset.to_string(),
                    factor: Some("roe".to_string()),
                    value,
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_average_ranks_ascending() {
        assert_eq!(average_ranks(&[3.0, 1.0, 2.0], true), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_average_ranks_descending() {
        assert_eq!(average_ranks(&[3.0, 1.0, 2.0], false), vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_ties_share_average_rank() {
        assert_eq!(average_ranks(&[5.0, 5.0, 1.0], true), vec![2.5, 2.5, 1.0]);
        assert_eq!(average_ranks(&[5.0, 5.0, 1.0], false), vec![1.5, 1.5, 3.0]);
        assert_eq!(average_ranks(&[7.0, 7.0, 7.0], true), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_rank_sum_invariant() {
        let values = [0.3, -1.2, 0.3, 4.0, 2.5, -1.2, 0.0];
        let k = values.len() as f64;
        for ascending in [true, false] {
            let sum: f64 = average_ranks(&values, ascending).iter().sum();
            assert_relative_eq!(sum, k * (k + 1.0) / 2.0);
        }
    }

    #[test]
    fn test_direction_reflection() {
        let values = [0.3, -1.2, 0.3, 4.0, 2.5, -1.2, 0.0];
        let k = values.len() as f64;
        let up = average_ranks(&values, true);
        let down = average_ranks(&values, false);
        for (u, dn) in up.iter().zip(&down) {
            assert_relative_eq!(*dn, k + 1.0 - u);
        }
    }

    #[test]
    fn test_rank_groups_by_date() {
        let table = long(&[
            (4, "A", Some(5.0)),
            (4, "B", Some(5.0)),
            (4, "C", Some(1.0)),
            (5, "A", Some(1.0)),
            (5, "B", Some(2.0)),
        ]);

        let ranked = rank_long_table(&table, &RankOptions::default()).unwrap();
        assert_eq!(ranked.rank_of(d(4), "A"), Some(2.5));
        assert_eq!(ranked.rank_of(d(4), "B"), Some(2.5));
        assert_eq!(ranked.rank_of(d(4), "C"), Some(1.0));
        assert_eq!(ranked.rank_of(d(5), "A"), Some(1.0));
        assert_eq!(ranked.rank_of(d(5), "B"), Some(2.0));
    }

    #[test]
    fn test_missing_values_get_sentinel() {
        let table = long(&[(4, "A", Some(2.0)), (4, "B", None), (4, "C", Some(1.0))]);

        let ranked = rank_long_table(&table, &RankOptions::with_direction(false)).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked.rank_of(d(4), "A"), Some(1.0));
        assert_eq!(ranked.rank_of(d(4), "B"), Some(UNRANKED));
        assert_eq!(ranked.rank_of(d(4), "C"), Some(2.0));
        assert_eq!(ranked.records()[1].value, None);
    }

    #[test]
    fn test_rank_keeps_fields_and_column_names() {
        let table = long(&[(4, "A", Some(0.5))]);
        let options = RankOptions {
            positive_correlation: true,
            value_column: "roe".to_string(),
            rank_column: "roe_rank".to_string(),
        };

        let ranked = CrossSectionalRanker::new(options).rank(&table).unwrap();
        let record = &ranked.records()[0];
        assert_eq!(record.factor.as_deref(), Some("roe"));
        assert_eq!(record.value, Some(0.5));
        assert_eq!(ranked.value_column(), "roe");
        assert_eq!(ranked.rank_column(), "roe_rank");
    }

    #[test]
    fn test_rank_options_serde_defaults() {
        let options: RankOptions = serde_json::from_str(r#"{"positive_correlation": false}"#).unwrap();
        assert!(!options.positive_correlation);
        assert_eq!(options.rank_column, "rank");
        assert_eq!(options.value_column, "value");
    }
}
