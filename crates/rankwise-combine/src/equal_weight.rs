//! Equal-weighted rank combination.

use rankwise_traits::{CompositeTable, RankedTable, RankwiseError, Result};

use crate::{aggregate::combine_weighted_ranks, combiner::RankCombiner};

/// Combiner that gives each of `N` ranked tables the weight `1/N`.
///
/// This is the combiner used when sweeping factor subsets, where the weight
/// count follows the subset size.
#[derive(Debug, Clone)]
pub struct EqualWeightRankCombiner {
    positive_correlation: bool,
}

impl EqualWeightRankCombiner {
    /// Create a new equal-weight combiner re-ranking in the given direction.
    pub const fn new(positive_correlation: bool) -> Self {
        Self {
            positive_correlation,
        }
    }
}

impl Default for EqualWeightRankCombiner {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RankCombiner for EqualWeightRankCombiner {
    fn combine(&self, tables: &[RankedTable]) -> Result<CompositeTable> {
        if tables.is_empty() {
            return Err(RankwiseError::Configuration(
                "cannot combine zero ranked tables".to_string(),
            ));
        }
        let weights = vec![1.0 / tables.len() as f64; tables.len()];
        combine_weighted_ranks(tables, &weights, self.positive_correlation)
    }

    fn name(&self) -> &str {
        "equal_weight_rank"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rankwise_traits::{Date, RankedRecord};

    fn table(ranks: &[(&str, f64)]) -> RankedTable {
        let date = Date::from_ymd_opt(2021, 1, 4).unwrap();
        RankedTable::new(
            ranks
                .iter()
                .map(|&(asset, rank)| RankedRecord {
                    date,
                    asset: asset.to_string(),
                    factor: None,
                    value: Some(rank),
                    rank,
                })
                .collect(),
            "value",
            "rank",
        )
        .unwrap()
    }

    #[test]
    fn test_equal_weight_opposite_factors_tie() {
        let up = table(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]);
        let down = table(&[("A", 3.0), ("B", 2.0), ("C", 1.0)]);

        let combiner = EqualWeightRankCombiner::default();
        assert_eq!(combiner.name(), "equal_weight_rank");

        let composite = combiner.combine(&[up, down]).unwrap();
        let date = Date::from_ymd_opt(2021, 1, 4).unwrap();
        for asset in ["A", "B", "C"] {
            assert_relative_eq!(composite.get(date, asset).unwrap(), 2.0);
        }
    }

    #[test]
    fn test_equal_weight_empty() {
        let err = EqualWeightRankCombiner::new(false).combine(&[]).unwrap_err();
        assert!(err.is_configuration());
    }
}
