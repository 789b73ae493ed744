//! Explicitly weighted rank combination.

use rankwise_traits::{CompositeTable, RankedTable, Result};
use serde::{Deserialize, Serialize};

use crate::{aggregate::combine_weighted_ranks, combiner::RankCombiner};

/// Configuration for weighted rank combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedRankConfig {
    /// One weight per ranked table, in table order.
    pub weights: Vec<f64>,
    /// Direction used to re-rank the weighted sum.
    #[serde(default = "default_positive_correlation")]
    pub positive_correlation: bool,
}

const fn default_positive_correlation() -> bool {
    true
}

impl Default for WeightedRankConfig {
    fn default() -> Self {
        Self {
            weights: Vec::new(),
            positive_correlation: true,
        }
    }
}

impl WeightedRankConfig {
    /// `n` equal weights of `1/n`.
    pub fn equal(n: usize, positive_correlation: bool) -> Self {
        Self {
            weights: vec![1.0 / n as f64; n],
            positive_correlation,
        }
    }
}

/// Combiner that applies a fixed weight to each ranked table.
///
/// The number of tables passed to [`combine`](RankCombiner::combine) must
/// match the number of configured weights.
#[derive(Debug, Clone, Default)]
pub struct WeightedRankCombiner {
    config: WeightedRankConfig,
}

impl WeightedRankCombiner {
    /// Create a new weighted combiner with the given configuration.
    pub const fn new(config: WeightedRankConfig) -> Self {
        Self { config }
    }

    /// The configured weights.
    pub fn weights(&self) -> &[f64] {
        &self.config.weights
    }
}

impl RankCombiner for WeightedRankCombiner {
    fn combine(&self, tables: &[RankedTable]) -> Result<CompositeTable> {
        combine_weighted_ranks(
            tables,
            &self.config.weights,
            self.config.positive_correlation,
        )
    }

    fn name(&self) -> &str {
        "weighted_rank"
    }
}
