//! Core trait definition for rank combiners.

use rankwise_traits::{CompositeTable, RankedTable, Result};

/// Combines several ranked factor tables into a composite ranking.
///
/// All implementations must be thread-safe (Send + Sync) so factor sweeps
/// can share a combiner across workers.
///
/// # Examples
///
/// ```rust,no_run
/// use rankwise_combine::RankCombiner;
/// use rankwise_traits::{CompositeTable, RankedTable, Result};
///
/// struct FirstFactorOnly;
///
/// impl RankCombiner for FirstFactorOnly {
///     fn combine(&self, tables: &[RankedTable]) -> Result<CompositeTable> {
///         rankwise_combine::combine_weighted_ranks(&tables[..1], &[1.0], true)
///     }
///
///     fn name(&self) -> &str {
///         "first_factor_only"
///     }
/// }
/// ```
pub trait RankCombiner: Send + Sync {
    /// Combine ranked tables into one composite table.
    ///
    /// # Errors
    ///
    /// Returns [`rankwise_traits::RankwiseError::Configuration`] when the
    /// tables do not fit the combiner's configuration (for example a weight
    /// count that differs from the table count) or no tables are given.
    fn combine(&self, tables: &[RankedTable]) -> Result<CompositeTable>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}
